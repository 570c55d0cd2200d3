use assert_matches::assert_matches;
use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::{ParseError, psi::parse_psi, sexp::parse_sexp, tree::Node};

fn n(name: &str, children: Vec<Node>) -> Node {
    Node::new(name, children)
}

fn leaf(name: &str) -> Node {
    Node::leaf(name)
}

mod sexp {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_position_annotations() {
        let src = indoc! {"
            (source_file [0, 0] - [7, 0]
              (class_declaration [4, 0] - [6, 1]
                (type_identifier [4, 6] - [4, 14])))
        "};
        assert_eq!(
            parse_sexp(src).unwrap(),
            n(
                "source_file",
                vec![n("class_declaration", vec![leaf("type_identifier")])]
            ),
        );
    }

    #[test]
    fn skips_field_labels() {
        let src = "(call_expression function: (simple_identifier) (call_suffix))";
        assert_eq!(
            parse_sexp(src).unwrap(),
            n(
                "call_expression",
                vec![leaf("simple_identifier"), leaf("call_suffix")]
            ),
        );
    }

    #[test]
    fn sibling_order_is_preserved() {
        let src = "(a (b) (c (d) (e)) (f))";
        assert_eq!(
            parse_sexp(src).unwrap(),
            n(
                "a",
                vec![leaf("b"), n("c", vec![leaf("d"), leaf("e")]), leaf("f")]
            ),
        );
    }

    #[test]
    fn empty_input() {
        assert_matches!(parse_sexp("   \n  "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn missing_open_paren() {
        assert_matches!(parse_sexp("source_file"), Err(ParseError::ExpectedOpen(_)));
    }

    #[test]
    fn unclosed_node() {
        assert_matches!(
            parse_sexp("(source_file (class_declaration)"),
            Err(ParseError::UnexpectedEof)
        );
    }

    #[test]
    fn open_paren_only() {
        assert_matches!(parse_sexp("("), Err(ParseError::UnexpectedEof));
    }
}

mod psi {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn filters_leaf_and_noise_lines() {
        let src = indoc! {"
            KtFile: BabySteps.kt
              PsiComment(EOL_COMMENT)('// header')
              PsiWhiteSpace('\\n\\n')
              PACKAGE_DIRECTIVE
                PsiElement(package)('package')
                PsiWhiteSpace(' ')
                REFERENCE_EXPRESSION
                  PsiElement(IDENTIFIER)('foo')
              IMPORT_LIST
                <empty list>
        "};
        assert_eq!(
            parse_psi(src).unwrap(),
            n(
                "KtFile",
                vec![
                    n("PACKAGE_DIRECTIVE", vec![leaf("REFERENCE_EXPRESSION")]),
                    leaf("IMPORT_LIST"),
                ]
            ),
        );
    }

    #[test]
    fn depth_decides_sibling_boundaries() {
        let src = indoc! {"
            KtFile: Depth.kt
              CLASS
                CLASS_BODY
                  FUN
                  PROPERTY
              OBJECT_DECLARATION
        "};
        assert_eq!(
            parse_psi(src).unwrap(),
            n(
                "KtFile",
                vec![
                    n(
                        "CLASS",
                        vec![n("CLASS_BODY", vec![leaf("FUN"), leaf("PROPERTY")])]
                    ),
                    leaf("OBJECT_DECLARATION"),
                ]
            ),
        );
    }

    #[test]
    fn error_elements_are_skipped() {
        let src = indoc! {"
            KtFile: Broken.kt
              CLASS
                PsiErrorElement:Expecting a class body
        "};
        assert_eq!(parse_psi(src).unwrap(), n("KtFile", vec![leaf("CLASS")]));
    }

    #[test]
    fn empty_input() {
        assert_matches!(parse_psi(""), Err(ParseError::EmptyInput));
    }

    #[test]
    fn no_composite_nodes() {
        let src = indoc! {"
            PsiWhiteSpace('\\n')
            PsiComment(EOL_COMMENT)('// nothing here')
        "};
        assert_matches!(parse_psi(src), Err(ParseError::NoNodes));
    }
}

#[test]
fn display_renders_indented_tree() {
    let tree = n(
        "KtFile",
        vec![n("CLASS", vec![leaf("CLASS_BODY")]), leaf("PROPERTY")],
    );
    assert_eq!(
        format!("{tree}"),
        indoc! {"
            KtFile
                CLASS
                    CLASS_BODY
                PROPERTY
        "},
    );
}
