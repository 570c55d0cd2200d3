use crossval_parser::Node;
use pretty_assertions::assert_eq;

use crate::compare::{CompareResult, DiffKind, Difference, Status, compare_trees};

fn n(name: &str, children: Vec<Node>) -> Node {
    Node::new(name, children)
}

fn leaf(name: &str) -> Node {
    Node::leaf(name)
}

fn diff(kind: DiffKind, path: &str, expected: &str, actual: &str) -> Difference {
    Difference {
        path: path.into(),
        expected: expected.into(),
        actual: actual.into(),
        kind,
    }
}

#[test]
fn identical_trees_match() {
    let tree = n(
        "KtFile",
        vec![n("CLASS", vec![leaf("CLASS_BODY")]), leaf("PROPERTY")],
    );
    let result = compare_trees(Some(&tree), Some(&tree));
    assert_eq!(result.status, Status::Match);
    assert_eq!(result.differences, vec![]);
}

#[test]
fn absent_ts_tree_dominates() {
    assert_eq!(
        compare_trees(None, Some(&leaf("KtFile"))).status,
        Status::TsParseError,
    );
    // even when both sides failed
    assert_eq!(compare_trees(None, None).status, Status::TsParseError);
}

#[test]
fn absent_psi_tree_is_a_psi_parse_error() {
    let result = compare_trees(Some(&leaf("KtFile")), None);
    assert_eq!(result.status, Status::PsiParseError);
    assert_eq!(result.differences, vec![]);
}

#[test]
fn root_name_mismatch() {
    let result = compare_trees(Some(&leaf("WRONG")), Some(&leaf("REF")));
    assert_eq!(result.status, Status::Mismatch);
    assert_eq!(
        result.differences,
        vec![diff(DiffKind::NameMismatch, "REF", "REF", "WRONG")],
    );
}

#[test]
fn nested_name_mismatch_uses_reference_names_in_the_path() {
    let result = compare_trees(
        Some(&n("X", vec![leaf("A")])),
        Some(&n("X", vec![leaf("B")])),
    );
    assert_eq!(
        result.differences,
        vec![diff(DiffKind::NameMismatch, "X > B", "B", "A")],
    );
}

#[test]
fn extra_child_on_the_ts_side() {
    let result = compare_trees(
        Some(&n("X", vec![leaf("A"), leaf("B")])),
        Some(&n("X", vec![leaf("A")])),
    );
    assert_eq!(
        result.differences,
        vec![
            diff(DiffKind::ChildCountMismatch, "X", "1", "2"),
            diff(DiffKind::ExtraChild, "X[child 1]", "(absent)", "B"),
        ],
    );
}

#[test]
fn missing_child_on_the_ts_side() {
    let result = compare_trees(
        Some(&n("X", vec![leaf("A")])),
        Some(&n("X", vec![leaf("A"), leaf("B"), leaf("C")])),
    );
    assert_eq!(
        result.differences,
        vec![
            diff(DiffKind::ChildCountMismatch, "X", "3", "1"),
            diff(DiffKind::MissingChild, "X[child 1]", "B", "(absent)"),
            diff(DiffKind::MissingChild, "X[child 2]", "C", "(absent)"),
        ],
    );
}

#[test]
fn comparison_descends_past_a_name_mismatch() {
    let result = compare_trees(
        Some(&n("WRONG", vec![leaf("A")])),
        Some(&n("REF", vec![leaf("B")])),
    );
    assert_eq!(
        result.differences,
        vec![
            diff(DiffKind::NameMismatch, "REF", "REF", "WRONG"),
            diff(DiffKind::NameMismatch, "REF > B", "B", "A"),
        ],
    );
}

#[test]
fn difference_display_format() {
    let d = diff(DiffKind::NameMismatch, "X > B", "B", "A");
    assert_eq!(
        d.to_string(),
        "[name_mismatch] at X > B: expected=B, actual=A",
    );
}

#[test]
fn result_serializes_with_stable_names() {
    let result = CompareResult {
        status: Status::Mismatch,
        differences: vec![diff(DiffKind::ChildCountMismatch, "X", "1", "2")],
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "status": "MISMATCH",
            "differences": [{
                "path": "X",
                "expected": "1",
                "actual": "2",
                "kind": "child_count_mismatch",
            }],
        }),
    );
}
