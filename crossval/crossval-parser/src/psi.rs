//! Parser for JetBrains PSI indented tree dumps.
//!
//! ```text
//! KtFile: BabySteps.kt
//!   PACKAGE_DIRECTIVE
//!     PsiElement(package)('package')
//!     PsiWhiteSpace(' ')
//!     REFERENCE_EXPRESSION
//!       PsiElement(IDENTIFIER)('foo')
//! ```
//!
//! Only composite nodes (UPPERCASE_WITH_UNDERSCORES names, plus the
//! `KtFile:` root line) survive; leaf tokens, whitespace, comments and
//! `<empty list>` markers are discarded. Nesting is given by the count of
//! leading indentation characters: a node's children are the maximal run
//! of following lines that are strictly deeper.

use crate::{ParseError, tree::Node};

struct Entry<'a> {
    depth: usize,
    name: &'a str,
}

pub fn parse_psi(input: &str) -> Result<Node, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let entries = scan_lines(input);
    if entries.is_empty() {
        return Err(ParseError::NoNodes);
    }

    let mut index = 0;
    Ok(build_node(&entries, &mut index))
}

fn scan_lines(input: &str) -> Vec<Entry<'_>> {
    let mut entries = vec![];

    for line in input.lines() {
        let stripped = line.trim_start();
        if stripped.is_empty() {
            continue;
        }
        let depth = line.len() - stripped.len();
        let stripped = stripped.trim_end();

        if is_noise(stripped) {
            continue;
        }

        if stripped.strip_prefix("KtFile:").is_some() {
            entries.push(Entry {
                depth,
                name: "KtFile",
            });
        } else if is_composite(stripped) {
            entries.push(Entry {
                depth,
                name: stripped,
            });
        }
    }

    entries
}

fn is_noise(line: &str) -> bool {
    line.starts_with("PsiElement(")
        || line.starts_with("PsiWhiteSpace(")
        || line.starts_with("PsiComment(")
        || line.starts_with("PsiErrorElement")
        || line == "<empty list>"
}

fn is_composite(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('A'..='Z')) && chars.all(|c| matches!(c, 'A'..='Z' | '0'..='9' | '_'))
}

fn build_node(entries: &[Entry], index: &mut usize) -> Node {
    let Entry { depth, name } = entries[*index];
    *index += 1;

    let mut children = vec![];
    while *index < entries.len() && entries[*index].depth > depth {
        children.push(build_node(entries, index));
    }

    Node::new(name, children)
}
