//! PSI side of normalization. The PSI tree already carries the target
//! vocabulary, so this pass only prunes nodes tree-sitter never produces
//! and folds PSI's extra wrapper chains.

use crossval_parser::Node;

use crate::vocab::{Collapse, CorrespondenceTable};

/// Normalize a PSI tree for comparison against a normalized tree-sitter
/// tree. Returns `None` when everything is pruned away.
pub fn normalize_psi(table: &CorrespondenceTable, root: &Node) -> Option<Node> {
    normalize_one(table, root)
}

/// See [crate::normalize::ts]: an elided node is replaced by its recursively
/// normalized children in the parent's child list.
fn normalize_child(table: &CorrespondenceTable, node: &Node) -> Vec<Node> {
    match normalize_one(table, node) {
        Some(normalized) => vec![normalized],
        None => node
            .children
            .iter()
            .flat_map(|child| normalize_child(table, child))
            .collect(),
    }
}

fn normalize_one(table: &CorrespondenceTable, node: &Node) -> Option<Node> {
    let mut children: Vec<Node> = node
        .children
        .iter()
        .flat_map(|child| normalize_child(table, child))
        .collect();

    // PSI materializes an (empty) PACKAGE_DIRECTIVE even without a package
    // statement; tree-sitter omits package_header entirely. Keyed on the
    // raw children so a directive holding only leaves is kept.
    if node.name == "PACKAGE_DIRECTIVE" && node.children.is_empty() {
        return None;
    }

    // always-present wrappers the other side omits when empty
    if matches!(
        node.name.as_str(),
        "IMPORT_LIST" | "MODIFIER_LIST" | "VALUE_PARAMETER_LIST"
    ) && children.is_empty()
    {
        return None;
    }

    // A qualified name `a.b.c` is a chain of DOT_QUALIFIED_EXPRESSION nodes
    // once REFERENCE_EXPRESSION is pruned. Tree-sitter treats the whole name
    // as one elided identifier, so the chain reduces to nothing here too.
    if node.name == "DOT_QUALIFIED_EXPRESSION"
        && children
            .iter()
            .all(|c| c.name == "DOT_QUALIFIED_EXPRESSION")
    {
        return None;
    }

    if table.skips_psi(&node.name) {
        return match children.len() {
            1 => children.pop(),
            // zero children: gone; several: dropped here, the caller
            // promotes them in place
            _ => None,
        };
    }

    if let Some(collapse) = table.collapse(&node.name) {
        match collapse {
            Collapse::Single => {
                if children.len() == 1 {
                    return children.pop();
                }
            }
            Collapse::Into(target) => {
                if let Some(pos) = children.iter().position(|c| c.name == target) {
                    let mut chosen = children.remove(pos);
                    // the wrapper's other children follow the target's own
                    chosen.children.append(&mut children);
                    return Some(chosen);
                }
                // target child absent: keep the wrapper as-is
            }
        }
    }

    Some(Node::new(node.name.clone(), children))
}
