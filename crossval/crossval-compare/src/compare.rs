//! Structural differ over two canonical trees.
//!
//! Both inputs must already be normalized into the shared vocabulary; the
//! differ itself knows nothing about either parser. The PSI side is the
//! reference: paths and `expected` values are phrased in its terms.

use std::fmt::{self, Display};

use crossval_parser::Node;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Match,
    Mismatch,
    TsParseError,
    PsiParseError,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "MATCH",
            Self::Mismatch => "MISMATCH",
            Self::TsParseError => "TS_PARSE_ERROR",
            Self::PsiParseError => "PSI_PARSE_ERROR",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    NameMismatch,
    MissingChild,
    ExtraChild,
    ChildCountMismatch,
}

impl DiffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameMismatch => "name_mismatch",
            Self::MissingChild => "missing_child",
            Self::ExtraChild => "extra_child",
            Self::ChildCountMismatch => "child_count_mismatch",
        }
    }
}

impl Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural difference. `path` is the breadcrumb of reference-side
/// node names from the root, e.g. `KtFile > CLASS > TYPE_PARAMETER_LIST`,
/// with a `[child i]` suffix for unmatched child positions.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Difference {
    pub path: String,
    pub expected: String,
    pub actual: String,
    pub kind: DiffKind,
}

impl Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] at {}: expected={}, actual={}",
            self.kind, self.path, self.expected, self.actual
        )
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct CompareResult {
    pub status: Status,
    pub differences: Vec<Difference>,
}

impl CompareResult {
    fn of(status: Status) -> Self {
        Self {
            status,
            differences: vec![],
        }
    }
}

/// Compare two canonical trees. An absent tree-sitter tree wins over an
/// absent PSI tree: when both failed to parse, the result is still
/// [Status::TsParseError].
pub fn compare_trees(ts_tree: Option<&Node>, psi_tree: Option<&Node>) -> CompareResult {
    let Some(ts_tree) = ts_tree else {
        return CompareResult::of(Status::TsParseError);
    };
    let Some(psi_tree) = psi_tree else {
        return CompareResult::of(Status::PsiParseError);
    };

    let mut differences = vec![];
    visit(ts_tree, psi_tree, "", &mut differences);

    CompareResult {
        status: if differences.is_empty() {
            Status::Match
        } else {
            Status::Mismatch
        },
        differences,
    }
}

fn visit(ts_node: &Node, psi_node: &Node, path: &str, differences: &mut Vec<Difference>) {
    let current = if path.is_empty() {
        psi_node.name.clone()
    } else {
        format!("{path} > {}", psi_node.name)
    };

    if ts_node.name != psi_node.name {
        differences.push(Difference {
            path: current.clone(),
            expected: psi_node.name.clone(),
            actual: ts_node.name.clone(),
            kind: DiffKind::NameMismatch,
        });
        // keep descending: nested diagnostics anchored on the reference
        // name stay readable even under a mismatched parent
    }

    if ts_node.children.len() != psi_node.children.len() {
        differences.push(Difference {
            path: current.clone(),
            expected: psi_node.children.len().to_string(),
            actual: ts_node.children.len().to_string(),
            kind: DiffKind::ChildCountMismatch,
        });
    }

    let shared = ts_node.children.len().min(psi_node.children.len());
    for (ts_child, psi_child) in ts_node.children.iter().zip(&psi_node.children) {
        visit(ts_child, psi_child, &current, differences);
    }

    for (index, extra) in ts_node.children.iter().enumerate().skip(shared) {
        differences.push(Difference {
            path: format!("{current}[child {index}]"),
            expected: "(absent)".into(),
            actual: extra.name.clone(),
            kind: DiffKind::ExtraChild,
        });
    }

    for (index, missing) in psi_node.children.iter().enumerate().skip(shared) {
        differences.push(Difference {
            path: format!("{current}[child {index}]"),
            expected: missing.name.clone(),
            actual: "(absent)".into(),
            kind: DiffKind::MissingChild,
        });
    }
}
