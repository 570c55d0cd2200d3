#![forbid(unsafe_code)]

//! Cross-validation of tree-sitter-kotlin against the JetBrains Kotlin PSI.
//!
//! Both parsers dump a concrete syntax tree for the same source file; the
//! dumps disagree on naming and nesting even when the parses agree. This
//! crate normalizes both trees into the PSI vocabulary and reports every
//! structural discrepancy that survives normalization.

pub mod compare;
pub mod normalize;
pub mod vocab;

pub use compare::{CompareResult, DiffKind, Difference, Status, compare_trees};
pub use normalize::{normalize_psi, normalize_ts};
pub use vocab::{Collapse, CorrespondenceTable};

use crossval_parser::{psi::parse_psi, sexp::parse_sexp};

/// The full pipeline for one source file: parse both raw dumps, normalize
/// each side, diff the canonical trees.
///
/// A dump that fails to parse surfaces as the corresponding parse-error
/// status rather than an `Err`; a rejected dump is a result, not a fault.
pub fn cross_validate(
    table: &CorrespondenceTable,
    ts_dump: &str,
    psi_dump: &str,
) -> CompareResult {
    let ts_tree = match parse_sexp(ts_dump) {
        Ok(tree) => normalize_ts(table, &tree),
        Err(error) => {
            tracing::debug!(%error, "rejected tree-sitter dump");
            None
        }
    };
    let psi_tree = match parse_psi(psi_dump) {
        Ok(tree) => normalize_psi(table, &tree),
        Err(error) => {
            tracing::debug!(%error, "rejected PSI dump");
            None
        }
    };

    compare_trees(ts_tree.as_ref(), psi_tree.as_ref())
}

#[cfg(test)]
mod compare_test;
#[cfg(test)]
mod fixture_test;
#[cfg(test)]
mod vocab_test;
