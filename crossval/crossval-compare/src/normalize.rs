//! Normalization of both parse trees into the shared PSI vocabulary.
//!
//! The two sides are asymmetric on purpose: the PSI tree is the reference,
//! so the tree-sitter normalizer renames toward PSI names and applies the
//! structural alignment rules, while the PSI normalizer only prunes and
//! collapses what tree-sitter never produces.

pub mod psi;
pub mod ts;

pub use psi::normalize_psi;
pub use ts::normalize_ts;
