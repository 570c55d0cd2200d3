#![forbid(unsafe_code)]

//! Parsers for the raw textual dumps of the two Kotlin parsers under
//! comparison: tree-sitter's S-expression output and JetBrains' indented
//! PSI tree listing. Both produce the same generic [tree::Node].

pub mod psi;
pub mod sexp;
pub mod tree;

pub use tree::Node;

#[cfg(test)]
mod tests;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    EmptyInput,
    #[error("expected `(`, found `{0}`")]
    ExpectedOpen(String),
    #[error("expected node name, found `{0}`")]
    ExpectedName(String),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("no tree nodes found in input")]
    NoNodes,
}
