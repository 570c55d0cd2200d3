//! Batch validation of a fixture corpus: each `.kt` file is parsed with
//! `tree-sitter parse`, its recorded PSI dump is read from the `.txt` file
//! next to it, and the two trees go through the comparison pipeline.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crossval_compare::{
    CompareResult, CorrespondenceTable, Status, compare_trees, normalize_psi, normalize_ts,
};
use crossval_parser::{psi::parse_psi, sexp::parse_sexp};
use serde::Serialize;
use tokio::{process::Command, time::timeout};
use tracing::info;

use crate::{CrossvalError, Run};

const TREE_SITTER_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome for one fixture file.
#[derive(Serialize)]
pub struct FileResult {
    pub filename: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_result: Option<CompareResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_error_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FileResult {
    fn ts_error(filename: String, detail: String) -> Self {
        Self {
            filename,
            status: Status::TsParseError,
            compare_result: None,
            ts_error_detail: Some(detail),
            error_message: None,
        }
    }

    fn psi_error(filename: String, message: String) -> Self {
        Self {
            filename,
            status: Status::PsiParseError,
            compare_result: None,
            ts_error_detail: None,
            error_message: Some(message),
        }
    }
}

/// Validate all `.kt` files under the fixtures directory, sorted by path.
pub async fn run_corpus(
    table: &CorrespondenceTable,
    args: &Run,
) -> Result<Vec<FileResult>, CrossvalError> {
    let mut kt_files: Vec<PathBuf> = vec![];
    let mut dir = tokio::fs::read_dir(&args.fixtures).await?;
    while let Some(entry) = dir.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "kt") {
            kt_files.push(path);
        }
    }
    kt_files.sort();

    if kt_files.is_empty() {
        return Err(CrossvalError::NoFixtures(args.fixtures.clone()));
    }

    let mut results = vec![];
    for kt_file in &kt_files {
        let name = kt_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("processing {name}");
        results.push(validate_file(table, &args.grammar_dir, name, kt_file).await);
    }
    Ok(results)
}

async fn validate_file(
    table: &CorrespondenceTable,
    grammar_dir: &Path,
    name: String,
    kt_file: &Path,
) -> FileResult {
    let ts_output = match run_tree_sitter(grammar_dir, kt_file).await {
        Ok(output) => output,
        Err(error) => {
            return FileResult::ts_error(name, format!("tree-sitter execution failed: {error}"));
        }
    };

    // an ERROR/MISSING node anywhere means the grammar could not parse the
    // file; structural comparison would only measure the error recovery
    if has_parse_errors(&ts_output) {
        let count = count_parse_errors(&ts_output);
        return FileResult::ts_error(
            name,
            format!("{count} ERROR/MISSING node(s) in tree-sitter output"),
        );
    }

    let ts_tree = match parse_sexp(&ts_output) {
        Ok(tree) => tree,
        Err(error) => {
            return FileResult::ts_error(
                name,
                format!("failed to parse tree-sitter output: {error}"),
            );
        }
    };

    let txt_file = kt_file.with_extension("txt");
    let psi_text = match tokio::fs::read_to_string(&txt_file).await {
        Ok(text) => text,
        Err(_) => {
            return FileResult::psi_error(name, format!("no PSI fixture file: {}", txt_file.display()));
        }
    };
    let psi_tree = match parse_psi(&psi_text) {
        Ok(tree) => tree,
        Err(error) => {
            return FileResult::psi_error(name, format!("failed to parse PSI fixture: {error}"));
        }
    };

    let ts_norm = normalize_ts(table, &ts_tree);
    let psi_norm = normalize_psi(table, &psi_tree);
    let compare_result = compare_trees(ts_norm.as_ref(), psi_norm.as_ref());

    FileResult {
        filename: name,
        status: compare_result.status,
        compare_result: Some(compare_result),
        ts_error_detail: None,
        error_message: None,
    }
}

#[derive(Debug, thiserror::Error)]
enum TreeSitterError {
    #[error("timed out after {}s", TREE_SITTER_TIMEOUT.as_secs())]
    Timeout,
    #[error("produced no output")]
    NoOutput,
    #[error("{0}")]
    Spawn(#[from] std::io::Error),
}

/// Run `tree-sitter parse` and capture stdout. The exit status is ignored:
/// the command exits nonzero for recoverable parse errors while still
/// printing the full tree, and those show up as ERROR/MISSING nodes.
async fn run_tree_sitter(grammar_dir: &Path, kt_file: &Path) -> Result<String, TreeSitterError> {
    let invocation = Command::new("tree-sitter")
        .arg("parse")
        .arg(kt_file)
        .current_dir(grammar_dir)
        .output();

    let output = timeout(TREE_SITTER_TIMEOUT, invocation)
        .await
        .map_err(|_| TreeSitterError::Timeout)??;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if stdout.is_empty() {
        return Err(TreeSitterError::NoOutput);
    }
    Ok(stdout)
}

fn has_parse_errors(ts_output: &str) -> bool {
    ts_output.contains("(ERROR") || ts_output.contains("(MISSING")
}

fn count_parse_errors(ts_output: &str) -> usize {
    ts_output.matches("(ERROR").count() + ts_output.matches("(MISSING").count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn detects_error_and_missing_nodes() {
        assert!(has_parse_errors("(source_file (ERROR (simple_identifier)))"));
        assert!(has_parse_errors("(source_file (MISSING \"}\"))"));
        assert!(!has_parse_errors("(source_file (class_declaration))"));
    }

    #[test]
    fn counts_both_error_kinds() {
        let dump = "(source_file (ERROR) (class_declaration (MISSING \")\") (ERROR)))";
        assert_eq!(count_parse_errors(dump), 3);
    }

    #[test]
    fn timeout_message_tracks_the_configured_limit() {
        assert_eq!(TreeSitterError::Timeout.to_string(), "timed out after 30s");
    }
}
