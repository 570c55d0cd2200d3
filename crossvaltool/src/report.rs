//! Markdown report over a batch of validation results: summary counts,
//! a per-file table, detailed mismatch listings and the mismatch patterns
//! shared across files.

use std::cmp::Reverse;

use crossval_compare::{DiffKind, Status};
use fnv::{FnvHashMap, FnvHashSet};
use itertools::Itertools;

use crate::runner::FileResult;

/// Cap per file, to keep the report readable for badly mismatching trees.
const MAX_DIFFS_PER_FILE: usize = 20;

/// Cap on the specific-pattern table.
const MAX_PATTERNS: usize = 30;

pub fn generate(results: &[FileResult]) -> String {
    [
        header(),
        summary(results),
        per_file_table(results),
        detailed_mismatches(results),
        common_patterns(results),
        parse_errors(results),
    ]
    .join("\n")
}

fn header() -> String {
    "# tree-sitter-kotlin vs JetBrains PSI: cross-validation report\n\n\
     Structural comparison of tree-sitter-kotlin parse trees against\n\
     JetBrains PSI reference trees.\n"
        .to_string()
}

fn summary(results: &[FileResult]) -> String {
    let count = |status: Status| results.iter().filter(|r| r.status == status).count();
    let matches = count(Status::Match);
    let mismatches = count(Status::Mismatch);
    let ts_errors = count(Status::TsParseError);
    let psi_errors = count(Status::PsiParseError);
    let clean_parses = matches + mismatches + psi_errors;

    let mut lines = vec![
        "## Summary\n".to_string(),
        "| Metric | Count |".to_string(),
        "|--------|-------|".to_string(),
        format!("| Total fixture files | {} |", results.len()),
        format!("| Tree-sitter clean parses | {clean_parses} |"),
        format!("| Tree-sitter parse errors | {ts_errors} |"),
        format!("| **Structural matches** | **{matches}** |"),
        format!("| Structural mismatches | {mismatches} |"),
        format!("| PSI parse errors | {psi_errors} |"),
        String::new(),
    ];

    if clean_parses > 0 {
        let rate = matches as f64 / clean_parses as f64 * 100.0;
        lines.push(format!(
            "**Match rate (among clean parses): {matches}/{clean_parses} ({rate:.1}%)**\n"
        ));
    }

    lines.join("\n")
}

fn per_file_table(results: &[FileResult]) -> String {
    let mut lines = vec![
        "## Per-file results\n".to_string(),
        "| # | File | Status | Details |".to_string(),
        "|---|------|--------|---------|".to_string(),
    ];

    for (index, result) in results.iter().enumerate() {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            index + 1,
            result.filename,
            status_label(result.status),
            brief_detail(result),
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

fn detailed_mismatches(results: &[FileResult]) -> String {
    let mismatched: Vec<_> = results
        .iter()
        .filter(|r| r.status == Status::Mismatch)
        .collect();
    if mismatched.is_empty() {
        return "## Detailed mismatches\n\nNo mismatches found.\n".to_string();
    }

    let mut lines = vec![
        "## Detailed mismatches\n".to_string(),
        format!(
            "Structural differences for {} mismatching file(s).\n",
            mismatched.len()
        ),
    ];

    for result in mismatched {
        lines.push(format!("### {}\n", result.filename));
        let Some(compared) = &result.compare_result else {
            lines.push("No difference details available.\n".to_string());
            continue;
        };

        for diff in compared.differences.iter().take(MAX_DIFFS_PER_FILE) {
            lines.push(format!("- **[{}]** at `{}`", diff.kind, diff.path));
            lines.push(format!("  - expected: `{}`", diff.expected));
            lines.push(format!("  - actual: `{}`", diff.actual));
        }

        let hidden = compared.differences.len().saturating_sub(MAX_DIFFS_PER_FILE);
        if hidden > 0 {
            lines.push(format!("\n*... and {hidden} more difference(s)*\n"));
        } else {
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn common_patterns(results: &[FileResult]) -> String {
    let compared: Vec<_> = results
        .iter()
        .filter(|r| r.status == Status::Mismatch)
        .filter_map(|r| Some((r, r.compare_result.as_ref()?)))
        .collect();
    if compared.is_empty() {
        return "## Common mismatch patterns\n\nNo mismatches to analyze.\n".to_string();
    }

    let mut kind_counts: FnvHashMap<DiffKind, usize> = Default::default();
    // a (kind, expected, actual) pattern counts once per file it appears in
    let mut pattern_files: FnvHashMap<(DiffKind, &str, &str), Vec<&str>> = Default::default();

    for (result, compare_result) in &compared {
        let mut seen: FnvHashSet<(DiffKind, &str, &str)> = Default::default();
        for diff in &compare_result.differences {
            *kind_counts.entry(diff.kind).or_default() += 1;
            let key = (diff.kind, diff.expected.as_str(), diff.actual.as_str());
            if seen.insert(key) {
                pattern_files
                    .entry(key)
                    .or_default()
                    .push(result.filename.as_str());
            }
        }
    }

    let mut lines = vec![
        "## Common mismatch patterns\n".to_string(),
        "### By difference kind\n".to_string(),
        "| Kind | Total occurrences |".to_string(),
        "|------|-------------------|".to_string(),
    ];
    for (kind, count) in kind_counts
        .iter()
        .sorted_by_key(|(kind, count)| (Reverse(**count), kind.as_str()))
    {
        lines.push(format!("| {kind} | {count} |"));
    }

    lines.push(String::new());
    lines.push("### Most common specific patterns\n".to_string());
    lines.push(
        "Patterns that appear in multiple files, grouped by (kind, expected, actual):\n"
            .to_string(),
    );
    lines.push("| Pattern | Files affected | Example files |".to_string());
    lines.push("|---------|---------------|---------------|".to_string());

    // ties broken by the pattern key so the table is stable across runs
    for ((kind, expected, actual), files) in pattern_files
        .iter()
        .sorted_by_key(|((kind, expected, actual), files)| {
            (Reverse(files.len()), kind.as_str(), *expected, *actual)
        })
        .take(MAX_PATTERNS)
    {
        if files.len() < 2 {
            continue;
        }
        let mut examples = files.iter().take(3).join(", ");
        if files.len() > 3 {
            examples += &format!(" (+{} more)", files.len() - 3);
        }
        lines.push(format!(
            "| [{kind}] expected=`{expected}` actual=`{actual}` | {} | {examples} |",
            files.len(),
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

fn parse_errors(results: &[FileResult]) -> String {
    let failed: Vec<_> = results
        .iter()
        .filter(|r| r.status == Status::TsParseError)
        .collect();
    if failed.is_empty() {
        return "## Tree-sitter parse errors\n\nNo parse errors.\n".to_string();
    }

    let mut lines = vec![
        "## Tree-sitter parse errors\n".to_string(),
        format!(
            "{} file(s) had ERROR/MISSING nodes in tree-sitter output:\n",
            failed.len()
        ),
        "| # | File | Detail |".to_string(),
        "|---|------|--------|".to_string(),
    ];

    for (index, result) in failed.iter().enumerate() {
        let detail = result
            .ts_error_detail
            .as_deref()
            .or(result.error_message.as_deref())
            .unwrap_or("unknown error");
        lines.push(format!("| {} | {} | {} |", index + 1, result.filename, detail));
    }

    lines.push(String::new());
    lines.join("\n")
}

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Match => "MATCH",
        Status::Mismatch => "MISMATCH",
        Status::TsParseError => "TS_ERROR",
        Status::PsiParseError => "PSI_ERROR",
    }
}

fn brief_detail(result: &FileResult) -> String {
    match result.status {
        Status::Match => "Structurally identical".to_string(),
        Status::TsParseError => result
            .ts_error_detail
            .clone()
            .unwrap_or_else(|| "Tree-sitter parse error".to_string()),
        Status::PsiParseError => result
            .error_message
            .clone()
            .unwrap_or_else(|| "PSI parse error".to_string()),
        Status::Mismatch => match &result.compare_result {
            Some(compared) => format!("{} difference(s)", compared.differences.len()),
            None => "Unknown".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use crossval_compare::{CompareResult, DiffKind, Difference, Status};

    use super::*;

    fn matched(name: &str) -> FileResult {
        FileResult {
            filename: name.to_string(),
            status: Status::Match,
            compare_result: Some(CompareResult {
                status: Status::Match,
                differences: vec![],
            }),
            ts_error_detail: None,
            error_message: None,
        }
    }

    fn mismatched(name: &str, differences: Vec<Difference>) -> FileResult {
        FileResult {
            filename: name.to_string(),
            status: Status::Mismatch,
            compare_result: Some(CompareResult {
                status: Status::Mismatch,
                differences,
            }),
            ts_error_detail: None,
            error_message: None,
        }
    }

    fn name_mismatch(path: &str, expected: &str, actual: &str) -> Difference {
        Difference {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            kind: DiffKind::NameMismatch,
        }
    }

    #[test]
    fn summary_counts_and_match_rate() {
        let results = vec![
            matched("a"),
            matched("b"),
            mismatched("c", vec![name_mismatch("KtFile > FUN", "FUN", "PROPERTY")]),
            FileResult {
                filename: "d".to_string(),
                status: Status::TsParseError,
                compare_result: None,
                ts_error_detail: Some("2 ERROR/MISSING node(s) in tree-sitter output".to_string()),
                error_message: None,
            },
        ];

        let report = generate(&results);
        assert!(report.contains("| Total fixture files | 4 |"));
        assert!(report.contains("| Tree-sitter clean parses | 3 |"));
        assert!(report.contains("| **Structural matches** | **2** |"));
        assert!(report.contains("**Match rate (among clean parses): 2/3 (66.7%)**"));
        assert!(report.contains("| 4 | d | TS_ERROR | 2 ERROR/MISSING node(s) in tree-sitter output |"));
    }

    #[test]
    fn shared_patterns_are_counted_once_per_file() {
        let repeated = || name_mismatch("KtFile > BLOCK", "BLOCK", "INTEGER_CONSTANT");
        let results = vec![
            mismatched("a", vec![repeated(), repeated()]),
            mismatched("b", vec![repeated()]),
        ];

        let report = generate(&results);
        // three occurrences overall, but the pattern affects two files
        assert!(report.contains("| name_mismatch | 3 |"));
        assert!(report.contains(
            "| [name_mismatch] expected=`BLOCK` actual=`INTEGER_CONSTANT` | 2 | a, b |"
        ));
    }

    #[test]
    fn tied_patterns_keep_a_stable_order() {
        let results = vec![
            mismatched(
                "a",
                vec![
                    name_mismatch("KtFile > FUN", "FUN", "PROPERTY"),
                    name_mismatch("KtFile > CLASS", "CLASS", "OBJECT_DECLARATION"),
                ],
            ),
            mismatched(
                "b",
                vec![
                    name_mismatch("KtFile > CLASS", "CLASS", "OBJECT_DECLARATION"),
                    name_mismatch("KtFile > FUN", "FUN", "PROPERTY"),
                ],
            ),
        ];

        let report = generate(&results);
        let class_row = report
            .find("| [name_mismatch] expected=`CLASS` actual=`OBJECT_DECLARATION` | 2 | a, b |");
        let fun_row =
            report.find("| [name_mismatch] expected=`FUN` actual=`PROPERTY` | 2 | a, b |");
        assert!(class_row.unwrap() < fun_row.unwrap());
    }

    #[test]
    fn mismatch_details_are_capped() {
        let differences = (0..25)
            .map(|i| name_mismatch(&format!("KtFile[child {i}]"), "FUN", "PROPERTY"))
            .collect();
        let report = generate(&[mismatched("big", differences)]);
        assert!(report.contains("*... and 5 more difference(s)*"));
    }
}
