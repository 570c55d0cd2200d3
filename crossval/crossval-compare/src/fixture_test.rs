//! End-to-end fixtures: each `.test` file holds a raw tree-sitter dump,
//! a raw PSI dump (after a `//@ psi` marker) and the expected outcome
//! (after `//@ expect`): the status on the first line, then the rendered
//! differences in order.

use std::{fs, path::PathBuf};

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{CorrespondenceTable, cross_validate};

#[rstest]
fn validates_fixture(#[files("test-cases/*.test")] path: PathBuf) {
    let source = fs::read_to_string(&path).unwrap();
    let (ts_dump, rest) = source.split_once("//@ psi\n").unwrap();
    let (psi_dump, expect) = rest.split_once("//@ expect\n").unwrap();

    let result = cross_validate(&CorrespondenceTable::kotlin(), ts_dump, psi_dump);

    let mut rendered = vec![result.status.to_string()];
    rendered.extend(result.differences.iter().map(ToString::to_string));
    let expected: Vec<String> = expect.lines().map(str::to_string).collect();

    assert_eq!(rendered, expected, "fixture {}", path.display());
}
