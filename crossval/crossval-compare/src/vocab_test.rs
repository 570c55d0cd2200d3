//! Internal consistency of the static correspondence table. These checks
//! run in CI instead of at table construction time; the table is trusted
//! data once they pass.

use fnv::FnvHashSet;

use crate::vocab::{
    ALL_PSI_NODES, ALL_TS_NODES, Collapse, CorrespondenceTable, PSI_SKIP, TS_SKIP, TS_TO_PSI,
    WRAPPER_COLLAPSE,
};

#[test]
fn rename_map_covers_every_ts_node_exactly() {
    let keys: FnvHashSet<&str> = TS_TO_PSI.iter().map(|(ts, _)| *ts).collect();
    let all: FnvHashSet<&str> = ALL_TS_NODES.iter().copied().collect();

    let unmapped: Vec<_> = all.difference(&keys).collect();
    assert!(unmapped.is_empty(), "tree-sitter nodes without a rename entry: {unmapped:?}");

    let stale: Vec<_> = keys.difference(&all).collect();
    assert!(stale.is_empty(), "rename entries for unknown tree-sitter nodes: {stale:?}");
}

#[test]
fn rename_entries_are_unique() {
    let keys: FnvHashSet<&str> = TS_TO_PSI.iter().map(|(ts, _)| *ts).collect();
    assert_eq!(keys.len(), TS_TO_PSI.len());
}

#[test]
fn rename_targets_are_known_psi_names() {
    let all: FnvHashSet<&str> = ALL_PSI_NODES.iter().copied().collect();
    for (ts, psi) in TS_TO_PSI {
        if let Some(psi) = psi {
            assert!(all.contains(psi), "{ts} maps to unknown PSI node {psi}");
        }
    }
}

#[test]
fn ts_skip_entries_are_explicitly_unmapped() {
    let table = CorrespondenceTable::kotlin();
    for name in TS_SKIP {
        assert_eq!(
            table.rename(name),
            Some(None),
            "{name} is skipped but not marked unmapped in the rename map"
        );
    }
}

#[test]
fn psi_skip_names_are_known() {
    let all: FnvHashSet<&str> = ALL_PSI_NODES.iter().copied().collect();
    for name in PSI_SKIP {
        assert!(all.contains(name), "unknown PSI node {name} in skip set");
    }
}

#[test]
fn collapse_entries_reference_known_psi_names() {
    let all: FnvHashSet<&str> = ALL_PSI_NODES.iter().copied().collect();
    for (name, collapse) in WRAPPER_COLLAPSE {
        assert!(all.contains(name), "unknown PSI node {name} in collapse map");
        if let Collapse::Into(target) = collapse {
            assert!(
                all.contains(target),
                "{name} collapses into unknown PSI node {target}"
            );
        }
    }
}
