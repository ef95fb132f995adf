// tests/resolver_property.rs
//
// Property tests for nested-directory collapsing.

use std::collections::BTreeSet;
use std::path::PathBuf;

use proptest::prelude::*;

use rewatch::watch::collapse_nested;

fn arb_path() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 1..5)
        .prop_map(|segments| segments.into_iter().collect::<PathBuf>())
}

fn arb_path_set() -> impl Strategy<Value = BTreeSet<PathBuf>> {
    prop::collection::btree_set(arb_path(), 0..10)
}

proptest! {
    /// Survivors are a subset of the input.
    #[test]
    fn survivors_come_from_the_input(dirs in arb_path_set()) {
        let out = collapse_nested(&dirs);
        prop_assert!(out.iter().all(|p| dirs.contains(p)));
    }

    /// No survivor is nested under another survivor.
    #[test]
    fn survivors_are_pairwise_unnested(dirs in arb_path_set()) {
        let out = collapse_nested(&dirs);
        for a in &out {
            for b in &out {
                if a != b {
                    prop_assert!(
                        !a.starts_with(b),
                        "{a:?} is nested under surviving {b:?}"
                    );
                }
            }
        }
    }

    /// Every input directory is still covered: it either survives or has a
    /// surviving ancestor, so recursive walks lose nothing.
    #[test]
    fn every_input_is_covered(dirs in arb_path_set()) {
        let out = collapse_nested(&dirs);
        for dir in &dirs {
            prop_assert!(
                out.iter().any(|s| dir.starts_with(s)),
                "{dir:?} has no surviving ancestor"
            );
        }
    }
}
