//! Category extractor (spec §4.4, C4): walks a parsed tree and buckets
//! every leaf key into one of the five disjoint sets from the key
//! taxonomy (spec §3), sorted for deterministic output.

use ahb_condition_core::{KeyKind, Tree};
use std::collections::BTreeSet;

/// Five pairwise-disjoint sorted sets of keys, one per [`KeyKind`]. A
/// caller that wants to pre-compute every content-evaluation result for
/// a tree (spec §8) reads these sets rather than walking the tree
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct KeySets {
    pub requirement_constraints: BTreeSet<String>,
    pub hints: BTreeSet<String>,
    pub format_constraints: BTreeSet<String>,
    pub packages: BTreeSet<String>,
    pub time_conditions: BTreeSet<String>,
}

impl KeySets {
    fn insert(&mut self, kind: KeyKind, key: &str) {
        let set = match kind {
            KeyKind::RequirementConstraint => &mut self.requirement_constraints,
            KeyKind::Hint => &mut self.hints,
            KeyKind::FormatConstraint => &mut self.format_constraints,
            KeyKind::Package => &mut self.packages,
            KeyKind::TimeCondition => &mut self.time_conditions,
        };
        set.insert(key.to_string());
    }
}

/// Extracts the five key sets from `tree`.
pub fn extract(tree: &Tree) -> KeySets {
    let mut sets = KeySets::default();
    tree.for_each_leaf(|key, kind| sets.insert(kind, key));
    sets
}
