//! The two stable serialized-tree representations.
//!
//! *Verbose* mirrors the parse tree's rule structure (`{"type": ...,
//! "children": [...], "token"?: {...}}`) and is meant to be re-parsed by
//! non-Rust consumers. *Concise* is a compact, one-way projection
//! (`{"<op>": [left, right]}`, bare strings for leaves) intended for
//! logging and debugging, not deserialization.

use crate::key::{self, KeyKind};
use crate::tree::{CompositionKind, Tree};
use serde_json::{Value, json};

fn composition_rule(kind: CompositionKind) -> &'static str {
    match kind {
        CompositionKind::And => "and_composition",
        CompositionKind::Or => "or_composition",
        CompositionKind::Xor => "xor_composition",
        CompositionKind::ThenAlso => "then_also_composition",
    }
}

fn composition_tag(kind: CompositionKind) -> &'static str {
    match kind {
        CompositionKind::And => "and",
        CompositionKind::Or => "or",
        CompositionKind::Xor => "xor",
        CompositionKind::ThenAlso => "then_also",
    }
}

/// Renders `tree` in the verbose, re-parseable JSON shape.
pub fn to_verbose_json(tree: &Tree) -> Value {
    match tree {
        Tree::Leaf(key_text) => {
            let is_package = key::classify(key_text) == KeyKind::Package;
            json!({
                "type": if is_package { "package" } else { "condition" },
                "children": [],
                "token": {
                    "value": key_text,
                    "type": if is_package { "PACKAGE_KEY" } else { "CONDITION_KEY" },
                },
            })
        }
        Tree::Composition { kind, left, right } => json!({
            "type": composition_rule(*kind),
            "children": [to_verbose_json(left), to_verbose_json(right)],
        }),
    }
}

/// Renders `tree` in the concise, one-way JSON shape.
pub fn to_concise_json(tree: &Tree) -> Value {
    match tree {
        Tree::Leaf(key_text) => Value::String(key_text.clone()),
        Tree::Composition { kind, left, right } => json!({
            composition_tag(*kind): [to_concise_json(left), to_concise_json(right)],
        }),
    }
}
