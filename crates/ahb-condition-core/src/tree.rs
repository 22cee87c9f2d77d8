//! The condition-expression tree.
//!
//! A `Tree` is either a condition-key leaf or a binary composition. There
//! is no unary node: `then_also` is modeled as a composition whose
//! right-hand child happens to be gated, rather than as a distinct
//! arity.

use crate::key::{self, KeyKind};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositionKind {
    And,
    Or,
    Xor,
    ThenAlso,
}

impl CompositionKind {
    fn as_str(self) -> &'static str {
        match self {
            CompositionKind::And => "U",
            CompositionKind::Or => "O",
            CompositionKind::Xor => "X",
            CompositionKind::ThenAlso => "",
        }
    }
}

/// A parsed (pre-evaluation) condition-expression tree.
///
/// `Leaf` holds the raw bracket-interior key text (e.g. `"123"`,
/// `"123P"`); classification into requirement-constraint / hint / format
/// constraint / package / time-condition is deliberately deferred to
/// [`crate::key::classify`] rather than baked into separate leaf variants
/// at parse time — the grammar only knows syntax, not semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tree {
    Leaf(String),
    Composition {
        kind: CompositionKind,
        left: Box<Tree>,
        right: Box<Tree>,
    },
}

impl Tree {
    pub fn leaf(key: impl Into<String>) -> Tree {
        Tree::Leaf(key.into())
    }

    pub fn compose(kind: CompositionKind, left: Tree, right: Tree) -> Tree {
        Tree::Composition {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Tree, right: Tree) -> Tree {
        Tree::compose(CompositionKind::And, left, right)
    }

    pub fn or(left: Tree, right: Tree) -> Tree {
        Tree::compose(CompositionKind::Or, left, right)
    }

    pub fn xor(left: Tree, right: Tree) -> Tree {
        Tree::compose(CompositionKind::Xor, left, right)
    }

    pub fn then_also(gate: Tree, payload: Tree) -> Tree {
        Tree::compose(CompositionKind::ThenAlso, gate, payload)
    }

    /// `true` for the empty tree produced by a bare requirement indicator
    /// (a bare `Kann` with no expression). There is no dedicated
    /// `Empty` variant — callers that need "no condition expression at
    /// all" use `Option<Tree>` (see `ahb-condition-parser`'s
    /// `AhbExpressionPair`), so this helper exists only for readability at
    /// call sites that already hold an `Option<Tree>`.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    /// Walks every leaf key with its classification. Used by the category
    /// extractor and by the package expander to find package
    /// leaves without duplicating the traversal.
    pub fn for_each_leaf<'a>(&'a self, mut f: impl FnMut(&'a str, KeyKind)) {
        fn walk<'a>(tree: &'a Tree, f: &mut impl FnMut(&'a str, KeyKind)) {
            match tree {
                Tree::Leaf(key) => f(key, key::classify(key)),
                Tree::Composition { left, right, .. } => {
                    walk(left, f);
                    walk(right, f);
                }
            }
        }
        walk(self, &mut f)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(self, f, 0)
    }
}

/// Precedence used purely for minimal parenthesization when
/// pretty-printing; must match the grammar's precedence order
/// (parens > adjacency > U > O > X, all left-associative).
fn precedence(kind: CompositionKind) -> u8 {
    match kind {
        CompositionKind::ThenAlso => 3,
        CompositionKind::And => 2,
        CompositionKind::Or => 1,
        CompositionKind::Xor => 0,
    }
}

fn write_tree(tree: &Tree, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
    match tree {
        Tree::Leaf(key) => write!(f, "[{key}]"),
        Tree::Composition { kind, left, right } => {
            let prec = precedence(*kind);
            let needs_parens = prec < min_prec;
            if needs_parens {
                write!(f, "(")?;
            }
            // Left operand may be at the same precedence (left-assoc);
            // the right operand always needs strictly-higher precedence
            // to round-trip unambiguously.
            write_tree(left, f, prec)?;
            match kind {
                CompositionKind::ThenAlso => {}
                _ => write!(f, " {} ", kind.as_str())?,
            }
            write_tree(right, f, prec + 1)?;
            if needs_parens {
                write!(f, ")")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_displays_with_brackets() {
        assert_eq!(Tree::leaf("123").to_string(), "[123]");
    }

    #[test]
    fn and_of_leaves_has_no_parens() {
        let t = Tree::and(Tree::leaf("1"), Tree::leaf("2"));
        assert_eq!(t.to_string(), "[1] U [2]");
    }

    #[test]
    fn lower_precedence_child_gets_parens() {
        // [2] U ([3] O [4])
        let inner = Tree::or(Tree::leaf("3"), Tree::leaf("4"));
        let t = Tree::and(Tree::leaf("2"), inner);
        assert_eq!(t.to_string(), "[2] U ([3] O [4])");
    }

    #[test]
    fn then_also_has_no_separator() {
        let t = Tree::then_also(Tree::leaf("1"), Tree::leaf("901"));
        assert_eq!(t.to_string(), "[1][901]");
    }

    #[test]
    fn for_each_leaf_visits_in_order() {
        let t = Tree::and(Tree::leaf("1"), Tree::leaf("901"));
        let mut seen = Vec::new();
        t.for_each_leaf(|k, kind| seen.push((k.to_string(), kind)));
        assert_eq!(
            seen,
            vec![
                ("1".to_string(), KeyKind::RequirementConstraint),
                ("901".to_string(), KeyKind::FormatConstraint),
            ]
        );
    }
}
