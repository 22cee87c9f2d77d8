//! Multi-valued algebra (spec §4.6, C6): the `and`/`or`/`xor`/`then_also`
//! tables over `{T, F, U, N}`, plus the ancillary-data merge rules that
//! ride along every composition.
//!
//! This is the one module in the crate with exhaustive `match` blocks
//! instead of lookup tables — spec §9 asks for the algebra "verified by
//! the type checker", which an exhaustive match over `Fulfilled` buys
//! for free (add a variant, every arm stops compiling).

use crate::error::Error;
use ahb_condition_core::{CompositionKind, Fulfilled};
use std::collections::BTreeSet;

/// The accumulator a subtree reduces to: its truth value plus whatever
/// hints and format-constraint residual were reachable under it (spec
/// §3 "EvaluatedComposition").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub fulfilled: Fulfilled,
    pub format_expression: Option<String>,
    pub hints: Option<String>,
    /// Whether a `RequirementConstraint` leaf was visited anywhere under
    /// this subtree — the raw material for C7's `is_conditional` (spec
    /// §4.7), threaded through the algebra rather than tracked by a
    /// shared mutable counter so sibling subtrees stay safe to evaluate
    /// concurrently (spec §5).
    pub saw_requirement_constraint: bool,
}

impl Reduction {
    pub fn leaf(fulfilled: Fulfilled) -> Self {
        Reduction {
            fulfilled,
            format_expression: None,
            hints: None,
            saw_requirement_constraint: false,
        }
    }

    pub fn requirement_constraint_leaf(fulfilled: Fulfilled) -> Self {
        Reduction {
            saw_requirement_constraint: true,
            ..Reduction::leaf(fulfilled)
        }
    }

    pub fn with_format_expression(mut self, expr: impl Into<String>) -> Self {
        self.format_expression = Some(expr.into());
        self
    }

    pub fn with_hints(mut self, text: impl Into<String>) -> Self {
        self.hints = Some(text.into());
        self
    }
}

fn and_table(l: Fulfilled, r: Fulfilled) -> Fulfilled {
    use Fulfilled::*;
    match (l, r) {
        (True, True) => True,
        (True, False) => False,
        (True, Unknown) => Unknown,
        (True, Neutral) => True,
        (False, _) => False,
        (Unknown, True) => Unknown,
        (Unknown, False) => False,
        (Unknown, Unknown) => Unknown,
        (Unknown, Neutral) => Unknown,
        (Neutral, True) => True,
        (Neutral, False) => False,
        (Neutral, Unknown) => Unknown,
        (Neutral, Neutral) => Neutral,
    }
}

/// Kleene `or`/`xor` are defined only for `{T, F, U}`; `Neutral` on
/// either side is a hard error (spec §3 invariant 4, §4.6).
fn require_boolean_valued(op: &'static str, l: Fulfilled, r: Fulfilled) -> Result<(), Error> {
    if l.is_boolean_valued() && r.is_boolean_valued() {
        Ok(())
    } else {
        Err(Error::nonsensical(op, l, r))
    }
}

fn or_table(l: Fulfilled, r: Fulfilled) -> Fulfilled {
    use Fulfilled::*;
    match (l, r) {
        (True, _) | (_, True) => True,
        (Unknown, _) | (_, Unknown) => Unknown,
        (False, False) => False,
        _ => unreachable!("or_table is only called with boolean-valued operands"),
    }
}

fn xor_table(l: Fulfilled, r: Fulfilled) -> Fulfilled {
    use Fulfilled::*;
    match (l, r) {
        (Unknown, _) | (_, Unknown) => Unknown,
        (True, True) | (False, False) => False,
        (True, False) | (False, True) => True,
        _ => unreachable!("xor_table is only called with boolean-valued operands"),
    }
}

/// Merges two hint strings: newline-separated, de-duplicated on full
/// text, lexicographically sorted so concurrent sibling evaluation
/// produces a deterministic result (spec §5).
fn combine_hints(left: Option<&str>, right: Option<&str>) -> Option<String> {
    let mut set = BTreeSet::new();
    for side in [left, right].into_iter().flatten() {
        for line in side.split('\n') {
            set.insert(line.to_string());
        }
    }
    if set.is_empty() {
        None
    } else {
        Some(set.into_iter().collect::<Vec<_>>().join("\n"))
    }
}

/// Merges two format-constraint residuals under the outer operator
/// (spec §4.6 "Composite propagation"): empty residuals are the
/// identity, otherwise the two are wrapped and joined with the
/// operator's own syntax so the result is itself valid C2 input.
fn combine_residual(kind: CompositionKind, left: Option<&str>, right: Option<&str>) -> Option<String> {
    match (left, right) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (Some(l), Some(r)) => Some(match kind {
            CompositionKind::And => format!("({l}) U ({r})"),
            CompositionKind::Or => format!("({l}) O ({r})"),
            CompositionKind::Xor => format!("({l}) X ({r})"),
            CompositionKind::ThenAlso => format!("({l})({r})"),
        }),
    }
}

/// Reduces one `and`/`or`/`xor` composition node (spec §4.6).
pub fn combine_and_or_xor(
    kind: CompositionKind,
    left: Reduction,
    right: Reduction,
) -> Result<Reduction, Error> {
    let fulfilled = match kind {
        CompositionKind::And => and_table(left.fulfilled, right.fulfilled),
        CompositionKind::Or => {
            require_boolean_valued("or", left.fulfilled, right.fulfilled)?;
            or_table(left.fulfilled, right.fulfilled)
        }
        CompositionKind::Xor => {
            require_boolean_valued("xor", left.fulfilled, right.fulfilled)?;
            xor_table(left.fulfilled, right.fulfilled)
        }
        CompositionKind::ThenAlso => unreachable!("then_also goes through combine_then_also"),
    };
    // A composition that conclusively fails carries no ancillary data
    // forward: the hints and format-constraint residual attached to its
    // operands only matter "under a fulfilled gate" (spec §3 invariant
    // 3), and `False` here means neither operand's gate held, the same
    // way `then_also`'s `False` gate drops its payload's ancillary.
    let (format_expression, hints) = if fulfilled == Fulfilled::False {
        (None, None)
    } else {
        (
            combine_residual(kind, left.format_expression.as_deref(), right.format_expression.as_deref()),
            combine_hints(left.hints.as_deref(), right.hints.as_deref()),
        )
    };
    Ok(Reduction {
        fulfilled,
        format_expression,
        hints,
        saw_requirement_constraint: left.saw_requirement_constraint || right.saw_requirement_constraint,
    })
}

/// Reduces a `then_also` node: `left` gates whether `right`'s fulfilled
/// value, format residual, and hints are kept (spec §4.6).
///
/// `left` must itself be requirement-constraint-valued — a `Neutral`
/// left (e.g. a bare Hint, or a subtree that reduced to Neutral) is an
/// error, matching "a Hint on the left is an error" generalized to any
/// non-boolean-valued left reduction.
pub fn combine_then_also(left: Reduction, right: Reduction) -> Result<Reduction, Error> {
    let saw_requirement_constraint = left.saw_requirement_constraint || right.saw_requirement_constraint;
    match left.fulfilled {
        Fulfilled::True => Ok(Reduction {
            fulfilled: right.fulfilled,
            format_expression: combine_residual(
                CompositionKind::ThenAlso,
                left.format_expression.as_deref(),
                right.format_expression.as_deref(),
            ),
            hints: combine_hints(left.hints.as_deref(), right.hints.as_deref()),
            saw_requirement_constraint,
        }),
        Fulfilled::False => Ok(Reduction {
            fulfilled: Fulfilled::Neutral,
            format_expression: None,
            hints: left.hints,
            saw_requirement_constraint,
        }),
        Fulfilled::Unknown => Ok(Reduction {
            fulfilled: Fulfilled::Unknown,
            format_expression: combine_residual(
                CompositionKind::ThenAlso,
                left.format_expression.as_deref(),
                right.format_expression.as_deref(),
            ),
            hints: combine_hints(left.hints.as_deref(), right.hints.as_deref()),
            saw_requirement_constraint,
        }),
        Fulfilled::Neutral => Err(Error::nonsensical("then_also", left.fulfilled, right.fulfilled)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Fulfilled::*;

    #[test]
    fn and_table_matches_spec() {
        assert_eq!(and_table(True, Neutral), True);
        assert_eq!(and_table(Neutral, Neutral), Neutral);
        assert_eq!(and_table(False, True), False);
        assert_eq!(and_table(Unknown, Unknown), Unknown);
    }

    #[test]
    fn or_rejects_neutral() {
        let err = combine_and_or_xor(CompositionKind::Or, Reduction::leaf(Neutral), Reduction::leaf(True));
        assert!(err.is_err());
    }

    #[test]
    fn xor_truth_table() {
        assert_eq!(xor_table(True, True), False);
        assert_eq!(xor_table(True, False), True);
        assert_eq!(xor_table(Unknown, False), Unknown);
    }

    #[test]
    fn then_also_false_gate_yields_neutral_with_empty_residual() {
        let left = Reduction::leaf(False);
        let right = Reduction::leaf(Neutral).with_format_expression("901").with_hints("ignored");
        let out = combine_then_also(left, right).unwrap();
        assert_eq!(out.fulfilled, Neutral);
        assert_eq!(out.format_expression, None);
        assert_eq!(out.hints, None);
    }

    #[test]
    fn then_also_true_gate_propagates_right() {
        let left = Reduction::leaf(True);
        let right = Reduction::leaf(Neutral).with_format_expression("901");
        let out = combine_then_also(left, right).unwrap();
        assert_eq!(out.fulfilled, Neutral);
        assert_eq!(out.format_expression.as_deref(), Some("901"));
    }

    #[test]
    fn then_also_neutral_gate_is_an_error() {
        let left = Reduction::leaf(Neutral);
        let right = Reduction::leaf(True);
        assert!(combine_then_also(left, right).is_err());
    }

    #[test]
    fn hint_merge_dedupes_and_sorts() {
        let merged = combine_hints(Some("b"), Some("a\nb"));
        assert_eq!(merged.as_deref(), Some("a\nb"));
    }

    #[test]
    fn residual_merge_wraps_with_outer_operator() {
        let merged = combine_residual(CompositionKind::And, Some("901"), Some("902"));
        assert_eq!(merged.as_deref(), Some("(901) U (902)"));
    }

    #[test]
    fn residual_merge_identity_on_empty_side() {
        let merged = combine_residual(CompositionKind::Or, None, Some("901"));
        assert_eq!(merged.as_deref(), Some("901"));
    }
}
