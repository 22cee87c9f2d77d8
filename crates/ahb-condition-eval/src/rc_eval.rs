//! Requirement-constraint evaluator (spec §4.7, C7): post-order
//! reduction of a (package-free) tree into a
//! [`RequirementConstraintEvaluationResult`], consulting content
//! evaluators at the leaves via C10's traits.

use crate::algebra::{combine_and_or_xor, combine_then_also, Reduction};
use crate::context::{EvaluatableData, EvaluationContext};
use crate::error::Error;
use crate::traits::{HintsProvider, RcEvaluator};
use ahb_condition_core::key::{self, KeyKind};
use ahb_condition_core::{CompositionKind, Fulfilled, RequirementConstraintEvaluationResult, Tree};
use futures::future::{try_join, BoxFuture};

/// Reduces `tree` (already package-expanded) and returns the
/// requirement-constraint result for this pair.
pub async fn evaluate(
    tree: &Tree,
    rc: &dyn RcEvaluator,
    hints: &dyn HintsProvider,
    data: &EvaluatableData,
    ctx: &EvaluationContext,
) -> Result<RequirementConstraintEvaluationResult, Error> {
    // Visitation happens synchronously, up front, in the tree's own
    // pre-order — independent of the concurrent `reduce` below, whose
    // sibling futures may finish in either order.
    ctx.visit_leaves_pre_order(tree);
    let reduction = reduce(tree, rc, hints, data, ctx).await?;
    Ok(to_result(reduction))
}

fn to_result(reduction: Reduction) -> RequirementConstraintEvaluationResult {
    // spec §4.7: "fulfilled is true iff the root Fulfilled is T, or
    // (Fulfilled is NEUTRAL and the tree had no RC leaves)".
    let fulfilled = reduction.fulfilled.is_true()
        || (reduction.fulfilled.is_neutral() && !reduction.saw_requirement_constraint);
    RequirementConstraintEvaluationResult {
        fulfilled,
        is_conditional: reduction.saw_requirement_constraint,
        format_constraints_expression: reduction.format_expression,
        hints: reduction.hints,
    }
}

fn reduce<'a>(
    tree: &'a Tree,
    rc: &'a dyn RcEvaluator,
    hints: &'a dyn HintsProvider,
    data: &'a EvaluatableData,
    ctx: &'a EvaluationContext,
) -> BoxFuture<'a, Result<Reduction, Error>> {
    Box::pin(async move {
        ctx.cancellation().check()?;
        match tree {
            Tree::Leaf(leaf_key) => reduce_leaf(leaf_key, rc, hints, data, ctx).await,
            Tree::Composition { kind, left, right } => {
                // Sibling subtrees are independent (spec §5) so they may
                // be fanned out concurrently; `then_also`'s right side is
                // only meaningful once the left gate is known, but
                // reducing it eagerly is still safe (it has no
                // side-effecting dependency on the gate) and keeps one
                // code path for all four operators.
                let (left, right) = try_join(
                    reduce(left, rc, hints, data, ctx),
                    reduce(right, rc, hints, data, ctx),
                )
                .await?;
                match kind {
                    CompositionKind::ThenAlso => combine_then_also(left, right),
                    _ => combine_and_or_xor(*kind, left, right),
                }
            }
        }
    })
}

async fn reduce_leaf(
    leaf_key: &str,
    rc: &dyn RcEvaluator,
    hints: &dyn HintsProvider,
    data: &EvaluatableData,
    ctx: &EvaluationContext,
) -> Result<Reduction, Error> {
    match key::classify(leaf_key) {
        KeyKind::RequirementConstraint => {
            let fulfilled = rc.evaluate(leaf_key, data, ctx).await?;
            Ok(Reduction::requirement_constraint_leaf(fulfilled))
        }
        KeyKind::Hint => {
            let text = hints.hint_text(leaf_key, ctx).await?;
            let mut reduction = Reduction::leaf(Fulfilled::Neutral);
            if let Some(text) = text {
                reduction = reduction.with_hints(text);
            }
            Ok(reduction)
        }
        KeyKind::FormatConstraint => {
            Ok(Reduction::leaf(Fulfilled::Neutral).with_format_expression(format!("[{leaf_key}]")))
        }
        // Time conditions are only sketched in the upstream source; the
        // open question in DESIGN.md resolves them to NEUTRAL, the same
        // as an unevaluated format constraint minus the residual.
        KeyKind::TimeCondition => Ok(Reduction::leaf(Fulfilled::Neutral)),
        KeyKind::Package => unreachable!("package leaves must be expanded before C7 runs"),
    }
}
