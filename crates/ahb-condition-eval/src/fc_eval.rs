//! Format-constraint evaluator (spec §4.8, C8): parses the residual FC
//! expression C7 produced and reduces it under plain two-valued boolean
//! logic — juxtaposition (`then_also` syntax) means `and` here, there is
//! no gate semantics once we are down to format constraints alone.

use crate::context::EvaluationContext;
use crate::error::Error;
use crate::traits::FcEvaluator;
use ahb_condition_core::{CompositionKind, FormatConstraintEvaluationResult, Tree};
use futures::future::{try_join, BoxFuture};

/// Evaluates the residual format-constraint expression produced by C7.
/// `None` or an empty residual is vacuously true (spec §4.9).
pub async fn evaluate(
    residual: Option<&str>,
    fc: &dyn FcEvaluator,
    ctx: &EvaluationContext,
) -> Result<FormatConstraintEvaluationResult, Error> {
    let Some(residual) = residual.filter(|s| !s.is_empty()) else {
        return Ok(FormatConstraintEvaluationResult::vacuously_true());
    };
    let tree = ahb_condition_parser::parse_condition_expression(residual).map_err(Error::from_syntax)?;
    ctx.visit_leaves_pre_order(&tree);
    let (fulfilled, mut false_messages) = reduce(&tree, fc, ctx).await?;
    let error_message = if fulfilled {
        None
    } else {
        false_messages.sort();
        Some(false_messages.join("; "))
    };
    Ok(FormatConstraintEvaluationResult {
        fulfilled,
        error_message,
    })
}

fn reduce<'a>(
    tree: &'a Tree,
    fc: &'a dyn FcEvaluator,
    ctx: &'a EvaluationContext,
) -> BoxFuture<'a, Result<(bool, Vec<String>), Error>> {
    Box::pin(async move {
        ctx.cancellation().check()?;
        match tree {
            Tree::Leaf(key) => {
                let result = fc.evaluate(key, ctx.entered_text(), ctx).await?;
                let messages = if result.fulfilled {
                    Vec::new()
                } else {
                    result.error_message.into_iter().collect()
                };
                Ok((result.fulfilled, messages))
            }
            Tree::Composition { kind, left, right } => {
                let ((left_ok, mut left_msgs), (right_ok, right_msgs)) =
                    try_join(reduce(left, fc, ctx), reduce(right, fc, ctx)).await?;
                let fulfilled = match kind {
                    CompositionKind::And | CompositionKind::ThenAlso => left_ok && right_ok,
                    CompositionKind::Or => left_ok || right_ok,
                    CompositionKind::Xor => left_ok ^ right_ok,
                };
                left_msgs.extend(right_msgs);
                Ok((fulfilled, left_msgs))
            }
        }
    })
}
