//! AHB evaluator (spec §4.9, C9): drives every (indicator, tree) pair of
//! an AHB expression in order, expanding packages and running C7/C8 for
//! each, and applies the selection rule — first pair whose requirement
//! constraint is fulfilled wins.

use crate::context::{EvaluatableData, EvaluationContext};
use crate::error::Error;
use crate::expand::expand;
use crate::fc_eval;
use crate::rc_eval;
use crate::registry::LogicBundle;
use ahb_condition_core::{AhbExpressionEvaluationResult, RequirementConstraintEvaluationResult};
use ahb_condition_parser::AhbExpressionPair;

/// Parses `src` as an AHB expression and evaluates it against `bundle`.
pub async fn evaluate_ahb_string(
    src: &str,
    bundle: &LogicBundle,
    data: &EvaluatableData,
    ctx: &EvaluationContext,
) -> Result<AhbExpressionEvaluationResult, Error> {
    let pairs = ahb_condition_parser::parse_ahb_expression(src).map_err(Error::from_syntax)?;
    evaluate_pairs(&pairs, bundle, data, ctx).await
}

/// Evaluates an already-parsed sequence of pairs (spec §4.9). Evaluation
/// is left-to-right and short-circuits after the first fulfilled pair
/// (spec §5 "Ordering").
pub async fn evaluate_pairs(
    pairs: &[AhbExpressionPair],
    bundle: &LogicBundle,
    data: &EvaluatableData,
    ctx: &EvaluationContext,
) -> Result<AhbExpressionEvaluationResult, Error> {
    let mut last = None;
    for pair in pairs {
        ctx.cancellation().check()?;
        let rc_result = match &pair.expression {
            None => RequirementConstraintEvaluationResult::unconditional_true(),
            Some(tree) => {
                let expanded = expand(tree, bundle.package_resolver.as_ref(), ctx).await?;
                rc_eval::evaluate(
                    &expanded,
                    bundle.rc_evaluator.as_ref(),
                    bundle.hints_provider.as_ref(),
                    data,
                    ctx,
                )
                .await?
            }
        };
        let fc_result = fc_eval::evaluate(
            rc_result.format_constraints_expression.as_deref(),
            bundle.fc_evaluator.as_ref(),
            ctx,
        )
        .await?;
        let fulfilled = rc_result.fulfilled;
        let result = AhbExpressionEvaluationResult {
            requirement_indicator: pair.indicator,
            requirement_constraint: rc_result,
            format_constraint: fc_result,
        };
        if fulfilled {
            return Ok(result);
        }
        last = Some(result);
    }
    Ok(last.expect("the AHB-expression grammar always yields at least one pair"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CancellationToken;
    use crate::traits::{FcEvaluator, FcLeafResult, HintsProvider, PackageResolver, RcEvaluator};
    use ahb_condition_core::{Fulfilled, ModalMark, RequirementIndicator};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct FixedRc(HashMap<&'static str, Fulfilled>);

    #[async_trait]
    impl RcEvaluator for FixedRc {
        async fn evaluate(&self, key: &str, _data: &EvaluatableData, _ctx: &EvaluationContext) -> Result<Fulfilled, Error> {
            Ok(*self.0.get(key).unwrap_or(&Fulfilled::Unknown))
        }
    }

    struct NoHints;
    #[async_trait]
    impl HintsProvider for NoHints {
        async fn hint_text(&self, _key: &str, _ctx: &EvaluationContext) -> Result<Option<String>, Error> {
            Ok(None)
        }
    }

    struct AlwaysTrueFc;
    #[async_trait]
    impl FcEvaluator for AlwaysTrueFc {
        async fn evaluate(&self, _key: &str, _entered_text: Option<&str>, _ctx: &EvaluationContext) -> Result<FcLeafResult, Error> {
            Ok(FcLeafResult {
                fulfilled: true,
                error_message: None,
            })
        }
    }

    struct NoPackages;
    #[async_trait]
    impl PackageResolver for NoPackages {
        async fn resolve(&self, _key: &str, _ctx: &EvaluationContext) -> Result<Option<String>, Error> {
            Ok(None)
        }
    }

    struct MapPackages(HashMap<&'static str, &'static str>);
    #[async_trait]
    impl PackageResolver for MapPackages {
        async fn resolve(&self, key: &str, _ctx: &EvaluationContext) -> Result<Option<String>, Error> {
            Ok(self.0.get(key).map(|s| s.to_string()))
        }
    }

    struct FixedHints(HashMap<&'static str, &'static str>);
    #[async_trait]
    impl HintsProvider for FixedHints {
        async fn hint_text(&self, key: &str, _ctx: &EvaluationContext) -> Result<Option<String>, Error> {
            Ok(self.0.get(key).map(|s| s.to_string()))
        }
    }

    fn bundle(rc: HashMap<&'static str, Fulfilled>) -> LogicBundle {
        LogicBundle {
            rc_evaluator: Arc::new(FixedRc(rc)),
            fc_evaluator: Arc::new(AlwaysTrueFc),
            hints_provider: Arc::new(NoHints),
            package_resolver: Arc::new(NoPackages),
        }
    }

    fn ctx() -> EvaluationContext {
        EvaluationContext::new(CancellationToken::new())
    }

    fn data() -> EvaluatableData {
        EvaluatableData::new(serde_json::json!({}))
    }

    #[test]
    fn bare_kann_is_unconditionally_fulfilled() {
        let bundle = bundle(HashMap::new());
        let result =
            futures::executor::block_on(evaluate_ahb_string("Kann", &bundle, &data(), &ctx()))
                .unwrap();
        assert_eq!(
            result.requirement_indicator,
            RequirementIndicator::Modal(ModalMark::Kann)
        );
        assert!(result.requirement_constraint.fulfilled);
        assert!(!result.requirement_constraint.is_conditional);
    }

    #[test]
    fn first_fulfilling_pair_wins() {
        // Muss [1] Soll [2]; [1]=F [2]=T -> SOLL wins (scenario 4)
        let bundle = bundle(HashMap::from([("1", Fulfilled::False), ("2", Fulfilled::True)]));
        let result = futures::executor::block_on(evaluate_ahb_string(
            "Muss [1] Soll [2]",
            &bundle,
            &data(),
            &ctx(),
        ))
        .unwrap();
        assert_eq!(
            result.requirement_indicator,
            RequirementIndicator::Modal(ModalMark::Soll)
        );
        assert!(result.requirement_constraint.fulfilled);
    }

    #[test]
    fn scenario_five_package_expansion_through_the_full_pipeline() {
        // Muss [2] U (([3] O [4]) U [123P])[901] U [555], [123P] -> [8] U [9],
        // all RC keys true, [901] true, [555] a hint.
        let bundle = LogicBundle {
            rc_evaluator: Arc::new(FixedRc(HashMap::from([
                ("2", Fulfilled::True),
                ("3", Fulfilled::True),
                ("4", Fulfilled::True),
                ("8", Fulfilled::True),
                ("9", Fulfilled::True),
            ]))),
            fc_evaluator: Arc::new(AlwaysTrueFc),
            hints_provider: Arc::new(FixedHints(HashMap::from([("555", "foo")]))),
            package_resolver: Arc::new(MapPackages(HashMap::from([("123P", "[8] U [9]")]))),
        };
        let result = futures::executor::block_on(evaluate_ahb_string(
            "Muss [2] U (([3] O [4]) U [123P])[901] U [555]",
            &bundle,
            &data(),
            &ctx(),
        ))
        .unwrap();
        assert!(result.requirement_constraint.fulfilled);
        assert_eq!(
            result.requirement_constraint.format_constraints_expression.as_deref(),
            Some("[901]")
        );
        assert_eq!(result.requirement_constraint.hints.as_deref(), Some("foo"));
        assert!(result.format_constraint.fulfilled);
    }

    #[test]
    fn no_pair_fulfilled_returns_the_last() {
        let bundle = bundle(HashMap::from([("1", Fulfilled::False), ("2", Fulfilled::False)]));
        let result = futures::executor::block_on(evaluate_ahb_string(
            "Muss [1] Soll [2]",
            &bundle,
            &data(),
            &ctx(),
        ))
        .unwrap();
        assert_eq!(
            result.requirement_indicator,
            RequirementIndicator::Modal(ModalMark::Soll)
        );
        assert!(!result.requirement_constraint.fulfilled);
    }
}
