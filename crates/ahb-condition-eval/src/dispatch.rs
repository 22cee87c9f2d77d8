//! Reference `RcEvaluator`/`FcEvaluator` implementations that dispatch
//! by a per-key lookup table (spec §9's REDESIGN FLAG: "prefer a trait
//! method taking the key as data, with the evaluator internally
//! dispatching via a table; preserves extensibility without
//! reflection").
//!
//! Most applications implement `RcEvaluator`/`FcEvaluator` directly
//! against their own domain model, but a table keyed by bracket text is
//! the shape the source's per-key dispatch actually has, so it's worth
//! offering as a ready-made evaluator rather than leaving every
//! consumer to rebuild it.

use crate::context::{EvaluatableData, EvaluationContext};
use crate::error::Error;
use crate::registry::{EdifactFormat, FormatVersion};
use crate::traits::{FcEvaluator, FcLeafResult, RcEvaluator};
use ahb_condition_core::Fulfilled;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;

type RcHandler = Arc<dyn Fn(&EvaluatableData) -> Result<Fulfilled, String> + Send + Sync>;
type FcHandler = Arc<dyn Fn(Option<&str>) -> Result<FcLeafResult, String> + Send + Sync>;

/// An `RcEvaluator` that dispatches a requirement-constraint key to a
/// registered handler closure by exact match, erroring with
/// `Error::UnknownKeyEvaluator` for anything not registered.
pub struct TableRcEvaluator {
    format_version: FormatVersion,
    handlers: IndexMap<String, RcHandler>,
}

impl TableRcEvaluator {
    pub fn new(format_version: FormatVersion) -> Self {
        TableRcEvaluator {
            format_version,
            handlers: IndexMap::new(),
        }
    }

    pub fn with_handler(
        mut self,
        key: impl Into<String>,
        handler: impl Fn(&EvaluatableData) -> Result<Fulfilled, String> + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(key.into(), Arc::new(handler));
        self
    }
}

#[async_trait]
impl RcEvaluator for TableRcEvaluator {
    async fn evaluate(
        &self,
        key: &str,
        data: &EvaluatableData,
        _ctx: &EvaluationContext,
    ) -> Result<Fulfilled, Error> {
        let handler = self.handlers.get(key).ok_or_else(|| Error::UnknownKeyEvaluator {
            key: key.to_string(),
            format: self.format_version.format.to_string(),
            version: self.format_version.version.to_string(),
        })?;
        handler(data).map_err(Error::evaluator_failure)
    }
}

/// An `FcEvaluator` that dispatches a format-constraint key the same
/// way `TableRcEvaluator` dispatches a requirement-constraint key.
pub struct TableFcEvaluator {
    format_version: FormatVersion,
    handlers: IndexMap<String, FcHandler>,
}

impl TableFcEvaluator {
    pub fn new(format_version: FormatVersion) -> Self {
        TableFcEvaluator {
            format_version,
            handlers: IndexMap::new(),
        }
    }

    pub fn with_handler(
        mut self,
        key: impl Into<String>,
        handler: impl Fn(Option<&str>) -> Result<FcLeafResult, String> + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(key.into(), Arc::new(handler));
        self
    }
}

#[async_trait]
impl FcEvaluator for TableFcEvaluator {
    async fn evaluate(
        &self,
        key: &str,
        entered_text: Option<&str>,
        _ctx: &EvaluationContext,
    ) -> Result<FcLeafResult, Error> {
        let handler = self.handlers.get(key).ok_or_else(|| Error::UnknownKeyEvaluator {
            key: key.to_string(),
            format: self.format_version.format.to_string(),
            version: self.format_version.version.to_string(),
        })?;
        handler(entered_text).map_err(Error::evaluator_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CancellationToken;

    fn fv() -> FormatVersion {
        FormatVersion {
            format: EdifactFormat::Utilmd,
            version: "FV2504",
        }
    }

    fn ctx() -> EvaluationContext {
        EvaluationContext::new(CancellationToken::new())
    }

    fn data() -> EvaluatableData {
        EvaluatableData::new(serde_json::json!({}))
    }

    #[test]
    fn dispatches_to_the_matching_handler() {
        let evaluator =
            TableRcEvaluator::new(fv()).with_handler("1", |_data| Ok(Fulfilled::True));
        let result =
            futures::executor::block_on(evaluator.evaluate("1", &data(), &ctx())).unwrap();
        assert_eq!(result, Fulfilled::True);
    }

    #[test]
    fn unregistered_key_is_unknown_key_evaluator() {
        let evaluator = TableRcEvaluator::new(fv());
        let err = futures::executor::block_on(evaluator.evaluate("1", &data(), &ctx())).unwrap_err();
        assert!(matches!(err, Error::UnknownKeyEvaluator { .. }));
    }

    #[test]
    fn handler_failure_becomes_evaluator_failure() {
        let evaluator = TableRcEvaluator::new(fv())
            .with_handler("1", |_data| Err("seed missing field 'x'".to_string()));
        let err = futures::executor::block_on(evaluator.evaluate("1", &data(), &ctx())).unwrap_err();
        match err {
            Error::EvaluatorFailure { inner } => assert_eq!(inner, "seed missing field 'x'"),
            other => panic!("expected EvaluatorFailure, got {other:?}"),
        }
    }

    #[test]
    fn fc_table_dispatches_and_reports_unknown_keys() {
        let evaluator = TableFcEvaluator::new(fv()).with_handler("901", |text| {
            Ok(FcLeafResult {
                fulfilled: text == Some("ok"),
                error_message: Some("bad 901".to_string()),
            })
        });
        let ok =
            futures::executor::block_on(evaluator.evaluate("901", Some("ok"), &ctx())).unwrap();
        assert!(ok.fulfilled);

        let err =
            futures::executor::block_on(evaluator.evaluate("902", Some("ok"), &ctx())).unwrap_err();
        assert!(matches!(err, Error::UnknownKeyEvaluator { .. }));
    }
}
