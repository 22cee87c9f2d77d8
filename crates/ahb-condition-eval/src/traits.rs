//! Content-evaluator traits (spec §6 "External interfaces", C10). These
//! are the narrow interfaces the core orchestrates but never implements
//! itself — "the content evaluators... the hints provider... the
//! package resolver... are plugged in through narrow interfaces."
//!
//! Every method may suspend (spec §5 "Suspension points"), so each trait
//! is `#[async_trait]`, the same shape the pack uses for its own
//! pluggable I/O boundary.

use crate::context::{EvaluatableData, EvaluationContext};
use crate::error::Error;
use ahb_condition_core::Fulfilled;
use async_trait::async_trait;

/// Answers "is requirement-constraint key `key` fulfilled?" against the
/// supplied seed data. Dispatch by key may be by name or lookup table
/// internally (spec §9) — the trait itself just takes the key as data.
#[async_trait]
pub trait RcEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        key: &str,
        data: &EvaluatableData,
        ctx: &EvaluationContext,
    ) -> Result<Fulfilled, Error>;
}

/// The outcome of evaluating one format-constraint leaf (spec §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcLeafResult {
    pub fulfilled: bool,
    pub error_message: Option<String>,
}

/// Answers "does the entered text satisfy format-constraint key `key`?"
#[async_trait]
pub trait FcEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        key: &str,
        entered_text: Option<&str>,
        ctx: &EvaluationContext,
    ) -> Result<FcLeafResult, Error>;
}

/// Maps a hint key to its display text.
#[async_trait]
pub trait HintsProvider: Send + Sync {
    async fn hint_text(&self, key: &str, ctx: &EvaluationContext) -> Result<Option<String>, Error>;
}

/// Maps a package key to the condition-expression string it expands to.
#[async_trait]
pub trait PackageResolver: Send + Sync {
    async fn resolve(&self, key: &str, ctx: &EvaluationContext) -> Result<Option<String>, Error>;
}
