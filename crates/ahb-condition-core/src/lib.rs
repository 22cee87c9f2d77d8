//! Data model for AHB condition expressions: the condition-expression
//! tree, its multi-valued truth type, key classification, requirement
//! indicators, and the public evaluation-result types.
//!
//! This crate is storage only — no grammar, no evaluation. See
//! `ahb-condition-parser` for the grammars and `ahb-condition-eval` for
//! the expander/algebra/evaluators.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod fulfilled;
mod indicator;
pub mod key;
pub mod serialize;
mod span;
mod tree;

mod result;

pub use fulfilled::Fulfilled;
pub use indicator::{ModalMark, PrefixOperator, RequirementIndicator};
pub use key::KeyKind;
pub use result::{
    AhbExpressionEvaluationResult, FormatConstraintEvaluationResult,
    RequirementConstraintEvaluationResult,
};
pub use span::Span;
pub use tree::{CompositionKind, Tree};
