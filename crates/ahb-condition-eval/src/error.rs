//! The top-level error enum (spec §7): every failure mode the expander
//! and evaluators can surface, closed and fail-fast — a failure in one
//! pair aborts the whole run, it is never caught and retried internally.

use ahb_condition_core::Fulfilled;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] ahb_condition_parser::SyntaxError),

    #[error("unknown package key [{key}]")]
    UnknownPackage { key: String },

    #[error("package cycle: {}", key_path.join(" -> "))]
    PackageCycle { key_path: Vec<String> },

    #[error("no content evaluator registered for key [{key}] ({format}, {version})")]
    UnknownKeyEvaluator {
        key: String,
        format: String,
        version: String,
    },

    #[error("nonsensical {op} composition: {left_kind} {op} {right_kind}")]
    NonsensicalComposition {
        op: &'static str,
        left_kind: String,
        right_kind: String,
    },

    #[error("requirement indicator found inside a condition expression")]
    InvalidIndicatorPosition,

    #[error("evaluation cancelled")]
    Cancelled,

    #[error("content evaluator failed: {inner}")]
    EvaluatorFailure { inner: String },
}

impl Error {
    pub(crate) fn nonsensical(op: &'static str, left: Fulfilled, right: Fulfilled) -> Self {
        Error::NonsensicalComposition {
            op,
            left_kind: left.to_string(),
            right_kind: right.to_string(),
        }
    }

    /// Translates a parser-level [`ahb_condition_parser::SyntaxError`]
    /// into this crate's closed error enum, picking out the specific
    /// `InvalidIndicatorPosition` case (spec §7) rather than letting
    /// every parse failure flatten into the generic `Syntax` variant.
    pub(crate) fn from_syntax(err: ahb_condition_parser::SyntaxError) -> Self {
        if err.is_indicator_in_operand_position() {
            Error::InvalidIndicatorPosition
        } else {
            Error::Syntax(err)
        }
    }

    /// Wraps a content evaluator's own failure (spec §7: a handler that
    /// errors out rather than returning a `Fulfilled`/`FcLeafResult`).
    pub fn evaluator_failure(inner: impl fmt::Display) -> Self {
        Error::EvaluatorFailure {
            inner: inner.to_string(),
        }
    }
}
