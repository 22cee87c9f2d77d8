//! Syntax errors produced by both grammars.

use ahb_condition_core::Span;
use std::fmt;

/// Why a [`SyntaxError`] occurred, beyond its human-readable `message`.
/// `ahb-condition-eval` inspects this to translate specific syntax
/// failures into its own closed error enum (spec §7) — the message
/// string stays for display, this is for callers that need to match on
/// the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Reason {
    #[default]
    Generic,
    IndicatorInOperandPosition,
}

/// A single parse failure, with the span it occurred at and what the
/// parser was expecting. Deliberately just a span plus a human-readable
/// expectation — no `Fix`/severity machinery, since a condition-key
/// grammar has no need for diagnostics-grade tooling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
    reason: Reason,
}

impl SyntaxError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        SyntaxError {
            span,
            message: message.into(),
            reason: Reason::Generic,
        }
    }

    pub(crate) fn unexpected_char(span: Span, found: char) -> Self {
        SyntaxError::new(span, format!("unexpected character {found:?}"))
    }

    pub(crate) fn unexpected_end(span: Span, expected: &[&str]) -> Self {
        SyntaxError::new(span, format!("unexpected end of input, expected {}", Expected(expected)))
    }

    pub(crate) fn unexpected_token(span: Span, found: &str, expected: &[&str]) -> Self {
        SyntaxError::new(
            span,
            format!("unexpected {found}, expected {}", Expected(expected)),
        )
    }

    pub(crate) fn trailing_input(span: Span, found: &str) -> Self {
        SyntaxError::new(span, format!("unexpected trailing {found} after a complete expression"))
    }

    /// A requirement indicator word (`Muss`/`Soll`/`Kann`/`U`/`O`/`X`)
    /// turned up where the condition-expression grammar expected an
    /// operand (spec §7's `InvalidIndicatorPosition`).
    pub(crate) fn indicator_in_operand_position(span: Span, word: &str) -> Self {
        SyntaxError {
            span,
            message: format!("requirement indicator {word:?} found inside a condition expression"),
            reason: Reason::IndicatorInOperandPosition,
        }
    }

    /// Whether this failure was specifically a requirement indicator
    /// found in operand position, rather than some other malformed
    /// input.
    pub fn is_indicator_in_operand_position(&self) -> bool {
        self.reason == Reason::IndicatorInOperandPosition
    }
}

struct Expected<'a>(&'a [&'a str]);

impl fmt::Display for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => write!(f, "nothing"),
            [one] => write!(f, "{one}"),
            [init @ .., last] => {
                for item in init {
                    write!(f, "{item}, ")?;
                }
                write!(f, "or {last}")
            }
        }
    }
}
