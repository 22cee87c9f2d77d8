//! The four-valued truth type that the requirement-constraint algebra
//! reduces every condition tree to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A requirement-constraint truth value.
///
/// `Neutral` is not "unknown" — it is the identity element hints and
/// unevaluated format constraints carry through the algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Fulfilled {
    True,
    False,
    Unknown,
    Neutral,
}

impl Fulfilled {
    pub fn is_true(self) -> bool {
        matches!(self, Fulfilled::True)
    }

    pub fn is_neutral(self) -> bool {
        matches!(self, Fulfilled::Neutral)
    }

    /// Three-valued values only — `Neutral` has no place on either side
    /// of `or`/`xor`; used by the evaluator to validate operands before
    /// consulting the Kleene tables.
    pub fn is_boolean_valued(self) -> bool {
        matches!(self, Fulfilled::True | Fulfilled::False | Fulfilled::Unknown)
    }
}

impl fmt::Display for Fulfilled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Fulfilled::True => "TRUE",
            Fulfilled::False => "FALSE",
            Fulfilled::Unknown => "UNKNOWN",
            Fulfilled::Neutral => "NEUTRAL",
        };
        write!(f, "{s}")
    }
}
