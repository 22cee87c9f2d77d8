//! Key-form classification: bucketing a bracket-interior key string into
//! its kind based purely on its numeric value and trailing letter.
//!
//! Classification never consults a lookup table — it is a pure function
//! of the key's textual form: trailing letter and numeric range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the numeric band treated as a time
/// condition even without a `Q` suffix. See `DESIGN.md` for why
/// `>= 1000` was chosen: `1..999` is already fully allocated to
/// requirement constraints, hints, and format constraints.
pub const TIME_CONDITION_MIN: u32 = 1000;

const REQUIREMENT_CONSTRAINT_MAX: u32 = 499;
const HINT_MAX: u32 = 899;
const FORMAT_CONSTRAINT_MAX: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    RequirementConstraint,
    Hint,
    FormatConstraint,
    Package,
    TimeCondition,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyKind::RequirementConstraint => "requirement-constraint",
            KeyKind::Hint => "hint",
            KeyKind::FormatConstraint => "format-constraint",
            KeyKind::Package => "package",
            KeyKind::TimeCondition => "time-condition",
        };
        write!(f, "{s}")
    }
}

/// Splits a bracket-interior key like `"123"`, `"123P"`, or `"7Q"` into
/// its numeric part and optional trailing letter.
///
/// Returns `None` if the key has no leading digits — the grammar only
/// ever produces `\d+[A-Z]?`, so this cannot happen from a parsed tree,
/// but staying total rather than panicking means a future grammar
/// extension (or a hand-built `Tree`) fails with a classification
/// rather than a panic.
fn split_numeric_suffix(key: &str) -> Option<(u32, Option<char>)> {
    let digits_len = key.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    let (digits, rest) = key.split_at(digits_len);
    let number: u32 = digits.parse().ok()?;
    let suffix = match rest {
        "" => None,
        _ if rest.chars().count() == 1 => rest.chars().next(),
        _ => return None,
    };
    Some((number, suffix))
}

/// Classifies a condition key by its textual form.
///
/// `key` is the bracket-interior text, e.g. `"123"` or `"123P"` — not
/// including the surrounding `[` `]`.
pub fn classify(key: &str) -> KeyKind {
    match split_numeric_suffix(key) {
        Some((_, Some('P'))) => KeyKind::Package,
        Some((_, Some('Q'))) => KeyKind::TimeCondition,
        Some((number, None)) if number <= REQUIREMENT_CONSTRAINT_MAX => {
            KeyKind::RequirementConstraint
        }
        Some((number, None)) if number <= HINT_MAX => KeyKind::Hint,
        Some((number, None)) if number <= FORMAT_CONSTRAINT_MAX => KeyKind::FormatConstraint,
        Some((_, None)) => KeyKind::TimeCondition,
        // No leading digits: not producible by the grammar; treat
        // conservatively as a time condition (neutral, never dispatched).
        None => KeyKind::TimeCondition,
    }
}

/// The bare numeric value of a key, ignoring any trailing letter.
pub fn numeric_value(key: &str) -> Option<u32> {
    split_numeric_suffix(key).map(|(n, _)| n)
}
