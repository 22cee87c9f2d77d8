//! Requirement indicators: the leading modal mark or prefix operator of
//! an AHB expression.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalMark {
    Muss,
    Soll,
    Kann,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOperator {
    X,
    O,
    U,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementIndicator {
    Modal(ModalMark),
    Prefix(PrefixOperator),
}

impl ModalMark {
    pub fn as_str(self) -> &'static str {
        match self {
            ModalMark::Muss => "Muss",
            ModalMark::Soll => "Soll",
            ModalMark::Kann => "Kann",
        }
    }

    /// Parses the exact-case keyword. There is no case-insensitive
    /// fallback because the source strings are machine-generated from the
    /// Application Handbooks.
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "Muss" => Some(ModalMark::Muss),
            "Soll" => Some(ModalMark::Soll),
            "Kann" => Some(ModalMark::Kann),
            _ => None,
        }
    }
}

impl PrefixOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            PrefixOperator::X => "X",
            PrefixOperator::O => "O",
            PrefixOperator::U => "U",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "X" => Some(PrefixOperator::X),
            "O" => Some(PrefixOperator::O),
            "U" => Some(PrefixOperator::U),
            _ => None,
        }
    }
}

impl RequirementIndicator {
    pub fn parse(word: &str) -> Option<Self> {
        ModalMark::parse(word)
            .map(RequirementIndicator::Modal)
            .or_else(|| PrefixOperator::parse(word).map(RequirementIndicator::Prefix))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequirementIndicator::Modal(m) => m.as_str(),
            RequirementIndicator::Prefix(p) => p.as_str(),
        }
    }
}

impl fmt::Display for RequirementIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modal_marks() {
        assert_eq!(
            RequirementIndicator::parse("Muss"),
            Some(RequirementIndicator::Modal(ModalMark::Muss))
        );
        assert_eq!(
            RequirementIndicator::parse("Kann"),
            Some(RequirementIndicator::Modal(ModalMark::Kann))
        );
    }

    #[test]
    fn parses_prefix_operators() {
        assert_eq!(
            RequirementIndicator::parse("U"),
            Some(RequirementIndicator::Prefix(PrefixOperator::U))
        );
    }

    #[test]
    fn rejects_unknown_words() {
        assert_eq!(RequirementIndicator::parse("Darf"), None);
        assert_eq!(RequirementIndicator::parse("u"), None);
    }
}
