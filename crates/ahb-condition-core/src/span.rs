//! Byte-offset spans into a source string.
//!
//! Deliberately not `rowan::TextRange`: the tree this crate models is
//! never edited incrementally, so there is no need for a lossless CST or
//! a green-tree allocator. A plain `u32` pair is enough to report syntax
//! errors with a byte offset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open `[start, end)` byte range into the string that was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn at(offset: u32) -> Self {
        Self::new(offset, offset)
    }

    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_takes_union() {
        let a = Span::new(2, 5);
        let b = Span::new(1, 3);
        assert_eq!(a.cover(b), Span::new(1, 5));
    }

    #[test]
    fn display_format() {
        assert_eq!(Span::new(3, 7).to_string(), "3..7");
    }
}
