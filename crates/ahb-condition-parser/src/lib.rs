//! Lexer and grammars for AHB condition strings: the condition-expression
//! grammar (C2) and the AHB-expression grammar (C3) that sits on top of
//! it.
//!
//! Deliberately not built on `rowan`'s lossless green tree: the trees
//! this crate produces are never incrementally re-edited the way a
//! language-server CST is, so a `Vec<Token>` plus a cursor is enough —
//! see `DESIGN.md` for the reasoning.

mod ahb;
mod condition;
mod cursor;
mod error;
mod lexer;

pub use ahb::{parse_ahb_expression, AhbExpression, AhbExpressionPair};
pub use condition::parse_complete as parse_condition_expression;
pub use error::SyntaxError;
