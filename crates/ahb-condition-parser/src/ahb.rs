//! The AHB-expression grammar: a sequence of
//! `requirement-indicator [condition-expression]` pairs.
//!
//! A pair's condition-expression is optional (`Kann` with nothing after
//! it is the textbook case) — and per the same lookahead rule used in
//! the condition-expression grammar, a bare prefix operator (`U`, `O`,
//! `X`) with nothing after it is just as legal: it is indistinguishable
//! in form from `Kann` with no expression, so this grammar treats it the
//! same way rather than special-casing modal marks.

use crate::condition::parse_condition_expression;
use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::lexer::Token;
use ahb_condition_core::{RequirementIndicator, Tree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AhbExpressionPair {
    pub indicator: RequirementIndicator,
    pub expression: Option<Tree>,
}

/// A full AHB expression: one or more indicator/expression pairs in
/// source order (`Muss [1] Soll [2]` is two pairs; `Muss [2] U (...)
/// U [555]` is one).
pub type AhbExpression = Vec<AhbExpressionPair>;

pub fn parse_ahb_expression(src: &str) -> Result<AhbExpression, SyntaxError> {
    let tokens =
        crate::lexer::lex(src).map_err(|(span, ch)| SyntaxError::unexpected_char(span, ch))?;
    let mut cursor = Cursor::new(&tokens, src.len() as u32);
    let mut pairs = Vec::new();

    loop {
        let indicator = parse_indicator(&mut cursor)?;
        let expression = if Cursor::is_operand_start(cursor.peek()) {
            Some(parse_condition_expression(&mut cursor)?)
        } else {
            None
        };
        pairs.push(AhbExpressionPair {
            indicator,
            expression,
        });
        if cursor.at_end() {
            break;
        }
    }

    Ok(pairs)
}

fn parse_indicator(cursor: &mut Cursor) -> Result<RequirementIndicator, SyntaxError> {
    match cursor.peek() {
        Some(Token::Word(word)) => match RequirementIndicator::parse(word) {
            Some(indicator) => {
                cursor.advance();
                Ok(indicator)
            }
            None => Err(SyntaxError::unexpected_token(
                cursor.current_span(),
                "a word",
                &["'Muss'", "'Soll'", "'Kann'", "'U'", "'O'", "'X'"],
            )),
        },
        Some(other) => Err(SyntaxError::unexpected_token(
            cursor.current_span(),
            other.describe(),
            &["a requirement indicator"],
        )),
        None => Err(SyntaxError::unexpected_end(
            cursor.current_span(),
            &["a requirement indicator"],
        )),
    }
}
