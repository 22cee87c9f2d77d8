//! The condition-expression grammar.
//!
//! Precedence, loosest to tightest: `X` (xor), `O` (or), `U` (and),
//! adjacency (`then_also`), all left-associative; `(...)` groups. This is
//! a plain precedence-climbing recursive descent over the shared
//! [`Cursor`], generalized to keep every composition strictly binary
//! (no n-ary flattening).
//!
//! An infix operator word (`U`/`O`/`X`) is only consumed when the token
//! that follows it can start an operand (`(` or a bracketed key). This
//! is what lets the AHB-expression grammar reuse the same word as the
//! next pair's requirement indicator: if `U` isn't followed by an
//! operand, this grammar simply stops here and leaves it for the caller.

use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::lexer::Token;
use ahb_condition_core::{RequirementIndicator, Tree};

/// Parses one condition-expression starting at the cursor's current
/// position, consuming as much as this grammar can validly claim and
/// leaving the cursor positioned right after the last token it consumed.
pub fn parse_condition_expression(cursor: &mut Cursor) -> Result<Tree, SyntaxError> {
    parse_xor(cursor)
}

fn parse_xor(cursor: &mut Cursor) -> Result<Tree, SyntaxError> {
    let mut left = parse_or(cursor)?;
    while Cursor::is_word(cursor.peek(), "X") && Cursor::is_operand_start(cursor.peek_at(1)) {
        cursor.advance();
        let right = parse_or(cursor)?;
        left = Tree::xor(left, right);
    }
    Ok(left)
}

fn parse_or(cursor: &mut Cursor) -> Result<Tree, SyntaxError> {
    let mut left = parse_and(cursor)?;
    while Cursor::is_word(cursor.peek(), "O") && Cursor::is_operand_start(cursor.peek_at(1)) {
        cursor.advance();
        let right = parse_and(cursor)?;
        left = Tree::or(left, right);
    }
    Ok(left)
}

fn parse_and(cursor: &mut Cursor) -> Result<Tree, SyntaxError> {
    let mut left = parse_then_also(cursor)?;
    while Cursor::is_word(cursor.peek(), "U") && Cursor::is_operand_start(cursor.peek_at(1)) {
        cursor.advance();
        let right = parse_then_also(cursor)?;
        left = Tree::and(left, right);
    }
    Ok(left)
}

fn parse_then_also(cursor: &mut Cursor) -> Result<Tree, SyntaxError> {
    let mut left = parse_atom(cursor)?;
    while Cursor::is_operand_start(cursor.peek()) {
        let right = parse_atom(cursor)?;
        left = Tree::then_also(left, right);
    }
    Ok(left)
}

fn parse_atom(cursor: &mut Cursor) -> Result<Tree, SyntaxError> {
    match cursor.peek() {
        Some(Token::ConditionKey(raw)) => {
            cursor.advance();
            let key = &raw[1..raw.len() - 1];
            Ok(Tree::leaf(key))
        }
        Some(Token::ParenOpen) => {
            cursor.advance();
            let inner = parse_condition_expression(cursor)?;
            cursor.expect_paren_close()?;
            Ok(inner)
        }
        Some(Token::Word(word)) if RequirementIndicator::parse(word).is_some() => {
            Err(SyntaxError::indicator_in_operand_position(cursor.current_span(), word))
        }
        Some(other) => Err(SyntaxError::unexpected_token(
            cursor.current_span(),
            other.describe(),
            &["a bracketed key", "'('"],
        )),
        None => Err(SyntaxError::unexpected_end(
            cursor.current_span(),
            &["a bracketed key", "'('"],
        )),
    }
}

/// Parses `src` as a complete, standalone condition-expression (used by
/// tests and by any caller that already knows the whole string is one
/// condition expression, with no surrounding requirement indicator).
pub fn parse_complete(src: &str) -> Result<Tree, SyntaxError> {
    let tokens =
        crate::lexer::lex(src).map_err(|(span, ch)| SyntaxError::unexpected_char(span, ch))?;
    let mut cursor = Cursor::new(&tokens, src.len() as u32);
    let tree = parse_condition_expression(&mut cursor)?;
    if !cursor.at_end() {
        let found = cursor.peek().unwrap().describe();
        return Err(SyntaxError::trailing_input(cursor.current_span(), found));
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_key() {
        let t = parse_complete("[1]").unwrap();
        assert_eq!(t, Tree::leaf("1"));
    }

    #[test]
    fn parses_and_composition() {
        let t = parse_complete("[1] U [2]").unwrap();
        assert_eq!(t, Tree::and(Tree::leaf("1"), Tree::leaf("2")));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        // [1] O [2] U [3]  ==  [1] O ([2] U [3])
        let t = parse_complete("[1] O [2] U [3]").unwrap();
        assert_eq!(
            t,
            Tree::or(Tree::leaf("1"), Tree::and(Tree::leaf("2"), Tree::leaf("3")))
        );
    }

    #[test]
    fn or_binds_tighter_than_xor() {
        let t = parse_complete("[1] X [2] O [3]").unwrap();
        assert_eq!(
            t,
            Tree::xor(Tree::leaf("1"), Tree::or(Tree::leaf("2"), Tree::leaf("3")))
        );
    }

    #[test]
    fn then_also_binds_tighter_than_and() {
        // [1][901] U [2]  ==  ([1] then_also [901]) U [2]
        let t = parse_complete("[1][901] U [2]").unwrap();
        assert_eq!(
            t,
            Tree::and(
                Tree::then_also(Tree::leaf("1"), Tree::leaf("901")),
                Tree::leaf("2")
            )
        );
    }

    #[test]
    fn parens_override_precedence() {
        let t = parse_complete("[1] U ([2] O [3])").unwrap();
        assert_eq!(
            t,
            Tree::and(Tree::leaf("1"), Tree::or(Tree::leaf("2"), Tree::leaf("3")))
        );
    }

    #[test]
    fn left_associative_chain() {
        let t = parse_complete("[1] U [2] U [3]").unwrap();
        assert_eq!(
            t,
            Tree::and(Tree::and(Tree::leaf("1"), Tree::leaf("2")), Tree::leaf("3"))
        );
    }

    #[test]
    fn stops_before_dangling_operator_with_no_operand() {
        // Simulates what the AHB-expression grammar sees: "U" with
        // nothing after it belongs to the next pair, not this expression.
        let tokens = crate::lexer::lex("[1] U").unwrap();
        let mut cursor = Cursor::new(&tokens, 5);
        let tree = parse_condition_expression(&mut cursor).unwrap();
        assert_eq!(tree, Tree::leaf("1"));
        assert!(!cursor.at_end());
    }

    #[test]
    fn requirement_indicator_in_operand_position_is_a_specific_error() {
        let err = parse_complete("Muss ([1] Muss [2])").unwrap_err();
        assert!(err.is_indicator_in_operand_position());
    }

    #[test]
    fn bare_conjunction_word_in_operand_position_is_also_an_indicator_error() {
        // A stray "U" with nothing valid before it lands in atom position.
        let err = parse_complete("U").unwrap_err();
        assert!(err.is_indicator_in_operand_position());
    }

    #[test]
    fn unclosed_paren_is_an_error() {
        let err = parse_complete("([1]").unwrap_err();
        assert!(err.message.contains("')'"));
    }

    #[test]
    fn trailing_close_paren_is_an_error() {
        let err = parse_complete("[1])").unwrap_err();
        assert!(err.message.contains("trailing"));
    }
}
