//! Token-slice cursor shared by the condition-expression grammar (C2) and
//! the AHB-expression grammar (C3). A plain index into a pre-lexed slice
//! is enough for this grammar's lookahead needs (at most one token of
//! peek beyond the current position) — no backtracking, no green-tree
//! builder.

use crate::error::SyntaxError;
use crate::lexer::{Spanned, Token};
use ahb_condition_core::Span;

pub struct Cursor<'src> {
    tokens: &'src [Spanned<'src>],
    pos: usize,
    end_of_input: Span,
}

impl<'src> Cursor<'src> {
    pub fn new(tokens: &'src [Spanned<'src>], src_len: u32) -> Self {
        Cursor {
            tokens,
            pos: 0,
            end_of_input: Span::at(src_len),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<Token<'src>> {
        self.peek_at(0)
    }

    pub fn peek_at(&self, offset: usize) -> Option<Token<'src>> {
        self.tokens.get(self.pos + offset).map(|s| s.token)
    }

    /// Span of the current token, or a zero-width span at the end of the
    /// source when there is no current token — used to anchor
    /// "unexpected end of input" errors at a sensible position.
    pub fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|s| s.span)
            .unwrap_or(self.end_of_input)
    }

    pub fn advance(&mut self) -> Spanned<'src> {
        let spanned = self.tokens[self.pos];
        self.pos += 1;
        spanned
    }

    pub fn is_word(token: Option<Token<'src>>, word: &str) -> bool {
        matches!(token, Some(Token::Word(w)) if w == word)
    }

    pub fn is_operand_start(token: Option<Token<'src>>) -> bool {
        matches!(token, Some(Token::ParenOpen) | Some(Token::ConditionKey(_)))
    }

    pub fn expect_paren_close(&mut self) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(Token::ParenClose) => {
                self.advance();
                Ok(())
            }
            Some(other) => Err(SyntaxError::unexpected_token(
                self.current_span(),
                other.describe(),
                &["')'"],
            )),
            None => Err(SyntaxError::unexpected_end(self.current_span(), &["')'"])),
        }
    }
}
