//! Lexer shared by both grammars: tokenise the overall string first, then
//! let each grammar decide how to read its own slice of the token stream.
//!
//! One token stream serves the AHB-expression grammar and the
//! condition-expression grammar underneath it: `Word` carries
//! `Muss`/`Soll`/`Kann` and `U`/`O`/`X` indiscriminately, since which one
//! applies — indicator or conjunction operator — depends on grammar
//! position, not lexeme. Disambiguating by position, not by token kind,
//! is what keeps the two grammars from fighting over what `U` means.

use ahb_condition_core::Span;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'src> {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    /// A whole bracketed key, brackets included, e.g. `[123]`, `[123P]`.
    #[regex(r"\[[0-9]+[A-Za-z]?\]")]
    ConditionKey(&'src str),

    /// Any bare word: `Muss`, `Soll`, `Kann`, `U`, `O`, `X`. The parser,
    /// not the lexer, decides what role a given word plays.
    #[regex(r"[A-Za-z]+")]
    Word(&'src str),
}

impl Token<'_> {
    pub fn describe(&self) -> &'static str {
        match self {
            Token::ParenOpen => "'('",
            Token::ParenClose => "')'",
            Token::ConditionKey(_) => "a bracketed key",
            Token::Word(_) => "a word",
        }
    }
}

/// One lexed token with its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

/// Lexes the whole input eagerly into a `Vec`. AHB expressions are short
/// (a handful of keys at most), so there is no benefit to lazy lexing and
/// a materialized slice makes the recursive-descent lookahead in both
/// grammars trivial (plain indexing, no backtracking buffer).
pub fn lex(src: &str) -> Result<Vec<Spanned<'_>>, (Span, char)> {
    let mut out = Vec::new();
    let mut lexer = Token::lexer(src);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => out.push(Spanned {
                token,
                span: Span::new(span.start as u32, span.end as u32),
            }),
            Err(()) => {
                let bad_char = src[span.start..].chars().next().unwrap_or('\0');
                return Err((Span::new(span.start as u32, span.end as u32), bad_char));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_key_with_brackets_included() {
        let tokens = lex("[123]").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token, Token::ConditionKey("[123]"));
    }

    #[test]
    fn lexes_package_key() {
        let tokens = lex("[123P]").unwrap();
        assert_eq!(tokens[0].token, Token::ConditionKey("[123P]"));
    }

    #[test]
    fn whitespace_is_skipped_everywhere() {
        let a = lex("[1] U [2]").unwrap();
        let b = lex("[1]U[2]").unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.token, y.token);
        }
    }

    #[test]
    fn word_tokens_do_not_distinguish_role() {
        let tokens = lex("Muss U").unwrap();
        assert_eq!(tokens[0].token, Token::Word("Muss"));
        assert_eq!(tokens[1].token, Token::Word("U"));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = lex("[1] & [2]").unwrap_err();
        assert_eq!(err.1, '&');
    }
}
