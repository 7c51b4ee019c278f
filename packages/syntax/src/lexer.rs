//! Lexer for type expressions using logos
//!
//! Only the token set needed to spell a type reference is recognised:
//! identifiers, the `delegate` keyword and the punctuation used by generic,
//! tuple, array, nullable, pointer and function-pointer types.

use crate::error::ParseError;
use logos::Logos;

/// Token types for type expressions
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'src> {
    #[token("delegate")]
    Delegate,

    #[regex(r"@?[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    #[token("::")]
    ColonColon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
}

impl Token<'_> {
    /// Human readable form used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Delegate => "'delegate'".to_string(),
            Token::Ident(name) => format!("identifier '{}'", name),
            Token::ColonColon => "'::'".to_string(),
            Token::Dot => "'.'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Lt => "'<'".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::Question => "'?'".to_string(),
            Token::Star => "'*'".to_string(),
        }
    }
}

/// Span information for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

/// A token with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken<'src> {
    pub token: Token<'src>,
    pub span: TokenSpan,
}

/// Lex a type expression into tokens with spans
pub fn lex(source: &str) -> Result<Vec<SpannedToken<'_>>, ParseError> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| {
            let span = TokenSpan {
                start: span.start,
                end: span.end,
            };
            match result {
                Ok(token) => Ok(SpannedToken { token, span }),
                Err(_) => Err(ParseError::LexError {
                    span,
                    message: format!(
                        "Unexpected character '{}'",
                        &source[span.start..span.end]
                    ),
                }),
            }
        })
        .collect()
}
