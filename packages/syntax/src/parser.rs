//! Recursive descent parser for type expressions
//!
//! Grammar (postfix operators bind left to right):
//!
//! ```text
//! type      := primary ( '?' | '[' ','* ']' | '*' )*
//! primary   := fn_ptr | tuple | name
//! fn_ptr    := 'delegate' '*' convention? '<' type ( ',' type )* '>'
//! tuple     := '(' element ( ',' element )+ ')'
//! element   := type ident?
//! name      := ( 'global' '::' )? ident ( '.' ident )* ( '<' type ( ',' type )* '>' )?
//! ```

use crate::ast::{is_predefined_type, TupleElement, TypeRef};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{lex, SpannedToken, Token, TokenSpan};

/// Parser over a lexed type expression
pub struct Parser<'src> {
    tokens: Vec<SpannedToken<'src>>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        Ok(Self {
            tokens: lex(source)?,
            pos: 0,
        })
    }

    /// Parse a complete type expression, rejecting trailing tokens
    pub fn parse_complete(&mut self) -> ParseResult<TypeRef> {
        if self.tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let ty = self.parse_type()?;

        if let Some(next) = self.peek() {
            return Err(ParseError::unexpected_token(
                next.span,
                "end of type",
                next.token.describe(),
            ));
        }

        Ok(ty)
    }

    fn parse_type(&mut self) -> ParseResult<TypeRef> {
        let mut ty = self.parse_primary()?;

        loop {
            match self.peek().map(|t| t.token) {
                Some(Token::Question) => {
                    let span = self.current_span();
                    self.advance();
                    if ty.is_nullable() {
                        return Err(ParseError::invalid_syntax(
                            span,
                            "Type is already nullable",
                        ));
                    }
                    ty = TypeRef::Nullable(Box::new(ty));
                }
                Some(Token::LBracket) => {
                    self.advance();
                    let mut rank = 1;
                    while self.match_token(Token::Comma) {
                        rank += 1;
                    }
                    self.expect(Token::RBracket)?;
                    ty = TypeRef::Array {
                        element: Box::new(ty),
                        rank,
                    };
                }
                Some(Token::Star) => {
                    self.advance();
                    ty = TypeRef::Pointer(Box::new(ty));
                }
                _ => break,
            }
        }

        Ok(ty)
    }

    fn parse_primary(&mut self) -> ParseResult<TypeRef> {
        match self.peek().map(|t| t.token) {
            Some(Token::Delegate) => self.parse_function_pointer(),
            Some(Token::LParen) => self.parse_tuple(),
            Some(Token::Ident(_)) => self.parse_name(),
            Some(other) => Err(ParseError::unexpected_token(
                self.current_span(),
                "type",
                other.describe(),
            )),
            None => Err(ParseError::unexpected_eof("type")),
        }
    }

    fn parse_function_pointer(&mut self) -> ParseResult<TypeRef> {
        self.expect(Token::Delegate)?;
        self.expect(Token::Star)?;

        let calling_convention = match self.peek().map(|t| t.token) {
            Some(Token::Ident(convention)) => {
                self.advance();
                let mut convention = convention.to_string();
                // unmanaged[Cdecl, SuppressGCTransition]
                if self.match_token(Token::LBracket) {
                    let mut names = vec![self.expect_ident()?];
                    while self.match_token(Token::Comma) {
                        names.push(self.expect_ident()?);
                    }
                    self.expect(Token::RBracket)?;
                    convention = format!("{}[{}]", convention, names.join(", "));
                }
                Some(convention)
            }
            _ => None,
        };

        self.expect(Token::Lt)?;
        let parameters = self.parse_type_list()?;
        self.expect(Token::Gt)?;

        Ok(TypeRef::FunctionPointer {
            calling_convention,
            parameters,
        })
    }

    fn parse_tuple(&mut self) -> ParseResult<TypeRef> {
        let start = self.current_span();
        self.expect(Token::LParen)?;

        let mut elements = vec![self.parse_tuple_element()?];
        while self.match_token(Token::Comma) {
            elements.push(self.parse_tuple_element()?);
        }
        self.expect(Token::RParen)?;

        if elements.len() < 2 {
            return Err(ParseError::invalid_syntax(
                start,
                "Tuple types need at least two elements",
            ));
        }

        Ok(TypeRef::Tuple(elements))
    }

    fn parse_tuple_element(&mut self) -> ParseResult<TupleElement> {
        let ty = self.parse_type()?;
        let name = match self.peek().map(|t| t.token) {
            Some(Token::Ident(name)) => {
                self.advance();
                Some(name.to_string())
            }
            _ => None,
        };
        Ok(TupleElement { ty, name })
    }

    fn parse_name(&mut self) -> ParseResult<TypeRef> {
        let mut first = self.expect_ident()?;
        let mut qualified = false;

        if first == "global" && self.match_token(Token::ColonColon) {
            first = self.expect_ident()?;
            qualified = true;
        }

        let mut segments = vec![first];
        while self.match_token(Token::Dot) {
            segments.push(self.expect_ident()?);
        }

        let type_args = if self.match_token(Token::Lt) {
            let args = self.parse_type_list()?;
            self.expect(Token::Gt)?;
            if self.check(Token::Dot) {
                return Err(ParseError::invalid_syntax(
                    self.current_span(),
                    "Members of generic types are not supported",
                ));
            }
            args
        } else {
            Vec::new()
        };

        if !qualified
            && segments.len() == 1
            && type_args.is_empty()
            && is_predefined_type(&segments[0])
        {
            return Ok(TypeRef::Predefined(segments.remove(0)));
        }

        Ok(TypeRef::Named {
            name: segments.join("."),
            type_args,
        })
    }

    fn parse_type_list(&mut self) -> ParseResult<Vec<TypeRef>> {
        let mut types = vec![self.parse_type()?];
        while self.match_token(Token::Comma) {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    // Helper methods

    fn peek(&self) -> Option<&SpannedToken<'src>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&SpannedToken<'src>> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn check(&self, token: Token) -> bool {
        self.peek()
            .map(|t| std::mem::discriminant(&t.token) == std::mem::discriminant(&token))
            .unwrap_or(false)
    }

    fn match_token(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.check(token) {
            self.advance();
            return Ok(());
        }
        match self.peek() {
            Some(found) => Err(ParseError::unexpected_token(
                found.span,
                token.describe(),
                found.token.describe(),
            )),
            None => Err(ParseError::unexpected_eof(token.describe())),
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some(SpannedToken {
                token: Token::Ident(name),
                ..
            }) => {
                let name = name.to_string();
                self.advance();
                Ok(name)
            }
            Some(found) => Err(ParseError::unexpected_token(
                found.span,
                "identifier",
                found.token.describe(),
            )),
            None => Err(ParseError::unexpected_eof("identifier")),
        }
    }

    fn current_span(&self) -> TokenSpan {
        self.peek().map(|t| t.span).unwrap_or_else(|| {
            let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
            TokenSpan { start: end, end }
        })
    }
}

/// Parse a textual type expression such as `Dictionary<string, List<int?>>[]`
pub fn parse_type(source: &str) -> ParseResult<TypeRef> {
    Parser::new(source)?.parse_complete()
}
