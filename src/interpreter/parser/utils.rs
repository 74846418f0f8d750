use crate::{
    ast::{BinaryOperator, Node, precedence},
    error::{ParseError, Span},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
    },
};

/// A construct that continues an expression after its left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::interpreter::parser) enum Infix {
    /// `=`
    Assign,
    /// `? :`
    Ternary,
    /// `[index]`
    Index,
    /// `..` or `..=`
    Range { inclusive: bool },
    /// Any binary operator.
    Binary(BinaryOperator),
}

impl Infix {
    /// Binding strength of the construct, see [`precedence`].
    pub(in crate::interpreter::parser) const fn precedence(self) -> u8 {
        match self {
            Self::Assign => precedence::ASSIGNMENT,
            Self::Ternary => precedence::TERNARY,
            Self::Index => precedence::POSTFIX,
            Self::Range { .. } => precedence::RANGE,
            Self::Binary(op) => op.precedence(),
        }
    }
}

/// Converts a token to its corresponding binary operator.
///
/// Only tokens that are infix operators are mapped. All other tokens return
/// `None`.
///
/// # Parameters
/// - `kind`: Token kind to inspect.
///
/// # Returns
/// The matching `BinaryOperator`, or `None` if the token is not a binary
/// operator.
pub(in crate::interpreter::parser) const fn token_to_binary_operator(kind: &TokenKind)
                                                                     -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Caret => Some(BinaryOperator::Pow),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::AndAnd => Some(BinaryOperator::And),
        TokenKind::PipePipe => Some(BinaryOperator::Or),
        _ => None,
    }
}

impl Parser<'_> {
    /// Classifies the current token as an infix construct without consuming
    /// it.
    ///
    /// Returns `None` at the end of input, for tokens that cannot continue
    /// an expression, and for any token preceded by a separator while the
    /// parser is not inside brackets.
    pub(in crate::interpreter::parser) fn peek_infix(&self) -> Option<Infix> {
        let token = self.current.as_ref()?;
        if token.separated && self.depth == 0 {
            return None;
        }
        match &token.kind {
            TokenKind::Equals => Some(Infix::Assign),
            TokenKind::Question => Some(Infix::Ternary),
            TokenKind::LBracket => Some(Infix::Index),
            TokenKind::DotDot => Some(Infix::Range { inclusive: false }),
            TokenKind::DotDotEq => Some(Infix::Range { inclusive: true }),
            kind => token_to_binary_operator(kind).map(Infix::Binary),
        }
    }

    /// Returns `true` if the current token is `kind`, ignoring payloads.
    pub(in crate::interpreter::parser) fn check(&self, kind: &TokenKind) -> bool {
        self.current
            .as_ref()
            .is_some_and(|token| std::mem::discriminant(&token.kind) == std::mem::discriminant(kind))
    }

    /// Consumes the current token and reads the next one.
    ///
    /// # Returns
    /// The consumed token, or `None` if the parser was already at the end.
    ///
    /// # Errors
    /// Returns a lexical `ParseError` if the following token is malformed.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> ParseResult<Option<Token>> {
        let next = self.lexer.next_token()?;
        let consumed = std::mem::replace(&mut self.current, next);
        if let Some(token) = &consumed {
            self.previous_end = token.span.end;
        }
        Ok(consumed)
    }

    /// Span of the current token, or an empty span at the end of the source.
    pub(in crate::interpreter::parser) fn current_span(&self) -> Span {
        self.current
            .as_ref()
            .map_or_else(|| Span::at(self.lexer.source_len()), |token| token.span)
    }

    /// Builds the error for a token that does not fit here.
    ///
    /// # Parameters
    /// - `expected`: Description of what would have been accepted.
    pub(in crate::interpreter::parser) fn unexpected(&self, expected: &str) -> ParseError {
        match &self.current {
            Some(token) => ParseError::UnexpectedToken { found:    token.kind.to_string(),
                                                         expected: expected.to_string(),
                                                         span:     token.span, },
            None => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                       span:     Span::at(self.lexer.source_len()), },
        }
    }

    /// Consumes a closing bracket or other punctuation.
    ///
    /// # Errors
    /// `UnexpectedToken` or `UnexpectedEndOfInput` if the current token is
    /// not `kind`.
    pub(in crate::interpreter::parser) fn expect_closing(&mut self,
                                                         kind: &TokenKind,
                                                         expected: &str)
                                                         -> ParseResult<()> {
        if !self.check(kind) {
            return Err(self.unexpected(expected));
        }
        self.advance()?;
        Ok(())
    }

    /// Consumes a keyword required by `if`, `for` or `?:`.
    ///
    /// # Errors
    /// `MissingKeyword` naming the keyword and construct if the current
    /// token is anything else.
    pub(in crate::interpreter::parser) fn expect_keyword(&mut self,
                                                         kind: &TokenKind,
                                                         keyword: &'static str,
                                                         construct: &'static str)
                                                         -> ParseResult<()> {
        if !self.check(kind) {
            return Err(ParseError::MissingKeyword { keyword,
                                                    construct,
                                                    span: self.current_span() });
        }
        self.advance()?;
        Ok(())
    }

    /// Parses a comma-separated list of expressions until a closing token.
    ///
    /// This utility is shared by array literals and function argument lists.
    /// The opening bracket must already be consumed and `depth` raised by the
    /// caller. An immediately encountered closing token produces an empty
    /// list; a trailing comma is not accepted.
    ///
    /// Grammar (simplified): `list := (expression ("," expression)*)? closing`
    ///
    /// # Parameters
    /// - `closing`: The token that terminates the list (`]` or `)`).
    /// - `expected`: Description used when neither `,` nor `closing` follows
    ///   an item.
    ///
    /// # Errors
    /// Returns a `ParseError` if:
    /// - an item fails to parse,
    /// - an unexpected token is encountered,
    /// - the input ends before the closing token.
    pub(in crate::interpreter::parser) fn parse_comma_separated(&mut self,
                                                                closing: &TokenKind,
                                                                expected: &str)
                                                                -> ParseResult<Vec<Node>> {
        let mut items = Vec::new();
        if self.check(closing) {
            self.advance()?;
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression(0)?);
            if self.check(&TokenKind::Comma) {
                self.advance()?;
            } else if self.check(closing) {
                self.advance()?;
                break;
            } else {
                return Err(self.unexpected(expected));
            }
        }
        Ok(items)
    }
}
