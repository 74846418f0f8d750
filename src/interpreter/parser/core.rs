use log::debug;

use crate::{
    ast::{Node, precedence},
    error::{ParseError, Span},
    interpreter::{
        lexer::{Lexer, Token, TokenKind},
        parser::utils::Infix,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete source text into a tree.
///
/// A source with exactly one statement yields that statement's node; two or
/// more statements are wrapped in [`Node::Program`].
///
/// # Errors
/// Returns a `ParseError` for lexical errors, syntax errors, or a source
/// without any statement.
///
/// # Example
/// ```
/// use reckon::{ast::Node, interpreter::parser::parse};
///
/// assert!(matches!(parse("1 + 2").unwrap(), Node::BinaryOp { .. }));
/// assert!(matches!(parse("a = 1; a").unwrap(), Node::Program { .. }));
/// assert!(parse("// nothing here").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Node> {
    let mut parser = Parser::new(source)?;
    let node = parser.parse_program()?;
    if let Node::Program { statements } = &node {
        debug!("parsed program with {} statements", statements.len());
    } else {
        debug!("parsed single expression");
    }
    Ok(node)
}

/// Recursive-descent parser with one token of lookahead.
///
/// The parser pulls tokens from the lazy [`Lexer`] as it goes. It tracks how
/// deeply it is nested inside brackets: at depth zero a line break or `;`
/// in front of an infix operator ends the statement, inside brackets
/// separators are ignored.
pub struct Parser<'src> {
    pub(in crate::interpreter::parser) lexer:        Lexer<'src>,
    pub(in crate::interpreter::parser) current:      Option<Token>,
    pub(in crate::interpreter::parser) previous_end: usize,
    pub(in crate::interpreter::parser) depth:        usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser and reads the first token.
    ///
    /// # Errors
    /// Returns a lexical `ParseError` if the first token is malformed.
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer,
                  current,
                  previous_end: 0,
                  depth: 0 })
    }

    /// Parses zero or more statements up to the end of input.
    ///
    /// Grammar: `program := expression (SEPARATOR expression)*`
    ///
    /// # Errors
    /// - `EmptyProgram` if the source holds no statement.
    /// - `UnexpectedToken` if two statements are not separated.
    /// - Any error from expression parsing.
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        let mut statements = Vec::new();

        while let Some(token) = &self.current {
            if !statements.is_empty() && !token.separated {
                return Err(self.unexpected("end of statement"));
            }
            statements.push(self.parse_expression(0)?);
        }

        match statements.len() {
            0 => Err(ParseError::EmptyProgram { span: Span::new(0, self.lexer.source_len()) }),
            1 => Ok(statements.remove(0)),
            _ => Ok(Node::Program { statements }),
        }
    }

    /// Parses an expression whose infix operators all bind at least as
    /// tightly as `min_precedence`.
    ///
    /// This is the precedence-climbing loop. It parses one prefix term, then
    /// repeatedly folds the following infix or postfix construct into the
    /// left operand while that construct's precedence is high enough. The
    /// right operand of a left-associative operator is parsed one level
    /// higher, that of `^`, `=` and `?:` at the same level.
    ///
    /// # Parameters
    /// - `min_precedence`: Lowest binding strength accepted, `0` for all.
    ///
    /// # Returns
    /// The parsed expression tree.
    pub fn parse_expression(&mut self, min_precedence: u8) -> ParseResult<Node> {
        let start = self.current_span();
        let mut left = self.parse_prefix()?;

        while let Some(infix) = self.peek_infix()
              && infix.precedence() >= min_precedence
        {
            left = match infix {
                Infix::Assign => {
                    let Node::Identifier { name } = left else {
                        return Err(ParseError::InvalidAssignmentTarget { span: Span::new(start.start,
                                                                                         self.previous_end) });
                    };
                    self.advance()?;
                    let value = self.parse_expression(precedence::ASSIGNMENT)?;
                    Node::Assignment { name,
                                       value: Box::new(value) }
                },
                Infix::Ternary => self.parse_ternary(left)?,
                Infix::Index => {
                    self.advance()?;
                    self.depth += 1;
                    let index = self.parse_expression(0)?;
                    self.expect_closing(&TokenKind::RBracket, "']' after index")?;
                    self.depth -= 1;
                    Node::IndexAccess { object: Box::new(left),
                                        index:  Box::new(index), }
                },
                Infix::Range { inclusive } => {
                    self.advance()?;
                    let end = self.parse_expression(precedence::RANGE + 1)?;
                    Node::RangeExpression { start: Box::new(left),
                                            end: Box::new(end),
                                            inclusive }
                },
                Infix::Binary(op) => {
                    self.advance()?;
                    let next_min = if op.is_right_associative() {
                        op.precedence()
                    } else {
                        op.precedence() + 1
                    };
                    let right = self.parse_expression(next_min)?;
                    Node::BinaryOp { left: Box::new(left),
                                     op,
                                     right: Box::new(right) }
                },
            };
        }

        Ok(left)
    }

    /// Parses `condition ? consequent : alternate` once `condition` is known.
    ///
    /// The result is an ordinary [`Node::IfExpression`].
    ///
    /// # Errors
    /// `MissingKeyword` if the `:` is absent.
    fn parse_ternary(&mut self, condition: Node) -> ParseResult<Node> {
        self.advance()?;
        self.depth += 1;
        let consequent = self.parse_expression(0)?;
        self.depth -= 1;
        self.expect_keyword(&TokenKind::Colon, ":", "ternary")?;
        let alternate = self.parse_expression(precedence::TERNARY)?;
        Ok(Node::IfExpression { condition:  Box::new(condition),
                                consequent: Box::new(consequent),
                                alternate:  Box::new(alternate), })
    }
}
