use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses the term an expression starts with.
    ///
    /// Grammar:
    /// ```text
    /// prefix := NUMBER | STRING | BOOL
    ///         | IDENTIFIER ( "(" arguments ")" )?
    ///         | "(" expression ")"
    ///         | "[" elements "]"
    ///         | ("-" | "!") expression<unary>
    ///         | if_expression | for_expression
    /// ```
    ///
    /// # Errors
    /// `UnexpectedToken` or `UnexpectedEndOfInput` if no expression can start
    /// at the current token.
    pub(in crate::interpreter::parser) fn parse_prefix(&mut self) -> ParseResult<Node> {
        let Some(token) = &self.current else {
            return Err(self.unexpected("expression"));
        };

        match token.kind.clone() {
            TokenKind::Number(value) => {
                self.advance()?;
                Ok(Node::NumberLiteral { value })
            },
            TokenKind::Str(value) => {
                self.advance()?;
                Ok(Node::StringLiteral { value })
            },
            TokenKind::Bool(value) => {
                self.advance()?;
                Ok(Node::BooleanLiteral { value })
            },
            TokenKind::Identifier(name) => {
                self.advance()?;
                self.parse_identifier_or_call(name)
            },
            TokenKind::LParen => self.parse_group(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::Minus => self.parse_unary(UnaryOperator::Negate),
            TokenKind::Bang => self.parse_unary(UnaryOperator::Not),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses the rest of an identifier term once its name is consumed.
    ///
    /// An opening parenthesis turns the identifier into a function call,
    /// unless a separator stands between them at statement level, in which
    /// case the parenthesis starts the next statement.
    fn parse_identifier_or_call(&mut self, name: String) -> ParseResult<Node> {
        let is_call = self.current
                          .as_ref()
                          .is_some_and(|t| t.kind == TokenKind::LParen && !(t.separated && self.depth == 0));
        if !is_call {
            return Ok(Node::Identifier { name });
        }

        self.advance()?;
        self.depth += 1;
        let args = self.parse_comma_separated(&TokenKind::RParen, "',' or ')' in argument list")?;
        self.depth -= 1;
        Ok(Node::FunctionCall { name, args })
    }

    /// Parses `( expression )`.
    ///
    /// Grouping leaves no trace in the tree: `(x)` is the identifier `x`.
    fn parse_group(&mut self) -> ParseResult<Node> {
        self.advance()?;
        self.depth += 1;
        let inner = self.parse_expression(0)?;
        self.expect_closing(&TokenKind::RParen, "')'")?;
        self.depth -= 1;
        Ok(inner)
    }

    /// Parses an array literal of the form `[ expr1, expr2, ..., exprN ]`.
    ///
    /// An empty array `[]` is accepted.
    fn parse_array_literal(&mut self) -> ParseResult<Node> {
        self.advance()?;
        self.depth += 1;
        let elements = self.parse_comma_separated(&TokenKind::RBracket, "',' or ']' in array")?;
        self.depth -= 1;
        Ok(Node::ArrayLiteral { elements })
    }

    /// Parses a prefix operator and its operand.
    ///
    /// The operand binds tighter than every binary operator except `^`, so
    /// `-a * b` is `(-a) * b` and `-a ^ b` is `-(a ^ b)`.
    fn parse_unary(&mut self, op: UnaryOperator) -> ParseResult<Node> {
        self.advance()?;
        let argument = self.parse_expression(op.precedence())?;
        Ok(Node::UnaryOp { op,
                           argument: Box::new(argument) })
    }
}
