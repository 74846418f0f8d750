use crate::{
    ast::{Node, precedence},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses an if-expression.
    ///
    /// Grammar: `if_expression := "if" expression "then" expression "else"
    /// expression<ternary>`
    ///
    /// The condition and consequent run up to their keyword. The alternate
    /// extends as far right as the ternary level allows, so
    /// `if c then 1 else 2 + 3` takes `2 + 3` as its alternate.
    ///
    /// # Errors
    /// `MissingKeyword` naming `then` or `else` if either is absent.
    pub(in crate::interpreter::parser) fn parse_if(&mut self) -> ParseResult<Node> {
        self.advance()?;

        self.depth += 1;
        let condition = self.parse_expression(0)?;
        self.expect_keyword(&TokenKind::Then, "then", "if")?;
        let consequent = self.parse_expression(0)?;
        self.expect_keyword(&TokenKind::Else, "else", "if")?;
        self.depth -= 1;

        let alternate = self.parse_expression(precedence::TERNARY)?;
        Ok(Node::IfExpression { condition:  Box::new(condition),
                                consequent: Box::new(consequent),
                                alternate:  Box::new(alternate), })
    }

    /// Parses a for-comprehension.
    ///
    /// Grammar: `for_expression := "for" IDENTIFIER "in" expression
    /// ("when" expression)? "then" expression<ternary>`
    ///
    /// # Errors
    /// - `UnexpectedToken` if the loop variable is not an identifier.
    /// - `MissingKeyword` naming `in` or `then` if either is absent.
    pub(in crate::interpreter::parser) fn parse_for(&mut self) -> ParseResult<Node> {
        self.advance()?;

        let variable = match self.current.as_ref().map(|t| &t.kind) {
            Some(TokenKind::Identifier(name)) => name.clone(),
            _ => return Err(self.unexpected("loop variable")),
        };
        self.advance()?;

        self.depth += 1;
        self.expect_keyword(&TokenKind::In, "in", "for")?;
        let iterable = self.parse_expression(0)?;
        let guard = if self.check(&TokenKind::When) {
            self.advance()?;
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };
        self.expect_keyword(&TokenKind::Then, "then", "for")?;
        self.depth -= 1;

        let body = self.parse_expression(precedence::TERNARY)?;
        Ok(Node::ForExpression { variable,
                                 iterable: Box::new(iterable),
                                 guard,
                                 body: Box::new(body) })
    }
}
