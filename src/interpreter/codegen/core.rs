use std::convert::Infallible;

use crate::{
    ast::{BinaryOperator, Node, UnaryOperator, precedence},
    interpreter::{
        codegen::format::{format_number, quote_string},
        dispatch::{Dispatch, dispatch},
    },
};

/// Turns a tree back into source text.
///
/// The output re-parses to a tree that evaluates identically. Parentheses are
/// inserted only where precedence or associativity requires them, and a
/// program is written one statement per line.
///
/// # Example
/// ```
/// use reckon::{
///     ast::build::{add, multiply, number, power, negate},
///     generate,
/// };
///
/// assert_eq!(generate(&multiply(number(2.0), add(number(1.0), number(2.0)))), "2 * (1 + 2)");
/// assert_eq!(generate(&add(multiply(number(2.0), number(1.0)), number(2.0))), "2 * 1 + 2");
/// assert_eq!(generate(&power(negate(number(2.0)), number(2.0))), "(-2) ^ 2");
/// ```
#[must_use]
pub fn generate(node: &Node) -> String {
    match dispatch(&mut Generator, node) {
        Ok(source) => source,
        Err(never) => match never {},
    }
}

/// Binding strength of the construct `node` is written as.
///
/// Negative numbers are written with a leading `-` and so bind like a prefix
/// operator.
#[must_use]
pub fn node_precedence(node: &Node) -> u8 {
    match node {
        Node::Program { .. } => 0,
        Node::Assignment { .. } => precedence::ASSIGNMENT,
        Node::IfExpression { .. } | Node::ForExpression { .. } => precedence::TERNARY,
        Node::BinaryOp { op, .. } => op.precedence(),
        Node::RangeExpression { .. } => precedence::RANGE,
        Node::UnaryOp { op, .. } => op.precedence(),
        Node::NumberLiteral { value } if value.is_sign_negative() && !value.is_nan() => precedence::UNARY,
        Node::IndexAccess { .. } => precedence::POSTFIX,
        Node::NumberLiteral { .. }
        | Node::StringLiteral { .. }
        | Node::BooleanLiteral { .. }
        | Node::ArrayLiteral { .. }
        | Node::Identifier { .. }
        | Node::FunctionCall { .. } => precedence::ATOM,
    }
}

/// Code generator over the shared dispatcher.
pub struct Generator;

type GenResult = Result<String, Infallible>;

impl Generator {
    /// Generates `node`, parenthesized if it binds looser than `min`.
    fn operand(&mut self, node: &Node, min: u8) -> GenResult {
        let source = self.recurse(node)?;
        Ok(if node_precedence(node) < min { format!("({source})") } else { source })
    }

    fn list(&mut self, nodes: &[Node], separator: &str) -> GenResult {
        let parts = nodes.iter().map(|node| self.recurse(node)).collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(separator))
    }
}

impl Dispatch for Generator {
    type Output = String;
    type Error = Infallible;

    /// Every kind has its own handler below.
    fn fallback(&mut self, node: &Node) -> GenResult {
        unreachable!("no source form for {node:?}")
    }

    fn number(&mut self, _node: &Node, value: f64) -> GenResult {
        Ok(format_number(value))
    }

    fn string(&mut self, _node: &Node, value: &str) -> GenResult {
        Ok(quote_string(value))
    }

    fn boolean(&mut self, _node: &Node, value: bool) -> GenResult {
        Ok(value.to_string())
    }

    fn identifier(&mut self, _node: &Node, name: &str) -> GenResult {
        Ok(name.to_string())
    }

    fn program(&mut self, _node: &Node, statements: &[Node]) -> GenResult {
        self.list(statements, "\n")
    }

    fn array(&mut self, _node: &Node, elements: &[Node]) -> GenResult {
        Ok(format!("[{}]", self.list(elements, ", ")?))
    }

    fn binary(&mut self, _node: &Node, left: &Node, op: BinaryOperator, right: &Node) -> GenResult {
        // At equal precedence the operand on the side associativity does not
        // group towards needs parentheses.
        let parent = op.precedence();
        let (left_min, right_min) = if op.is_right_associative() {
            (parent + 1, parent)
        } else {
            (parent, parent + 1)
        };
        Ok(format!("{} {op} {}", self.operand(left, left_min)?, self.operand(right, right_min)?))
    }

    fn unary(&mut self, _node: &Node, op: UnaryOperator, argument: &Node) -> GenResult {
        Ok(format!("{op}{}", self.operand(argument, op.precedence())?))
    }

    fn call(&mut self, _node: &Node, name: &str, args: &[Node]) -> GenResult {
        Ok(format!("{name}({})", self.list(args, ", ")?))
    }

    fn assignment(&mut self, _node: &Node, name: &str, value: &Node) -> GenResult {
        Ok(format!("{name} = {}", self.operand(value, precedence::ASSIGNMENT)?))
    }

    fn if_expression(&mut self,
                     _node: &Node,
                     condition: &Node,
                     consequent: &Node,
                     alternate: &Node)
                     -> GenResult {
        Ok(format!("if {} then {} else {}",
                   self.recurse(condition)?,
                   self.recurse(consequent)?,
                   self.operand(alternate, precedence::TERNARY)?))
    }

    fn for_expression(&mut self,
                      _node: &Node,
                      variable: &str,
                      iterable: &Node,
                      guard: Option<&Node>,
                      body: &Node)
                      -> GenResult {
        let iterable = self.recurse(iterable)?;
        let guard = match guard {
            Some(guard) => format!(" when {}", self.recurse(guard)?),
            None => String::new(),
        };
        Ok(format!("for {variable} in {iterable}{guard} then {}",
                   self.operand(body, precedence::TERNARY)?))
    }

    /// Any operator expression used as the indexed object is parenthesized.
    fn index(&mut self, _node: &Node, object: &Node, index: &Node) -> GenResult {
        Ok(format!("{}[{}]", self.operand(object, precedence::POSTFIX)?, self.recurse(index)?))
    }

    /// Any operator expression used as a bound is parenthesized.
    fn range(&mut self, _node: &Node, start: &Node, end: &Node, inclusive: bool) -> GenResult {
        let op = if inclusive { "..=" } else { ".." };
        Ok(format!("{}{op}{}",
                   self.operand(start, precedence::POSTFIX)?,
                   self.operand(end, precedence::POSTFIX)?))
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", generate(self))
    }
}
