use crate::ast::{BinaryOperator, Node, UnaryOperator};

/// `value` as a number literal.
#[must_use]
pub const fn number(value: f64) -> Node {
    Node::NumberLiteral { value }
}

/// `value` as a string literal.
#[must_use]
pub fn string(value: impl Into<String>) -> Node {
    Node::StringLiteral { value: value.into() }
}

/// `true` or `false`.
#[must_use]
pub const fn boolean(value: bool) -> Node {
    Node::BooleanLiteral { value }
}

/// A variable reference.
#[must_use]
pub fn identifier(name: impl Into<String>) -> Node {
    Node::Identifier { name: name.into() }
}

/// `[elements...]`
#[must_use]
pub const fn array(elements: Vec<Node>) -> Node {
    Node::ArrayLiteral { elements }
}

/// `left op right`
#[must_use]
pub fn binary(left: Node, op: BinaryOperator, right: Node) -> Node {
    Node::BinaryOp { left: Box::new(left),
                     op,
                     right: Box::new(right) }
}

/// `left + right`
#[must_use]
pub fn add(left: Node, right: Node) -> Node {
    binary(left, BinaryOperator::Add, right)
}

/// `left - right`
#[must_use]
pub fn subtract(left: Node, right: Node) -> Node {
    binary(left, BinaryOperator::Sub, right)
}

/// `left * right`
///
/// ```
/// use reckon::{
///     ast::build::{add, multiply, number},
///     generate,
/// };
///
/// let node = multiply(add(number(1.0), number(2.0)), number(3.0));
/// assert_eq!(generate(&node), "(1 + 2) * 3");
/// ```
#[must_use]
pub fn multiply(left: Node, right: Node) -> Node {
    binary(left, BinaryOperator::Mul, right)
}

/// `left / right`
#[must_use]
pub fn divide(left: Node, right: Node) -> Node {
    binary(left, BinaryOperator::Div, right)
}

/// `left % right`
#[must_use]
pub fn modulo(left: Node, right: Node) -> Node {
    binary(left, BinaryOperator::Mod, right)
}

/// `base ^ exponent`
#[must_use]
pub fn power(base: Node, exponent: Node) -> Node {
    binary(base, BinaryOperator::Pow, exponent)
}

/// `-argument`
#[must_use]
pub fn negate(argument: Node) -> Node {
    Node::UnaryOp { op:       UnaryOperator::Negate,
                    argument: Box::new(argument), }
}

/// `!argument`
#[must_use]
pub fn not(argument: Node) -> Node {
    Node::UnaryOp { op:       UnaryOperator::Not,
                    argument: Box::new(argument), }
}

/// `name(args...)`
#[must_use]
pub fn call(name: impl Into<String>, args: Vec<Node>) -> Node {
    Node::FunctionCall { name: name.into(),
                         args }
}

/// `name = value`
#[must_use]
pub fn assign(name: impl Into<String>, value: Node) -> Node {
    Node::Assignment { name:  name.into(),
                       value: Box::new(value), }
}

/// `if condition then consequent else alternate`
#[must_use]
pub fn if_else(condition: Node, consequent: Node, alternate: Node) -> Node {
    Node::IfExpression { condition:  Box::new(condition),
                         consequent: Box::new(consequent),
                         alternate:  Box::new(alternate), }
}

/// `for variable in iterable [when guard] then body`
#[must_use]
pub fn for_each(variable: impl Into<String>,
                iterable: Node,
                guard: Option<Node>,
                body: Node)
                -> Node {
    Node::ForExpression { variable: variable.into(),
                          iterable: Box::new(iterable),
                          guard:    guard.map(Box::new),
                          body:     Box::new(body), }
}

/// `object[index]`
#[must_use]
pub fn index(object: Node, index: Node) -> Node {
    Node::IndexAccess { object: Box::new(object),
                        index:  Box::new(index), }
}

/// `start..end` or `start..=end`
#[must_use]
pub fn range(start: Node, end: Node, inclusive: bool) -> Node {
    Node::RangeExpression { start: Box::new(start),
                            end: Box::new(end),
                            inclusive }
}

/// A statement sequence. Zero or one statement is still wrapped; use the
/// parser if the single-statement unwrapping matters.
#[must_use]
pub const fn program(statements: Vec<Node>) -> Node {
    Node::Program { statements }
}
