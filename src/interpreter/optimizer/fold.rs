use log::trace;

use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    interpreter::{
        evaluator::{
            binary::core::apply_binary,
            core::{EvalResult, literal_value},
            unary::apply_unary,
        },
        value::core::Value,
    },
};

/// Turns a number, string or boolean value back into a literal node.
///
/// Returns `None` for values that have no literal syntax.
#[must_use]
pub fn value_to_node(value: Value) -> Option<Node> {
    match value {
        Value::Number(value) => Some(Node::NumberLiteral { value }),
        Value::String(value) => Some(Node::StringLiteral { value }),
        Value::Boolean(value) => Some(Node::BooleanLiteral { value }),
        Value::Array(_) | Value::Timestamp(_) | Value::Range(_) => None,
    }
}

/// Folds `left op right` if both operands are literals.
///
/// # Returns
/// `Ok(Some(literal))` when folded, `Ok(None)` when an operand is not a
/// literal.
///
/// # Errors
/// The error the interpreter would raise for the same operands, such as
/// `DivisionByZero` for `1 / 0`.
///
/// # Example
/// ```
/// use reckon::{
///     ast::{BinaryOperator, build::number},
///     interpreter::optimizer::fold::fold_binary,
/// };
///
/// let folded = fold_binary(BinaryOperator::Mul, &number(6.0), &number(7.0));
/// assert_eq!(folded, Ok(Some(number(42.0))));
/// assert!(fold_binary(BinaryOperator::Mod, &number(1.0), &number(0.0)).is_err());
/// ```
pub fn fold_binary(op: BinaryOperator, left: &Node, right: &Node) -> EvalResult<Option<Node>> {
    let (Some(left), Some(right)) = (literal_value(left), literal_value(right)) else {
        return Ok(None);
    };
    let result = apply_binary(op, &left, &right)?;
    trace!("folded {left:?} {op} {right:?} to {result:?}");
    Ok(value_to_node(result))
}

/// Folds `op argument` if the argument is a literal.
///
/// # Errors
/// The error the interpreter would raise for the same operand.
pub fn fold_unary(op: UnaryOperator, argument: &Node) -> EvalResult<Option<Node>> {
    let Some(argument) = literal_value(argument) else {
        return Ok(None);
    };
    let result = apply_unary(op, &argument)?;
    trace!("folded {op}{argument:?} to {result:?}");
    Ok(value_to_node(result))
}

/// The truthiness of a literal condition, `None` if it is not a literal.
#[must_use]
pub fn static_condition(condition: &Node) -> Option<bool> {
    literal_value(condition).map(|value| value.is_truthy())
}
