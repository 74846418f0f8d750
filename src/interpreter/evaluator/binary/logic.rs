use crate::{ast::BinaryOperator, interpreter::value::core::Value};

/// Evaluates `&&` or `||` on two already evaluated operands.
///
/// The operands are tested for truthiness and the result is always a boolean.
/// Nothing is short-circuited: by the time this runs both sides have been
/// evaluated, side effects included.
///
/// # Example
/// ```
/// use reckon::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::logic::logic, value::core::Value},
/// };
///
/// let v = logic(BinaryOperator::And, &Value::Number(2.0), &Value::from("x"));
/// assert_eq!(v, Value::Boolean(true));
///
/// let v = logic(BinaryOperator::Or, &Value::Number(0.0), &Value::from(""));
/// assert_eq!(v, Value::Boolean(false));
/// ```
#[must_use]
pub fn logic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    let result = match op {
        BinaryOperator::And => left.is_truthy() && right.is_truthy(),
        _ => left.is_truthy() || right.is_truthy(),
    };
    Value::Boolean(result)
}
