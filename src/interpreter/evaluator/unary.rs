use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Applies a prefix operator to an already evaluated operand.
///
/// Supported operators:
/// - `Negate`: arithmetic negation, numbers only.
/// - `Not`: logical not of the operand's truthiness, any value.
///
/// # Errors
/// `TypeMismatch` when negating anything but a number.
///
/// # Example
/// ```
/// use reckon::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::apply_unary, value::core::Value},
/// };
///
/// assert_eq!(apply_unary(UnaryOperator::Negate, &Value::Number(5.0)), Ok(Value::Number(-5.0)));
/// assert_eq!(apply_unary(UnaryOperator::Not, &Value::from("")), Ok(Value::Boolean(true)));
/// assert!(apply_unary(UnaryOperator::Negate, &Value::Boolean(true)).is_err());
/// ```
pub fn apply_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
    match op {
        UnaryOperator::Negate => match value {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(RuntimeError::type_mismatch("-", format!("cannot negate a {}", other.type_name()))),
        },
        UnaryOperator::Not => Ok(Value::Boolean(!value.is_truthy())),
    }
}
