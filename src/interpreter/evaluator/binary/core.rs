use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::{arithmetic, comparison, logic},
            core::EvalResult,
        },
        value::core::Value,
    },
};

/// Applies a binary operator to two already evaluated operands.
///
/// This function routes the operation to specialized handlers depending on
/// the operator. It has no access to variables or functions, so it gives the
/// same answer wherever it runs; the optimizer relies on that when it folds
/// constant subexpressions.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Returns
/// The result of the operation.
///
/// # Errors
/// - `DivisionByZero` / `ModuloByZero` for `/` and `%` with a zero right
///   operand.
/// - `TypeMismatch` for operand kinds the operator is not defined for.
///
/// # Example
/// ```
/// use reckon::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::apply_binary, value::core::Value},
/// };
///
/// let sum = apply_binary(BinaryOperator::Add, &Value::Number(3.0), &Value::Number(4.0));
/// assert_eq!(sum, Ok(Value::Number(7.0)));
///
/// let text = apply_binary(BinaryOperator::Add, &Value::from("n = "), &Value::Number(4.0));
/// assert_eq!(text, Ok(Value::from("n = 4")));
///
/// assert!(apply_binary(BinaryOperator::Div, &Value::Number(1.0), &Value::Number(0.0)).is_err());
/// ```
pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => arithmetic::add(left, right),
        BinaryOperator::Sub => arithmetic::subtract(left, right),
        BinaryOperator::Mul
        | BinaryOperator::Div
        | BinaryOperator::Mod
        | BinaryOperator::Pow => arithmetic::numeric(op, left, right),
        BinaryOperator::Equal => Ok(Value::Boolean(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Boolean(left != right)),
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterEqual => comparison::compare(op, left, right),
        BinaryOperator::And | BinaryOperator::Or => Ok(logic::logic(op, left, right)),
    }
}
