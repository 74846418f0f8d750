use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{binary::arithmetic::mismatch, core::EvalResult},
        value::core::Value,
    },
};

/// Evaluates an ordering comparison (`<`, `>`, `<=`, `>=`).
///
/// Numbers compare by IEEE rules, so any comparison involving NaN is false.
/// Strings compare lexicographically by code point and timestamps
/// chronologically. Mixed kinds are a type mismatch.
///
/// # Example
/// ```
/// use reckon::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::comparison::compare, value::core::Value},
/// };
///
/// let r = compare(BinaryOperator::Less, &Value::from("apple"), &Value::from("pear"));
/// assert_eq!(r, Ok(Value::Boolean(true)));
///
/// let r = compare(BinaryOperator::GreaterEqual, &Value::Number(f64::NAN), &Value::Number(1.0));
/// assert_eq!(r, Ok(Value::Boolean(false)));
/// ```
pub fn compare(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        _ => return Err(mismatch(op.symbol(), left, right)),
    };

    let result = ordering.is_some_and(|ordering| match op {
                             BinaryOperator::Less => ordering == Ordering::Less,
                             BinaryOperator::Greater => ordering == Ordering::Greater,
                             BinaryOperator::LessEqual => ordering != Ordering::Greater,
                             BinaryOperator::GreaterEqual => ordering != Ordering::Less,
                             _ => false,
                         });
    Ok(Value::Boolean(result))
}
