use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_checked, resolve_index},
};

/// Evaluates `object[index]`.
///
/// Arrays yield their element, strings the character at that position (as a
/// one-character string), ranges their n-th integer. The index must be an
/// integral number; a negative index counts from the end, so `-1` is the last
/// element.
///
/// # Errors
/// - `TypeMismatch` if the object is not a sequence or the index is not an
///   integral number.
/// - `IndexOutOfBounds` if the index lies outside either end.
///
/// # Example
/// ```
/// use reckon::interpreter::{evaluator::index::index_value, value::core::Value};
///
/// let array = Value::from(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
///
/// assert_eq!(index_value(&array, &Value::Number(-1.0)), Ok(Value::Number(3.0)));
/// assert_eq!(index_value(&Value::from("héllo"), &Value::Number(1.0)), Ok(Value::from("é")));
/// assert!(index_value(&array, &Value::Number(3.0)).is_err());
/// assert!(index_value(&array, &Value::Number(0.5)).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn index_value(object: &Value, index: &Value) -> EvalResult<Value> {
    let Value::Number(raw) = index else {
        return Err(RuntimeError::type_mismatch("index",
                                               format!("index must be a number, found {}",
                                                       index.type_name())));
    };
    let index = f64_to_i64_checked(*raw,
                                   RuntimeError::type_mismatch("index", format!("index {raw} is not an integer")))?;

    let len = object.len().ok_or_else(|| {
                              RuntimeError::type_mismatch("index", format!("cannot index a {}", object.type_name()))
                          })?;
    let out_of_bounds = || RuntimeError::IndexOutOfBounds { index, len };
    let position = resolve_index(index, len).ok_or_else(out_of_bounds)?;

    let element = match object {
        Value::Array(items) => items.get(position).cloned(),
        Value::String(s) => s.chars().nth(position).map(|c| Value::String(c.to_string())),
        Value::Range(range) => range.get(position).map(|n| Value::Number(n as f64)),
        Value::Number(_) | Value::Boolean(_) | Value::Timestamp(_) => None,
    };
    element.ok_or_else(out_of_bounds)
}
