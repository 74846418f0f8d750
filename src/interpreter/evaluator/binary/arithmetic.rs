use std::sync::Arc;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::f64_to_i64_checked,
};

/// Evaluates `+`.
///
/// - Two numbers are added.
/// - If either side is a string, both sides are formatted and concatenated.
/// - Two arrays are concatenated.
/// - A timestamp plus a number of milliseconds (either order) is a timestamp.
pub fn add(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!("{left}{right}"))),
        (Value::Array(a), Value::Array(b)) => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend(a.iter().cloned());
            items.extend(b.iter().cloned());
            Ok(Value::Array(Arc::new(items)))
        },
        (Value::Timestamp(ts), Value::Number(ms)) | (Value::Number(ms), Value::Timestamp(ts)) => {
            offset_timestamp("+", *ts, *ms)
        },
        _ => Err(mismatch("+", left, right)),
    }
}

/// Evaluates `-`.
///
/// Numbers are subtracted, a number of milliseconds moves a timestamp back,
/// and the difference of two timestamps is a number of milliseconds.
pub fn subtract(left: &Value, right: &Value) -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        (Value::Timestamp(ts), Value::Number(ms)) => offset_timestamp("-", *ts, -*ms),
        (Value::Timestamp(a), Value::Timestamp(b)) => {
            #[allow(clippy::cast_precision_loss)]
            let difference = a.saturating_sub(*b) as f64;
            Ok(Value::Number(difference))
        },
        _ => Err(mismatch("-", left, right)),
    }
}

/// Evaluates `*`, `/`, `%` and `^`, which are defined on numbers only.
///
/// Division and remainder by exactly zero fail instead of producing an
/// infinity or NaN. `%` keeps the sign of the dividend.
pub fn numeric(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(mismatch(op.symbol(), left, right));
    };
    let (a, b) = (*a, *b);

    let result = match op {
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div if b == 0.0 => return Err(RuntimeError::DivisionByZero),
        BinaryOperator::Div => a / b,
        BinaryOperator::Mod if b == 0.0 => return Err(RuntimeError::ModuloByZero),
        BinaryOperator::Mod => a % b,
        BinaryOperator::Pow => a.powf(b),
        _ => return Err(mismatch(op.symbol(), left, right)),
    };
    Ok(Value::Number(result))
}

/// Moves a timestamp by a number of milliseconds, dropping any fraction.
fn offset_timestamp(operator: &str, timestamp: i64, ms: f64) -> EvalResult<Value> {
    let offset = f64_to_i64_checked(ms.trunc(),
                                    RuntimeError::type_mismatch(operator,
                                                                format!("cannot offset a timestamp by {ms}")))?;
    timestamp.checked_add(offset)
             .map(Value::Timestamp)
             .ok_or_else(|| RuntimeError::type_mismatch(operator, "timestamp out of range"))
}

/// Builds the error for operands an operator does not accept.
pub(crate) fn mismatch(operator: &str, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::type_mismatch(operator,
                                format!("cannot apply to {} and {}", left.type_name(), right.type_name()))
}
