/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;
/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use reckon::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!"), Ok(42.0));
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts a length or position to `f64`.
///
/// Collections never come near `2^53` elements, so the conversion saturates
/// rather than fails.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    if value as u64 > MAX_SAFE_U64_INT {
        return MAX_SAFE_U64_INT as f64;
    }
    value as f64
}

/// Safely converts an `f64` to `i64` if the value is finite, integral and
/// within the exactly representable range.
///
/// Used wherever the language demands an integer: index operands and range
/// bounds.
///
/// ## Errors
/// Returns `Err(error)` for NaN, infinities, fractional values and values
/// beyond `MAX_SAFE_I64_INT` in magnitude.
///
/// ## Example
/// ```
/// use reckon::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(-3.0, ()), Ok(-3));
/// assert!(f64_to_i64_checked(2.5, ()).is_err());
/// assert!(f64_to_i64_checked(f64::NAN, ()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_I64_INT as f64 {
        return Err(error);
    }
    Ok(value as i64)
}

/// Resolves a possibly negative index against a collection length.
///
/// Negative indices count from the end, so `-1` is the last element.
///
/// ## Returns
/// The position in `0..len`, or `None` if `index` falls outside either end.
///
/// ## Example
/// ```
/// use reckon::util::num::resolve_index;
///
/// assert_eq!(resolve_index(0, 3), Some(0));
/// assert_eq!(resolve_index(-1, 3), Some(2));
/// assert_eq!(resolve_index(3, 3), None);
/// assert_eq!(resolve_index(-4, 3), None);
/// ```
#[must_use]
pub fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let position = if index < 0 { len + index } else { index };
    if (0..len).contains(&position) {
        usize::try_from(position).ok()
    } else {
        None
    }
}
