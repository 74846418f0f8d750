use std::sync::Arc;

use crate::{interpreter::value::range::RangeValue, util::num::usize_to_f64};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the values an expression can produce, a host
/// variable can hold, and a host function can receive or return.
#[derive(Debug, Clone)]
pub enum Value {
    /// A double-precision number; the language's only numeric type.
    Number(f64),
    /// A UTF-8 string.
    String(String),
    /// `true` or `false`, produced by comparisons and logical operators.
    Boolean(bool),
    /// An ordered, possibly heterogeneous sequence.
    Array(Arc<Vec<Self>>),
    /// A point in time as milliseconds since the Unix epoch.
    ///
    /// Timestamps are never written in source; they come from host variables
    /// and functions.
    Timestamp(i64),
    /// A lazy integer sequence produced by `..` or `..=`.
    Range(RangeValue),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Arc::new(v))
    }
}

impl From<RangeValue> for Value {
    fn from(v: RangeValue) -> Self {
        Self::Range(v)
    }
}

impl Value {
    /// Name of the value's kind, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Array(_) => "array",
            Self::Timestamp(_) => "timestamp",
            Self::Range(_) => "range",
        }
    }

    /// Decides whether the value counts as true in a condition.
    ///
    /// Booleans are themselves; numbers are truthy unless zero or NaN;
    /// strings, arrays and ranges are truthy unless empty; timestamps are
    /// always truthy.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(-1.0).is_truthy());
    /// assert!(!Value::Number(f64::NAN).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from(vec![Value::Boolean(false)]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(items) => !items.is_empty(),
            Self::Timestamp(_) => true,
            Self::Range(range) => !range.is_empty(),
        }
    }

    /// Number of elements of a sequence value.
    ///
    /// Strings count characters, not bytes. Returns `None` for scalars.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::Array(items) => Some(items.len()),
            Self::Range(range) => Some(range.len()),
            Self::Number(_) | Self::Boolean(_) | Self::Timestamp(_) => None,
        }
    }

    /// Walks the elements of a sequence value.
    ///
    /// Arrays yield their items, strings one single-character string per
    /// character, ranges their integers as numbers. Returns `None` for
    /// scalars.
    #[must_use]
    pub fn elements(&self) -> Option<Elements<'_>> {
        match self {
            Self::Array(items) => Some(Elements::Array(items.iter())),
            Self::String(s) => Some(Elements::Chars(s.chars())),
            Self::Range(range) => Some(Elements::Range(range.iter())),
            Self::Number(_) | Self::Boolean(_) | Self::Timestamp(_) => None,
        }
    }

    /// Writes a value nested inside an array; strings are quoted there so
    /// that `["1"]` and `[1]` print differently.
    fn fmt_nested(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Iterator over the elements of an array, string or range.
///
/// Created by [`Value::elements`].
pub enum Elements<'a> {
    /// Items of an array.
    Array(std::slice::Iter<'a, Value>),
    /// Characters of a string.
    Chars(std::str::Chars<'a>),
    /// Integers of a range.
    Range(std::ops::Range<i64>),
}

impl Iterator for Elements<'_> {
    type Item = Value;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Value> {
        match self {
            Self::Array(items) => items.next().cloned(),
            Self::Chars(chars) => chars.next().map(|c| Value::String(c.to_string())),
            Self::Range(range) => range.next().map(|n| Value::Number(n as f64)),
        }
    }
}

/// Deep, kind-strict equality.
///
/// Values of different kinds are never equal, arrays compare element-wise,
/// ranges compare by the sequence they produce, and numbers follow IEEE
/// rules (`NaN` equals nothing).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Range(a), Self::Range(b)) => {
                (a.is_empty() && b.is_empty()) || (a.start() == b.start() && a.len() == b.len())
            },
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    value.fmt_nested(f)?;
                }

                write!(f, "]")
            },
            Self::Timestamp(ms) => write!(f, "@{ms}"),
            Self::Range(range) => write!(f, "{range}"),
        }
    }
}

/// Length of a sequence as a number value, for host functions such as `len`.
#[must_use]
pub fn length_of(value: &Value) -> Option<Value> {
    value.len().map(|len| Value::Number(usize_to_f64(len)))
}
