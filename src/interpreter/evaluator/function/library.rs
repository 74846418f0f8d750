use std::sync::Arc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, ExecutionContext, HostFunction},
        value::core::{Value, length_of},
    },
    util::num::{f64_to_i64_checked, i64_to_f64_checked},
};

/// Signature of a library function: its own name, for error messages, and
/// the evaluated arguments.
type LibraryFn = fn(&str, &[Value]) -> EvalResult<Value>;

/// Milliseconds per day.
const MS_PER_DAY: f64 = 86_400_000.0;
/// Milliseconds per hour.
const MS_PER_HOUR: f64 = 3_600_000.0;
/// Milliseconds per minute.
const MS_PER_MINUTE: f64 = 60_000.0;

/// Specifies the allowed number of arguments for a library function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `Between(min, max)` accepts any count in `min..=max`.
/// - `AtLeast(n)` accepts `n` or more.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == n,
            Self::Between(min, max) => count >= min && count <= max,
            Self::AtLeast(n) => count >= n,
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Exact(1) => "1 argument".to_string(),
            Self::Exact(n) => format!("{n} arguments"),
            Self::Between(min, max) => format!("{min} to {max} arguments"),
            Self::AtLeast(n) => format!("at least {n} arguments"),
        }
    }
}

/// Defines the library by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing it.
///
/// The macro produces:
/// - `LibraryDef` (internal metadata),
/// - `LIBRARY_TABLE` (static table for registration),
/// - `FUNCTION_NAMES` (public list of library names).
macro_rules! library_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct LibraryDef {
            name:  &'static str,
            arity: Arity,
            func:  LibraryFn,
        }
        static LIBRARY_TABLE: &[LibraryDef] = &[
            $(
                LibraryDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all functions in the default library.
        pub const FUNCTION_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

library_functions! {
    "abs"       => { arity: Arity::Exact(1), func: abs },
    "floor"     => { arity: Arity::Exact(1), func: floor },
    "ceil"      => { arity: Arity::Exact(1), func: ceil },
    "trunc"     => { arity: Arity::Exact(1), func: trunc },
    "round"     => { arity: Arity::Between(1, 2), func: round },
    "sign"      => { arity: Arity::Exact(1), func: sign },
    "sqrt"      => { arity: Arity::Exact(1), func: sqrt },
    "exp"       => { arity: Arity::Exact(1), func: exp },
    "ln"        => { arity: Arity::Exact(1), func: ln },
    "log"       => { arity: Arity::Between(1, 2), func: log },
    "sin"       => { arity: Arity::Exact(1), func: sin },
    "cos"       => { arity: Arity::Exact(1), func: cos },
    "tan"       => { arity: Arity::Exact(1), func: tan },
    "min"       => { arity: Arity::AtLeast(1), func: min },
    "max"       => { arity: Arity::AtLeast(1), func: max },
    "clamp"     => { arity: Arity::Exact(3), func: clamp },
    "len"       => { arity: Arity::Exact(1), func: len },
    "timestamp" => { arity: Arity::Exact(1), func: timestamp },
    "millis"    => { arity: Arity::Exact(1), func: millis },
    "days"      => { arity: Arity::Exact(1), func: days },
    "hours"     => { arity: Arity::Exact(1), func: hours },
    "minutes"   => { arity: Arity::Exact(1), func: minutes },
}

/// Adds every library function to `context`.
///
/// Functions the context already defines are kept, so a host can override
/// individual library entries.
///
/// # Example
/// ```
/// use reckon::{
///     evaluate,
///     interpreter::{
///         evaluator::{core::ExecutionContext, function::library::install},
///         value::core::Value,
///     },
///     parse,
/// };
///
/// let ctx = install(ExecutionContext::new());
/// let tree = parse("max(round(2.344, 2), sqrt(4))").unwrap();
/// assert_eq!(evaluate(&tree, &ctx), Ok(Value::Number(2.34)));
/// ```
#[must_use]
pub fn install(mut context: ExecutionContext) -> ExecutionContext {
    for def in LIBRARY_TABLE {
        let (name, arity, func) = (def.name, def.arity, def.func);
        let function: HostFunction = Arc::new(move |args: &[Value]| {
            if !arity.accepts(args.len()) {
                let details = format!("expected {}, found {}", arity.describe(), args.len());
                return Err(RuntimeError::invalid_argument(name, details));
            }
            func(name, args)
        });
        context.functions.entry(name.to_string()).or_insert(function);
    }
    context
}

/// Reads argument `position` as a number.
fn number_arg(name: &str, args: &[Value], position: usize) -> EvalResult<f64> {
    match args.get(position) {
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(RuntimeError::invalid_argument(name,
                                                          format!("expected a number, found {}",
                                                                  other.type_name()))),
        None => Err(RuntimeError::invalid_argument(name, "missing argument")),
    }
}

/// Generates library functions that apply an `f64` method to their single
/// argument.
macro_rules! unary_math {
    ($($fname:ident => $method:ident),* $(,)?) => {
        $(
            fn $fname(name: &str, args: &[Value]) -> EvalResult<Value> {
                Ok(Value::Number(number_arg(name, args, 0)?.$method()))
            }
        )*
    };
}

unary_math! {
    abs => abs,
    floor => floor,
    ceil => ceil,
    trunc => trunc,
    exp => exp,
    sin => sin,
    cos => cos,
    tan => tan,
}

/// Rounds half away from zero, to `digits` decimal places if given.
fn round(name: &str, args: &[Value]) -> EvalResult<Value> {
    let x = number_arg(name, args, 0)?;
    if args.len() == 1 {
        return Ok(Value::Number(x.round()));
    }
    let digits = f64_to_i64_checked(number_arg(name, args, 1)?,
                                    RuntimeError::invalid_argument(name, "digits must be an integer"))?;
    let digits = i32::try_from(digits.clamp(-308, 308)).unwrap_or(0);
    let factor = 10_f64.powi(digits);
    Ok(Value::Number((x * factor).round() / factor))
}

/// `-1`, `0` or `1`; NaN stays NaN.
fn sign(name: &str, args: &[Value]) -> EvalResult<Value> {
    let x = number_arg(name, args, 0)?;
    let result = if x == 0.0 || x.is_nan() { x } else { x.signum() };
    Ok(Value::Number(result))
}

fn sqrt(name: &str, args: &[Value]) -> EvalResult<Value> {
    let x = number_arg(name, args, 0)?;
    if x < 0.0 {
        return Err(RuntimeError::invalid_argument(name, "negative input"));
    }
    Ok(Value::Number(x.sqrt()))
}

fn ln(name: &str, args: &[Value]) -> EvalResult<Value> {
    let x = number_arg(name, args, 0)?;
    if x <= 0.0 {
        return Err(RuntimeError::invalid_argument(name, "input must be positive"));
    }
    Ok(Value::Number(x.ln()))
}

/// Logarithm to `base`, 10 by default.
fn log(name: &str, args: &[Value]) -> EvalResult<Value> {
    let x = number_arg(name, args, 0)?;
    let base = if args.len() == 2 { number_arg(name, args, 1)? } else { 10.0 };
    if x <= 0.0 {
        return Err(RuntimeError::invalid_argument(name, "input must be positive"));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(RuntimeError::invalid_argument(name, "base must be positive and not 1"));
    }
    Ok(Value::Number(x.log(base)))
}

fn min(name: &str, args: &[Value]) -> EvalResult<Value> {
    fold_numbers(name, args, f64::min)
}

fn max(name: &str, args: &[Value]) -> EvalResult<Value> {
    fold_numbers(name, args, f64::max)
}

/// Combines all numeric arguments with `combine`.
fn fold_numbers(name: &str, args: &[Value], combine: fn(f64, f64) -> f64) -> EvalResult<Value> {
    let mut result = number_arg(name, args, 0)?;
    for position in 1..args.len() {
        result = combine(result, number_arg(name, args, position)?);
    }
    Ok(Value::Number(result))
}

/// Restricts `x` to `low..=high`.
fn clamp(name: &str, args: &[Value]) -> EvalResult<Value> {
    let x = number_arg(name, args, 0)?;
    let low = number_arg(name, args, 1)?;
    let high = number_arg(name, args, 2)?;
    if low > high || low.is_nan() || high.is_nan() {
        return Err(RuntimeError::invalid_argument(name, "bounds must satisfy low <= high"));
    }
    Ok(Value::Number(x.clamp(low, high)))
}

/// Number of elements of an array, string or range.
fn len(name: &str, args: &[Value]) -> EvalResult<Value> {
    let value = args.first()
                    .ok_or_else(|| RuntimeError::invalid_argument(name, "missing argument"))?;
    length_of(value).ok_or_else(|| {
                        RuntimeError::invalid_argument(name,
                                                       format!("expected a sequence, found {}",
                                                               value.type_name()))
                    })
}

/// Builds a timestamp from milliseconds since the Unix epoch.
fn timestamp(name: &str, args: &[Value]) -> EvalResult<Value> {
    let ms = number_arg(name, args, 0)?;
    let ms = f64_to_i64_checked(ms.trunc(), RuntimeError::invalid_argument(name, "out of range"))?;
    Ok(Value::Timestamp(ms))
}

/// Milliseconds since the Unix epoch of a timestamp.
fn millis(name: &str, args: &[Value]) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Timestamp(ms)) => {
            let ms = i64_to_f64_checked(*ms, RuntimeError::invalid_argument(name, "out of range"))?;
            Ok(Value::Number(ms))
        },
        Some(other) => Err(RuntimeError::invalid_argument(name,
                                                          format!("expected a timestamp, found {}",
                                                                  other.type_name()))),
        None => Err(RuntimeError::invalid_argument(name, "missing argument")),
    }
}

fn days(name: &str, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(number_arg(name, args, 0)? * MS_PER_DAY))
}

fn hours(name: &str, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(number_arg(name, args, 0)? * MS_PER_HOUR))
}

fn minutes(name: &str, args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(number_arg(name, args, 0)? * MS_PER_MINUTE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> EvalResult<Value> {
        let context = install(ExecutionContext::new());
        let function = context.functions.get(name).expect("library function");
        function(args)
    }

    #[test]
    fn every_listed_name_is_installed() {
        let context = install(ExecutionContext::new());
        for name in FUNCTION_NAMES {
            assert!(context.functions.contains_key(*name), "{name} missing");
        }
    }

    #[test]
    fn arity_is_checked() {
        let err = call("clamp", &[Value::Number(1.0)]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument to 'clamp': expected 3 arguments, found 1.");
    }

    #[test]
    fn installed_functions_do_not_replace_host_functions() {
        let context = ExecutionContext::new().with_function("abs", |_| Ok(Value::from("mine")));
        let context = install(context);
        let abs = context.functions.get("abs").expect("abs");
        assert_eq!(abs(&[Value::Number(-1.0)]), Ok(Value::from("mine")));
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(call("sign", &[Value::Number(0.0)]), Ok(Value::Number(0.0)));
        assert_eq!(call("sign", &[Value::Number(-3.0)]), Ok(Value::Number(-1.0)));
    }

    #[test]
    fn timestamps_round_trip_through_millis() {
        let ts = call("timestamp", &[Value::Number(1_000.9)]).unwrap();
        assert_eq!(ts, Value::Timestamp(1_000));
        assert_eq!(call("millis", &[ts]), Ok(Value::Number(1_000.0)));
    }

    #[test]
    fn domain_errors_name_the_function() {
        assert_eq!(call("sqrt", &[Value::Number(-4.0)]),
                   Err(RuntimeError::invalid_argument("sqrt", "negative input")));
        assert!(call("log", &[Value::Number(8.0), Value::Number(1.0)]).is_err());
        assert!(call("len", &[Value::Number(8.0)]).is_err());
    }

    #[test]
    fn variadic_min_and_max() {
        let args = [Value::Number(3.0), Value::Number(-2.0), Value::Number(7.5)];
        assert_eq!(call("min", &args), Ok(Value::Number(-2.0)));
        assert_eq!(call("max", &args), Ok(Value::Number(7.5)));
    }
}
