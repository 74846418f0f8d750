/// Source text that evaluates to `value`.
///
/// Finite numbers use Rust's shortest round-trip formatting, which never
/// produces an exponent the lexer would misread. Infinities are written as an
/// overflowing literal and NaN as the difference of two infinities, the
/// only spellings the language has for them.
///
/// # Example
/// ```
/// use reckon::interpreter::codegen::format::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(-0.25), "-0.25");
/// assert_eq!(format_number(f64::INFINITY), "1e999");
/// assert_eq!(format_number(f64::NAN), "(1e999 - 1e999)");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "(1e999 - 1e999)".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "1e999".to_string() } else { "-1e999".to_string() }
    } else {
        format!("{value}")
    }
}

/// A double-quoted string literal for `value`.
///
/// Backslashes, double quotes, line feeds, carriage returns and tabs are
/// escaped.
///
/// # Example
/// ```
/// use reckon::interpreter::codegen::format::quote_string;
///
/// assert_eq!(quote_string("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
#[must_use]
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
