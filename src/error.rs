/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Every parse error carries the byte span of the offending input so a
/// diagnostics surface can underline it.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, and during
/// optimization when a constant subexpression is folded.
pub mod runtime_error;
/// Diagnostics handed to an editor surface.
pub mod diagnostic;

pub use diagnostic::Diagnostic;
pub use parse_error::{ParseError, Span};
pub use runtime_error::RuntimeError;
