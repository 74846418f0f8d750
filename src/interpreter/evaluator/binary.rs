/// Routing of binary operators to their implementations.
///
/// Contains `apply_binary`, the single entry point used by both the
/// interpreter and the optimizer.
pub mod core;

/// Arithmetic operators.
///
/// Implements `+ - * / % ^` on numbers, string and array concatenation, and
/// timestamp offsets.
pub mod arithmetic;

/// Comparison operators.
///
/// Implements `== !=` as deep equality and `< > <= >=` on numbers, strings
/// and timestamps.
pub mod comparison;

/// Logical operators.
///
/// Implements the non-short-circuiting `&&` and `||`.
pub mod logic;
