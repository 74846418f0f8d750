/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss or rounding errors.
/// The language has a single number type, `f64`, so every place that needs an
/// integer (indexing, range bounds) goes through these checks.
///
/// Fallible functions take the error to return as a parameter, so callers
/// decide how a failed conversion is reported.
pub mod num;
