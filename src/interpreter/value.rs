/// Core value type.
///
/// Defines the `Value` enum produced by evaluation, its conversions,
/// truthiness, deep equality and display formatting.
pub mod core;

/// Lazy integer ranges.
///
/// Defines `RangeValue`, the value of `start..end` and `start..=end`. A range
/// stores only its bounds and can be walked any number of times.
pub mod range;
