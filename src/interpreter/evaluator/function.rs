/// Call resolution.
///
/// Looks the callee up in the execution context, evaluates the arguments and
/// invokes the host function.
pub mod core;

/// The default function library.
///
/// Mathematical and timestamp helpers a host can merge into its
/// `ExecutionContext`; the command-line tool always does.
pub mod library;
