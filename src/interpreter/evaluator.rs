/// Core evaluation logic and context management.
///
/// Contains the host-supplied `ExecutionContext`, the `Interpreter` that walks
/// a tree against it, and the `evaluate` / `evaluate_scope` entry points.
pub mod core;

/// Binary operator evaluation logic.
///
/// Implements the fixed semantics of every binary operator on runtime values.
/// The functions here are pure, so the optimizer folds constants with the very
/// same code the interpreter runs.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical not.
pub mod unary;

/// Evaluation of for-comprehensions.
///
/// Walks an array, string or range, binding each element in a fresh scope and
/// collecting the body values that pass the guard.
pub mod for_loop;

/// Index access.
///
/// Resolves `object[index]` on arrays, strings and ranges, with negative
/// indices counting from the end.
pub mod index;

/// Function calls and the default function library.
///
/// Resolves call targets against the execution context and provides a set of
/// ready-made host functions for embedders that want them.
pub mod function;
