/// The optimizer driver.
///
/// Contains `OptimizerOptions`, the `Optimizer` traversal and the `optimize` /
/// `optimize_with` entry points.
pub mod core;

/// Constant folding.
///
/// Evaluates operators whose operands are literals, using the interpreter's
/// own operator functions, and turns the result back into a literal node.
pub mod fold;

/// Dead-statement elimination.
///
/// Walks a statement sequence backward and drops assignments nothing later
/// reads.
pub mod liveness;

pub use self::core::{Optimizer, OptimizerOptions, optimize, optimize_with};
