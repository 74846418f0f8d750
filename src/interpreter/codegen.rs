/// The source generator.
///
/// Contains the `Generator` traversal, the `generate` entry point and the
/// parenthesization rules.
pub mod core;

/// Literal formatting.
///
/// Writes numbers and strings in a form the lexer reads back to the same
/// value.
pub mod format;

pub use self::core::{Generator, generate, node_precedence};
