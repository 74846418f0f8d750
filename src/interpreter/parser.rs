/// The parser state and the precedence-climbing expression loop.
///
/// Contains the `Parser` struct, the program entry point, and the loop that
/// folds infix and postfix operators into a tree according to their binding
/// strength.
pub mod core;

/// Prefix terms.
///
/// Parses the constructs an expression can start with: literals, identifiers
/// and function calls, parenthesized groups, array literals and the prefix
/// operators `-` and `!`.
pub mod prefix;

/// Keyword-led constructs.
///
/// Parses `if .. then .. else ..` and `for .. in .. when .. then ..`, reporting
/// a missing keyword by name.
pub mod control;

/// Utility functions for the parser.
///
/// Token lookahead, expectation checks, comma-separated lists and the mapping
/// from tokens to infix operators.
pub mod utils;

pub use self::core::{ParseResult, Parser, parse};
