//! # reckon
//!
//! reckon is an embeddable formula language written in Rust.
//! It parses small programs of expressions and assignments, optimizes them,
//! evaluates them against host-supplied variables and functions, and writes
//! trees back out as source text with minimal parentheses.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::debug;

use crate::{ast::Node, error::Diagnostic};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the operator types that represent
/// the syntactic structure of source code as a tree. The tree is built by the
/// parser and traversed by the optimizer, evaluator and code generator.
///
/// # Responsibilities
/// - Defines one node kind per language construct.
/// - Defines operator precedence and associativity.
/// - Provides smart constructors and traversal helpers.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// optimizing or evaluating code, and the positioned `Diagnostic` handed to
/// an editor.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches byte spans to parse errors.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, optimizing, evaluation, code
/// generation and value representations.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Resolve possibly negative indices against a length.
pub mod util;

pub use crate::interpreter::{
    codegen::generate,
    evaluator::core::{ExecutionContext, evaluate, evaluate_scope},
    optimizer::{OptimizerOptions, optimize, optimize_with},
    parser::parse,
    value::core::Value,
};

/// What [`run`] returns as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emit {
    /// The program's value.
    #[default]
    Value,
    /// The (possibly optimized) tree written back as source.
    Source,
    /// The (possibly optimized) tree in debug form.
    Ast,
    /// The program's value followed by every host variable and top-level
    /// binding.
    Scope,
}

/// Configures [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Optimize the tree before emitting or evaluating it.
    pub optimize:  bool,
    /// Enable constant propagation while optimizing. Host variables are never
    /// propagated.
    pub propagate: bool,
    /// What to produce.
    pub emit:      Emit,
}

/// Parses, optionally optimizes, and then evaluates or prints a program.
///
/// This is the pipeline the command line tool drives. Failures are turned into
/// a [`Diagnostic`]: parse errors keep their span, runtime errors cover the
/// whole source.
///
/// # Errors
/// Returns a diagnostic if parsing, optimizing or evaluating fails.
///
/// # Examples
/// ```
/// use reckon::{Emit, ExecutionContext, RunOptions, run};
///
/// let ctx = ExecutionContext::new().with_variable("x", 4.0);
/// let value = run("x * 2 + 1", &ctx, &RunOptions::default());
/// assert_eq!(value.unwrap(), "9");
///
/// let options = RunOptions { optimize: true,
///                            emit: Emit::Source,
///                            ..RunOptions::default() };
/// assert_eq!(run("y = 2 * 3; y + x", &ctx, &options).unwrap(), "y = 6\ny + x");
///
/// // Parse errors keep their position.
/// let err = run("1 +", &ctx, &RunOptions::default()).unwrap_err();
/// assert_eq!(err.start, 3);
/// ```
pub fn run(source: &str, context: &ExecutionContext, options: &RunOptions) -> Result<String, Diagnostic> {
    let runtime = |error| Diagnostic::from_runtime(&error, source);

    let mut tree = parse(source).map_err(|error| Diagnostic::from(&error))?;
    if options.optimize {
        let optimizer = if options.propagate {
            OptimizerOptions::propagating(context.variables.keys().cloned())
        } else {
            OptimizerOptions::default()
        };
        tree = optimize_with(&tree, &optimizer).map_err(runtime)?;
    }
    debug!("running with {options:?}");

    match options.emit {
        Emit::Value => Ok(evaluate(&tree, context).map_err(runtime)?.to_string()),
        Emit::Source => Ok(generate(&tree)),
        Emit::Ast => Ok(format!("{tree:#?}")),
        Emit::Scope => render_scope(&tree, context).map_err(runtime),
    }
}

fn render_scope(tree: &Node, context: &ExecutionContext) -> interpreter::evaluator::core::EvalResult<String> {
    let scope = evaluate_scope(tree, context)?;
    let lines = std::iter::once(scope.result.to_string())
        .chain(scope.variables.iter().map(|(name, value)| format!("{name} = {value}")));
    Ok(lines.collect::<Vec<_>>().join("\n"))
}
