/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a lazy stream
/// of tokens, each corresponding to a meaningful language element such as a
/// number, string, identifier, operator, delimiter or keyword. Statement
/// separators are folded into a flag on the following token.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with byte spans.
/// - Handles numeric and string literals, identifiers, keywords and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A precedence-climbing parser with one token of lookahead. It produces a
/// single expression node, or a `Program` when the source holds several
/// statements.
///
/// # Responsibilities
/// - Converts tokens into `Node` trees honoring precedence and associativity.
/// - Decides where one statement ends and the next begins.
/// - Reports syntax errors naming what was expected, with a span.
pub mod parser;
/// The shared traversal primitive.
///
/// Declares the `Dispatch` trait and the single exhaustive `dispatch`
/// function that the optimizer, evaluator and code generator are built on.
pub mod dispatch;
/// The optimizer module rewrites trees into cheaper equivalents.
///
/// # Responsibilities
/// - Folds operators over literal operands with the evaluator's semantics.
/// - Replaces `if` expressions whose condition is a literal by the chosen
///   branch.
/// - Optionally propagates single-assignment constants.
/// - Drops assignments no later statement reads.
pub mod optimizer;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree against a host-supplied `ExecutionContext`,
/// performing arithmetic, comparisons and logic, managing local bindings and
/// calling host functions.
///
/// # Responsibilities
/// - Evaluates every node kind.
/// - Lets host variables override assignments of the same name.
/// - Reports runtime errors such as division by zero or unknown names.
pub mod evaluator;
/// The code generator turns trees back into source text.
///
/// Output uses as few parentheses as precedence and associativity allow and
/// re-parses to an equivalent tree.
pub mod codegen;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values expressions produce: numbers, strings,
/// booleans, arrays, timestamps and ranges, together with truthiness, deep
/// equality and display formatting.
pub mod value;
