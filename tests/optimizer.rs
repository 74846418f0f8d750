mod common;

use common::bounded_expression;
use proptest::prelude::*;
use reckon::{
    ExecutionContext, OptimizerOptions, Value,
    ast::{
        Node,
        build::{add, assign, identifier, number, program, string},
    },
    error::RuntimeError,
    evaluate, generate, optimize, optimize_with, parse,
};

fn optimized(src: &str) -> Node {
    let tree = parse(src).unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"));
    optimize(&tree).unwrap_or_else(|e| panic!("Failed to optimize {src:?}: {e}"))
}

fn propagated(src: &str, external: &[&str]) -> String {
    let tree = parse(src).unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"));
    let options = OptimizerOptions::propagating(external.iter().copied());
    generate(&optimize_with(&tree, &options).unwrap_or_else(|e| panic!("Failed to optimize {src:?}: {e}")))
}

#[test]
fn folds_literal_operators() {
    assert_eq!(optimized("1 + 2 * 3"), number(7.0));
    assert_eq!(optimized("-(2 ^ 2)"), number(-4.0));
    assert_eq!(optimized("\"a\" + 1"), string("a1"));
    assert_eq!(optimized("!(1 < 2)"), Node::BooleanLiteral { value: false });
    assert_eq!(optimized("x + 2 * 3"), add(identifier("x"), number(6.0)));
}

#[test]
fn does_not_reassociate() {
    // `(x + 1) + 2` keeps both additions.
    assert_eq!(generate(&optimized("x + 1 + 2")), "x + 1 + 2");
}

#[test]
fn folding_errors_propagate() {
    assert_eq!(optimize(&parse("1 / 0").unwrap()), Err(RuntimeError::DivisionByZero));
    assert_eq!(optimize(&parse("x = 5 % 0; x").unwrap()), Err(RuntimeError::ModuloByZero));
    assert!(matches!(optimize(&parse("1 - \"a\"").unwrap()), Err(RuntimeError::TypeMismatch { .. })));
}

#[test]
fn literal_conditions_select_a_branch() {
    assert_eq!(optimized("if 1 < 2 then x else y"), identifier("x"));
    assert_eq!(optimized("false ? x : y + 1"), add(identifier("y"), number(1.0)));
    // The discarded branch is never folded, so its error is not raised.
    assert_eq!(optimized("if true then 1 else 1 / 0"), number(1.0));
    assert_eq!(generate(&optimized("if c then 1 + 1 else 2")), "if c then 2 else 2");
}

#[test]
fn removes_dead_assignments() {
    assert_eq!(optimized("a = 1; b = 2; b"), program(vec![assign("b", number(2.0)), identifier("b")]));
    // A read keeps every assignment it depends on.
    assert_eq!(generate(&optimized("a = 1; b = a + x; b")), "a = 1\nb = a + x\nb");
    // The final statement is the result and always stays.
    assert_eq!(optimized("a = 1; b = 2"), assign("b", number(2.0)));
    // Non-assignments are kept even when unused.
    assert_eq!(generate(&optimized("f(1); 2")), "f(1)\n2");
}

#[test]
fn nested_assignments_survive() {
    let empty = ExecutionContext::new();
    for (src, expected) in [("x = y = 3; y", 3.0), ("a = 1; b = (a = 2); a", 2.0), ("a = 1; b = [a = 5]; a", 5.0)] {
        let tree = optimized(src);
        assert_eq!(evaluate(&tree, &empty), Ok(Value::Number(expected)), "{src}");
    }
    assert_eq!(generate(&optimized("x = y = 3; y")), "x = y = 3\ny");
    assert_eq!(generate(&optimized("a = 1; b = (a = 2); a")), "a = 1\nb = a = 2\na");
}

#[test]
fn conservative_by_default() {
    // Without propagation a host value for `rate` still wins at run time.
    let tree = optimized("rate = 0.1; amount * rate");
    assert_eq!(generate(&tree), "rate = 0.1\namount * rate");

    let context = ExecutionContext::new().with_variable("rate", 0.5)
                                         .with_variable("amount", 10.0);
    assert_eq!(evaluate(&tree, &context), Ok(reckon::Value::Number(5.0)));
}

#[test]
fn propagation_substitutes_single_assignments() {
    assert_eq!(propagated("a = 2; b = a * 3; b + x", &[]), "6 + x");
    // External names are never substituted.
    assert_eq!(propagated("rate = 0.1; amount * rate", &["rate"]), "rate = 0.1\namount * rate");
    // Names assigned twice are left alone.
    assert_eq!(propagated("a = 1; a = a + 1; a", &[]), "a = 1\na = a + 1\na");
    // Non-literal values are not propagated.
    assert_eq!(propagated("a = f(); a + a", &[]), "a = f()\na + a");
}

#[test]
fn propagation_respects_loop_variables() {
    // The loop variable hides the constant. The body still reads `x`, so the
    // assignment is kept.
    assert_eq!(propagated("x = 10; for x in xs then x + 1", &[]), "x = 10\nfor x in xs then x + 1");
    assert_eq!(propagated("n = 2; for x in xs when x > n then x * n", &[]),
               "for x in xs when x > 2 then x * 2");
}

#[test]
fn optimizing_twice_changes_nothing() {
    for src in ["a = 1; b = a + x; c = 2 * 3; b + c",
                "for x in 0..10 when x % 2 == 0 then x ^ 2",
                "if c then [1 + 1, y] else z[0]"]
    {
        let once = optimized(src);
        assert_eq!(optimize(&once), Ok(once.clone()), "{src}");
    }
}

/// Pure stand-ins for `f` and `g`, plus a host value for `x` so that
/// overridden assignments are exercised too.
fn context() -> ExecutionContext {
    ExecutionContext::new().with_variable("x", 3.0)
                           .with_function("f", |args| Ok(Value::Number(args.len() as f64)))
                           .with_function("g", |args| Ok(args.first().cloned().unwrap_or(Value::Boolean(false))))
}

/// Debug text, so that NaN results compare equal to themselves.
fn outcome(tree: &Node) -> Result<String, RuntimeError> {
    evaluate(tree, &context()).map(|value| format!("{value:?}"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A program that evaluates successfully yields the same value once
    /// optimized.
    #[test]
    fn optimizing_preserves_results(statements in prop::collection::vec(bounded_expression(), 1..5)) {
        let tree = program(statements);
        if let (Ok(expected), Ok(optimized)) = (outcome(&tree), optimize(&tree)) {
            prop_assert_eq!(outcome(&optimized), Ok(expected), "optimized: {}", generate(&optimized));
        }
    }

    /// A second pass does not change what the program evaluates to.
    #[test]
    fn optimizing_again_preserves_results(statements in prop::collection::vec(bounded_expression(), 1..5)) {
        let Ok(once) = optimize(&program(statements)) else {
            return Ok(());
        };
        if let Ok(expected) = outcome(&once) {
            let twice = optimize(&once);
            prop_assert!(twice.is_ok(), "second pass failed on {}", generate(&once));
            if let Ok(twice) = twice {
                prop_assert_eq!(outcome(&twice), Ok(expected));
            }
        }
    }
}
