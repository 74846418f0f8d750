mod common;

use common::expression;
use proptest::prelude::*;
use reckon::{
    ast::{
        Node,
        build::{
            add, array, assign, boolean, call, divide, for_each, identifier, if_else, index, multiply, negate,
            not, number, power, program, range, string, subtract,
        },
    },
    generate, parse,
};

fn round_trip(node: &Node) -> Node {
    let source = generate(node);
    parse(&source).unwrap_or_else(|e| panic!("Generated source {source:?} does not parse: {e}"))
}

#[test]
fn parenthesizes_only_when_needed() {
    let x = || identifier("x");
    let y = || identifier("y");

    assert_eq!(generate(&multiply(number(2.0), add(number(1.0), number(2.0)))), "2 * (1 + 2)");
    assert_eq!(generate(&add(multiply(number(2.0), number(1.0)), number(2.0))), "2 * 1 + 2");
    assert_eq!(generate(&subtract(x(), subtract(y(), number(1.0)))), "x - (y - 1)");
    assert_eq!(generate(&subtract(subtract(x(), y()), number(1.0))), "x - y - 1");
    assert_eq!(generate(&divide(x(), multiply(y(), number(2.0)))), "x / (y * 2)");
    assert_eq!(generate(&power(x(), power(y(), number(2.0)))), "x ^ y ^ 2");
    assert_eq!(generate(&power(power(x(), y()), number(2.0))), "(x ^ y) ^ 2");
}

#[test]
fn unary_operators() {
    assert_eq!(generate(&power(negate(number(2.0)), number(2.0))), "(-2) ^ 2");
    assert_eq!(generate(&negate(power(number(2.0), number(2.0)))), "-2 ^ 2");
    assert_eq!(generate(&negate(add(identifier("a"), number(1.0)))), "-(a + 1)");
    assert_eq!(generate(&power(number(-2.0), number(2.0))), "(-2) ^ 2");
    assert_eq!(generate(&not(not(boolean(true)))), "!!true");
}

#[test]
fn literals() {
    assert_eq!(generate(&number(0.1)), "0.1");
    assert_eq!(generate(&number(1e21)), "1000000000000000000000");
    assert_eq!(generate(&number(f64::NEG_INFINITY)), "-1e999");
    assert_eq!(generate(&string("tab\there")), r#""tab\there""#);
    assert_eq!(generate(&array(vec![number(1.0), string("a"), boolean(false)])), r#"[1, "a", false]"#);
}

#[test]
fn control_flow_and_postfix() {
    let cond = if_else(identifier("c"), number(1.0), number(2.0));
    assert_eq!(generate(&add(cond.clone(), number(3.0))), "(if c then 1 else 2) + 3");
    assert_eq!(generate(&assign("v", cond.clone())), "v = if c then 1 else 2");
    assert_eq!(generate(&if_else(identifier("c"), number(1.0), assign("v", number(2.0)))),
               "if c then 1 else (v = 2)");
    assert_eq!(generate(&for_each("n",
                                  range(number(1.0), identifier("k"), true),
                                  Some(identifier("ok")),
                                  multiply(identifier("n"), number(2.0)))),
               "for n in 1..=k when ok then n * 2");
    assert_eq!(generate(&index(add(identifier("a"), identifier("b")), number(0.0))), "(a + b)[0]");
    assert_eq!(generate(&index(call("f", vec![]), negate(number(1.0)))), "f()[-1]");
    assert_eq!(generate(&range(add(identifier("a"), number(1.0)), number(5.0), false)), "(a + 1)..5");
}

#[test]
fn programs_are_one_statement_per_line() {
    let tree = program(vec![assign("a", number(1.0)), negate(identifier("a")), array(vec![identifier("a")])]);
    assert_eq!(generate(&tree), "a = 1\n-a\n[a]");
    assert_eq!(round_trip(&tree), tree);
}

#[test]
fn every_node_kind_has_source() {
    let tree = program(vec![assign("t", boolean(true)),
                            for_each("n",
                                     range(number(0.0), identifier("k"), false),
                                     None,
                                     call("f", vec![negate(identifier("n")), string("s")])),
                            if_else(identifier("t"), index(array(vec![number(1.0)]), number(0.0)), number(2.0))]);
    assert_eq!(generate(&tree),
               "t = true\nfor n in 0..k then f(-n, \"s\")\nif t then [1][0] else 2");
    assert_eq!(round_trip(&tree), tree);
}

#[test]
fn display_matches_generate() {
    let tree = add(identifier("x"), number(1.0));
    assert_eq!(tree.to_string(), generate(&tree));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Generated source parses back to the very same tree.
    #[test]
    fn expressions_round_trip(tree in expression()) {
        let source = generate(&tree);
        let reparsed = parse(&source);
        prop_assert!(reparsed.is_ok(), "{source:?} does not parse: {reparsed:?}");
        prop_assert_eq!(reparsed.unwrap(), tree, "source: {}", source);
    }

    /// Statements survive being joined line by line.
    #[test]
    fn programs_round_trip(statements in prop::collection::vec(expression(), 2..5)) {
        let tree = program(statements);
        prop_assert_eq!(round_trip(&tree), tree);
    }

    /// Generating from reparsed output is a fixed point.
    #[test]
    fn generation_is_idempotent(tree in expression()) {
        let once = generate(&tree);
        let twice = generate(&round_trip(&tree));
        prop_assert_eq!(once, twice);
    }

    /// Parsing arbitrary text fails cleanly instead of panicking.
    #[test]
    fn parse_never_panics(source in ".{0,40}") {
        let _ = parse(&source);
    }
}
