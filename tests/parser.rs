use reckon::{
    ast::{
        BinaryOperator, Node, UnaryOperator,
        build::{
            add, array, assign, call, for_each, identifier, if_else, index, multiply, negate, not, number, power,
            program, range, string, subtract,
        },
    },
    error::{ParseError, Span},
    parse,
};

fn tree(src: &str) -> Node {
    parse(src).unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"))
}

fn parse_error(src: &str) -> ParseError {
    match parse(src) {
        Ok(node) => panic!("{src:?} parsed to {node:?} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(tree("1 + 2 * 3"), add(number(1.0), multiply(number(2.0), number(3.0))));
    assert_eq!(tree("2 ^ 3 ^ 2"), power(number(2.0), power(number(3.0), number(2.0))));
    assert_eq!(tree("a - b - c"), subtract(subtract(identifier("a"), identifier("b")), identifier("c")));
    assert_eq!(tree("-a ^ b"), negate(power(identifier("a"), identifier("b"))));
    assert_eq!(tree("-a * b"), multiply(negate(identifier("a")), identifier("b")));
    assert_eq!(tree("!!x"), not(not(identifier("x"))));
    assert_eq!(tree("--x ^ 2"), negate(negate(power(identifier("x"), number(2.0)))));
}

#[test]
fn prefix_operators_sit_between_multiplication_and_power() {
    for op in [UnaryOperator::Negate, UnaryOperator::Not] {
        assert!(op.precedence() > BinaryOperator::Mod.precedence());
        assert!(op.precedence() < BinaryOperator::Pow.precedence());
        assert!(op.is_right_associative());
    }
    assert_eq!(tree("!a * b"), multiply(not(identifier("a")), identifier("b")));
}

#[test]
fn literals() {
    assert_eq!(tree("1.5e3"), number(1500.0));
    assert_eq!(tree(".5"), number(0.5));
    assert_eq!(tree(r#""a\"b\n""#), string("a\"b\n"));
    assert_eq!(tree(r"'it\'s'"), string("it's"));
    assert_eq!(tree("[]"), array(vec![]));
    assert_eq!(tree("[1, \"x\", true]"),
               array(vec![number(1.0), string("x"), Node::BooleanLiteral { value: true }]));
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(tree("a = b = 1"), assign("a", assign("b", number(1.0))));
    assert_eq!(tree("(x) = 2"), assign("x", number(2.0)));
}

#[test]
fn postfix_and_ranges() {
    assert_eq!(tree("xs[0][1]"), index(index(identifier("xs"), number(0.0)), number(1.0)));
    assert_eq!(tree("f(1, 2)[0]"), index(call("f", vec![number(1.0), number(2.0)]), number(0.0)));
    assert_eq!(tree("1..n + 1"), range(number(1.0), add(identifier("n"), number(1.0)), false));
    assert_eq!(tree("0..=9"), range(number(0.0), number(9.0), true));
}

#[test]
fn control_flow() {
    assert_eq!(tree("if a then 1 else 2 + 3"),
               if_else(identifier("a"), number(1.0), add(number(2.0), number(3.0))));
    assert_eq!(tree("c ? 1 : 2"), if_else(identifier("c"), number(1.0), number(2.0)));
    assert_eq!(tree("for x in xs when x > 0 then x * 2"),
               for_each("x",
                        identifier("xs"),
                        Some(Node::BinaryOp { left:  Box::new(identifier("x")),
                                              op:    BinaryOperator::Greater,
                                              right: Box::new(number(0.0)), }),
                        multiply(identifier("x"), number(2.0))));
    assert_eq!(tree("for x in xs then x"), for_each("x", identifier("xs"), None, identifier("x")));
}

#[test]
fn statements() {
    assert_eq!(tree("a = 1; b = 2\nb"),
               program(vec![assign("a", number(1.0)), assign("b", number(2.0)), identifier("b")]));
    // A single statement is not wrapped.
    assert_eq!(tree("x;"), identifier("x"));
    // Separators inside brackets are ignored.
    assert_eq!(tree("f(1,\n2)"), call("f", vec![number(1.0), number(2.0)]));
    // A parenthesis on a new line starts a statement instead of a call.
    assert_eq!(tree("f\n(1)"), program(vec![identifier("f"), number(1.0)]));
    assert_eq!(tree("// leading comment\n1 // trailing"), number(1.0));
}

#[test]
fn lexical_errors() {
    assert!(matches!(parse_error("1 # 2"), ParseError::UnexpectedCharacter { character: '#', .. }));
    assert!(matches!(parse_error("a & b"), ParseError::UnexpectedCharacter { character: '&', .. }));
    assert!(matches!(parse_error("1e+"), ParseError::MalformedExponent { .. }));
    assert!(matches!(parse_error("\"open"), ParseError::UnterminatedString { .. }));
}

#[test]
fn syntax_errors() {
    assert_eq!(parse_error("1 +"),
               ParseError::UnexpectedEndOfInput { expected: "expression".to_string(),
                                                  span:     Span::at(3), });
    assert!(matches!(parse_error("(1 + 2"), ParseError::UnexpectedEndOfInput { .. }));
    assert!(matches!(parse_error("1 2"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("[1 2]"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("for 1 in xs then 2"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("   "), ParseError::EmptyProgram { .. }));
}

#[test]
fn missing_keywords_are_named() {
    let err = parse_error("if a 1 else 2");
    assert!(matches!(err, ParseError::MissingKeyword { .. }));
    assert_eq!(err.message(), "Expected 'then' in if expression.");

    let err = parse_error("for x xs then x");
    assert_eq!(err.message(), "Expected 'in' in for expression.");
}

#[test]
fn invalid_assignment_target_spans_the_target() {
    let err = parse_error("1 + a = 2");
    assert_eq!(err, ParseError::InvalidAssignmentTarget { span: Span::new(0, 5) });
}
