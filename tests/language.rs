use std::{
    fs::{self},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use reckon::{
    Emit, ExecutionContext, RunOptions, Value, error::RuntimeError, evaluate, evaluate_scope,
    interpreter::evaluator::function::library::install, optimize, parse, run,
};
use walkdir::WalkDir;

#[test]
fn script_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = extract_expectation(&content).unwrap_or_else(|| panic!("{path:?} has no '// expect:' line"));
        let context = install(ExecutionContext::new());

        for optimize in [false, true] {
            let options = RunOptions { optimize,
                                       ..RunOptions::default() };
            match run(&content, &context, &options) {
                Ok(output) => assert_eq!(output, expected, "{path:?} (optimize: {optimize})"),
                Err(e) => panic!("Script {path:?} failed (optimize: {optimize}):\n{content}\nError: {e}"),
            }
        }
        count += 1;
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn extract_expectation(content: &str) -> Option<String> {
    content.lines()
           .map(str::trim_start)
           .find_map(|line| line.strip_prefix("// expect:"))
           .map(|expected| expected.trim().to_string())
}

fn eval_with(src: &str, context: &ExecutionContext) -> Result<Value, RuntimeError> {
    let tree = parse(src).unwrap_or_else(|e| panic!("Script failed to parse: {e}"));
    evaluate(&tree, context)
}

fn eval(src: &str) -> Value {
    eval_with(src, &install(ExecutionContext::new())).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn eval_err(src: &str) -> RuntimeError {
    match eval_with(src, &install(ExecutionContext::new())) {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail"),
        Err(e) => e,
    }
}

/// A host function that counts its calls and returns `true`.
fn counting(counter: &Arc<AtomicUsize>) -> impl Fn(&[Value]) -> Result<Value, RuntimeError> + Send + Sync + 'static {
    let counter = Arc::clone(counter);
    move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Boolean(true))
    }
}

#[test]
fn operator_precedence() {
    assert_eq!(eval("2 + 4 * 4"), Value::Number(18.0));
    assert_eq!(eval("2 ^ 3 ^ 2"), Value::Number(512.0));
    assert_eq!(eval("-2 ^ 2"), Value::Number(-4.0));
    assert_eq!(eval("(-2) ^ 2"), Value::Number(4.0));
    assert_eq!(eval("10 - 4 - 3"), Value::Number(3.0));
    assert_eq!(eval("1 + 2 < 4 && !false"), Value::Boolean(true));
}

#[test]
fn assignment_and_statements() {
    assert_eq!(eval("x = 1 + 2; x * 2"), Value::Number(6.0));
    assert_eq!(eval("x = 3\ny = x + 1\nx * y"), Value::Number(12.0));
    assert_eq!(eval("a = b = 4; a + b"), Value::Number(8.0));
}

#[test]
fn statements_split_on_line_breaks_before_operators() {
    // The second line is its own statement, not a subtraction.
    assert_eq!(eval("a = 5\n-1"), Value::Number(-1.0));
    // Inside brackets line breaks are ignored.
    assert_eq!(eval("(1\n- 1)"), Value::Number(0.0));
}

#[test]
fn external_variables_override_assignments() {
    let calls = Arc::new(AtomicUsize::new(0));
    let context = ExecutionContext::new().with_variable("rate", 5.0)
                                         .with_function("tick", counting(&calls));

    let value = eval_with("rate = tick(); rate * 2", &context).unwrap();

    assert_eq!(value, Value::Number(10.0));
    assert_eq!(calls.load(Ordering::SeqCst), 0, "right-hand side must not run");
}

#[test]
fn logical_operators_evaluate_both_sides() {
    let calls = Arc::new(AtomicUsize::new(0));
    let context = ExecutionContext::new().with_function("tick", counting(&calls));

    assert_eq!(eval_with("false && tick()", &context), Ok(Value::Boolean(false)));
    assert_eq!(eval_with("true || tick()", &context), Ok(Value::Boolean(true)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn arguments_are_evaluated_in_order() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let recorded = Arc::clone(&order);
    let context = ExecutionContext::new().with_function("note", move |args| {
                                             if let Ok(mut order) = recorded.lock() {
                                                 order.push(args[0].to_string());
                                             }
                                             Ok(args[0].clone())
                                         })
                                         .with_function("pair", |args| Ok(Value::from(args.to_vec())));

    let value = eval_with("pair(note(1), note(2))", &context).unwrap();

    assert_eq!(value.to_string(), "[1, 2]");
    assert_eq!(*order.lock().unwrap(), vec!["1".to_string(), "2".to_string()]);
}

#[test]
fn conditionals() {
    assert_eq!(eval("if 1 < 2 then \"yes\" else \"no\""), Value::from("yes"));
    assert_eq!(eval("if 0 then 1 else 2 + 3"), Value::Number(5.0));
    assert_eq!(eval("x = -4; x < 0 ? -x : x"), Value::Number(4.0));
    assert_eq!(eval("if [] then 1 else 2"), Value::Number(2.0));
}

#[test]
fn for_comprehensions() {
    assert_eq!(eval("for x in [1, 2, 3] then x * x").to_string(), "[1, 4, 9]");
    assert_eq!(eval("for x in 0..5 when x % 2 == 0 then x").to_string(), "[0, 2, 4]");
    assert_eq!(eval("for c in \"abc\" then c + c").to_string(), r#"["aa", "bb", "cc"]"#);
    assert_eq!(eval("for x in 5..1 then x").to_string(), "[]");
}

#[test]
fn loop_bindings_do_not_leak() {
    let tree = parse("x = 10; ys = for x in 1..=3 then (y = x * 2); x").unwrap();
    let scope = evaluate_scope(&tree, &ExecutionContext::new()).unwrap();

    assert_eq!(scope.result, Value::Number(10.0));
    assert!(!scope.variables.contains_key("y"));
    assert_eq!(scope.variables.get("ys").map(ToString::to_string), Some("[2, 4, 6]".to_string()));
}

#[test]
fn indexing_and_ranges() {
    assert_eq!(eval("[10, 20, 30][1]"), Value::Number(20.0));
    assert_eq!(eval("[10, 20, 30][-1]"), Value::Number(30.0));
    assert_eq!(eval("\"hello\"[-1]"), Value::from("o"));
    assert_eq!(eval("(2..=8)[3]"), Value::Number(5.0));
    assert_eq!(eval("len(1..4)"), Value::Number(3.0));
    assert_eq!(eval_err("[1, 2][2]"), RuntimeError::IndexOutOfBounds { index: 2, len: 2 });
    assert!(matches!(eval_err("[1, 2][0.5]"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn strings_and_arrays() {
    assert_eq!(eval("\"n = \" + 4"), Value::from("n = 4"));
    assert_eq!(eval("'single' + \"double\""), Value::from("singledouble"));
    assert_eq!(eval("[1] + [2, 3]").to_string(), "[1, 2, 3]");
    assert_eq!(eval("[1, [2, \"x\"]] == [1, [2, \"x\"]]"), Value::Boolean(true));
    assert_eq!(eval("1 == \"1\""), Value::Boolean(false));
    assert_eq!(eval("\"abc\" < \"abd\""), Value::Boolean(true));
}

#[test]
fn timestamps() {
    let context = install(ExecutionContext::new()).with_variable("start", Value::Timestamp(1_000));

    assert_eq!(eval_with("start + 500", &context), Ok(Value::Timestamp(1_500)));
    assert_eq!(eval_with("(start + hours(1)) - start", &context), Ok(Value::Number(3_600_000.0)));
    assert_eq!(eval_with("start < start + 1", &context), Ok(Value::Boolean(true)));
    assert_eq!(eval_with("millis(start)", &context), Ok(Value::Number(1_000.0)));
}

#[test]
fn runtime_errors() {
    assert_eq!(eval_err("1 / 0"), RuntimeError::DivisionByZero);
    assert_eq!(eval_err("1 % 0"), RuntimeError::ModuloByZero);
    assert_eq!(eval_err("missing + 1"), RuntimeError::UnknownVariable { name: "missing".to_string() });
    assert_eq!(eval_err("nope(1)"), RuntimeError::UnknownFunction { name: "nope".to_string() });
    assert_eq!(eval_err("x = 1; x(2)"), RuntimeError::NotCallable { name: "x".to_string() });
    assert!(matches!(eval_err("1 - \"a\""), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(eval_err("sqrt(-1)"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn division_by_zero_fails_when_optimizing_too() {
    let tree = parse("1 / 0").unwrap();
    assert_eq!(evaluate(&tree, &ExecutionContext::new()), Err(RuntimeError::DivisionByZero));
    assert_eq!(optimize(&tree), Err(RuntimeError::DivisionByZero));
}

#[test]
fn scope_snapshot() {
    let context = ExecutionContext::new().with_variable("base", 2.0);
    let tree = parse("base = 100; scale = base * 3; scale + 1").unwrap();
    let scope = evaluate_scope(&tree, &context).unwrap();

    assert_eq!(scope.result, Value::Number(7.0));
    assert_eq!(scope.variables.keys().collect::<Vec<_>>(), vec!["base", "scale"]);
    assert_eq!(scope.variables["base"], Value::Number(2.0));
}

#[test]
fn scope_snapshot_includes_host_variables() {
    let context = ExecutionContext::new().with_variable("price", 50.0)
                                         .with_variable("unread", "x");
    let tree = parse("total = price * 2; total").unwrap();
    let scope = evaluate_scope(&tree, &context).unwrap();

    assert_eq!(scope.result, Value::Number(100.0));
    assert_eq!(scope.variables.keys().collect::<Vec<_>>(), vec!["price", "total", "unread"]);
    assert_eq!(scope.variables["price"], Value::Number(50.0));
    assert_eq!(scope.variables["unread"], Value::String("x".to_string()));
}

#[test]
fn run_emits_requested_output() {
    let context = ExecutionContext::new().with_variable("x", 3.0);
    let source = "unused = 1; y = 2 * 4; x + y";

    let value = run(source, &context, &RunOptions::default()).unwrap();
    assert_eq!(value, "11");

    let optimized = RunOptions { optimize: true,
                                 emit: Emit::Source,
                                 ..RunOptions::default() };
    assert_eq!(run(source, &context, &optimized).unwrap(), "y = 8\nx + y");

    let propagated = RunOptions { propagate: true,
                                  ..optimized };
    assert_eq!(run(source, &context, &propagated).unwrap(), "x + 8");

    let scope = RunOptions { emit: Emit::Scope,
                             ..RunOptions::default() };
    assert_eq!(run(source, &context, &scope).unwrap(), "11\nunused = 1\nx = 3\ny = 8");
}

#[test]
fn run_reports_positions() {
    let context = ExecutionContext::new();

    let parse_error = run("1 + * 2", &context, &RunOptions::default()).unwrap_err();
    assert_eq!((parse_error.start, parse_error.end), (4, 5));

    let runtime_error = run("1 / 0", &context, &RunOptions::default()).unwrap_err();
    assert_eq!((runtime_error.start, runtime_error.end), (0, 5));
    assert_eq!(runtime_error.message, RuntimeError::DivisionByZero.to_string());
}
