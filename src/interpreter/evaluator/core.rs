use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use log::debug;

use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        dispatch::{Dispatch, dispatch},
        evaluator::{binary::core::apply_binary, index::index_value, unary::apply_unary},
        value::{core::Value, range::RangeValue},
    },
    util::num::f64_to_i64_checked,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A native function supplied by the host.
///
/// It receives the evaluated arguments in source order.
pub type HostFunction = Arc<dyn Fn(&[Value]) -> EvalResult<Value> + Send + Sync>;

/// Functions and variables supplied by the host for one evaluation.
///
/// Variables listed here are authoritative: when a program assigns to one of
/// them, the assignment yields the host's value and its right-hand side is
/// never evaluated. This lets a host run the same program with different
/// inputs without editing it.
///
/// # Example
/// ```
/// use reckon::{
///     evaluate,
///     interpreter::{evaluator::core::ExecutionContext, value::core::Value},
///     parse,
/// };
///
/// let ctx = ExecutionContext::new().with_variable("rate", 0.5)
///                                  .with_function("double", |args| match args {
///                                      [Value::Number(n)] => Ok(Value::Number(n * 2.0)),
///                                      _ => Ok(Value::Number(f64::NAN)),
///                                  });
///
/// let tree = parse("rate = 0.1; double(rate)").unwrap();
/// assert_eq!(evaluate(&tree, &ctx), Ok(Value::Number(1.0)));
/// ```
#[derive(Clone, Default)]
pub struct ExecutionContext {
    /// Callable functions by name.
    pub functions: HashMap<String, HostFunction>,
    /// Externally supplied variables by name.
    pub variables: HashMap<String, Value>,
}

impl ExecutionContext {
    /// Creates a context without functions or variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a function.
    #[must_use]
    pub fn with_function<F>(mut self, name: impl Into<String>, function: F) -> Self
        where F: Fn(&[Value]) -> EvalResult<Value> + Send + Sync + 'static
    {
        self.functions.insert(name.into(), Arc::new(function));
        self
    }

    /// Adds or replaces a variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut functions: Vec<&String> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("ExecutionContext")
         .field("functions", &functions)
         .field("variables", &self.variables)
         .finish()
    }
}

/// The outcome of [`evaluate_scope`]: the program's value together with every
/// variable it left bound at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    /// Value of the last statement.
    pub result:    Value,
    /// Top-level bindings, sorted by name.
    pub variables: BTreeMap<String, Value>,
}

/// Tree-walking evaluator.
///
/// Holds the host context, the set of host variable names captured at
/// construction, and a stack of local scopes. The bottom scope holds
/// top-level assignments; each for-comprehension iteration pushes a fresh
/// scope on top.
pub struct Interpreter<'ctx> {
    pub(crate) context:   &'ctx ExecutionContext,
    pub(crate) externals: HashSet<String>,
    pub(crate) scopes:    Vec<HashMap<String, Value>>,
}

impl<'ctx> Interpreter<'ctx> {
    /// Creates an interpreter over `context` with one empty scope.
    #[must_use]
    pub fn new(context: &'ctx ExecutionContext) -> Self {
        Self { context,
               externals: context.variables.keys().cloned().collect(),
               scopes: vec![HashMap::new()] }
    }

    /// Evaluates `node` and returns its value.
    ///
    /// Bindings made by earlier calls on the same interpreter stay visible.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        dispatch(self, node)
    }

    /// Looks a variable up, innermost scope first, then the host variables.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .or_else(|| self.context.variables.get(name))
    }

    /// Binds `name` in the innermost scope.
    pub fn define_local(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        } else {
            self.scopes.push(HashMap::from([(name.to_string(), value)]));
        }
    }

    /// Runs `body` with a fresh scope holding `name = value`.
    ///
    /// The scope is removed again whether or not `body` fails.
    pub(crate) fn with_scope<T>(&mut self,
                                name: &str,
                                value: Value,
                                body: impl FnOnce(&mut Self) -> EvalResult<T>)
                                -> EvalResult<T> {
        self.scopes.push(HashMap::from([(name.to_string(), value)]));
        let result = body(self);
        self.scopes.pop();
        result
    }

    /// Consumes the interpreter, returning the host variables overlaid with
    /// the top-level bindings.
    #[must_use]
    pub fn into_variables(mut self) -> BTreeMap<String, Value> {
        let mut variables: BTreeMap<String, Value> =
            self.context.variables.iter().map(|(name, value)| (name.clone(), value.clone())).collect();
        if !self.scopes.is_empty() {
            variables.extend(self.scopes.swap_remove(0));
        }
        variables
    }
}

impl Dispatch for Interpreter<'_> {
    type Output = Value;
    type Error = RuntimeError;

    /// Literals evaluate to themselves.
    fn fallback(&mut self, node: &Node) -> EvalResult<Value> {
        literal_value(node).ok_or_else(|| RuntimeError::type_mismatch("evaluate", "unsupported node"))
    }

    fn program(&mut self, _node: &Node, statements: &[Node]) -> EvalResult<Value> {
        let mut result = None;
        for statement in statements {
            result = Some(self.recurse(statement)?);
        }
        result.ok_or_else(|| RuntimeError::type_mismatch("program", "no statements to evaluate"))
    }

    fn array(&mut self, _node: &Node, elements: &[Node]) -> EvalResult<Value> {
        let values = elements.iter()
                             .map(|element| self.recurse(element))
                             .collect::<EvalResult<Vec<_>>>()?;
        Ok(Value::from(values))
    }

    fn identifier(&mut self, _node: &Node, name: &str) -> EvalResult<Value> {
        self.get_variable(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })
    }

    fn binary(&mut self,
              _node: &Node,
              left: &Node,
              op: BinaryOperator,
              right: &Node)
              -> EvalResult<Value> {
        // Both operands are always evaluated, `&&` and `||` included.
        let left = self.recurse(left)?;
        let right = self.recurse(right)?;
        apply_binary(op, &left, &right)
    }

    fn unary(&mut self, _node: &Node, op: UnaryOperator, argument: &Node) -> EvalResult<Value> {
        let value = self.recurse(argument)?;
        apply_unary(op, &value)
    }

    fn call(&mut self, _node: &Node, name: &str, args: &[Node]) -> EvalResult<Value> {
        self.eval_call(name, args)
    }

    fn assignment(&mut self, _node: &Node, name: &str, value: &Node) -> EvalResult<Value> {
        if self.externals.contains(name)
           && let Some(external) = self.context.variables.get(name)
        {
            let external = external.clone();
            self.define_local(name, external.clone());
            return Ok(external);
        }

        let value = self.recurse(value)?;
        self.define_local(name, value.clone());
        Ok(value)
    }

    fn if_expression(&mut self,
                     _node: &Node,
                     condition: &Node,
                     consequent: &Node,
                     alternate: &Node)
                     -> EvalResult<Value> {
        if self.recurse(condition)?.is_truthy() {
            self.recurse(consequent)
        } else {
            self.recurse(alternate)
        }
    }

    fn for_expression(&mut self,
                      _node: &Node,
                      variable: &str,
                      iterable: &Node,
                      guard: Option<&Node>,
                      body: &Node)
                      -> EvalResult<Value> {
        self.eval_for(variable, iterable, guard, body)
    }

    fn index(&mut self, _node: &Node, object: &Node, index: &Node) -> EvalResult<Value> {
        let object = self.recurse(object)?;
        let index = self.recurse(index)?;
        index_value(&object, &index)
    }

    fn range(&mut self, _node: &Node, start: &Node, end: &Node, inclusive: bool) -> EvalResult<Value> {
        let start = range_bound(&self.recurse(start)?)?;
        let end = range_bound(&self.recurse(end)?)?;
        Ok(Value::Range(RangeValue::new(start, end, inclusive)))
    }
}

/// The value of a number, string or boolean literal; `None` for other nodes.
#[must_use]
pub fn literal_value(node: &Node) -> Option<Value> {
    match node {
        Node::NumberLiteral { value } => Some(Value::Number(*value)),
        Node::StringLiteral { value } => Some(Value::String(value.clone())),
        Node::BooleanLiteral { value } => Some(Value::Boolean(*value)),
        _ => None,
    }
}

/// Converts a range bound to an integer.
fn range_bound(value: &Value) -> EvalResult<i64> {
    let Value::Number(n) = value else {
        return Err(RuntimeError::type_mismatch("..",
                                               format!("range bounds must be numbers, found {}",
                                                       value.type_name())));
    };
    f64_to_i64_checked(*n,
                       RuntimeError::type_mismatch("..", format!("range bound {n} is not an integer")))
}

/// Evaluates a tree against a host context.
///
/// # Errors
/// Returns the first `RuntimeError` raised while evaluating.
pub fn evaluate(node: &Node, context: &ExecutionContext) -> EvalResult<Value> {
    debug!("evaluating {} nodes with {} host variables and {} host functions",
           node.node_count(),
           context.variables.len(),
           context.functions.len());
    Interpreter::new(context).eval(node)
}

/// Evaluates a tree and also returns every name bound at the top level.
///
/// The bindings hold every host variable, whether or not the program read
/// it, together with each top-level assignment the program made.
///
/// # Errors
/// Returns the first `RuntimeError` raised while evaluating.
///
/// # Example
/// ```
/// use reckon::{
///     evaluate_scope,
///     interpreter::{evaluator::core::ExecutionContext, value::core::Value},
///     parse,
/// };
///
/// let ctx = ExecutionContext::new().with_variable("price", 50.0);
/// let tree = parse("a = 2; b = a * 3; b + price").unwrap();
/// let scope = evaluate_scope(&tree, &ctx).unwrap();
///
/// assert_eq!(scope.result, Value::Number(56.0));
/// assert_eq!(scope.variables.get("b"), Some(&Value::Number(6.0)));
/// assert_eq!(scope.variables.get("price"), Some(&Value::Number(50.0)));
/// ```
pub fn evaluate_scope(node: &Node, context: &ExecutionContext) -> EvalResult<Scope> {
    debug!("evaluating {} nodes for a scope snapshot", node.node_count());
    let mut interpreter = Interpreter::new(context);
    let result = interpreter.eval(node)?;
    Ok(Scope { result,
               variables: interpreter.into_variables() })
}
