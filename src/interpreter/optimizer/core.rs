use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        dispatch::{Dispatch, dispatch},
        evaluator::core::EvalResult,
        optimizer::{
            fold::{fold_binary, fold_unary, static_condition},
            liveness::eliminate_dead_statements,
        },
    },
};

/// Configures the optimizer.
///
/// The default is the conservative strategy: literal subexpressions are
/// folded and dead statements dropped, but no variable is ever replaced by
/// its value. Replacing is only correct for names the host will never
/// supply, because a host variable overrides any assignment to the same
/// name at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizerOptions {
    /// Substitute literal values for single-assignment variables.
    pub propagate_constants: bool,
    /// Names the host may supply; never substituted.
    pub external_names:      HashSet<String>,
}

impl OptimizerOptions {
    /// Options that enable constant propagation for every name except
    /// `external_names`.
    #[must_use]
    pub fn propagating<I, S>(external_names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { propagate_constants: true,
               external_names:      external_names.into_iter().map(Into::into).collect(), }
    }
}

/// Bottom-up tree rewriter.
///
/// Children are optimized before their parent, so a parent sees literal
/// operands wherever its subtrees folded completely.
pub struct Optimizer<'opts> {
    options:   &'opts OptimizerOptions,
    /// Names currently replaced by a literal, with that literal.
    constants: HashMap<String, Node>,
    /// Assignment counts over the whole tree, for propagation.
    assigned:  HashMap<String, usize>,
}

impl<'opts> Optimizer<'opts> {
    /// Creates an optimizer for `root` with the given options.
    #[must_use]
    pub fn new(root: &Node, options: &'opts OptimizerOptions) -> Self {
        let mut assigned = HashMap::new();
        if options.propagate_constants {
            root.count_assignments(&mut assigned);
        }
        Self { options,
               constants: HashMap::new(),
               assigned }
    }

    /// Optimizes the guard and body of a `for` comprehension.
    fn loop_parts(&mut self, guard: Option<&Node>, body: &Node) -> EvalResult<(Option<Box<Node>>, Node)> {
        let guard = match guard {
            Some(guard) => Some(Box::new(self.recurse(guard)?)),
            None => None,
        };
        Ok((guard, self.recurse(body)?))
    }

    /// Whether `name = value` may be propagated into later statements.
    fn is_propagatable(&self, name: &str, value: &Node) -> bool {
        self.options.propagate_constants
        && value.is_literal()
        && !self.options.external_names.contains(name)
        && self.assigned.get(name) == Some(&1)
    }
}

impl Dispatch for Optimizer<'_> {
    type Output = Node;
    type Error = RuntimeError;

    /// Rebuilds the node from optimized children.
    fn fallback(&mut self, node: &Node) -> EvalResult<Node> {
        node.try_map_children(|child| self.recurse(child))
    }

    fn program(&mut self, _node: &Node, statements: &[Node]) -> EvalResult<Node> {
        let mut optimized = Vec::with_capacity(statements.len());
        for statement in statements {
            let statement = self.recurse(statement)?;
            if let Node::Assignment { name, value } = &statement
               && self.is_propagatable(name, value)
            {
                trace!("propagating '{name}' = {value:?}");
                self.constants.insert(name.clone(), value.as_ref().clone());
            }
            optimized.push(statement);
        }

        let mut statements = eliminate_dead_statements(optimized);
        if statements.len() == 1 {
            return Ok(statements.remove(0));
        }
        Ok(Node::Program { statements })
    }

    fn identifier(&mut self, node: &Node, name: &str) -> EvalResult<Node> {
        Ok(self.constants.get(name).cloned().unwrap_or_else(|| node.clone()))
    }

    fn binary(&mut self, _node: &Node, left: &Node, op: BinaryOperator, right: &Node) -> EvalResult<Node> {
        let left = self.recurse(left)?;
        let right = self.recurse(right)?;
        if let Some(folded) = fold_binary(op, &left, &right)? {
            return Ok(folded);
        }
        Ok(Node::BinaryOp { left: Box::new(left),
                            op,
                            right: Box::new(right) })
    }

    fn unary(&mut self, _node: &Node, op: UnaryOperator, argument: &Node) -> EvalResult<Node> {
        let argument = self.recurse(argument)?;
        if let Some(folded) = fold_unary(op, &argument)? {
            return Ok(folded);
        }
        Ok(Node::UnaryOp { op,
                           argument: Box::new(argument) })
    }

    /// A literal condition selects one branch; only that branch is optimized
    /// and the other is dropped unseen.
    fn if_expression(&mut self,
                     _node: &Node,
                     condition: &Node,
                     consequent: &Node,
                     alternate: &Node)
                     -> EvalResult<Node> {
        let condition = self.recurse(condition)?;
        match static_condition(&condition) {
            Some(true) => {
                trace!("if condition is always true");
                self.recurse(consequent)
            },
            Some(false) => {
                trace!("if condition is always false");
                self.recurse(alternate)
            },
            None => Ok(Node::IfExpression { condition:  Box::new(condition),
                                            consequent: Box::new(self.recurse(consequent)?),
                                            alternate:  Box::new(self.recurse(alternate)?), }),
        }
    }

    /// The loop variable shadows any propagated constant of the same name
    /// inside the guard and body.
    fn for_expression(&mut self,
                      _node: &Node,
                      variable: &str,
                      iterable: &Node,
                      guard: Option<&Node>,
                      body: &Node)
                      -> EvalResult<Node> {
        let iterable = self.recurse(iterable)?;

        let shadowed = self.constants.remove(variable);
        let optimized = self.loop_parts(guard, body);
        if let Some(constant) = shadowed {
            self.constants.insert(variable.to_string(), constant);
        }
        let (guard, body) = optimized?;

        Ok(Node::ForExpression { variable: variable.to_string(),
                                 iterable: Box::new(iterable),
                                 guard,
                                 body: Box::new(body) })
    }
}

/// Optimizes a tree with the default, non-propagating options.
///
/// # Errors
/// Returns the `RuntimeError` a folded constant subexpression raises, such as
/// `DivisionByZero` for `1 / 0`. Failures inside an `if` branch that a
/// literal condition rules out are not raised.
///
/// # Example
/// ```
/// use reckon::{generate, optimize, parse};
///
/// let tree = optimize(&parse("a = 1; b = 2 * 3 + x; b").unwrap()).unwrap();
/// assert_eq!(generate(&tree), "b = 6 + x\nb");
/// ```
pub fn optimize(node: &Node) -> EvalResult<Node> {
    optimize_with(node, &OptimizerOptions::default())
}

/// Optimizes a tree with explicit options.
///
/// # Errors
/// As [`optimize`].
pub fn optimize_with(node: &Node, options: &OptimizerOptions) -> EvalResult<Node> {
    let before = node.node_count();
    let optimized = dispatch(&mut Optimizer::new(node, options), node)?;
    debug!("optimized {before} nodes to {} (propagation {})",
           optimized.node_count(),
           if options.propagate_constants { "on" } else { "off" });
    Ok(optimized)
}
