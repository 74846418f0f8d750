//! The one place that matches on every [`Node`] kind.
//!
//! Each pipeline stage implements [`Dispatch`], overriding the handlers for
//! the kinds it treats specially. Every handler it leaves alone forwards to
//! [`Dispatch::fallback`], and a handler descends into a child by calling
//! [`Dispatch::recurse`], which goes back through [`dispatch`].

use crate::ast::{BinaryOperator, Node, UnaryOperator};

/// Per-kind handlers for a tree traversal.
///
/// `Output` is what one node produces (a value, a rewritten node, source
/// text) and `Error` what a handler may fail with.
pub trait Dispatch {
    /// The result of handling one node.
    type Output;
    /// The failure a handler may raise.
    type Error;

    /// Handles every kind without a dedicated override.
    fn fallback(&mut self, node: &Node) -> Result<Self::Output, Self::Error>;

    /// Dispatches a child node.
    fn recurse(&mut self, node: &Node) -> Result<Self::Output, Self::Error>
        where Self: Sized
    {
        dispatch(self, node)
    }

    /// A statement sequence.
    fn program(&mut self, node: &Node, _statements: &[Node]) -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// A number literal.
    fn number(&mut self, node: &Node, _value: f64) -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// A string literal.
    fn string(&mut self, node: &Node, _value: &str) -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// `true` or `false`.
    fn boolean(&mut self, node: &Node, _value: bool) -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// An array literal.
    fn array(&mut self, node: &Node, _elements: &[Node]) -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// A variable read.
    fn identifier(&mut self, node: &Node, _name: &str) -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// `left op right`.
    fn binary(&mut self,
              node: &Node,
              _left: &Node,
              _op: BinaryOperator,
              _right: &Node)
              -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// `-argument` or `!argument`.
    fn unary(&mut self,
             node: &Node,
             _op: UnaryOperator,
             _argument: &Node)
             -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// A call of a host function.
    fn call(&mut self, node: &Node, _name: &str, _args: &[Node]) -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// `name = value`.
    fn assignment(&mut self,
                  node: &Node,
                  _name: &str,
                  _value: &Node)
                  -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// `if`/`then`/`else` and the `? :` form.
    fn if_expression(&mut self,
                     node: &Node,
                     _condition: &Node,
                     _consequent: &Node,
                     _alternate: &Node)
                     -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// A `for` comprehension; `guard` is the optional `when` clause.
    fn for_expression(&mut self,
                      node: &Node,
                      _variable: &str,
                      _iterable: &Node,
                      _guard: Option<&Node>,
                      _body: &Node)
                      -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// `object[index]`.
    fn index(&mut self, node: &Node, _object: &Node, _index: &Node) -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }

    /// `start..end`, or `start..=end` when `inclusive`.
    fn range(&mut self,
             node: &Node,
             _start: &Node,
             _end: &Node,
             _inclusive: bool)
             -> Result<Self::Output, Self::Error> {
        self.fallback(node)
    }
}

/// Routes `node` to the handler for its kind.
///
/// # Example
/// ```
/// use std::convert::Infallible;
///
/// use reckon::{
///     ast::Node,
///     interpreter::dispatch::{Dispatch, dispatch},
///     parse,
/// };
///
/// /// Counts number literals; everything else just visits its children.
/// struct Numbers;
///
/// impl Dispatch for Numbers {
///     type Output = usize;
///     type Error = Infallible;
///
///     fn fallback(&mut self, node: &Node) -> Result<usize, Infallible> {
///         node.children().into_iter().map(|child| self.recurse(child)).sum()
///     }
///
///     fn number(&mut self, _node: &Node, _value: f64) -> Result<usize, Infallible> {
///         Ok(1)
///     }
/// }
///
/// let tree = parse("a = 1; [2, a, f(3)]").unwrap();
/// assert_eq!(dispatch(&mut Numbers, &tree), Ok(3));
/// ```
pub fn dispatch<D: Dispatch>(handler: &mut D, node: &Node) -> Result<D::Output, D::Error> {
    match node {
        Node::Program { statements } => handler.program(node, statements),
        Node::NumberLiteral { value } => handler.number(node, *value),
        Node::StringLiteral { value } => handler.string(node, value),
        Node::BooleanLiteral { value } => handler.boolean(node, *value),
        Node::ArrayLiteral { elements } => handler.array(node, elements),
        Node::Identifier { name } => handler.identifier(node, name),
        Node::BinaryOp { left, op, right } => handler.binary(node, left, *op, right),
        Node::UnaryOp { op, argument } => handler.unary(node, *op, argument),
        Node::FunctionCall { name, args } => handler.call(node, name, args),
        Node::Assignment { name, value } => handler.assignment(node, name, value),
        Node::IfExpression { condition,
                             consequent,
                             alternate, } => handler.if_expression(node, condition, consequent, alternate),
        Node::ForExpression { variable,
                              iterable,
                              guard,
                              body, } => handler.for_expression(node, variable, iterable, guard.as_deref(), body),
        Node::IndexAccess { object, index } => handler.index(node, object, index),
        Node::RangeExpression { start,
                                end,
                                inclusive, } => handler.range(node, start, end, *inclusive),
    }
}
