use std::collections::{HashMap, HashSet};

/// Smart constructors for building trees by hand.
///
/// The parser never uses these; they exist for hosts and tests that assemble
/// nodes directly, e.g. `multiply(add(number(1.0), number(2.0)), number(3.0))`.
pub mod build;

/// Binding strength of every construct, lowest first.
///
/// The parser climbs this table and the code generator consults it to decide
/// where parentheses are required. Unary operators sit between the
/// multiplicative operators and `^`, which is why `-2 ^ 2` is `-(2 ^ 2)`.
pub mod precedence {
    /// `name = value`
    pub const ASSIGNMENT: u8 = 1;
    /// `if .. then .. else ..` and `for .. in .. then ..`
    pub const TERNARY: u8 = 2;
    /// `||`
    pub const LOGICAL_OR: u8 = 3;
    /// `&&`
    pub const LOGICAL_AND: u8 = 4;
    /// `== != < > <= >=`
    pub const COMPARISON: u8 = 5;
    /// `..` and `..=`
    pub const RANGE: u8 = 6;
    /// `+ -`
    pub const ADDITIVE: u8 = 7;
    /// `* / %`
    pub const MULTIPLICATIVE: u8 = 8;
    /// Prefix `-` and `!`
    pub const UNARY: u8 = 9;
    /// `^`
    pub const EXPONENT: u8 = 10;
    /// `expr[index]`
    pub const POSTFIX: u8 = 11;
    /// Literals, identifiers, calls, arrays and parenthesized groups.
    pub const ATOM: u8 = 12;
}

/// An abstract syntax tree (AST) node.
///
/// `Node` is a closed set of variants; every stage of the pipeline matches on
/// it exhaustively through [`crate::interpreter::dispatch`]. Children are
/// owned through boxes, so a tree has no sharing and no cycles. Stages never
/// mutate a tree in place: the optimizer builds a replacement.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Two or more top-level statements. The value of the last one is the
    /// value of the program.
    Program {
        /// Statements in source order.
        statements: Vec<Self>,
    },
    /// A double-precision number literal.
    NumberLiteral {
        /// The literal value.
        value: f64,
    },
    /// A string literal with escapes already resolved.
    StringLiteral {
        /// The literal value.
        value: String,
    },
    /// `true` or `false`.
    BooleanLiteral {
        /// The literal value.
        value: bool,
    },
    /// `[a, b, c]`
    ArrayLiteral {
        /// Element expressions in order.
        elements: Vec<Self>,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
    },
    /// A binary operation (addition, comparison, logical and, ...).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// A prefix operation (`-x`, `!x`).
    UnaryOp {
        /// The operator.
        op:       UnaryOperator,
        /// The operand.
        argument: Box<Self>,
    },
    /// Call of a host-supplied function (e.g. `round(x, 2)`).
    FunctionCall {
        /// Name the function is registered under.
        name: String,
        /// Argument expressions, evaluated left to right.
        args: Vec<Self>,
    },
    /// `name = value`; evaluates to the bound value.
    Assignment {
        /// The variable being bound.
        name:  String,
        /// The right-hand side.
        value: Box<Self>,
    },
    /// `if condition then consequent else alternate`
    IfExpression {
        /// The condition, tested for truthiness.
        condition:  Box<Self>,
        /// Evaluated when the condition is truthy.
        consequent: Box<Self>,
        /// Evaluated when the condition is falsy.
        alternate:  Box<Self>,
    },
    /// `for variable in iterable when guard then body`, a comprehension that
    /// collects one body value per element passing the guard.
    ForExpression {
        /// Name bound to each element.
        variable: String,
        /// Array, string or range to walk.
        iterable: Box<Self>,
        /// Optional filter.
        guard:    Option<Box<Self>>,
        /// Expression collected for each element.
        body:     Box<Self>,
    },
    /// `object[index]`
    IndexAccess {
        /// The indexed value.
        object: Box<Self>,
        /// The index; negative values count from the end.
        index:  Box<Self>,
    },
    /// `start..end` or `start..=end`
    RangeExpression {
        /// First integer of the sequence.
        start:     Box<Self>,
        /// Upper bound of the sequence.
        end:       Box<Self>,
        /// Whether `end` itself is part of the sequence.
        inclusive: bool,
    },
}

impl Node {
    /// Returns `true` for number, string and boolean literals.
    ///
    /// These are the only nodes the optimizer treats as statically known.
    ///
    /// ```
    /// use reckon::ast::build::{add, number, string};
    ///
    /// assert!(number(1.0).is_literal());
    /// assert!(string("a").is_literal());
    /// assert!(!add(number(1.0), number(2.0)).is_literal());
    /// ```
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self,
                 Self::NumberLiteral { .. } | Self::StringLiteral { .. } | Self::BooleanLiteral { .. })
    }

    /// Returns the direct children of this node in evaluation order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Program { statements } => statements.iter().collect(),
            Self::ArrayLiteral { elements } => elements.iter().collect(),
            Self::FunctionCall { args, .. } => args.iter().collect(),
            Self::NumberLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::Identifier { .. } => Vec::new(),
            Self::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Self::UnaryOp { argument, .. } => vec![argument.as_ref()],
            Self::Assignment { value, .. } => vec![value.as_ref()],
            Self::IfExpression { condition,
                                 consequent,
                                 alternate, } => vec![condition.as_ref(), consequent.as_ref(), alternate.as_ref()],
            Self::ForExpression { iterable,
                                  guard,
                                  body,
                                  .. } => {
                let mut children = vec![iterable.as_ref()];
                if let Some(guard) = guard {
                    children.push(guard.as_ref());
                }
                children.push(body.as_ref());
                children
            },
            Self::IndexAccess { object, index } => vec![object.as_ref(), index.as_ref()],
            Self::RangeExpression { start, end, .. } => vec![start.as_ref(), end.as_ref()],
        }
    }

    /// Rebuilds this node with every direct child replaced by `f(child)`.
    ///
    /// Leaves are cloned unchanged. The first error returned by `f` aborts
    /// the rebuild.
    ///
    /// # Errors
    /// Propagates the first error produced by `f`.
    pub fn try_map_children<E>(&self, mut f: impl FnMut(&Self) -> Result<Self, E>) -> Result<Self, E> {
        fn map_all<E>(nodes: &[Node],
                      f: &mut impl FnMut(&Node) -> Result<Node, E>)
                      -> Result<Vec<Node>, E> {
            nodes.iter().map(|node| f(node)).collect()
        }

        Ok(match self {
            Self::Program { statements } => Self::Program { statements: map_all(statements, &mut f)? },
            Self::ArrayLiteral { elements } => Self::ArrayLiteral { elements: map_all(elements, &mut f)? },
            Self::FunctionCall { name, args } => Self::FunctionCall { name: name.clone(),
                                                                      args: map_all(args, &mut f)?, },
            Self::NumberLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::Identifier { .. } => self.clone(),
            Self::BinaryOp { left, op, right } => Self::BinaryOp { left:  Box::new(f(left)?),
                                                                   op:    *op,
                                                                   right: Box::new(f(right)?), },
            Self::UnaryOp { op, argument } => Self::UnaryOp { op:       *op,
                                                              argument: Box::new(f(argument)?), },
            Self::Assignment { name, value } => Self::Assignment { name:  name.clone(),
                                                                   value: Box::new(f(value)?), },
            Self::IfExpression { condition,
                                 consequent,
                                 alternate, } => Self::IfExpression { condition:  Box::new(f(condition)?),
                                                                      consequent: Box::new(f(consequent)?),
                                                                      alternate:  Box::new(f(alternate)?), },
            Self::ForExpression { variable,
                                  iterable,
                                  guard,
                                  body, } => {
                let iterable = Box::new(f(iterable)?);
                let guard = match guard {
                    Some(guard) => Some(Box::new(f(guard)?)),
                    None => None,
                };
                Self::ForExpression { variable: variable.clone(),
                                      iterable,
                                      guard,
                                      body: Box::new(f(body)?) }
            },
            Self::IndexAccess { object, index } => Self::IndexAccess { object: Box::new(f(object)?),
                                                                       index:  Box::new(f(index)?), },
            Self::RangeExpression { start,
                                    end,
                                    inclusive, } => Self::RangeExpression { start:     Box::new(f(start)?),
                                                                            end:       Box::new(f(end)?),
                                                                            inclusive: *inclusive, },
        })
    }

    /// Collects the name of every identifier read anywhere in this subtree.
    ///
    /// Assignment targets are not reads and are not collected. Loop variables
    /// are collected like any other identifier, which over-approximates the
    /// set of free names.
    pub fn collect_identifiers(&self, out: &mut HashSet<String>) {
        if let Self::Identifier { name } = self {
            out.insert(name.clone());
        }
        for child in self.children() {
            child.collect_identifiers(out);
        }
    }

    /// Counts how many assignments target each name in this subtree.
    pub fn count_assignments(&self, out: &mut HashMap<String, usize>) {
        if let Self::Assignment { name, .. } = self {
            *out.entry(name.clone()).or_default() += 1;
        }
        for child in self.children() {
            child.count_assignments(out);
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children().into_iter().map(Self::node_count).sum::<usize>()
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

impl BinaryOperator {
    /// Every binary operator, in declaration order.
    pub const ALL: [Self; 14] = [Self::Add,
                                 Self::Sub,
                                 Self::Mul,
                                 Self::Div,
                                 Self::Mod,
                                 Self::Pow,
                                 Self::Equal,
                                 Self::NotEqual,
                                 Self::Less,
                                 Self::Greater,
                                 Self::LessEqual,
                                 Self::GreaterEqual,
                                 Self::And,
                                 Self::Or];

    /// Binding strength of the operator, see [`precedence`].
    ///
    /// ```
    /// use reckon::ast::{BinaryOperator, precedence};
    ///
    /// assert_eq!(BinaryOperator::Mul.precedence(), precedence::MULTIPLICATIVE);
    /// assert!(BinaryOperator::Pow.precedence() > BinaryOperator::Add.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => precedence::LOGICAL_OR,
            Self::And => precedence::LOGICAL_AND,
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::Greater
            | Self::LessEqual
            | Self::GreaterEqual => precedence::COMPARISON,
            Self::Add | Self::Sub => precedence::ADDITIVE,
            Self::Mul | Self::Div | Self::Mod => precedence::MULTIPLICATIVE,
            Self::Pow => precedence::EXPONENT,
        }
    }

    /// Only `^` groups to the right.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }

    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical not (`!x`).
    Not,
}

impl UnaryOperator {
    /// Binding strength of the operand: tighter than `*`, looser than `^`.
    ///
    /// ```
    /// use reckon::ast::{BinaryOperator, UnaryOperator};
    ///
    /// assert!(UnaryOperator::Negate.precedence() > BinaryOperator::Mul.precedence());
    /// assert!(UnaryOperator::Not.precedence() < BinaryOperator::Pow.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Negate | Self::Not => precedence::UNARY,
        }
    }

    /// Prefix operators nest to the right, as in `--x`.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Negate | Self::Not)
    }

    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
