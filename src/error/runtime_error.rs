#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// The same errors are raised by the optimizer when it folds a constant
/// subexpression that would fail at run time.
pub enum RuntimeError {
    /// Tried to read a variable that is not bound.
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function the execution context does not provide.
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// Called a name that is bound to a value, not a function.
    NotCallable {
        /// The name that was called.
        name: String,
    },
    /// The right operand of `/` was zero.
    DivisionByZero,
    /// The right operand of `%` was zero.
    ModuloByZero,
    /// Indexed past either end of an array, string or range.
    IndexOutOfBounds {
        /// The index as written, possibly negative.
        index: i64,
        /// Length of the indexed value.
        len:   usize,
    },
    /// An operator received operands it is not defined for.
    TypeMismatch {
        /// The operator or construct that failed (`+`, `index`, `for`, ...).
        operator: String,
        /// Details about the mismatch.
        details:  String,
    },
    /// A host function rejected its arguments.
    InvalidArgument {
        /// The function that failed.
        function: String,
        /// Why the arguments were rejected.
        details:  String,
    },
}

impl RuntimeError {
    /// Shorthand for a [`RuntimeError::TypeMismatch`].
    pub fn type_mismatch(operator: impl Into<String>, details: impl Into<String>) -> Self {
        Self::TypeMismatch { operator: operator.into(),
                             details:  details.into(), }
    }

    /// Shorthand for a [`RuntimeError::InvalidArgument`], for host functions.
    ///
    /// ```
    /// use reckon::error::RuntimeError;
    ///
    /// let err = RuntimeError::invalid_argument("sqrt", "negative input");
    /// assert_eq!(err.to_string(), "Invalid argument to 'sqrt': negative input.");
    /// ```
    pub fn invalid_argument(function: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidArgument { function: function.into(),
                                details:  details.into(), }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name } => write!(f, "Unknown variable '{name}'."),
            Self::UnknownFunction { name } => write!(f, "Unknown function '{name}'."),
            Self::NotCallable { name } => write!(f, "'{name}' is not a function."),
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::ModuloByZero => write!(f, "Modulo by zero."),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "Index {index} is out of bounds for length {len}.")
            },
            Self::TypeMismatch { operator, details } => {
                write!(f, "Type mismatch in '{operator}': {details}.")
            },
            Self::InvalidArgument { function, details } => {
                write!(f, "Invalid argument to '{function}': {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
