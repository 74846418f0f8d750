/// A half-open byte range `start..end` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end:   usize,
}

impl Span {
    /// Creates a span covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span at `offset`, used for end-of-input errors.
    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self { start: offset,
               end:   offset, }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self { start: range.start,
               end:   range.end, }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// A character that starts no token, including a lone `&` or `|`.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Where it occurred.
        span:      Span,
    },
    /// A number ended right after `e`, `E` or the exponent sign.
    MalformedExponent {
        /// The partial number literal.
        span: Span,
    },
    /// A string literal with no closing quote.
    UnterminatedString {
        /// From the opening quote to the end of input.
        span: Span,
    },
    /// Found a token that cannot appear here.
    UnexpectedToken {
        /// Source text of the token encountered.
        found:    String,
        /// What the parser was looking for.
        expected: String,
        /// Where the token occurred.
        span:     Span,
    },
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// Empty span at the end of the source.
        span:     Span,
    },
    /// A keyword required by `if` or `for` is missing.
    MissingKeyword {
        /// The missing keyword (`then`, `else`, `in`).
        keyword:   &'static str,
        /// The construct being parsed (`if` or `for`).
        construct: &'static str,
        /// Where the keyword was expected.
        span:      Span,
    },
    /// The left side of `=` is not a bare identifier.
    InvalidAssignmentTarget {
        /// The left operand.
        span: Span,
    },
    /// The source contains no statements.
    EmptyProgram {
        /// The whole (blank) source.
        span: Span,
    },
}

impl ParseError {
    /// The source range the error refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::MalformedExponent { span }
            | Self::UnterminatedString { span }
            | Self::UnexpectedToken { span, .. }
            | Self::UnexpectedEndOfInput { span, .. }
            | Self::MissingKeyword { span, .. }
            | Self::InvalidAssignmentTarget { span }
            | Self::EmptyProgram { span } => *span,
        }
    }

    /// The error text without position information.
    ///
    /// ```
    /// use reckon::parse;
    ///
    /// let err = parse("if x then 1").unwrap_err();
    /// assert_eq!(err.message(), "Expected 'else' in if expression.");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedCharacter { character, .. } => {
                format!("Unexpected character '{character}'.")
            },
            Self::MalformedExponent { .. } => "Expected digit after exponent.".to_string(),
            Self::UnterminatedString { .. } => "Unterminated string literal.".to_string(),
            Self::UnexpectedToken { found, expected, .. } => {
                format!("Expected {expected}, found '{found}'.")
            },
            Self::UnexpectedEndOfInput { expected, .. } => {
                format!("Unexpected end of input, expected {expected}.")
            },
            Self::MissingKeyword { keyword, construct, .. } => {
                format!("Expected '{keyword}' in {construct} expression.")
            },
            Self::InvalidAssignmentTarget { .. } => {
                "Invalid assignment target; only a variable name can be assigned.".to_string()
            },
            Self::EmptyProgram { .. } => "Empty program.".to_string(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Span { start, end } = self.span();
        write!(f, "Error at {start}..{end}: {}", self.message())
    }
}

impl std::error::Error for ParseError {}
