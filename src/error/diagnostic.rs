use crate::error::{ParseError, RuntimeError};

/// A positioned message for an editor or other diagnostics consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable description, without position information.
    pub message: String,
    /// Byte offset where the underline starts.
    pub start:   usize,
    /// Byte offset where the underline ends.
    pub end:     usize,
}

impl Diagnostic {
    /// Builds a diagnostic for an evaluation failure.
    ///
    /// Trees carry no source positions, so the whole source is underlined.
    #[must_use]
    pub fn from_runtime(error: &RuntimeError, source: &str) -> Self {
        Self { message: error.to_string(),
               start:   0,
               end:     source.len(), }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        let span = error.span();
        Self { message: error.message(),
               start:   span.start,
               end:     span.end, }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error at {}..{}: {}", self.start, self.end, self.message)
    }
}

impl std::error::Error for Diagnostic {}
