//! Error types for the Atlantis parsers.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;
use std::io;

use thiserror::Error;

/// The main error type for Atlantis parsing operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a syntax error for a malformed input line.
    #[must_use]
    pub fn syntax(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax {
            line: line.into(),
            message: message.into(),
        })
    }

    /// Creates a deprecation notice for a line that was still understood.
    #[must_use]
    pub fn deprecated(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Deprecated {
            line: line.into(),
            message: message.into(),
        })
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Returns the offending source line for syntax and deprecation errors.
    #[must_use]
    pub fn line(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Syntax { line, .. } | ErrorKind::Deprecated { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Returns `false` for advisory errors raised after the line was delivered.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self.kind, ErrorKind::Deprecated { .. })
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A line could not be parsed.
    #[error("{line}: {message}")]
    Syntax {
        /// The raw line text.
        line: String,
        /// What was wrong with it.
        message: String,
    },

    /// A line used a deprecated construct; its event was still delivered.
    #[error("{line}: {message}")]
    Deprecated {
        /// The raw line text.
        line: String,
        /// Replacement advice.
        message: String,
    },

    /// Reading the input failed.
    #[error("i/o error: {0}")]
    Io(io::Error),

    /// Invalid runtime configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Physical line number in the source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Enclosing parse stages, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            line: None,
            column: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Sets only the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            match (self.line, self.column) {
                (Some(line), Some(col)) => write!(f, ":{line}:{col}")?,
                (Some(line), None) => write!(f, ":{line}")?,
                _ => {}
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias using the Atlantis [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
