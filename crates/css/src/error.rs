//! CSS source locations and lexing errors

use std::fmt;
use thiserror::Error;

/// CSS lexing/parsing result type
pub type CssResult<T> = Result<T, CssError>;

/// Source location in CSS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// The location of the first byte of a document.
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `location`
    pub fn point(location: SourceLocation) -> Self {
        Self::new(location, location)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}-{}", self.start, self.end.column)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// CSS lexing and selector syntax errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    #[error("Unexpected end of input at {span}")]
    UnexpectedEof {
        span: SourceSpan,
    },

    #[error("Invalid selector '{selector}' at {span}")]
    InvalidSelector {
        selector: String,
        span: SourceSpan,
    },

    #[error("Unterminated string at {span}")]
    UnterminatedString {
        span: SourceSpan,
    },

    #[error("{message} at {span}")]
    Syntax {
        message: String,
        span: SourceSpan,
    },

    #[error("{inner} in {source_name}")]
    InSource {
        source_name: String,
        #[source]
        inner: Box<CssError>,
    },
}

impl CssError {
    /// Get the source span of this error
    pub fn span(&self) -> SourceSpan {
        match self {
            Self::UnexpectedEof { span } => *span,
            Self::InvalidSelector { span, .. } => *span,
            Self::UnterminatedString { span } => *span,
            Self::Syntax { span, .. } => *span,
            Self::InSource { inner, .. } => inner.span(),
        }
    }

    /// Get the start location of this error
    pub fn location(&self) -> SourceLocation {
        self.span().start
    }

    /// The message without location information
    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedEof { .. } => "Unexpected end of input".to_string(),
            Self::InvalidSelector { selector, .. } => format!("Invalid selector '{}'", selector),
            Self::UnterminatedString { .. } => "Unterminated string".to_string(),
            Self::Syntax { message, .. } => message.clone(),
            Self::InSource { inner, .. } => inner.message(),
        }
    }

    /// Name of the stylesheet the error was raised in, if known
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::InSource { source_name, .. } => Some(source_name),
            _ => None,
        }
    }

    /// Attach the name of the stylesheet the error was raised in
    pub fn in_source(self, source_name: impl Into<String>) -> Self {
        match self {
            Self::InSource { inner, .. } => Self::InSource { source_name: source_name.into(), inner },
            other => Self::InSource { source_name: source_name.into(), inner: Box::new(other) },
        }
    }

    pub fn unexpected_eof(location: SourceLocation) -> Self {
        Self::UnexpectedEof { span: SourceSpan::point(location) }
    }

    pub fn invalid_selector(selector: impl Into<String>, span: SourceSpan) -> Self {
        Self::InvalidSelector { selector: selector.into(), span }
    }

    pub fn syntax(message: impl Into<String>, span: SourceSpan) -> Self {
        Self::Syntax { message: message.into(), span }
    }
}
