//! Selector construction errors

use scribe_css::{CssError, SourceSpan};
use thiserror::Error;

/// Selector construction result type
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Errors raised while building selectors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed selector text, passed through from the lexer/parser unchanged
    #[error(transparent)]
    Format(#[from] CssError),

    #[error("Placeholder selector '%{name}' must be resolved before output")]
    UnresolvedPlaceholder {
        name: String,
        span: Option<SourceSpan>,
    },
}

/// The kind of a [`SelectorError`], for callers that only branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorErrorKind {
    InvalidArgument,
    Format,
    UnresolvedPlaceholder,
}

impl SelectorError {
    pub fn kind(&self) -> SelectorErrorKind {
        match self {
            Self::InvalidArgument(_) => SelectorErrorKind::InvalidArgument,
            Self::Format(_) => SelectorErrorKind::Format,
            Self::UnresolvedPlaceholder { .. } => SelectorErrorKind::UnresolvedPlaceholder,
        }
    }

    /// Source span of the offending text, when the error came from parsing
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Format(err) => Some(err.span()),
            Self::UnresolvedPlaceholder { span, .. } => *span,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn in_source(self, source_name: &str) -> Self {
        match self {
            Self::Format(err) => Self::Format(err.in_source(source_name)),
            other => other,
        }
    }
}
