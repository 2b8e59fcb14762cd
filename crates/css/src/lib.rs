//! Scribe CSS
//!
//! Source locations, lexing errors, and the CSS tokenizer shared by the
//! selector parser.

pub mod error;
pub mod tokenizer;

pub use error::{CssError, CssResult, SourceLocation, SourceSpan};
pub use tokenizer::{HashType, Token, Tokenizer};
