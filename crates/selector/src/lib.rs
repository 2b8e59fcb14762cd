//! Scribe Selectors
//!
//! Structured selectors for the stylesheet compiler: simple and compound
//! selectors, their specificity ranges, and the superselector relation the
//! extend pass uses to decide which selectors can be merged.

pub mod compound;
pub mod error;
pub mod list;
pub mod parser;
pub mod simple;
pub mod specificity;
pub mod superselector;
pub mod visitor;

pub use compound::CompoundSelector;
pub use error::{SelectorError, SelectorErrorKind, SelectorResult};
pub use list::{Combinator, ComplexSelector, SelectorList};
pub use parser::ParseOptions;
pub use simple::{AttributeOp, PseudoSelector, SimpleSelector};
pub use specificity::{specificity_range, Specificity, SpecificityRange};
pub use superselector::{complex_is_superselector, is_superselector, list_is_superselector};
pub use visitor::{PlaceholderFinder, SelectorVisitor};

pub use scribe_css::{CssError, SourceLocation, SourceSpan};
