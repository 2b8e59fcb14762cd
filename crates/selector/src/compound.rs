//! Compound selectors
//!
//! A compound selector is a sequence of simple selectors with no combinator
//! between them (`div.note[lang]:hover`). It matches an element that every
//! component matches.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::error::{SelectorError, SelectorResult};
use crate::parser::{ParseOptions, SelectorParser};
use crate::simple::SimpleSelector;
use crate::specificity::{Specificity, SpecificityRange};
use crate::superselector;
use crate::visitor::{PlaceholderFinder, SelectorVisitor};

/// A non-empty, immutable conjunction of simple selectors
///
/// Equality and hashing compare the components in order, so `.a.b` and
/// `.b.a` are distinct values even though they match the same elements.
#[derive(Clone)]
pub struct CompoundSelector {
    components: SmallVec<[SimpleSelector; 4]>,
    specificity: OnceLock<SpecificityRange>,
}

impl CompoundSelector {
    /// Build a compound selector; fails if `components` is empty
    pub fn new<I>(components: I) -> SelectorResult<Self>
    where
        I: IntoIterator<Item = SimpleSelector>,
    {
        let components: SmallVec<[SimpleSelector; 4]> = components.into_iter().collect();
        if components.is_empty() {
            log::debug!("Rejected empty compound selector");
            return Err(SelectorError::invalid_argument(
                "a compound selector must contain at least one simple selector",
            ));
        }

        Ok(Self { components, specificity: OnceLock::new() })
    }

    /// A compound selector made of one simple selector
    pub fn single(simple: SimpleSelector) -> Self {
        let mut components = SmallVec::new();
        components.push(simple);
        Self { components, specificity: OnceLock::new() }
    }

    /// Parse a compound selector such as `a.external[href^="http"]`
    pub fn parse(input: &str, options: &ParseOptions) -> SelectorResult<Self> {
        SelectorParser::parse_compound(input, options)
    }

    pub fn components(&self) -> &[SimpleSelector] {
        &self.components
    }

    /// The only component, if there is exactly one
    pub fn single_simple(&self) -> Option<&SimpleSelector> {
        match self.components.as_slice() {
            [simple] => Some(simple),
            _ => None,
        }
    }

    pub fn min_specificity(&self) -> Specificity {
        self.specificity_range().min
    }

    pub fn max_specificity(&self) -> Specificity {
        self.specificity_range().max
    }

    /// Sum of the components' specificity ranges, computed on first use
    pub fn specificity_range(&self) -> SpecificityRange {
        *self.specificity.get_or_init(|| {
            SpecificityRange::sum(self.components.iter().map(SimpleSelector::specificity_range))
        })
    }

    /// Whether every element matched by `other` is also matched by `self`
    pub fn is_superselector(&self, other: &CompoundSelector) -> bool {
        superselector::is_superselector(self, other)
    }

    pub fn has_pseudo_element(&self) -> bool {
        self.components.iter().any(SimpleSelector::is_pseudo_element)
    }

    /// Whether a placeholder appears anywhere in this selector, including
    /// inside pseudo selector arguments
    pub fn contains_placeholder(&self) -> bool {
        self.accept(&mut PlaceholderFinder).is_some()
    }

    /// Fail with [`SelectorError::UnresolvedPlaceholder`] if a placeholder
    /// remains anywhere in this selector
    pub fn ensure_no_placeholders(&self) -> SelectorResult<()> {
        match self.accept(&mut PlaceholderFinder) {
            Some(name) => Err(SelectorError::UnresolvedPlaceholder { name, span: None }),
            None => Ok(()),
        }
    }

    /// Dispatch to `visitor`
    pub fn accept<V: SelectorVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_compound_selector(self)
    }
}

impl PartialEq for CompoundSelector {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for CompoundSelector {}

impl Hash for CompoundSelector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl fmt::Debug for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompoundSelector").field(&self.components.as_slice()).finish()
    }
}

impl From<SimpleSelector> for CompoundSelector {
    fn from(simple: SimpleSelector) -> Self {
        Self::single(simple)
    }
}

impl FromStr for CompoundSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &ParseOptions::default())
    }
}
