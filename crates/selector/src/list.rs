//! Complex selectors and selector lists
//!
//! These only appear here as the arguments of selector pseudo-classes such
//! as `:is()` and `:not()`. Matching across combinators is left to the
//! caller.

use std::str::FromStr;

use crate::compound::CompoundSelector;
use crate::error::{SelectorError, SelectorResult};
use crate::parser::{ParseOptions, SelectorParser};
use crate::specificity::SpecificityRange;
use crate::superselector;

/// Selector combinators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space)
    Descendant,
    /// Child combinator (>)
    Child,
    /// Next sibling combinator (+)
    NextSibling,
    /// Subsequent sibling combinator (~)
    SubsequentSibling,
}

impl Combinator {
    pub(crate) fn from_delim(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Child),
            '+' => Some(Self::NextSibling),
            '~' => Some(Self::SubsequentSibling),
            _ => None,
        }
    }
}

/// Compound selectors joined by combinators, e.g. `nav > ul li.active`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplexSelector {
    first: CompoundSelector,
    rest: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    pub fn new(first: CompoundSelector) -> Self {
        Self { first, rest: Vec::new() }
    }

    /// Append `compound`, related to what came before by `combinator`
    pub fn then(mut self, combinator: Combinator, compound: CompoundSelector) -> Self {
        self.rest.push((combinator, compound));
        self
    }

    pub fn first(&self) -> &CompoundSelector {
        &self.first
    }

    /// The combinators and compounds after the first compound
    pub fn rest(&self) -> &[(Combinator, CompoundSelector)] {
        &self.rest
    }

    /// The rightmost compound, which the selector's matched element must satisfy
    pub fn subject(&self) -> &CompoundSelector {
        self.rest.last().map_or(&self.first, |(_, compound)| compound)
    }

    /// All compounds, left to right
    pub fn compounds(&self) -> impl Iterator<Item = &CompoundSelector> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, compound)| compound))
    }

    /// The only compound, if there are no combinators
    pub fn single_compound(&self) -> Option<&CompoundSelector> {
        self.rest.is_empty().then_some(&self.first)
    }

    pub fn specificity_range(&self) -> SpecificityRange {
        SpecificityRange::sum(self.compounds().map(CompoundSelector::specificity_range))
    }

    pub fn is_superselector(&self, other: &ComplexSelector) -> bool {
        superselector::complex_is_superselector(self, other)
    }
}

impl From<CompoundSelector> for ComplexSelector {
    fn from(compound: CompoundSelector) -> Self {
        Self::new(compound)
    }
}

/// A non-empty comma-separated list of alternative selectors
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorList {
    components: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Build a selector list; fails if `components` is empty
    pub fn new<I>(components: I) -> SelectorResult<Self>
    where
        I: IntoIterator<Item = ComplexSelector>,
    {
        let components: Vec<ComplexSelector> = components.into_iter().collect();
        if components.is_empty() {
            log::debug!("Rejected empty selector list");
            return Err(SelectorError::invalid_argument(
                "a selector list must contain at least one selector",
            ));
        }
        Ok(Self { components })
    }

    /// Parse a selector list such as `.a, nav > .b`
    pub fn parse(input: &str, options: &ParseOptions) -> SelectorResult<Self> {
        SelectorParser::parse_list(input, options)
    }

    pub fn components(&self) -> &[ComplexSelector] {
        &self.components
    }

    /// From the least to the most specific alternative
    pub fn specificity_range(&self) -> SpecificityRange {
        SpecificityRange::span(self.components.iter().map(ComplexSelector::specificity_range))
            .unwrap_or(SpecificityRange::ZERO)
    }

    /// Whether every alternative of `other` is covered by some alternative
    /// of `self`
    pub fn is_superselector(&self, other: &SelectorList) -> bool {
        superselector::list_is_superselector(self, other)
    }
}

impl From<ComplexSelector> for SelectorList {
    fn from(complex: ComplexSelector) -> Self {
        Self { components: vec![complex] }
    }
}

impl From<CompoundSelector> for SelectorList {
    fn from(compound: CompoundSelector) -> Self {
        ComplexSelector::from(compound).into()
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &ParseOptions::default())
    }
}
