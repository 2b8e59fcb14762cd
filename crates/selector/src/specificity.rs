//! Selector specificity
//!
//! Specificity is kept as an (a, b, c) triple compared lexicographically:
//! a = ID selectors
//! b = class selectors, attribute selectors, pseudo-classes
//! c = type selectors, pseudo-elements
//!
//! Selectors whose pseudo-classes carry nested selector lists do not have a
//! single specificity, so every selector reports a [`SpecificityRange`].

use std::cmp::Ordering;

use crate::compound::CompoundSelector;

/// Selector specificity (a, b, c)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Specificity {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Specificity {
    /// `*` and placeholders
    pub const ZERO: Self = Self::new(0, 0, 0);
    /// `#id`
    pub const ID: Self = Self::new(1, 0, 0);
    /// `.class`, `[attr]`, `:pseudo-class`
    pub const CLASS: Self = Self::new(0, 1, 0);
    /// `type`, `::pseudo-element`
    pub const TYPE: Self = Self::new(0, 0, 1);

    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// Compare specificities
    pub fn compare(&self, other: &Self) -> Ordering {
        self.a.cmp(&other.a)
            .then_with(|| self.b.cmp(&other.b))
            .then_with(|| self.c.cmp(&other.c))
    }

    /// Add another specificity
    pub fn add(&mut self, other: &Self) {
        self.a = self.a.saturating_add(other.a);
        self.b = self.b.saturating_add(other.b);
        self.c = self.c.saturating_add(other.c);
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The lowest and highest specificity a selector can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpecificityRange {
    pub min: Specificity,
    pub max: Specificity,
}

impl SpecificityRange {
    /// An empty sum; the identity for [`SpecificityRange::add`]
    pub const ZERO: Self = Self::exact(Specificity::ZERO);

    pub const fn exact(specificity: Specificity) -> Self {
        Self { min: specificity, max: specificity }
    }

    /// Whether the selector has a single specificity
    pub fn is_exact(&self) -> bool {
        self.min == self.max
    }

    /// Add another range, bound by bound
    pub fn add(&mut self, other: &Self) {
        self.min.add(&other.min);
        self.max.add(&other.max);
    }

    /// Widen this range to also cover `other`
    pub fn widen(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Sum of several ranges, as for the components of a compound selector
    pub fn sum<I: IntoIterator<Item = SpecificityRange>>(ranges: I) -> Self {
        ranges.into_iter().fold(Self::ZERO, |mut total, range| {
            total.add(&range);
            total
        })
    }

    /// The narrowest range covering every alternative, or `None` if there
    /// are no alternatives
    pub fn span<I: IntoIterator<Item = SpecificityRange>>(alternatives: I) -> Option<Self> {
        alternatives.into_iter().reduce(|mut covered, range| {
            covered.widen(&range);
            covered
        })
    }
}

/// Specificity range of a compound selector; cached on the selector after
/// the first call
pub fn specificity_range(compound: &CompoundSelector) -> SpecificityRange {
    compound.specificity_range()
}
