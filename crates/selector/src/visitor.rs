//! Selector tree visitors

use crate::compound::CompoundSelector;
use crate::simple::SimpleSelector;

/// A visitor over selector tree nodes
///
/// Compound selectors are the only node this crate dispatches on; visitors
/// that need to descend into pseudo selector arguments do so themselves.
pub trait SelectorVisitor {
    type Output;

    fn visit_compound_selector(&mut self, compound: &CompoundSelector) -> Self::Output;
}

/// Finds the first placeholder selector in a compound selector, searching
/// pseudo selector arguments depth-first
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderFinder;

impl SelectorVisitor for PlaceholderFinder {
    type Output = Option<String>;

    fn visit_compound_selector(&mut self, compound: &CompoundSelector) -> Option<String> {
        for simple in compound.components() {
            match simple {
                SimpleSelector::Placeholder(name) => return Some(name.clone()),
                SimpleSelector::Pseudo(pseudo) => {
                    let nested = pseudo.selector().into_iter().flat_map(|list| list.components());
                    for complex in nested {
                        for inner in complex.compounds() {
                            if let Some(name) = inner.accept(self) {
                                return Some(name);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{Combinator, ComplexSelector, SelectorList};
    use crate::simple::PseudoSelector;

    /// Counts simple selectors without descending into arguments
    struct Counter;

    impl SelectorVisitor for Counter {
        type Output = usize;

        fn visit_compound_selector(&mut self, compound: &CompoundSelector) -> usize {
            compound.components().len()
        }
    }

    #[test]
    fn test_accept_returns_visitor_output() {
        let sel = CompoundSelector::new([SimpleSelector::class("a"), SimpleSelector::class("b")]).unwrap();
        assert_eq!(sel.accept(&mut Counter), 2);
    }

    #[test]
    fn test_placeholder_finder_top_level() {
        let sel = CompoundSelector::new([SimpleSelector::class("a"), SimpleSelector::placeholder("x")]).unwrap();
        assert_eq!(sel.accept(&mut PlaceholderFinder), Some("x".to_string()));
    }

    #[test]
    fn test_placeholder_finder_in_ancestor_compound() {
        let complex = ComplexSelector::new(CompoundSelector::single(SimpleSelector::placeholder("nav")))
            .then(Combinator::Child, CompoundSelector::single(SimpleSelector::class("item")));
        let pseudo = PseudoSelector::class("not").with_selector(SelectorList::from(complex));
        let sel = CompoundSelector::single(SimpleSelector::Pseudo(pseudo));
        assert_eq!(sel.accept(&mut PlaceholderFinder), Some("nav".to_string()));
    }

    #[test]
    fn test_placeholder_finder_none() {
        let sel = CompoundSelector::single(SimpleSelector::Pseudo(PseudoSelector::class("hover")));
        assert_eq!(sel.accept(&mut PlaceholderFinder), None);
    }
}
