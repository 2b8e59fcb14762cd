//! Superselector checks
//!
//! `a` is a superselector of `b` when every element `b` matches is also
//! matched by `a`. The check is purely structural: it looks for evidence in
//! `b` for each requirement `a` makes, and answers `false` when there is
//! none. A `false` answer therefore means "not provably a superselector".

use crate::compound::CompoundSelector;
use crate::list::{ComplexSelector, SelectorList};
use crate::simple::{PseudoSelector, SimpleSelector};

/// Selector pseudo-classes that require the element to match their argument,
/// so a simple selector shared by every alternative holds for the element
const SUBSELECTOR_PSEUDOS: &[&str] = &["is", "matches", "where", "any", "nth-child", "nth-last-child"];

/// Whether every element matched by `b` is also matched by `a`
pub fn is_superselector(a: &CompoundSelector, b: &CompoundSelector) -> bool {
    let result = a.components().iter().all(|simple| is_implied_by(simple, b)) && keeps_pseudo_elements(a, b);
    log::trace!("superselector({:?}, {:?}) = {}", a, b, result);
    result
}

/// Whether every alternative in `b` is covered by some alternative in `a`
pub fn list_is_superselector(a: &SelectorList, b: &SelectorList) -> bool {
    b.components()
        .iter()
        .all(|complex2| a.components().iter().any(|complex1| complex_is_superselector(complex1, complex2)))
}

/// Superselector check for complex selectors
///
/// Only the cases decidable from a single compound are handled: when `a` is
/// one compound it must cover `b`'s subject. Otherwise the selectors must be
/// equal.
pub fn complex_is_superselector(a: &ComplexSelector, b: &ComplexSelector) -> bool {
    match a.single_compound() {
        Some(compound1) => is_superselector(compound1, b.subject()),
        None => a == b,
    }
}

/// Whether `a` targets every pseudo-element `b` targets
///
/// `.a::before` selects the generated box, not the element `.a` matches, so
/// a plain pseudo-element in `b` must also appear in `a`. A lone `*` still
/// covers everything.
fn keeps_pseudo_elements(a: &CompoundSelector, b: &CompoundSelector) -> bool {
    if matches!(a.single_simple(), Some(SimpleSelector::Universal)) {
        return true;
    }
    b.components().iter().all(|simple2| match simple2.as_pseudo() {
        Some(pseudo2) if pseudo2.is_element() && pseudo2.selector().is_none() => {
            simple_is_superselector_of_compound(simple2, a)
        }
        _ => true,
    })
}

/// Whether `compound` guarantees `simple`
fn is_implied_by(simple: &SimpleSelector, compound: &CompoundSelector) -> bool {
    match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Pseudo(pseudo) if pseudo.selector().is_some() => {
            selector_pseudo_is_superselector(pseudo, compound)
        }
        _ => simple_is_superselector_of_compound(simple, compound),
    }
}

fn simple_is_superselector_of_compound(simple: &SimpleSelector, compound: &CompoundSelector) -> bool {
    compound.components().iter().any(|theirs| {
        if simple == theirs {
            return true;
        }

        // `:is(.a.b, .a.c)` implies `.a`
        let Some(pseudo) = theirs.as_pseudo() else {
            return false;
        };
        let Some(list) = pseudo.selector() else {
            return false;
        };
        if !SUBSELECTOR_PSEUDOS.contains(&pseudo.normalized_name()) {
            return false;
        }
        list.components().iter().all(|complex| {
            complex
                .single_compound()
                .is_some_and(|alternative| alternative.components().contains(simple))
        })
    })
}

/// Whether `compound` guarantees `pseudo`, a pseudo selector with a
/// selector list argument
fn selector_pseudo_is_superselector(pseudo: &PseudoSelector, compound: &CompoundSelector) -> bool {
    let Some(list1) = pseudo.selector() else {
        return has_equal_pseudo(pseudo, compound);
    };

    match pseudo.normalized_name() {
        "is" | "matches" | "where" | "any" => {
            same_pseudo_arguments(pseudo, compound).any(|list2| list_is_superselector(list1, list2))
                || list1.components().iter().any(|complex1| {
                    complex1
                        .single_compound()
                        .is_some_and(|compound1| is_superselector(compound1, compound))
                })
        }
        "has" | "host" | "host-context" | "slotted" => {
            same_pseudo_arguments(pseudo, compound).any(|list2| list_is_superselector(list1, list2))
        }
        "not" => list1
            .components()
            .iter()
            .all(|complex| excludes(compound, pseudo, complex)),
        "current" => same_pseudo_arguments(pseudo, compound).any(|list2| list2 == list1),
        "nth-child" | "nth-last-child" => compound.components().iter().any(|simple2| {
            simple2.as_pseudo().is_some_and(|pseudo2| {
                pseudo2.name() == pseudo.name()
                    && pseudo2.argument() == pseudo.argument()
                    && pseudo2.selector().is_some_and(|list2| list_is_superselector(list1, list2))
            })
        }),
        _ => has_equal_pseudo(pseudo, compound),
    }
}

/// Whether no element matched by `compound` can match `complex`, the
/// argument of the `:not()` pseudo `not`
fn excludes(compound: &CompoundSelector, not: &PseudoSelector, complex: &ComplexSelector) -> bool {
    let subject = complex.subject().components();
    compound.components().iter().any(|simple2| match simple2 {
        SimpleSelector::Type(name2) => subject
            .iter()
            .any(|simple1| matches!(simple1, SimpleSelector::Type(name1) if name1 != name2)),
        SimpleSelector::Id(id2) => subject
            .iter()
            .any(|simple1| matches!(simple1, SimpleSelector::Id(id1) if id1 != id2)),
        SimpleSelector::Pseudo(pseudo2) if pseudo2.name() == not.name() && pseudo2.is_class() => pseudo2
            .selector()
            .is_some_and(|list2| list2.components().iter().any(|complex2| complex_is_superselector(complex2, complex))),
        _ => false,
    })
}

/// Selector arguments of the pseudo selectors in `compound` with the same
/// name and kind as `pseudo`
fn same_pseudo_arguments<'a>(
    pseudo: &'a PseudoSelector,
    compound: &'a CompoundSelector,
) -> impl Iterator<Item = &'a SelectorList> + 'a {
    compound.components().iter().filter_map(move |simple| {
        let pseudo2 = simple.as_pseudo()?;
        if pseudo2.name() == pseudo.name() && pseudo2.is_element() == pseudo.is_element() {
            pseudo2.selector()
        } else {
            None
        }
    })
}

fn has_equal_pseudo(pseudo: &PseudoSelector, compound: &CompoundSelector) -> bool {
    compound.components().iter().any(|simple| simple.as_pseudo() == Some(pseudo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Combinator;
    use crate::simple::AttributeOp;

    fn compound(components: Vec<SimpleSelector>) -> CompoundSelector {
        CompoundSelector::new(components).unwrap()
    }

    fn ty(name: &str) -> SimpleSelector {
        SimpleSelector::type_selector(name)
    }

    fn class(name: &str) -> SimpleSelector {
        SimpleSelector::class(name)
    }

    fn id(name: &str) -> SimpleSelector {
        SimpleSelector::id(name)
    }

    fn list(alternatives: Vec<Vec<SimpleSelector>>) -> SelectorList {
        SelectorList::new(alternatives.into_iter().map(|c| compound(c).into())).unwrap()
    }

    fn selector_pseudo(name: &str, alternatives: Vec<Vec<SimpleSelector>>) -> SimpleSelector {
        SimpleSelector::Pseudo(PseudoSelector::class(name).with_selector(list(alternatives)))
    }

    fn hover() -> SimpleSelector {
        SimpleSelector::Pseudo(PseudoSelector::class("hover"))
    }

    #[test]
    fn test_type_is_superselector_of_narrower() {
        let div = compound(vec![ty("div")]);
        let div_a = compound(vec![ty("div"), class("a")]);
        assert!(is_superselector(&div, &div_a));
        assert!(!is_superselector(&div_a, &div));
    }

    #[test]
    fn test_universal_covers_everything() {
        let universal = compound(vec![SimpleSelector::Universal]);
        let others = [
            compound(vec![ty("div")]),
            compound(vec![class("a"), id("b")]),
            compound(vec![SimpleSelector::attribute("href"), hover()]),
            compound(vec![SimpleSelector::placeholder("p")]),
            compound(vec![selector_pseudo("not", vec![vec![class("x")]])]),
        ];
        for other in &others {
            assert!(is_superselector(&universal, other), "{:?}", other);
        }
    }

    #[test]
    fn test_reflexive() {
        let selectors = [
            compound(vec![SimpleSelector::Universal]),
            compound(vec![ty("a"), class("b"), id("c"), hover()]),
            compound(vec![SimpleSelector::attribute_matching("href", AttributeOp::PrefixMatch, "http")]),
            compound(vec![selector_pseudo("is", vec![vec![class("a")], vec![ty("p"), class("b")]])]),
            compound(vec![selector_pseudo("not", vec![vec![class("a")], vec![id("b")]])]),
            compound(vec![selector_pseudo("has", vec![vec![ty("img")]])]),
            compound(vec![selector_pseudo("current", vec![vec![ty("p")]])]),
            compound(vec![SimpleSelector::Pseudo(
                PseudoSelector::class("nth-child").with_argument("2n+1").with_selector(list(vec![vec![class("a")]])),
            )]),
            compound(vec![SimpleSelector::Pseudo(PseudoSelector::element("before"))]),
        ];
        for sel in &selectors {
            assert!(is_superselector(sel, sel), "{:?}", sel);
        }
    }

    #[test]
    fn test_transitive_chain() {
        let a = compound(vec![class("a")]);
        let b = compound(vec![ty("div"), class("a")]);
        let c = compound(vec![ty("div"), class("a"), id("x")]);
        assert!(is_superselector(&a, &b));
        assert!(is_superselector(&b, &c));
        assert!(is_superselector(&a, &c));
    }

    #[test]
    fn test_transitive_over_pool() {
        let pool = [
            compound(vec![SimpleSelector::Universal]),
            compound(vec![ty("div")]),
            compound(vec![ty("span")]),
            compound(vec![class("a")]),
            compound(vec![ty("div"), class("a")]),
            compound(vec![class("a"), class("b")]),
            compound(vec![ty("div"), class("a"), id("x")]),
            compound(vec![SimpleSelector::Universal, class("b"), class("a")]),
            compound(vec![ty("div"), hover()]),
            compound(vec![SimpleSelector::attribute("href"), class("a")]),
        ];
        for a in &pool {
            assert!(is_superselector(a, a), "{:?}", a);
            for b in &pool {
                for c in &pool {
                    if is_superselector(a, b) && is_superselector(b, c) {
                        assert!(is_superselector(a, c), "{:?} {:?} {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_different_types_are_unrelated() {
        let div = compound(vec![ty("div")]);
        let span = compound(vec![ty("span")]);
        assert!(!is_superselector(&div, &span));
        assert!(!is_superselector(&span, &div));
    }

    #[test]
    fn test_type_not_implied_by_untyped() {
        let div_a = compound(vec![ty("div"), class("a")]);
        let a = compound(vec![class("a")]);
        assert!(!is_superselector(&div_a, &a));
    }

    #[test]
    fn test_attribute_requires_equal_selector() {
        let exists = compound(vec![SimpleSelector::attribute("href")]);
        let prefixed = compound(vec![SimpleSelector::attribute_matching("href", AttributeOp::PrefixMatch, "http")]);
        let equals = compound(vec![SimpleSelector::attribute_matching("href", AttributeOp::Equals, "http")]);
        assert!(!is_superselector(&exists, &prefixed));
        assert!(!is_superselector(&prefixed, &equals));
        assert!(is_superselector(&equals, &equals.clone()));
    }

    #[test]
    fn test_order_does_not_matter_for_matching() {
        let ab = compound(vec![class("a"), class("b")]);
        let ba = compound(vec![class("b"), class("a")]);
        assert_ne!(ab, ba);
        assert!(is_superselector(&ab, &ba));
        assert!(is_superselector(&ba, &ab));
    }

    #[test]
    fn test_is_argument_supplies_evidence() {
        // .a is implied when every :is() alternative contains it
        let a = compound(vec![class("a")]);
        let is_both = compound(vec![selector_pseudo("is", vec![vec![class("a"), class("b")], vec![class("a"), class("c")]])]);
        assert!(is_superselector(&a, &is_both));

        let is_one = compound(vec![selector_pseudo("is", vec![vec![class("a")], vec![class("c")]])]);
        assert!(!is_superselector(&a, &is_one));
    }

    #[test]
    fn test_is_covers_its_alternatives() {
        let is = compound(vec![selector_pseudo("is", vec![vec![class("a")], vec![class("b")]])]);
        assert!(is_superselector(&is, &compound(vec![class("a")])));
        assert!(is_superselector(&is, &compound(vec![ty("p"), class("b")])));
        assert!(!is_superselector(&is, &compound(vec![class("c")])));
    }

    #[test]
    fn test_is_against_narrower_is() {
        let wide = compound(vec![selector_pseudo("is", vec![vec![class("a")], vec![class("b")]])]);
        let narrow = compound(vec![selector_pseudo("is", vec![vec![class("a"), class("x")]])]);
        assert!(is_superselector(&wide, &narrow));
        assert!(!is_superselector(&narrow, &wide));
    }

    #[test]
    fn test_vendor_prefixed_any() {
        let any = compound(vec![SimpleSelector::Pseudo(
            PseudoSelector::class("-moz-any").with_selector(list(vec![vec![class("a")], vec![class("b")]])),
        )]);
        assert!(is_superselector(&any, &compound(vec![class("b")])));
    }

    #[test]
    fn test_not_with_different_type() {
        let not_span = compound(vec![selector_pseudo("not", vec![vec![ty("span")]])]);
        assert!(is_superselector(&not_span, &compound(vec![ty("div")])));
        assert!(!is_superselector(&not_span, &compound(vec![ty("span")])));
        assert!(!is_superselector(&not_span, &compound(vec![class("a")])));
    }

    #[test]
    fn test_not_with_different_id() {
        let not_x = compound(vec![selector_pseudo("not", vec![vec![id("x")]])]);
        assert!(is_superselector(&not_x, &compound(vec![id("y")])));
        assert!(!is_superselector(&not_x, &compound(vec![id("x")])));
    }

    #[test]
    fn test_not_with_wider_not() {
        // :not(.a) covers :not(.a, .b); :not(.a.b) covers :not(.a)
        let not_a = compound(vec![selector_pseudo("not", vec![vec![class("a")]])]);
        let not_a_or_b = compound(vec![selector_pseudo("not", vec![vec![class("a")], vec![class("b")]])]);
        assert!(is_superselector(&not_a, &not_a_or_b));
        assert!(!is_superselector(&not_a_or_b, &not_a));

        let not_ab = compound(vec![selector_pseudo("not", vec![vec![class("a"), class("b")]])]);
        assert!(is_superselector(&not_ab, &not_a));
        assert!(!is_superselector(&not_a, &not_ab));
    }

    #[test]
    fn test_has_requires_same_pseudo() {
        let has_img = compound(vec![selector_pseudo("has", vec![vec![ty("img")]])]);
        let has_img_a = compound(vec![selector_pseudo("has", vec![vec![ty("img"), class("a")]])]);
        assert!(is_superselector(&has_img, &has_img_a));
        assert!(!is_superselector(&has_img_a, &has_img));
        assert!(!is_superselector(&has_img, &compound(vec![ty("img")])));
    }

    #[test]
    fn test_current_requires_identical_argument() {
        let current_p = compound(vec![selector_pseudo("current", vec![vec![ty("p")]])]);
        let current_p_a = compound(vec![selector_pseudo("current", vec![vec![ty("p"), class("a")]])]);
        assert!(!is_superselector(&current_p, &current_p_a));
    }

    #[test]
    fn test_nth_child_requires_same_argument() {
        let nth = |arg: &str, alternatives| {
            compound(vec![SimpleSelector::Pseudo(
                PseudoSelector::class("nth-child").with_argument(arg).with_selector(list(alternatives)),
            )])
        };
        let odd_a = nth("2n+1", vec![vec![class("a")]]);
        let odd_ab = nth("2n+1", vec![vec![class("a"), class("b")]]);
        let even_ab = nth("2n", vec![vec![class("a"), class("b")]]);
        assert!(is_superselector(&odd_a, &odd_ab));
        assert!(!is_superselector(&odd_a, &even_ab));
        // the argument of :nth-child(... of S) must also hold for the element
        assert!(is_superselector(&compound(vec![class("a")]), &odd_a));
    }

    #[test]
    fn test_pseudo_without_argument_needs_equality() {
        let hovered = compound(vec![hover()]);
        let focused = compound(vec![SimpleSelector::Pseudo(PseudoSelector::class("focus"))]);
        assert!(!is_superselector(&hovered, &focused));
        assert!(is_superselector(&hovered, &compound(vec![class("a"), hover()])));
    }

    #[test]
    fn test_pseudo_element_is_not_covered_by_its_element() {
        let before = SimpleSelector::Pseudo(PseudoSelector::element("before"));
        let a = compound(vec![class("a")]);
        let a_before = compound(vec![class("a"), before.clone()]);
        assert!(!is_superselector(&a, &a_before));
        assert!(!is_superselector(&a_before, &a));
        assert!(is_superselector(&a_before, &compound(vec![class("a"), class("b"), before.clone()])));

        let div = compound(vec![ty("div")]);
        let div_after = compound(vec![ty("div"), SimpleSelector::Pseudo(PseudoSelector::element("after"))]);
        assert!(!is_superselector(&div, &div_after));
        assert!(!is_superselector(&a_before, &compound(vec![class("a"), SimpleSelector::Pseudo(PseudoSelector::element("after"))])));

        let universal = compound(vec![SimpleSelector::Universal]);
        assert!(is_superselector(&universal, &a_before));
        assert!(is_superselector(&universal, &div_after));
    }

    #[test]
    fn test_pseudo_class_and_element_with_same_name_differ() {
        let class_before = compound(vec![SimpleSelector::Pseudo(PseudoSelector::class("before"))]);
        let element_before = compound(vec![SimpleSelector::Pseudo(PseudoSelector::element("before"))]);
        assert!(!is_superselector(&class_before, &element_before));
    }

    #[test]
    fn test_complex_alternatives() {
        let p = compound(vec![ty("p")]);
        let nav_p = ComplexSelector::new(compound(vec![ty("nav")])).then(Combinator::Descendant, p.clone());
        let single_p: ComplexSelector = p.clone().into();

        assert!(complex_is_superselector(&single_p, &nav_p));
        assert!(!complex_is_superselector(&nav_p, &single_p));
        assert!(complex_is_superselector(&nav_p, &nav_p.clone()));

        let is_p = compound(vec![SimpleSelector::Pseudo(
            PseudoSelector::class("is").with_selector(SelectorList::from(single_p)),
        )]);
        let is_nav_p = compound(vec![SimpleSelector::Pseudo(
            PseudoSelector::class("is").with_selector(SelectorList::from(nav_p)),
        )]);
        assert!(is_superselector(&is_p, &is_nav_p));
        assert!(!is_superselector(&is_nav_p, &is_p));
    }

    #[test]
    fn test_list_superselector() {
        let wide = list(vec![vec![class("a")], vec![class("b")]]);
        let narrow = list(vec![vec![class("a"), ty("p")], vec![class("b"), id("x")]]);
        assert!(list_is_superselector(&wide, &narrow));
        assert!(!list_is_superselector(&narrow, &wide));
    }
}
