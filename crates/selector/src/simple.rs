//! Simple selectors
//!
//! The atomic element predicates a compound selector is made of.

use crate::list::SelectorList;
use crate::specificity::{Specificity, SpecificityRange};

/// Pseudo-classes whose argument is a selector list
pub(crate) const SELECTOR_PSEUDO_CLASSES: &[&str] = &[
    "not", "is", "matches", "where", "any", "current", "has", "host", "host-context",
];

/// Pseudo-elements whose argument is a selector list
pub(crate) const SELECTOR_PSEUDO_ELEMENTS: &[&str] = &["slotted"];

/// Pseudo-elements that may also be written with a single colon
pub(crate) const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

/// A simple selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Universal selector (*)
    Universal,
    /// Type selector (e.g., div, p, span)
    Type(String),
    /// ID selector (e.g., #main)
    Id(String),
    /// Class selector (e.g., .container)
    Class(String),
    /// Attribute selector (e.g., [type="text" i])
    Attribute {
        name: String,
        op: Option<AttributeOp>,
        value: Option<String>,
        case_insensitive: bool,
    },
    /// Pseudo-class or pseudo-element (e.g., :hover, ::before, :is(.a, .b))
    Pseudo(PseudoSelector),
    /// Placeholder selector (e.g., %message); only meaningful before extends
    /// are resolved
    Placeholder(String),
}

/// Attribute selector operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOp {
    /// [attr=value] - exact match
    Equals,
    /// [attr~=value] - contains word
    Includes,
    /// [attr|=value] - starts with value or value-
    DashMatch,
    /// [attr^=value] - starts with
    PrefixMatch,
    /// [attr$=value] - ends with
    SuffixMatch,
    /// [attr*=value] - contains
    SubstringMatch,
}

impl AttributeOp {
    /// Operator for the delimiter that precedes `=`, or `=` itself
    pub(crate) fn from_delim(c: char) -> Option<Self> {
        match c {
            '=' => Some(Self::Equals),
            '~' => Some(Self::Includes),
            '|' => Some(Self::DashMatch),
            '^' => Some(Self::PrefixMatch),
            '$' => Some(Self::SuffixMatch),
            '*' => Some(Self::SubstringMatch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::PrefixMatch => "^=",
            Self::SuffixMatch => "$=",
            Self::SubstringMatch => "*=",
        }
    }
}

impl SimpleSelector {
    pub fn type_selector(name: impl Into<String>) -> Self {
        Self::Type(name.into())
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::Placeholder(name.into())
    }

    /// `[name]`
    pub fn attribute(name: impl Into<String>) -> Self {
        Self::Attribute { name: name.into(), op: None, value: None, case_insensitive: false }
    }

    /// `[name op value]`
    pub fn attribute_matching(name: impl Into<String>, op: AttributeOp, value: impl Into<String>) -> Self {
        Self::Attribute {
            name: name.into(),
            op: Some(op),
            value: Some(value.into()),
            case_insensitive: false,
        }
    }

    pub fn pseudo(pseudo: PseudoSelector) -> Self {
        Self::Pseudo(pseudo)
    }

    pub fn as_pseudo(&self) -> Option<&PseudoSelector> {
        match self {
            Self::Pseudo(pseudo) => Some(pseudo),
            _ => None,
        }
    }

    pub fn is_pseudo_element(&self) -> bool {
        matches!(self, Self::Pseudo(pseudo) if pseudo.is_element())
    }

    pub fn min_specificity(&self) -> Specificity {
        self.specificity_range().min
    }

    pub fn max_specificity(&self) -> Specificity {
        self.specificity_range().max
    }

    pub fn specificity_range(&self) -> SpecificityRange {
        match self {
            Self::Universal | Self::Placeholder(_) => SpecificityRange::ZERO,
            Self::Type(_) => SpecificityRange::exact(Specificity::TYPE),
            Self::Id(_) => SpecificityRange::exact(Specificity::ID),
            Self::Class(_) | Self::Attribute { .. } => SpecificityRange::exact(Specificity::CLASS),
            Self::Pseudo(pseudo) => pseudo.specificity_range(),
        }
    }
}

/// A pseudo-class or pseudo-element
///
/// A pseudo selector may carry a plain-text argument (`:lang(en)`,
/// `:nth-child(2n+1)`), a selector list (`:not(.a, .b)`), or both
/// (`:nth-child(2n+1 of .a)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PseudoSelector {
    name: String,
    is_element: bool,
    argument: Option<String>,
    selector: Option<SelectorList>,
}

impl PseudoSelector {
    /// `:name`, or `::name` when `is_element` is set
    pub fn new(name: impl Into<String>, is_element: bool) -> Self {
        Self { name: name.into(), is_element, argument: None, selector: None }
    }

    /// `:name`
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// `::name`
    pub fn element(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    pub fn with_selector(mut self, selector: SelectorList) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name without any vendor prefix (`-moz-any` is `any`)
    pub fn normalized_name(&self) -> &str {
        unvendor(&self.name)
    }

    pub fn is_element(&self) -> bool {
        self.is_element
    }

    pub fn is_class(&self) -> bool {
        !self.is_element
    }

    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    pub fn selector(&self) -> Option<&SelectorList> {
        self.selector.as_ref()
    }

    pub fn specificity_range(&self) -> SpecificityRange {
        let own = if self.is_element { Specificity::TYPE } else { Specificity::CLASS };
        let Some(list) = &self.selector else {
            return SpecificityRange::exact(own);
        };

        let mut range = list.specificity_range();
        // Pseudo-elements and :nth-child(... of S) count themselves on top of
        // their argument; the other selector pseudo-classes take their
        // argument's weight.
        if self.is_element || matches!(self.normalized_name(), "nth-child" | "nth-last-child") {
            range.add(&SpecificityRange::exact(own));
        }
        range
    }
}

/// Strip a vendor prefix such as `-webkit-` from `name`
pub(crate) fn unvendor(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'-' || bytes[1] == b'-' {
        return name;
    }
    match name[1..].find('-') {
        Some(index) => &name[index + 2..],
        None => name,
    }
}
