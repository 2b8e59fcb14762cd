//! Selector Parser
//!
//! Parses compound selectors and selector lists according to Selectors
//! Level 4, plus `%placeholder` selectors.

use scribe_css::{CssError, HashType, SourceLocation, SourceSpan, Token, Tokenizer};

use crate::compound::CompoundSelector;
use crate::error::{SelectorError, SelectorResult};
use crate::list::{Combinator, ComplexSelector, SelectorList};
use crate::simple::{
    unvendor, AttributeOp, PseudoSelector, SimpleSelector, LEGACY_PSEUDO_ELEMENTS, SELECTOR_PSEUDO_CLASSES,
    SELECTOR_PSEUDO_ELEMENTS,
};

/// Options for parsing selector text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name of the stylesheet the text comes from, used in error messages
    pub source_name: Option<String>,
    /// Where the text begins in that stylesheet
    pub start: Option<SourceLocation>,
    /// Whether `%placeholder` selectors are accepted
    pub allow_placeholder: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn with_start(mut self, start: SourceLocation) -> Self {
        self.start = Some(start);
        self
    }

    pub fn allow_placeholder(mut self, allow: bool) -> Self {
        self.allow_placeholder = allow;
        self
    }
}

/// Selector parser
pub(crate) struct SelectorParser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Token,
    /// Location and byte offset where `current` begins
    current_start: SourceLocation,
    current_offset: usize,
    allow_placeholder: bool,
}

impl<'a> SelectorParser<'a> {
    fn new(input: &'a str, options: &ParseOptions) -> SelectorResult<Self> {
        let tokenizer = match options.start {
            Some(start) => Tokenizer::with_start(input, start),
            None => Tokenizer::new(input),
        };
        let mut parser = Self {
            current_start: tokenizer.location(),
            current_offset: 0,
            tokenizer,
            current: Token::Eof,
            allow_placeholder: options.allow_placeholder,
        };
        parser.current = parser.tokenizer.next_token()?;
        Ok(parser)
    }

    /// Parse `input` as exactly one compound selector
    pub(crate) fn parse_compound(input: &'a str, options: &ParseOptions) -> SelectorResult<CompoundSelector> {
        let result = Self::new(input, options).and_then(|mut parser| {
            parser.skip_whitespace()?;
            let compound = parser.parse_compound_selector()?;
            parser.skip_whitespace()?;
            match parser.peek() {
                Token::Eof => Ok(compound),
                Token::Comma => Err(parser.error("Expected a single selector, found a selector list")),
                _ => Err(parser.error("Expected end of compound selector")),
            }
        });

        Self::finish(input, options, result).inspect(|compound| {
            log::debug!("Parsed compound selector '{}' into {} components", input, compound.components().len());
        })
    }

    /// Parse `input` as a comma-separated selector list
    pub(crate) fn parse_list(input: &'a str, options: &ParseOptions) -> SelectorResult<SelectorList> {
        let result = Self::new(input, options).and_then(|mut parser| {
            let list = parser.parse_selector_list()?;
            match parser.peek() {
                Token::Eof => Ok(list),
                _ => Err(parser.error("Expected end of selector list")),
            }
        });

        Self::finish(input, options, result).inspect(|list| {
            log::debug!("Parsed selector list '{}' into {} alternatives", input, list.components().len());
        })
    }

    fn finish<T>(input: &str, options: &ParseOptions, result: SelectorResult<T>) -> SelectorResult<T> {
        result.map_err(|err| {
            log::debug!("Failed to parse selector '{}': {}", input, err);
            match &options.source_name {
                Some(name) => err.in_source(name),
                None => err,
            }
        })
    }

    fn peek(&self) -> &Token {
        &self.current
    }

    fn advance(&mut self) -> SelectorResult<Token> {
        self.current_start = self.tokenizer.location();
        self.current_offset = self.tokenizer.position();
        let next = self.tokenizer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Span from `start` to the end of the last consumed token
    fn span_from(&self, start: SourceLocation) -> SourceSpan {
        SourceSpan::new(start, self.current_start)
    }

    /// Span of the current token
    fn current_span(&self) -> SourceSpan {
        SourceSpan::new(self.current_start, self.tokenizer.location())
    }

    fn error(&self, message: &str) -> SelectorError {
        CssError::syntax(message, self.current_span()).into()
    }

    fn invalid(&self, selector: String, start: SourceLocation) -> SelectorError {
        CssError::invalid_selector(selector, self.span_from(start)).into()
    }

    /// Skip whitespace, returning whether there was any
    fn skip_whitespace(&mut self) -> SelectorResult<bool> {
        let mut skipped = false;
        while matches!(self.peek(), Token::Whitespace) {
            self.advance()?;
            skipped = true;
        }
        Ok(skipped)
    }

    fn expect_right_paren(&mut self) -> SelectorResult<()> {
        match self.peek() {
            Token::RightParen => {
                self.advance()?;
                Ok(())
            }
            Token::Eof => Err(CssError::unexpected_eof(self.current_start).into()),
            _ => Err(self.error("Expected ')'")),
        }
    }

    fn parse_selector_list(&mut self) -> SelectorResult<SelectorList> {
        let mut selectors = Vec::new();

        loop {
            self.skip_whitespace()?;
            selectors.push(self.parse_complex_selector()?);
            self.skip_whitespace()?;

            match self.peek() {
                Token::Comma => {
                    self.advance()?;
                }
                _ => break,
            }
        }

        SelectorList::new(selectors)
    }

    fn parse_complex_selector(&mut self) -> SelectorResult<ComplexSelector> {
        let mut complex = ComplexSelector::new(self.parse_compound_selector()?);

        loop {
            let had_whitespace = self.skip_whitespace()?;

            let combinator = match self.peek() {
                Token::Eof | Token::Comma | Token::RightParen => break,
                Token::Delim(c) => match Combinator::from_delim(*c) {
                    Some(combinator) => {
                        self.advance()?;
                        self.skip_whitespace()?;
                        combinator
                    }
                    None if had_whitespace => Combinator::Descendant,
                    None => return Err(self.error("Unexpected token in selector")),
                },
                _ if had_whitespace => Combinator::Descendant,
                _ => return Err(self.error("Unexpected token in selector")),
            };

            complex = complex.then(combinator, self.parse_compound_selector()?);
        }

        Ok(complex)
    }

    fn parse_compound_selector(&mut self) -> SelectorResult<CompoundSelector> {
        let mut components = Vec::new();

        while let Some(simple) = self.try_parse_simple_selector()? {
            let is_type_like = matches!(simple, SimpleSelector::Universal | SimpleSelector::Type(_));
            if is_type_like && !components.is_empty() {
                return Err(self.error("Type selectors must come first in a compound selector"));
            }
            components.push(simple);
        }

        if components.is_empty() {
            return Err(match self.peek() {
                Token::Eof => CssError::unexpected_eof(self.current_start).into(),
                _ => self.error("Expected selector"),
            });
        }

        CompoundSelector::new(components)
    }

    fn try_parse_simple_selector(&mut self) -> SelectorResult<Option<SimpleSelector>> {
        let start = self.current_start;
        match self.peek().clone() {
            Token::Delim('*') => {
                self.advance()?;
                Ok(Some(SimpleSelector::Universal))
            }
            Token::Ident(name) => {
                self.advance()?;
                Ok(Some(SimpleSelector::Type(name.to_ascii_lowercase())))
            }
            Token::Hash(name, HashType::Id) => {
                self.advance()?;
                Ok(Some(SimpleSelector::Id(name)))
            }
            Token::Hash(name, HashType::Unrestricted) => {
                self.advance()?;
                Err(self.invalid(format!("#{}", name), start))
            }
            Token::Delim('.') => {
                self.advance()?;
                match self.advance()? {
                    Token::Ident(name) => Ok(Some(SimpleSelector::Class(name))),
                    _ => Err(self.invalid(".".to_string(), start)),
                }
            }
            Token::Delim('%') => {
                self.advance()?;
                let name = match self.advance()? {
                    Token::Ident(name) => name,
                    _ => return Err(self.invalid("%".to_string(), start)),
                };
                if !self.allow_placeholder {
                    return Err(SelectorError::UnresolvedPlaceholder {
                        name,
                        span: Some(self.span_from(start)),
                    });
                }
                Ok(Some(SimpleSelector::Placeholder(name)))
            }
            Token::LeftBracket => self.parse_attribute_selector().map(Some),
            Token::Colon => self.parse_pseudo_selector().map(Some),
            _ => Ok(None),
        }
    }

    fn parse_attribute_selector(&mut self) -> SelectorResult<SimpleSelector> {
        let start = self.current_start;
        self.advance()?; // consume '['
        self.skip_whitespace()?;

        let name = match self.advance()? {
            Token::Ident(name) => name,
            _ => return Err(self.invalid("[".to_string(), start)),
        };

        self.skip_whitespace()?;

        let op = match self.peek() {
            Token::Delim(c) => {
                let c = *c;
                let op = AttributeOp::from_delim(c)
                    .ok_or_else(|| self.invalid(format!("[{}{}", name, c), start))?;
                self.advance()?;
                if op != AttributeOp::Equals {
                    match self.advance()? {
                        Token::Delim('=') => {}
                        _ => return Err(self.invalid(format!("[{}{}", name, c), start)),
                    }
                }
                Some(op)
            }
            _ => None,
        };

        self.skip_whitespace()?;

        let value = match op {
            Some(op) => match self.advance()? {
                Token::Ident(v) | Token::String(v) => Some(v),
                _ => return Err(self.invalid(format!("[{}{}", name, op.as_str()), start)),
            },
            None => None,
        };

        self.skip_whitespace()?;

        let case_insensitive = match self.peek() {
            Token::Ident(flag) if value.is_some() && (flag.eq_ignore_ascii_case("i") || flag.eq_ignore_ascii_case("s")) => {
                let is_insensitive = flag.eq_ignore_ascii_case("i");
                self.advance()?;
                self.skip_whitespace()?;
                is_insensitive
            }
            _ => false,
        };

        match self.advance()? {
            Token::RightBracket => {}
            _ => return Err(self.invalid(format!("[{}", name), start)),
        }

        Ok(SimpleSelector::Attribute { name, op, value, case_insensitive })
    }

    fn parse_pseudo_selector(&mut self) -> SelectorResult<SimpleSelector> {
        let start = self.current_start;
        self.advance()?; // consume first ':'

        let is_element = if matches!(self.peek(), Token::Colon) {
            self.advance()?;
            true
        } else {
            false
        };

        let (name, is_function) = match self.advance()? {
            Token::Ident(name) => (name.to_ascii_lowercase(), false),
            Token::Function(name) => (name.to_ascii_lowercase(), true),
            _ => return Err(self.invalid(if is_element { "::" } else { ":" }.to_string(), start)),
        };

        // Legacy pseudo-elements with single colon
        let is_element = is_element || LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str());
        let mut pseudo = PseudoSelector::new(name, is_element);

        if !is_function {
            return Ok(SimpleSelector::Pseudo(pseudo));
        }

        // The tokenizer already consumed '('
        let normalized = unvendor(pseudo.name()).to_string();
        let takes_selector = if is_element {
            SELECTOR_PSEUDO_ELEMENTS.contains(&normalized.as_str())
        } else {
            SELECTOR_PSEUDO_CLASSES.contains(&normalized.as_str())
        };

        if takes_selector {
            let list = self.parse_selector_list()?;
            self.expect_right_paren()?;
            pseudo = pseudo.with_selector(list);
        } else if !is_element && matches!(normalized.as_str(), "nth-child" | "nth-last-child") {
            let (argument, selector) = self.parse_nth_argument()?;
            pseudo = pseudo.with_argument(argument);
            if let Some(list) = selector {
                pseudo = pseudo.with_selector(list);
            }
        } else {
            let (argument, _) = self.parse_raw_argument(false)?;
            pseudo = pseudo.with_argument(argument);
        }

        Ok(SimpleSelector::Pseudo(pseudo))
    }

    /// `An+B` optionally followed by `of <selector-list>`, then ')'
    fn parse_nth_argument(&mut self) -> SelectorResult<(String, Option<SelectorList>)> {
        let (argument, saw_of) = self.parse_raw_argument(true)?;
        if argument.is_empty() {
            return Err(self.error("Expected An+B"));
        }
        if !saw_of {
            return Ok((argument, None));
        }

        let list = self.parse_selector_list()?;
        self.expect_right_paren()?;
        Ok((argument, Some(list)))
    }

    /// Consume text up to the matching ')', or up to a top-level `of`
    /// keyword when `stop_at_of` is set. Returns the trimmed source text and
    /// whether `of` was found; ')' is consumed only in the first case.
    fn parse_raw_argument(&mut self, stop_at_of: bool) -> SelectorResult<(String, bool)> {
        let begin = self.current_offset;
        let mut depth = 0usize;

        loop {
            match self.peek() {
                Token::Eof => return Err(CssError::unexpected_eof(self.current_start).into()),
                Token::LeftParen | Token::Function(_) => depth += 1,
                Token::RightParen if depth == 0 => {
                    let text = self.raw_text(begin);
                    self.advance()?;
                    return Ok((text, false));
                }
                Token::RightParen => depth -= 1,
                Token::Ident(word) if stop_at_of && depth == 0 && word.eq_ignore_ascii_case("of") => {
                    let text = self.raw_text(begin);
                    self.advance()?;
                    return Ok((text, true));
                }
                _ => {}
            }
            self.advance()?;
        }
    }

    /// Source text from byte offset `begin` up to the current token
    fn raw_text(&self, begin: usize) -> String {
        let input = self.tokenizer.input();
        input.get(begin..self.current_offset).unwrap_or_default().trim().to_string()
    }
}
