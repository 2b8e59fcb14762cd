//! CSS Tokenizer
//!
//! Tokenizes selector text according to CSS Syntax Module Level 3. Only the
//! token kinds that can appear in a selector are distinguished; everything
//! else comes out as a [`Token::Delim`].

use crate::error::{CssError, CssResult, SourceLocation, SourceSpan};

/// CSS Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (e.g., element names, class names)
    Ident(String),
    /// Function token (identifier followed by '(')
    Function(String),
    /// Hash token (e.g., #id)
    Hash(String, HashType),
    /// String token
    String(String),
    /// Number, with or without a unit (e.g. the `2n` and `+1` in `2n+1`)
    Number,
    /// Whitespace
    Whitespace,
    /// Colon ':'
    Colon,
    /// Comma ','
    Comma,
    /// Left bracket '['
    LeftBracket,
    /// Right bracket ']'
    RightBracket,
    /// Left paren '('
    LeftParen,
    /// Right paren ')'
    RightParen,
    /// Delim (any other single character)
    Delim(char),
    /// End of file
    Eof,
}

/// Hash token type (id or unrestricted)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// Could be an ID selector
    Id,
    /// Unrestricted (e.g., `#123`)
    Unrestricted,
}

/// CSS Tokenizer
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: usize,
    line: usize,
    column: usize,
    base: SourceLocation,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer
    pub fn new(input: &'a str) -> Self {
        Self::with_start(input, SourceLocation::start())
    }

    /// Create a tokenizer for text that begins at `start` in a larger document.
    /// Reported locations are relative to that document.
    pub fn with_start(input: &'a str, start: SourceLocation) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            position: 0,
            line: 1,
            column: 1,
            base: start,
        }
    }

    /// The text being tokenized
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset into [`Tokenizer::input`] of the next unread character
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the current source location
    pub fn location(&self) -> SourceLocation {
        let column = if self.line == 1 {
            self.base.column + self.column - 1
        } else {
            self.column
        };
        SourceLocation::new(self.base.line + self.line - 1, column, self.base.offset + self.position)
    }

    fn span_from(&self, start: SourceLocation) -> SourceSpan {
        SourceSpan::new(start, self.location())
    }

    /// Peek at the next character without consuming
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peek at the second character without consuming
    fn peek_second(&self) -> Option<char> {
        let mut iter = self.input[self.position..].chars();
        iter.next();
        iter.next()
    }

    /// Consume the next character
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume a comment, returning an error if it never closes
    fn consume_comment(&mut self) -> CssResult<()> {
        let start = self.location();
        self.advance(); // consume '/'
        self.advance(); // consume '*'

        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => continue,
                None => return Err(CssError::syntax("Unterminated comment", self.span_from(start))),
            }
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CssResult<Token> {
        // Whitespace and comments collapse into a single Whitespace token
        let mut saw_whitespace = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                saw_whitespace = true;
                self.advance();
            } else if c == '/' && self.peek_second() == Some('*') {
                self.consume_comment()?;
            } else {
                break;
            }
        }

        if saw_whitespace {
            return Ok(Token::Whitespace);
        }

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let simple = match c {
            ':' => Some(Token::Colon),
            ',' => Some(Token::Comma),
            '[' => Some(Token::LeftBracket),
            ']' => Some(Token::RightBracket),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = simple {
            self.advance();
            return Ok(token);
        }

        match c {
            '"' | '\'' => self.consume_string(),
            '#' => self.consume_hash(),
            _ if self.starts_number() => Ok(self.consume_number()),
            _ if self.starts_identifier() => self.consume_ident_like(),
            _ => {
                self.advance();
                Ok(Token::Delim(c))
            }
        }
    }

    /// Check if input starts an identifier
    fn starts_identifier(&self) -> bool {
        let mut chars = self.input[self.position..].chars();
        match chars.next() {
            Some('-') => match chars.next() {
                Some(c) if is_ident_start(c) => true,
                Some('-') => true,
                Some('\\') => chars.next().is_some_and(|c| c != '\n'),
                _ => false,
            },
            Some('\\') => chars.next().is_some_and(|c| c != '\n'),
            Some(c) => is_ident_start(c),
            None => false,
        }
    }

    /// Consume a string token
    fn consume_string(&mut self) -> CssResult<Token> {
        let start = self.location();
        let quote = match self.advance() {
            Some(q) => q,
            None => return Err(CssError::unexpected_eof(start)),
        };
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => return Ok(Token::String(value)),
                Some('\\') => match self.peek() {
                    Some('\n') => {
                        self.advance();
                    }
                    Some(_) => value.push(self.consume_escape()),
                    None => {}
                },
                Some('\n') | None => {
                    return Err(CssError::UnterminatedString { span: self.span_from(start) });
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// Consume the body of an escape sequence; the backslash is already consumed
    fn consume_escape(&mut self) -> char {
        let mut hex = String::new();
        while hex.len() < 6 {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.advance();
                }
                _ => break,
            }
        }

        if hex.is_empty() {
            return self.advance().unwrap_or('\u{FFFD}');
        }

        // A single whitespace character terminates a hex escape
        if self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .filter(|&c| c != '\0')
            .unwrap_or('\u{FFFD}')
    }

    /// Consume a hash token
    fn consume_hash(&mut self) -> CssResult<Token> {
        self.advance(); // consume '#'
        let hash_type = if self.starts_identifier() {
            HashType::Id
        } else {
            HashType::Unrestricted
        };
        let value = self.consume_ident_name();
        Ok(Token::Hash(value, hash_type))
    }

    /// Consume an identifier name, resolving escapes
    fn consume_ident_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                name.push(c);
                self.advance();
            } else if c == '\\' && self.peek_second().is_some_and(|c| c != '\n') {
                self.advance();
                name.push(self.consume_escape());
            } else {
                break;
            }
        }
        name
    }

    /// Consume an identifier-like token (ident or function)
    fn consume_ident_like(&mut self) -> CssResult<Token> {
        let name = self.consume_ident_name();

        if self.peek() == Some('(') {
            self.advance(); // consume '('
            return Ok(Token::Function(name));
        }

        Ok(Token::Ident(name))
    }

    /// Check if the next characters start a number
    fn starts_number(&self) -> bool {
        let mut rest = self.input[self.position..].chars();
        let mut first = rest.next();
        if matches!(first, Some('+' | '-')) {
            first = rest.next();
        }
        match first {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => rest.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Consume a number token along with any unit
    fn consume_number(&mut self) -> Token {
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }

        self.consume_digits();

        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        if self.starts_identifier() {
            self.consume_ident_name();
        }

        Token::Number
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Tokenize all remaining input
    pub fn tokenize_all(&mut self) -> CssResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Check if character can start an identifier
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c > '\x7F'
}

/// Check if character can be part of an identifier
fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c == '-' || c.is_ascii_digit()
}
