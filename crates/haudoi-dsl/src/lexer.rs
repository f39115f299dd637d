//! Query lexer (tokenizer).
//!
//! Splits a query string into a flat sequence of `field:value` pairs and loose
//! strings. Values may be bare (up to the next whitespace) or quoted with `"`,
//! `'` or `` ` ``. Colons inside quotes never separate a field from its value,
//! and an unterminated quote runs to the end of input.

use crate::error::DslError;

/// Maximum number of tokens accepted in one query.
pub const MAX_TOKENS: usize = 5;

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A `field:value` pair, with the value already unquoted.
    FieldValue {
        /// Field name as written.
        field: String,
        /// Raw value.
        value: String,
    },

    /// A value with no field prefix.
    Loose(String),
}

/// Returns true for the characters that open and close a quoted value.
fn is_quote(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '`')
}

/// Returns true for characters that separate terms.
///
/// This is Unicode whitespace plus U+FEFF (zero width no-break space), which
/// pasted text often carries as a byte order mark.
pub(crate) fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Checks whether a registered field name can ever be produced by the lexer.
///
/// The field part of a term ends at the first colon, so names containing a
/// colon, whitespace, or a quote character are unreachable from query text.
pub fn is_queryable_field_name(name: &str) -> bool {
    is_field_name(name) && !name.contains(':')
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Tokenizes the entire input, failing as soon as the token ceiling is passed.
    fn tokenize(mut self) -> Result<Vec<Token>, DslError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if is_separator(ch) {
                self.position += ch.len_utf8();
                continue;
            }

            match self.read_token(self.position) {
                Some((token, end)) => {
                    tokens.push(token);
                    self.position = end;
                }
                // Nothing readable here; step over one character so the scan always advances.
                None => self.position += ch.len_utf8(),
            }

            if tokens.len() > MAX_TOKENS {
                return Err(DslError::ComplexityExceeded { limit: MAX_TOKENS });
            }
        }

        Ok(tokens)
    }

    /// Returns the character at the current position.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Reads one token starting at `start`, returning it with the byte offset just past it.
    fn read_token(&self, start: usize) -> Option<(Token, usize)> {
        if let Some(colon) = self.find_colon(start) {
            let field = &self.input[start..colon];
            if is_field_name(field)
                && let Some((value, end)) = self.read_value(colon + 1)
            {
                return Some((
                    Token::FieldValue {
                        field: field.to_string(),
                        value,
                    },
                    end,
                ));
            }
        }

        self.read_value(start)
            .map(|(value, end)| (Token::Loose(value), end))
    }

    /// Finds the first colon outside quotes before the next separator.
    ///
    /// Quoted regions are skipped without inspecting their contents.
    fn find_colon(&self, start: usize) -> Option<usize> {
        let mut quote: Option<char> = None;

        for (offset, ch) in self.input[start..].char_indices() {
            match quote {
                Some(open) => {
                    if ch == open {
                        quote = None;
                    }
                }
                None => match ch {
                    ':' => return Some(start + offset),
                    c if is_quote(c) => quote = Some(c),
                    c if is_separator(c) => return None,
                    _ => {}
                },
            }
        }

        None
    }

    /// Reads a quoted or bare value starting at `start`.
    ///
    /// Returns `None` when no value is present: at end of input, or when a bare
    /// value would be empty because `start` is whitespace.
    fn read_value(&self, start: usize) -> Option<(String, usize)> {
        let rest = self.input.get(start..).filter(|rest| !rest.is_empty())?;
        let first = rest.chars().next()?;

        if is_quote(first) {
            let body_start = start + first.len_utf8();
            let body = &self.input[body_start..];
            return Some(match body.find(first) {
                Some(close) => (
                    body[..close].to_string(),
                    body_start + close + first.len_utf8(),
                ),
                None => (body.to_string(), self.input.len()),
            });
        }

        let len = rest.find(is_separator).unwrap_or(rest.len());
        if len == 0 {
            return None;
        }

        Some((rest[..len].to_string(), start + len))
    }
}

/// Checks that a candidate field name is non-empty and free of whitespace and quotes.
fn is_field_name(candidate: &str) -> bool {
    !candidate.is_empty()
        && !candidate
            .chars()
            .any(|ch| is_separator(ch) || is_quote(ch))
}

/// Tokenizes a query string.
///
/// Fails with [`DslError::ComplexityExceeded`] as soon as more than
/// [`MAX_TOKENS`] tokens have been read.
pub fn tokenize(input: &str) -> Result<Vec<Token>, DslError> {
    Lexer::new(input).tokenize()
}
