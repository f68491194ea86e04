//! Tokenizer: splits normalised input into typed tokens
//!
//! Processing order:
//! 1. line endings are unified and protected regions are masked;
//! 2. surrounding blank space is dropped;
//! 3. each line keeps its leading tabs, the rest is trimmed and runs of
//!    spaces/tabs collapse to a single space;
//! 4. lines are scanned with the [pattern table](patterns) and joined with
//!    new-line tokens.
//!
//! Concatenating the values of the produced tokens yields the normalised
//! input exactly.

mod patterns;
pub(crate) mod protect;

use std::borrow::Cow;

use crate::domain::token::{Token, TokenKind};
use patterns::{Pattern, Yield};

/// Output of [`Tokenizer::tokenize`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    /// Number of non-empty-input lines scanned
    pub line_count: usize,
}

/// Stateless tokenizer over the process-wide pattern table
#[derive(Clone, Copy)]
pub struct Tokenizer {
    patterns: &'static [Pattern],
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_trimmable(c: char) -> bool {
    c.is_whitespace() && c != '\u{a0}'
}

fn is_collapsible(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{b}' | '\u{c}')
}

/// Drop trailing whitespace and any blank lines before the first content
fn trim_outer(text: &str) -> &str {
    let text = text.trim_end_matches(is_trimmable);
    match text.find(|c: char| !is_trimmable(c)) {
        Some(first) => match text[..first].rfind('\n') {
            Some(newline) => &text[newline + 1..],
            None => text,
        },
        None => "",
    }
}

/// Keep leading tabs, trim and collapse the rest
fn normalize_line(line: &str) -> String {
    let body = line.trim_start_matches('\t');
    let tabs = &line[..line.len() - body.len()];

    let words: Vec<&str> = body
        .split(is_collapsible)
        .filter(|part| !part.is_empty())
        .collect();
    if words.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(line.len());
    out.push_str(tabs);
    out.push_str(&words.join(" "));
    out
}

impl Tokenizer {
    /// Tokenizer backed by the compiled pattern table
    pub fn new() -> Self {
        Self {
            patterns: patterns::table(),
        }
    }

    /// Split `text` into tokens
    pub fn tokenize(&self, text: &str) -> Tokenized {
        let text: Cow<'_, str> = if text.contains('\r') {
            Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
        } else {
            Cow::Borrowed(text)
        };

        let (masked, regions) = protect::protect(&text);
        let body = trim_outer(&masked);
        if body.is_empty() {
            return Tokenized::default();
        }

        let mut tokens = Vec::with_capacity(body.len() / 3 + 1);
        let mut line_count = 0;
        for (i, line) in body.split('\n').enumerate() {
            if i > 0 {
                tokens.push(Token::new(TokenKind::NewLine, "\n"));
            }
            let line = normalize_line(line);
            self.scan_line(&line, &regions, &mut tokens);
            line_count += 1;
        }

        tracing::debug!(tokens = tokens.len(), lines = line_count, "tokenized input");
        Tokenized { tokens, line_count }
    }

    fn scan_line(&self, line: &str, regions: &[protect::Region], tokens: &mut Vec<Token>) {
        let mut offset = 0;
        let mut prev: Option<char> = None;

        while offset < line.len() {
            let rest = &line[offset..];
            let (token, len) = self.next_token(prev, rest, regions);
            prev = rest[..len].chars().next_back();
            offset += len;
            tokens.push(token);
        }
    }

    fn next_token(
        &self,
        prev: Option<char>,
        rest: &str,
        regions: &[protect::Region],
    ) -> (Token, usize) {
        for pattern in self.patterns {
            if let Some(len) = pattern.match_len(prev, rest) {
                tracing::trace!(pattern = pattern.name, len, "token matched");
                return (build(pattern.yields, &rest[..len], regions), len);
            }
        }

        // Single-character fallback
        let len = rest.chars().next().map_or(rest.len(), char::len_utf8);
        (Token::new(TokenKind::Char, &rest[..len]), len)
    }
}

fn build(yields: Yield, value: &str, regions: &[protect::Region]) -> Token {
    match yields {
        Yield::Kind(TokenKind::Shortcode) => Token::markup(TokenKind::Shortcode, "shortcode", value),
        Yield::Kind(kind) => Token::new(kind, value),
        Yield::Quote(mark) => Token::quote(mark, value),
        Yield::Markup => Token::markup(TokenKind::Tag, protect::tag_name(value), value),
        Yield::Entity => match patterns::classify_entity(value) {
            Yield::Kind(TokenKind::HtmlEntity) => {
                let name = value.trim_start_matches('&').trim_end_matches(';');
                Token::markup(TokenKind::HtmlEntity, name, value)
            }
            classified => build(classified, value, regions),
        },
        Yield::Placeholder => match protect::placeholder_id(value).and_then(|id| regions.get(id)) {
            Some(region) => region.token(),
            None => Token::new(TokenKind::Char, value),
        },
    }
}

/// Concatenate token values
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.value.as_str()).collect()
}
