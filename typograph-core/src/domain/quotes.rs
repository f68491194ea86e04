//! Quote nesting resolution
//!
//! Straight and typographic quote marks are re-rendered by nesting depth.
//! Whether a mark opens or closes is decided from its neighbours; pairs are
//! matched by a balance scan over the remaining quote marks. The depth
//! counter lives in [`QuoteState`], owned by a single formatting pass.

use crate::domain::navigator;
use crate::domain::text;
use crate::domain::token::{Token, TokenKind};

const DEFAULT_OPENING: &str = "«";
const DEFAULT_CLOSING: &str = "»";

/// Opening/closing glyph pairs indexed by nesting depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteGlyphs {
    pairs: Vec<(String, String)>,
}

impl QuoteGlyphs {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Opening glyph for `depth`; negative depths clamp to the outermost
    /// pair, depths past the table reuse the last pair
    pub fn opening(&self, depth: i32) -> &str {
        self.pair(depth)
            .map_or(DEFAULT_OPENING, |(open, _)| open.as_str())
    }

    pub fn closing(&self, depth: i32) -> &str {
        self.pair(depth)
            .map_or(DEFAULT_CLOSING, |(_, close)| close.as_str())
    }

    /// Whether `glyph` is the opening glyph of any configured pair
    pub fn is_opener(&self, glyph: &str) -> bool {
        self.pairs.iter().any(|(open, _)| open == glyph)
    }

    fn pair(&self, depth: i32) -> Option<&(String, String)> {
        let depth = usize::try_from(depth.max(0)).unwrap_or(0);
        self.pairs.get(depth).or_else(|| self.pairs.last())
    }
}

/// Nesting state of one formatting pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteState {
    /// Current depth, `-1` outside any quotation
    pub depth: i32,
    /// Whether the innermost quotation is still open
    pub open: bool,
}

impl Default for QuoteState {
    fn default() -> Self {
        Self {
            depth: -1,
            open: false,
        }
    }
}

impl QuoteState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A quote token that takes part in nesting
pub fn is_paired_quote(token: &Token) -> bool {
    token.kind == TokenKind::Quote && token.mark.is_some_and(|mark| mark.is_paired())
}

/// Decide whether the quote at `index` opens a quotation
pub fn is_opening(tokens: &[Token], index: usize, glyphs: &QuoteGlyphs) -> bool {
    let Some(prev) = navigator::prev(tokens, index, &[]) else {
        return true;
    };
    let prev_token = &tokens[prev];
    let prev_text = prev_token.text();

    if prev_token.kind == TokenKind::NewLine
        || prev_text.ends_with('(')
        || prev_text.ends_with('[')
        || glyphs.is_opener(&prev_text)
    {
        return true;
    }

    if let Some(next) = navigator::next(tokens, index, &[]) {
        if text::starts_with_alphanumeric(&tokens[next].text()) {
            return true;
        }
    }

    !text::ends_with_word_or_mark(&prev_text)
}

/// Index of the quote closing the one opened at `index`
pub fn find_closing(tokens: &[Token], index: usize, glyphs: &QuoteGlyphs) -> Option<usize> {
    let mut balance = 1usize;
    for i in index + 1..tokens.len() {
        if !is_paired_quote(&tokens[i]) {
            continue;
        }
        if is_opening(tokens, i, glyphs) {
            balance += 1;
        } else {
            balance -= 1;
            if balance == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Index of the quote opening the one closed at `index`
pub fn find_opening(tokens: &[Token], index: usize, glyphs: &QuoteGlyphs) -> Option<usize> {
    let mut balance = 1usize;
    for i in (0..index).rev() {
        if !is_paired_quote(&tokens[i]) {
            continue;
        }
        if is_opening(tokens, i, glyphs) {
            balance -= 1;
            if balance == 0 {
                return Some(i);
            }
        } else {
            balance += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::QuoteMark;

    fn glyphs() -> QuoteGlyphs {
        QuoteGlyphs::new(vec![
            ("«".to_string(), "»".to_string()),
            ("„".to_string(), "“".to_string()),
        ])
    }

    fn quote() -> Token {
        Token::quote(QuoteMark::Straight, "\"")
    }

    fn word(value: &str) -> Token {
        Token::new(TokenKind::Word, value)
    }

    #[test]
    fn test_glyph_depth_clamping() {
        let glyphs = glyphs();
        assert_eq!(glyphs.opening(-1), "«");
        assert_eq!(glyphs.opening(1), "„");
        assert_eq!(glyphs.closing(5), "“");
        assert_eq!(QuoteGlyphs::new(Vec::new()).opening(0), "«");
    }

    #[test]
    fn test_opening_heuristics() {
        let glyphs = glyphs();
        let tokens = vec![quote(), word("a"), quote()];
        assert!(is_opening(&tokens, 0, &glyphs));
        assert!(!is_opening(&tokens, 2, &glyphs));

        let tokens = vec![
            word("a"),
            Token::new(TokenKind::Space, " "),
            quote(),
            word("b"),
        ];
        assert!(is_opening(&tokens, 2, &glyphs));
    }

    #[test]
    fn test_balance_matching() {
        let glyphs = glyphs();
        // "a "b" c"
        let tokens = vec![
            quote(),
            word("a"),
            Token::new(TokenKind::Space, " "),
            quote(),
            word("b"),
            quote(),
            Token::new(TokenKind::Space, " "),
            word("c"),
            quote(),
        ];
        assert_eq!(find_closing(&tokens, 0, &glyphs), Some(8));
        assert_eq!(find_closing(&tokens, 3, &glyphs), Some(5));
        assert_eq!(find_opening(&tokens, 8, &glyphs), Some(0));
        assert_eq!(find_opening(&tokens, 5, &glyphs), Some(3));
    }

    #[test]
    fn test_primes_are_not_paired() {
        let prime = Token::quote(QuoteMark::DoublePrime, "″");
        assert!(!is_paired_quote(&prime));
        assert!(is_paired_quote(&quote()));
    }

    #[test]
    fn test_state_starts_outside() {
        let state = QuoteState::new();
        assert_eq!(state.depth, -1);
        assert!(!state.open);
    }
}
