//! Non-breaking space placement
//!
//! Each rule looks at the space before and the space after its anchor token
//! and converts it when the neighbourhood calls for it. Only regular spaces
//! are ever converted, see [`set_nbsp`](crate::rules::set_nbsp).

pub mod em_dash;
pub mod initial;
pub mod number;
pub mod short_word;

/// Convert a space, recording the calling line as provenance
macro_rules! nbsp {
    ($tokens:expr, $index:expr, $rule:expr, $pass:expr) => {
        $crate::rules::set_nbsp($tokens, $index, $rule, line!(), $pass)
    };
}
pub(crate) use nbsp;

use crate::domain::token::{Token, TokenKind};

/// Kind of the token at an optional index
pub(crate) fn kind_at(tokens: &[Token], index: Option<usize>) -> Option<TokenKind> {
    index.map(|i| tokens[i].kind)
}

/// Kinds joined to a number or word by a hyphen-like glyph
pub(crate) const HYPHENS: [TokenKind; 4] = [
    TokenKind::Hyphen,
    TokenKind::NonBreakingHyphen,
    TokenKind::EnDash,
    TokenKind::EmDash,
];
