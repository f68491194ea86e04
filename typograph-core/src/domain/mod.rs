//! Domain layer: token model, context navigation and quote nesting
//!
//! Everything here is pure and operates on borrowed token slices, so the
//! rules in [`crate::rules`] can mutate tokens between lookups.

pub mod navigator;
pub mod quotes;
pub mod text;
pub mod token;

pub use quotes::{QuoteGlyphs, QuoteState};
pub use token::{QuoteMark, RuleId, RuleTag, Token, TokenKind};
