//! Token-based typography formatter
//!
//! Text (optionally embedded in HTML) is split into typed tokens by an
//! ordered pattern table, rewritten in place by an ordered pipeline of
//! context-sensitive rules, passed through the entity formatter and joined
//! back together. Markup, protected regions (`<script>`, `<style>`, `<pre>`,
//! comments), URLs, e-mails and entities already present in the input are
//! never altered.
//!
//! # Architecture
//!
//! - **Tokenizer**: protected-region masking, per-line whitespace
//!   normalization and priority-ordered pattern scanning
//! - **Domain**: the token model, the context navigator and the quote
//!   nesting resolver
//! - **Rules**: dash, non-breaking space, quote, ellipsis and special symbol
//!   rules run in a fixed order over the token stream
//! - **Entities**: named, numeric, hexadecimal or raw output of special
//!   characters
//!
//! # Example
//!
//! ```rust
//! use typograph_core::{format, RuleOptions};
//!
//! let result = format("Мама сказала: \"Привет...\"", &RuleOptions::default());
//! assert_eq!(result.text, "Мама сказала: «Привет…»");
//!
//! let result = format("Труба 3/4\"", &RuleOptions::named());
//! assert_eq!(result.text, "Труба 3/4&Prime;");
//! ```

pub mod api;
pub mod domain;
pub mod entities;
pub mod presets;
pub mod rules;
pub mod tokenizer;

pub use api::{
    format, DashOptions, Ellipsis, Error, Length, Metrics, NbspOptions, ProcessedResult,
    QuotePair, RegMarkStyle, Result, RuleOptions, RuleOptionsBuilder, SpecialOptions, Typograph,
};
pub use domain::{QuoteMark, RuleId, RuleTag, Token, TokenKind};
pub use entities::EntityFormat;
