//! Entity formatting of processed tokens
//!
//! Runs once after the rule pipeline. Markup, entities already present in
//! the input and any value still holding a character reference are left
//! untouched; every other character with an HTML 4.01 name is rewritten in
//! the requested form.

pub mod table;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::api::Error;
use crate::domain::token::{Token, TokenKind};

/// Output form for special characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityFormat {
    /// Literal Unicode characters
    #[default]
    Raw,
    /// Named references (`&laquo;`)
    Named,
    /// Decimal references (`&#171;`)
    Numeric,
    /// Hexadecimal references (`&#xab;`)
    Hex,
}

impl EntityFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityFormat::Raw => "raw",
            EntityFormat::Named => "named",
            EntityFormat::Numeric => "numeric",
            EntityFormat::Hex => "hex",
        }
    }

    /// All formats, in documentation order
    pub fn all() -> [EntityFormat; 4] {
        [
            EntityFormat::Named,
            EntityFormat::Numeric,
            EntityFormat::Hex,
            EntityFormat::Raw,
        ]
    }
}

impl FromStr for EntityFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(EntityFormat::Raw),
            "named" => Ok(EntityFormat::Named),
            "numeric" => Ok(EntityFormat::Numeric),
            "hex" => Ok(EntityFormat::Hex),
            other => Err(Error::Configuration(format!(
                "unknown entity format '{other}', expected named, numeric, hex or raw"
            ))),
        }
    }
}

/// Characters always written as numeric references, even in named form
const NUMERIC_ONLY: [char; 3] = ['\u{301}', '\u{2011}', '\u{2116}'];

/// Ruble sign: no HTML 4.01 name, kept literal in named form
const RUBLE: char = '\u{20bd}';

fn entity_reference() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"&(?:[a-zA-Z0-9]+|#[0-9]{1,7}|#x[0-9a-fA-F]{1,6});").expect("valid pattern")
    })
}

/// Whether `value` already contains a character reference
pub fn contains_reference(value: &str) -> bool {
    value.contains('&') && entity_reference().is_match(value)
}

fn push_numeric(out: &mut String, c: char, format: EntityFormat) {
    // Writing to a String cannot fail
    let _ = match format {
        EntityFormat::Hex => write!(out, "&#x{:x};", u32::from(c)),
        _ => write!(out, "&#{};", u32::from(c)),
    };
}

/// Encode a single value; `None` when nothing changes
pub fn encode(value: &str, format: EntityFormat) -> Option<String> {
    if format == EntityFormat::Raw {
        return None;
    }

    let mut out = String::with_capacity(value.len());
    let mut changed = false;

    for c in value.chars() {
        if NUMERIC_ONLY.contains(&c) {
            push_numeric(&mut out, c, format);
            changed = true;
            continue;
        }
        if c == RUBLE {
            if format == EntityFormat::Named {
                out.push(c);
            } else {
                push_numeric(&mut out, c, format);
                changed = true;
            }
            continue;
        }
        if c == '\'' {
            match format {
                EntityFormat::Named => out.push_str("&#039;"),
                _ => push_numeric(&mut out, c, format),
            }
            changed = true;
            continue;
        }
        match table::name(c) {
            Some(name) => {
                match format {
                    EntityFormat::Named => {
                        out.push('&');
                        out.push_str(name);
                        out.push(';');
                    }
                    _ => push_numeric(&mut out, c, format),
                }
                changed = true;
            }
            None => out.push(c),
        }
    }

    changed.then_some(out)
}

/// Rewrite every eligible token in the requested form
pub fn apply(tokens: &mut [Token], format: EntityFormat) {
    if format == EntityFormat::Raw {
        return;
    }

    let mut rewritten = 0usize;
    for token in tokens.iter_mut() {
        if token.kind.is_markup()
            || matches!(token.kind, TokenKind::HtmlEntity | TokenKind::Removed)
            || contains_reference(&token.value)
        {
            continue;
        }
        if let Some(encoded) = encode(&token.value, format) {
            token.value = encoded;
            rewritten += 1;
        }
    }
    tracing::trace!(rewritten, format = format.as_str(), "entity formatting done");
}
