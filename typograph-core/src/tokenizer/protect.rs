//! Protected regions
//!
//! Content that must survive byte-for-byte (comments, `<script>`, `<style>`,
//! `<pre>`, block shortcodes, tags spanning several lines) is swapped for a
//! placeholder before line normalisation and restored as a single markup
//! token during scanning.
//!
//! Regions may nest (a comment inside `<pre>`, `<pre>` inside a block
//! shortcode): the outer region's text is unmasked before it is handed back.
//! Sentinel characters already present in the input are masked first, so
//! they never read as placeholders.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::token::{Token, TokenKind};

const OPEN: char = '\u{e000}';
const CLOSE: char = '\u{e001}';

/// A region cut out of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Region {
    pub(crate) kind: TokenKind,
    pub(crate) name: String,
    pub(crate) text: String,
}

impl Region {
    /// Token restored in place of the placeholder
    pub(crate) fn token(&self) -> Token {
        match self.kind {
            TokenKind::Char => Token::new(self.kind, self.text.clone()),
            kind => Token::markup(kind, self.name.clone(), self.text.clone()),
        }
    }
}

struct Protector {
    name: &'static str,
    regex: Regex,
}

fn protectors() -> &'static [Protector] {
    static PROTECTORS: OnceLock<Vec<Protector>> = OnceLock::new();
    PROTECTORS.get_or_init(|| {
        [
            ("comment", r"(?s)<!--.*?-->"),
            ("cdata", r"(?s)<!\[CDATA\[.*?\]\]>"),
            ("doctype", r"(?i)<!DOCTYPE\b[^>]*>"),
            ("pi", r"(?s)<\?.*?\?>"),
            ("script", r"(?is)<script\b[^>]*>.*?</script\s*>"),
            ("style", r"(?is)<style\b[^>]*>.*?</style\s*>"),
            ("pre", r"(?is)<pre\b[^>]*>.*?</pre\s*>"),
        ]
        .into_iter()
        .map(|(name, pattern)| Protector {
            name,
            regex: Regex::new(pattern).expect("valid protection pattern"),
        })
        .collect()
    })
}

fn shortcode_opener() -> &'static Regex {
    static OPENER: OnceLock<Regex> = OnceLock::new();
    OPENER.get_or_init(|| {
        Regex::new(r#"\[([a-zA-Z][a-zA-Z0-9_-]*)\b(?:[^\]"]*|"[^"]*")*\]"#)
            .expect("valid shortcode pattern")
    })
}

fn any_tag() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"</?([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").expect("valid tag pattern")
    })
}

fn placeholder(id: usize) -> String {
    format!("{OPEN}{id}{CLOSE}")
}

/// Length of a placeholder at the start of `rest`
pub(crate) fn scan_placeholder(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix(OPEN)?;
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !body[digits..].starts_with(CLOSE) {
        return None;
    }
    Some(OPEN.len_utf8() + digits + CLOSE.len_utf8())
}

/// Region id encoded in a placeholder
pub(crate) fn placeholder_id(value: &str) -> Option<usize> {
    value
        .strip_prefix(OPEN)?
        .strip_suffix(CLOSE)?
        .parse()
        .ok()
}

/// Lower-cased tag name of a markup slice
pub(crate) fn tag_name(value: &str) -> String {
    if value.starts_with("<!--") {
        return "comment".to_string();
    }
    if value.starts_with("<!") {
        return "doctype".to_string();
    }
    any_tag()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Replace every protected region with a placeholder
pub(crate) fn protect(text: &str) -> (String, Vec<Region>) {
    let mut regions = Vec::new();
    let mut masked = mask_sentinels(text, &mut regions);
    if !masked.contains(['<', '[']) {
        return (masked, regions);
    }

    for protector in protectors() {
        if !protector.regex.is_match(&masked) {
            continue;
        }
        masked = protector
            .regex
            .replace_all(&masked, |caps: &regex::Captures<'_>| {
                regions.push(Region {
                    kind: TokenKind::Tag,
                    name: protector.name.to_string(),
                    text: caps[0].to_string(),
                });
                placeholder(regions.len() - 1)
            })
            .into_owned();
    }

    masked = protect_block_shortcodes(&masked, &mut regions);
    masked = protect_multiline_tags(&masked, &mut regions);
    unmask_nested(&mut regions);

    if !regions.is_empty() {
        tracing::trace!(regions = regions.len(), "protected regions");
    }
    (masked, regions)
}

/// Literal sentinels become single-character regions
fn mask_sentinels(text: &str, regions: &mut Vec<Region>) -> String {
    if !text.contains([OPEN, CLOSE]) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c == OPEN || c == CLOSE {
            regions.push(Region {
                kind: TokenKind::Char,
                name: String::new(),
                text: c.to_string(),
            });
            out.push_str(&placeholder(regions.len() - 1));
        } else {
            out.push(c);
        }
    }
    out
}

/// Restore placeholders captured inside later regions.
///
/// A region only ever contains placeholders of regions created before it,
/// so a single forward pass leaves every text fully unmasked.
fn unmask_nested(regions: &mut [Region]) {
    for i in 0..regions.len() {
        if regions[i].text.contains(OPEN) {
            let (done, rest) = regions.split_at_mut(i);
            rest[0].text = unmask(&rest[0].text, done);
        }
    }
}

fn unmask(text: &str, regions: &[Region]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let inner = scan_placeholder(tail).and_then(|len| {
            let id = placeholder_id(&tail[..len])?;
            regions.get(id).map(|region| (len, region))
        });
        let consumed = match inner {
            Some((len, region)) => {
                out.push_str(&region.text);
                len
            }
            None => {
                out.push(OPEN);
                OPEN.len_utf8()
            }
        };
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

/// `[name ...]...[/name]` as a single region
fn protect_block_shortcodes(text: &str, regions: &mut Vec<Region>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for caps in shortcode_opener().captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() < cursor {
            continue;
        }
        let closing = format!("[/{}]", name.as_str());
        let Some(offset) = text[whole.end()..].find(&closing) else {
            continue;
        };
        let end = whole.end() + offset + closing.len();

        out.push_str(&text[cursor..whole.start()]);
        regions.push(Region {
            kind: TokenKind::Shortcode,
            name: name.as_str().to_string(),
            text: text[whole.start()..end].to_string(),
        });
        out.push_str(&placeholder(regions.len() - 1));
        cursor = end;
    }

    out.push_str(&text[cursor..]);
    out
}

fn protect_multiline_tags(text: &str, regions: &mut Vec<Region>) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    any_tag()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let whole = &caps[0];
            if !whole.contains('\n') {
                return whole.to_string();
            }
            regions.push(Region {
                kind: TokenKind::Tag,
                name: caps[1].to_ascii_lowercase(),
                text: whole.to_string(),
            });
            placeholder(regions.len() - 1)
        })
        .into_owned()
}
