//! Pattern table: ordered recognisers tried at each offset of a line
//!
//! The first recogniser matching at the current offset wins, so the order
//! encodes priority (markup before words, `--` before `-`, `...` before
//! `.`). All patterns are compiled once per process.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::token::{QuoteMark, TokenKind};
use crate::tokenizer::protect;

/// What a matched slice becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Yield {
    Kind(TokenKind),
    Quote(QuoteMark),
    /// HTML tag; the tag name is extracted from the match
    Markup,
    /// Character reference, classified by name
    Entity,
    /// Protected region placeholder
    Placeholder,
}

enum Matcher {
    Regex(Regex),
    Scan(fn(&str) -> Option<usize>),
}

/// Context check on the character before the match and the text after it
type Guard = fn(Option<char>, &str) -> bool;

pub(crate) struct Pattern {
    pub(crate) name: &'static str,
    pub(crate) yields: Yield,
    matcher: Matcher,
    guard: Option<Guard>,
}

impl Pattern {
    fn regex(name: &'static str, pattern: &str, yields: Yield) -> Self {
        // Table patterns are literals covered by tests
        let regex = Regex::new(&format!("^(?:{pattern})")).expect("valid token pattern");
        Self {
            name,
            yields,
            matcher: Matcher::Regex(regex),
            guard: None,
        }
    }

    fn scan(name: &'static str, scan: fn(&str) -> Option<usize>, yields: Yield) -> Self {
        Self {
            name,
            yields,
            matcher: Matcher::Scan(scan),
            guard: None,
        }
    }

    fn guarded(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Byte length of the match at the start of `rest`, if any
    pub(crate) fn match_len(&self, prev: Option<char>, rest: &str) -> Option<usize> {
        let len = match &self.matcher {
            Matcher::Regex(re) => re.find(rest).map(|m| m.end()),
            Matcher::Scan(scan) => scan(rest),
        }?;
        if len == 0 {
            return None;
        }
        match self.guard {
            Some(guard) if !guard(prev, &rest[len..]) => None,
            _ => Some(len),
        }
    }
}

/// Initials follow a line start, whitespace or an opening bracket and are
/// not the first dot of an ellipsis
fn initial_guard(prev: Option<char>, after: &str) -> bool {
    let prev_ok = match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '(' | '[' | '«' | '"' | '„' | '“'),
    };
    prev_ok && !after.starts_with('.')
}

fn not_followed_by_dot(_prev: Option<char>, after: &str) -> bool {
    !after.starts_with('.')
}

fn is_pictographic(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1FAFF
            | 0x2600..=0x27BF
            | 0x231A..=0x231B
            | 0x23E9..=0x23FA
            | 0x2B50
            | 0x2B55
    )
}

/// One grapheme cluster that renders as an emoji
fn scan_emoji(rest: &str) -> Option<usize> {
    let cluster = rest.graphemes(true).next()?;
    let first = cluster.chars().next()?;
    (is_pictographic(first) || cluster.contains('\u{fe0f}')).then_some(cluster.len())
}

/// The pattern table, built on first use
pub(crate) fn table() -> &'static [Pattern] {
    static TABLE: OnceLock<Vec<Pattern>> = OnceLock::new();
    TABLE.get_or_init(build)
}

const WORD_CHARS: &str = r"\p{L}\p{M}\p{Nd}'‘’ʼ";

fn build() -> Vec<Pattern> {
    use TokenKind as K;
    use Yield::{Kind, Quote};

    let word = format!(r"\b[{WORD_CHARS}]+(?:-[\p{{L}}\p{{M}}'‘’ʼ][{WORD_CHARS}]*)*\b");

    vec![
        Pattern::scan("placeholder", protect::scan_placeholder, Yield::Placeholder),
        Pattern::regex(
            "entity",
            r"&(?:[a-zA-Z][a-zA-Z0-9]*|#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6});",
            Yield::Entity,
        ),
        Pattern::regex(
            "tag",
            r"</?[a-zA-Z][a-zA-Z0-9]*(?::[a-zA-Z0-9-]+)?\b[^>]*>|<!--.*?-->|<!DOCTYPE[^>]*>",
            Yield::Markup,
        ),
        Pattern::regex(
            "shortcode",
            r#"\[/?[a-zA-Z][a-zA-Z0-9_-]*\b(?:[^\]"]*|"[^"]*")*\]"#,
            Kind(K::Shortcode),
        ),
        Pattern::regex("url", r#"(?i)(?:https?://|www\.)[^\s<>"']+"#, Kind(K::Url)),
        Pattern::regex(
            "email",
            r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b",
            Kind(K::Email),
        ),
        Pattern::regex(
            "guid",
            r"[{(]?[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}[})]?",
            Kind(K::Guid),
        ),
        Pattern::regex("double-hyphen", r"--", Kind(K::DoubleHyphen)),
        Pattern::regex("initial", r"\p{Lu}\.", Kind(K::Initial)).guarded(initial_guard),
        Pattern::regex("number", r"\d+(?:[.,]\d+)?", Kind(K::Number)),
        Pattern::regex("copyright", r"\([cCсС]\)", Kind(K::Copyright)),
        Pattern::regex("registered", r"\([rR]\)", Kind(K::Registered)),
        Pattern::regex("trademark", r"\([tT][mM]\)", Kind(K::Trademark)),
        Pattern::regex("word", &word, Kind(K::Word)),
        Pattern::regex("new-line", r"\n", Kind(K::NewLine)),
        Pattern::regex("tab", r"\t", Kind(K::Tab)),
        Pattern::regex("hyphen", r"-", Kind(K::Hyphen)),
        Pattern::regex("non-breaking-hyphen", "\u{2011}", Kind(K::NonBreakingHyphen)),
        Pattern::regex("en-dash", "–", Kind(K::EnDash)),
        Pattern::regex("em-dash", "—", Kind(K::EmDash)),
        Pattern::regex("minus", "−", Kind(K::Minus)),
        Pattern::regex("plus", r"\+", Kind(K::Plus)),
        Pattern::regex("equals", "=", Kind(K::Equals)),
        Pattern::regex("slash", "/", Kind(K::Slash)),
        Pattern::regex("backslash", r"\\", Kind(K::Backslash)),
        Pattern::regex("ellipsis", "…", Kind(K::Ellipsis)),
        Pattern::regex("three-dots", r"\.\.\.", Kind(K::ThreeDots)).guarded(not_followed_by_dot),
        Pattern::regex("comma", ",", Kind(K::Comma)),
        Pattern::regex("dot", r"\.", Kind(K::Dot)),
        Pattern::regex("double-prime", "″", Quote(QuoteMark::DoublePrime)),
        Pattern::regex("prime", "′", Quote(QuoteMark::Prime)),
        Pattern::regex("quot", "\"", Quote(QuoteMark::Straight)),
        Pattern::regex("ldquo", "“", Quote(QuoteMark::LeftDouble)),
        Pattern::regex("rdquo", "”", Quote(QuoteMark::RightDouble)),
        Pattern::regex("bdquo", "„", Quote(QuoteMark::LowDouble)),
        Pattern::regex("laquo", "«", Quote(QuoteMark::GuillemetOpen)),
        Pattern::regex("raquo", "»", Quote(QuoteMark::GuillemetClose)),
        Pattern::regex("apostrophe", "'", Kind(K::Apostrophe)),
        Pattern::regex("nbsp", "\u{a0}", Kind(K::NonBreakingSpace)),
        Pattern::regex("space", r"[\s&&[^\n\u{a0}]]", Kind(K::Space)),
        Pattern::regex("degree", "°|℃|℉", Kind(K::Degree)),
        Pattern::regex("numero", "№", Kind(K::NumeroSign)),
        Pattern::regex("currency", r"\p{Sc}", Kind(K::Currency)),
        Pattern::scan("emoji", scan_emoji, Kind(K::Emoji)),
        Pattern::regex("punctuation", r"\p{P}", Kind(K::Punctuation)),
    ]
}

/// Kind of a character reference, keyed by its name
pub(crate) fn classify_entity(entity: &str) -> Yield {
    let name = entity.trim_start_matches('&').trim_end_matches(';');
    match name {
        "nbsp" | "#160" | "#xA0" | "#xa0" => Yield::Kind(TokenKind::NonBreakingSpace),
        "mdash" | "#8212" => Yield::Kind(TokenKind::EmDash),
        "ndash" | "#8211" => Yield::Kind(TokenKind::EnDash),
        "minus" => Yield::Kind(TokenKind::Minus),
        "hellip" => Yield::Kind(TokenKind::Ellipsis),
        "copy" => Yield::Kind(TokenKind::Copyright),
        "plus" => Yield::Kind(TokenKind::Plus),
        "equals" => Yield::Kind(TokenKind::Equals),
        "quot" | "#34" => Yield::Quote(QuoteMark::Straight),
        "laquo" => Yield::Quote(QuoteMark::GuillemetOpen),
        "raquo" => Yield::Quote(QuoteMark::GuillemetClose),
        "ldquo" => Yield::Quote(QuoteMark::LeftDouble),
        "rdquo" => Yield::Quote(QuoteMark::RightDouble),
        "bdquo" => Yield::Quote(QuoteMark::LowDouble),
        "Prime" => Yield::Quote(QuoteMark::DoublePrime),
        "prime" => Yield::Quote(QuoteMark::Prime),
        _ => Yield::Kind(TokenKind::HtmlEntity),
    }
}
