//! Token model shared by the tokenizer, the rule pipeline and the entity formatter
//!
//! A token is a typed slice of the input. Rules mutate tokens in place;
//! the processed text is the concatenation of all token values.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::entities::table;

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// HTML/XML markup tag, comment, doctype or protected region
    Tag,
    /// WordPress-style `[shortcode]`
    Shortcode,
    Url,
    Email,
    Guid,
    /// Character reference already present in the input (`&lt;`, `&#8470;`)
    HtmlEntity,
    Word,
    /// Single capital letter followed by a dot (`И.`)
    Initial,
    Number,
    /// `(c)`, `(C)`, `(с)`, `&copy;`
    Copyright,
    /// `(r)`, `(R)`
    Registered,
    /// `(tm)`, `(TM)`
    Trademark,
    NewLine,
    Tab,
    Space,
    NonBreakingSpace,
    Hyphen,
    DoubleHyphen,
    NonBreakingHyphen,
    EnDash,
    EmDash,
    Minus,
    Plus,
    Equals,
    Slash,
    Backslash,
    /// Single ellipsis glyph `…`
    Ellipsis,
    /// Three consecutive dots `...`
    ThreeDots,
    Comma,
    Dot,
    /// Quotation mark, see [`QuoteMark`] for the glyph family
    Quote,
    Apostrophe,
    Degree,
    Currency,
    /// Numero sign `№`
    NumeroSign,
    Emoji,
    Punctuation,
    /// Any other single character
    Char,
    /// Token deleted by a rule; renders as nothing and is skipped by navigation
    Removed,
}

impl TokenKind {
    /// Markup tokens are never touched by rules
    pub fn is_markup(self) -> bool {
        matches!(self, TokenKind::Tag | TokenKind::Shortcode)
    }

    /// Regular or non-breaking space
    pub fn is_space(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::NonBreakingSpace)
    }

    /// Hyphen, en-dash or em-dash
    pub fn is_dash(self) -> bool {
        matches!(self, TokenKind::Hyphen | TokenKind::EnDash | TokenKind::EmDash)
    }

    /// Symbols without a dedicated pattern of their own
    pub fn is_symbol(self) -> bool {
        matches!(
            self,
            TokenKind::Char | TokenKind::Currency | TokenKind::NumeroSign
        )
    }

    /// Kebab-case name used in token dumps
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Tag => "tag",
            TokenKind::Shortcode => "shortcode",
            TokenKind::Url => "url",
            TokenKind::Email => "email",
            TokenKind::Guid => "guid",
            TokenKind::HtmlEntity => "html-entity",
            TokenKind::Word => "word",
            TokenKind::Initial => "initial",
            TokenKind::Number => "number",
            TokenKind::Copyright => "copyright",
            TokenKind::Registered => "registered",
            TokenKind::Trademark => "trademark",
            TokenKind::NewLine => "new-line",
            TokenKind::Tab => "tab",
            TokenKind::Space => "space",
            TokenKind::NonBreakingSpace => "non-breaking-space",
            TokenKind::Hyphen => "hyphen",
            TokenKind::DoubleHyphen => "double-hyphen",
            TokenKind::NonBreakingHyphen => "non-breaking-hyphen",
            TokenKind::EnDash => "en-dash",
            TokenKind::EmDash => "em-dash",
            TokenKind::Minus => "minus",
            TokenKind::Plus => "plus",
            TokenKind::Equals => "equals",
            TokenKind::Slash => "slash",
            TokenKind::Backslash => "backslash",
            TokenKind::Ellipsis => "ellipsis",
            TokenKind::ThreeDots => "three-dots",
            TokenKind::Comma => "comma",
            TokenKind::Dot => "dot",
            TokenKind::Quote => "quote",
            TokenKind::Apostrophe => "apostrophe",
            TokenKind::Degree => "degree",
            TokenKind::Currency => "currency",
            TokenKind::NumeroSign => "numero-sign",
            TokenKind::Emoji => "emoji",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Char => "char",
            TokenKind::Removed => "removed",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Glyph family of a quote token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteMark {
    /// `"`
    Straight,
    /// `“`
    LeftDouble,
    /// `”`
    RightDouble,
    /// `„`
    LowDouble,
    /// `«`
    GuillemetOpen,
    /// `»`
    GuillemetClose,
    /// `′`
    Prime,
    /// `″`
    DoublePrime,
}

impl QuoteMark {
    /// Primes are final glyphs and take no part in nesting
    pub fn is_paired(self) -> bool {
        !matches!(self, QuoteMark::Prime | QuoteMark::DoublePrime)
    }

    /// Classify a rendered glyph, if it is one of the known quote marks
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        let mark = match glyph {
            "\"" => QuoteMark::Straight,
            "“" => QuoteMark::LeftDouble,
            "”" => QuoteMark::RightDouble,
            "„" => QuoteMark::LowDouble,
            "«" => QuoteMark::GuillemetOpen,
            "»" => QuoteMark::GuillemetClose,
            "′" => QuoteMark::Prime,
            "″" => QuoteMark::DoublePrime,
            _ => return None,
        };
        Some(mark)
    }
}

/// Identifier of a rule, used in provenance records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    Copyright,
    PlusMinus,
    RegMark,
    Times,
    Trademark,
    HyphenToMinus,
    DoubleHyphenToEmDash,
    HyphenToEmDash,
    EnDashToEmDash,
    EmDashToEnDash,
    NonBreakingHyphen,
    NbspNumber,
    NbspEmDash,
    NbspInitial,
    NbspShortWord,
    ThreeDotsToEllipsis,
    EllipsisToThreeDots,
    Apostrophe,
    Quotes,
}

impl RuleId {
    /// Stable human-readable name
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::Copyright => "Copyright",
            RuleId::PlusMinus => "PlusMinus",
            RuleId::RegMark => "RegMark",
            RuleId::Times => "Times",
            RuleId::Trademark => "Trademark",
            RuleId::HyphenToMinus => "HyphenToMinus",
            RuleId::DoubleHyphenToEmDash => "DoubleHyphenToEmDash",
            RuleId::HyphenToEmDash => "HyphenToEmDash",
            RuleId::EnDashToEmDash => "EnDashToEmDash",
            RuleId::EmDashToEnDash => "EmDashToEnDash",
            RuleId::NonBreakingHyphen => "NonBreakingHyphen",
            RuleId::NbspNumber => "Nbsp::Number",
            RuleId::NbspEmDash => "Nbsp::EmDash",
            RuleId::NbspInitial => "Nbsp::Initial",
            RuleId::NbspShortWord => "Nbsp::ShortWord",
            RuleId::ThreeDotsToEllipsis => "ThreeDotsToEllipsis",
            RuleId::EllipsisToThreeDots => "EllipsisToThreeDots",
            RuleId::Apostrophe => "Apostrophe",
            RuleId::Quotes => "Quotes",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provenance record: which rule looked at a token, from which source
/// line, and whether it changed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleTag {
    pub rule: RuleId,
    pub line: u32,
    pub applied: bool,
}

/// A typed slice of the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Tag name for markup, entity name for entities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Glyph family for quote tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<QuoteMark>,
    pub value: String,
    /// Rule provenance, only recorded in debug mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<SmallVec<[RuleTag; 2]>>,
}

impl Token {
    /// Create a token of the given kind
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: None,
            mark: None,
            value: value.into(),
            provenance: None,
        }
    }

    /// Create a markup token carrying a tag name
    pub fn markup(kind: TokenKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(kind, value)
        }
    }

    /// Create a quote token
    pub fn quote(mark: QuoteMark, value: impl Into<String>) -> Self {
        Self {
            mark: Some(mark),
            ..Self::new(TokenKind::Quote, value)
        }
    }

    /// Glyph this token stands for.
    ///
    /// Entity-valued tokens (`&mdash;`) are decoded; everything else is
    /// returned as is.
    pub fn text(&self) -> Cow<'_, str> {
        if self.kind != TokenKind::HtmlEntity && self.value.starts_with('&') {
            if let Some(c) = table::decode(&self.value) {
                return Cow::Owned(c.to_string());
            }
        }
        Cow::Borrowed(&self.value)
    }

    /// Length in Unicode scalar values
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_removed(&self) -> bool {
        self.kind == TokenKind::Removed
    }

    /// Replace kind and value, keeping provenance
    pub fn set(&mut self, kind: TokenKind, value: impl Into<String>) {
        self.kind = kind;
        self.value = value.into();
        if kind != TokenKind::Quote {
            self.mark = None;
        }
    }

    /// Mark the token as deleted
    pub fn remove(&mut self) {
        self.set(TokenKind::Removed, String::new());
    }

    /// Append a provenance record
    pub fn note(&mut self, tag: RuleTag) {
        self.provenance.get_or_insert_with(SmallVec::new).push(tag);
    }

    /// Whether `rule` has been recorded on this token
    pub fn touched_by(&self, rule: RuleId) -> bool {
        self.provenance
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|tag| tag.rule == rule))
    }
}
