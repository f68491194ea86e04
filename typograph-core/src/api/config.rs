//! Rule options
//!
//! Option keys follow the kebab-case names of the rule families
//! (`hyphen-to-mdash`, `short-word`, `plus-minus`, ...). The `dash`, `nbsp`
//! and `special` sections accept `false`, `null` or `[]` to switch the whole
//! family off, `true` for its defaults, or a table merged over the defaults.

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::api::{Error, Result};
use crate::entities::EntityFormat;

/// Default configuration constants
pub mod defaults {
    /// Length threshold used when a length option is set to `true`
    pub const LENGTH: usize = 2;

    /// Outer and inner quotation marks
    pub const QUOTES: [(&str, &str); 2] = [("«", "»"), ("„", "“")];
}

/// Direction of ellipsis normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ellipsis {
    /// `...` becomes `…`
    #[default]
    #[serde(alias = "to-ellipsis-char")]
    Hellip,
    /// `…` becomes `...`
    #[serde(alias = "to-three-dots")]
    Dots,
    /// Leave ellipses alone
    None,
}

/// Rendering of `(r)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegMarkStyle {
    /// `<sup class="reg">&reg;</sup>` markup
    #[default]
    Superscript,
    /// Literal `®`
    Symbol,
}

/// A length-limited rule: off, or on with a maximum length.
///
/// Deserializes from a boolean (`true` means the default length) or a
/// positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "LengthRepr")]
pub enum Length {
    Off,
    Max(usize),
}

impl Length {
    /// Maximum length when enabled
    pub fn max(self) -> Option<usize> {
        match self {
            Length::Off => None,
            Length::Max(max) => Some(max),
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Max(defaults::LENGTH)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Flag(bool),
    Max(i64),
}

impl TryFrom<LengthRepr> for Length {
    type Error = String;

    fn try_from(repr: LengthRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            LengthRepr::Flag(false) => Ok(Length::Off),
            LengthRepr::Flag(true) => Ok(Length::default()),
            LengthRepr::Max(max) => usize::try_from(max)
                .ok()
                .filter(|&max| max > 0)
                .map(Length::Max)
                .ok_or_else(|| format!("length must be positive, got {max}")),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(length: Length) -> Self {
        match length {
            Length::Off => LengthRepr::Flag(false),
            Length::Max(max) => LengthRepr::Max(i64::try_from(max).unwrap_or(i64::MAX)),
        }
    }
}

/// Opening and closing glyph of one nesting level
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct QuotePair {
    pub open: String,
    pub close: String,
}

impl QuotePair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl From<(String, String)> for QuotePair {
    fn from((open, close): (String, String)) -> Self {
        Self { open, close }
    }
}

impl From<QuotePair> for (String, String) {
    fn from(pair: QuotePair) -> Self {
        (pair.open, pair.close)
    }
}

/// Hyphen, dash and minus rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DashOptions {
    /// `--` and spaced hyphens become em-dashes
    pub hyphen_to_mdash: bool,
    /// A hyphen before a number becomes a minus sign
    pub hyphen_to_minus: bool,
    /// Em-dashes in number ranges become en-dashes
    pub mdash_to_ndash: bool,
    /// Spaced en-dashes become em-dashes
    pub ndash_to_mdash: bool,
    /// Hyphens in short compounds become non-breaking
    pub hyphen_to_nbhy: Length,
}

impl Default for DashOptions {
    fn default() -> Self {
        Self {
            hyphen_to_mdash: true,
            hyphen_to_minus: true,
            mdash_to_ndash: true,
            ndash_to_mdash: true,
            hyphen_to_nbhy: Length::default(),
        }
    }
}

/// Non-breaking space rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct NbspOptions {
    pub initial: bool,
    pub mdash: bool,
    pub number: bool,
    pub short_word: Length,
}

impl Default for NbspOptions {
    fn default() -> Self {
        Self {
            initial: true,
            mdash: true,
            number: true,
            short_word: Length::default(),
        }
    }
}

/// Special symbol rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SpecialOptions {
    pub copyright: bool,
    pub plus_minus: bool,
    pub reg_mark: bool,
    pub reg_mark_style: RegMarkStyle,
    pub times: bool,
    pub trade: bool,
}

impl Default for SpecialOptions {
    fn default() -> Self {
        Self {
            copyright: true,
            plus_minus: true,
            reg_mark: true,
            reg_mark_style: RegMarkStyle::default(),
            times: true,
            trade: true,
        }
    }
}

impl DashOptions {
    /// Every dash rule off
    pub fn disabled() -> Self {
        Self {
            hyphen_to_mdash: false,
            hyphen_to_minus: false,
            mdash_to_ndash: false,
            ndash_to_mdash: false,
            hyphen_to_nbhy: Length::Off,
        }
    }
}

impl NbspOptions {
    /// Every non-breaking space rule off
    pub fn disabled() -> Self {
        Self {
            initial: false,
            mdash: false,
            number: false,
            short_word: Length::Off,
        }
    }
}

impl SpecialOptions {
    /// Every special symbol rule off
    pub fn disabled() -> Self {
        Self {
            copyright: false,
            plus_minus: false,
            reg_mark: false,
            reg_mark_style: RegMarkStyle::default(),
            times: false,
            trade: false,
        }
    }
}

/// A rule family that can be switched off as a whole
trait Section: Default {
    fn off() -> Self;
}

impl Section for DashOptions {
    fn off() -> Self {
        Self::disabled()
    }
}

impl Section for NbspOptions {
    fn off() -> Self {
        Self::disabled()
    }
}

impl Section for SpecialOptions {
    fn off() -> Self {
        Self::disabled()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SectionRepr<T> {
    Flag(bool),
    List(Vec<IgnoredAny>),
    Table(T),
}

fn section<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Section + Deserialize<'de>,
{
    match Option::<SectionRepr<T>>::deserialize(deserializer)? {
        None | Some(SectionRepr::Flag(false)) => Ok(T::off()),
        Some(SectionRepr::Flag(true)) => Ok(T::default()),
        Some(SectionRepr::List(items)) if items.is_empty() => Ok(T::off()),
        Some(SectionRepr::List(_)) => Err(de::Error::custom(
            "expected a table, a boolean or an empty list",
        )),
        Some(SectionRepr::Table(options)) => Ok(options),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuotesRepr {
    Flag(bool),
    Pairs(Vec<QuotePair>),
}

fn quotes<'de, D>(deserializer: D) -> std::result::Result<Vec<QuotePair>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<QuotesRepr>::deserialize(deserializer)? {
        None | Some(QuotesRepr::Flag(false)) => Ok(Vec::new()),
        Some(QuotesRepr::Flag(true)) => Ok(default_quotes()),
        Some(QuotesRepr::Pairs(pairs)) => Ok(pairs),
    }
}

fn default_quotes() -> Vec<QuotePair> {
    defaults::QUOTES
        .iter()
        .map(|&(open, close)| QuotePair::new(open, close))
        .collect()
}

/// Which rules run, with their parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleOptions {
    /// Output form of special characters
    pub entities: EntityFormat,
    pub ellipsis: Ellipsis,
    /// Quote glyphs by nesting depth; empty disables quote and apostrophe rules
    #[serde(deserialize_with = "quotes")]
    pub quotes: Vec<QuotePair>,
    #[serde(deserialize_with = "section")]
    pub dash: DashOptions,
    #[serde(deserialize_with = "section")]
    pub nbsp: NbspOptions,
    #[serde(deserialize_with = "section")]
    pub special: SpecialOptions,
    /// Record rule provenance on every token
    pub debug: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            entities: EntityFormat::default(),
            ellipsis: Ellipsis::default(),
            quotes: default_quotes(),
            dash: DashOptions::default(),
            nbsp: NbspOptions::default(),
            special: SpecialOptions::default(),
            debug: false,
        }
    }
}

impl RuleOptions {
    /// Create an options builder
    pub fn builder() -> RuleOptionsBuilder {
        RuleOptionsBuilder::default()
    }

    /// Defaults with literal characters in the output
    pub fn raw() -> Self {
        Self::default()
    }

    /// Defaults with named entities in the output
    pub fn named() -> Self {
        Self {
            entities: EntityFormat::Named,
            ..Self::default()
        }
    }

    /// Every rule family switched off
    pub fn disabled() -> Self {
        Self {
            ellipsis: Ellipsis::None,
            quotes: Vec::new(),
            dash: DashOptions::disabled(),
            nbsp: NbspOptions::disabled(),
            special: SpecialOptions::disabled(),
            ..Self::default()
        }
    }

    /// Look up an embedded preset by name
    pub fn preset(name: &str) -> Result<Self> {
        crate::presets::get(name)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: Self = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a `.toml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            Some("toml") | None => Self::from_toml_str(&source),
            Some(other) => Err(Error::Configuration(format!(
                "unsupported options file extension: .{other}"
            ))),
        }
    }

    /// Validate the options
    pub(crate) fn validate(&self) -> Result<()> {
        if self.dash.hyphen_to_nbhy == Length::Max(0) || self.nbsp.short_word == Length::Max(0) {
            return Err(Error::Configuration(
                "length limits must be greater than 0".into(),
            ));
        }
        if let Some(pair) = self
            .quotes
            .iter()
            .find(|pair| pair.open.is_empty() || pair.close.is_empty())
        {
            return Err(Error::Configuration(format!(
                "quote glyphs must not be empty, got ({:?}, {:?})",
                pair.open, pair.close
            )));
        }
        Ok(())
    }
}

/// Fluent builder for rule options
#[derive(Debug, Default)]
pub struct RuleOptionsBuilder {
    options: RuleOptions,
}

impl RuleOptionsBuilder {
    /// Start from the default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(mut self, format: EntityFormat) -> Self {
        self.options.entities = format;
        self
    }

    pub fn ellipsis(mut self, ellipsis: Ellipsis) -> Self {
        self.options.ellipsis = ellipsis;
        self
    }

    /// Replace the quote glyph table; an empty table disables quote rules
    pub fn quotes<I, O, C>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (O, C)>,
        O: Into<String>,
        C: Into<String>,
    {
        self.options.quotes = pairs
            .into_iter()
            .map(|(open, close)| QuotePair::new(open, close))
            .collect();
        self
    }

    pub fn dash(mut self, dash: DashOptions) -> Self {
        self.options.dash = dash;
        self
    }

    pub fn nbsp(mut self, nbsp: NbspOptions) -> Self {
        self.options.nbsp = nbsp;
        self
    }

    pub fn special(mut self, special: SpecialOptions) -> Self {
        self.options.special = special;
        self
    }

    /// Switch every dash rule off
    pub fn without_dash(self) -> Self {
        self.dash(DashOptions::disabled())
    }

    /// Switch every non-breaking space rule off
    pub fn without_nbsp(self) -> Self {
        self.nbsp(NbspOptions::disabled())
    }

    /// Switch every special symbol rule off
    pub fn without_special(self) -> Self {
        self.special(SpecialOptions::disabled())
    }

    pub fn short_word(mut self, length: Length) -> Self {
        self.options.nbsp.short_word = length;
        self
    }

    pub fn non_breaking_hyphen(mut self, length: Length) -> Self {
        self.options.dash.hyphen_to_nbhy = length;
        self
    }

    pub fn reg_mark_style(mut self, style: RegMarkStyle) -> Self {
        self.options.special.reg_mark_style = style;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.options.debug = debug;
        self
    }

    /// Build the options
    pub fn build(self) -> Result<RuleOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}
