//! Rule pipeline
//!
//! Rules are a closed set of variants built once from [`RuleOptions`] in a
//! fixed order. The pipeline visits every non-markup token and offers it to
//! each enabled rule in turn; a rule inspects the neighbourhood through the
//! [navigator](crate::domain::navigator) and rewrites tokens in place.
//! Tokens are never inserted or physically removed.

pub mod dash;
pub mod nbsp;
pub mod punctuation;
pub mod quotes;
pub mod special;

use crate::api::{Ellipsis, RegMarkStyle, RuleOptions};
use crate::domain::navigator;
use crate::domain::quotes::{QuoteGlyphs, QuoteState};
use crate::domain::token::{RuleId, RuleTag, Token, TokenKind};

/// Record provenance on a token when the pass runs in debug mode.
///
/// `note!(pass, token, rule)` marks an applied change, a trailing `false`
/// marks a rejection.
macro_rules! note {
    ($pass:expr, $token:expr, $rule:expr) => {
        $pass.record($token, $rule, line!(), true)
    };
    ($pass:expr, $token:expr, $rule:expr, $applied:expr) => {
        $pass.record($token, $rule, line!(), $applied)
    };
}
pub(crate) use note;

/// State of one formatting pass
#[derive(Debug)]
pub struct Pass<'a> {
    pub(crate) glyphs: &'a QuoteGlyphs,
    pub(crate) quotes: QuoteState,
    debug: bool,
}

impl<'a> Pass<'a> {
    pub fn new(glyphs: &'a QuoteGlyphs, debug: bool) -> Self {
        Self {
            glyphs,
            quotes: QuoteState::new(),
            debug,
        }
    }

    pub(crate) fn record(&self, token: &mut Token, rule: RuleId, line: u32, applied: bool) {
        if self.debug {
            token.note(RuleTag {
                rule,
                line,
                applied,
            });
        }
    }
}

/// One enabled rule with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Copyright,
    PlusMinus,
    RegMark(RegMarkStyle),
    Times,
    Trademark,
    HyphenToMinus,
    DoubleHyphenToEmDash,
    HyphenToEmDash,
    EnDashToEmDash,
    EmDashToEnDash,
    NonBreakingHyphen { max: usize },
    NbspNumber,
    NbspEmDash,
    NbspInitial,
    NbspShortWord { max: usize },
    ThreeDotsToEllipsis,
    EllipsisToThreeDots,
    Apostrophe,
    Quotes,
}

impl Rule {
    pub fn id(self) -> RuleId {
        match self {
            Rule::Copyright => RuleId::Copyright,
            Rule::PlusMinus => RuleId::PlusMinus,
            Rule::RegMark(_) => RuleId::RegMark,
            Rule::Times => RuleId::Times,
            Rule::Trademark => RuleId::Trademark,
            Rule::HyphenToMinus => RuleId::HyphenToMinus,
            Rule::DoubleHyphenToEmDash => RuleId::DoubleHyphenToEmDash,
            Rule::HyphenToEmDash => RuleId::HyphenToEmDash,
            Rule::EnDashToEmDash => RuleId::EnDashToEmDash,
            Rule::EmDashToEnDash => RuleId::EmDashToEnDash,
            Rule::NonBreakingHyphen { .. } => RuleId::NonBreakingHyphen,
            Rule::NbspNumber => RuleId::NbspNumber,
            Rule::NbspEmDash => RuleId::NbspEmDash,
            Rule::NbspInitial => RuleId::NbspInitial,
            Rule::NbspShortWord { .. } => RuleId::NbspShortWord,
            Rule::ThreeDotsToEllipsis => RuleId::ThreeDotsToEllipsis,
            Rule::EllipsisToThreeDots => RuleId::EllipsisToThreeDots,
            Rule::Apostrophe => RuleId::Apostrophe,
            Rule::Quotes => RuleId::Quotes,
        }
    }

    /// Offer the token at `index` to this rule
    pub fn apply(self, tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
        match self {
            Rule::Copyright => special::copyright(tokens, index, pass),
            Rule::PlusMinus => special::plus_minus(tokens, index, pass),
            Rule::RegMark(style) => special::reg_mark(tokens, index, style, pass),
            Rule::Times => special::times(tokens, index, pass),
            Rule::Trademark => special::trademark(tokens, index, pass),
            Rule::HyphenToMinus => dash::hyphen_to_minus(tokens, index, pass),
            Rule::DoubleHyphenToEmDash => dash::double_hyphen_to_em_dash(tokens, index, pass),
            Rule::HyphenToEmDash => dash::hyphen_to_em_dash(tokens, index, pass),
            Rule::EnDashToEmDash => dash::en_dash_to_em_dash(tokens, index, pass),
            Rule::EmDashToEnDash => dash::em_dash_to_en_dash(tokens, index, pass),
            Rule::NonBreakingHyphen { max } => dash::non_breaking_hyphen(tokens, index, max, pass),
            Rule::NbspNumber => nbsp::number::apply(tokens, index, pass),
            Rule::NbspEmDash => nbsp::em_dash::apply(tokens, index, pass),
            Rule::NbspInitial => nbsp::initial::apply(tokens, index, pass),
            Rule::NbspShortWord { max } => nbsp::short_word::apply(tokens, index, max, pass),
            Rule::ThreeDotsToEllipsis => punctuation::three_dots_to_ellipsis(tokens, index, pass),
            Rule::EllipsisToThreeDots => punctuation::ellipsis_to_three_dots(tokens, index, pass),
            Rule::Apostrophe => quotes::apostrophe(tokens, index, pass),
            Rule::Quotes => quotes::resolve(tokens, index, pass),
        }
    }
}

/// Ordered, pre-filtered rule list plus the quote glyph table
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    glyphs: QuoteGlyphs,
    debug: bool,
}

impl RuleSet {
    /// Build the pipeline enabled by `options`.
    ///
    /// Options are not validated here: a zero length turns its rule off and
    /// quote pairs with an empty glyph are skipped.
    pub fn from_options(options: &RuleOptions) -> Self {
        let special = &options.special;
        let dash = &options.dash;
        let nbsp = &options.nbsp;
        let pairs: Vec<(String, String)> = options
            .quotes
            .iter()
            .filter(|pair| !pair.open.is_empty() && !pair.close.is_empty())
            .map(|pair| (pair.open.clone(), pair.close.clone()))
            .collect();
        let quotes = !pairs.is_empty();

        let candidates = [
            (special.copyright, Rule::Copyright),
            (special.plus_minus, Rule::PlusMinus),
            (special.reg_mark, Rule::RegMark(special.reg_mark_style)),
            (special.times, Rule::Times),
            (special.trade, Rule::Trademark),
            (dash.hyphen_to_minus, Rule::HyphenToMinus),
            (dash.hyphen_to_mdash, Rule::DoubleHyphenToEmDash),
            (dash.hyphen_to_mdash, Rule::HyphenToEmDash),
            (dash.ndash_to_mdash, Rule::EnDashToEmDash),
            (dash.mdash_to_ndash, Rule::EmDashToEnDash),
        ];
        let mut rules: Vec<Rule> = candidates
            .into_iter()
            .filter_map(|(enabled, rule)| enabled.then_some(rule))
            .collect();

        if let Some(max) = dash.hyphen_to_nbhy.max().filter(|&max| max > 0) {
            rules.push(Rule::NonBreakingHyphen { max });
        }
        if nbsp.number {
            rules.push(Rule::NbspNumber);
        }
        if nbsp.mdash {
            rules.push(Rule::NbspEmDash);
        }
        if nbsp.initial {
            rules.push(Rule::NbspInitial);
        }
        if let Some(max) = nbsp.short_word.max().filter(|&max| max > 0) {
            rules.push(Rule::NbspShortWord { max });
        }
        match options.ellipsis {
            Ellipsis::Hellip => rules.push(Rule::ThreeDotsToEllipsis),
            Ellipsis::Dots => rules.push(Rule::EllipsisToThreeDots),
            Ellipsis::None => {}
        }
        if quotes {
            rules.push(Rule::Apostrophe);
            rules.push(Rule::Quotes);
        }

        tracing::debug!(rules = rules.len(), "rule set built");

        Self {
            rules,
            glyphs: QuoteGlyphs::new(pairs),
            debug: options.debug,
        }
    }

    /// Enabled rules in execution order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule over `tokens`, returning the final quote state
    pub fn run(&self, tokens: &mut [Token]) -> QuoteState {
        let mut pass = Pass::new(&self.glyphs, self.debug);

        for index in 0..tokens.len() {
            for &rule in &self.rules {
                if is_frozen(&tokens[index]) {
                    break;
                }
                rule.apply(tokens, index, &mut pass);
            }
        }

        pass.quotes
    }
}

/// Markup and deleted tokens take no further rules
fn is_frozen(token: &Token) -> bool {
    token.kind.is_markup() || token.kind == TokenKind::Removed
}

/// Turn the space at `index` into a non-breaking space.
///
/// Spaces next to a line-breaking tag or an emoji stay breakable.
pub(crate) fn set_nbsp(tokens: &mut [Token], index: usize, rule: RuleId, line: u32, pass: &Pass<'_>) {
    if tokens[index].kind != TokenKind::Space
        || navigator::touches_line_break(tokens, index)
        || next_to_emoji(tokens, index)
    {
        return;
    }
    let token = &mut tokens[index];
    token.set(TokenKind::NonBreakingSpace, "\u{a0}");
    pass.record(token, rule, line, true);
}

fn next_to_emoji(tokens: &[Token], index: usize) -> bool {
    let is_emoji = |i: Option<usize>| i.is_some_and(|i| tokens[i].kind == TokenKind::Emoji);
    is_emoji(navigator::prev(tokens, index, &[])) || is_emoji(navigator::next(tokens, index, &[]))
}
