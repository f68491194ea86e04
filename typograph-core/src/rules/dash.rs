//! Hyphen, dash and minus rules

use crate::domain::navigator;
use crate::domain::text;
use crate::domain::token::{RuleId, Token, TokenKind};
use crate::rules::{note, Pass};

const EM_DASH: &str = "—";
const EN_DASH: &str = "–";
const MINUS: &str = "−";
const NB_HYPHEN: char = '\u{2011}';

fn to_em_dash(tokens: &mut [Token], index: usize, rule: RuleId, pass: &Pass<'_>) {
    let token = &mut tokens[index];
    token.set(TokenKind::EmDash, EM_DASH);
    note!(pass, token, rule);
}

/// `-` between a space and a number becomes a minus sign
pub fn hyphen_to_minus(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind != TokenKind::Hyphen {
        return;
    }

    let after_space = navigator::prev(tokens, index, &[])
        .is_some_and(|prev| tokens[prev].kind.is_space());
    let before_number = navigator::next(tokens, index, &[])
        .is_some_and(|next| tokens[next].kind == TokenKind::Number);

    let token = &mut tokens[index];
    if after_space && before_number {
        token.set(TokenKind::Minus, MINUS);
        note!(pass, token, RuleId::HyphenToMinus);
    } else {
        note!(pass, token, RuleId::HyphenToMinus, false);
    }
}

/// `--` becomes an em-dash
pub fn double_hyphen_to_em_dash(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind == TokenKind::DoubleHyphen {
        to_em_dash(tokens, index, RuleId::DoubleHyphenToEmDash, pass);
    }
}

/// A hyphen opening a line, or standing between spaces, becomes an em-dash.
///
/// Between spaces the word before must not itself be a dash, so `- - -`
/// does not turn into a row of em-dashes.
pub fn hyphen_to_em_dash(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if !matches!(
        tokens[index].kind,
        TokenKind::Hyphen | TokenKind::NonBreakingHyphen
    ) {
        return;
    }

    if navigator::is_at_line_start_with_space(tokens, index) {
        to_em_dash(tokens, index, RuleId::HyphenToEmDash, pass);
        return;
    }

    if !navigator::is_surrounded_by_spaces(tokens, index) {
        note!(pass, &mut tokens[index], RuleId::HyphenToEmDash, false);
        return;
    }

    let before = navigator::prev(tokens, index, &[TokenKind::Space, TokenKind::NonBreakingSpace])
        .and_then(|space| {
            navigator::prev_skipping(tokens, space, &[], |t| {
                t.kind == TokenKind::Tag
                    || t.kind.is_space()
                    || text::is_seek_ignored(&t.text())
            })
        });

    match before {
        Some(before) if !tokens[before].kind.is_dash() => {
            to_em_dash(tokens, index, RuleId::HyphenToEmDash, pass);
        }
        _ => note!(pass, &mut tokens[index], RuleId::HyphenToEmDash, false),
    }
}

/// An en-dash opening a line, between numbers or between spaces becomes an
/// em-dash
pub fn en_dash_to_em_dash(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind != TokenKind::EnDash {
        return;
    }

    if navigator::is_at_line_start_with_space(tokens, index)
        || navigator::is_surrounded_by_numbers(tokens, index)
        || navigator::is_surrounded_by_spaces(tokens, index)
    {
        to_em_dash(tokens, index, RuleId::EnDashToEmDash, pass);
    } else {
        note!(pass, &mut tokens[index], RuleId::EnDashToEmDash, false);
    }
}

/// An em-dash between numbers (ranges) becomes an en-dash
pub fn em_dash_to_en_dash(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind != TokenKind::EmDash {
        return;
    }

    let token_is_range = navigator::is_surrounded_by_numbers(tokens, index);
    let token = &mut tokens[index];
    if token_is_range {
        token.set(TokenKind::EnDash, EN_DASH);
        note!(pass, token, RuleId::EmDashToEnDash);
    } else {
        note!(pass, token, RuleId::EmDashToEnDash, false);
    }
}

/// Nearest non-removed neighbour; markup counts and therefore blocks
fn adjacent(tokens: &[Token], indices: impl Iterator<Item = usize>) -> Option<usize> {
    indices.into_iter().find(|&i| !tokens[i].is_removed())
}

/// Hyphens next to a short word or number become non-breaking
pub fn non_breaking_hyphen(tokens: &mut [Token], index: usize, max: usize, pass: &mut Pass<'_>) {
    match tokens[index].kind {
        TokenKind::Hyphen => {}
        TokenKind::Word if tokens[index].value.contains('-') => {
            word_hyphen(&mut tokens[index], max, pass);
            return;
        }
        _ => return,
    }

    let is_word_or_number = |i: usize| matches!(tokens[i].kind, TokenKind::Word | TokenKind::Number);
    let before = adjacent(tokens, (0..index).rev()).filter(|&i| is_word_or_number(i));
    let after = adjacent(tokens, index + 1..tokens.len()).filter(|&i| is_word_or_number(i));

    let (Some(before), Some(after)) = (before, after) else {
        note!(pass, &mut tokens[index], RuleId::NonBreakingHyphen, false);
        return;
    };

    let short_neighbour = tokens[before].char_len() <= max || tokens[after].char_len() <= max;
    let token = &mut tokens[index];
    if short_neighbour {
        token.set(TokenKind::NonBreakingHyphen, NB_HYPHEN.to_string());
        note!(pass, token, RuleId::NonBreakingHyphen);
    } else {
        note!(pass, token, RuleId::NonBreakingHyphen, false);
    }
}

/// `Ту-154`-style words with a single hyphen
fn word_hyphen(token: &mut Token, max: usize, pass: &Pass<'_>) {
    if token.value.matches('-').count() != 1 {
        note!(pass, token, RuleId::NonBreakingHyphen, false);
        return;
    }

    let short_part = token.value.split('-').any(|part| {
        let len = part.chars().count();
        len > 0 && len <= max
    });
    if !short_part {
        note!(pass, token, RuleId::NonBreakingHyphen, false);
        return;
    }

    token.value = token.value.replace('-', &NB_HYPHEN.to_string());
    note!(pass, token, RuleId::NonBreakingHyphen);
}
