//! Non-breaking spaces around dashes
//!
//! The space before a dash binds it to the preceding word; the space after
//! a dash binds only when the dash opens a sentence (dialogue lines).

use crate::domain::navigator;
use crate::domain::text;
use crate::domain::token::{RuleId, Token, TokenKind};
use crate::rules::nbsp::nbsp;
use crate::rules::Pass;

pub fn apply(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if !matches!(tokens[index].kind, TokenKind::EmDash | TokenKind::Hyphen) {
        return;
    }
    before(tokens, index, pass);
    after(tokens, index, pass);
}

fn before(tokens: &mut [Token], index: usize, pass: &Pass<'_>) {
    let Some(space) = navigator::prev(tokens, index, &[TokenKind::Space]) else {
        return;
    };
    if navigator::touches_line_break(tokens, space) {
        return;
    }

    let Some(word) = navigator::prev_skipping(tokens, space, &[], |t| {
        t.kind == TokenKind::Tag || text::is_seek_ignored(&t.text())
    }) else {
        return;
    };

    let binds = {
        let word = &tokens[word];
        let value = word.text();
        word.kind == TokenKind::Shortcode
            || value.ends_with('$')
            || text::ends_with_alphanumeric(&value)
            || value == ","
    };
    if binds {
        nbsp!(tokens, space, RuleId::NbspEmDash, pass);
    }
}

fn after(tokens: &mut [Token], index: usize, pass: &Pass<'_>) {
    if !navigator::is_at_sentence_start(tokens, index) {
        return;
    }
    if let Some(space) = navigator::next(tokens, index, &[TokenKind::Space]) {
        nbsp!(tokens, space, RuleId::NbspEmDash, pass);
    }
}
