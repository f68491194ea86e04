//! Non-breaking spaces around short words
//!
//! Prepositions, conjunctions and other words of at most `max` letters are
//! glued to the word after them. Particles (`бы`, `ли`, `же`) are glued to
//! the word before them instead.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::navigator;
use crate::domain::text;
use crate::domain::token::{RuleId, Token, TokenKind};
use crate::rules::nbsp::{nbsp, HYPHENS};
use crate::rules::Pass;

const RULE: RuleId = RuleId::NbspShortWord;

/// Particles that attach to the preceding word
pub const PARTICLES: [&str; 5] = ["б", "бы", "ли", "же", "ж"];

/// Adverbs that behave like particles after a pronoun
pub const ADVERBS: [&str; 1] = ["уж"];

/// First characters that keep the space after a short word breakable
const STOPS: [char; 22] = [
    '.', ',', '!', '?', ';', ':', '+', '-', '=', '<', '>', '|', '^', '*', '/', ')', '[', ']', '{',
    '}', '—', '–',
];

/// Opening marks after which a short word binds forward
const OPENERS: [&str; 7] = ["(", "[", "{", "<", "&lt;", "/", "*"];

fn short_word_chars() -> &'static Regex {
    static CHARS: OnceLock<Regex> = OnceLock::new();
    CHARS.get_or_init(|| Regex::new(r"^[\p{L}\p{Sc}&-]+$").expect("valid pattern"))
}

fn is_particle(value: &str) -> bool {
    PARTICLES.contains(&value)
}

fn is_adverb(value: &str) -> bool {
    ADVERBS.contains(&value)
}

pub fn apply(tokens: &mut [Token], index: usize, max: usize, pass: &mut Pass<'_>) {
    let token = &tokens[index];
    let eligible = matches!(token.kind, TokenKind::Word | TokenKind::Punctuation)
        || token.kind.is_symbol();
    if !eligible || token.char_len() > max || !short_word_chars().is_match(&token.value) {
        return;
    }
    before(tokens, index, max, pass);
    after(tokens, index, pass);
}

fn before(tokens: &mut [Token], index: usize, max: usize, pass: &Pass<'_>) {
    let Some(space) = navigator::prev(tokens, index, &[TokenKind::Space]) else {
        return;
    };
    let Some(left) = navigator::prev(tokens, space, &[]) else {
        return;
    };

    let value = tokens[index].value.clone();
    let left_value = tokens[left].value.clone();
    let next = navigator::next(tokens, index, &[]);

    // Numbers are handled by the number rule
    if tokens[left].kind == TokenKind::Number {
        return;
    }

    // `Co. & Sons`
    if value == "&" && left_value == "." {
        if let Some(word) = navigator::prev(tokens, left, &[]) {
            if tokens[word].kind == TokenKind::Word {
                nbsp!(tokens, space, RULE, pass);
                return;
            }
        }
    }

    if is_adverb(&left_value) {
        return;
    }
    if is_particle(&value) {
        nbsp!(tokens, space, RULE, pass);
        return;
    }
    if is_particle(&left_value) {
        return;
    }

    // Abbreviations in capitals keep their space: `США и`
    if text::ends_with_alphanumeric(&left_value) && text::is_uppercase(&left_value) {
        return;
    }

    if tokens[left].kind == TokenKind::Word && left_value.chars().count() <= max {
        nbsp!(tokens, space, RULE, pass);
        return;
    }

    // `FAMILY &amp; CO`
    if !text::ends_with_alphanumeric_or_dot(&left_value) && left_value != "&amp;" {
        return;
    }

    let Some(next) = next else {
        nbsp!(tokens, space, RULE, pass);
        return;
    };
    let next_value = tokens[next].text().into_owned();
    if text::is_end_of_sentence(&next_value)
        || text::is_right_adjacent(&next_value)
        || tokens[next].kind == TokenKind::Quote
    {
        nbsp!(tokens, space, RULE, pass);
        return;
    }

    if tokens[next].kind != TokenKind::Space {
        return;
    }
    let Some(after) = navigator::next(tokens, next, &[]) else {
        return;
    };
    if tokens[after].kind == TokenKind::Number || HYPHENS.contains(&tokens[after].kind) {
        return;
    }

    // A lone capital between two longer words: `Иван Грозный и Я`
    let len = value.chars().count();
    if left_value.chars().count() <= max || !text::is_uppercase(&value) || len >= max {
        return;
    }
    nbsp!(tokens, space, RULE, pass);
}

fn after(tokens: &mut [Token], index: usize, pass: &Pass<'_>) {
    let Some(space) = navigator::next(tokens, index, &[TokenKind::Space]) else {
        return;
    };
    if navigator::touches_line_break(tokens, space) {
        return;
    }
    let Some(right) = navigator::next(tokens, space, &[]) else {
        return;
    };
    if tokens[right].kind == TokenKind::HtmlEntity || tokens[right].text().starts_with(STOPS) {
        return;
    }

    let value = tokens[index].value.clone();
    if (is_particle(&value) || is_adverb(&value))
        && navigator::prev(tokens, index, &[TokenKind::NonBreakingSpace]).is_some()
    {
        return;
    }
    if navigator::prev(tokens, index, &[TokenKind::Hyphen, TokenKind::EnDash, TokenKind::EmDash])
        .is_some()
    {
        return;
    }

    let Some(prev) = navigator::prev(tokens, index, &[]) else {
        nbsp!(tokens, space, RULE, pass);
        return;
    };

    match tokens[prev].kind {
        TokenKind::Space => {
            nbsp!(tokens, space, RULE, pass);
            return;
        }
        TokenKind::NonBreakingSpace => {
            if !text::is_uppercase(&value) {
                nbsp!(tokens, space, RULE, pass);
            }
            return;
        }
        TokenKind::Quote | TokenKind::Apostrophe | TokenKind::NewLine => {
            nbsp!(tokens, space, RULE, pass);
            return;
        }
        _ => {}
    }

    let opener = OPENERS.contains(&tokens[prev].value.as_str())
        || OPENERS.contains(&tokens[prev].text().as_ref());
    if opener {
        nbsp!(tokens, space, RULE, pass);
    }
}
