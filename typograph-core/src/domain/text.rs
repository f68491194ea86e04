//! Character and string classification used by the rules

use regex::Regex;
use std::sync::OnceLock;

/// Marks that end a sentence
pub const END_OF_SENTENCE_MARKS: [&str; 4] = [".", "?", "!", "…"];

/// Marks that attach to the preceding word without a space
pub const RIGHT_ADJACENT_MARKS: [&str; 10] = [".", "?", "!", "…", ",", ":", ";", ")", "]", "}"];

/// Symbols skipped when looking back for the word before a dash
pub const SEEK_IGNORE_SYMBOLS: [&str; 8] = ["*", "\\", "/", ")", "]", "}", "»", "\""];

/// Currency signs recognised next to numbers
pub const CURRENCY_SYMBOLS: [&str; 12] = [
    "$", "£", "¤", "¥", "Ұ", "₤", "₪", "€", "₴", "₸", "₹", "₽",
];

/// Tag names that start a new visual line
pub const LINE_BREAK_TAGS: [&str; 5] = ["p", "div", "br", "hr", "blockquote"];

pub fn is_end_of_sentence(value: &str) -> bool {
    END_OF_SENTENCE_MARKS.contains(&value)
}

pub fn is_right_adjacent(value: &str) -> bool {
    RIGHT_ADJACENT_MARKS.contains(&value)
}

pub fn is_seek_ignored(value: &str) -> bool {
    SEEK_IGNORE_SYMBOLS.contains(&value)
}

pub fn is_currency(value: &str) -> bool {
    CURRENCY_SYMBOLS.contains(&value)
}

/// Unicode general category P
pub fn is_punctuation(c: char) -> bool {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    let re = PUNCTUATION.get_or_init(|| Regex::new(r"^\p{P}$").expect("valid pattern"));
    let mut buf = [0u8; 4];
    re.is_match(c.encode_utf8(&mut buf))
}

fn is_alphanumeric(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}

/// Letters, hyphens and apostrophes only
fn is_letters(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphabetic() || c == '-' || c == '\'')
}

/// First character is unchanged by upper-casing.
///
/// Holds for capitals and for anything without case (digits, marks).
pub fn is_upper_first(value: &str) -> bool {
    match value.chars().next() {
        Some(c) => c.to_uppercase().eq(std::iter::once(c)),
        None => false,
    }
}

/// Capitalised word: an upper-case first letter followed by lower case only
pub fn is_capitalized(value: &str) -> bool {
    if !is_letters(value) {
        return false;
    }
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    let rest = chars.as_str();
    rest.to_lowercase() == rest
}

pub fn is_lowercase(value: &str) -> bool {
    is_letters(value) && value.to_lowercase() == value
}

pub fn is_uppercase(value: &str) -> bool {
    is_letters(value) && value.to_uppercase() == value
}

pub fn starts_with_alphanumeric(value: &str) -> bool {
    value.chars().next().is_some_and(is_alphanumeric)
}

pub fn ends_with_alphanumeric(value: &str) -> bool {
    value.chars().next_back().is_some_and(is_alphanumeric)
}

/// Ends with a digit from 1 to 9
pub fn ends_with_nonzero_digit(value: &str) -> bool {
    value
        .chars()
        .next_back()
        .is_some_and(|c| ('1'..='9').contains(&c))
}

/// Ends with a letter, a digit or punctuation
pub fn ends_with_word_or_mark(value: &str) -> bool {
    value
        .chars()
        .next_back()
        .is_some_and(|c| is_alphanumeric(c) || is_punctuation(c))
}

/// Ends with a letter, a digit or a dot
pub fn ends_with_alphanumeric_or_dot(value: &str) -> bool {
    value
        .chars()
        .next_back()
        .is_some_and(|c| is_alphanumeric(c) || c == '.')
}

pub fn starts_with_lowercase(value: &str) -> bool {
    value.chars().next().is_some_and(char::is_lowercase)
}
