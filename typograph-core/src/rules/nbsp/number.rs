//! Non-breaking spaces around numbers
//!
//! Binds numbers to units, currency signs, the numero sign and to short
//! words, keeps thousands groups (`10 000`) together and leaves arithmetic
//! and ranges breakable. Following tokens of up to two, exactly three,
//! exactly four and more than four characters each take their own branch.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::navigator;
use crate::domain::text;
use crate::domain::token::{RuleId, Token, TokenKind};
use crate::rules::nbsp::{kind_at, nbsp, HYPHENS};
use crate::rules::Pass;

const RULE: RuleId = RuleId::NbspNumber;

const SYMBOLS: [TokenKind; 3] = [TokenKind::Char, TokenKind::Currency, TokenKind::NumeroSign];

/// Glyphs after which a number is an operand, not a quantity
const OPERATORS: [char; 7] = ['+', '−', '=', '*', '-', '–', '—'];

/// Closing marks after a four-character unit
const UNIT_CLOSERS: [&str; 10] = [".", ",", ":", ";", "?", ")", "]", ">", "/", "\""];

/// Signs bound to the number before them
const TRAILING_SIGNS: [&str; 4] = ["%", "&", "©", "°"];

fn short_number() -> &'static Regex {
    static SHORT: OnceLock<Regex> = OnceLock::new();
    SHORT.get_or_init(|| Regex::new(r"^\d{1,3}$").expect("valid pattern"))
}

fn thousands_group() -> &'static Regex {
    static GROUP: OnceLock<Regex> = OnceLock::new();
    GROUP.get_or_init(|| Regex::new(r"^\d{3}$").expect("valid pattern"))
}

pub fn apply(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind != TokenKind::Number {
        return;
    }
    before(tokens, index, pass);
    after(tokens, index, pass);
}

fn before(tokens: &mut [Token], index: usize, pass: &Pass<'_>) {
    let Some(space) = navigator::prev(tokens, index, &[TokenKind::Space]) else {
        return;
    };
    let Some(left) = navigator::prev(tokens, space, &[]) else {
        return;
    };

    if tokens[left].kind == TokenKind::HtmlEntity {
        return;
    }
    let left_value = tokens[left].text().into_owned();
    if left_value.ends_with(OPERATORS) {
        return;
    }
    if left_value == "№" {
        nbsp!(tokens, space, RULE, pass);
        return;
    }

    let next = navigator::next_ignoring(tokens, index, &[TokenKind::Space]);
    let at_end = match next {
        None => true,
        Some(next) => {
            tokens[next].kind == TokenKind::NewLine
                || text::is_end_of_sentence(&tokens[next].text())
        }
    };
    if at_end && tokens[index].char_len() < 3 {
        nbsp!(tokens, space, RULE, pass);
        return;
    }

    // `5 кг`, `5 USD`: the unit binds from the other side
    if let Some(next) = next {
        let next = &tokens[next];
        if next.kind == TokenKind::Word
            && (text::is_lowercase(&next.value) || text::is_uppercase(&next.value))
        {
            return;
        }
    }

    // `Глава 5`, `Приложение 3 Регламента`
    let word_before = navigator::prev_ignoring(tokens, index, &[TokenKind::Space])
        .filter(|&i| tokens[i].kind == TokenKind::Word && text::is_capitalized(&tokens[i].value));
    if word_before.is_some() {
        match next {
            None => {
                nbsp!(tokens, space, RULE, pass);
                return;
            }
            Some(next)
                if tokens[next].kind == TokenKind::Word
                    && text::is_upper_first(&tokens[next].value) =>
            {
                nbsp!(tokens, space, RULE, pass);
                return;
            }
            Some(_) => {}
        }
    }

    // Abbreviation before the number: `стр. 5`, `т. 2`
    if let Some(dot) = navigator::prev(tokens, space, &[TokenKind::Dot]) {
        let Some(abbreviation) = navigator::prev(tokens, dot, &[]) else {
            return;
        };
        if !text::starts_with_lowercase(&tokens[abbreviation].value) {
            return;
        }
        if navigator::next(tokens, index, &HYPHENS).is_some() {
            return;
        }
        nbsp!(tokens, space, RULE, pass);
        return;
    }

    if let Some(symbol) = navigator::prev(tokens, space, &SYMBOLS) {
        if tokens[symbol].text() == "№" {
            nbsp!(tokens, space, RULE, pass);
            return;
        }
    }

    let Some(prev) = navigator::prev(tokens, space, &[]) else {
        return;
    };
    if text::is_currency(&tokens[prev].text()) {
        nbsp!(tokens, space, RULE, pass);
    }
    // Thousands: `10 000`, unless the group before is already bound
    if short_number().is_match(&tokens[prev].value) {
        let bound = navigator::prev(tokens, prev, &[])
            .is_some_and(|i| tokens[i].kind == TokenKind::NonBreakingSpace);
        if !bound {
            nbsp!(tokens, space, RULE, pass);
        }
    }
}

fn after(tokens: &mut [Token], index: usize, pass: &Pass<'_>) {
    let Some(space) = navigator::next(tokens, index, &[TokenKind::Space]) else {
        return;
    };
    let Some(next) = navigator::next(tokens, space, &[]) else {
        return;
    };

    let prev = navigator::prev(tokens, index, &[]);
    if let Some(kind) = kind_at(tokens, prev) {
        let standalone = kind.is_space()
            || kind.is_symbol()
            || HYPHENS.contains(&kind)
            || kind == TokenKind::Punctuation;
        if !standalone {
            return;
        }
    }

    let next_kind = tokens[next].kind;
    let next_len = tokens[next].text().chars().count();

    // `5 и 6`, `с 1 по 5`: a short word between two numbers is a range
    if next_kind == TokenKind::Word && next_len <= 2 {
        let range = navigator::next(tokens, next, &[TokenKind::Space, TokenKind::NonBreakingSpace])
            .and_then(|gap| navigator::next(tokens, gap, &[TokenKind::Number]))
            .is_some();
        if !range {
            nbsp!(tokens, space, RULE, pass);
        }
        return;
    }

    if HYPHENS.contains(&next_kind) || next_kind == TokenKind::HtmlEntity {
        return;
    }

    if next_kind == TokenKind::Word {
        if next_len < 3 {
            nbsp!(tokens, space, RULE, pass);
        }
        // Looks like a name: `1 Декабря`
        if text::is_capitalized(&tokens[next].value) {
            return;
        }
    }

    let prev_kind = kind_at(tokens, prev);

    if next_len > 4 {
        match prev_kind {
            None => nbsp!(tokens, space, RULE, pass),
            Some(kind) if kind.is_symbol() => nbsp!(tokens, space, RULE, pass),
            Some(TokenKind::Hyphen | TokenKind::NonBreakingHyphen) => {}
            Some(kind) if kind != TokenKind::NonBreakingSpace => nbsp!(tokens, space, RULE, pass),
            Some(_) => {
                if tokens[index].char_len() <= 2 {
                    nbsp!(tokens, space, RULE, pass);
                }
            }
        }
        return;
    }

    let nbsp_before = prev_kind == Some(TokenKind::NonBreakingSpace);
    let mut next_value = tokens[next].text().into_owned();

    if next_len == 4 {
        let Some(following) = navigator::next(tokens, next, &[]) else {
            if !nbsp_before {
                nbsp!(tokens, space, RULE, pass);
            }
            return;
        };
        if tokens[following].kind == TokenKind::NewLine {
            if !nbsp_before {
                nbsp!(tokens, space, RULE, pass);
            }
            return;
        }
        next_value = tokens[following].text().into_owned();
        if UNIT_CLOSERS.contains(&next_value.as_str()) {
            nbsp!(tokens, space, RULE, pass);
            return;
        }
        if tokens[following].kind == TokenKind::Space {
            nbsp!(tokens, space, RULE, pass);
        }
    }

    if thousands_group().is_match(&next_value) && !nbsp_before {
        nbsp!(tokens, space, RULE, pass);
        return;
    }

    if next_len == 3 {
        let Some(following) = navigator::next(tokens, next, &[]) else {
            nbsp!(tokens, space, RULE, pass);
            return;
        };
        next_value = tokens[following].text().into_owned();
        if tokens[following].kind == TokenKind::NewLine || text::is_right_adjacent(&next_value) {
            nbsp!(tokens, space, RULE, pass);
            return;
        }
        if tokens[following].kind == TokenKind::Space {
            nbsp!(tokens, space, RULE, pass);
        }
        if next_value != "." {
            return;
        }
    }

    if text::is_currency(&next_value) || TRAILING_SIGNS.contains(&next_value.as_str()) {
        nbsp!(tokens, space, RULE, pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quotes::QuoteGlyphs;
    use crate::tokenizer::{render, Tokenizer};

    fn run(text: &str) -> String {
        let mut tokens = Tokenizer::new().tokenize(text).tokens;
        let glyphs = QuoteGlyphs::new(Vec::new());
        let mut pass = Pass::new(&glyphs, false);
        for i in 0..tokens.len() {
            apply(&mut tokens, i, &mut pass);
        }
        render(&tokens).replace('\u{a0}', "~")
    }

    #[test]
    fn test_numero_sign() {
        assert_eq!(run("Палата № 6"), "Палата №~6");
    }

    #[test]
    fn test_units_and_signs() {
        assert_eq!(run("Вес 5 кг"), "Вес 5~кг");
        assert_eq!(run("Рост 25 %"), "Рост 25~%");
        assert_eq!(run("Цена $ 100"), "Цена $~100");
    }

    #[test]
    fn test_thousands_groups() {
        assert_eq!(run("Итого 10 000 рублей"), "Итого 10~000 рублей");
    }

    #[test]
    fn test_arithmetic_stays_breakable() {
        assert_eq!(run("2 + 2 = 4"), "2 + 2 = 4");
    }

    #[test]
    fn test_short_word_range() {
        assert_eq!(run("от 5 до 10"), "от 5 до~10");
    }

    #[test]
    fn test_abbreviation_before_number() {
        assert_eq!(run("см. стр. 25"), "см. стр.~25");
    }

    #[test]
    fn test_capitalised_word_after_number() {
        assert_eq!(run("1 Декабря"), "1 Декабря");
    }
}
