//! Apostrophes, primes and nested quotation marks

use crate::domain::navigator;
use crate::domain::quotes::{self as resolver, is_paired_quote};
use crate::domain::token::{QuoteMark, RuleId, Token, TokenKind};
use crate::rules::{note, Pass};

const APOSTROPHE: &str = "’";
const PRIME: &str = "′";
const DOUBLE_PRIME: &str = "″";

/// Straight apostrophes become `’`, or a prime right after a number
pub fn apostrophe(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    match tokens[index].kind {
        TokenKind::Word if tokens[index].value.contains('\'') => {
            let token = &mut tokens[index];
            token.value = token.value.replace('\'', APOSTROPHE);
            note!(pass, token, RuleId::Apostrophe);
        }
        TokenKind::Apostrophe => {
            let after_number = navigator::prev(tokens, index, &[TokenKind::Number]).is_some();
            let token = &mut tokens[index];
            if after_number {
                token.set(TokenKind::Quote, PRIME);
                token.mark = Some(QuoteMark::Prime);
            } else {
                token.set(TokenKind::Apostrophe, APOSTROPHE);
            }
            note!(pass, token, RuleId::Apostrophe);
        }
        _ => {}
    }
}

/// Replace a quote mark with the glyph of its nesting depth
pub fn resolve(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if pass.glyphs.is_empty() || !is_paired_quote(&tokens[index]) {
        return;
    }

    if is_double_prime(tokens, index, pass) {
        let token = &mut tokens[index];
        token.set(TokenKind::Quote, DOUBLE_PRIME);
        token.mark = Some(QuoteMark::DoublePrime);
        note!(pass, token, RuleId::Quotes);
        return;
    }

    let glyph = if resolver::is_opening(tokens, index, pass.glyphs) {
        if resolver::find_closing(tokens, index, pass.glyphs).is_some() {
            pass.quotes.depth += 1;
            pass.quotes.open = true;
        }
        // Unmatched openers take the current level without nesting
        pass.glyphs.opening(pass.quotes.depth).to_string()
    } else {
        if resolver::find_opening(tokens, index, pass.glyphs).is_none() {
            note!(pass, &mut tokens[index], RuleId::Quotes, false);
            return;
        }
        let glyph = pass.glyphs.closing(pass.quotes.depth).to_string();
        pass.quotes.open = false;
        pass.quotes.depth = (pass.quotes.depth - 1).max(-1);
        glyph
    };

    tracing::trace!(index, depth = pass.quotes.depth, %glyph, "quote resolved");

    let token = &mut tokens[index];
    if let Some(mark) = QuoteMark::from_glyph(&glyph) {
        token.mark = Some(mark);
    }
    token.set(TokenKind::Quote, glyph);
    note!(pass, token, RuleId::Quotes);
}

/// A closing quote with no opener after a number is an inch or
/// arc-second mark, unless the number follows `№` or `#`
fn is_double_prime(tokens: &[Token], index: usize, pass: &Pass<'_>) -> bool {
    if resolver::is_opening(tokens, index, pass.glyphs)
        || resolver::find_opening(tokens, index, pass.glyphs).is_some()
    {
        return false;
    }
    let skip = [TokenKind::Space, TokenKind::NonBreakingSpace];
    let Some(number) = navigator::prev_ignoring(tokens, index, &skip)
        .filter(|&i| tokens[i].kind == TokenKind::Number)
    else {
        return false;
    };
    match navigator::prev_ignoring(tokens, number, &skip) {
        Some(before) => !matches!(tokens[before].text().as_ref(), "№" | "#"),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quotes::QuoteGlyphs;
    use crate::tokenizer::{render, Tokenizer};

    fn glyphs() -> QuoteGlyphs {
        QuoteGlyphs::new(vec![
            ("«".to_string(), "»".to_string()),
            ("„".to_string(), "“".to_string()),
        ])
    }

    fn run(text: &str) -> (String, i32) {
        let mut tokens = Tokenizer::new().tokenize(text).tokens;
        let glyphs = glyphs();
        let mut pass = Pass::new(&glyphs, false);
        for i in 0..tokens.len() {
            apostrophe(&mut tokens, i, &mut pass);
            resolve(&mut tokens, i, &mut pass);
        }
        (render(&tokens), pass.quotes.depth)
    }

    #[test]
    fn test_simple_pair() {
        assert_eq!(run("Он сказал \"привет\""), ("Он сказал «привет»".to_string(), -1));
    }

    #[test]
    fn test_nested_quotes() {
        let (text, depth) = run("«Часы \"Электроника ЧН-54\" в корпусе из нержавеющей стали»");
        assert_eq!(text, "«Часы „Электроника ЧН-54“ в корпусе из нержавеющей стали»");
        assert_eq!(depth, -1);
    }

    #[test]
    fn test_inches_become_double_prime() {
        assert_eq!(run("Труба 3/4\"").0, "Труба 3/4″");
        assert_eq!(run("Дом № 5\"").0, "Дом № 5\"");
    }

    #[test]
    fn test_unmatched_opener_keeps_depth() {
        let (text, depth) = run("\"Начало без конца");
        assert_eq!(text, "«Начало без конца");
        assert_eq!(depth, -1);
    }

    #[test]
    fn test_apostrophes() {
        assert_eq!(run("It's").0, "It’s");
        assert_eq!(run("5' длины").0, "5′ длины");
        assert_eq!(run("' a").0, "’ a");
    }

    #[test]
    fn test_empty_glyph_table_disables_quotes() {
        let mut tokens = Tokenizer::new().tokenize("\"a\"").tokens;
        let glyphs = QuoteGlyphs::new(Vec::new());
        let mut pass = Pass::new(&glyphs, false);
        for i in 0..tokens.len() {
            resolve(&mut tokens, i, &mut pass);
        }
        assert_eq!(render(&tokens), "\"a\"");
    }
}
