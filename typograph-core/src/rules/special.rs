//! Special symbols: `©`, `®`, `™`, `±` and the multiplication sign

use regex::Regex;
use std::sync::OnceLock;

use crate::api::RegMarkStyle;
use crate::domain::navigator;
use crate::domain::token::{RuleId, Token, TokenKind};
use crate::rules::{note, Pass};

/// Markup emitted for `(r)` in superscript style
pub const REG_MARK_SUPERSCRIPT: &str = r#"<sup class="reg">&reg;</sup>"#;

fn times_chain() -> &'static Regex {
    static CHAIN: OnceLock<Regex> = OnceLock::new();
    CHAIN.get_or_init(|| Regex::new(r"^(?:[xх]\d+(?:[.,]\d+)?)+$").expect("valid pattern"))
}

fn times_factor() -> &'static Regex {
    static FACTOR: OnceLock<Regex> = OnceLock::new();
    FACTOR.get_or_init(|| Regex::new(r"[xх](\d+(?:[.,]\d+)?)").expect("valid pattern"))
}

pub fn copyright(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    let token = &mut tokens[index];
    if token.kind != TokenKind::Copyright {
        return;
    }
    token.set(TokenKind::Copyright, "©");
    note!(pass, token, RuleId::Copyright);
}

/// `+-` becomes `±`; the hyphen token is removed
pub fn plus_minus(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind != TokenKind::Plus {
        return;
    }
    let minus = index + 1;
    if tokens.get(minus).map(|t| t.kind) != Some(TokenKind::Hyphen) {
        note!(pass, &mut tokens[index], RuleId::PlusMinus, false);
        return;
    }
    // `C++-API`, `?a=1+-b`
    if let Some(prev) = index.checked_sub(1).map(|i| &tokens[i]) {
        if matches!(prev.value.as_str(), "+" | ":" | "=") {
            note!(pass, &mut tokens[index], RuleId::PlusMinus, false);
            return;
        }
    }

    let token = &mut tokens[index];
    token.set(TokenKind::Punctuation, "±");
    token.name = Some("plusmn".to_string());
    note!(pass, token, RuleId::PlusMinus);

    let token = &mut tokens[minus];
    token.remove();
    note!(pass, token, RuleId::PlusMinus);
}

pub fn reg_mark(tokens: &mut [Token], index: usize, style: RegMarkStyle, pass: &mut Pass<'_>) {
    let token = &mut tokens[index];
    if token.kind != TokenKind::Registered {
        return;
    }
    match style {
        // Markup, so the entity formatter leaves it alone
        RegMarkStyle::Superscript => {
            token.set(TokenKind::Tag, REG_MARK_SUPERSCRIPT);
            token.name = Some("sup".to_string());
        }
        RegMarkStyle::Symbol => token.set(TokenKind::Registered, "®"),
    }
    note!(pass, token, RuleId::RegMark);
}

/// `x` or `х` between numbers becomes `×`
pub fn times(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind != TokenKind::Word {
        return;
    }
    concatenated_times(tokens, index, pass);
    spaced_times(tokens, index, pass);
}

/// `150x200`, `10x20x30`: the factors are folded into the leading number
fn concatenated_times(tokens: &mut [Token], index: usize, pass: &Pass<'_>) {
    let Some(number) = index.checked_sub(1) else {
        return;
    };
    if tokens[number].kind != TokenKind::Number || !times_chain().is_match(&tokens[index].value) {
        return;
    }

    let suffix: String = times_factor()
        .captures_iter(&tokens[index].value)
        .map(|factor| format!("×{}", &factor[1]))
        .collect();

    let token = &mut tokens[number];
    let value = format!("{}{suffix}", token.value);
    token.set(TokenKind::Word, value);
    note!(pass, token, RuleId::Times);
    tokens[index].remove();
}

/// `2 x 2`, `10 х 20 х 30`: the surrounding spaces are removed
fn spaced_times(tokens: &mut [Token], index: usize, pass: &Pass<'_>) {
    if !matches!(tokens[index].value.as_str(), "x" | "х") || index < 2 {
        return;
    }
    let kind = |i: usize| tokens.get(i).map(|t| t.kind);
    let number_before = kind(index - 2) == Some(TokenKind::Number)
        && kind(index - 1).is_some_and(TokenKind::is_space);
    let number_after = kind(index + 2) == Some(TokenKind::Number)
        && kind(index + 1).is_some_and(TokenKind::is_space);
    if !number_before || !number_after {
        return;
    }

    let token = &mut tokens[index];
    token.set(TokenKind::Punctuation, "×");
    token.name = Some("times".to_string());
    note!(pass, token, RuleId::Times);
    tokens[index - 1].remove();
    tokens[index + 1].remove();
}

/// `(tm)` becomes `™` unless it stands alone after a space
pub fn trademark(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind != TokenKind::Trademark {
        return;
    }
    let attached = navigator::prev(tokens, index, &[]).is_some_and(|i| !tokens[i].kind.is_space());
    let token = &mut tokens[index];
    if !attached {
        note!(pass, token, RuleId::Trademark, false);
        return;
    }
    token.set(TokenKind::Trademark, "™");
    note!(pass, token, RuleId::Trademark);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quotes::QuoteGlyphs;
    use crate::tokenizer::{render, Tokenizer};

    fn run(text: &str, rule: fn(&mut [Token], usize, &mut Pass<'_>)) -> String {
        let mut tokens = Tokenizer::new().tokenize(text).tokens;
        let glyphs = QuoteGlyphs::new(Vec::new());
        let mut pass = Pass::new(&glyphs, false);
        for i in 0..tokens.len() {
            rule(&mut tokens, i, &mut pass);
        }
        render(&tokens)
    }

    #[test]
    fn test_copyright_variants() {
        assert_eq!(run("(c) 2024", copyright), "© 2024");
        assert_eq!(run("(С) Автор", copyright), "© Автор");
    }

    #[test]
    fn test_plus_minus() {
        assert_eq!(run("5 +-2", plus_minus), "5 ±2");
        assert_eq!(run("C++-API", plus_minus), "C++-API");
        assert_eq!(run("a=1+-b", plus_minus), "a=1±b");
    }

    #[test]
    fn test_reg_mark_styles() {
        let mut tokens = Tokenizer::new().tokenize("Brand(R)").tokens;
        let glyphs = QuoteGlyphs::new(Vec::new());
        let mut pass = Pass::new(&glyphs, false);
        reg_mark(&mut tokens, 1, RegMarkStyle::Superscript, &mut pass);
        assert_eq!(tokens[1].kind, TokenKind::Tag);
        assert_eq!(tokens[1].name.as_deref(), Some("sup"));
        assert_eq!(render(&tokens), "Brand<sup class=\"reg\">&reg;</sup>");

        let mut tokens = Tokenizer::new().tokenize("Brand(r)").tokens;
        reg_mark(&mut tokens, 1, RegMarkStyle::Symbol, &mut pass);
        assert_eq!(render(&tokens), "Brand®");
    }

    #[test]
    fn test_times() {
        assert_eq!(run("150x200", times), "150×200");
        assert_eq!(run("10x20x30 мм", times), "10×20×30 мм");
        assert_eq!(run("2 x 2", times), "2×2");
        assert_eq!(run("10 х 20 х 30", times), "10×20×30");
        assert_eq!(run("2 X 2", times), "2 X 2");
        assert_eq!(run("x200foo", times), "x200foo");
    }

    #[test]
    fn test_trademark() {
        assert_eq!(run("Brand(tm)", trademark), "Brand™");
        assert_eq!(run("Brand (tm)", trademark), "Brand (tm)");
    }
}
