//! Quote nesting, apostrophes and primes

use typograph_core::{format, RuleOptions, TokenKind};

fn fmt(text: &str) -> String {
    format(text, &RuleOptions::default()).text
}

fn plain() -> RuleOptions {
    RuleOptions::builder()
        .without_dash()
        .without_nbsp()
        .build()
        .unwrap()
}

#[test]
fn test_straight_quotes() {
    assert_eq!(fmt("\"Электроника\""), "«Электроника»");
    assert_eq!(fmt("Часы \"Электроника\""), "Часы «Электроника»");
}

#[test]
fn test_nested_quotes() {
    let result = format("\"Завод \"ЧН-54\" открыт\"", &plain());
    assert_eq!(result.text, "«Завод „ЧН-54“ открыт»");
}

#[test]
fn test_existing_guillemets_untouched() {
    assert_eq!(fmt("«ООО «Рога копыта»"), "«ООО «Рога копыта»");
}

#[test]
fn test_quotes_across_lines() {
    assert_eq!(
        fmt("(глава «Записок» Мертвого дома)\n(Из книги «Истина и метод»)"),
        "(глава «Записок» Мертвого дома)\n(Из\u{a0}книги «Истина и\u{a0}метод»)"
    );
}

#[test]
fn test_apostrophes_inside_quotes() {
    assert_eq!(fmt("\"Hello 'world'\""), "«Hello ’world’»");
}

#[test]
fn test_inch_mark_after_number() {
    assert_eq!(fmt("Труба 3/4\""), "Труба 3/4″");
    assert_eq!(
        format("Труба 3/4\"", &RuleOptions::named()).text,
        "Труба 3/4&Prime;"
    );
}

#[test]
fn test_numero_is_not_a_measure() {
    let result = format("Дом № 5\"", &plain());
    assert!(!result.text.contains('″'));
}

#[test]
fn test_quotes_disabled() {
    let options = RuleOptions::from_toml_str("quotes = false").unwrap();
    assert_eq!(format("\"a\"", &options).text, "\"a\"");
}

#[test]
fn test_custom_quote_table() {
    let options = RuleOptions::builder()
        .quotes([("“", "”"), ("‘", "’")])
        .without_nbsp()
        .build()
        .unwrap();
    assert_eq!(
        format("He said \"hi \"there\"\"", &options).text,
        "He said “hi ‘there’”"
    );
}

#[test]
fn test_quote_tokens_carry_kind() {
    let result = format("\"a\"", &RuleOptions::default());
    let quotes: Vec<_> = result
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Quote)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(quotes, vec!["«", "»"]);
}
