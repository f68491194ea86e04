//! Entity output forms

use typograph_core::{format, EntityFormat, RuleOptions};

fn encoded(text: &str, entities: EntityFormat) -> String {
    let options = RuleOptions {
        entities,
        ..RuleOptions::disabled()
    };
    format(text, &options).text
}

#[test]
fn test_output_forms() {
    assert_eq!(encoded("a © b", EntityFormat::Named), "a &copy; b");
    assert_eq!(encoded("a © b", EntityFormat::Numeric), "a &#169; b");
    assert_eq!(encoded("a © b", EntityFormat::Hex), "a &#xa9; b");
    assert_eq!(encoded("a © b", EntityFormat::Raw), "a © b");
}

#[test]
fn test_non_breaking_space() {
    assert_eq!(encoded("a\u{a0}b", EntityFormat::Named), "a&nbsp;b");
    assert_eq!(encoded("a\u{a0}b", EntityFormat::Numeric), "a&#160;b");
}

#[test]
fn test_apostrophe_and_numeric_only_characters() {
    assert_eq!(encoded("It's", EntityFormat::Named), "It&#039;s");
    assert_eq!(encoded("№ 5", EntityFormat::Named), "&#8470; 5");
    assert_eq!(encoded("из\u{2011}за", EntityFormat::Named), "из&#8209;за");
}

#[test]
fn test_ruble_sign() {
    assert_eq!(encoded("100 ₽", EntityFormat::Named), "100 ₽");
    assert_eq!(encoded("100 ₽", EntityFormat::Numeric), "100 &#8381;");
}

#[test]
fn test_existing_references_are_kept() {
    assert_eq!(encoded("&amp;copy; текст", EntityFormat::Named), "&amp;copy; текст");
    assert_eq!(encoded("a &mdash; b", EntityFormat::Raw), "a &mdash; b");
    assert_eq!(encoded("a &#8212; b", EntityFormat::Named), "a &#8212; b");
}

#[test]
fn test_format_names_parse() {
    for format in EntityFormat::all() {
        assert_eq!(format.as_str().parse::<EntityFormat>().unwrap(), format);
    }
    assert!("html".parse::<EntityFormat>().is_err());
}
