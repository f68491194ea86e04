//! Non-breaking space placement

use typograph_core::{format, Length, RuleId, RuleOptions};

const NBSP: char = '\u{a0}';

fn fmt(text: &str) -> String {
    format(text, &RuleOptions::default()).text
}

#[test]
fn test_short_words() {
    assert_eq!(fmt("Он был в доме"), "Он\u{a0}был в\u{a0}доме");
    assert_eq!(fmt("Я бы подумал"), "Я\u{a0}бы подумал");
}

#[test]
fn test_short_word_length_is_configurable() {
    let off = RuleOptions::builder().short_word(Length::Off).build().unwrap();
    assert_eq!(format("Он был в доме", &off).text, "Он был в доме");

    let three = RuleOptions::builder().short_word(Length::Max(3)).build().unwrap();
    assert_eq!(format("Над нами", &three).text, "Над\u{a0}нами");
    assert_eq!(fmt("Над нами"), "Над нами");
}

#[test]
fn test_initials() {
    assert_eq!(fmt("А. С. Пушкин"), "А.\u{a0}С.\u{a0}Пушкин");
}

#[test]
fn test_numbers() {
    assert_eq!(fmt("Вес 5 кг"), "Вес 5\u{a0}кг");
    assert_eq!(
        format("Палата № 6", &RuleOptions::named()).text,
        "Палата &#8470;&nbsp;6"
    );
}

#[test]
fn test_dialogue_dash() {
    assert_eq!(fmt("— Привет"), "—\u{a0}Привет");
}

#[test]
fn test_emoji_neighbour_stays_breakable() {
    assert!(!fmt("в 😀").contains(NBSP));
}

#[test]
fn test_line_break_tags_block_binding() {
    let text = "<p>Текст в</p> <p>Новой строке</p>";
    assert_eq!(fmt(text), text);
}

#[test]
fn test_debug_provenance() {
    let options = RuleOptions::builder().debug(true).build().unwrap();
    let result = format("И так далее", &options);
    assert_eq!(result.tokens[1].value, NBSP.to_string());
    assert!(result.tokens[1].touched_by(RuleId::NbspShortWord));

    let result = format("И так далее", &RuleOptions::default());
    assert!(result.tokens[1].provenance.is_none());
}

#[test]
fn test_nbsp_family_disabled() {
    let options = RuleOptions::builder().without_nbsp().build().unwrap();
    assert!(!format("Он был в доме — да", &options).text.contains(NBSP));
}
