//! Property-based checks of tokenizer and pipeline invariants

use proptest::prelude::*;
use typograph_core::rules::RuleSet;
use typograph_core::tokenizer::{render, Tokenizer};
use typograph_core::{format, RuleOptions, TokenKind};

fn word() -> impl Strategy<Value = String> {
    "[a-zа-я0-9.,!?\"«»—-]{1,12}"
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..8).prop_map(|words| words.join(" "))
}

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        word(),
        Just("<b class=\"x--y\">".to_string()),
        Just("</b>".to_string()),
        Just("<br/>".to_string()),
        Just("<!-- \"a\" -- b -->".to_string()),
        nested_region(),
        sentinel(),
    ]
}

/// Protected regions holding other protected regions
fn nested_region() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("<script><!-- var x = 1; --></script>".to_string()),
        Just("<style>/* a */ <!-- b --></style>".to_string()),
        Just("<pre>a <!-- \"b\" --> c</pre>".to_string()),
        Just("[code]<pre>x -- y</pre>[/code]".to_string()),
        Just("<pre><!-- \u{e000}0\u{e001} --></pre>".to_string()),
    ]
}

/// Private-use characters the tokenizer uses internally
fn sentinel() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("\u{e000}0\u{e001}".to_string()),
        Just("\u{e000}".to_string()),
        Just("\u{e001}".to_string()),
    ]
}

fn quoted_text() -> impl Strategy<Value = String> {
    let plain = "[a-zа-я]{1,8}";
    let quoted = "[a-zа-я]{1,8}".prop_map(|w| format!("\"{w}\""));
    prop::collection::vec(prop_oneof![plain, quoted], 1..10).prop_map(|parts| parts.join(" "))
}

fn tag_values(tokens: &[typograph_core::Token]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Tag)
        .map(|t| t.value.clone())
        .collect()
}

proptest! {
    #[test]
    fn tokens_render_back_to_normalised_input(text in sentence()) {
        let tokenized = Tokenizer::new().tokenize(&text);
        prop_assert_eq!(render(&tokenized.tokens), text);
    }

    #[test]
    fn markup_survives_formatting(parts in prop::collection::vec(fragment(), 1..10)) {
        let text = parts.join(" ");
        let before = tag_values(&Tokenizer::new().tokenize(&text).tokens);
        let after = tag_values(&format(&text, &RuleOptions::default()).tokens);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn protected_regions_survive_verbatim(parts in prop::collection::vec(fragment(), 1..10)) {
        let text = parts.join(" ");
        let output = format(&text, &RuleOptions::default()).text;
        for part in parts.iter().filter(|p| p.starts_with(['<', '['])) {
            prop_assert!(output.contains(part.as_str()), "{part:?} lost in {output:?}");
        }
        for sentinel in ['\u{e000}', '\u{e001}'] {
            prop_assert_eq!(output.matches(sentinel).count(), text.matches(sentinel).count());
        }
    }

    #[test]
    fn balanced_quotes_close_every_level(text in quoted_text()) {
        let mut tokens = Tokenizer::new().tokenize(&text).tokens;
        let state = RuleSet::from_options(&RuleOptions::default()).run(&mut tokens);
        prop_assert_eq!(state.depth, -1);
    }

    #[test]
    fn formatting_never_panics(text in "\\PC{0,64}") {
        let _ = format(&text, &RuleOptions::named());
    }
}
