//! Markup, protected regions and other verbatim content

use typograph_core::{format, RuleOptions, TokenKind};

fn fmt(text: &str) -> String {
    format(text, &RuleOptions::default()).text
}

#[test]
fn test_tag_attributes_untouched() {
    let text = fmt("<a href=\"x--y\">a -- b</a>");
    assert!(text.starts_with("<a href=\"x--y\">"));
    assert!(text.ends_with(" b</a>"));
    assert!(text.contains('—'));
}

#[test]
fn test_script_is_protected() {
    let script = "<script>var a = \"x\" -- 1;</script>";
    let text = fmt(&format!("{script} \"Текст\""));
    assert!(text.starts_with(script));
    assert!(text.ends_with("«Текст»"));
}

#[test]
fn test_multiline_pre_is_protected() {
    let pre = "<pre>\n  a -- b\n\n    \"c\"...\n</pre>";
    assert_eq!(fmt(pre), pre);
}

#[test]
fn test_comment_is_protected() {
    let comment = "<!-- \"a\" -- b -->";
    assert_eq!(fmt(comment), comment);
}

#[test]
fn test_comment_inside_script_and_pre() {
    let script = "<script><!-- var x = 1; --></script>";
    let text = fmt(&format!("a {script} b"));
    assert!(text.contains(script));
    assert!(!text.contains(['\u{e000}', '\u{e001}']));

    let pre = "<pre>код <!-- заметка --> тут</pre>";
    assert_eq!(fmt(pre), pre);
}

#[test]
fn test_pre_inside_block_shortcode() {
    let block = "[caption id=\"1\"]<pre>x  y</pre>[/caption]";
    let text = fmt(&format!("{block} текст"));
    assert!(text.starts_with(block));
    assert!(!text.contains(['\u{e000}', '\u{e001}']));
}

#[test]
fn test_literal_sentinels_are_plain_text() {
    let text = fmt("текст \u{e000}0\u{e001} и <!-- c -->");
    assert!(text.contains("\u{e000}0\u{e001}"));
    assert_eq!(text.matches("<!-- c -->").count(), 1);

    let comment = "<!-- \u{e000}1\u{e001} -->";
    assert_eq!(fmt(comment), comment);
}

#[test]
fn test_shortcodes() {
    let text = fmt("[gallery ids=\"1,2\"] \"Текст\"");
    assert!(text.starts_with("[gallery ids=\"1,2\"]"));
    assert!(text.ends_with("«Текст»"));

    let block = "[code]a -- \"b\"[/code]";
    assert_eq!(fmt(block), block);
}

#[test]
fn test_urls_and_emails() {
    let text = fmt("Смотри https://example.com/a--b \"тут\"");
    assert!(text.contains("https://example.com/a--b"));
    assert!(text.contains("«тут»"));

    assert!(fmt("Пишите: user--x@example.com").contains("user--x@example.com"));
}

#[test]
fn test_escaped_markup_entities_are_kept() {
    assert!(fmt("&lt;b&gt; -- тег").contains("&lt;b&gt;"));
}

#[test]
fn test_tag_tokens_are_returned_unchanged() {
    let input = "<p class=\"a--b\">Текст</p>";
    let result = format(input, &RuleOptions::default());
    let tags: Vec<_> = result
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Tag)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(tags, vec!["<p class=\"a--b\">", "</p>"]);
    assert_eq!(result.text, input);
}
