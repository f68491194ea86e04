//! Context navigation over a token sequence
//!
//! Every lookup starts next to an index and walks outwards. Removed tokens
//! are always skipped. Markup is skipped unless the filter asks for
//! [`TokenKind::Tag`], which stands for any markup kind. A non-empty filter
//! turns the lookup into an adjacency test: the first token that survives
//! skipping must match the filter, otherwise the lookup yields `None`.

use crate::domain::text::LINE_BREAK_TAGS;
use crate::domain::token::{Token, TokenKind};

fn accepts(filter: &[TokenKind], kind: TokenKind) -> bool {
    filter.is_empty()
        || filter
            .iter()
            .any(|&f| f == kind || (f == TokenKind::Tag && kind.is_markup()))
}

fn scan<I, F>(tokens: &[Token], indices: I, filter: &[TokenKind], skip: Option<F>) -> Option<usize>
where
    I: Iterator<Item = usize>,
    F: Fn(&Token) -> bool,
{
    let wants_markup = filter.contains(&TokenKind::Tag);
    for i in indices {
        let token = &tokens[i];
        if token.is_removed() {
            continue;
        }
        let skipped = match &skip {
            Some(skip) => skip(token),
            None => token.kind.is_markup() && !wants_markup,
        };
        if skipped {
            continue;
        }
        return accepts(filter, token.kind).then_some(i);
    }
    None
}

/// Nearest meaningful token before `index`, if it matches `filter`
pub fn prev(tokens: &[Token], index: usize, filter: &[TokenKind]) -> Option<usize> {
    scan(tokens, (0..index).rev(), filter, None::<fn(&Token) -> bool>)
}

/// Nearest meaningful token after `index`, if it matches `filter`
pub fn next(tokens: &[Token], index: usize, filter: &[TokenKind]) -> Option<usize> {
    scan(tokens, index + 1..tokens.len(), filter, None::<fn(&Token) -> bool>)
}

/// Like [`prev`], with a custom skip predicate replacing the markup default
pub fn prev_skipping<F>(tokens: &[Token], index: usize, filter: &[TokenKind], skip: F) -> Option<usize>
where
    F: Fn(&Token) -> bool,
{
    scan(tokens, (0..index).rev(), filter, Some(skip))
}

/// Nearest token before `index` whose kind is not in `ignore`
pub fn prev_ignoring(tokens: &[Token], index: usize, ignore: &[TokenKind]) -> Option<usize> {
    scan(
        tokens,
        (0..index).rev(),
        &[],
        Some(|t: &Token| t.kind.is_markup() || ignore.contains(&t.kind)),
    )
}

/// Nearest token after `index` whose kind is not in `ignore`
pub fn next_ignoring(tokens: &[Token], index: usize, ignore: &[TokenKind]) -> Option<usize> {
    scan(
        tokens,
        index + 1..tokens.len(),
        &[],
        Some(|t: &Token| t.kind.is_markup() || ignore.contains(&t.kind)),
    )
}

/// Markup whose tag name starts a new visual line
pub fn is_line_break_tag(token: &Token) -> bool {
    token.kind.is_markup()
        && token
            .name
            .as_deref()
            .is_some_and(|name| LINE_BREAK_TAGS.contains(&name))
}

/// Whether the token at `index` begins a sentence
pub fn is_at_sentence_start(tokens: &[Token], index: usize) -> bool {
    if let Some(tag) = prev(tokens, index, &[TokenKind::Tag]) {
        if is_line_break_tag(&tokens[tag]) {
            return true;
        }
    }

    if prev(tokens, index, &[]).is_none() {
        return true;
    }

    let Some(space) = prev(tokens, index, &[TokenKind::Space]) else {
        return prev(tokens, index, &[TokenKind::NewLine]).is_some();
    };

    match prev(tokens, space, &[]) {
        None => true,
        Some(before) => crate::domain::text::is_end_of_sentence(&tokens[before].text()),
    }
}

/// Token opens its line (only markup before it) and is followed by a space
pub fn is_at_line_start_with_space(tokens: &[Token], index: usize) -> bool {
    if next(tokens, index, &[TokenKind::Space]).is_none() {
        return false;
    }

    for token in tokens[..index].iter().rev() {
        match token.kind {
            TokenKind::NewLine => return true,
            kind if kind.is_markup() || kind == TokenKind::Removed => continue,
            _ => return false,
        }
    }
    true
}

/// Both neighbours are numbers
pub fn is_surrounded_by_numbers(tokens: &[Token], index: usize) -> bool {
    prev(tokens, index, &[TokenKind::Number]).is_some()
        && next(tokens, index, &[TokenKind::Number]).is_some()
}

/// Both neighbours are spaces, regular or non-breaking
pub fn is_surrounded_by_spaces(tokens: &[Token], index: usize) -> bool {
    const SPACES: [TokenKind; 2] = [TokenKind::Space, TokenKind::NonBreakingSpace];
    prev(tokens, index, &SPACES).is_some() && next(tokens, index, &SPACES).is_some()
}

/// The markup runs on either side of the space at `index` contain a
/// line-breaking tag
pub fn touches_line_break(tokens: &[Token], index: usize) -> bool {
    let adjacent = |t: &&Token| t.kind.is_markup() || t.is_removed();
    tokens[..index]
        .iter()
        .rev()
        .take_while(adjacent)
        .chain(tokens[index + 1..].iter().take_while(adjacent))
        .any(is_line_break_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(kind: TokenKind, value: &str) -> Token {
        Token::new(kind, value)
    }

    fn tag(name: &str) -> Token {
        Token::markup(TokenKind::Tag, name, format!("<{name}>"))
    }

    #[test]
    fn test_prev_skips_markup_and_removed() {
        let tokens = vec![
            t(TokenKind::Word, "a"),
            tag("b"),
            t(TokenKind::Removed, ""),
            t(TokenKind::Space, " "),
        ];
        assert_eq!(prev(&tokens, 3, &[]), Some(0));
        assert_eq!(prev(&tokens, 3, &[TokenKind::Word]), Some(0));
        assert_eq!(prev(&tokens, 3, &[TokenKind::Number]), None);
        assert_eq!(prev(&tokens, 3, &[TokenKind::Tag]), Some(1));
    }

    #[test]
    fn test_next_filter_is_adjacency() {
        let tokens = vec![
            t(TokenKind::Word, "a"),
            t(TokenKind::Space, " "),
            t(TokenKind::Word, "b"),
        ];
        assert_eq!(next(&tokens, 0, &[TokenKind::Space]), Some(1));
        assert_eq!(next(&tokens, 0, &[TokenKind::Word]), None);
        assert_eq!(next(&tokens, 2, &[]), None);
    }

    #[test]
    fn test_prev_skipping_keeps_shortcodes() {
        let tokens = vec![
            Token::markup(TokenKind::Shortcode, "shortcode", "[b]"),
            tag("i"),
            t(TokenKind::Space, " "),
        ];
        let found = prev_skipping(&tokens, 2, &[], |tok| tok.kind == TokenKind::Tag);
        assert_eq!(found, Some(0));
    }

    #[test]
    fn test_ignoring_lookups() {
        let tokens = vec![
            t(TokenKind::Word, "a"),
            t(TokenKind::Space, " "),
            tag("b"),
            t(TokenKind::Number, "1"),
        ];
        assert_eq!(prev_ignoring(&tokens, 3, &[TokenKind::Space]), Some(0));
        assert_eq!(next_ignoring(&tokens, 0, &[TokenKind::Space]), Some(3));
    }

    #[test]
    fn test_sentence_start() {
        let tokens = vec![
            t(TokenKind::Word, "Да"),
            t(TokenKind::Dot, "."),
            t(TokenKind::Space, " "),
            t(TokenKind::EmDash, "—"),
        ];
        assert!(is_at_sentence_start(&tokens, 0));
        assert!(is_at_sentence_start(&tokens, 3));

        let tokens = vec![
            t(TokenKind::Word, "Да"),
            t(TokenKind::Space, " "),
            t(TokenKind::EmDash, "—"),
        ];
        assert!(!is_at_sentence_start(&tokens, 2));

        let tokens = vec![tag("p"), t(TokenKind::EmDash, "—")];
        assert!(is_at_sentence_start(&tokens, 1));
    }

    #[test]
    fn test_line_start_with_space() {
        let tokens = vec![
            t(TokenKind::Word, "a"),
            t(TokenKind::NewLine, "\n"),
            tag("b"),
            t(TokenKind::Hyphen, "-"),
            t(TokenKind::Space, " "),
        ];
        assert!(is_at_line_start_with_space(&tokens, 3));
        assert!(!is_at_line_start_with_space(&tokens, 0));
    }

    #[test]
    fn test_surroundings() {
        let tokens = vec![
            t(TokenKind::Number, "1"),
            t(TokenKind::EnDash, "–"),
            t(TokenKind::Number, "2"),
        ];
        assert!(is_surrounded_by_numbers(&tokens, 1));
        assert!(!is_surrounded_by_spaces(&tokens, 1));
    }

    #[test]
    fn test_touches_line_break() {
        let tokens = vec![
            t(TokenKind::Word, "в"),
            tag("p"),
            t(TokenKind::Space, " "),
            tag("b"),
            t(TokenKind::Word, "x"),
        ];
        assert!(touches_line_break(&tokens, 2));

        let tokens = vec![t(TokenKind::Word, "в"), t(TokenKind::Space, " "), tag("b")];
        assert!(!touches_line_break(&tokens, 1));
    }
}
