//! Non-breaking spaces around initials (`А. С. Пушкин`)

use crate::domain::navigator;
use crate::domain::text;
use crate::domain::token::{RuleId, Token, TokenKind};
use crate::rules::nbsp::nbsp;
use crate::rules::{note, Pass};

const SKIP: [TokenKind; 4] = [
    TokenKind::Initial,
    TokenKind::Tag,
    TokenKind::Space,
    TokenKind::NonBreakingSpace,
];

pub fn apply(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    if tokens[index].kind != TokenKind::Initial {
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
        note!(pass, &mut tokens[space], RuleId::NbspInitial, false);
        return;
    };

    if text::ends_with_nonzero_digit(&tokens[left].value) {
        nbsp!(tokens, space, RuleId::NbspInitial, pass);
        return;
    }

    // Surname first: `Пушкин А. С.`
    if tokens[left].kind != TokenKind::Word || !text::is_upper_first(&tokens[left].value) {
        note!(pass, &mut tokens[space], RuleId::NbspInitial, false);
        return;
    }

    match navigator::next_ignoring(tokens, index, &SKIP) {
        Some(right) if text::is_upper_first(&tokens[right].value) => {
            note!(pass, &mut tokens[space], RuleId::NbspInitial, false);
        }
        _ => nbsp!(tokens, space, RuleId::NbspInitial, pass),
    }
}

fn after(tokens: &mut [Token], index: usize, pass: &Pass<'_>) {
    let Some(space) = navigator::next(tokens, index, &[TokenKind::Space]) else {
        return;
    };
    let Some(right) = navigator::next(tokens, space, &[]) else {
        note!(pass, &mut tokens[space], RuleId::NbspInitial, false);
        return;
    };

    if tokens[right].kind == TokenKind::Initial {
        nbsp!(tokens, space, RuleId::NbspInitial, pass);
        return;
    }
    if !text::is_upper_first(&tokens[right].value) {
        return;
    }

    // Initials followed by a surname bind unless a capitalised word or a
    // number already precedes the initials
    let Some(left) = navigator::prev_ignoring(tokens, index, &SKIP) else {
        nbsp!(tokens, space, RuleId::NbspInitial, pass);
        return;
    };
    let left = &tokens[left];
    let blocked = (left.kind == TokenKind::Word && text::is_upper_first(&left.value))
        || text::ends_with_nonzero_digit(&left.value);
    if blocked {
        note!(pass, &mut tokens[space], RuleId::NbspInitial, false);
    } else {
        nbsp!(tokens, space, RuleId::NbspInitial, pass);
    }
}
