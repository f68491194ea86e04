//! Ellipsis normalization, in one direction or the other

use crate::domain::token::{RuleId, Token, TokenKind};
use crate::rules::{note, Pass};

pub fn three_dots_to_ellipsis(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    let token = &mut tokens[index];
    if token.kind == TokenKind::ThreeDots {
        token.set(TokenKind::Ellipsis, "…");
        note!(pass, token, RuleId::ThreeDotsToEllipsis);
    }
}

pub fn ellipsis_to_three_dots(tokens: &mut [Token], index: usize, pass: &mut Pass<'_>) {
    let token = &mut tokens[index];
    if token.kind == TokenKind::Ellipsis {
        token.set(TokenKind::ThreeDots, "...");
        note!(pass, token, RuleId::EllipsisToThreeDots);
    }
}
