//! Output types for the formatting API

use serde::Serialize;
use std::time::Duration;

use crate::domain::token::Token;

/// Result of one `format` call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessedResult {
    /// Formatted text
    pub text: String,
    /// Final token stream; empty when the input was returned verbatim
    pub tokens: Vec<Token>,
    pub metrics: Metrics,
}

impl ProcessedResult {
    /// At most `limit` tokens from the start of the stream
    pub fn tokens_limited(&self, limit: usize) -> &[Token] {
        &self.tokens[..limit.min(self.tokens.len())]
    }
}

/// Sizes and timings of one `format` call.
///
/// Lengths are counted in Unicode scalar values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub input_len: usize,
    pub output_len: usize,
    /// Lines seen by the tokenizer, zero if tokenization was skipped
    pub line_count: usize,
    pub tokenize_time: Duration,
    pub process_time: Duration,
    pub total_time: Duration,
}

impl Metrics {
    /// Metrics for an input returned unchanged
    pub(crate) fn verbatim(text: &str, elapsed: Duration) -> Self {
        let len = text.chars().count();
        Self {
            input_len: len,
            output_len: len,
            total_time: elapsed,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::TokenKind;

    #[test]
    fn test_tokens_limited() {
        let result = ProcessedResult {
            tokens: vec![
                Token::new(TokenKind::Word, "a"),
                Token::new(TokenKind::Space, " "),
                Token::new(TokenKind::Word, "b"),
            ],
            ..ProcessedResult::default()
        };
        assert_eq!(result.tokens_limited(2).len(), 2);
        assert_eq!(result.tokens_limited(10).len(), 3);
        assert!(result.tokens_limited(0).is_empty());
    }

    #[test]
    fn test_verbatim_metrics() {
        let metrics = Metrics::verbatim("ёж", Duration::ZERO);
        assert_eq!(metrics.input_len, 2);
        assert_eq!(metrics.output_len, 2);
        assert_eq!(metrics.line_count, 0);
    }
}
