//! Main typograph processor implementation

use regex::Regex;
use std::sync::OnceLock;
use std::time::Instant;

use crate::api::{Metrics, ProcessedResult, Result, RuleOptions};
use crate::entities;
use crate::rules::RuleSet;
use crate::tokenizer::{self, Tokenizer};

/// First line of a serialized scalar (`s:5:"hello";`, `i:42;`, `N;`)
fn serialized_scalar() -> &'static Regex {
    static SERIALIZED: OnceLock<Regex> = OnceLock::new();
    SERIALIZED.get_or_init(|| Regex::new(r"^[abdisON]:.*;").expect("valid pattern"))
}

/// Typography formatter with a fixed rule set.
///
/// Cheap to share: formatting takes `&self` and keeps all per-call state
/// (quote nesting included) on the stack, so one instance can serve many
/// threads.
#[derive(Debug, Clone)]
pub struct Typograph {
    tokenizer: Tokenizer,
    rules: RuleSet,
    options: RuleOptions,
}

impl Default for Typograph {
    fn default() -> Self {
        Self::build(RuleOptions::default())
    }
}

impl Typograph {
    /// Create a formatter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options
    pub fn with_options(options: RuleOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    /// Create a formatter from an embedded preset
    pub fn with_preset(name: &str) -> Result<Self> {
        Self::with_options(RuleOptions::preset(name)?)
    }

    fn build(options: RuleOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            rules: RuleSet::from_options(&options),
            options,
        }
    }

    /// Format `text`
    pub fn process(&self, text: &str) -> ProcessedResult {
        let start = Instant::now();

        if text.is_empty() || serialized_scalar().is_match(text) {
            tracing::debug!(len = text.len(), "input returned verbatim");
            return ProcessedResult {
                text: text.to_string(),
                tokens: Vec::new(),
                metrics: Metrics::verbatim(text, start.elapsed()),
            };
        }

        let input_len = text.chars().count();
        let tokenized = self.tokenizer.tokenize(text);
        let tokenize_time = start.elapsed();

        if tokenized.line_count == 0 {
            tracing::debug!("blank input");
            return ProcessedResult {
                metrics: Metrics {
                    input_len,
                    tokenize_time,
                    total_time: start.elapsed(),
                    ..Metrics::default()
                },
                ..ProcessedResult::default()
            };
        }

        let process_start = Instant::now();
        let mut tokens = tokenized.tokens;
        let quotes = self.rules.run(&mut tokens);
        entities::apply(&mut tokens, self.options.entities);
        let output = tokenizer::render(&tokens);
        let process_time = process_start.elapsed();

        tracing::debug!(
            tokens = tokens.len(),
            quote_depth = quotes.depth,
            ?process_time,
            "formatted input"
        );

        ProcessedResult {
            metrics: Metrics {
                input_len,
                output_len: output.chars().count(),
                line_count: tokenized.line_count,
                tokenize_time,
                process_time,
                total_time: start.elapsed(),
            },
            text: output,
            tokens,
        }
    }

    /// Get the current options
    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// Enabled rules in execution order
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

/// Format `text` with `options` in one call.
///
/// Never fails: options are used as given without [`RuleOptions`]
/// validation. A zero length disables its rule and quote pairs with an empty
/// glyph are ignored. Use [`Typograph::with_options`] to reject such options.
pub fn format(text: &str, options: &RuleOptions) -> ProcessedResult {
    Typograph::build(options.clone()).process(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let result = Typograph::new().process("");
        assert_eq!(result.text, "");
        assert!(result.tokens.is_empty());
    }

    #[test]
    fn test_serialized_scalars_are_verbatim() {
        let typograph = Typograph::new();
        for input in ["s:5:\"a - b\";", "i:42;", "a:1:{i:0;s:3:\"...\";}"] {
            assert_eq!(typograph.process(input).text, input);
        }
    }

    #[test]
    fn test_blank_input_becomes_empty() {
        let result = Typograph::new().process("  \n\t \n");
        assert_eq!(result.text, "");
        assert_eq!(result.metrics.line_count, 0);
        assert_eq!(result.metrics.input_len, 6);
    }

    #[test]
    fn test_metrics() {
        let result = Typograph::new().process("Привет...");
        assert_eq!(result.text, "Привет…");
        assert_eq!(result.metrics.input_len, 9);
        assert_eq!(result.metrics.output_len, 7);
        assert_eq!(result.metrics.line_count, 1);
        assert!(result.metrics.total_time >= result.metrics.tokenize_time);
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let options = RuleOptions {
            quotes: vec![crate::api::QuotePair::new("", "»")],
            ..RuleOptions::default()
        };
        assert!(Typograph::with_options(options).is_err());
    }

    #[test]
    fn test_free_function_tolerates_invalid_options() {
        let mut options = RuleOptions {
            quotes: vec![crate::api::QuotePair::new("", "»")],
            ..RuleOptions::default()
        };
        options.nbsp.short_word = crate::api::Length::Max(0);
        assert_eq!(format("Он и \"Да\"", &options).text, "Он и \"Да\"");
    }

    #[test]
    fn test_free_function_matches_processor() {
        let options = RuleOptions::named();
        let text = "Он сказал: \"Да\"";
        assert_eq!(
            format(text, &options).text,
            Typograph::with_options(options.clone()).unwrap().process(text).text
        );
    }
}
