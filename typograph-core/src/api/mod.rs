//! Public formatting API
//!
//! [`Typograph`] owns a rule set built from [`RuleOptions`] and formats text
//! into a [`ProcessedResult`]. Only option construction can fail.

mod config;
mod error;
mod output;
mod processor;

pub use config::{
    defaults, DashOptions, Ellipsis, Length, NbspOptions, QuotePair, RegMarkStyle, RuleOptions,
    RuleOptionsBuilder, SpecialOptions,
};
pub use error::{Error, Result};
pub use output::{Metrics, ProcessedResult};
pub use processor::{format, Typograph};
