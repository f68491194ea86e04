//! Embedded option presets
//!
//! Presets are TOML files compiled into the binary and parsed once on first
//! access.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::api::{Error, Result, RuleOptions};

/// Name and source of every embedded preset
const EMBEDDED: [(&str, &str); 3] = [
    ("default", include_str!("../../configs/presets/default.toml")),
    ("named", include_str!("../../configs/presets/named.toml")),
    ("minimal", include_str!("../../configs/presets/minimal.toml")),
];

static PRESETS: OnceLock<HashMap<&'static str, RuleOptions>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, RuleOptions> {
    PRESETS.get_or_init(|| {
        let mut map = HashMap::new();
        for (name, source) in EMBEDDED {
            match RuleOptions::from_toml_str(source) {
                Ok(options) => {
                    map.insert(name, options);
                }
                Err(e) => {
                    tracing::warn!(preset = name, error = %e, "failed to load embedded preset");
                }
            }
        }
        map
    })
}

/// Options of the preset called `name`
pub fn get(name: &str) -> Result<RuleOptions> {
    registry()
        .get(name)
        .cloned()
        .ok_or_else(|| Error::UnknownPreset(name.to_string()))
}

/// Names of the available presets, sorted
pub fn list_presets() -> Vec<&'static str> {
    let mut names: Vec<_> = registry().keys().copied().collect();
    names.sort_unstable();
    names
}
