use std::env;

use crate::speech::DEFAULT_SEPARATOR;

pub const SEPARATOR_ENV: &str = "GREENTIC_LG_SEPARATOR";

/// Generator defaults applied when a request leaves them unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub default_separator: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            default_separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl GeneratorSettings {
    /// Reads overrides from `GREENTIC_LG_SEPARATOR`; blank values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(separator) = lookup(SEPARATOR_ENV).filter(|value| !value.trim().is_empty()) {
            settings.default_separator = separator;
        }
        settings
    }
}
