// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine configuration.

use cavebook_domain::{VariationExclusionRule, default_exclusion_rules};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Zone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "Europe/London";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid timezone '{0}'")]
    InvalidTimezone(String),
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// IANA zone the club's trip times are written in.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Variation exclusion rules.
    #[serde(default = "default_exclusion_rules")]
    pub exclusion_rules: Vec<VariationExclusionRule>,
}

fn default_timezone() -> String {
    String::from(DEFAULT_TIMEZONE)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            exclusion_rules: default_exclusion_rules(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a JSON file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or names an
    /// unknown timezone.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.tz()?;
        Ok(config)
    }

    /// Replaces the timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = timezone.trim().to_string();
        self
    }

    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimezone` for names `chrono-tz` does not know.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(self.timezone.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cavebook_domain::{EventType, ExclusionAudience};

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.timezone, "Europe/London");
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::London);
        assert_eq!(config.exclusion_rules, default_exclusion_rules());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_rules_from_json() {
        let json = r#"{
            "timezone": "Pacific/Auckland",
            "exclusion_rules": [
                { "event_type": "training", "sku_marker": "GUEST", "audience": "members" }
            ]
        }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.tz().unwrap(), chrono_tz::Pacific::Auckland);
        assert_eq!(config.exclusion_rules.len(), 1);
        assert_eq!(config.exclusion_rules[0].event_type, EventType::Training);
        assert_eq!(config.exclusion_rules[0].audience, ExclusionAudience::Members);
    }

    #[test]
    fn test_empty_rule_list_is_kept() {
        let config: EngineConfig = serde_json::from_str(r#"{ "exclusion_rules": [] }"#).unwrap();
        assert!(config.exclusion_rules.is_empty());
    }

    #[test]
    fn test_invalid_timezone() {
        let config = EngineConfig::default().with_timezone("Mendip/Priddy");
        assert!(matches!(config.tz(), Err(ConfigError::InvalidTimezone(name)) if name == "Mendip/Priddy"));
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfig::from_file(Path::new("/nonexistent/cavebook.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
