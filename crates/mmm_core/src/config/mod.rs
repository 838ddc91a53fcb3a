//! # Match Configuration
//!
//! All tunables for a match live here instead of being scattered across
//! components: phase boundaries, clock speed, role distribution and the
//! optional shuffle seed.
//!
//! ## Usage
//! ```rust
//! use mmm_core::config::MatchConfig;
//!
//! let config = MatchConfig::default();
//! let quick = MatchConfig::quick();
//! let yaml = MatchConfig::from_yaml_str("seed: 7\n").unwrap();
//! assert_eq!(yaml.seed, Some(7));
//! ```

mod clock_config;
mod role_config;

pub use clock_config::{ClockConfig, MINUTES_PER_DAY};
pub use role_config::RoleConfig;

use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ConfigError;

/// Complete match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate, Default)]
#[serde(default)]
pub struct MatchConfig {
    /// Day cycle settings
    #[validate]
    pub clock: ClockConfig,
    /// Role distribution settings
    #[validate]
    pub roles: RoleConfig,
    /// Seed for role shuffles; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl MatchConfig {
    /// Standard pacing (default)
    pub fn classic() -> Self {
        Self::default()
    }

    /// Fast clock for short sessions and playtests
    pub fn quick() -> Self {
        let mut cfg = Self::default();
        cfg.clock.minutes_per_second = 8.0;
        cfg
    }

    /// Fixed seed so every shuffle replays identically
    pub fn deterministic(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);

        let config = match extension.as_deref() {
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&fs::read_to_string(path)?)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat { path: path.display().to_string() })
            }
        };

        log::info!("Loaded match config from {}", path.display());
        Ok(config)
    }

    /// JSON schema for tooling and editor integrations
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(MatchConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.clock.day_start_hour, 6);
        assert_eq!(cfg.clock.evening_start_hour, 18);
        assert_eq!(cfg.clock.night_start_hour, 21);
        assert!((cfg.roles.murderer_ratio - 0.25).abs() < f64::EPSILON);
        assert_eq!(cfg.roles.detective_min_players, 6);
        assert!(cfg.seed.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_quick_runs_faster_clock() {
        assert!(MatchConfig::quick().clock.minutes_per_second > MatchConfig::classic().clock.minutes_per_second);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = MatchConfig::from_json_str(r#"{"clock": {"night_start_hour": 22}, "seed": 3}"#)
            .unwrap();
        assert_eq!(cfg.clock.night_start_hour, 22);
        assert_eq!(cfg.clock.day_start_hour, 6);
        assert_eq!(cfg.seed, Some(3));
    }

    #[test]
    fn test_ratio_out_of_range_rejected() {
        let result = MatchConfig::from_yaml_str("roles:\n  murderer_ratio: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = MatchConfig::from_json_str(r#"{"clock": {"minutes_per_second": -1.0}}"#);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "clock:\n  minutes_per_second: 4.0\nseed: 99").unwrap();

        let cfg = MatchConfig::load(file.path()).unwrap();
        assert!((cfg.clock.minutes_per_second - 4.0).abs() < f64::EPSILON);
        assert_eq!(cfg.seed, Some(99));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"roles": {{"detective_min_players": 8}}}}"#).unwrap();

        let cfg = MatchConfig::load(file.path()).unwrap();
        assert_eq!(cfg.roles.detective_min_players, 8);
    }

    #[test]
    fn test_load_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let result = MatchConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_schema_lists_sections() {
        let schema = serde_json::to_value(MatchConfig::json_schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("clock").is_some());
        assert!(properties.get("roles").is_some());
        assert!(properties.get("seed").is_some());
    }
}
