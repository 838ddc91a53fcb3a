//! Role distribution configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// How many of each role a pool receives for a given player count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(default)]
pub struct RoleConfig {
    /// Share of players that become murderers, rounded half away from zero (default: 0.25)
    #[validate(range(min = 0.0, max = 1.0))]
    pub murderer_ratio: f64,
    /// Minimum player count before a detective is dealt (default: 6)
    pub detective_min_players: usize,
    /// Detectives dealt once the threshold is met (default: 1)
    pub detective_count: usize,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self { murderer_ratio: 0.25, detective_min_players: 6, detective_count: 1 }
    }
}
