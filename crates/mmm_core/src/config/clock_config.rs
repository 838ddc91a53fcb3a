//! Day-cycle clock configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Minutes in one in-game day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Phase boundaries and clock speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(default)]
pub struct ClockConfig {
    /// Hour at which Day begins (default: 6)
    pub day_start_hour: u8,
    /// Hour at which Evening begins (default: 18)
    pub evening_start_hour: u8,
    /// Hour at which Night begins; night wraps past midnight until `day_start_hour` (default: 21)
    pub night_start_hour: u8,
    /// Clock position at match start and after a reset, in minutes since midnight (default: 360)
    #[validate(range(min = 0.0, max = 1440.0))]
    pub start_time_minutes: f64,
    /// In-game minutes that pass per real second (default: 2.0, a 12 minute day)
    #[validate(range(min = 0.0))]
    pub minutes_per_second: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            evening_start_hour: 18,
            night_start_hour: 21,
            start_time_minutes: 6.0 * 60.0,
            minutes_per_second: 2.0,
        }
    }
}
