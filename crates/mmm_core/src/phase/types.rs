use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Day-cycle state gating which gameplay systems are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum Phase {
    #[default]
    None,
    Lobby,
    Day,
    Evening,
    Night,
    End,
}

impl Phase {
    /// Only valid before a match starts
    pub fn is_pre_match(&self) -> bool {
        matches!(self, Phase::None | Phase::Lobby)
    }

    /// Steady states reached while the match is running
    pub fn is_gameplay(&self) -> bool {
        matches!(self, Phase::Day | Phase::Evening | Phase::Night)
    }

    /// Manual cycle order, ignoring the clock
    pub fn next(&self) -> Phase {
        match self {
            Phase::Day => Phase::Evening,
            Phase::Evening => Phase::Night,
            Phase::Night => Phase::Day,
            Phase::End => Phase::Day,
            Phase::None | Phase::Lobby => Phase::Day,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::None => "None",
            Phase::Lobby => "Lobby",
            Phase::Day => "Day",
            Phase::Evening => "Evening",
            Phase::Night => "Night",
            Phase::End => "End",
        };
        f.write_str(name)
    }
}
