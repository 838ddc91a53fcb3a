use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Secret identity dealt to a player for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum PlayerRole {
    #[default]
    Civilian,
    Murderer,
    Detective,
}

/// Win-condition grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Team {
    Murderers,
    Innocents,
}

impl PlayerRole {
    pub const ALL: [PlayerRole; 3] =
        [PlayerRole::Murderer, PlayerRole::Detective, PlayerRole::Civilian];

    pub fn team(&self) -> Team {
        match self {
            PlayerRole::Murderer => Team::Murderers,
            PlayerRole::Detective | PlayerRole::Civilian => Team::Innocents,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerRole::Civilian => "Civilian",
            PlayerRole::Murderer => "Murderer",
            PlayerRole::Detective => "Detective",
        }
    }
}

impl Team {
    pub fn display_name(&self) -> &'static str {
        match self {
            Team::Murderers => "Murderers",
            Team::Innocents => "Innocents",
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_mapping() {
        assert_eq!(PlayerRole::Murderer.team(), Team::Murderers);
        assert_eq!(PlayerRole::Detective.team(), Team::Innocents);
        assert_eq!(PlayerRole::Civilian.team(), Team::Innocents);
    }

    #[test]
    fn test_team_name_matches_winner_display() {
        assert_eq!(Team::Innocents.to_string(), "Innocents");
        assert_eq!(Team::Murderers.to_string(), "Murderers");
    }
}
