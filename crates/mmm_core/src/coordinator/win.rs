//! Win-condition evaluation by team survival

use serde::{Deserialize, Serialize};

use crate::player::PlayerEntity;
use crate::roles::Team;

/// Living players per team; players without a role are not counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Survivors {
    pub murderers: usize,
    pub innocents: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinOutcome {
    Winner(Team),
    /// Both teams still have living members
    Continue,
    /// Nobody left on either side; no winner is declared
    NoSurvivors,
}

impl Survivors {
    pub fn count<P: PlayerEntity>(players: &[P]) -> Self {
        let mut survivors = Self::default();
        for player in players.iter().filter(|p| p.is_alive()) {
            match player.role().map(|role| role.team()) {
                Some(Team::Murderers) => survivors.murderers += 1,
                Some(Team::Innocents) => survivors.innocents += 1,
                None => {}
            }
        }
        survivors
    }

    pub fn outcome(&self) -> WinOutcome {
        match (self.murderers > 0, self.innocents > 0) {
            (false, true) => WinOutcome::Winner(Team::Innocents),
            (true, false) => WinOutcome::Winner(Team::Murderers),
            (false, false) => WinOutcome::NoSurvivors,
            (true, true) => WinOutcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table() {
        let cases = [
            (0, 3, WinOutcome::Winner(Team::Innocents)),
            (2, 0, WinOutcome::Winner(Team::Murderers)),
            (0, 0, WinOutcome::NoSurvivors),
            (1, 1, WinOutcome::Continue),
        ];
        for (murderers, innocents, expected) in cases {
            assert_eq!(Survivors { murderers, innocents }.outcome(), expected);
        }
    }
}
