//! End-of-match summary handed to the stats backend

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::player::PlayerEntity;
use crate::roles::{PlayerRole, Team};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParticipantOutcome {
    pub player_id: String,
    pub role: Option<PlayerRole>,
    pub team: Option<Team>,
    pub alive: bool,
    pub won: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSummary {
    pub match_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub winner: Team,
    pub participants: Vec<ParticipantOutcome>,
}

impl MatchSummary {
    pub(crate) fn collect<P: PlayerEntity>(
        match_id: Uuid,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        winner: Team,
        players: &[P],
    ) -> Self {
        let participants = players
            .iter()
            .map(|player| {
                let role = player.role();
                let team = role.map(|r| r.team());
                ParticipantOutcome {
                    player_id: player.id().to_string(),
                    role,
                    team,
                    alive: player.is_alive(),
                    won: team == Some(winner),
                }
            })
            .collect();

        Self { match_id, started_at, ended_at, winner, participants }
    }

    pub fn winners(&self) -> impl Iterator<Item = &ParticipantOutcome> {
        self.participants.iter().filter(|p| p.won)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
