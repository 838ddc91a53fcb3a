//! Match session JSON API
//!
//! The engine host drives a match through JSON requests instead of linking
//! Rust types. Each response carries a status snapshot plus every event the
//! request published, so the host can forward them to its UI and gating
//! systems in order.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MatchConfig;
use crate::coordinator::{MatchCoordinator, MatchSummary};
use crate::error::CoreError;
use crate::events::GameEvent;
use crate::phase::Phase;
use crate::player::{Participant, PlayerEntity};
use crate::roles::{PlayerRole, Team};
use crate::SCHEMA_VERSION;

/// Session request - sent by the host
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub command: SessionCommand,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    /// Add a player to the roster
    Join { player_id: String, display_name: Option<String> },

    /// Deal roles to everyone who joined
    AssignRoles,

    /// Advance one frame
    Tick { delta_seconds: f64 },

    /// A player's avatar died
    PlayerDied { player_id: String },

    /// Manual phase override
    AdvancePhase,
    SetPhase { phase: Phase },

    /// Back to day, roles kept
    Reset,

    GetStatus,
    GetSummary,
}

/// Session response - returned to the host
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub schema_version: u8,
    pub success: bool,
    pub status: SessionStatus,
    pub events: Vec<GameEvent>,
    pub summary: Option<MatchSummary>,
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub phase: Phase,
    pub clock: String,
    pub hour: u8,
    pub game_ended: bool,
    pub winner: Option<Team>,
    pub players: Vec<PlayerStatus>,
}

#[derive(Debug, Serialize)]
pub struct PlayerStatus {
    pub player_id: String,
    pub display_name: String,
    pub role: Option<PlayerRole>,
    pub alive: bool,
}

/// Stateful JSON front end over a [`MatchCoordinator`]
#[derive(Debug)]
pub struct MatchSession {
    coordinator: MatchCoordinator<Participant>,
    outbox: Arc<Mutex<Vec<GameEvent>>>,
}

impl MatchSession {
    pub fn new(config: MatchConfig) -> Self {
        let mut coordinator = MatchCoordinator::new(config);
        let outbox = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&outbox);
        coordinator.subscribe(move |event| {
            if let Ok(mut pending) = sink.lock() {
                pending.push(event.clone());
            }
        });
        coordinator.initialize();

        Self { coordinator, outbox }
    }

    pub fn coordinator(&self) -> &MatchCoordinator<Participant> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut MatchCoordinator<Participant> {
        &mut self.coordinator
    }

    /// Handle one request. `Err` only when the request itself cannot be parsed
    /// or uses another schema; gameplay failures come back as
    /// `success: false` responses.
    pub fn handle_request_json(&mut self, request_json: &str) -> Result<String, String> {
        let request: SessionRequest =
            serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;

        if request.schema_version != SCHEMA_VERSION {
            return Err(format!("Unsupported schema version: {}", request.schema_version));
        }

        let response = self.handle_command(request.command);
        serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
    }

    pub fn handle_command(&mut self, command: SessionCommand) -> SessionResponse {
        debug!(?command, "session command");
        let mut summary = None;

        let outcome: Result<(), CoreError> = match command {
            SessionCommand::Join { player_id, display_name } => {
                let player = match display_name {
                    Some(name) => Participant::with_name(player_id, name),
                    None => Participant::new(player_id),
                };
                self.coordinator.add_player(player)
            }
            SessionCommand::AssignRoles => {
                let dealt = self.coordinator.assign_roles();
                info!(dealt, "roles assigned");
                Ok(())
            }
            SessionCommand::Tick { delta_seconds } => {
                self.coordinator.tick(delta_seconds);
                Ok(())
            }
            SessionCommand::PlayerDied { player_id } => self.player_died(&player_id),
            SessionCommand::AdvancePhase => {
                self.coordinator.advance_phase();
                Ok(())
            }
            SessionCommand::SetPhase { phase } => {
                if phase == Phase::End {
                    Err(CoreError::InvalidParameter(
                        "End is reached only through the win condition".to_string(),
                    ))
                } else if self.coordinator.is_game_ended() {
                    Err(CoreError::InvalidParameter("Match already ended".to_string()))
                } else {
                    self.coordinator.set_phase(phase);
                    Ok(())
                }
            }
            SessionCommand::Reset => {
                self.coordinator.reset_game();
                Ok(())
            }
            SessionCommand::GetStatus => Ok(()),
            SessionCommand::GetSummary => match self.coordinator.summary() {
                Some(s) => {
                    summary = Some(s);
                    Ok(())
                }
                None => Err(CoreError::NotFound("Match has not ended yet".to_string())),
            },
        };

        if let Err(err) = &outcome {
            warn!(%err, "session command failed");
        }

        SessionResponse {
            schema_version: SCHEMA_VERSION,
            success: outcome.is_ok(),
            status: self.status(),
            events: self.take_events(),
            summary,
            error_message: outcome.err().map(|e| e.to_string()),
        }
    }

    fn player_died(&mut self, player_id: &str) -> Result<(), CoreError> {
        let player = self
            .coordinator
            .player_mut(player_id)
            .ok_or_else(|| CoreError::NotFound(format!("Player not found: {}", player_id)))?;
        player.kill();
        self.coordinator.handle_player_death(player_id);
        Ok(())
    }

    pub fn status(&self) -> SessionStatus {
        let clock = self.coordinator.clock();
        SessionStatus {
            phase: clock.current_phase(),
            clock: clock.clock_label(),
            hour: clock.current_hour(),
            game_ended: self.coordinator.is_game_ended(),
            winner: self.coordinator.winner(),
            players: self
                .coordinator
                .players()
                .iter()
                .map(|p| PlayerStatus {
                    player_id: p.id().to_string(),
                    display_name: p.display_name.clone(),
                    role: p.role(),
                    alive: p.is_alive(),
                })
                .collect(),
        }
    }

    fn take_events(&self) -> Vec<GameEvent> {
        match self.outbox.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn send(session: &mut MatchSession, request: Value) -> Value {
        let response = session.handle_request_json(&request.to_string()).unwrap();
        serde_json::from_str(&response).unwrap()
    }

    fn join_all(session: &mut MatchSession, ids: &[&str]) {
        for id in ids {
            let reply = send(session, json!({"schema_version": 1, "type": "Join", "player_id": id}));
            assert_eq!(reply["success"], true);
        }
    }

    #[test]
    fn test_join_and_assign() {
        let mut session = MatchSession::new(MatchConfig::deterministic(3));
        join_all(&mut session, &["a", "b", "c", "d"]);

        let reply = send(&mut session, json!({"schema_version": 1, "type": "AssignRoles"}));
        assert_eq!(reply["success"], true);
        assert_eq!(reply["status"]["phase"], "Day");
        assert_eq!(reply["events"][0]["type"], "RolesAssigned");
        assert_eq!(reply["events"][0]["players"], 4);

        let players = reply["status"]["players"].as_array().unwrap();
        assert_eq!(players.len(), 4);
        assert!(players.iter().all(|p| p["role"].is_string()));
    }

    #[test]
    fn test_events_are_drained_per_request() {
        let mut session = MatchSession::new(MatchConfig::default());

        let reply = send(&mut session, json!({"schema_version": 1, "type": "AdvancePhase"}));
        assert_eq!(reply["status"]["phase"], "Evening");
        assert_eq!(reply["events"].as_array().unwrap().len(), 2);

        let reply = send(&mut session, json!({"schema_version": 1, "type": "GetStatus"}));
        assert!(reply["events"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_tick_reports_clock() {
        let mut session = MatchSession::new(MatchConfig::default());
        let reply =
            send(&mut session, json!({"schema_version": 1, "type": "Tick", "delta_seconds": 15.0}));
        assert_eq!(reply["status"]["clock"], "06:30");
        assert_eq!(reply["status"]["hour"], 6);
    }

    #[test]
    fn test_death_ends_match_and_summary_available() {
        let mut session = MatchSession::new(MatchConfig::default());
        join_all(&mut session, &["killer", "victim"]);
        {
            let coordinator = session.coordinator_mut();
            coordinator.player_mut("killer").unwrap().set_role(PlayerRole::Murderer);
            coordinator.player_mut("victim").unwrap().set_role(PlayerRole::Civilian);
        }

        let reply = send(
            &mut session,
            json!({"schema_version": 1, "type": "PlayerDied", "player_id": "victim"}),
        );
        assert_eq!(reply["status"]["game_ended"], true);
        assert_eq!(reply["status"]["winner"], "Murderers");
        assert_eq!(reply["status"]["phase"], "End");
        let events = reply["events"].as_array().unwrap();
        assert_eq!(events.last().unwrap()["type"], "GameEnded");

        let reply = send(&mut session, json!({"schema_version": 1, "type": "GetSummary"}));
        assert_eq!(reply["success"], true);
        assert_eq!(reply["summary"]["winner"], "Murderers");
    }

    #[test]
    fn test_summary_before_end_fails_softly() {
        let mut session = MatchSession::new(MatchConfig::default());
        let reply = send(&mut session, json!({"schema_version": 1, "type": "GetSummary"}));
        assert_eq!(reply["success"], false);
        assert!(reply["error_message"].as_str().unwrap().contains("not ended"));
    }

    #[test]
    fn test_unknown_player_death() {
        let mut session = MatchSession::new(MatchConfig::default());
        let reply = send(
            &mut session,
            json!({"schema_version": 1, "type": "PlayerDied", "player_id": "ghost"}),
        );
        assert_eq!(reply["success"], false);
        assert_eq!(reply["error_message"], "Not found: Player not found: ghost");
    }

    #[test]
    fn test_rejects_other_schema_versions() {
        let mut session = MatchSession::new(MatchConfig::default());
        let err = session
            .handle_request_json(&json!({"schema_version": 9, "type": "GetStatus"}).to_string())
            .unwrap_err();
        assert!(err.contains("Unsupported schema version"));

        assert!(session.handle_request_json("not json").is_err());
    }

    #[test]
    fn test_set_phase_and_reset() {
        let mut session = MatchSession::new(MatchConfig::default());
        let reply =
            send(&mut session, json!({"schema_version": 1, "type": "SetPhase", "phase": "Night"}));
        assert_eq!(reply["events"][1]["type"], "NightStarted");

        let reply = send(&mut session, json!({"schema_version": 1, "type": "Reset"}));
        assert_eq!(reply["status"]["phase"], "Day");
        assert_eq!(reply["events"].as_array().unwrap().last().unwrap()["type"], "WinnerCleared");
    }

    #[test]
    fn test_set_phase_end_rejected() {
        let mut session = MatchSession::new(MatchConfig::default());
        let reply =
            send(&mut session, json!({"schema_version": 1, "type": "SetPhase", "phase": "End"}));
        assert_eq!(reply["success"], false);
        assert_eq!(reply["status"]["phase"], "Day");
        assert_eq!(reply["status"]["game_ended"], false);
        assert!(reply["events"].as_array().unwrap().is_empty());

        let reply =
            send(&mut session, json!({"schema_version": 1, "type": "Tick", "delta_seconds": 360.0}));
        assert_eq!(reply["status"]["phase"], "Evening");
    }

    #[test]
    fn test_set_phase_after_end_rejected() {
        let mut session = MatchSession::new(MatchConfig::default());
        join_all(&mut session, &["killer", "victim"]);
        {
            let coordinator = session.coordinator_mut();
            coordinator.player_mut("killer").unwrap().set_role(PlayerRole::Murderer);
            coordinator.player_mut("victim").unwrap().set_role(PlayerRole::Civilian);
        }
        send(&mut session, json!({"schema_version": 1, "type": "PlayerDied", "player_id": "victim"}));

        let reply =
            send(&mut session, json!({"schema_version": 1, "type": "SetPhase", "phase": "Day"}));
        assert_eq!(reply["success"], false);
        assert_eq!(reply["status"]["phase"], "End");
        assert_eq!(reply["status"]["game_ended"], true);
    }
}
