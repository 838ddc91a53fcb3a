//! Match Coordinator
//!
//! Owns the roster, the role pool and the phase clock for one match and
//! drives the lifecycle:
//!
//! 1. `initialize`: normalize the clock schedule, enter `Day`
//! 2. `assign_roles`: deal one role per player from a shuffled pool
//! 3. `tick`: advance the clock and cross phase boundaries
//! 4. `handle_player_death` / `check_win_condition`: end the match once a team is wiped out
//! 5. `reset_game`: back to `Day` at the start time, roles untouched
//!
//! Nothing here fails on gameplay edge cases; they degrade and log instead.

pub mod summary;
pub mod win;


pub use summary::{MatchSummary, ParticipantOutcome};
pub use win::{Survivors, WinOutcome};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::MatchConfig;
use crate::error::{CoreError, Result};
use crate::events::{GameEvent, ListenerId};
use crate::phase::{Phase, PhaseClock};
use crate::player::{Participant, PlayerEntity};
use crate::roles::{RolePool, Team};

#[derive(Debug)]
pub struct MatchCoordinator<P: PlayerEntity = Participant> {
    config: MatchConfig,
    players: Vec<P>,
    pool: RolePool,
    clock: PhaseClock,
    game_ended: bool,
    winner: Option<Team>,
    match_id: Uuid,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl<P: PlayerEntity> MatchCoordinator<P> {
    pub fn new(config: MatchConfig) -> Self {
        let pool = RolePool::new(config.seed);
        let clock = PhaseClock::new(&config.clock);
        Self {
            config,
            players: Vec::new(),
            pool,
            clock,
            game_ended: false,
            winner: None,
            match_id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    pub fn initialize(&mut self) {
        self.clock.initialize();
        log::info!(
            "Match {} initialized in {} at {}",
            self.match_id,
            self.clock.current_phase(),
            self.clock.clock_label()
        );
    }

    // ========================
    // Roster
    // ========================

    pub fn add_player(&mut self, player: P) -> Result<()> {
        if self.players.iter().any(|p| p.id() == player.id()) {
            return Err(CoreError::InvalidParameter(format!(
                "Player {} already joined",
                player.id()
            )));
        }
        self.players.push(player);
        Ok(())
    }

    pub fn players(&self) -> &[P] {
        &self.players
    }

    pub fn player(&self, player_id: &str) -> Option<&P> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut P> {
        self.players.iter_mut().find(|p| p.id() == player_id)
    }

    // ========================
    // Roles
    // ========================

    /// Deal one role to every player, in ascending id order so seeded
    /// matches replay identically. Returns the number of players dealt.
    pub fn assign_roles(&mut self) -> usize {
        if self.players.is_empty() {
            log::warn!("assign_roles called with no players; nothing to deal");
            return 0;
        }

        let total = self.players.len();
        self.pool.rebuild(total, &self.config.roles);
        self.pool.shuffle();

        let mut order: Vec<usize> = (0..total).collect();
        order.sort_by(|&a, &b| self.players[a].id().cmp(self.players[b].id()));

        for index in order {
            let role = self.pool.draw();
            self.players[index].set_role(role);
        }

        log::info!("Dealt roles to {} players", total);
        self.clock.events_mut().emit(&GameEvent::RolesAssigned { players: total });
        total
    }

    pub fn role_pool(&self) -> &RolePool {
        &self.pool
    }

    // ========================
    // Phases
    // ========================

    /// One frame. Returns the phase entered, if a boundary was crossed.
    pub fn tick(&mut self, delta_seconds: f64) -> Option<Phase> {
        if self.game_ended {
            return None;
        }

        self.clock.tick(delta_seconds);
        let hour = self.clock.current_hour();
        if self.clock.update_phase_by_time(hour) {
            Some(self.clock.current_phase())
        } else {
            None
        }
    }

    /// Manual override of the cycle; ignored once the match has ended.
    pub fn advance_phase(&mut self) -> Phase {
        if self.game_ended {
            log::warn!("advance_phase ignored: match already ended");
            return self.clock.current_phase();
        }
        self.clock.advance_phase()
    }

    /// Manual override of the current phase. `End` is reserved for the win
    /// condition, and nothing changes once the match has ended.
    pub fn set_phase(&mut self, phase: Phase) -> bool {
        if self.game_ended {
            log::warn!("set_phase({}) ignored: match already ended", phase);
            return false;
        }
        if phase == Phase::End {
            log::warn!("set_phase(End) ignored: only the win condition ends a match");
            return false;
        }
        self.clock.set_phase(phase)
    }

    pub fn current_phase(&self) -> Phase {
        self.clock.current_phase()
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut PhaseClock {
        &mut self.clock
    }

    // ========================
    // Win condition
    // ========================

    /// Host notification that `player_id` just died.
    pub fn handle_player_death(&mut self, player_id: &str) -> Option<Team> {
        match self.player(player_id) {
            Some(player) if player.is_alive() => {
                log::warn!("Death reported for {} but the player is still alive", player_id)
            }
            Some(_) => log::info!("Player {} died", player_id),
            None => log::warn!("Death reported for unknown player {}", player_id),
        }
        self.check_win_condition()
    }

    /// Returns the winner if this call ended the match.
    pub fn check_win_condition(&mut self) -> Option<Team> {
        if self.game_ended {
            return None;
        }
        if self.players.is_empty() {
            log::warn!("check_win_condition called with no players");
            return None;
        }

        let survivors = Survivors::count(&self.players);
        match survivors.outcome() {
            WinOutcome::Winner(team) => {
                self.end_game(team);
                Some(team)
            }
            WinOutcome::NoSurvivors => {
                log::warn!("No survivors on either team; no winner declared");
                None
            }
            WinOutcome::Continue => None,
        }
    }

    fn end_game(&mut self, winner: Team) {
        self.game_ended = true;
        self.winner = Some(winner);
        self.ended_at = Some(Utc::now());

        self.clock.set_phase(Phase::End);
        log::info!("Match {} ended: {} win", self.match_id, winner);
        self.clock.events_mut().emit(&GameEvent::GameEnded { winner });
    }

    pub fn survivors(&self) -> Survivors {
        Survivors::count(&self.players)
    }

    pub fn is_game_ended(&self) -> bool {
        self.game_ended
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    // ========================
    // Reset & summary
    // ========================

    /// Back to `Day` at the configured start time. Roles stay as dealt.
    pub fn reset_game(&mut self) {
        self.game_ended = false;
        self.winner = None;
        self.ended_at = None;
        self.match_id = Uuid::new_v4();
        self.started_at = Utc::now();

        self.clock.reset_time();
        self.clock.set_phase(Phase::Day);
        self.clock.events_mut().emit(&GameEvent::WinnerCleared);
        log::info!("Match reset; new match id {}", self.match_id);
    }

    /// Available once the match has ended.
    pub fn summary(&self) -> Option<MatchSummary> {
        let winner = self.winner?;
        let ended_at = self.ended_at?;
        Some(MatchSummary::collect(self.match_id, self.started_at, ended_at, winner, &self.players))
    }

    pub fn match_id(&self) -> Uuid {
        self.match_id
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    // ========================
    // Events
    // ========================

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.clock.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.clock.unsubscribe(id)
    }
}
