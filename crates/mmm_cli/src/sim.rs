//! Scripted headless match
//!
//! Stands in for the engine host: drives the frame loop, and turns phase
//! entries into scripted eliminations so a full match can be played from the
//! terminal.
//!
//! - Night start: the murderers eliminate one random living innocent.
//! - Evening start: a living detective accuses one random living player.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use mmm_core::config::MINUTES_PER_DAY;
use mmm_core::{
    GameEvent, MatchConfig, MatchCoordinator, MatchSummary, Participant, Phase, PhaseClock,
    PlayerEntity, PlayerRole, Team,
};

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub players: usize,
    pub step_seconds: f64,
    pub max_days: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Elimination {
    pub day: u32,
    pub phase: Phase,
    pub player_id: String,
    pub role: Option<PlayerRole>,
}

#[derive(Debug, Serialize)]
pub struct SimReport {
    pub days_played: u32,
    pub eliminations: Vec<Elimination>,
    pub winner: Option<Team>,
    pub summary: Option<MatchSummary>,
}

/// Shortest phase of the day, in in-game minutes.
pub fn shortest_phase_minutes(clock: &PhaseClock) -> f64 {
    let (day, evening, night) = clock.boundaries();
    let spans = [evening.saturating_sub(day), night.saturating_sub(evening), 24 - night + day];
    spans.iter().copied().min().map_or(0.0, |hours| f64::from(hours) * 60.0)
}

pub fn run(config: MatchConfig, options: &SimOptions) -> Result<SimReport> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut game: MatchCoordinator = MatchCoordinator::new(config);
    let inbox = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&inbox);
    game.subscribe(move |event| {
        if let Ok(mut pending) = sink.lock() {
            pending.push(event.clone());
        }
    });

    game.initialize();

    // a frame longer than a phase would skip that phase's scripted kill
    let frame_minutes = options.step_seconds * game.clock().minutes_per_second();
    let shortest = shortest_phase_minutes(game.clock());
    if !(frame_minutes > 0.0 && frame_minutes.is_finite()) {
        bail!("Clock does not advance: {} in-game minutes per frame", frame_minutes);
    }
    if frame_minutes > shortest {
        bail!(
            "Step of {} s covers {} in-game minutes, longer than the shortest phase ({} minutes)",
            options.step_seconds,
            frame_minutes,
            shortest
        );
    }

    for index in 1..=options.players {
        game.add_player(Participant::new(format!("player-{:02}", index)))?;
    }
    game.assign_roles();

    let budget_minutes = f64::from(options.max_days) * MINUTES_PER_DAY;
    let mut elapsed_minutes = 0.0;
    let mut day = 1;
    let mut eliminations = Vec::new();

    while !game.is_game_ended() && day <= options.max_days && elapsed_minutes < budget_minutes {
        game.tick(options.step_seconds);
        elapsed_minutes += frame_minutes;

        let events: Vec<GameEvent> = match inbox.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        };

        for event in events {
            let target = match event {
                GameEvent::DayStarted => {
                    day += 1;
                    None
                }
                GameEvent::NightStarted => night_target(&game, &mut rng),
                GameEvent::EveningStarted => evening_target(&game, &mut rng),
                _ => None,
            };

            if let Some(player_id) = target {
                if let Some(player) = game.player_mut(&player_id) {
                    player.kill();
                }
                let role = game.player(&player_id).and_then(|p| p.role());
                log::info!("Day {}: {} eliminated during {}", day, player_id, game.current_phase());
                eliminations.push(Elimination {
                    day,
                    phase: game.current_phase(),
                    player_id: player_id.clone(),
                    role,
                });
                game.handle_player_death(&player_id);
            }

            if game.is_game_ended() {
                break;
            }
        }
    }

    if !game.is_game_ended() {
        log::warn!("No winner after {} days", options.max_days);
    }

    Ok(SimReport {
        days_played: day.min(options.max_days),
        eliminations,
        winner: game.winner(),
        summary: game.summary(),
    })
}

fn living<'a>(
    game: &'a MatchCoordinator,
    filter: impl Fn(&Participant) -> bool + 'a,
) -> Vec<&'a Participant> {
    game.players().iter().filter(|p| p.is_alive() && filter(*p)).collect()
}

fn night_target(game: &MatchCoordinator, rng: &mut ChaCha8Rng) -> Option<String> {
    let murderers = living(game, |p| p.role == Some(PlayerRole::Murderer));
    if murderers.is_empty() {
        return None;
    }
    let innocents = living(game, |p| p.role.map(|r| r.team()) == Some(Team::Innocents));
    innocents.choose(rng).map(|p| p.id.clone())
}

fn evening_target(game: &MatchCoordinator, rng: &mut ChaCha8Rng) -> Option<String> {
    if living(game, |p| p.role == Some(PlayerRole::Detective)).is_empty() {
        return None;
    }
    let suspects = living(game, |p| p.role != Some(PlayerRole::Detective));
    suspects.choose(rng).map(|p| p.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(players: usize) -> SimOptions {
        SimOptions { players, step_seconds: 5.0, max_days: 30 }
    }

    #[test]
    fn test_small_match_finishes() {
        let report = run(MatchConfig::deterministic(9), &options(4)).unwrap();
        // one murderer kills an innocent every night with no detective to stop them
        assert_eq!(report.winner, Some(Team::Murderers));
        assert_eq!(report.eliminations.len(), 3);
        assert!(report.summary.is_some());
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let a = run(MatchConfig::deterministic(31), &options(10)).unwrap();
        let b = run(MatchConfig::deterministic(31), &options(10)).unwrap();
        let ids = |r: &SimReport| r.eliminations.iter().map(|e| e.player_id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.winner, b.winner);
    }

    #[test]
    fn test_large_match_has_winner() {
        let report = run(MatchConfig::deterministic(5), &options(12)).unwrap();
        assert!(report.winner.is_some());
        let summary = report.summary.unwrap();
        assert_eq!(summary.participants.len(), 12);
    }

    #[test]
    fn test_empty_table_runs_out_of_days() {
        let report =
            run(MatchConfig::deterministic(1), &SimOptions { players: 0, step_seconds: 60.0, max_days: 2 })
                .unwrap();
        assert!(report.winner.is_none());
        assert!(report.eliminations.is_empty());
    }

    #[test]
    fn test_whole_day_step_rejected() {
        // 720 s at 2 min/s lands on the same minute every frame
        let err = run(
            MatchConfig::deterministic(9),
            &SimOptions { players: 4, step_seconds: 720.0, max_days: 2 },
        )
        .unwrap_err();
        assert!(err.to_string().contains("shortest phase"));
    }

    #[test]
    fn test_step_longer_than_evening_rejected() {
        // evening lasts 180 minutes by default, 91 s covers 182
        let result = run(
            MatchConfig::deterministic(9),
            &SimOptions { players: 4, step_seconds: 91.0, max_days: 2 },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_frozen_clock_rejected() {
        let mut config = MatchConfig::deterministic(9);
        config.clock.minutes_per_second = 0.0;
        let result = run(config, &SimOptions { players: 4, step_seconds: 5.0, max_days: 2 });
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_table_stops_at_day_budget() {
        // one frame per phase boundary step; no deaths, so only the budget ends it
        let report = run(
            MatchConfig::deterministic(1),
            &SimOptions { players: 0, step_seconds: 90.0, max_days: 3 },
        )
        .unwrap();
        assert!(report.winner.is_none());
        assert_eq!(report.days_played, 3);
    }

    #[test]
    fn test_shortest_phase_of_default_clock() {
        let mut game: MatchCoordinator = MatchCoordinator::new(MatchConfig::default());
        game.initialize();
        assert!((shortest_phase_minutes(game.clock()) - 180.0).abs() < 1e-9);
    }
}
