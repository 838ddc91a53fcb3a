//! Phase clock - in-game time of day and the phase it implies
//!
//! The clock counts minutes since midnight and wraps every 1440 minutes.
//! Phase boundaries are whole hours, compared half-open on the low side:
//!
//! ```text
//! 00:00 ── Night ──▶ day_start ── Day ──▶ evening_start ── Evening ──▶ night_start ── Night ──▶ 24:00
//! ```
//!
//! Every transition is published on the clock's [`EventBus`]; `End` is only
//! ever set by the match coordinator, never by time.

use super::types::Phase;
use crate::config::{ClockConfig, MINUTES_PER_DAY};
use crate::events::{EventBus, GameEvent, ListenerId};

const MAX_HOUR: u8 = 23;

#[derive(Debug)]
pub struct PhaseClock {
    day_start: u8,
    evening_start: u8,
    night_start: u8,
    start_time_minutes: f64,
    minutes_per_second: f64,
    minutes: f64,
    phase: Phase,
    events: EventBus,
}

impl PhaseClock {
    /// Uninitialized clock at the configured start time, in phase `None`.
    pub fn new(config: &ClockConfig) -> Self {
        let start = wrap_minutes(config.start_time_minutes);
        Self {
            day_start: config.day_start_hour,
            evening_start: config.evening_start_hour,
            night_start: config.night_start_hour,
            start_time_minutes: start,
            minutes_per_second: config.minutes_per_second,
            minutes: start,
            phase: Phase::None,
            events: EventBus::new(),
        }
    }

    /// Normalize the schedule and leave the pre-match phases.
    ///
    /// Boundaries are clamped to `0..=23` and pushed forward (capped at 23)
    /// until `day < evening < night`.
    pub fn initialize(&mut self) {
        for (name, hour) in [
            ("day_start", &mut self.day_start),
            ("evening_start", &mut self.evening_start),
            ("night_start", &mut self.night_start),
        ] {
            if *hour > MAX_HOUR {
                log::warn!("{} hour {} out of range; clamping to {}", name, hour, MAX_HOUR);
                *hour = MAX_HOUR;
            }
        }

        if self.evening_start <= self.day_start {
            let corrected = (self.day_start + 1).min(MAX_HOUR);
            log::warn!(
                "evening_start ({}) not after day_start ({}); moving to {}",
                self.evening_start,
                self.day_start,
                corrected
            );
            self.evening_start = corrected;
        }

        if self.night_start <= self.evening_start {
            let corrected = (self.evening_start + 1).min(MAX_HOUR);
            log::warn!(
                "night_start ({}) not after evening_start ({}); moving to {}",
                self.night_start,
                self.evening_start,
                corrected
            );
            self.night_start = corrected;
        }

        if self.phase.is_pre_match() {
            self.phase = Phase::Day;
        }
    }

    /// Pure hour → phase mapping; night wraps across midnight.
    pub fn determine_phase_by_hour(&self, hour: u8) -> Phase {
        if hour >= self.night_start || hour < self.day_start {
            Phase::Night
        } else if hour >= self.evening_start {
            Phase::Evening
        } else {
            Phase::Day
        }
    }

    /// Advance at the configured rate.
    pub fn tick(&mut self, delta_seconds: f64) {
        self.tick_at_rate(delta_seconds, self.minutes_per_second);
    }

    /// Advance by `delta_seconds × rate` minutes. Non-positive rates are ignored.
    pub fn tick_at_rate(&mut self, delta_seconds: f64, rate: f64) {
        if rate <= 0.0 || !rate.is_finite() || !delta_seconds.is_finite() {
            return;
        }
        self.minutes = wrap_minutes(self.minutes + delta_seconds * rate);
    }

    /// Transition to whatever phase `hour` implies. Returns true on change.
    pub fn update_phase_by_time(&mut self, hour: u8) -> bool {
        let phase = self.determine_phase_by_hour(hour);
        self.set_phase(phase)
    }

    /// Explicit transition. Setting the current phase again is a no-op.
    pub fn set_phase(&mut self, new_phase: Phase) -> bool {
        if new_phase == self.phase {
            return false;
        }

        let previous = self.phase;
        self.phase = new_phase;
        log::info!("Phase {} -> {} at {}", previous, new_phase, self.clock_label());

        self.events.emit(&GameEvent::PhaseChanged { from: previous, to: new_phase });
        match new_phase {
            Phase::Day => self.events.emit(&GameEvent::DayStarted),
            Phase::Evening => self.events.emit(&GameEvent::EveningStarted),
            Phase::Night => self.events.emit(&GameEvent::NightStarted),
            Phase::None | Phase::Lobby | Phase::End => {}
        }
        true
    }

    /// Manual cycle `Day → Evening → Night → Day`; `End` and others go to `Day`.
    pub fn advance_phase(&mut self) -> Phase {
        let next = self.phase.next();
        self.set_phase(next);
        next
    }

    /// Rewind to the configured start time. Phase is left alone.
    pub fn reset_time(&mut self) {
        self.minutes = self.start_time_minutes;
    }

    /// Jump to an absolute time of day (wrapped into one day).
    pub fn set_time(&mut self, minutes: f64) {
        if minutes.is_finite() {
            self.minutes = wrap_minutes(minutes);
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    pub fn current_minutes(&self) -> f64 {
        self.minutes
    }

    pub fn current_hour(&self) -> u8 {
        ((self.minutes / 60.0).floor() as u8).min(MAX_HOUR)
    }

    /// `"HH:MM"` for HUD clocks and logs
    pub fn clock_label(&self) -> String {
        let whole = self.minutes.floor() as u32;
        format!("{:02}:{:02}", whole / 60, whole % 60)
    }

    /// `(day_start, evening_start, night_start)`
    pub fn boundaries(&self) -> (u8, u8, u8) {
        (self.day_start, self.evening_start, self.night_start)
    }

    pub fn start_time_minutes(&self) -> f64 {
        self.start_time_minutes
    }

    pub fn minutes_per_second(&self) -> f64 {
        self.minutes_per_second
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub(crate) fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }
}

fn wrap_minutes(minutes: f64) -> f64 {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= MINUTES_PER_DAY {
        0.0
    } else {
        wrapped
    }
}
