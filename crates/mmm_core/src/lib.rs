//! # mmm_core - Match Core for Money Mystery & Murder
//!
//! Engine-independent rules for the social-deduction match: who is a
//! murderer, what time of day it is, and when the match is over.
//!
//! ## Components
//! - [`roles`]: proportional role pool with seeded shuffle and draw
//! - [`phase`]: day / evening / night clock with observable transitions
//! - [`coordinator`]: role assignment, phase ticking, win detection, reset
//! - [`api`]: JSON session front end for the engine host
//!
//! ## Example
//! ```rust
//! use mmm_core::{MatchConfig, MatchCoordinator, Participant, Phase};
//!
//! let mut game: MatchCoordinator = MatchCoordinator::new(MatchConfig::deterministic(42));
//! game.initialize();
//! for id in ["ana", "ben", "cho", "dev"] {
//!     game.add_player(Participant::new(id)).unwrap();
//! }
//! game.assign_roles();
//! game.tick(1.0);
//! assert_eq!(game.current_phase(), Phase::Day);
//! ```

pub mod api;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod phase;
pub mod player;
pub mod roles;

pub use api::{MatchSession, SessionCommand, SessionResponse};
pub use config::{ClockConfig, MatchConfig, RoleConfig};
pub use coordinator::{MatchCoordinator, MatchSummary, ParticipantOutcome, Survivors, WinOutcome};
pub use error::{ConfigError, CoreError, Result};
pub use events::{EventBus, GameEvent, ListenerId};
pub use phase::{Phase, PhaseClock};
pub use player::{Participant, PlayerEntity};
pub use roles::{build_pool, PlayerRole, RoleCounts, RolePool, Team};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
