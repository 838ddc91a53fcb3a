//! Role pool - proportional allocation, shuffle and draw-without-replacement
//!
//! A pool is built once per match from the player count, permuted, and then
//! drained one role per player. Running dry never aborts an assignment pass:
//! every draw from an empty pool degrades to [`PlayerRole::Civilian`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::types::PlayerRole;
use crate::config::RoleConfig;

/// Per-role counts for a given player count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleCounts {
    pub murderers: usize,
    pub detectives: usize,
    pub civilians: usize,
}

impl RoleCounts {
    /// Apply the proportional rule.
    ///
    /// - murderers = round(total × ratio), half away from zero
    /// - detectives = `detective_count` once `total >= detective_min_players`
    /// - civilians = whatever remains
    ///
    /// The sum never exceeds `total_players`.
    pub fn for_players(total_players: usize, config: &RoleConfig) -> Self {
        if total_players == 0 {
            return Self::default();
        }

        let mut murderers = (total_players as f64 * config.murderer_ratio).round() as usize;
        let mut detectives = if total_players >= config.detective_min_players {
            config.detective_count
        } else {
            0
        };
        let mut civilians = total_players.saturating_sub(murderers + detectives);

        let assigned = murderers + detectives + civilians;
        if assigned > total_players {
            civilians = civilians.saturating_sub(assigned - total_players);
        } else if assigned < total_players {
            civilians += total_players - assigned;
        }

        // Special roles alone overflow the table: trim detectives first, then murderers
        if murderers + detectives > total_players {
            log::warn!(
                "Role rule wants {} murderers and {} detectives for {} players; truncating",
                murderers,
                detectives,
                total_players
            );
            detectives = total_players.saturating_sub(murderers);
            murderers = murderers.min(total_players);
        }

        Self { murderers, detectives, civilians }
    }

    pub fn total(&self) -> usize {
        self.murderers + self.detectives + self.civilians
    }
}

/// Deterministic, unshuffled pool: murderers, then detectives, then civilians.
pub fn build_pool(total_players: usize, config: &RoleConfig) -> Vec<PlayerRole> {
    let counts = RoleCounts::for_players(total_players, config);

    let mut roles = Vec::with_capacity(counts.total());
    roles.extend(std::iter::repeat(PlayerRole::Murderer).take(counts.murderers));
    roles.extend(std::iter::repeat(PlayerRole::Detective).take(counts.detectives));
    roles.extend(std::iter::repeat(PlayerRole::Civilian).take(counts.civilians));
    roles
}

/// Fisher-Yates, walking from the last slot down with an inclusive upper bound.
pub fn shuffle_roles(roles: &mut [PlayerRole], rng: &mut impl Rng) {
    for i in (1..roles.len()).rev() {
        let j = rng.gen_range(0..=i);
        roles.swap(i, j);
    }
}

/// Shuffled, depletable role multiset with its own random source
#[derive(Debug, Clone)]
pub struct RolePool {
    roles: Vec<PlayerRole>,
    built_for: usize,
    rng: ChaCha8Rng,
}

impl RolePool {
    /// Empty pool; `seed = None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { roles: Vec::new(), built_for: 0, rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Replace the contents with the unshuffled pool for `total_players`.
    pub fn rebuild(&mut self, total_players: usize, config: &RoleConfig) {
        self.roles = build_pool(total_players, config);
        self.built_for = total_players;
        log::debug!("Role pool rebuilt: {} roles for {} players", self.roles.len(), total_players);
    }

    pub fn shuffle(&mut self) {
        shuffle_roles(&mut self.roles, &mut self.rng);
    }

    /// Remove and return the first remaining role.
    pub fn draw(&mut self) -> PlayerRole {
        if self.roles.is_empty() {
            log::warn!("Role pool exhausted on draw; falling back to Civilian");
            return PlayerRole::Civilian;
        }
        self.roles.remove(0)
    }

    /// Remove and return a uniformly random remaining role.
    pub fn pick_random(&mut self) -> PlayerRole {
        if self.roles.is_empty() {
            log::warn!("Role pool exhausted on random pick; falling back to Civilian");
            return PlayerRole::Civilian;
        }
        let index = self.rng.gen_range(0..self.roles.len());
        self.roles.remove(index)
    }

    pub fn remaining(&self) -> &[PlayerRole] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Player count the pool was last built for
    pub fn built_for(&self) -> usize {
        self.built_for
    }
}
