//! Player entities as seen by the match core
//!
//! The host owns the real avatars; the coordinator only needs an id, a role
//! slot and an alive flag. Hosts can implement [`PlayerEntity`] on their own
//! handle type or use [`Participant`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::roles::PlayerRole;

pub trait PlayerEntity {
    /// Stable identifier; also fixes the order roles are dealt in.
    fn id(&self) -> &str;

    /// `None` until roles are dealt.
    fn role(&self) -> Option<PlayerRole>;

    fn set_role(&mut self, role: PlayerRole);

    fn is_alive(&self) -> bool;
}

/// Bundled player entity for hosts that do not bring their own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Participant {
    pub id: String,
    pub display_name: String,
    pub role: Option<PlayerRole>,
    pub alive: bool,
}

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { display_name: id.clone(), id, role: None, alive: true }
    }

    pub fn with_name(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self { display_name: display_name.into(), ..Self::new(id) }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn revive(&mut self) {
        self.alive = true;
    }
}

impl PlayerEntity for Participant {
    fn id(&self) -> &str {
        &self.id
    }

    fn role(&self) -> Option<PlayerRole> {
        self.role
    }

    fn set_role(&mut self, role: PlayerRole) {
        self.role = Some(role);
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
