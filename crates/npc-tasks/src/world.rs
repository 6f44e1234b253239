//! Per-concern world extension traits.
//!
//! The core crate leaves world queries open; behaviors here bound
//! themselves on exactly the concerns they touch. A simulation implements
//! the subset its agents need.

use npc_core::{WorldMut, WorldView};
use npc_signals::SignalHub;

use crate::math::Vec2;

/// Read-only combat stats snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub health: i32,
    pub max_health: i32,
}

impl CombatStats {
    pub fn ratio(&self) -> f32 {
        if self.max_health <= 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

/// Role tag replacing stringly-typed agent kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentRole {
    Player,
    Hostile,
    /// Agents whose signals override allied chase-priority gating.
    AlertCaller,
    /// Spawned helper agents.
    Decoy,
}

/// Positions. Both queries return `None` for a destroyed agent so stale
/// references degrade instead of erroring.
pub trait BodyWorld: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec2>;
    fn center_position(&self, agent: Self::Agent) -> Option<Vec2>;
}

/// Motion intent sink. The scheduler only writes intent; a movement/physics
/// subsystem consumes it and moves bodies.
pub trait LocomotionWorld: WorldMut + BodyWorld {
    fn set_move_target(&mut self, agent: Self::Agent, target: Vec2);
    fn set_move_speed(&mut self, agent: Self::Agent, speed: Vec2);
    fn set_moving(&mut self, agent: Self::Agent, moving: bool);
    fn is_moving(&self, agent: Self::Agent) -> bool;
}

pub trait CombatWorld: WorldView {
    fn combat_stats(&self, agent: Self::Agent) -> Option<CombatStats>;
}

/// Live-agent enumeration in stable order, plus role lookup.
pub trait RosterWorld: WorldView {
    fn agents(&self) -> Vec<Self::Agent>;
    fn role(&self, agent: Self::Agent) -> Option<AgentRole>;
}

pub trait SignalWorld: WorldMut {
    fn signals(&self) -> &SignalHub<Self::Agent>;
    fn signals_mut(&mut self) -> &mut SignalHub<Self::Agent>;
}

/// Helper-agent creation and enemy tracking.
pub trait SpawnWorld: WorldMut + BodyWorld {
    /// Spawn a decoy hostile to `target` at `at`, honoring the area's
    /// horizontal/vertical centering flags. `None` on creation failure.
    fn spawn_decoy(
        &mut self,
        target: Self::Agent,
        at: Vec2,
        center_x: bool,
        center_y: bool,
    ) -> Option<Self::Agent>;

    fn enemy_count(&self) -> u32;
    fn add_enemy(&mut self);
}
