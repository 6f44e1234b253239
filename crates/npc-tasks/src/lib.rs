//! Concrete NPC behaviors built on the `npc-core` task contracts.
//!
//! Movement is expressed as *intent* (target point + speed vector) written
//! into the world; a physics/movement subsystem outside this crate consumes
//! it. Everything here is deterministic: timers compare sim-clock
//! timestamps, randomness goes through the per-agent seeded RNG.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod chase;
pub mod decoys;
pub mod math;
pub mod movement;
pub mod wait;
pub mod wander;
pub mod world;

pub use chase::{ChaseConfig, ChaseTask, ChaseWorld, WeaveConfig, CHASE_CANNOT_RUN};
pub use decoys::{DecoyWorld, SpawnDecoysConfig, SpawnDecoysTask, SPAWN_BLOCKED};
pub use math::{Bounds, Vec2};
pub use movement::MovementTask;
pub use wait::WaitTask;
pub use wander::{WanderConfig, WanderTask, WanderWorld};
pub use world::{
    AgentRole, BodyWorld, CombatStats, CombatWorld, LocomotionWorld, RosterWorld, SignalWorld,
    SpawnWorld,
};
