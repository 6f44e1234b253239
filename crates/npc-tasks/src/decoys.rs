use npc_core::{AgentId, AttachError, Blackboard, PriorityTask, Status, Task, TaskState, TickContext};

use crate::math::{Bounds, Vec2};
use crate::world::{CombatWorld, LocomotionWorld, SpawnWorld};

/// Sentinel meaning "never select".
pub const SPAWN_BLOCKED: i32 = -1;

/// Diagonal offsets around the owner's center where helpers appear.
const DECOY_OFFSETS: [Vec2; 4] = [
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
];

pub trait DecoyWorld: SpawnWorld + CombatWorld + LocomotionWorld {}

impl<W> DecoyWorld for W where W: SpawnWorld + CombatWorld + LocomotionWorld {}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnDecoysConfig {
    /// Selection weight while spawning is allowed.
    pub priority: i32,
    /// Playable area; being outside it enables the emergency summon.
    pub map_bounds: Bounds,
    /// Health ratio below which the first spawn is allowed.
    pub low_health_ratio: f32,
    /// Health ratio below which a second spawn is allowed.
    pub critical_health_ratio: f32,
    pub max_low_health_fires: u32,
    pub max_critical_fires: u32,
}

impl Default for SpawnDecoysConfig {
    fn default() -> Self {
        Self {
            priority: 20,
            map_bounds: Bounds::new(Vec2::ZERO, Vec2::splat(30.0)),
            low_health_ratio: 0.5,
            critical_health_ratio: 0.25,
            max_low_health_fires: 1,
            max_critical_fires: 2,
        }
    }
}

/// Spawns four helper agents around its owner when health and environment
/// conditions are met.
///
/// The fire counter is per task instance (not shared process-wide) and only
/// ever grows; it gates how often the behavior re-triggers as the owner's
/// health drops. Side effects are irreversible: if one helper fails to
/// spawn, the ones already spawned and counted stand.
pub struct SpawnDecoysTask<W>
where
    W: DecoyWorld + 'static,
{
    target: W::Agent,
    config: SpawnDecoysConfig,
    fired: u32,
    state: TaskState,
}

impl<W> SpawnDecoysTask<W>
where
    W: DecoyWorld + 'static,
{
    pub fn new(target: W::Agent, config: SpawnDecoysConfig) -> Self {
        Self {
            target,
            config,
            fired: 0,
            state: TaskState::new(),
        }
    }

    /// How many times this behavior has fired. Monotonically non-decreasing.
    pub fn fired(&self) -> u32 {
        self.fired
    }

    pub fn can_spawn(&self, agent: W::Agent, world: &W) -> bool {
        let Some(stats) = world.combat_stats(agent) else {
            return false;
        };
        let ratio = stats.ratio();
        let config = &self.config;

        // Emergency summon: hurt, alone, and pushed out of bounds.
        if world.enemy_count() == 0 && ratio < config.low_health_ratio {
            if let Some(position) = world.position(agent) {
                if !config.map_bounds.contains(position) {
                    return true;
                }
            }
        }

        if ratio < config.low_health_ratio && self.fired < config.max_low_health_fires {
            return true;
        }
        ratio < config.critical_health_ratio && self.fired < config.max_critical_fires
    }

    fn spawn(&mut self, agent: W::Agent, world: &mut W) {
        let Some(center) = world.center_position(agent) else {
            return;
        };
        for offset in DECOY_OFFSETS {
            match world.spawn_decoy(self.target, center + offset, true, true) {
                Some(_) => world.add_enemy(),
                None => {
                    // No rollback: helpers already spawned and counted stand.
                    tracing::error!(
                        owner = agent.stable_id(),
                        offset_x = offset.x,
                        offset_y = offset.y,
                        "decoy spawn failed"
                    );
                }
            }
        }
    }
}

impl<W> Task<W> for SpawnDecoysTask<W>
where
    W: DecoyWorld + 'static,
{
    fn start(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W, _blackboard: &mut Blackboard) {
        self.state.begin();
    }

    fn update(&mut self, _ctx: &TickContext, agent: W::Agent, world: &mut W, _blackboard: &mut Blackboard) {
        if !self.state.is_active() {
            debug_assert!(false, "update() on non-active spawn-decoys task");
            return;
        }
        if !self.can_spawn(agent, world) {
            self.state.finish();
            return;
        }
        // Stand still while the summon resolves.
        world.set_moving(agent, false);
        self.spawn(agent, world);
        self.fired += 1;
        self.state.finish();
    }

    fn stop(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W, _blackboard: &mut Blackboard) {
        self.state.halt();
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn name(&self) -> &'static str {
        "spawn-decoys"
    }
}

impl<W> PriorityTask<W> for SpawnDecoysTask<W>
where
    W: DecoyWorld + 'static,
{
    /// The owner must carry combat stats; anything else is a wiring error
    /// caught here rather than per tick.
    fn attach(&mut self, agent: W::Agent, world: &mut W) -> Result<(), AttachError> {
        if world.combat_stats(agent).is_none() {
            return Err(AttachError::MissingCapability("combat stats"));
        }
        Ok(())
    }

    fn priority(&mut self, _ctx: &TickContext, agent: W::Agent, world: &W, _blackboard: &Blackboard) -> i32 {
        if self.can_spawn(agent, world) {
            self.config.priority
        } else {
            SPAWN_BLOCKED
        }
    }
}
