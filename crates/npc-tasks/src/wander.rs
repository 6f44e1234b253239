use npc_core::{
    Blackboard, DeterministicRng, MultiTask, PriorityTask, Slot, Status, Task, TaskState,
    TickContext,
};
use npc_signals::Signal;

use crate::math::Vec2;
use crate::movement::MovementTask;
use crate::wait::WaitTask;
use crate::world::{LocomotionWorld, SignalWorld};

/// RNG stream tag for wander target picking, mixed with the current tick so
/// each leg gets a fresh draw.
const WANDER_STREAM: u64 = 0x57A4_DE70;

pub trait WanderWorld: LocomotionWorld + SignalWorld {}

impl<W> WanderWorld for W where W: LocomotionWorld + SignalWorld {}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WanderConfig {
    /// Half-extents of the box around the anchor position that targets are
    /// drawn from.
    pub range: Vec2,
    /// Pause between legs.
    pub wait_seconds: f32,
    pub speed: Vec2,
    /// Idle-fallback weight; low so any purposeful task preempts it.
    pub priority: i32,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            range: Vec2::splat(4.0),
            wait_seconds: 2.0,
            speed: Vec2::splat(1.0),
            priority: 1,
        }
    }
}

/// Ambles between random points near where the agent started, pausing
/// between legs.
///
/// The idle fallback behavior: alternates an owned movement task and an
/// owned wait task through [`MultiTask`], so exactly one sub-task is active
/// and every handoff stops the outgoing sub-task before starting the next.
/// Targets come from the per-agent deterministic RNG; the same seed replays
/// the same stroll.
pub struct WanderTask<W>
where
    W: WanderWorld + 'static,
{
    config: WanderConfig,
    anchor: Option<Vec2>,
    multi: MultiTask<W, MovementTask, WaitTask>,
    state: TaskState,
}

impl<W> WanderTask<W>
where
    W: WanderWorld + 'static,
{
    pub fn new(config: WanderConfig) -> Self {
        Self {
            config,
            anchor: None,
            multi: MultiTask::new(
                MovementTask::new(Vec2::ZERO, config.speed),
                WaitTask::new(config.wait_seconds),
            ),
            state: TaskState::new(),
        }
    }

    fn pick_target(&self, ctx: &TickContext, agent: W::Agent, anchor: Vec2) -> Vec2 {
        let mut rng = ctx.rng_for_agent(agent, WANDER_STREAM.wrapping_add(ctx.tick));
        let dx = (rng.next_f32_unit() * 2.0 - 1.0) * self.config.range.x;
        let dy = (rng.next_f32_unit() * 2.0 - 1.0) * self.config.range.y;
        anchor + Vec2::new(dx, dy)
    }

    fn start_moving(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        let anchor = match self.anchor {
            Some(anchor) => anchor,
            None => return,
        };
        let target = self.pick_target(ctx, agent, anchor);
        self.multi.a.set_target(target);
        self.multi.a.set_speed(self.config.speed);
        self.multi.swap_to(Slot::A, ctx, agent, world, blackboard);
        world.signals_mut().publish(agent, Signal::Walk);
    }
}

impl<W> Task<W> for WanderTask<W>
where
    W: WanderWorld + 'static,
{
    fn start(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard) {
        self.state.begin();
        self.multi.start(ctx, agent, world, blackboard);
        if self.anchor.is_none() {
            self.anchor = world.position(agent);
        }
        self.start_moving(ctx, agent, world, blackboard);
    }

    fn update(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard) {
        if !self.state.is_active() {
            debug_assert!(false, "update() on non-active wander task");
            return;
        }
        self.multi.update(ctx, agent, world, blackboard);

        match self.multi.active_slot() {
            Some(Slot::A) if self.multi.a.status() == Status::Finished => {
                self.multi.swap_to(Slot::B, ctx, agent, world, blackboard);
            }
            Some(Slot::B) if self.multi.b.status() == Status::Finished => {
                self.start_moving(ctx, agent, world, blackboard);
            }
            _ => {}
        }
    }

    fn stop(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard) {
        self.multi.stop(ctx, agent, world, blackboard);
        self.state.halt();
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn name(&self) -> &'static str {
        "wander"
    }
}

impl<W> PriorityTask<W> for WanderTask<W>
where
    W: WanderWorld + 'static,
{
    fn priority(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &W, _blackboard: &Blackboard) -> i32 {
        self.config.priority
    }
}
