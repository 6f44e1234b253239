use npc_core::{Blackboard, PriorityTask, Status, Task, TaskState, TickContext};

use crate::math::Vec2;
use crate::world::LocomotionWorld;

/// Default arrival epsilon, in world units.
const ARRIVAL_DISTANCE: f32 = 0.1;

/// Drives the agent toward a target point at a configured speed.
///
/// The reusable leaf behavior: publishes motion intent every tick and
/// finishes once the agent's reported position is within the arrival
/// epsilon. Higher-level tasks (chase, wander) own one and retarget it.
#[derive(Debug, Clone)]
pub struct MovementTask {
    target: Vec2,
    speed: Vec2,
    priority: i32,
    arrival_distance: f32,
    state: TaskState,
}

impl MovementTask {
    pub fn new(target: Vec2, speed: Vec2) -> Self {
        Self {
            target,
            speed,
            priority: 1,
            arrival_distance: ARRIVAL_DISTANCE,
            state: TaskState::new(),
        }
    }

    /// Owner-defined selection weight when used as a standalone task.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_arrival_distance(mut self, arrival_distance: f32) -> Self {
        self.arrival_distance = arrival_distance;
        self
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn speed(&self) -> Vec2 {
        self.speed
    }

    /// Retarget. Takes effect on the next `start`/`update` intent write.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn set_speed(&mut self, speed: Vec2) {
        self.speed = speed;
    }

    // Inherent so call sites don't have to pin the world parameter of the
    // blanket `Task` impl.
    pub fn status(&self) -> Status {
        self.state.status()
    }
}

impl<W> Task<W> for MovementTask
where
    W: LocomotionWorld + 'static,
{
    fn start(&mut self, _ctx: &TickContext, agent: W::Agent, world: &mut W, _blackboard: &mut Blackboard) {
        self.state.begin();
        world.set_move_target(agent, self.target);
        world.set_move_speed(agent, self.speed);
        world.set_moving(agent, true);
    }

    fn update(&mut self, _ctx: &TickContext, agent: W::Agent, world: &mut W, _blackboard: &mut Blackboard) {
        if !self.state.is_active() {
            debug_assert!(false, "update() on non-active movement task");
            return;
        }
        // Destroyed agents are deactivated externally; nothing to drive.
        let Some(position) = world.position(agent) else {
            return;
        };

        if position.distance(self.target) <= self.arrival_distance {
            world.set_moving(agent, false);
            self.state.finish();
            return;
        }

        world.set_move_target(agent, self.target);
        world.set_move_speed(agent, self.speed);
        if !world.is_moving(agent) {
            world.set_moving(agent, true);
        }
    }

    fn stop(&mut self, _ctx: &TickContext, agent: W::Agent, world: &mut W, _blackboard: &mut Blackboard) {
        if self.state.is_active() {
            world.set_moving(agent, false);
        }
        self.state.halt();
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn name(&self) -> &'static str {
        "movement"
    }
}

impl<W> PriorityTask<W> for MovementTask
where
    W: LocomotionWorld + 'static,
{
    fn priority(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &W, _blackboard: &Blackboard) -> i32 {
        self.priority
    }
}
