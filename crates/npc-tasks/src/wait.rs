use npc_core::{Blackboard, Status, Task, TaskState, TickContext, WorldMut};

/// Finishes once a fixed span of sim time has elapsed since `start`.
///
/// Timestamp comparison against the tick clock; never blocks.
#[derive(Debug, Clone)]
pub struct WaitTask {
    duration_seconds: f32,
    end_time: f32,
    state: TaskState,
}

impl WaitTask {
    pub fn new(duration_seconds: f32) -> Self {
        Self {
            duration_seconds,
            end_time: 0.0,
            state: TaskState::new(),
        }
    }

    // Inherent so call sites don't have to pin the world parameter of the
    // blanket `Task` impl.
    pub fn status(&self) -> Status {
        self.state.status()
    }
}

impl<W> Task<W> for WaitTask
where
    W: WorldMut + 'static,
{
    fn start(&mut self, ctx: &TickContext, _agent: W::Agent, _world: &mut W, _blackboard: &mut Blackboard) {
        self.end_time = ctx.time_seconds + self.duration_seconds;
        self.state.begin();
    }

    fn update(&mut self, ctx: &TickContext, _agent: W::Agent, _world: &mut W, _blackboard: &mut Blackboard) {
        if !self.state.is_active() {
            debug_assert!(false, "update() on non-active wait task");
            return;
        }
        if ctx.time_seconds >= self.end_time {
            self.state.finish();
        }
    }

    fn stop(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W, _blackboard: &mut Blackboard) {
        self.state.halt();
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn name(&self) -> &'static str {
        "wait"
    }
}
