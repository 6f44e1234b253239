use thiserror::Error;

use crate::{Blackboard, TickContext, WorldMut};

/// Life-cycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Initial state; the task has never been started.
    NotStarted,
    /// The task currently controls its agent.
    Active,
    /// Stopped by preemption; may re-enter `Active` via `start`.
    Stopped,
    /// Terminal for one-shot tasks; restartable tasks may re-enter `Active`
    /// via `start`.
    Finished,
}

impl Default for Status {
    fn default() -> Self {
        Status::NotStarted
    }
}

impl Status {
    pub fn is_active(self) -> bool {
        self == Status::Active
    }
}

/// Unit of schedulable behavior with a life-cycle and an update hook.
///
/// Tasks never store the world or the agent; both are passed into every
/// call, and the agent id is shared, not owned.
pub trait Task<W>: 'static
where
    W: WorldMut + 'static,
{
    /// Transition to `Active`. Idempotent-unsafe: callers must not start an
    /// already-active task without an intervening `stop`; the runner only
    /// starts the current non-active winner.
    fn start(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard);

    /// Advance one tick. Callers guard on `Active`; implementations treat a
    /// non-active call as a programming error (fail fast in debug builds,
    /// no-op in release).
    fn update(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard);

    /// Transition to a non-active state. Always callable; a no-op on a
    /// never-started task.
    fn stop(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard);

    fn status(&self) -> Status;

    /// Stable short name for traces and tests.
    fn name(&self) -> &'static str;
}

/// A [`Task`] that additionally reports a desirability score each tick.
pub trait PriorityTask<W>: Task<W>
where
    W: WorldMut + 'static,
{
    /// One-time hook run when the task is registered with a runner.
    ///
    /// Validates required agent capabilities (fail fast on configuration
    /// errors) and performs one-time signal subscriptions.
    fn attach(&mut self, _agent: W::Agent, _world: &mut W) -> Result<(), AttachError> {
        Ok(())
    }

    /// Pre-selection bookkeeping phase, run on every registered task before
    /// scoring. The only place evaluation-adjacent mutation (e.g. signal
    /// mailbox drains) is allowed; `priority` itself stays pure.
    fn observe(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }

    /// Current desirability. Always finite; "cannot run" is a sentinel
    /// value (0 or -1 depending on the task), never an absent value.
    fn priority(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        blackboard: &Blackboard,
    ) -> i32;
}

/// Configuration error raised when a task is attached to an agent that
/// lacks a capability the task requires. Caught once at registration, never
/// per tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("agent is missing a required capability: {0}")]
    MissingCapability(&'static str),
}

/// Status bookkeeping shared by every task implementation.
///
/// Owns the current [`Status`] and provides the legal transitions; concrete
/// tasks embed one instead of inheriting a base class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskState {
    status: Status,
}

impl TaskState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(self) -> Status {
        self.status
    }

    pub fn is_active(self) -> bool {
        self.status.is_active()
    }

    /// Enter `Active`.
    pub fn begin(&mut self) {
        self.status = Status::Active;
    }

    /// Leave `Active` without finishing. A no-op on a never-started task;
    /// a finished task stays finished.
    pub fn halt(&mut self) {
        self.status = match self.status {
            Status::NotStarted => Status::NotStarted,
            Status::Finished => Status::Finished,
            _ => Status::Stopped,
        };
    }

    /// Enter the terminal `Finished` state.
    pub fn finish(&mut self) {
        self.status = Status::Finished;
    }
}
