use std::marker::PhantomData;

use crate::{Blackboard, Status, Task, TaskState, TickContext, WorldMut};

/// Which sub-task of a [`MultiTask`] is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Composes a pair of sub-tasks, guaranteeing at most one is `Active` at any
/// instant.
///
/// Swapping always stops the outgoing sub-task to completion before the
/// incoming one starts; the two calls are sequential, never interleaved.
/// Both sub-tasks are owned and remain addressable through the public `a`
/// and `b` fields so composers can retarget them between swaps.
pub struct MultiTask<W, A, B>
where
    W: WorldMut + 'static,
    A: Task<W>,
    B: Task<W>,
{
    pub a: A,
    pub b: B,
    active: Option<Slot>,
    state: TaskState,
    _world: PhantomData<fn() -> W>,
}

impl<W, A, B> MultiTask<W, A, B>
where
    W: WorldMut + 'static,
    A: Task<W>,
    B: Task<W>,
{
    pub fn new(a: A, b: B) -> Self {
        Self {
            a,
            b,
            active: None,
            state: TaskState::new(),
            _world: PhantomData,
        }
    }

    pub fn active_slot(&self) -> Option<Slot> {
        self.active
    }

    pub fn active_status(&self) -> Option<Status> {
        self.active.map(|slot| match slot {
            Slot::A => self.a.status(),
            Slot::B => self.b.status(),
        })
    }

    /// Stop the currently held sub-task (if any), then adopt and start
    /// `slot`. On return exactly `slot` is `Active`.
    pub fn swap_to(
        &mut self,
        slot: Slot,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        match self.active {
            Some(Slot::A) => self.a.stop(ctx, agent, world, blackboard),
            Some(Slot::B) => self.b.stop(ctx, agent, world, blackboard),
            None => {}
        }
        self.active = Some(slot);
        match slot {
            Slot::A => self.a.start(ctx, agent, world, blackboard),
            Slot::B => self.b.start(ctx, agent, world, blackboard),
        }
    }

    /// Swap to the sub-task not currently held. Adopts `A` when neither has
    /// run yet.
    pub fn swap(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        let next = self.active.map(Slot::other).unwrap_or(Slot::A);
        self.swap_to(next, ctx, agent, world, blackboard);
    }
}

impl<W, A, B> Task<W> for MultiTask<W, A, B>
where
    W: WorldMut + 'static,
    A: Task<W>,
    B: Task<W>,
{
    fn start(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W, _blackboard: &mut Blackboard) {
        // Sub-tasks start through swap_to; the composer picks the first slot.
        self.state.begin();
    }

    fn update(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard) {
        if !self.state.is_active() {
            debug_assert!(false, "update() on non-active multi task");
            return;
        }
        match self.active {
            Some(Slot::A) => {
                if self.a.status().is_active() {
                    self.a.update(ctx, agent, world, blackboard);
                }
            }
            Some(Slot::B) => {
                if self.b.status().is_active() {
                    self.b.update(ctx, agent, world, blackboard);
                }
            }
            None => {}
        }
    }

    fn stop(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard) {
        match self.active {
            Some(Slot::A) => {
                if self.a.status().is_active() {
                    self.a.stop(ctx, agent, world, blackboard);
                }
            }
            Some(Slot::B) => {
                if self.b.status().is_active() {
                    self.b.stop(ctx, agent, world, blackboard);
                }
            }
            None => {}
        }
        self.state.halt();
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn name(&self) -> &'static str {
        "multi"
    }
}
