use crate::{
    emit, AgentId, AttachError, Blackboard, CallbackId, CallbackQueue, PriorityTask, Status,
    TickContext, TraceEvent, WorldMut,
};

/// Selection policy knobs for a [`TaskRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunnerConfig {
    /// Lowest priority that still wins selection. Scores below this are
    /// sentinels ("cannot run"); if every task scores below it, no task
    /// runs and the current one is stopped.
    pub min_priority: i32,
    /// Re-evaluate priorities every N ticks (updates still run every tick).
    pub think_every_ticks: u32,
    pub think_offset_ticks: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_priority: 1,
            think_every_ticks: 1,
            think_offset_ticks: 0,
        }
    }
}

impl RunnerConfig {
    /// Spread think ticks across agents deterministically so a crowd does
    /// not re-evaluate in lockstep.
    pub fn deterministic(agent: impl AgentId, think_every_ticks: u32) -> Self {
        let every = think_every_ticks.max(1);
        let offset = (agent.stable_id() % (every as u64)) as u32;
        Self {
            min_priority: 1,
            think_every_ticks: every,
            think_offset_ticks: offset,
        }
    }

    pub fn should_think(&self, tick: u64) -> bool {
        let every = self.think_every_ticks.max(1) as u64;
        ((tick + (self.think_offset_ticks as u64)) % every) == 0
    }
}

/// Per-agent task scheduler.
///
/// Holds the agent's candidate tasks in registration order. Each think tick
/// it scores them all and hands control to the highest scorer: strict `>`
/// comparison over registration order, so ties resolve to the
/// first-registered task. On a change of winner the outgoing task's `stop`
/// completes before the incoming task's `start` begins.
pub struct TaskRunner<W>
where
    W: WorldMut + 'static,
{
    pub agent: W::Agent,
    pub config: RunnerConfig,
    pub blackboard: Blackboard,
    tasks: Vec<Box<dyn PriorityTask<W>>>,
    current: Option<usize>,
    callbacks: CallbackQueue<W>,
}

impl<W> TaskRunner<W>
where
    W: WorldMut + 'static,
{
    pub fn new(agent: W::Agent) -> Self {
        Self {
            agent,
            config: RunnerConfig::default(),
            blackboard: Blackboard::new(),
            tasks: Vec::new(),
            current: None,
            callbacks: CallbackQueue::new(),
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a task. Runs its `attach` hook exactly once; registration
    /// fails fast if the agent lacks a capability the task requires.
    pub fn add_task(
        &mut self,
        world: &mut W,
        mut task: Box<dyn PriorityTask<W>>,
    ) -> Result<(), AttachError> {
        task.attach(self.agent, world)?;
        self.tasks.push(task);
        Ok(())
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current.map(|i| self.tasks[i].name())
    }

    pub fn current_status(&self) -> Option<Status> {
        self.current.map(|i| self.tasks[i].status())
    }

    /// Defer a one-shot effect on this agent by `delay_seconds` of sim time.
    pub fn schedule_in(
        &mut self,
        ctx: &TickContext,
        delay_seconds: f32,
        run: impl FnOnce(&TickContext, W::Agent, &mut W) + 'static,
    ) -> CallbackId {
        self.callbacks.schedule_in(ctx, delay_seconds, self.agent, run)
    }

    pub fn cancel_callback(&mut self, id: CallbackId) {
        self.callbacks.cancel(id);
    }

    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.len()
    }

    /// Advance one tick: run due callbacks, re-select on think ticks, then
    /// update the active task.
    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) {
        self.callbacks.run_due(ctx, world);

        if self.config.should_think(ctx.tick) {
            self.think(ctx, world);
        }

        if let Some(i) = self.current {
            if self.tasks[i].status().is_active() {
                self.tasks[i].update(ctx, self.agent, world, &mut self.blackboard);
            }
        }
    }

    fn think(&mut self, ctx: &TickContext, world: &mut W) {
        for task in self.tasks.iter_mut() {
            task.observe(ctx, self.agent, world, &mut self.blackboard);
        }

        let mut best: Option<usize> = None;
        let mut best_priority = i32::MIN;
        {
            let world_view: &W = world;
            for (i, task) in self.tasks.iter_mut().enumerate() {
                let priority = task.priority(ctx, self.agent, world_view, &self.blackboard);
                if priority > best_priority {
                    best_priority = priority;
                    best = Some(i);
                }
            }
        }

        let winner = best.filter(|_| best_priority >= self.config.min_priority);

        if winner != self.current {
            if let Some(outgoing) = self.current {
                if self.tasks[outgoing].status().is_active() {
                    self.tasks[outgoing].stop(ctx, self.agent, world, &mut self.blackboard);
                }
            }
            if let Some(incoming) = winner {
                self.tasks[incoming].start(ctx, self.agent, world, &mut self.blackboard);
                emit(
                    &mut self.blackboard,
                    TraceEvent::new(ctx.tick, "task.switch")
                        .with_agent(self.agent.stable_id())
                        .with_detail(incoming as u64),
                );
            }
            self.current = winner;
        } else if let Some(held) = winner {
            // A winner that finished and won again re-enters Active.
            if !self.tasks[held].status().is_active() {
                self.tasks[held].start(ctx, self.agent, world, &mut self.blackboard);
            }
        }
    }
}

/// Advance a set of runners in stable agent order, for cross-agent
/// determinism.
pub fn tick_runners<W>(ctx: &TickContext, world: &mut W, runners: &mut [TaskRunner<W>])
where
    W: WorldMut + 'static,
{
    runners.sort_by_key(|r| r.agent.stable_id());
    for runner in runners.iter_mut() {
        runner.tick(ctx, world);
    }
}
