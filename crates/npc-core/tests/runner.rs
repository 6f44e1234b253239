use std::collections::HashMap;

use npc_core::{
    AttachError, Blackboard, PriorityTask, RunnerConfig, Status, Task, TaskRunner, TaskState,
    TickContext, TraceLog, WorldMut, WorldView, TRACE_LOG,
};

#[derive(Default)]
struct World {
    log: Vec<String>,
    priorities: HashMap<&'static str, i32>,
}

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

struct StubTask {
    name: &'static str,
    state: TaskState,
    finish_after_updates: Option<u32>,
    updates: u32,
    fail_attach: bool,
}

impl StubTask {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            state: TaskState::new(),
            finish_after_updates: None,
            updates: 0,
            fail_attach: false,
        }
    }

    fn one_shot(name: &'static str, updates: u32) -> Self {
        Self {
            finish_after_updates: Some(updates),
            ..Self::new(name)
        }
    }

    fn failing_attach(name: &'static str) -> Self {
        Self {
            fail_attach: true,
            ..Self::new(name)
        }
    }
}

impl Task<World> for StubTask {
    fn start(&mut self, _ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push(format!("{}.start", self.name));
        self.updates = 0;
        self.state.begin();
    }

    fn update(&mut self, _ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push(format!("{}.update", self.name));
        self.updates += 1;
        if let Some(limit) = self.finish_after_updates {
            if self.updates >= limit {
                self.state.finish();
            }
        }
    }

    fn stop(&mut self, _ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push(format!("{}.stop", self.name));
        self.state.halt();
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl PriorityTask<World> for StubTask {
    fn attach(&mut self, _agent: u64, _world: &mut World) -> Result<(), AttachError> {
        if self.fail_attach {
            return Err(AttachError::MissingCapability("stub"));
        }
        Ok(())
    }

    fn priority(&mut self, _ctx: &TickContext, _agent: u64, world: &World, _bb: &Blackboard) -> i32 {
        world.priorities.get(self.name).copied().unwrap_or(0)
    }
}

fn ctx(tick: u64) -> TickContext {
    TickContext {
        tick,
        dt_seconds: 0.1,
        time_seconds: tick as f32 * 0.1,
        seed: 0,
    }
}

fn runner_with(world: &mut World, names: &[&'static str]) -> TaskRunner<World> {
    let mut runner = TaskRunner::new(1u64);
    for name in names {
        runner
            .add_task(world, Box::new(StubTask::new(name)))
            .expect("attach");
    }
    runner
}

#[test]
fn ties_resolve_to_first_registered_task() {
    let mut world = World::default();
    let mut runner = runner_with(&mut world, &["a", "b"]);
    world.priorities.insert("a", 5);
    world.priorities.insert("b", 5);

    runner.tick(&ctx(0), &mut world);

    assert_eq!(runner.current_name(), Some("a"));
    assert_eq!(world.log, vec!["a.start", "a.update"]);
}

#[test]
fn preemption_stops_outgoing_before_starting_incoming() {
    let mut world = World::default();
    let mut runner = runner_with(&mut world, &["a", "b"]);
    world.priorities.insert("a", 5);
    world.priorities.insert("b", 1);

    runner.tick(&ctx(0), &mut world);
    assert_eq!(runner.current_name(), Some("a"));

    world.priorities.insert("b", 9);
    runner.tick(&ctx(1), &mut world);

    assert_eq!(runner.current_name(), Some("b"));
    assert_eq!(
        world.log,
        vec!["a.start", "a.update", "a.stop", "b.start", "b.update"]
    );
}

#[test]
fn all_below_threshold_runs_nothing() {
    let mut world = World::default();
    let mut runner = runner_with(&mut world, &["a"]);

    runner.tick(&ctx(0), &mut world);

    assert_eq!(runner.current_name(), None);
    assert!(world.log.is_empty());
}

#[test]
fn dropping_below_threshold_stops_the_current_task() {
    let mut world = World::default();
    let mut runner = runner_with(&mut world, &["a"]);
    world.priorities.insert("a", 5);

    runner.tick(&ctx(0), &mut world);
    assert_eq!(runner.current_status(), Some(Status::Active));

    world.priorities.insert("a", 0);
    runner.tick(&ctx(1), &mut world);

    assert_eq!(runner.current_name(), None);
    assert_eq!(world.log, vec!["a.start", "a.update", "a.stop"]);
}

#[test]
fn finished_winner_is_restarted() {
    let mut world = World::default();
    let mut runner = TaskRunner::new(1u64);
    runner
        .add_task(&mut world, Box::new(StubTask::one_shot("a", 1)))
        .expect("attach");
    world.priorities.insert("a", 5);

    runner.tick(&ctx(0), &mut world);
    assert_eq!(runner.current_status(), Some(Status::Finished));

    runner.tick(&ctx(1), &mut world);

    assert_eq!(runner.current_status(), Some(Status::Finished));
    assert_eq!(
        world.log,
        vec!["a.start", "a.update", "a.start", "a.update"]
    );
}

#[test]
fn think_cadence_defers_switches_to_think_ticks() {
    let mut world = World::default();
    let mut runner = runner_with(&mut world, &["a", "b"]).with_config(RunnerConfig {
        min_priority: 1,
        think_every_ticks: 2,
        think_offset_ticks: 0,
    });
    world.priorities.insert("a", 5);
    world.priorities.insert("b", 1);

    runner.tick(&ctx(0), &mut world);
    assert_eq!(runner.current_name(), Some("a"));

    // Preference flips on an off tick: the switch waits for the next think.
    world.priorities.insert("b", 9);
    runner.tick(&ctx(1), &mut world);
    assert_eq!(runner.current_name(), Some("a"));

    runner.tick(&ctx(2), &mut world);
    assert_eq!(runner.current_name(), Some("b"));
}

#[test]
fn task_switches_are_traced() {
    let mut world = World::default();
    let mut runner = runner_with(&mut world, &["a", "b"]);
    runner.blackboard.set(TRACE_LOG, TraceLog::default());
    world.priorities.insert("a", 5);

    runner.tick(&ctx(0), &mut world);
    world.priorities.insert("b", 9);
    runner.tick(&ctx(1), &mut world);

    let log = runner.blackboard.get(TRACE_LOG).expect("trace log");
    let switches: Vec<_> = log.events.iter().map(|e| (e.tick, e.detail)).collect();
    assert!(log
        .events
        .iter()
        .all(|e| e.tag == "task.switch" && e.agent == 1));
    assert_eq!(switches, vec![(0, 0), (1, 1)]);
}

#[test]
fn attach_failure_rejects_the_task() {
    let mut world = World::default();
    let mut runner = TaskRunner::new(1u64);

    let result = runner.add_task(&mut world, Box::new(StubTask::failing_attach("a")));

    assert_eq!(result, Err(AttachError::MissingCapability("stub")));
    assert_eq!(runner.task_count(), 0);
}
