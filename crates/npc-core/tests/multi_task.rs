use npc_core::{
    Blackboard, MultiTask, Slot, Status, Task, TaskState, TickContext, WorldMut, WorldView,
};

#[derive(Default)]
struct World {
    log: Vec<String>,
}

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

struct StubTask {
    name: &'static str,
    state: TaskState,
}

impl StubTask {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            state: TaskState::new(),
        }
    }
}

impl Task<World> for StubTask {
    fn start(&mut self, _ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push(format!("{}.start", self.name));
        self.state.begin();
    }

    fn update(&mut self, _ctx: &TickContext, _agent: u64, world: &mut World, _bb: &mut Blackboard) {
        world.log.push(format!("{}.update", self.name));
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

fn ctx() -> TickContext {
    TickContext {
        tick: 0,
        dt_seconds: 0.1,
        time_seconds: 0.0,
        seed: 0,
    }
}

fn multi() -> MultiTask<World, StubTask, StubTask> {
    MultiTask::new(StubTask::new("a"), StubTask::new("b"))
}

#[test]
fn starts_with_no_active_slot() {
    let mut world = World::default();
    let mut bb = Blackboard::new();
    let mut multi = multi();

    multi.start(&ctx(), 1, &mut world, &mut bb);

    assert_eq!(multi.status(), Status::Active);
    assert_eq!(multi.active_slot(), None);
    assert!(world.log.is_empty());
}

#[test]
fn first_swap_adopts_slot_a() {
    let mut world = World::default();
    let mut bb = Blackboard::new();
    let mut multi = multi();

    multi.start(&ctx(), 1, &mut world, &mut bb);
    multi.swap(&ctx(), 1, &mut world, &mut bb);

    assert_eq!(multi.active_slot(), Some(Slot::A));
    assert_eq!(world.log, vec!["a.start"]);
}

#[test]
fn swap_stops_outgoing_before_starting_incoming() {
    let mut world = World::default();
    let mut bb = Blackboard::new();
    let mut multi = multi();

    multi.start(&ctx(), 1, &mut world, &mut bb);
    multi.swap_to(Slot::A, &ctx(), 1, &mut world, &mut bb);
    multi.swap_to(Slot::B, &ctx(), 1, &mut world, &mut bb);

    assert_eq!(world.log, vec!["a.start", "a.stop", "b.start"]);
    assert_eq!(multi.a.status(), Status::Stopped);
    assert_eq!(multi.b.status(), Status::Active);
}

#[test]
fn at_most_one_sub_task_is_active() {
    let mut world = World::default();
    let mut bb = Blackboard::new();
    let mut multi = multi();

    multi.start(&ctx(), 1, &mut world, &mut bb);
    for _ in 0..5 {
        multi.swap(&ctx(), 1, &mut world, &mut bb);
        let active = [multi.a.status(), multi.b.status()]
            .iter()
            .filter(|s| s.is_active())
            .count();
        assert_eq!(active, 1);
    }
}

#[test]
fn update_reaches_only_the_active_slot() {
    let mut world = World::default();
    let mut bb = Blackboard::new();
    let mut multi = multi();

    multi.start(&ctx(), 1, &mut world, &mut bb);
    multi.swap_to(Slot::B, &ctx(), 1, &mut world, &mut bb);
    multi.update(&ctx(), 1, &mut world, &mut bb);

    assert_eq!(world.log, vec!["b.start", "b.update"]);
}

#[test]
fn stop_cascades_to_the_active_sub_task() {
    let mut world = World::default();
    let mut bb = Blackboard::new();
    let mut multi = multi();

    multi.start(&ctx(), 1, &mut world, &mut bb);
    multi.swap_to(Slot::A, &ctx(), 1, &mut world, &mut bb);
    multi.stop(&ctx(), 1, &mut world, &mut bb);

    assert_eq!(multi.status(), Status::Stopped);
    assert_eq!(multi.a.status(), Status::Stopped);
    assert_eq!(world.log, vec!["a.start", "a.stop"]);
}
