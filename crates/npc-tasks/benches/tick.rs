use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use npc_core::{TaskRunner, TickContext, WorldMut, WorldView};
use npc_signals::SignalHub;
use npc_tasks::{
    AgentRole, BodyWorld, ChaseConfig, ChaseTask, LocomotionWorld, RosterWorld, SignalWorld, Vec2,
    WanderConfig, WanderTask, WeaveConfig,
};

#[derive(Debug, Default, Clone, Copy)]
struct Body {
    position: Vec2,
    move_target: Vec2,
    move_speed: Vec2,
    moving: bool,
}

#[derive(Default)]
struct World {
    bodies: BTreeMap<u64, Body>,
    roles: BTreeMap<u64, AgentRole>,
    signals: SignalHub<u64>,
}

impl World {
    fn add(&mut self, agent: u64, role: AgentRole, position: Vec2) {
        self.bodies.insert(
            agent,
            Body {
                position,
                ..Body::default()
            },
        );
        self.roles.insert(agent, role);
    }
}

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

impl BodyWorld for World {
    fn position(&self, agent: u64) -> Option<Vec2> {
        self.bodies.get(&agent).map(|b| b.position)
    }

    fn center_position(&self, agent: u64) -> Option<Vec2> {
        self.position(agent)
    }
}

impl LocomotionWorld for World {
    fn set_move_target(&mut self, agent: u64, target: Vec2) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.move_target = target;
        }
    }

    fn set_move_speed(&mut self, agent: u64, speed: Vec2) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.move_speed = speed;
        }
    }

    fn set_moving(&mut self, agent: u64, moving: bool) {
        if let Some(body) = self.bodies.get_mut(&agent) {
            body.moving = moving;
        }
    }

    fn is_moving(&self, agent: u64) -> bool {
        self.bodies.get(&agent).is_some_and(|b| b.moving)
    }
}

impl RosterWorld for World {
    fn agents(&self) -> Vec<u64> {
        self.bodies.keys().copied().collect()
    }

    fn role(&self, agent: u64) -> Option<AgentRole> {
        self.roles.get(&agent).copied()
    }
}

impl SignalWorld for World {
    fn signals(&self) -> &SignalHub<u64> {
        &self.signals
    }

    fn signals_mut(&mut self) -> &mut SignalHub<u64> {
        &mut self.signals
    }
}

const PLAYER: u64 = 1000;

fn bench_runner_tick(c: &mut Criterion) {
    let mut world = World::default();
    world.add(PLAYER, AgentRole::Player, Vec2::new(15.0, 15.0));

    let mut runners = Vec::new();
    for agent in 0..64u64 {
        let position = Vec2::new((agent % 8) as f32 * 4.0, (agent / 8) as f32 * 4.0);
        world.add(agent, AgentRole::Hostile, position);

        let mut runner = TaskRunner::new(agent);
        runner
            .add_task(&mut world, Box::new(WanderTask::new(WanderConfig::default())))
            .expect("wander");
        runner
            .add_task(
                &mut world,
                Box::new(
                    ChaseTask::new(
                        PLAYER,
                        ChaseConfig {
                            priority: 3,
                            view_distance: 12.0,
                            max_chase_distance: 20.0,
                            speed: Vec2::splat(1.5),
                        },
                    )
                    .with_weaving(WeaveConfig::default()),
                ),
            )
            .expect("chase");
        runners.push(runner);
    }

    let mut tick: u64 = 0;
    c.bench_function("npc-tasks/runner_tick(agents=64)", |b| {
        b.iter(|| {
            let ctx = TickContext {
                tick,
                dt_seconds: 0.1,
                time_seconds: tick as f32 * 0.1,
                seed: 7,
            };
            for runner in runners.iter_mut() {
                runner.tick(&ctx, &mut world);
            }
            black_box(runners[0].current_name());
            tick = tick.wrapping_add(1);
        })
    });
}

criterion_group!(benches, bench_runner_tick);
criterion_main!(benches);
