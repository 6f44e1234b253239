use npc_core::{AttachError, Blackboard, PriorityTask, Status, Task, TaskState, TickContext};
use npc_signals::{Signal, SubscriberId};

use crate::math::Vec2;
use crate::movement::MovementTask;
use crate::world::{AgentRole, LocomotionWorld, RosterWorld, SignalWorld};

/// Sentinel for a chase that must not win selection (out of range, stale
/// target).
pub const CHASE_CANNOT_RUN: i32 = 0;

/// Everything the chase family touches: positions + motion intent, agent
/// roster (alert-caller discovery at attach), signals.
pub trait ChaseWorld: LocomotionWorld + RosterWorld + SignalWorld {}

impl<W> ChaseWorld for W where W: LocomotionWorld + RosterWorld + SignalWorld {}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChaseConfig {
    /// Selection weight while chase conditions hold.
    pub priority: i32,
    /// Distance at which chasing can start.
    pub view_distance: f32,
    /// Distance at which an ongoing chase gives up. Keeping this larger
    /// than `view_distance` gives the start/stop hysteresis that prevents
    /// rapid toggling at the boundary.
    pub max_chase_distance: f32,
    /// Base pursuit speed.
    pub speed: Vec2,
}

/// Parameters for the weaving (zig-zag) targeting policy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaveConfig {
    /// Recompute cadence in sim seconds.
    pub period_seconds: f32,
    /// Rotation applied to the self-to-target vector, sign alternating.
    pub angle_degrees: f32,
    /// Fraction of `max_chase_distance` below which weaving collapses to
    /// direct pursuit (avoids overshooting at close range).
    pub close_fraction: f32,
    /// Speed multiplier for the direct close-range approach.
    pub close_speed_scale: f32,
    /// Speed multiplier while weaving.
    pub weave_speed_scale: f32,
}

impl Default for WeaveConfig {
    fn default() -> Self {
        Self {
            period_seconds: 0.5,
            angle_degrees: 40.0,
            close_fraction: 0.3,
            close_speed_scale: 1.5,
            weave_speed_scale: 2.5,
        }
    }
}

#[derive(Debug)]
struct WeaveState {
    config: WeaveConfig,
    last_recompute: f32,
    zig_left: bool,
}

/// Pluggable targeting policy.
#[derive(Debug)]
enum Targeting {
    Direct,
    Weave(WeaveState),
}

#[derive(Debug)]
struct AlertOverride {
    priority: i32,
    subscriber: Option<SubscriberId>,
    alerted: bool,
}

/// Pursues a tracked target entity while chase conditions hold.
///
/// Holds the target by id only (the target's lifecycle belongs to the
/// world); a target whose position is gone scores [`CHASE_CANNOT_RUN`] so a
/// no-target chase never wins selection. Targeting is composed, not
/// subclassed: direct pursuit by default, weaving via [`WeaveConfig`], and
/// an optional alert override that pins priority high while an alert-caller
/// signal is in effect.
pub struct ChaseTask<W>
where
    W: ChaseWorld + 'static,
{
    target: W::Agent,
    config: ChaseConfig,
    movement: MovementTask,
    targeting: Targeting,
    alert: Option<AlertOverride>,
    state: TaskState,
}

impl<W> ChaseTask<W>
where
    W: ChaseWorld + 'static,
{
    pub fn new(target: W::Agent, config: ChaseConfig) -> Self {
        Self {
            target,
            config,
            movement: MovementTask::new(Vec2::ZERO, config.speed),
            targeting: Targeting::Direct,
            alert: None,
            state: TaskState::new(),
        }
    }

    /// Weave toward the target instead of pursuing in a straight line.
    pub fn with_weaving(mut self, weave: WeaveConfig) -> Self {
        self.targeting = Targeting::Weave(WeaveState {
            config: weave,
            last_recompute: f32::NEG_INFINITY,
            zig_left: false,
        });
        self
    }

    /// Pin priority to `priority` while alerted by an alert caller,
    /// overriding distance gating until an un-alert signal arrives.
    ///
    /// Alert callers are discovered once, when the task is attached to a
    /// runner; a caller spawned after registration is not heard. Register
    /// the task after the world's alert callers exist.
    pub fn with_alert_override(mut self, priority: i32) -> Self {
        self.alert = Some(AlertOverride {
            priority,
            subscriber: None,
            alerted: false,
        });
        self
    }

    pub fn target(&self) -> W::Agent {
        self.target
    }

    pub fn is_alerted(&self) -> bool {
        self.alert.as_ref().is_some_and(|a| a.alerted)
    }
}

impl<W> Task<W> for ChaseTask<W>
where
    W: ChaseWorld + 'static,
{
    fn start(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard) {
        self.state.begin();
        self.movement.set_speed(self.config.speed);
        if let Some(target_pos) = world.position(self.target) {
            self.movement.set_target(target_pos);
        }
        self.movement.start(ctx, agent, world, blackboard);
        if let Targeting::Weave(weave) = &mut self.targeting {
            // Recompute on the first update after every (re)start.
            weave.last_recompute = f32::NEG_INFINITY;
        }
        world.signals_mut().publish(agent, Signal::Attack);
    }

    fn update(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard) {
        if !self.state.is_active() {
            debug_assert!(false, "update() on non-active chase task");
            return;
        }
        let Self {
            target,
            config,
            movement,
            targeting,
            ..
        } = self;

        match targeting {
            Targeting::Direct => {
                if let Some(target_pos) = world.position(*target) {
                    movement.set_target(target_pos);
                }
                movement.update(ctx, agent, world, blackboard);
                if !movement.status().is_active() {
                    movement.start(ctx, agent, world, blackboard);
                }
            }
            Targeting::Weave(weave) => {
                let Some(position) = world.position(agent) else {
                    return;
                };
                let Some(target_pos) = world.position(*target) else {
                    return;
                };

                let distance = position.distance(target_pos);
                let close = distance < config.max_chase_distance * weave.config.close_fraction;
                let due = ctx.time_seconds - weave.last_recompute > weave.config.period_seconds;
                if !close && !due {
                    return;
                }

                if close {
                    // Direct approach at moderate speed; weaving this near
                    // the target overshoots.
                    movement.set_target(target_pos);
                    movement.set_speed(config.speed * weave.config.close_speed_scale);
                } else {
                    movement.set_speed(config.speed * weave.config.weave_speed_scale);
                    let anchor = world.center_position(agent).unwrap_or(position);
                    let target_center = world.center_position(*target).unwrap_or(target_pos);
                    let sign = if weave.zig_left { 1.0 } else { -1.0 };
                    let offset =
                        (target_center - anchor).rotate_deg(sign * weave.config.angle_degrees);
                    movement.set_target(anchor + offset);
                    weave.zig_left = !weave.zig_left;
                }

                movement.update(ctx, agent, world, blackboard);
                if !movement.status().is_active() {
                    movement.start(ctx, agent, world, blackboard);
                }
                weave.last_recompute = ctx.time_seconds;
            }
        }
    }

    fn stop(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W, blackboard: &mut Blackboard) {
        if self.movement.status().is_active() {
            self.movement.stop(ctx, agent, world, blackboard);
        }
        self.state.halt();
    }

    fn status(&self) -> Status {
        self.state.status()
    }

    fn name(&self) -> &'static str {
        match (&self.targeting, self.alert.is_some()) {
            (Targeting::Weave(_), _) => "zig-chase",
            (Targeting::Direct, true) => "alert-chase",
            (Targeting::Direct, false) => "chase",
        }
    }
}

impl<W> PriorityTask<W> for ChaseTask<W>
where
    W: ChaseWorld + 'static,
{
    /// Subscribe once to every alert caller currently in the world, keeping
    /// registration exactly-once and priority evaluation pure.
    fn attach(&mut self, _agent: W::Agent, world: &mut W) -> Result<(), AttachError> {
        let Some(alert) = self.alert.as_mut() else {
            return Ok(());
        };
        let subscriber = world.signals_mut().register();
        for caller in world.agents() {
            if world.role(caller) == Some(AgentRole::AlertCaller) {
                let hub = world.signals_mut();
                hub.subscribe(subscriber, caller, Signal::Alert);
                hub.subscribe(subscriber, caller, Signal::UnAlert);
            }
        }
        alert.subscriber = Some(subscriber);
        Ok(())
    }

    fn observe(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        let Some(alert) = self.alert.as_mut() else {
            return;
        };
        let Some(subscriber) = alert.subscriber else {
            return;
        };
        for (_caller, signal) in world.signals_mut().drain(subscriber) {
            match signal {
                Signal::Alert => alert.alerted = true,
                Signal::UnAlert => alert.alerted = false,
                _ => {}
            }
        }
    }

    fn priority(&mut self, _ctx: &TickContext, agent: W::Agent, world: &W, _blackboard: &Blackboard) -> i32 {
        // A chase without a live target never wins selection. The alert
        // override beats distance gating only, not target validity.
        let Some(target_pos) = world.position(self.target) else {
            return CHASE_CANNOT_RUN;
        };

        if let Some(alert) = &self.alert {
            if alert.alerted {
                return alert.priority;
            }
        }

        let Some(position) = world.position(agent) else {
            return CHASE_CANNOT_RUN;
        };

        let distance = position.distance(target_pos);
        if self.state.is_active() {
            // Already chasing: hold on until the give-up threshold.
            if distance <= self.config.max_chase_distance {
                self.config.priority
            } else {
                CHASE_CANNOT_RUN
            }
        } else if distance <= self.config.view_distance {
            self.config.priority
        } else {
            CHASE_CANNOT_RUN
        }
    }
}
