//! Deterministic, engine-agnostic NPC task scheduling kernel.
//!
//! Each agent owns a set of candidate tasks that compete every simulation
//! tick for control of the agent. The [`TaskRunner`] scores them in
//! registration order and hands control to the highest scorer, stopping the
//! outgoing task before starting the incoming one.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod multi;
pub mod rng;
pub mod runner;
pub mod schedule;
pub mod task;
pub mod tick;
pub mod trace;
pub mod world;

pub use agent::AgentId;
pub use blackboard::{BbKey, Blackboard};
pub use multi::{MultiTask, Slot};
pub use rng::{derive_seed, mix64, DeterministicRng, SplitMix64};
pub use runner::{tick_runners, RunnerConfig, TaskRunner};
pub use schedule::{CallbackId, CallbackQueue};
pub use task::{AttachError, PriorityTask, Status, Task, TaskState};
pub use tick::TickContext;
pub use trace::{
    emit, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink, TRACE_LOG, TRACE_SINK,
};
pub use world::{WorldMut, WorldView};
