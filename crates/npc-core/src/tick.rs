use crate::{rng, AgentId, SplitMix64};

/// Per-tick simulation context handed to every task call.
///
/// `time_seconds` is the accumulated sim clock; timed policies capture it at
/// a recompute and compare later, never blocking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub time_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}
