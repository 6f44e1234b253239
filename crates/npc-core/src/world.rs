use crate::AgentId;

/// Read-only world access.
///
/// The core crate does not prescribe which queries a world must expose;
/// behavior crates define per-concern extension traits (body, locomotion,
/// combat, signals, spawning) on top of this.
pub trait WorldView {
    type Agent: AgentId;

    /// Whether the agent still exists in the world.
    ///
    /// Deferred callbacks check this before mutating state, so a callback
    /// scheduled against a destroyed agent is dropped rather than run.
    fn is_alive(&self, _agent: Self::Agent) -> bool {
        true
    }
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
