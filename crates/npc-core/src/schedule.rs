use crate::{TickContext, WorldMut, WorldView};

/// Handle for cancelling a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(u64);

type Callback<W> = Box<dyn FnOnce(&TickContext, <W as WorldView>::Agent, &mut W)>;

struct Entry<W>
where
    W: WorldMut + 'static,
{
    id: u64,
    due: f32,
    agent: W::Agent,
    run: Option<Callback<W>>,
}

/// Deferred one-shot effects, owned and drained by the single-threaded tick
/// loop.
///
/// Replaces blocking timers: a delayed effect (temporary speed boost,
/// cooldown expiry) is scheduled here and executed at a tick boundary once
/// due. Execution order is stable (due time, then schedule order), and every
/// callback is guarded by an owner-validity check so nothing mutates a
/// destroyed agent.
pub struct CallbackQueue<W>
where
    W: WorldMut + 'static,
{
    entries: Vec<Entry<W>>,
    next_id: u64,
}

impl<W> Default for CallbackQueue<W>
where
    W: WorldMut + 'static,
{
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<W> CallbackQueue<W>
where
    W: WorldMut + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedule `run` to execute `delay_seconds` of sim time from now, on
    /// behalf of `agent`.
    pub fn schedule_in(
        &mut self,
        ctx: &TickContext,
        delay_seconds: f32,
        agent: W::Agent,
        run: impl FnOnce(&TickContext, W::Agent, &mut W) + 'static,
    ) -> CallbackId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: ctx.time_seconds + delay_seconds.max(0.0),
            agent,
            run: Some(Box::new(run)),
        });
        CallbackId(id)
    }

    pub fn cancel(&mut self, id: CallbackId) {
        self.entries.retain(|e| e.id != id.0);
    }

    /// Drop every pending callback scheduled on behalf of `agent`. Called on
    /// agent destruction and task teardown so nothing dangles.
    pub fn cancel_for(&mut self, agent: W::Agent) {
        self.entries.retain(|e| e.agent != agent);
    }

    /// Run every callback that is due at `ctx.time_seconds`.
    ///
    /// Callbacks scheduled while this runs land in the queue and execute at
    /// the next boundary, even if already due.
    pub fn run_due(&mut self, ctx: &TickContext, world: &mut W) {
        let now = ctx.time_seconds;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entries).into_iter().partition(|e| e.due <= now);
        self.entries = rest;

        due.sort_by(|x, y| x.due.total_cmp(&y.due).then(x.id.cmp(&y.id)));
        for mut entry in due {
            if !world.is_alive(entry.agent) {
                continue;
            }
            if let Some(run) = entry.run.take() {
                run(ctx, entry.agent, world);
            }
        }
    }
}
