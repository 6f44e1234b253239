use std::collections::BTreeMap;

use npc_core::AgentId;

/// Named signals an agent can publish.
///
/// An enum instead of string keys: dispatch stays exhaustive and a typo is
/// a compile error, not a silent dead listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Signal {
    /// An alert caller raises allied chase priority.
    Alert,
    /// Cancels a previous `Alert`.
    UnAlert,
    /// Locomotion started (animation/audio hooks).
    Walk,
    /// Pursuit/attack started.
    Attack,
}

/// Handle to a mailbox allocated by [`SignalHub::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Route<A> {
    publisher: A,
    signal: Signal,
    subscriber: SubscriberId,
}

/// Per-world signal exchange.
///
/// Routes are kept in subscription order and mailboxes in a `BTreeMap`, so
/// delivery order is deterministic. Subscribing the same
/// (subscriber, publisher, signal) route twice is a no-op.
#[derive(Debug)]
pub struct SignalHub<A>
where
    A: AgentId,
{
    next_subscriber: u64,
    routes: Vec<Route<A>>,
    mailboxes: BTreeMap<SubscriberId, Vec<(A, Signal)>>,
}

impl<A> Default for SignalHub<A>
where
    A: AgentId,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> SignalHub<A>
where
    A: AgentId,
{
    pub fn new() -> Self {
        Self {
            next_subscriber: 0,
            routes: Vec::new(),
            mailboxes: BTreeMap::new(),
        }
    }

    /// Allocate a mailbox for a new subscriber.
    pub fn register(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.mailboxes.insert(id, Vec::new());
        id
    }

    /// Route `signal` published by `publisher` into `subscriber`'s mailbox.
    /// Idempotent: exact duplicate routes are dropped.
    pub fn subscribe(&mut self, subscriber: SubscriberId, publisher: A, signal: Signal) {
        let route = Route {
            publisher,
            signal,
            subscriber,
        };
        if self.routes.contains(&route) {
            return;
        }
        self.routes.push(route);
    }

    /// Number of live routes; useful for asserting dedup in tests.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Deliver `signal` to every mailbox subscribed to it from `publisher`,
    /// in subscription order.
    pub fn publish(&mut self, publisher: A, signal: Signal) {
        for route in self.routes.iter() {
            if route.publisher == publisher && route.signal == signal {
                if let Some(mailbox) = self.mailboxes.get_mut(&route.subscriber) {
                    mailbox.push((publisher, signal));
                }
            }
        }
    }

    /// Take everything pending in `subscriber`'s mailbox, in delivery order.
    /// Unknown subscribers drain nothing.
    pub fn drain(&mut self, subscriber: SubscriberId) -> Vec<(A, Signal)> {
        self.mailboxes
            .get_mut(&subscriber)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn pending(&self, subscriber: SubscriberId) -> usize {
        self.mailboxes.get(&subscriber).map_or(0, Vec::len)
    }

    /// Drop `subscriber`'s routes and mailbox. Published signals never reach
    /// a removed observer.
    pub fn remove(&mut self, subscriber: SubscriberId) {
        self.routes.retain(|r| r.subscriber != subscriber);
        self.mailboxes.remove(&subscriber);
    }

    /// Drop every route publishing from `agent` (agent destruction).
    pub fn remove_publisher(&mut self, agent: A) {
        self.routes.retain(|r| r.publisher != agent);
    }
}
