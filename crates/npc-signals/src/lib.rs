//! Typed per-agent publish/subscribe signals.
//!
//! Replaces string-keyed event listeners with an enumerated signal type and
//! deduplicated subscriptions. Delivery is mailbox-based and serialized on
//! the simulation thread: publishing appends to subscriber mailboxes, and
//! subscribers drain theirs during their own tick phase.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod hub;

pub use hub::{Signal, SignalHub, SubscriberId};
