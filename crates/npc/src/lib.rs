//! Umbrella crate that re-exports the `npc-*` building blocks.
//!
//! Intended as a convenient entrypoint: the scheduling kernel under
//! [`core`], typed signals under [`signals`], and concrete behaviors under
//! [`tasks`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use npc_core as core;

#[cfg(feature = "signals")]
#[cfg_attr(docsrs, doc(cfg(feature = "signals")))]
pub use npc_signals as signals;

#[cfg(feature = "tasks")]
#[cfg_attr(docsrs, doc(cfg(feature = "tasks")))]
pub use npc_tasks as tasks;
