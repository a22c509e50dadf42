#![warn(missing_docs)]
//! Process-local, priority-ordered event dispatch keyed by string topics.
//!
//! An [`EventBus`] delivers events synchronously on the caller's thread, in
//! descending priority order, isolating listener failures so that one broken
//! mod callback cannot starve the rest of a topic.

mod bus;
mod dynamic;

pub use bus::{EventBus, ListenerId};
pub use dynamic::AnyEventBus;
