#![warn(missing_docs)]
//! Facade over the modkit utility crates.
//!
//! Re-exports the event-dispatch and timed-cache surfaces so mods can depend
//! on a single crate. Each component remains independently usable through its
//! own crate (`modkit-events`, `modkit-cache`).

pub use modkit_cache::{SharedTimedCache, TimedCache};
pub use modkit_events::{AnyEventBus, EventBus, ListenerId};
