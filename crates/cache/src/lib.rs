#![warn(missing_docs)]
//! Key-value caching with a fixed write-time TTL and lazy expiry.
//!
//! [`TimedCache`] is the single-threaded default; expired entries are pruned
//! opportunistically on access, never by a background sweep. [`SharedTimedCache`]
//! is the opt-in thread-safe construction for callers living off the main
//! simulation thread.

mod shared;
mod timed;

pub use shared::SharedTimedCache;
pub use timed::TimedCache;
