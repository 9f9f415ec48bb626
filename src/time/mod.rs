//! Timestamps as the jump-run table stores them.

mod timestamp;
pub use timestamp::{InvalidTimestamp, Timestamp};
