//! Storage module for tasklift
//!
//! Persists the pending calendar snapshot as JSON in the data directory.

mod snapshot;

pub use snapshot::PendingSnapshot;
