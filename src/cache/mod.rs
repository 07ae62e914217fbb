//! Timestamped last-value cache for the two weather record kinds.
//!
//! The store holds exactly one record per [`CacheKind`], written only on a
//! successful live fetch and read by every policy invocation until it is
//! overwritten. Freshness is age-based against each kind's budget.

mod storage;
mod traits;

pub use storage::{CacheStorage, SqliteStorage};
pub use traits::{CacheKind, CachedRecord};

#[cfg(test)]
pub use storage::MemoryStorage;
