//! Set-associative cache simulator library.
//!
//! This crate models the behaviour of a hardware set-associative cache for
//! architectural exploration:
//! 1. **Cache:** Address decoding, hit/miss resolution, victim selection, and dirty-line accounting.
//! 2. **Policies:** Counter LRU, list LRU, FIFO, seeded Random, and tree pseudo-LRU.
//! 3. **Statistics:** Hit/miss, traffic, eviction, and latency counters with a text report.
//! 4. **Simulation:** Trace readers, replay, configuration sweeps, and policy comparison.
//!
//! Only line metadata (valid, dirty, tag) is tracked; no data is stored.

/// Common types (address decoding, access types, errors).
pub mod common;
/// Cache configuration (defaults, policy selector, validation).
pub mod config;
/// The set-associative cache, its sets, and replacement policies.
pub mod cache;
/// Trace readers and simulation drivers.
pub mod sim;
/// Cache statistics collection and reporting.
pub mod stats;

/// Main cache type; construct with `SetAssociativeCache::new` or `from_config`.
pub use crate::cache::{AccessResult, SetAssociativeCache};
/// Read/write access classification.
pub use crate::common::AccessType;
/// Root configuration type; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::{CacheConfig, ReplacementPolicy};
/// Aggregate statistics.
pub use crate::stats::CacheStats;
