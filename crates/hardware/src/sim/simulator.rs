//! Simulation drivers.
//!
//! Glue between trace sources, caches, and reports:
//! 1. **Replay:** Feed a trace through one cache.
//! 2. **Sweep:** Replay the same trace across policies and associativities.
//! 3. **Policy comparison:** Drive bare replacement policies with a way trace.

use serde::Serialize;

use crate::cache::SetAssociativeCache;
use crate::cache::policies::EvictionPolicy;
use crate::common::error::{ConfigError, PolicyError};
use crate::config::{CacheConfig, ReplacementPolicy};
use crate::sim::trace::TraceEntry;
use crate::stats::CacheStats;

/// Replays `entries` through `cache` and returns the resulting statistics.
///
/// Statistics accumulate on top of whatever the cache already counted.
pub fn replay<'a>(
    cache: &mut SetAssociativeCache,
    entries: impl IntoIterator<Item = &'a TraceEntry>,
) -> CacheStats {
    for entry in entries {
        let _ = cache.access(entry.address, entry.kind);
    }
    cache.get_stats()
}

/// Statistics for one configuration of a sweep.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepResult {
    /// Replacement policy.
    pub policy: ReplacementPolicy,
    /// Associativity.
    pub ways: usize,
    /// Number of sets for this associativity.
    pub sets: usize,
    /// Statistics after replaying the whole trace.
    pub stats: CacheStats,
}

/// Replays `entries` once per `(policy, ways)` pair built on top of `base`.
///
/// Each entry of the returned vector is either the sweep result or the
/// configuration error for that pair (e.g. pseudo-LRU with two ways), in
/// policy-major order.
pub fn sweep(
    base: &CacheConfig,
    policies: &[ReplacementPolicy],
    ways: &[usize],
    entries: &[TraceEntry],
) -> Vec<Result<SweepResult, ConfigError>> {
    let mut results = Vec::with_capacity(policies.len() * ways.len());
    for &policy in policies {
        for &w in ways {
            let config = CacheConfig {
                policy,
                ways: w,
                ..base.clone()
            };
            results.push(SetAssociativeCache::from_config(&config).map(|mut cache| {
                let stats = replay(&mut cache, entries);
                SweepResult {
                    policy,
                    ways: w,
                    sets: cache.num_sets(),
                    stats,
                }
            }));
        }
    }
    results
}

/// Victim sequence produced by one policy for a way trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PolicyReport {
    /// Replacement policy.
    pub policy: ReplacementPolicy,
    /// Trace entries accepted by the policy.
    pub accesses: usize,
    /// Trace entries rejected as out of range.
    pub rejected: usize,
    /// Victim chosen after each accepted access.
    pub victims: Vec<usize>,
}

/// Drives one policy with a way trace: `access(way)` then `get_victim()` per entry.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the policy cannot be built for `ways`.
pub fn run_policy(
    policy: ReplacementPolicy,
    ways: usize,
    seed: u64,
    trace: &[usize],
) -> Result<PolicyReport, ConfigError> {
    let mut state = EvictionPolicy::new(policy, ways, seed, 0)?;
    let mut report = PolicyReport {
        policy,
        accesses: 0,
        rejected: 0,
        victims: Vec::with_capacity(trace.len()),
    };
    for &way in trace {
        match state.access(way) {
            Ok(()) => {
                report.accesses += 1;
                report.victims.push(state.get_victim());
            }
            Err(PolicyError::WayOutOfRange { .. }) => report.rejected += 1,
        }
    }
    Ok(report)
}

/// Runs [`run_policy`] for every policy that supports `ways`.
///
/// Pseudo-LRU is left out when `ways` is not 4, 8, or 16.
pub fn compare_policies(ways: usize, seed: u64, trace: &[usize]) -> Vec<PolicyReport> {
    ReplacementPolicy::ALL
        .iter()
        .filter_map(|&policy| match run_policy(policy, ways, seed, trace) {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!(%policy, %err, "skipping policy");
                None
            }
        })
        .collect()
}
