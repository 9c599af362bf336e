//! Simulation Driver Tests.
//!
//! Verifies trace replay, configuration sweeps, and the policy comparison
//! driven by way traces.

use cachesim_core::cache::SetAssociativeCache;
use cachesim_core::common::ConfigError;
use cachesim_core::config::{CacheConfig, ReplacementPolicy};
use cachesim_core::sim::simulator::run_policy;
use cachesim_core::sim::{self, TraceEntry};
use pretty_assertions::assert_eq;

/// Cycles through `blocks` distinct blocks of one set, `rounds` times.
fn looping_trace(blocks: u64, stride: u64, rounds: usize) -> Vec<TraceEntry> {
    (0..rounds)
        .flat_map(|_| (0..blocks).map(move |b| TraceEntry::read(b * stride)))
        .collect()
}

#[test]
fn replay_matches_manual_accesses() {
    let trace = vec![
        TraceEntry::read(0x1000),
        TraceEntry::read(0x1004),
        TraceEntry::write(0x2000),
    ];
    let mut cache = SetAssociativeCache::new(256, 64, 4).unwrap();
    let stats = sim::replay(&mut cache, &trace);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.writes, 1);
    assert_eq!(&stats, cache.stats());
}

/// A 5-block loop over a 4-way set thrashes LRU and FIFO completely.
#[test]
fn sweep_covers_every_pair() {
    let base = CacheConfig {
        seed: Some(3),
        ..CacheConfig::with_geometry(1024, 64, 4)
    };
    let trace = looping_trace(5, 0x400, 20);
    let policies = [ReplacementPolicy::Lru, ReplacementPolicy::Fifo, ReplacementPolicy::Plru];
    let results = sim::sweep(&base, &policies, &[2, 4, 8], &trace);
    assert_eq!(results.len(), 9);

    // Policy-major order; pseudo-LRU rejects two ways.
    let lru_4 = results[1].as_ref().unwrap();
    assert_eq!((lru_4.policy, lru_4.ways, lru_4.sets), (ReplacementPolicy::Lru, 4, 4));
    assert_eq!(lru_4.stats.hits, 0);

    let fifo_4 = results[4].as_ref().unwrap();
    assert_eq!(fifo_4.stats.hits, 0);

    let lru_8 = results[2].as_ref().unwrap();
    assert_eq!(lru_8.stats.misses, 5);

    assert!(matches!(results[6], Err(ConfigError::UnsupportedPlruWays(2))));
    assert!(results[7].is_ok());
}

#[test]
fn run_policy_reports_victims_and_rejections() {
    let report = run_policy(ReplacementPolicy::Lru, 4, 0, &[0, 1, 2, 3, 7, 0]).unwrap();
    assert_eq!(report.accesses, 5);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.victims, vec![1, 2, 3, 0, 1]);
}

#[test]
fn compare_policies_lru_variants_agree() {
    let trace = [0, 2, 1, 3, 2, 0, 0, 3, 1, 2];
    let reports = sim::compare_policies(4, 5, &trace);
    assert_eq!(reports.len(), ReplacementPolicy::ALL.len());

    let lru = reports.iter().find(|r| r.policy == ReplacementPolicy::Lru).unwrap();
    let list = reports.iter().find(|r| r.policy == ReplacementPolicy::ListLru).unwrap();
    assert_eq!(lru.victims, list.victims);
    assert!(reports.iter().all(|r| r.victims.len() == trace.len()));
}

/// Pseudo-LRU is dropped when the associativity is unsupported.
#[test]
fn compare_policies_skips_unsupported() {
    let reports = sim::compare_policies(2, 0, &[0, 1, 0]);
    assert_eq!(reports.len(), ReplacementPolicy::ALL.len() - 1);
    assert!(reports.iter().all(|r| r.policy != ReplacementPolicy::Plru));
}
