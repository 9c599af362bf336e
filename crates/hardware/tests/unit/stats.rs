//! Statistics Verification.
//!
//! Ensures [`CacheStats`] accounts every access outcome correctly and that the
//! text report exposes the selected sections.

use cachesim_core::cache::{AccessResult, SetAssociativeCache};
use cachesim_core::common::AccessType;
use cachesim_core::stats::CacheStats;
use pretty_assertions::assert_eq;

#[test]
fn empty_stats_rates_are_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.accesses(), 0);
    assert_eq!(stats.hit_rate(), 0.0);
    assert_eq!(stats.miss_rate(), 0.0);
    assert_eq!(stats.average_latency(), 0.0);
}

#[test]
fn record_counts_each_outcome() {
    let mut stats = CacheStats::default();
    stats.record(
        AccessType::Read,
        &AccessResult {
            hit: true,
            latency: 4,
            ..AccessResult::default()
        },
    );
    stats.record(
        AccessType::Write,
        &AccessResult {
            evicted: true,
            evicted_dirty: true,
            evicted_tag: Some(3),
            latency: 204,
            ..AccessResult::default()
        },
    );
    stats.record(
        AccessType::Read,
        &AccessResult {
            evicted: true,
            evicted_tag: Some(9),
            latency: 104,
            ..AccessResult::default()
        },
    );

    assert_eq!(
        stats,
        CacheStats {
            hits: 1,
            misses: 2,
            reads: 2,
            writes: 1,
            evictions: 2,
            dirty_evictions: 1,
            total_latency: 312,
        }
    );
    assert!((stats.hit_rate() - 1.0 / 3.0).abs() < 1e-9);
    assert!((stats.hit_rate() + stats.miss_rate() - 1.0).abs() < 1e-9);
    assert!((stats.average_latency() - 104.0).abs() < 1e-9);
}

/// Cache statistics keep `hits + misses == reads + writes`.
#[test]
fn cache_stats_are_consistent() {
    let mut cache = SetAssociativeCache::new(512, 64, 2).unwrap();
    for i in 0..300u64 {
        let kind = if i % 5 == 0 { AccessType::Write } else { AccessType::Read };
        let _ = cache.access((i * 0x1C4) & 0x3FFF, kind);
    }
    let stats = cache.stats();
    assert_eq!(stats.accesses(), 300);
    assert_eq!(stats.reads + stats.writes, 300);
    assert_eq!(stats.writes, 60);
    assert!(stats.dirty_evictions <= stats.evictions);
    assert!(stats.evictions <= stats.misses);
}

#[test]
fn render_all_sections() {
    let stats = CacheStats {
        hits: 3,
        misses: 1,
        reads: 2,
        writes: 2,
        evictions: 1,
        dirty_evictions: 1,
        total_latency: 216,
    };
    let text = stats.render_sections(&[]);
    for heading in ["CACHE STATISTICS", "SUMMARY", "TRAFFIC", "EVICTIONS", "LATENCY"] {
        assert!(text.contains(heading), "missing {heading}");
    }
    assert!(text.contains("hits                   3 (75.00%)"));
    assert!(text.contains("misses                 1 (25.00%)"));
    assert!(text.contains("dirty_evictions        1"));
    assert!(text.contains("avg_cycles             54.00"));
}

#[test]
fn render_selected_sections_only() {
    let text = CacheStats::default().render_sections(&["traffic"]);
    assert!(text.contains("TRAFFIC"));
    assert!(!text.contains("SUMMARY"));
    assert!(!text.contains("EVICTIONS"));
    assert!(!text.contains("LATENCY"));
}

#[test]
fn stats_serialize_to_json() {
    let stats = CacheStats {
        hits: 5,
        misses: 2,
        ..CacheStats::default()
    };
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["hits"], 5);
    assert_eq!(value["misses"], 2);
    assert_eq!(value["dirty_evictions"], 0);
}
