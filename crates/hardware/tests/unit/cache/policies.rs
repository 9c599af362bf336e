//! Cache Replacement Policy Tests.
//!
//! Verifies the victim selection logic for LRU, list LRU, FIFO, PLRU, and Random.
//! Each policy tracks a single set through `access(way)` and `get_victim()`.
//! Tests drive them in isolation, mostly through [`EvictionPolicy`] so that the
//! range checks are exercised as well.

use cachesim_core::cache::policies::{
    EvictionPolicy, FifoPolicy, ListLruPolicy, LruPolicy, PlruPolicy, Policy, RandomPolicy,
};
use cachesim_core::common::{ConfigError, PolicyError};
use cachesim_core::config::ReplacementPolicy;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn policy(kind: ReplacementPolicy, ways: usize) -> EvictionPolicy {
    EvictionPolicy::new(kind, ways, 0xC0FFEE, 0).unwrap()
}

fn touch(p: &mut EvictionPolicy, ways: &[usize]) {
    for &way in ways {
        p.access(way).unwrap();
    }
}

// ══════════════════════════════════════════════════════════
// 1. LRU (both implementations)
// ══════════════════════════════════════════════════════════

/// Before any access the ways are ordered 0..N, so way 0 is the victim.
#[rstest]
#[case(ReplacementPolicy::Lru)]
#[case(ReplacementPolicy::ListLru)]
fn lru_initial_victim_is_way_zero(#[case] kind: ReplacementPolicy) {
    let mut p = policy(kind, 4);
    assert_eq!(p.get_victim(), 0);
    assert_eq!(p.recency_order(), Some(vec![0, 1, 2, 3]));
}

/// Classic LRU scenario: access 0,1,2,3 then re-access 0 → LRU becomes 1.
#[rstest]
#[case(ReplacementPolicy::Lru)]
#[case(ReplacementPolicy::ListLru)]
fn lru_evicts_true_lru_after_reaccess(#[case] kind: ReplacementPolicy) {
    let mut p = policy(kind, 4);
    touch(&mut p, &[0, 1, 2, 3]);
    assert_eq!(p.get_victim(), 0);

    touch(&mut p, &[0]);
    assert_eq!(p.get_victim(), 1);

    touch(&mut p, &[1]);
    assert_eq!(p.get_victim(), 2);
    assert_eq!(p.recency_order(), Some(vec![2, 3, 0, 1]));
}

/// Repeated access to the MRU way leaves the victim alone.
#[rstest]
#[case(ReplacementPolicy::Lru)]
#[case(ReplacementPolicy::ListLru)]
fn lru_repeated_access_same_way(#[case] kind: ReplacementPolicy) {
    let mut p = policy(kind, 4);
    touch(&mut p, &[0, 1, 2, 3, 3, 3]);
    assert_eq!(p.get_victim(), 0);
}

/// `get_victim` is a query: asking twice yields the same answer.
#[rstest]
#[case(ReplacementPolicy::Lru)]
#[case(ReplacementPolicy::ListLru)]
#[case(ReplacementPolicy::Fifo)]
#[case(ReplacementPolicy::Plru)]
fn victim_query_is_stable(#[case] kind: ReplacementPolicy) {
    let mut p = policy(kind, 8);
    touch(&mut p, &[3, 1, 4, 1, 5]);
    let first = p.get_victim();
    assert_eq!(p.get_victim(), first);
}

#[test]
fn lru_direct_mapped_always_evicts_way_zero() {
    let mut lru = LruPolicy::new(1);
    let mut list = ListLruPolicy::new(1);
    for _ in 0..4 {
        lru.access(0);
        list.access(0);
        assert_eq!(lru.get_victim(), 0);
        assert_eq!(list.get_victim(), 0);
    }
}

// ══════════════════════════════════════════════════════════
// 2. FIFO
// ══════════════════════════════════════════════════════════

#[test]
fn fifo_evicts_first_inserted() {
    let mut p = policy(ReplacementPolicy::Fifo, 4);
    touch(&mut p, &[2, 0, 3, 1]);
    assert_eq!(p.get_victim(), 2);
    assert_eq!(p.recency_order(), Some(vec![2, 0, 3, 1]));
}

/// Re-accessing a resident way never changes its victim priority.
#[test]
fn fifo_reaccess_does_not_refresh() {
    let mut p = policy(ReplacementPolicy::Fifo, 4);
    touch(&mut p, &[0, 1, 2, 3]);
    touch(&mut p, &[0, 0, 0]);
    assert_eq!(p.get_victim(), 0);
}

/// Invalidation forgets the insertion time, so re-installing moves the way to the back.
#[test]
fn fifo_invalidate_then_reinsert_moves_to_back() {
    let mut p = policy(ReplacementPolicy::Fifo, 4);
    touch(&mut p, &[0, 1, 2, 3]);
    p.invalidate(0).unwrap();
    p.access(0).unwrap();
    assert_eq!(p.get_victim(), 1);
    assert_eq!(p.recency_order(), Some(vec![1, 2, 3, 0]));
}

/// A way that was never inserted goes first.
#[test]
fn fifo_prefers_never_inserted_way() {
    let mut fifo = FifoPolicy::new(4);
    fifo.access(0);
    fifo.access(1);
    fifo.access(3);
    assert_eq!(fifo.get_victim(), 2);
}

// ══════════════════════════════════════════════════════════
// 3. Pseudo-LRU
// ══════════════════════════════════════════════════════════

/// After accessing 0,1,2,3 the tree path never points at way 3.
#[test]
fn plru_never_evicts_most_recent_way() {
    let mut p = policy(ReplacementPolicy::Plru, 4);
    touch(&mut p, &[0, 1, 2, 3]);
    let victim = p.get_victim();
    assert_ne!(victim, 3);
    assert_eq!(victim, 0);
}

/// For every supported size, the way just accessed is never the victim.
#[rstest]
fn plru_most_recent_is_protected(#[values(4, 8, 16)] ways: usize) {
    let mut p = PlruPolicy::new(ways);
    for way in (0..ways).chain((0..ways).rev()).chain([1, ways - 1, 2]) {
        p.access(way);
        assert_ne!(p.get_victim(), way, "way {way} of {ways}");
    }
}

/// Accessing 0,1 in a 4-way set points the root at the right half.
#[test]
fn plru_tree_bits_follow_access_path() {
    let mut p = PlruPolicy::new(4);
    p.access(0);
    p.access(1);
    // root=1 (victim right), n1=0 (way 0 older than way 1), n2 untouched.
    assert_eq!(p.bits(), 0b001);
    assert_eq!(p.get_victim(), 2);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(32)]
fn plru_rejects_unsupported_sizes(#[case] ways: usize) {
    assert!(matches!(
        EvictionPolicy::new(ReplacementPolicy::Plru, ways, 0, 0),
        Err(ConfigError::UnsupportedPlruWays(w)) if w == ways
    ));
}

// ══════════════════════════════════════════════════════════
// 4. Random
// ══════════════════════════════════════════════════════════

/// Over 100k draws every way lands within ±5% of the uniform expectation.
#[rstest]
fn random_is_uniform(#[values(2, 4, 8)] ways: usize) {
    const DRAWS: usize = 100_000;
    let mut p = RandomPolicy::new(ways, 12345, 0);
    let mut counts = vec![0usize; ways];
    for _ in 0..DRAWS {
        counts[p.get_victim()] += 1;
    }
    let expected = DRAWS as f64 / ways as f64;
    for (way, &count) in counts.iter().enumerate() {
        let deviation = (count as f64 - expected).abs() / expected;
        assert!(
            deviation < 0.05,
            "way {way}: {count} draws, expected ~{expected}"
        );
    }
}

#[test]
fn random_same_seed_same_sequence() {
    let mut a = RandomPolicy::new(8, 99, 3);
    let mut b = RandomPolicy::new(8, 99, 3);
    let seq_a: Vec<usize> = (0..64).map(|_| a.get_victim()).collect();
    let seq_b: Vec<usize> = (0..64).map(|_| b.get_victim()).collect();
    assert_eq!(seq_a, seq_b);
    assert!(seq_a.iter().all(|&w| w < 8));
}

/// Different streams of one seed give different sequences.
#[test]
fn random_streams_are_independent() {
    let mut a = RandomPolicy::new(16, 7, 0);
    let mut b = RandomPolicy::new(16, 7, 1);
    let seq_a: Vec<usize> = (0..64).map(|_| a.get_victim()).collect();
    let seq_b: Vec<usize> = (0..64).map(|_| b.get_victim()).collect();
    assert_ne!(seq_a, seq_b);
}

/// Accesses do not advance the generator.
#[test]
fn random_ignores_accesses() {
    let mut a = policy(ReplacementPolicy::Random, 4);
    let mut b = policy(ReplacementPolicy::Random, 4);
    touch(&mut a, &[0, 1, 2, 3, 2, 1]);
    for _ in 0..16 {
        assert_eq!(a.get_victim(), b.get_victim());
    }
    assert_eq!(a.recency_order(), None);
}

// ══════════════════════════════════════════════════════════
// 5. Reset and input validation (all policies)
// ══════════════════════════════════════════════════════════

/// State after `reset()` equals a fresh instance, and a second reset changes nothing.
#[rstest]
fn reset_restores_construction_state(
    #[values(
        ReplacementPolicy::Lru,
        ReplacementPolicy::ListLru,
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Random,
        ReplacementPolicy::Plru
    )]
    kind: ReplacementPolicy,
) {
    let fresh = policy(kind, 8);
    let mut p = fresh.clone();
    touch(&mut p, &[7, 2, 5, 2, 0, 6]);
    for _ in 0..5 {
        let _ = p.get_victim();
    }
    p.invalidate(2).unwrap();

    p.reset();
    assert_eq!(p, fresh);
    p.reset();
    assert_eq!(p, fresh);

    let mut q = fresh.clone();
    for _ in 0..8 {
        assert_eq!(p.get_victim(), q.get_victim());
    }
}

/// Out-of-range ways are rejected without touching the state.
#[rstest]
fn out_of_range_way_is_rejected(
    #[values(
        ReplacementPolicy::Lru,
        ReplacementPolicy::ListLru,
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Random,
        ReplacementPolicy::Plru
    )]
    kind: ReplacementPolicy,
) {
    let mut p = policy(kind, 4);
    touch(&mut p, &[1, 3]);
    let before = p.clone();

    assert_eq!(
        p.access(4),
        Err(PolicyError::WayOutOfRange { way: 4, ways: 4 })
    );
    assert_eq!(
        p.invalidate(usize::MAX),
        Err(PolicyError::WayOutOfRange {
            way: usize::MAX,
            ways: 4
        })
    );
    assert_eq!(p, before);
}

#[test]
fn zero_ways_is_a_config_error() {
    for kind in ReplacementPolicy::ALL {
        assert!(matches!(
            EvictionPolicy::new(kind, 0, 0, 0),
            Err(ConfigError::ZeroAssociativity)
        ));
    }
}

#[test]
fn eviction_policy_reports_kind_and_ways() {
    for kind in [
        ReplacementPolicy::Lru,
        ReplacementPolicy::ListLru,
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Random,
        ReplacementPolicy::Plru,
    ] {
        let p = policy(kind, 16);
        assert_eq!(p.kind(), kind);
        assert_eq!(p.ways(), 16);
    }
}
