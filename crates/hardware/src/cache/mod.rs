//! Set-Associative Cache Simulator.
//!
//! This module implements a configurable N-way set-associative cache. It decodes
//! each address into tag, set index, and offset, resolves hits and misses inside
//! the target set, selects victims with a pluggable replacement policy, and
//! accounts for write-backs of dirty lines. Only metadata is modelled; no data
//! moves and no write-back is actually performed.

/// Cache replacement policy implementations (LRU, list LRU, FIFO, Random, PLRU).
pub mod policies;

/// Cache sets and lines.
pub mod set;

use std::fmt::Write as _;

use self::policies::EvictionPolicy;
use self::set::CacheSet;
use crate::common::addr::AddressDecoder;
use crate::common::data::AccessType;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, CacheGeometry, ReplacementPolicy};
use crate::stats::CacheStats;

/// Outcome of a single cache access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessResult {
    /// The block was resident.
    pub hit: bool,
    /// Way that was hit or filled.
    pub way: usize,
    /// Set the address mapped to.
    pub set_index: usize,
    /// A valid line was evicted to make room.
    pub evicted: bool,
    /// The evicted line was dirty and needed a write-back.
    pub evicted_dirty: bool,
    /// Tag of the evicted line, when `evicted` is set.
    pub evicted_tag: Option<u64>,
    /// Cycles charged for this access.
    pub latency: u64,
}

/// N-way set-associative cache.
///
/// Owns one [`CacheSet`] per set index and the aggregate [`CacheStats`].
/// Sets are independent: no invariant spans more than one of them.
#[derive(Debug, Clone)]
pub struct SetAssociativeCache {
    config: CacheConfig,
    geometry: CacheGeometry,
    decoder: AddressDecoder,
    seed: u64,
    sets: Vec<CacheSet>,
    stats: CacheStats,
}

impl SetAssociativeCache {
    /// Creates an LRU cache with 32-bit addresses and default latencies.
    ///
    /// # Arguments
    ///
    /// * `cache_size` - Total cache size in bytes.
    /// * `block_size` - Block (line) size in bytes; must be a power of two.
    /// * `associativity` - Ways per set; must be a power of two.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is invalid.
    pub fn new(
        cache_size: usize,
        block_size: usize,
        associativity: usize,
    ) -> Result<Self, ConfigError> {
        Self::from_config(&CacheConfig::with_geometry(
            cache_size,
            block_size,
            associativity,
        ))
    }

    /// Creates an LRU cache with an explicit address width.
    ///
    /// Same as [`SetAssociativeCache::new`] with `address_bits` in place of the default 32.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is invalid or `address_bits`
    /// cannot hold the offset and index fields.
    pub fn with_address_bits(
        cache_size: usize,
        block_size: usize,
        associativity: usize,
        address_bits: u32,
    ) -> Result<Self, ConfigError> {
        Self::from_config(&CacheConfig {
            address_bits,
            ..CacheConfig::with_geometry(cache_size, block_size, associativity)
        })
    }

    /// Creates a cache from a full configuration.
    ///
    /// When the configuration carries no seed, one is drawn from the thread RNG and
    /// logged so a Random-policy run can be reproduced.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if [`CacheConfig::geometry`] rejects the configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        let seed = config.seed.unwrap_or_else(rand::random);

        let sets = (0..geometry.num_sets)
            .map(|index| {
                EvictionPolicy::new(config.policy, config.ways, seed, index as u64)
                    .map(CacheSet::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            size = config.size_bytes,
            block = config.line_bytes,
            ways = config.ways,
            sets = geometry.num_sets,
            lines = geometry.num_lines,
            offset_bits = geometry.offset_bits,
            index_bits = geometry.index_bits,
            tag_bits = geometry.tag_bits,
            policy = %config.policy,
            seed,
            "cache configured"
        );

        Ok(Self {
            config: config.clone(),
            geometry,
            decoder: AddressDecoder::new(geometry.offset_bits, geometry.index_bits),
            seed,
            sets,
            stats: CacheStats::default(),
        })
    }

    /// Performs a read or write access.
    ///
    /// On a hit the line is promoted in the replacement order and, for writes,
    /// marked dirty. On a miss the lowest invalid way is filled, or the policy's
    /// victim is evicted first; the new line is dirty if the access is a write.
    ///
    /// # Arguments
    ///
    /// * `address` - Byte address being accessed.
    /// * `kind` - Read or write.
    ///
    /// # Returns
    ///
    /// An [`AccessResult`] describing the hit/miss, way, eviction, and latency.
    pub fn access(&mut self, address: u64, kind: AccessType) -> AccessResult {
        let decoded = self.decoder.decode(address);
        let set_index = decoded.index as usize;
        let set = &mut self.sets[set_index];

        let mut result = AccessResult {
            set_index,
            latency: self.config.hit_latency,
            ..AccessResult::default()
        };

        if let Some(way) = set.find_line(decoded.tag) {
            result.hit = true;
            result.way = way;
            set.update_lru(way);
            if kind.is_write() {
                set.mark_dirty(way);
            }
        } else {
            let way = set.find_victim();
            result.way = way;
            result.latency += self.config.miss_penalty;

            if let Some(victim) = set.install(way, decoded.tag, kind.is_write()) {
                result.evicted = true;
                result.evicted_dirty = victim.dirty;
                result.evicted_tag = Some(victim.tag);
                if victim.dirty {
                    result.latency += self.config.writeback_penalty;
                }
                tracing::debug!(
                    set = set_index,
                    way,
                    tag = victim.tag,
                    dirty = victim.dirty,
                    block = self.decoder.reconstruct(victim.tag, decoded.index),
                    "evicted line"
                );
            }
        }

        tracing::trace!(
            address,
            %kind,
            set = set_index,
            way = result.way,
            hit = result.hit,
            "access"
        );

        self.stats.record(kind, &result);
        result
    }

    /// Convenience wrapper for [`AccessType::Read`].
    pub fn read(&mut self, address: u64) -> AccessResult {
        self.access(address, AccessType::Read)
    }

    /// Convenience wrapper for [`AccessType::Write`].
    pub fn write(&mut self, address: u64) -> AccessResult {
        self.access(address, AccessType::Write)
    }

    /// Checks whether the block holding `address` is resident, without touching
    /// replacement state or statistics.
    pub fn contains(&self, address: u64) -> bool {
        let decoded = self.decoder.decode(address);
        self.sets[decoded.index as usize]
            .find_line(decoded.tag)
            .is_some()
    }

    /// Statistics accumulated since construction or the last reset.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Snapshot of the statistics.
    pub fn get_stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// Invalidates every line, restores every policy, and clears the statistics.
    ///
    /// The result is indistinguishable from a freshly constructed cache with the same seed.
    pub fn reset(&mut self) {
        for set in &mut self.sets {
            set.reset();
        }
        self.stats = CacheStats::default();
    }

    /// The configuration this cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The address decoder for this geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// The seed the Random policy was initialised with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The sets, indexed by set index.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Returns a set by index.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Total cache size in bytes.
    pub const fn cache_size(&self) -> usize {
        self.config.size_bytes
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        self.config.line_bytes
    }

    /// Ways per set.
    pub const fn associativity(&self) -> usize {
        self.config.ways
    }

    /// Replacement policy in use.
    pub const fn policy(&self) -> ReplacementPolicy {
        self.config.policy
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.geometry.num_sets
    }

    /// Number of lines.
    pub const fn num_lines(&self) -> usize {
        self.geometry.num_lines
    }

    /// Address width in bits.
    pub const fn address_bits(&self) -> u32 {
        self.config.address_bits
    }

    /// Offset field width.
    pub const fn offset_bits(&self) -> u32 {
        self.geometry.offset_bits
    }

    /// Index field width.
    pub const fn index_bits(&self) -> u32 {
        self.geometry.index_bits
    }

    /// Tag field width.
    pub const fn tag_bits(&self) -> u32 {
        self.geometry.tag_bits
    }

    /// Renders the contents of one set for debugging.
    ///
    /// Each way is shown as `V`/`-` (valid), `D`/`-` (dirty), its tag, and the
    /// reconstructed block address of valid lines, followed by the victim order
    /// when the policy keeps one.
    pub fn describe_set(&self, index: usize) -> Option<String> {
        let set = self.sets.get(index)?;
        let mut out = format!("Set {index}:\n");
        for (way, line) in set.lines().iter().enumerate() {
            let _ = write!(
                out,
                "  Way {way}: {}{} Tag={:#010x}",
                if line.valid { 'V' } else { '-' },
                if line.dirty { 'D' } else { '-' },
                line.tag
            );
            if line.valid {
                let addr = self.decoder.reconstruct(line.tag, index as u64);
                let _ = write!(out, " (Addr={addr:#x})");
            }
            out.push('\n');
        }
        if let Some(order) = set.policy().recency_order() {
            let order: Vec<String> = order.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "  Victim order: [{}]", order.join(", "));
        }
        Some(out)
    }

    /// Renders every set that holds at least one valid line.
    pub fn describe_all(&self) -> String {
        let mut out = String::from("=== Cache Contents ===\n");
        for index in 0..self.sets.len() {
            if self.sets[index].is_empty() {
                continue;
            }
            if let Some(text) = self.describe_set(index) {
                out.push_str(&text);
            }
        }
        out.push_str("======================\n");
        out
    }
}
