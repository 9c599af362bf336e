//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a cache.
//! It provides:
//! 1. **Defaults:** Baseline geometry and latency constants.
//! 2. **Structures:** `CacheConfig`, loadable from JSON, and the validated `CacheGeometry`.
//! 3. **Enums:** The replacement policy selector.
//!
//! Configuration is supplied as JSON (`CacheConfig::from_file`) or built in code from
//! `CacheConfig::default()`; the CLI overrides individual fields with its flags.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values describe a typical L1 data cache when not explicitly
/// overridden in a configuration file.
mod defaults {
    /// Default cache size in bytes (32 KiB).
    pub const CACHE_SIZE: usize = 32 * 1024;

    /// Default cache line size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes and DRAM burst length.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (8 ways).
    pub const CACHE_WAYS: usize = 8;

    /// Default address width in bits.
    pub const ADDRESS_BITS: u32 = 32;

    /// Cycles charged for every access that reaches the cache.
    pub const HIT_LATENCY: u64 = 4;

    /// Additional cycles charged when the block must be fetched from the next level.
    pub const MISS_PENALTY: u64 = 100;

    /// Additional cycles charged when a dirty victim must be written back.
    pub const WRITEBACK_PENALTY: u64 = 100;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict
/// when a new line must be installed in a full cache set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used, tracked with per-way timestamps.
    ///
    /// Evicts the cache line that was accessed least recently.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Least Recently Used, tracked with an index-linked recency list.
    ///
    /// Produces exactly the same victims as [`ReplacementPolicy::Lru`]; only the
    /// bookkeeping differs.
    #[serde(alias = "ListLru")]
    ListLru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the line installed earliest, regardless of later hits.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly chosen way from the set.
    #[serde(alias = "Random")]
    Random,
    /// Pseudo-LRU (tree-based) replacement policy.
    ///
    /// Approximates LRU using a binary tree of `ways - 1` bits.
    #[serde(alias = "Plru")]
    Plru,
}

impl ReplacementPolicy {
    /// Every policy, in report order.
    pub const ALL: [Self; 5] = [Self::Lru, Self::ListLru, Self::Fifo, Self::Random, Self::Plru];

    /// Short display name used in reports and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::ListLru => "List-LRU",
            Self::Fifo => "FIFO",
            Self::Random => "Random",
            Self::Plru => "Pseudo-LRU",
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "list-lru" | "list_lru" | "listlru" => Ok(Self::ListLru),
            "fifo" => Ok(Self::Fifo),
            "random" | "rand" => Ok(Self::Random),
            "plru" | "pseudo-lru" | "pseudo_lru" | "pseudolru" => Ok(Self::Plru),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Cache configuration.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{
///     "size_bytes": 1024,
///     "line_bytes": 64,
///     "ways": 4,
///     "policy": "PLRU"
/// }"#;
///
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Plru);
/// assert_eq!(config.address_bits, 32);
/// assert_eq!(config.geometry().unwrap().num_sets, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line (block) size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways per set)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Width of the simulated physical address in bits
    #[serde(default = "CacheConfig::default_address_bits")]
    pub address_bits: u32,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Seed for the Random policy; a fresh seed is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Cycles charged per access
    #[serde(default = "CacheConfig::default_hit_latency")]
    pub hit_latency: u64,

    /// Extra cycles charged per miss
    #[serde(default = "CacheConfig::default_miss_penalty")]
    pub miss_penalty: u64,

    /// Extra cycles charged per dirty eviction
    #[serde(default = "CacheConfig::default_writeback_penalty")]
    pub writeback_penalty: u64,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default address width.
    fn default_address_bits() -> u32 {
        defaults::ADDRESS_BITS
    }

    /// Returns the default hit latency in cycles.
    fn default_hit_latency() -> u64 {
        defaults::HIT_LATENCY
    }

    /// Returns the default miss penalty in cycles.
    fn default_miss_penalty() -> u64 {
        defaults::MISS_PENALTY
    }

    /// Returns the default write-back penalty in cycles.
    fn default_writeback_penalty() -> u64 {
        defaults::WRITEBACK_PENALTY
    }

    /// Creates a configuration with the given geometry and default everything else.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total cache size in bytes.
    /// * `line_bytes` - Block size in bytes.
    /// * `ways` - Associativity.
    pub fn with_geometry(size_bytes: usize, line_bytes: usize, ways: usize) -> Self {
        Self {
            size_bytes,
            line_bytes,
            ways,
            ..Self::default()
        }
    }

    /// Parses a configuration from a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is malformed or names an unknown policy.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Json`] if its contents do not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validates the geometry and derives the set count and address field widths.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the block size or associativity is zero or not a
    /// power of two, if the cache size is not a whole number of sets, if the
    /// implied set count is zero or not a power of two, if the
    /// address width cannot hold the offset and index fields, or if pseudo-LRU is
    /// requested for an associativity other than 4, 8, or 16.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        if self.size_bytes == 0 {
            return Err(ConfigError::ZeroCacheSize);
        }
        if self.line_bytes == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(self.line_bytes));
        }
        if !self.ways.is_power_of_two() {
            return Err(ConfigError::AssociativityNotPowerOfTwo(self.ways));
        }

        let num_lines = self.size_bytes / self.line_bytes;
        let num_sets = num_lines / self.ways;
        if num_sets == 0 {
            return Err(ConfigError::NoSets {
                size: self.size_bytes,
                block: self.line_bytes,
                ways: self.ways,
            });
        }
        // num_sets > 0 bounds line_bytes * ways by size_bytes.
        let set_bytes = self.line_bytes * self.ways;
        if self.size_bytes % set_bytes != 0 {
            return Err(ConfigError::SizeNotMultiple {
                size: self.size_bytes,
                set_bytes,
            });
        }
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo(num_sets));
        }

        let offset_bits = self.line_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if self.address_bits == 0
            || self.address_bits > u64::BITS
            || offset_bits + index_bits > self.address_bits
        {
            return Err(ConfigError::AddressWidth {
                address_bits: self.address_bits,
                offset_bits,
                index_bits,
            });
        }

        if self.policy == ReplacementPolicy::Plru && !matches!(self.ways, 4 | 8 | 16) {
            return Err(ConfigError::UnsupportedPlruWays(self.ways));
        }

        Ok(CacheGeometry {
            num_lines,
            num_sets,
            offset_bits,
            index_bits,
            tag_bits: self.address_bits - offset_bits - index_bits,
        })
    }
}

impl Default for CacheConfig {
    /// Creates a default configuration: 32 KiB, 64-byte lines, 8 ways, LRU, 32-bit addresses.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            address_bits: defaults::ADDRESS_BITS,
            policy: ReplacementPolicy::default(),
            seed: None,
            hit_latency: defaults::HIT_LATENCY,
            miss_penalty: defaults::MISS_PENALTY,
            writeback_penalty: defaults::WRITEBACK_PENALTY,
        }
    }
}

/// Geometry derived from a validated [`CacheConfig`].
///
/// Invariant: `offset_bits + index_bits + tag_bits` equals the configured address width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    /// Total number of lines (`size / line`).
    pub num_lines: usize,
    /// Number of sets (`num_lines / ways`).
    pub num_sets: usize,
    /// `log2(line_bytes)`.
    pub offset_bits: u32,
    /// `log2(num_sets)`.
    pub index_bits: u32,
    /// Remaining high-order address bits.
    pub tag_bits: u32,
}
