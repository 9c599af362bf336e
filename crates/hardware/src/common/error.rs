//! Error definitions.
//!
//! This module defines the failure modes of the simulator. It provides:
//! 1. **Configuration Errors:** Geometry that cannot describe a real cache, rejected at construction.
//! 2. **Policy Errors:** Way indices outside a set, rejected before any state is touched.
//! 3. **Trace Errors:** I/O failures while reading a trace. Malformed lines are skipped, not reported.
//! 4. **Parse Errors:** Access mnemonics that name neither a read nor a write.

use thiserror::Error;

/// Errors raised while validating or loading a cache configuration.
///
/// Construction aborts on any of these; a cache with undefined geometry is never produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The total cache size is zero.
    #[error("cache size must be non-zero")]
    ZeroCacheSize,

    /// The block (line) size is zero.
    #[error("block size must be non-zero")]
    ZeroBlockSize,

    /// The associativity is zero.
    #[error("associativity must be non-zero")]
    ZeroAssociativity,

    /// The block size is not a power of two.
    #[error("block size {0} is not a power of two")]
    BlockSizeNotPowerOfTwo(usize),

    /// The associativity is not a power of two.
    #[error("associativity {0} is not a power of two")]
    AssociativityNotPowerOfTwo(usize),

    /// Size, block size, and associativity leave no room for a single set.
    #[error("{size} bytes with {block}-byte blocks and {ways} ways yields no sets")]
    NoSets {
        /// Total cache size in bytes.
        size: usize,
        /// Block size in bytes.
        block: usize,
        /// Ways per set.
        ways: usize,
    },

    /// The cache size is not a whole number of sets.
    #[error("cache size {size} is not a multiple of the {set_bytes}-byte set size")]
    SizeNotMultiple {
        /// Requested cache size in bytes.
        size: usize,
        /// Bytes per set (`block * ways`).
        set_bytes: usize,
    },

    /// The derived set count is not a power of two.
    #[error("set count {0} is not a power of two")]
    SetCountNotPowerOfTwo(usize),

    /// The address width is outside `1..=64` or cannot hold the offset and index fields.
    #[error(
        "address width of {address_bits} bits cannot hold {offset_bits} offset bits and {index_bits} index bits"
    )]
    AddressWidth {
        /// Configured address width.
        address_bits: u32,
        /// Offset bits required by the block size.
        offset_bits: u32,
        /// Index bits required by the set count.
        index_bits: u32,
    },

    /// Pseudo-LRU needs an exact binary tree of 4, 8, or 16 leaves.
    #[error("pseudo-LRU requires 4, 8 or 16 ways, got {0}")]
    UnsupportedPlruWays(usize),

    /// A replacement policy name was not recognised.
    #[error("unknown replacement policy `{0}`")]
    UnknownPolicy(String),

    /// Reading a configuration file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON for [`crate::config::CacheConfig`].
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by an eviction policy driven directly with raw way indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The way index does not exist in a set of this associativity.
    #[error("way {way} is out of range for a {ways}-way set")]
    WayOutOfRange {
        /// Offending way index.
        way: usize,
        /// Associativity of the policy.
        ways: usize,
    },
}

/// Errors raised while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when parsing an access type mnemonic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessTypeError {
    /// The text is none of `R`, `W`, `READ`, `WRITE`.
    #[error("unknown access type `{0}`")]
    Unknown(String),
}
