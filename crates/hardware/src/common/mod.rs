//! Common types shared by every part of the cache simulator.
//!
//! This module provides the building blocks the cache engine is assembled from:
//! 1. **Address Decoding:** Splitting addresses into tag, index, and offset fields.
//! 2. **Memory Access:** Classifying trace accesses as reads or writes.
//! 3. **Error Handling:** Configuration, policy, and trace error types.

/// Address decoding (tag/index/offset extraction and reconstruction).
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Error types for configuration, eviction policies, and trace input.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddress};
pub use data::AccessType;
pub use error::{AccessTypeError, ConfigError, PolicyError, TraceError};
