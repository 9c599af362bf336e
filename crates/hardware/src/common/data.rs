//! Memory Access Types.
//!
//! This module defines the classification of memory accesses replayed through the cache.
//! These types are used for the following:
//! 1. **Dirty Tracking:** Writes mark resident lines dirty; reads leave them clean.
//! 2. **Trace Parsing:** Mapping trace mnemonics (`R`, `W`) onto access kinds.
//! 3. **Statistics Tracking:** Splitting traffic into read and write counts.

use std::fmt;
use std::str::FromStr;

use super::error::AccessTypeError;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read access.
    ///
    /// Installs a clean line on a miss and leaves the dirty bit untouched on a hit.
    Read,

    /// Data write access.
    ///
    /// Write-allocate: a miss installs the line already dirty, a hit marks it dirty.
    Write,
}

impl AccessType {
    /// Returns `true` for [`AccessType::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Single-letter trace mnemonic (`R` or `W`).
    pub const fn mnemonic(self) -> char {
        match self {
            Self::Read => 'R',
            Self::Write => 'W',
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "READ"),
            Self::Write => write!(f, "WRITE"),
        }
    }
}

impl FromStr for AccessType {
    type Err = AccessTypeError;

    /// Parses `R`/`W` (or `READ`/`WRITE`), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "R" | "READ" => Ok(Self::Read),
            "W" | "WRITE" => Ok(Self::Write),
            _ => Err(AccessTypeError::Unknown(s.to_string())),
        }
    }
}
