//! Address decoding.
//!
//! Splits a 64-bit address into the three disjoint fields a set-associative cache
//! indexes by, and rebuilds a block address from its tag and set index:
//!
//! ```text
//! ┌──────────────────┬─────────────┬──────────────────┐
//! │       TAG        │    INDEX    │      OFFSET      │
//! │   (remaining)    │ (set bits)  │  (block bits)    │
//! └──────────────────┴─────────────┴──────────────────┘
//! ```
//!
//! The tag field absorbs every bit above the index, so addresses wider than the
//! configured address width still decode; only `reconstruct` truncates them.

/// The fields of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// High-order bits identifying the block within its set.
    pub tag: u64,
    /// Set the address maps to.
    pub index: u64,
    /// Byte within the block.
    pub offset: u64,
}

/// Stateless tag/index/offset decoder for a fixed cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    index_bits: u32,
}

/// Low `bits` bits set. Saturates at 64 bits.
#[inline(always)]
const fn mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl AddressDecoder {
    /// Creates a decoder for the given field widths.
    ///
    /// # Arguments
    ///
    /// * `offset_bits` - `log2(block_size)`.
    /// * `index_bits` - `log2(num_sets)`.
    pub const fn new(offset_bits: u32, index_bits: u32) -> Self {
        Self {
            offset_bits,
            index_bits,
        }
    }

    /// Number of offset bits.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of index bits.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Extracts the byte offset within the block.
    #[inline(always)]
    pub const fn offset(&self, addr: u64) -> u64 {
        addr & mask(self.offset_bits)
    }

    /// Extracts the set index.
    #[inline(always)]
    pub const fn index(&self, addr: u64) -> u64 {
        match addr.checked_shr(self.offset_bits) {
            Some(block) => block & mask(self.index_bits),
            None => 0,
        }
    }

    /// Extracts the tag (every bit above the index field).
    #[inline(always)]
    pub const fn tag(&self, addr: u64) -> u64 {
        match addr.checked_shr(self.offset_bits + self.index_bits) {
            Some(tag) => tag,
            None => 0,
        }
    }

    /// Decodes all three fields at once.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddress {
        DecodedAddress {
            tag: self.tag(addr),
            index: self.index(addr),
            offset: self.offset(addr),
        }
    }

    /// Rebuilds the block address for `tag` in set `index`, with the offset zeroed.
    ///
    /// Used for diagnostics and eviction logging only.
    pub const fn reconstruct(&self, tag: u64, index: u64) -> u64 {
        let high = match tag.checked_shl(self.offset_bits + self.index_bits) {
            Some(high) => high,
            None => 0,
        };
        let mid = match (index & mask(self.index_bits)).checked_shl(self.offset_bits) {
            Some(mid) => mid,
            None => 0,
        };
        high | mid
    }
}
