//! Pseudo-LRU (PLRU) Replacement Policy.
//!
//! PLRU approximates the Least Recently Used algorithm using a binary tree of bits.
//! It requires significantly less storage than full LRU (N-1 bits for N ways).
//!
//! Nodes are stored heap-style: node 0 is the root and node `n` has children
//! `2n + 1` (left) and `2n + 2` (right). Leaves are the ways, left to right.
//! For four ways:
//!
//! ```text
//!        n0
//!       /  \
//!     n1    n2
//!    / \    / \
//!   W0 W1  W2 W3
//! ```
//!
//! A set bit means "the victim is on the right". An access flips every node on
//! the path to the accessed way so it points away from that way; victim
//! selection follows the bits from the root down to a leaf.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(log W)
//!   - `get_victim()`: O(log W)
//! - **Space Complexity:** W - 1 bits
//! - **Hardware Cost:** Low - simple bit operations
//! - **Best Case:** Similar to LRU for most access patterns
//! - **Worst Case:** Pathological cases can cause premature eviction of useful lines

use super::Policy;

/// PLRU Policy state for one set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlruPolicy {
    ways: usize,
    /// Tree depth, `log2(ways)`.
    depth: u32,
    /// Node bits, bit `n` for node `n`.
    tree: u32,
}

impl PlruPolicy {
    /// Creates a new PLRU policy instance.
    ///
    /// `ways` must be 4, 8, or 16; [`crate::config::CacheConfig::geometry`] and
    /// [`super::EvictionPolicy::new`] enforce this before construction.
    pub fn new(ways: usize) -> Self {
        Self {
            ways,
            depth: ways.trailing_zeros(),
            tree: 0,
        }
    }

    /// Raw tree bits (bit `n` is node `n`).
    pub const fn bits(&self) -> u32 {
        self.tree
    }
}

impl Policy for PlruPolicy {
    fn ways(&self) -> usize {
        self.ways
    }

    /// Points every node on the path to `way` away from it.
    fn access(&mut self, way: usize) {
        let mut node = 0;
        for level in (0..self.depth).rev() {
            let go_right = (way >> level) & 1 == 1;
            if go_right {
                self.tree &= !(1 << node);
            } else {
                self.tree |= 1 << node;
            }
            node = 2 * node + if go_right { 2 } else { 1 };
        }
    }

    /// Follows the bits from the root to a leaf.
    fn get_victim(&mut self) -> usize {
        let mut node = 0;
        let mut victim = 0;
        for _ in 0..self.depth {
            let go_right = (self.tree >> node) & 1 == 1;
            victim = (victim << 1) | usize::from(go_right);
            node = 2 * node + if go_right { 2 } else { 1 };
        }
        victim
    }

    fn reset(&mut self) {
        self.tree = 0;
    }
}
