//! Least Recently Used (LRU) Replacement Policy, counter-based.
//!
//! Each way carries the logical timestamp of its last use, drawn from a
//! monotonically increasing clock. The victim is the way with the smallest
//! timestamp. Ties cannot occur after the first access to every way, but the
//! scan is ascending with a strict `<` so the lowest way wins regardless.
//!
//! Timestamps are pre-seeded with `0..ways` and the clock starts at `ways`, so an
//! untouched set already ranks way 0 as the first victim, then way 1, and so on.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(W)
//! - **Hardware Cost:** High - one wide comparator tree per set

use super::Policy;

/// Counter-based LRU state for one set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LruPolicy {
    /// Logical time of the last access to each way.
    last_access: Vec<u64>,
    /// Next timestamp to hand out.
    clock: u64,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    pub fn new(ways: usize) -> Self {
        Self {
            last_access: (0..ways as u64).collect(),
            clock: ways as u64,
        }
    }
}

impl Policy for LruPolicy {
    fn ways(&self) -> usize {
        self.last_access.len()
    }

    /// Stamps `way` with the current clock value.
    fn access(&mut self, way: usize) {
        self.last_access[way] = self.clock;
        self.clock += 1;
    }

    /// Returns the way with the oldest timestamp.
    fn get_victim(&mut self) -> usize {
        let mut victim = 0;
        for (way, &time) in self.last_access.iter().enumerate().skip(1) {
            if time < self.last_access[victim] {
                victim = way;
            }
        }
        victim
    }

    fn reset(&mut self) {
        for (way, time) in self.last_access.iter_mut().enumerate() {
            *time = way as u64;
        }
        self.clock = self.last_access.len() as u64;
    }

    fn recency_order(&self) -> Option<Vec<usize>> {
        let mut order: Vec<usize> = (0..self.last_access.len()).collect();
        order.sort_by_key(|&way| (self.last_access[way], way));
        Some(order)
    }
}
