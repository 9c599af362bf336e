//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line that was installed earliest, regardless of how
//! recently it was accessed. Each way records an insertion time the first time
//! it is accessed after a reset or an eviction; hits on a resident way leave
//! that time alone. The value 0 means "never inserted", so untouched ways are
//! always preferred, lowest index first.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(W)
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::Policy;

/// Insertion time recorded for a way that has not been filled.
const NEVER_INSERTED: u64 = 0;

/// FIFO Policy state for one set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FifoPolicy {
    /// Insertion time of each way, or [`NEVER_INSERTED`].
    inserted_at: Vec<u64>,
    /// Next insertion time to hand out; starts at 1.
    next_time: u64,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    pub fn new(ways: usize) -> Self {
        Self {
            inserted_at: vec![NEVER_INSERTED; ways],
            next_time: 1,
        }
    }
}

impl Policy for FifoPolicy {
    fn ways(&self) -> usize {
        self.inserted_at.len()
    }

    /// Records the insertion time of `way` unless it already has one.
    fn access(&mut self, way: usize) {
        if self.inserted_at[way] != NEVER_INSERTED {
            return;
        }
        self.inserted_at[way] = self.next_time;
        self.next_time += 1;
    }

    /// Returns the way with the smallest recorded insertion time.
    fn get_victim(&mut self) -> usize {
        let mut victim = 0;
        for (way, &time) in self.inserted_at.iter().enumerate().skip(1) {
            if time < self.inserted_at[victim] {
                victim = way;
            }
        }
        victim
    }

    fn reset(&mut self) {
        self.inserted_at.fill(NEVER_INSERTED);
        self.next_time = 1;
    }

    /// Forgets the insertion time so the next install restarts the clock for this way.
    fn invalidate(&mut self, way: usize) {
        self.inserted_at[way] = NEVER_INSERTED;
    }

    fn recency_order(&self) -> Option<Vec<usize>> {
        let mut order: Vec<usize> = (0..self.inserted_at.len()).collect();
        order.sort_by_key(|&way| (self.inserted_at[way], way));
        Some(order)
    }
}
