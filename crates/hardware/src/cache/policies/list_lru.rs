//! Least Recently Used (LRU) Replacement Policy, list-based.
//!
//! Keeps the ways on a doubly linked recency list whose nodes live in a fixed
//! arena of indices: slots `0..ways` are the ways themselves, followed by two
//! sentinels (`head` on the most-recently-used end, `tail` on the least). Moving a
//! way to the front is an unlink plus a relink, both O(1), with no allocation
//! after construction.
//!
//! The list starts as `head, ways-1, .., 1, 0, tail`, which makes the victim
//! sequence identical to [`super::LruPolicy`] for every access trace.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `access()`: O(1)
//!   - `get_victim()`: O(1)
//! - **Space Complexity:** O(W)

use super::Policy;

/// Arena-backed recency list for one set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLruPolicy {
    ways: usize,
    /// Index of the previous node (towards `head`) for each slot.
    prev: Vec<usize>,
    /// Index of the next node (towards `tail`) for each slot.
    next: Vec<usize>,
}

impl ListLruPolicy {
    /// Creates a new list-based LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    pub fn new(ways: usize) -> Self {
        let mut policy = Self {
            ways,
            prev: vec![0; ways + 2],
            next: vec![0; ways + 2],
        };
        policy.relink_initial();
        policy
    }

    #[inline(always)]
    const fn head(&self) -> usize {
        self.ways
    }

    #[inline(always)]
    const fn tail(&self) -> usize {
        self.ways + 1
    }

    /// Rebuilds `head, ways-1, .., 0, tail`.
    fn relink_initial(&mut self) {
        let (head, tail) = (self.head(), self.tail());
        self.next[head] = tail;
        self.prev[tail] = head;
        for way in 0..self.ways {
            self.push_front(way);
        }
    }

    fn unlink(&mut self, node: usize) {
        let (prev, next) = (self.prev[node], self.next[node]);
        self.next[prev] = next;
        self.prev[next] = prev;
    }

    fn push_front(&mut self, node: usize) {
        let head = self.head();
        let first = self.next[head];
        self.prev[node] = head;
        self.next[node] = first;
        self.prev[first] = node;
        self.next[head] = node;
    }
}

impl Policy for ListLruPolicy {
    fn ways(&self) -> usize {
        self.ways
    }

    /// Moves `way` to the most-recently-used end.
    fn access(&mut self, way: usize) {
        if self.next[self.head()] == way {
            return;
        }
        self.unlink(way);
        self.push_front(way);
    }

    /// Returns the node just before the tail sentinel without unlinking it.
    fn get_victim(&mut self) -> usize {
        self.prev[self.tail()]
    }

    fn reset(&mut self) {
        self.relink_initial();
    }

    fn recency_order(&self) -> Option<Vec<usize>> {
        let mut order = Vec::with_capacity(self.ways);
        let mut node = self.prev[self.tail()];
        while node != self.head() {
            order.push(node);
            node = self.prev[node];
        }
        Some(order)
    }
}
