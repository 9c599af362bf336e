//! Cache Replacement Policies.
//!
//! Implements the algorithms that pick a victim way when a set is full.
//! Every instance tracks exactly one set.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, per-way timestamps.
//! - `ListLru`: Least Recently Used, index-linked recency list.
//! - `Fifo`: First-In, First-Out.
//! - `Random`: Seeded uniform selection.
//! - `Plru`: Pseudo-LRU (Tree-based).

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy (list-based).
pub mod list_lru;

/// Least Recently Used replacement policy (counter-based).
pub mod lru;

/// Pseudo-LRU (tree-based) replacement policy.
pub mod plru;

/// Random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use list_lru::ListLruPolicy;
pub use lru::LruPolicy;
pub use plru::PlruPolicy;
pub use random::RandomPolicy;

use crate::common::error::{ConfigError, PolicyError};
use crate::config::ReplacementPolicy;

/// Operations shared by every replacement algorithm.
///
/// Way indices passed to `access` and `invalidate` are already range-checked by
/// [`EvictionPolicy`]; implementations may index with them directly.
pub trait Policy {
    /// Associativity this instance was built for.
    fn ways(&self) -> usize;

    /// Records that `way` is in use (a hit or a fresh install).
    fn access(&mut self, way: usize);

    /// Selects the way to evict from a full set.
    fn get_victim(&mut self) -> usize;

    /// Restores the construction state.
    fn reset(&mut self);

    /// Notifies the policy that the line in `way` has been evicted.
    fn invalidate(&mut self, _way: usize) {}

    /// Victim priority order (first = next victim), if the algorithm has one.
    fn recency_order(&self) -> Option<Vec<usize>> {
        None
    }
}

/// Replacement state for one cache set.
///
/// The set of algorithms is closed, so dispatch is a `match` rather than a
/// trait object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Counter-based LRU.
    Lru(LruPolicy),
    /// List-based LRU.
    ListLru(ListLruPolicy),
    /// First-In, First-Out.
    Fifo(FifoPolicy),
    /// Random replacement.
    Random(RandomPolicy),
    /// Tree-based pseudo-LRU.
    Plru(PlruPolicy),
}

macro_rules! dispatch {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            EvictionPolicy::Lru($p) => $body,
            EvictionPolicy::ListLru($p) => $body,
            EvictionPolicy::Fifo($p) => $body,
            EvictionPolicy::Random($p) => $body,
            EvictionPolicy::Plru($p) => $body,
        }
    };
}

impl EvictionPolicy {
    /// Creates replacement state for one set.
    ///
    /// # Arguments
    ///
    /// * `kind` - Algorithm to instantiate.
    /// * `ways` - Associativity of the set.
    /// * `seed` - Seed for [`ReplacementPolicy::Random`]; ignored otherwise.
    /// * `stream` - Independent generator stream for [`ReplacementPolicy::Random`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroAssociativity`] for zero ways and
    /// [`ConfigError::UnsupportedPlruWays`] for pseudo-LRU with anything but 4, 8, or 16 ways.
    pub fn new(
        kind: ReplacementPolicy,
        ways: usize,
        seed: u64,
        stream: u64,
    ) -> Result<Self, ConfigError> {
        if ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        Ok(match kind {
            ReplacementPolicy::Lru => Self::Lru(LruPolicy::new(ways)),
            ReplacementPolicy::ListLru => Self::ListLru(ListLruPolicy::new(ways)),
            ReplacementPolicy::Fifo => Self::Fifo(FifoPolicy::new(ways)),
            ReplacementPolicy::Random => Self::Random(RandomPolicy::new(ways, seed, stream)),
            ReplacementPolicy::Plru => {
                if !matches!(ways, 4 | 8 | 16) {
                    return Err(ConfigError::UnsupportedPlruWays(ways));
                }
                Self::Plru(PlruPolicy::new(ways))
            }
        })
    }

    /// Algorithm of this instance.
    pub const fn kind(&self) -> ReplacementPolicy {
        match self {
            Self::Lru(_) => ReplacementPolicy::Lru,
            Self::ListLru(_) => ReplacementPolicy::ListLru,
            Self::Fifo(_) => ReplacementPolicy::Fifo,
            Self::Random(_) => ReplacementPolicy::Random,
            Self::Plru(_) => ReplacementPolicy::Plru,
        }
    }

    /// Associativity this instance was built for.
    pub fn ways(&self) -> usize {
        dispatch!(self, p => p.ways())
    }

    fn check_way(&self, way: usize) -> Result<(), PolicyError> {
        let ways = self.ways();
        if way < ways {
            Ok(())
        } else {
            Err(PolicyError::WayOutOfRange { way, ways })
        }
    }

    /// Records that `way` became in use.
    ///
    /// Must be called exactly once per hit and once per install.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::WayOutOfRange`] without touching any state if `way`
    /// is not below the associativity.
    pub fn access(&mut self, way: usize) -> Result<(), PolicyError> {
        self.check_way(way)?;
        dispatch!(self, p => p.access(way));
        Ok(())
    }

    /// Selects the way to evict. Only meaningful when every way is valid.
    ///
    /// Deterministic for everything but [`ReplacementPolicy::Random`]: calling it
    /// repeatedly without an intervening `access` returns the same way.
    pub fn get_victim(&mut self) -> usize {
        dispatch!(self, p => p.get_victim())
    }

    /// Notifies the policy that the line in `way` was evicted.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::WayOutOfRange`] if `way` is not below the associativity.
    pub fn invalidate(&mut self, way: usize) -> Result<(), PolicyError> {
        self.check_way(way)?;
        dispatch!(self, p => p.invalidate(way));
        Ok(())
    }

    /// Restores the state this instance had right after construction.
    pub fn reset(&mut self) {
        dispatch!(self, p => p.reset());
    }

    /// Victim priority order, first element evicted next.
    ///
    /// `None` for Random and pseudo-LRU, which keep no total order.
    pub fn recency_order(&self) -> Option<Vec<usize>> {
        dispatch!(self, p => p.recency_order())
    }
}
