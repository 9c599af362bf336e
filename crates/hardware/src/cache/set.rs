//! Cache sets and lines.
//!
//! A set owns `ways` lines and the replacement state that orders them. It is the
//! only place where line metadata and policy state are updated together, which
//! keeps the two consistent.

use super::policies::EvictionPolicy;

/// Cache line entry containing tag, validity, and dirty bits.
///
/// No data is stored; the simulator models metadata only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// The line holds a block.
    pub valid: bool,
    /// The block was written since it was installed.
    pub dirty: bool,
    /// Tag of the resident block. Meaningless when `valid` is false.
    pub tag: u64,
}

/// A line that was pushed out of a set to make room for a new block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eviction {
    /// Tag of the evicted block.
    pub tag: u64,
    /// The evicted block needed a write-back.
    pub dirty: bool,
}

/// One associative slot group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
    policy: EvictionPolicy,
}

impl CacheSet {
    /// Creates a set of invalid lines governed by `policy`.
    ///
    /// The associativity is taken from the policy.
    pub fn new(policy: EvictionPolicy) -> Self {
        Self {
            lines: vec![CacheLine::default(); policy.ways()],
            policy,
        }
    }

    /// Number of ways.
    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// The lines, indexed by way.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// The replacement state.
    pub const fn policy(&self) -> &EvictionPolicy {
        &self.policy
    }

    /// Returns `true` if no way holds a block.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| !line.valid)
    }

    /// Finds the way holding `tag`, if any.
    pub fn find_line(&self, tag: u64) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Picks the way a new block goes into.
    ///
    /// The lowest invalid way always wins; the policy is consulted only when
    /// every way is valid.
    pub fn find_victim(&mut self) -> usize {
        match self.lines.iter().position(|line| !line.valid) {
            Some(way) => way,
            None => self.policy.get_victim(),
        }
    }

    /// Marks `way` as just used.
    ///
    /// Called on every hit and every install.
    pub fn update_lru(&mut self, way: usize) {
        if let Err(err) = self.policy.access(way) {
            tracing::warn!(%err, "ignoring replacement update");
        }
    }

    /// Sets the dirty bit of a resident line.
    pub fn mark_dirty(&mut self, way: usize) {
        if let Some(line) = self.lines.get_mut(way) {
            line.dirty = true;
        }
    }

    /// Installs `tag` in `way`, returning whatever valid line it replaced.
    ///
    /// The policy is told about the eviction first and then about the new use.
    pub fn install(&mut self, way: usize, tag: u64, dirty: bool) -> Option<Eviction> {
        let line = self.lines.get_mut(way)?;
        let evicted = line.valid.then_some(Eviction {
            tag: line.tag,
            dirty: line.dirty,
        });
        *line = CacheLine {
            valid: true,
            dirty,
            tag,
        };
        if evicted.is_some() {
            if let Err(err) = self.policy.invalidate(way) {
                tracing::warn!(%err, "ignoring replacement invalidation");
            }
        }
        self.update_lru(way);
        evicted
    }

    /// Invalidates every line and restores the policy's initial state.
    pub fn reset(&mut self) {
        self.lines.fill(CacheLine::default());
        self.policy.reset();
    }
}
