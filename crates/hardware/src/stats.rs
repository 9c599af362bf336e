//! Cache statistics collection and reporting.
//!
//! This module tracks performance metrics for a simulated cache. It provides:
//! 1. **Traffic:** Read and write counts.
//! 2. **Outcomes:** Hits, misses, and the derived hit and miss rates.
//! 3. **Evictions:** Total evictions and dirty evictions (write-backs).
//! 4. **Latency:** Accumulated cycles and the average per access.

use std::fmt::Write as _;

use serde::Serialize;

use crate::cache::AccessResult;
use crate::common::data::AccessType;

/// Cache statistics, updated on every access.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to install their block.
    pub misses: u64,
    /// Read accesses.
    pub reads: u64,
    /// Write accesses.
    pub writes: u64,
    /// Misses that displaced a valid line.
    pub evictions: u64,
    /// Evictions whose victim was dirty (write-backs).
    pub dirty_evictions: u64,
    /// Cycles charged across all accesses.
    pub total_latency: u64,
}

impl CacheStats {
    /// Accounts one access.
    pub fn record(&mut self, kind: AccessType, result: &AccessResult) {
        match kind {
            AccessType::Read => self.reads += 1,
            AccessType::Write => self.writes += 1,
        }
        if result.hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        if result.evicted {
            self.evictions += 1;
        }
        if result.evicted_dirty {
            self.dirty_evictions += 1;
        }
        self.total_latency += result.latency;
    }

    /// Total accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// `hits / accesses`, or 0.0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }

    /// `misses / accesses`, or 0.0 before the first access.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total > 0 {
            self.misses as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Average cycles per access, or 0.0 before the first access.
    pub fn average_latency(&self) -> f64 {
        let total = self.accesses();
        if total > 0 {
            self.total_latency as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Renders the selected report sections as text.
    ///
    /// # Arguments
    ///
    /// * `sections` - Any of `"summary"`, `"traffic"`, `"evictions"`, `"latency"`.
    ///   An empty slice selects every section.
    pub fn render_sections(&self, sections: &[&str]) -> String {
        let want = |name: &str| sections.is_empty() || sections.contains(&name);
        let mut out = String::new();

        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "CACHE STATISTICS");
        let _ = writeln!(out, "----------------------------------------------------------");
        if want("summary") {
            let _ = writeln!(out, "SUMMARY");
            let _ = writeln!(out, "  accesses               {}", self.accesses());
            let _ = writeln!(
                out,
                "  hits                   {} ({:.2}%)",
                self.hits,
                self.hit_rate() * 100.0
            );
            let _ = writeln!(
                out,
                "  misses                 {} ({:.2}%)",
                self.misses,
                self.miss_rate() * 100.0
            );
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("traffic") {
            let _ = writeln!(out, "TRAFFIC");
            let _ = writeln!(out, "  reads                  {}", self.reads);
            let _ = writeln!(out, "  writes                 {}", self.writes);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("evictions") {
            let _ = writeln!(out, "EVICTIONS");
            let _ = writeln!(out, "  evictions              {}", self.evictions);
            let _ = writeln!(out, "  dirty_evictions        {}", self.dirty_evictions);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("latency") {
            let _ = writeln!(out, "LATENCY");
            let _ = writeln!(out, "  total_cycles           {}", self.total_latency);
            let _ = writeln!(
                out,
                "  avg_cycles             {:.2}",
                self.average_latency()
            );
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints the selected report sections to stdout.
    pub fn print_sections(&self, sections: &[&str]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
