//! Trace input and simulation drivers.
//!
//! Provides readers for address and way traces, and helpers that replay a
//! trace through one cache, sweep it across configurations, or drive the
//! replacement policies in isolation.

/// Address and way trace readers.
pub mod trace;

/// Trace replay, configuration sweeps, and policy comparison.
pub mod simulator;

pub use simulator::{PolicyReport, SweepResult, compare_policies, replay, sweep};
pub use trace::{TraceEntry, TraceReader, read_trace, read_way_trace};
