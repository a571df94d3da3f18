//! # wisp-bench
//!
//! Benchmark suite for the Wisp strand simulator.
//!
//! Provides four procedural scenarios, metric collection, and CSV/JSON
//! export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
