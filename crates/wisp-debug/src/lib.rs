//! # wisp-debug
//!
//! Inspection hooks and state snapshots for debugging simulation issues.
//! Hooks observe a frame sub-step by sub-step; snapshots serialize every
//! strand's Verlet state to binary for replay and diffing.

pub mod hooks;
pub mod snapshot;

pub use hooks::{drive_frame, InspectionHook, InvariantHook, TelemetryHook};
pub use snapshot::{StateSnapshot, StrandSnapshot};
