//! Simulation event types.
//!
//! Lightweight value types tagged with the frame that produced them.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulated time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the frame (seconds).
        wall_time: f64,
        /// Sub-steps executed.
        substeps: u32,
    },

    /// One sub-step completed.
    Substep {
        /// Sub-step index within the frame.
        index: u32,
        /// Relaxation corrections applied.
        relaxations: usize,
        /// Degenerate springs or frames skipped.
        degenerate: usize,
    },

    /// Energy at the end of a frame.
    Energy {
        /// Kinetic energy of the free masses.
        kinetic: f64,
    },

    /// Inextensibility summary for a frame.
    Relaxation {
        /// Corrections applied across the frame.
        corrections: usize,
        /// Largest current/rest spring length ratio.
        max_stretch_ratio: f64,
    },

    /// Custom event for extensibility.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Short stable name of the payload variant.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::Substep { .. } => "substep",
            EventKind::Energy { .. } => "energy",
            EventKind::Relaxation { .. } => "relaxation",
            EventKind::Custom { .. } => "custom",
        }
    }
}
