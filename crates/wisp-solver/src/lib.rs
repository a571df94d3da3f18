//! # wisp-solver
//!
//! Force model, time integration, and the per-frame driver.
//!
//! ## Key Types
//!
//! - [`StrandGroup`]: Owns the strands and drives every sub-step
//! - [`SimulationConfig`]: Shared physical constants and force toggles
//! - [`StepTiming`]: Sub-step size derived from frame rate and sub-steps
//! - [`pipeline::step_strand`]: One sub-step of one strand, config passed in
//!
//! ## Sub-step order (per strand)
//!
//! ```text
//! external forces → rest-curve sync → shape smoothing
//!   → stretch → support → bend → core → Verlet → relaxation
//! ```

pub mod bending;
pub mod config;
pub mod core_springs;
pub mod forces;
pub mod group;
pub mod integrate;
pub mod pipeline;
pub mod timing;

pub use config::{ForceCategory, ForceToggles, FrameSettings, SimulationConfig};
pub use group::{FrameReport, StrandGroup};
pub use pipeline::SubstepReport;
pub use timing::StepTiming;
