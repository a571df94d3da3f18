//! # wisp-telemetry
//!
//! Event bus for simulation telemetry. Emits structured per-frame events
//! (timing, sub-steps, energy, relaxation) that pluggable sinks consume.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
