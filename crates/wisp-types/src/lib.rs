//! # wisp-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Wisp strand simulation engine.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other Wisp crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{WispError, WispResult};
pub use ids::{PointMassId, StrandId};
pub use scalar::Scalar;
