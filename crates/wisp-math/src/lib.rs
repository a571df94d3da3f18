//! # wisp-math
//!
//! Math primitives for the Wisp strand simulation engine.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DVec3`, `DMat3`)
//! - Guarded normalization for edges that may collapse to zero length
//! - [`LocalFrame`]: orthonormal frame built from a curve tangent
//! - The recursive exponential smoothing filter run along strand chains

pub mod filter;
pub mod frame;
pub mod vector;

pub use filter::{smoothing_coefficient, FilterSample};
pub use frame::LocalFrame;
pub use vector::{safe_unit, unit_and_length};

// Re-export glam types as the canonical math types for Wisp.
pub use glam::{DMat3, DVec3};
