//! Scalar type alias for the simulation.
//!
//! Strands run on the CPU only, so double precision is used throughout.
//! Stiff stretch springs (`ks` in the thousands) at sub-millisecond
//! sub-steps lose too much in `f32` Verlet updates.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;
