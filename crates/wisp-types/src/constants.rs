//! Physical constants and simulation defaults.

use crate::Scalar;

/// Gravitational acceleration (m/s²) used by the default scene.
pub const GRAVITY: Scalar = 9.8;

/// Default viewer frame rate.
pub const DEFAULT_FRAMES_PER_SEC: u32 = 90;

/// Default number of sub-steps per frame.
pub const DEFAULT_SUBSTEPS_PER_FRAME: u32 = 30;

/// Maximum allowed spring length as a multiple of its rest length.
/// Anything longer is projected back by the relaxation pass.
pub const INEXTENSIBILITY_TOLERANCE: Scalar = 1.1;

/// Edges shorter than this are treated as degenerate (no direction).
pub const DEGENERATE_LENGTH: Scalar = 1.0e-12;

/// Epsilon for floating-point comparisons.
pub const EPSILON: Scalar = 1.0e-9;
