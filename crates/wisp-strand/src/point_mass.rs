//! Point mass: one particle of a strand.

use wisp_math::{DVec3, LocalFrame};
use wisp_types::Scalar;

/// A simulated particle.
///
/// Velocity is never stored: the Verlet pair (`position`, `last_position`)
/// encodes it. Rest-derived data (`start_position`, rest smoothing,
/// `ref_vector`) is written only by the owning [`Strand`](crate::Strand).
#[derive(Debug, Clone)]
pub struct PointMass {
    /// Current position.
    pub position: DVec3,
    /// Position at the previous sub-step.
    pub last_position: DVec3,
    /// Force accumulator, reset at the start of every sub-step.
    pub forces: DVec3,

    /// Filter recursion state from the last position smoothing pass.
    pub smoothing_amt: DVec3,
    /// Smoothed current position (drawn as the smooth curve).
    pub smoothed_position: DVec3,
    /// Smoothed velocity from the last velocity smoothing pass.
    pub smoothed_velocity: DVec3,

    // ─── Diagnostics (read by the viewer, never by the force model) ───
    /// Local frame used by the last bend pass at this mass.
    pub frame: Option<LocalFrame>,
    /// World-space position the bend pass pulled the next mass toward.
    pub bend_target: Option<DVec3>,

    pinned: bool,
    start_position: DVec3,
    rest_smoothing_amt: DVec3,
    rest_smoothed_position: DVec3,
    ref_vector: Option<DVec3>,
}

impl PointMass {
    /// Creates a mass at rest at `position`.
    pub fn new(position: DVec3, pinned: bool) -> Self {
        Self {
            position,
            last_position: position,
            forces: DVec3::ZERO,
            smoothing_amt: DVec3::ZERO,
            smoothed_position: position,
            smoothed_velocity: DVec3::ZERO,
            frame: None,
            bend_target: None,
            pinned,
            start_position: position,
            rest_smoothing_amt: DVec3::ZERO,
            rest_smoothed_position: position,
            ref_vector: None,
        }
    }

    /// Implicit Verlet velocity `(position − last_position) / dt`.
    #[inline]
    pub fn velocity(&self, dt: Scalar) -> DVec3 {
        (self.position - self.last_position) / dt
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Rest-pose position. Never changes after construction.
    #[inline]
    pub fn start_position(&self) -> DVec3 {
        self.start_position
    }

    #[inline]
    pub fn rest_smoothing_amt(&self) -> DVec3 {
        self.rest_smoothing_amt
    }

    /// Rest pose run through the core smoothing filter.
    #[inline]
    pub fn rest_smoothed_position(&self) -> DVec3 {
        self.rest_smoothed_position
    }

    /// Rest edge to the next mass, expressed in this mass's rest frame.
    ///
    /// `None` for the root, the tip, and masses whose rest frame was
    /// degenerate.
    #[inline]
    pub fn ref_vector(&self) -> Option<DVec3> {
        self.ref_vector
    }

    pub(crate) fn set_rest_smoothing(&mut self, amount: DVec3, value: DVec3) {
        self.rest_smoothing_amt = amount;
        self.rest_smoothed_position = value;
    }

    pub(crate) fn set_ref_vector(&mut self, ref_vector: Option<DVec3>) {
        self.ref_vector = ref_vector;
    }
}
