//! Sub-step timing.

use wisp_types::{Scalar, WispError, WispResult};

/// Fixed sub-step size: `dt = 1 / (frames_per_sec · substeps_per_frame)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTiming {
    pub frames_per_sec: Scalar,
    pub substeps_per_frame: u32,
    pub dt: Scalar,
}

impl StepTiming {
    /// # Errors
    /// [`WispError::InvalidConfig`] for a non-positive frame rate or zero
    /// sub-steps.
    pub fn new(frames_per_sec: Scalar, substeps_per_frame: u32) -> WispResult<Self> {
        if !frames_per_sec.is_finite() || frames_per_sec <= 0.0 {
            return Err(WispError::InvalidConfig(format!(
                "frames per second must be positive, got {frames_per_sec}"
            )));
        }
        if substeps_per_frame == 0 {
            return Err(WispError::InvalidConfig(
                "sub-steps per frame must be >= 1".into(),
            ));
        }
        Ok(Self {
            frames_per_sec,
            substeps_per_frame,
            dt: 1.0 / (frames_per_sec * substeps_per_frame as Scalar),
        })
    }

    /// `dt²`, the Verlet acceleration factor.
    #[inline]
    pub fn dt_squared(&self) -> Scalar {
        self.dt * self.dt
    }

    /// Simulated time covered by one frame.
    #[inline]
    pub fn frame_time(&self) -> Scalar {
        1.0 / self.frames_per_sec
    }
}
