//! Local orthonormal frames along a strand.
//!
//! A frame is anchored on the tangent of the smoothed curve at a mass.
//! The rest edge leaving that mass is stored in frame coordinates at
//! build time; during simulation it is rotated back into world space
//! with the current frame to obtain the bend target.
//!
//! ```text
//!   normal
//!     ▲
//!     │   tangent = unit(s[i] − s[i−1])
//!     │  ╱
//!     │ ╱
//!     ●───────▶ binormal = unit(tangent × world_axis)
//! ```

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::vector::safe_unit;

/// Fixed world axis used to derive the binormal.
pub const WORLD_AXIS: DVec3 = DVec3::Z;

/// Axis used when the tangent is parallel to [`WORLD_AXIS`].
pub const FALLBACK_AXIS: DVec3 = DVec3::X;

/// Orthonormal basis `(tangent, binormal, normal)`, right-handed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    pub tangent: DVec3,
    pub binormal: DVec3,
    pub normal: DVec3,
}

impl LocalFrame {
    /// Builds a frame whose first axis points along `direction`.
    ///
    /// Returns `None` for a zero-length direction.
    pub fn from_tangent(direction: DVec3) -> Option<Self> {
        let tangent = safe_unit(direction)?;
        let binormal = safe_unit(tangent.cross(WORLD_AXIS))
            .or_else(|| safe_unit(tangent.cross(FALLBACK_AXIS)))?;
        let normal = tangent.cross(binormal);
        Some(Self {
            tangent,
            binormal,
            normal,
        })
    }

    /// Frame on the segment running from `from` to `to`.
    #[inline]
    pub fn between(from: DVec3, to: DVec3) -> Option<Self> {
        Self::from_tangent(to - from)
    }

    /// Frame axes as matrix columns (local → world rotation).
    #[inline]
    pub fn matrix(&self) -> DMat3 {
        DMat3::from_cols(self.tangent, self.binormal, self.normal)
    }

    /// Expresses a world-space vector in frame coordinates.
    #[inline]
    pub fn to_local(&self, v: DVec3) -> DVec3 {
        self.matrix().transpose() * v
    }

    /// Rotates frame coordinates back into world space.
    #[inline]
    pub fn to_world(&self, v: DVec3) -> DVec3 {
        self.matrix() * v
    }
}
