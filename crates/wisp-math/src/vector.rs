//! Guarded vector helpers.
//!
//! Every normalization in the force model goes through these so that a
//! collapsed edge yields `None` instead of a NaN direction.

use glam::DVec3;
use wisp_types::constants::DEGENERATE_LENGTH;
use wisp_types::Scalar;

/// Returns `v / |v|`, or `None` when `v` is (numerically) zero or non-finite.
#[inline]
pub fn safe_unit(v: DVec3) -> Option<DVec3> {
    unit_and_length(v).map(|(dir, _)| dir)
}

/// Returns the unit direction and length of `v` together.
#[inline]
pub fn unit_and_length(v: DVec3) -> Option<(DVec3, Scalar)> {
    let len = v.length();
    if len.is_finite() && len > DEGENERATE_LENGTH {
        Some((v / len, len))
    } else {
        None
    }
}
