//! Frame-based bend springs.
//!
//! Each interior mass `i` has a reference vector: its rest edge
//! `x[i+1] − x[i]` expressed in the rest frame built from the bend-smoothed
//! rest curve. Every sub-step the frame is rebuilt from the current
//! bend-smoothed curve and the reference vector mapped back to world space.
//! The difference between the actual edge and that target drives a spring
//! between `i` and `i+1`.
//!
//! ```text
//!   s[i-1] ──► s[i]        tangent  = unit(s[i] − s[i-1])
//!                │         binormal = tangent × Z  (X when parallel)
//!                ▼         normal   = tangent × binormal
//!            x[i+1]        target   = frame · ref_vector
//! ```

use wisp_math::{safe_unit, DVec3, LocalFrame};
use wisp_strand::Strand;
use wisp_types::Scalar;

/// Current frame and world-space target edge for one mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendTarget {
    pub frame: LocalFrame,
    /// Desired `x[i+1] − x[i]`.
    pub edge: DVec3,
}

/// Target edge from the two smoothed positions the frame is built on.
///
/// Returns `None` when the smoothed positions coincide.
pub fn bend_target(
    prev_smoothed: DVec3,
    smoothed: DVec3,
    ref_vector: DVec3,
) -> Option<BendTarget> {
    let frame = LocalFrame::between(prev_smoothed, smoothed)?;
    Some(BendTarget {
        frame,
        edge: frame.to_world(ref_vector),
    })
}

/// Force on mass `i` (mass `i+1` receives the negation).
///
/// `f = kb(e − target) + cb(v − (v·ê)ê)` where `v` is the relative velocity
/// of `i+1` with respect to `i`. Only the component perpendicular to the
/// edge is damped; the stretch springs already damp along it. Returns
/// `None` for a degenerate edge.
pub fn bend_force(
    edge: DVec3,
    target: DVec3,
    relative_velocity: DVec3,
    kb: Scalar,
    cb: Scalar,
) -> Option<DVec3> {
    let direction = safe_unit(edge)?;
    let perpendicular = relative_velocity - relative_velocity.dot(direction) * direction;
    Some(kb * (edge - target) + cb * perpendicular)
}

/// Applies bend forces to every interior mass that has a reference vector.
///
/// Expects `smoothed_position` to hold the bend-smoothed curve. Stores
/// each mass's frame and world-space target point for inspection. Returns
/// the number of masses skipped for degenerate geometry.
pub fn bend_pass(strand: &mut Strand, kb: Scalar, cb: Scalar, dt: Scalar) -> usize {
    let masses = strand.point_masses_mut();
    let n = masses.len();
    let mut skipped = 0;

    for i in 1..n.saturating_sub(1) {
        let Some(ref_vector) = masses[i].ref_vector() else {
            continue;
        };
        let Some(target) = bend_target(
            masses[i - 1].smoothed_position,
            masses[i].smoothed_position,
            ref_vector,
        ) else {
            masses[i].frame = None;
            masses[i].bend_target = None;
            skipped += 1;
            continue;
        };

        masses[i].frame = Some(target.frame);
        masses[i].bend_target = Some(masses[i].position + target.edge);

        let edge = masses[i + 1].position - masses[i].position;
        let relative_velocity = masses[i + 1].velocity(dt) - masses[i].velocity(dt);
        match bend_force(edge, target.edge, relative_velocity, kb, cb) {
            Some(f) => {
                masses[i].forces += f;
                masses[i + 1].forces -= f;
            }
            None => skipped += 1,
        }
    }
    skipped
}
