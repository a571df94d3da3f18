//! Core springs: keep the smoothed curve at its rest length.
//!
//! For each stretch pair `(a, b)` the smoothed edge is compared against the
//! same edge of the rest-smoothed curve. The force acts along the smoothed
//! edge direction and is damped with the smoothed velocities.

use wisp_math::{unit_and_length, DVec3};
use wisp_strand::Strand;
use wisp_types::Scalar;

/// Signed force along `unit(smoothed_edge)`, applied `+` to `a` and `−` to `b`.
///
/// `f = kc(|s_b − s_a| − |r_b − r_a|) + cc·dot(sv_b − sv_a, ŝ)`.
/// Returns `None` when the smoothed edge is degenerate.
pub fn core_force(
    smoothed_edge: DVec3,
    rest_smoothed_edge: DVec3,
    smoothed_relative_velocity: DVec3,
    kc: Scalar,
    cc: Scalar,
) -> Option<DVec3> {
    let (direction, length) = unit_and_length(smoothed_edge)?;
    let rest_length = rest_smoothed_edge.length();
    let f = kc * (length - rest_length) + cc * smoothed_relative_velocity.dot(direction);
    Some(direction * f)
}

/// Expects `smoothed_position` and `smoothed_velocity` to hold the
/// core-smoothed curve. Returns the number of degenerate edges skipped.
pub fn core_pass(strand: &mut Strand, kc: Scalar, cc: Scalar) -> usize {
    let (stretch, _, masses) = strand.springs_and_masses_mut();
    let mut skipped = 0;
    for spring in stretch {
        let (a, b) = (spring.a.index(), spring.b.index());
        let smoothed_edge = masses[b].smoothed_position - masses[a].smoothed_position;
        let rest_edge = masses[b].rest_smoothed_position() - masses[a].rest_smoothed_position();
        let relative_velocity = masses[b].smoothed_velocity - masses[a].smoothed_velocity;
        match core_force(smoothed_edge, rest_edge, relative_velocity, kc, cc) {
            Some(f) => {
                masses[a].forces += f;
                masses[b].forces -= f;
            }
            None => skipped += 1,
        }
    }
    skipped
}
