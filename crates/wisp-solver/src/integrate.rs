//! Verlet integration and the inextensibility relaxation pass.

use wisp_math::{unit_and_length, DVec3};
use wisp_strand::{PointMass, Spring, Strand};
use wisp_types::constants::INEXTENSIBILITY_TOLERANCE;
use wisp_types::Scalar;

/// Position-Verlet update of every non-pinned mass.
///
/// `p' = p + (1 − damping)(p − p_last) + (F / m)·dt²`, then `p_last = p`.
/// Pinned masses never move. Their previous position catches up with the
/// current one, so a dragged root shows its velocity for one sub-step only.
pub fn verlet(strand: &mut Strand, mass: Scalar, damping: Scalar, dt: Scalar) {
    let dt2 = dt * dt;
    let inv_mass = 1.0 / mass;
    let retain = 1.0 - damping;
    for pm in strand.point_masses_mut() {
        let previous = pm.position;
        if !pm.is_pinned() {
            pm.position += retain * (pm.position - pm.last_position) + pm.forces * inv_mass * dt2;
        }
        pm.last_position = previous;
    }
}

/// Maximum allowed length for a spring with the given rest length.
#[inline]
pub fn max_length(rest_length: Scalar) -> Scalar {
    rest_length * INEXTENSIBILITY_TOLERANCE
}

/// Pulls one over-stretched spring back to exactly its maximum length.
///
/// Pinned masses never move: a pinned endpoint pushes the whole correction
/// onto the other end, two free ends split it evenly, two pinned ends are
/// left alone. Returns whether a correction was applied.
pub fn relax_spring(masses: &mut [PointMass], spring: &Spring) -> bool {
    let (a, b) = (spring.a.index(), spring.b.index());
    let Some((direction, length)) = unit_and_length(masses[b].position - masses[a].position)
    else {
        return false;
    };
    let limit = max_length(spring.rest_length);
    if length <= limit {
        return false;
    }
    let excess = direction * (length - limit);

    match (masses[a].is_pinned(), masses[b].is_pinned()) {
        (true, true) => return false,
        (true, false) => masses[b].position -= excess,
        (false, true) => masses[a].position += excess,
        (false, false) => {
            masses[a].position += excess * 0.5;
            masses[b].position -= excess * 0.5;
        }
    }
    true
}

/// One in-order pass over the stretch springs, then the support springs.
///
/// A single pass does not guarantee every spring ends within the limit;
/// later corrections can re-stretch earlier springs. Returns the number of
/// corrections applied.
pub fn relax(strand: &mut Strand) -> usize {
    let (stretch, support, masses) = strand.springs_and_masses_mut();
    stretch
        .iter()
        .chain(support)
        .filter(|spring| relax_spring(masses, spring))
        .count()
}

/// Kinetic energy `Σ ½ m |v|²` over the free masses.
pub fn kinetic_energy(strand: &Strand, mass: Scalar, dt: Scalar) -> Scalar {
    strand
        .point_masses()
        .iter()
        .filter(|pm| !pm.is_pinned())
        .map(|pm| {
            let v: DVec3 = pm.velocity(dt);
            0.5 * mass * v.length_squared()
        })
        .sum()
}
