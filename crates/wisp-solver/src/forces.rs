//! External forces and the linear spring passes (stretch and support).

use wisp_math::{unit_and_length, DVec3};
use wisp_strand::{PointMass, Spring, Strand};
use wisp_types::Scalar;

/// Sum of the accelerations applied to every mass this sub-step.
pub fn total_acceleration(accelerations: &[DVec3]) -> DVec3 {
    accelerations.iter().copied().sum()
}

/// Resets every mass's accumulator to `mass · total_acceleration`.
///
/// This is the only place accumulators are cleared; every later pass adds.
pub fn accumulate_external(strand: &mut Strand, mass: Scalar, total_acceleration: DVec3) {
    let seed = total_acceleration * mass;
    for pm in strand.point_masses_mut() {
        pm.forces = seed;
    }
}

/// Scalar spring-damper magnitude along the edge direction.
///
/// `f = k(len − rest) + c·dot(v_b − v_a, û)`
#[inline]
pub fn spring_magnitude(
    length: Scalar,
    rest_length: Scalar,
    relative_velocity: DVec3,
    direction: DVec3,
    k: Scalar,
    c: Scalar,
) -> Scalar {
    k * (length - rest_length) + c * relative_velocity.dot(direction)
}

/// Applies one linear spring law to every spring in `springs`.
///
/// Adds `+f·û` to mass `a` and `−f·û` to mass `b`. Returns the number of
/// springs skipped because their current length was degenerate.
pub fn apply_linear_springs(
    springs: &[Spring],
    masses: &mut [PointMass],
    k: Scalar,
    c: Scalar,
    dt: Scalar,
) -> usize {
    let mut skipped = 0;
    for spring in springs {
        let (a, b) = (spring.a.index(), spring.b.index());
        let Some((direction, length)) = unit_and_length(masses[b].position - masses[a].position)
        else {
            skipped += 1;
            continue;
        };
        let relative_velocity = masses[b].velocity(dt) - masses[a].velocity(dt);
        let f = spring_magnitude(length, spring.rest_length, relative_velocity, direction, k, c);
        masses[a].forces += direction * f;
        masses[b].forces -= direction * f;
    }
    skipped
}

/// Stretch springs (i, i+1) with `ks`/`cs`.
pub fn stretch_pass(strand: &mut Strand, ks: Scalar, cs: Scalar, dt: Scalar) -> usize {
    let (stretch, _, masses) = strand.springs_and_masses_mut();
    apply_linear_springs(stretch, masses, ks, cs, dt)
}

/// Support springs (i, i+2) with `kb`/`cb`.
pub fn support_pass(strand: &mut Strand, kb: Scalar, cb: Scalar, dt: Scalar) -> usize {
    let (_, support, masses) = strand.springs_and_masses_mut();
    apply_linear_springs(support, masses, kb, cb, dt)
}
