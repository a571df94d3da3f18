//! Procedural placement of a strand's initial masses.
//!
//! Generators are deterministic: the zigzag shape draws its lean from
//! a `StdRng` seeded by the shape, so the same parameters always give
//! the same rest pose.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wisp_math::{safe_unit, DVec3};
use wisp_types::{WispError, WispResult};

use crate::params::{StrandParams, StrandShape};

/// Range of the sideways lean of odd zigzag segments (per unit drop).
const ZIGZAG_LEAN: std::ops::Range<f64> = 2.5..7.5;

/// Lays out `params.particle_count` positions starting at the root offset.
///
/// # Example
/// ```
/// use wisp_strand::generators::place_masses;
/// use wisp_strand::{StrandParams, StrandShape};
/// let params = StrandParams::new(5, 4.0).with_shape(StrandShape::hanging());
/// let positions = place_masses(&params).unwrap();
/// assert_eq!(positions.len(), 5);
/// assert!((positions[4].y + 4.0).abs() < 1e-12);
/// ```
pub fn place_masses(params: &StrandParams) -> WispResult<Vec<DVec3>> {
    params.validate()?;
    let space = params.segment_length();

    let positions = match params.shape {
        StrandShape::Straight { direction } => {
            let dir = safe_unit(direction).ok_or_else(|| {
                WispError::InvalidStrand("straight strand direction is degenerate".into())
            })?;
            straight(params.offset, dir, space, params.particle_count)
        }
        StrandShape::Zigzag { seed } => zigzag(params.offset, seed, space, params.particle_count),
    };
    Ok(positions)
}

fn straight(root: DVec3, dir: DVec3, space: f64, count: usize) -> Vec<DVec3> {
    (0..count).map(|i| root + dir * (space * i as f64)).collect()
}

fn zigzag(root: DVec3, seed: u64, space: f64, count: usize) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = Vec::with_capacity(count);
    let mut pos = root;
    for i in 0..count {
        positions.push(pos);
        let lean = if i % 2 == 1 {
            rng.random_range(ZIGZAG_LEAN)
        } else {
            0.0
        };
        // (lean, -1, 0) is never zero, normalize is safe
        let dir = DVec3::new(lean, -1.0, 0.0).normalize();
        pos += dir * space;
    }
    positions
}
