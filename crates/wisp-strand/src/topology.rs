//! Spring generation over a chain.
//!
//! A strand with `n` masses gets `n − 1` stretch springs between
//! neighbours and `n − 2` support springs skipping one mass:
//!
//! ```text
//!   stretch:  0─1─2─3─4
//!   support:  0───2
//!               1───3
//!                 2───4
//! ```

use wisp_math::DVec3;
use wisp_types::{PointMassId, Scalar};

use crate::spring::{Spring, SpringKind};

/// Both spring sets of a strand, in chain order.
#[derive(Debug, Clone)]
pub struct StrandTopology {
    pub stretch: Vec<Spring>,
    pub support: Vec<Spring>,
}

impl StrandTopology {
    /// Builds springs from the initial mass positions.
    ///
    /// Rest lengths are the initial separations.
    pub fn build(positions: &[DVec3]) -> Self {
        Self {
            stretch: chain_springs(positions, 1, SpringKind::Stretch),
            support: chain_springs(positions, 2, SpringKind::Support),
        }
    }

    /// Mean rest length of the stretch springs (0 for an empty set).
    pub fn avg_stretch_length(&self) -> Scalar {
        if self.stretch.is_empty() {
            return 0.0;
        }
        self.stretch.iter().map(|s| s.rest_length).sum::<Scalar>() / self.stretch.len() as Scalar
    }
}

fn chain_springs(positions: &[DVec3], stride: usize, kind: SpringKind) -> Vec<Spring> {
    if positions.len() <= stride {
        return Vec::new();
    }
    (0..positions.len() - stride)
        .map(|i| {
            let rest_length = (positions[i + stride] - positions[i]).length();
            Spring::new(PointMassId::from(i), PointMassId::from(i + stride), rest_length, kind)
        })
        .collect()
}
