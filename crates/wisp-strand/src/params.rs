//! Strand build parameters.

use serde::{Deserialize, Serialize};
use wisp_math::DVec3;
use wisp_types::{Scalar, WispError, WispResult};

/// Initial curve the masses are laid out on.
///
/// Every shape places consecutive masses exactly `length / (n − 1)` apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrandShape {
    /// Straight line from the root along `direction`.
    Straight { direction: DVec3 },
    /// Alternating segments: even segments hang straight down, odd
    /// segments lean sideways by a seeded random amount.
    Zigzag { seed: u64 },
}

impl Default for StrandShape {
    fn default() -> Self {
        StrandShape::Zigzag { seed: 0 }
    }
}

impl StrandShape {
    /// A strand hanging straight down from its root.
    pub fn hanging() -> Self {
        StrandShape::Straight {
            direction: DVec3::NEG_Y,
        }
    }
}

/// Configuration of one strand. Read-only once the strand is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandParams {
    /// Number of point masses (at least 2).
    pub particle_count: usize,
    /// Total rest length of the chain.
    pub length: Scalar,
    /// Display thickness. Has no effect on the dynamics.
    pub thickness: Scalar,
    /// Root anchor position.
    pub offset: DVec3,
    /// Initial curve.
    #[serde(default)]
    pub shape: StrandShape,
}

impl StrandParams {
    /// Parameters for a strand rooted at the origin with the default shape.
    pub fn new(particle_count: usize, length: Scalar) -> Self {
        Self {
            particle_count,
            length,
            thickness: 1.0,
            offset: DVec3::ZERO,
            shape: StrandShape::default(),
        }
    }

    pub fn with_offset(mut self, offset: DVec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_shape(mut self, shape: StrandShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_thickness(mut self, thickness: Scalar) -> Self {
        self.thickness = thickness;
        self
    }

    /// Rest separation of consecutive masses.
    #[inline]
    pub fn segment_length(&self) -> Scalar {
        self.length / (self.particle_count - 1) as Scalar
    }

    /// Checks every field before anything is allocated.
    pub fn validate(&self) -> WispResult<()> {
        if self.particle_count < 2 {
            return Err(WispError::InvalidStrand(format!(
                "particle count must be at least 2, got {}",
                self.particle_count
            )));
        }
        if self.particle_count > u32::MAX as usize {
            return Err(WispError::InvalidStrand(format!(
                "particle count {} exceeds the index range",
                self.particle_count
            )));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(WispError::InvalidStrand(format!(
                "length must be positive, got {}",
                self.length
            )));
        }
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(WispError::InvalidStrand(format!(
                "thickness must be non-negative, got {}",
                self.thickness
            )));
        }
        if !self.offset.is_finite() {
            return Err(WispError::InvalidStrand("root offset must be finite".into()));
        }
        if let StrandShape::Straight { direction } = self.shape {
            if wisp_math::safe_unit(direction).is_none() {
                return Err(WispError::InvalidStrand(
                    "straight strand direction must be a non-zero finite vector".into(),
                ));
            }
        }
        Ok(())
    }
}
