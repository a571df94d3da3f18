//! Strongly-typed identifiers for simulation entities.
//!
//! Newtype wrappers prevent accidental mixing of strand indices
//! with point-mass indices inside a strand.

use serde::{Deserialize, Serialize};

/// Index of a strand inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrandId(pub u32);

/// Index of a point mass inside its strand (0 is the root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointMassId(pub u32);

impl StrandId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl PointMassId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for StrandId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<usize> for PointMassId {
    fn from(val: usize) -> Self {
        Self(val as u32)
    }
}
