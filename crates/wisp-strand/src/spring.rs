//! Springs between two point masses of the same strand.

use serde::{Deserialize, Serialize};
use wisp_types::{PointMassId, Scalar};

/// Role of a spring in the force model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpringKind {
    /// Connects adjacent masses `i` and `i + 1`.
    Stretch,
    /// Connects masses `i` and `i + 2`.
    Support,
}

/// An edge between two masses, referenced by index.
///
/// The spring never owns its endpoints; indices are only meaningful
/// inside the strand that created it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub a: PointMassId,
    pub b: PointMassId,
    /// Separation of the endpoints at construction.
    pub rest_length: Scalar,
    pub kind: SpringKind,
}

impl Spring {
    pub fn new(a: PointMassId, b: PointMassId, rest_length: Scalar, kind: SpringKind) -> Self {
        Self {
            a,
            b,
            rest_length,
            kind,
        }
    }
}
