//! # wisp-strand
//!
//! Strand representation: an ordered chain of point masses stored
//! contiguously, with springs referring to masses by index.
//!
//! ## Key Types
//!
//! - [`Strand`]: One hair. Owns its point masses and both spring sets.
//! - [`PointMass`]: A simulated particle with Verlet state and filter outputs.
//! - [`Spring`]: Stretch (adjacent) or support (two apart) connection.
//! - [`StrandParams`] / [`StrandShape`]: Build-time configuration.
//! - [`StrandTopology`]: Spring generation over a chain.

pub mod generators;
pub mod params;
pub mod point_mass;
pub mod smoothing;
pub mod spring;
pub mod strand;
pub mod topology;

pub use params::{StrandParams, StrandShape};
pub use point_mass::PointMass;
pub use spring::{Spring, SpringKind};
pub use strand::Strand;
pub use topology::StrandTopology;
