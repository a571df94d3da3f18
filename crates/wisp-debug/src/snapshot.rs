//! State snapshot serialization for replay and debugging.
//!
//! A snapshot captures the Verlet pair of every mass of every strand, which
//! is all the state needed to resume a group built from the same scene.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wisp_math::DVec3;
use wisp_solver::StrandGroup;
use wisp_types::{WispError, WispResult};

/// Verlet state of one strand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandSnapshot {
    pub positions: Vec<DVec3>,
    pub last_positions: Vec<DVec3>,
    /// Drawn smooth curve at capture time.
    pub smoothed_positions: Vec<DVec3>,
}

/// A complete group snapshot, serialized with `bincode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Frame index when this snapshot was taken.
    pub frame: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    pub strands: Vec<StrandSnapshot>,
}

impl StateSnapshot {
    pub fn from_group(group: &StrandGroup, frame: u64, sim_time: f64) -> Self {
        let strands = group
            .strands()
            .iter()
            .map(|strand| StrandSnapshot {
                positions: strand.positions().collect(),
                last_positions: strand.point_masses().iter().map(|pm| pm.last_position).collect(),
                smoothed_positions: strand.smoothed_positions().collect(),
            })
            .collect();
        Self {
            frame,
            sim_time,
            strands,
        }
    }

    /// Total point masses captured.
    pub fn point_mass_count(&self) -> usize {
        self.strands.iter().map(|s| s.positions.len()).sum()
    }

    /// Writes the captured Verlet state back into a group of the same shape.
    ///
    /// # Errors
    /// [`WispError::InvalidConfig`] if the strand or mass counts differ; the
    /// group is untouched in that case.
    pub fn restore_into(&self, group: &mut StrandGroup) -> WispResult<()> {
        if group.len() != self.strands.len() {
            return Err(WispError::InvalidConfig(format!(
                "snapshot has {} strands, group has {}",
                self.strands.len(),
                group.len()
            )));
        }
        for (i, (strand, snap)) in group.strands().iter().zip(&self.strands).enumerate() {
            if strand.particle_count() != snap.positions.len()
                || snap.last_positions.len() != snap.positions.len()
            {
                return Err(WispError::InvalidConfig(format!(
                    "strand {i}: snapshot mass count does not match"
                )));
            }
        }

        for (i, snap) in self.strands.iter().enumerate() {
            let strand = group.strand_mut(wisp_types::StrandId(i as u32))?;
            for ((pm, &p), &last) in strand
                .point_masses_mut()
                .iter_mut()
                .zip(&snap.positions)
                .zip(&snap.last_positions)
            {
                pm.position = p;
                pm.last_position = last;
            }
        }
        Ok(())
    }

    /// Largest positional difference against another snapshot of the same
    /// shape, or `None` when the shapes differ.
    pub fn max_displacement(&self, other: &StateSnapshot) -> Option<f64> {
        if self.strands.len() != other.strands.len() {
            return None;
        }
        let mut max = 0.0f64;
        for (a, b) in self.strands.iter().zip(&other.strands) {
            if a.positions.len() != b.positions.len() {
                return None;
            }
            for (p, q) in a.positions.iter().zip(&b.positions) {
                max = max.max(p.distance(*q));
            }
        }
        Some(max)
    }

    pub fn to_bytes(&self) -> WispResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| WispError::Serialization(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> WispResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| WispError::Serialization(format!("snapshot deserialization failed: {e}")))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> WispResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> WispResult<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}
