//! One sub-step of one strand.

use wisp_math::DVec3;
use wisp_strand::Strand;

use crate::config::{ForceCategory, SimulationConfig};
use crate::{bending, core_springs, forces, integrate};
use crate::timing::StepTiming;

/// What happened during one sub-step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstepReport {
    /// Relaxation corrections applied.
    pub relaxations: usize,
    /// Springs or frames skipped because their geometry was degenerate.
    pub degenerate: usize,
}

impl SubstepReport {
    pub fn merge(&mut self, other: SubstepReport) {
        self.relaxations += other.relaxations;
        self.degenerate += other.degenerate;
    }
}

/// Advances `strand` by one sub-step under `config`.
///
/// Order: external forces, rest-curve sync, shape smoothing (`ac`), the
/// enabled force categories in [`ForceCategory::ALL`] order, Verlet, then
/// one relaxation pass. On return `smoothed_position` holds the
/// core-smoothed curve of the pre-integration positions.
///
/// `config` is assumed valid; [`StrandGroup`](crate::StrandGroup) checks it
/// once per frame.
pub fn step_strand(
    strand: &mut Strand,
    config: &SimulationConfig,
    timing: &StepTiming,
    total_acceleration: DVec3,
) -> SubstepReport {
    let dt = timing.dt;
    let mass = strand.mass(config.density);
    let mut report = SubstepReport::default();

    forces::accumulate_external(strand, mass, total_acceleration);
    strand.sync_rest_smoothing(config.ac);
    strand.smooth_positions(config.ac);

    for category in ForceCategory::ALL {
        if !config.forces.is_enabled(category) {
            continue;
        }
        report.degenerate += match category {
            ForceCategory::Stretch => forces::stretch_pass(strand, config.ks, config.cs, dt),
            ForceCategory::Support => forces::support_pass(strand, config.kb, config.cb, dt),
            ForceCategory::Bend => {
                strand.smooth_positions(config.ab);
                let skipped = bending::bend_pass(strand, config.kb, config.cb, dt);
                if config.ab != config.ac {
                    strand.smooth_positions(config.ac);
                }
                skipped
            }
            ForceCategory::Core => {
                strand.smooth_velocities(config.ac, dt);
                core_springs::core_pass(strand, config.kc, config.cc)
            }
        };
    }

    integrate::verlet(strand, mass, config.damping, dt);
    report.relaxations = integrate::relax(strand);

    if report.relaxations > 0 || report.degenerate > 0 {
        tracing::trace!(
            relaxations = report.relaxations,
            degenerate = report.degenerate,
            "Sub-step corrections"
        );
    }
    report
}
