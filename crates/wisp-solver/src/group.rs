//! The strand group: every simulated hair plus the shared configuration.

use std::time::Instant;

use wisp_math::DVec3;
use wisp_strand::{Strand, StrandParams};
use wisp_types::{Scalar, StrandId, WispError, WispResult};

use crate::config::SimulationConfig;
use crate::forces::total_acceleration;
use crate::integrate::kinetic_energy;
use crate::pipeline::{step_strand, SubstepReport};
use crate::timing::StepTiming;

/// Summary of one [`StrandGroup::simulate`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Sub-steps executed.
    pub substeps: u32,
    /// Sub-step size used.
    pub dt: Scalar,
    /// Relaxation corrections across all strands and sub-steps.
    pub relaxations: usize,
    /// Degenerate springs or frames skipped.
    pub degenerate: usize,
    /// Largest current/rest length ratio over all springs after the frame.
    pub max_stretch_ratio: Scalar,
    /// Kinetic energy of the free masses after the frame.
    pub kinetic_energy: Scalar,
    /// Wall-clock time for the frame, in seconds.
    pub wall_time: f64,
}

/// Owns the strands and the configuration they are simulated under.
#[derive(Debug, Clone)]
pub struct StrandGroup {
    strands: Vec<Strand>,
    config: SimulationConfig,
    substeps_run: u64,
}

impl StrandGroup {
    /// Empty group.
    ///
    /// # Errors
    /// [`WispError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: SimulationConfig) -> WispResult<Self> {
        config.validate()?;
        Ok(Self {
            strands: Vec::new(),
            config,
            substeps_run: 0,
        })
    }

    /// Builds a group with one strand per parameter set.
    pub fn from_params(
        config: SimulationConfig,
        params: impl IntoIterator<Item = StrandParams>,
    ) -> WispResult<Self> {
        let mut group = Self::new(config)?;
        for p in params {
            group.add_strand(p)?;
        }
        Ok(group)
    }

    /// Builds and adds a strand. Its rest frames use the current `ab`.
    pub fn add_strand(&mut self, params: StrandParams) -> WispResult<StrandId> {
        let id = StrandId(u32::try_from(self.strands.len()).map_err(|_| {
            WispError::InvalidStrand("strand group is full".into())
        })?);
        let strand = Strand::build(params, self.config.ab, self.config.ac)?;
        tracing::debug!(
            strand = id.index(),
            particles = strand.particle_count(),
            "Added strand"
        );
        self.strands.push(strand);
        Ok(id)
    }

    // ─── Accessors ──────────────────────────────────────────

    pub fn strands(&self) -> &[Strand] {
        &self.strands
    }

    pub fn strand(&self, id: StrandId) -> WispResult<&Strand> {
        self.strands.get(id.index()).ok_or(WispError::UnknownId {
            kind: "strand",
            id: id.index(),
        })
    }

    pub fn strand_mut(&mut self, id: StrandId) -> WispResult<&mut Strand> {
        self.strands.get_mut(id.index()).ok_or(WispError::UnknownId {
            kind: "strand",
            id: id.index(),
        })
    }

    pub fn len(&self) -> usize {
        self.strands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    /// Total point masses across all strands.
    pub fn point_mass_count(&self) -> usize {
        self.strands.iter().map(Strand::particle_count).sum()
    }

    /// Sub-steps run since the group was created.
    pub fn substeps_run(&self) -> u64 {
        self.substeps_run
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Direct access for UI-style tweaking. Validated at the next frame.
    ///
    /// Changing `ab` does not rebuild existing reference vectors; changing
    /// `ac` refreshes the rest-core curve at the next sub-step.
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Replaces the configuration after validating it.
    pub fn set_config(&mut self, config: SimulationConfig) -> WispResult<()> {
        config.validate()?;
        tracing::info!(forces = ?config.forces, "Simulation config updated");
        self.config = config;
        Ok(())
    }

    // ─── Stepping ───────────────────────────────────────────

    /// Drags every strand's root by `delta`.
    ///
    /// # Errors
    /// [`WispError::InvalidConfig`] if `delta` is not finite; no root moves.
    pub fn translate_roots(&mut self, delta: DVec3) -> WispResult<()> {
        checked_shift(delta)?;
        for strand in &mut self.strands {
            strand.translate_root(delta)?;
        }
        Ok(())
    }

    /// Runs one sub-step of every strand.
    ///
    /// # Errors
    /// [`WispError::InvalidConfig`] if the configuration fails validation;
    /// no strand is touched in that case.
    pub fn substep(
        &mut self,
        timing: &StepTiming,
        accelerations: &[DVec3],
    ) -> WispResult<SubstepReport> {
        self.config.validate()?;
        let acceleration = checked_acceleration(accelerations)?;
        Ok(self.substep_unchecked(timing, acceleration))
    }

    fn substep_unchecked(&mut self, timing: &StepTiming, acceleration: DVec3) -> SubstepReport {
        let mut report = SubstepReport::default();
        for strand in &mut self.strands {
            report.merge(step_strand(strand, &self.config, timing, acceleration));
        }
        self.substeps_run += 1;
        report
    }

    /// Advances one frame: `substeps_per_frame` sub-steps at
    /// `dt = 1 / (frames_per_sec · substeps_per_frame)`.
    ///
    /// # Errors
    /// [`WispError::InvalidConfig`] for bad timing or configuration. The
    /// group is unchanged on error.
    pub fn simulate(
        &mut self,
        frames_per_sec: Scalar,
        substeps_per_frame: u32,
        accelerations: &[DVec3],
    ) -> WispResult<FrameReport> {
        let timing = StepTiming::new(frames_per_sec, substeps_per_frame)?;
        self.simulate_with(&timing, accelerations)
    }

    /// [`simulate`](Self::simulate) with precomputed timing.
    pub fn simulate_with(
        &mut self,
        timing: &StepTiming,
        accelerations: &[DVec3],
    ) -> WispResult<FrameReport> {
        self.simulate_steered(timing, accelerations, DVec3::ZERO)
    }

    /// One frame while dragging every root by `root_shift` in total.
    ///
    /// The shift is spread evenly, `root_shift / substeps_per_frame` before
    /// each sub-step, so the free masses see a smooth root velocity.
    pub fn simulate_steered(
        &mut self,
        timing: &StepTiming,
        accelerations: &[DVec3],
        root_shift: DVec3,
    ) -> WispResult<FrameReport> {
        self.simulate_observed(timing, accelerations, root_shift, |_, _, _| {})
    }

    /// [`simulate_steered`](Self::simulate_steered), calling `on_substep`
    /// with the sub-step index and report after every sub-step.
    ///
    /// # Errors
    /// [`WispError::InvalidConfig`] for a bad configuration, a non-finite
    /// acceleration or a non-finite `root_shift`. Everything is checked
    /// before the first root moves.
    pub fn simulate_observed<F>(
        &mut self,
        timing: &StepTiming,
        accelerations: &[DVec3],
        root_shift: DVec3,
        mut on_substep: F,
    ) -> WispResult<FrameReport>
    where
        F: FnMut(u32, &SubstepReport, &StrandGroup),
    {
        self.config.validate()?;
        let acceleration = checked_acceleration(accelerations)?;
        checked_shift(root_shift)?;
        let start = Instant::now();
        let per_substep = root_shift / timing.substeps_per_frame as Scalar;

        let mut totals = SubstepReport::default();
        for index in 0..timing.substeps_per_frame {
            if per_substep != DVec3::ZERO {
                for strand in &mut self.strands {
                    strand.translate_root(per_substep)?;
                }
            }
            let report = self.substep_unchecked(timing, acceleration);
            totals.merge(report);
            on_substep(index, &report, self);
        }

        let report = FrameReport {
            substeps: timing.substeps_per_frame,
            dt: timing.dt,
            relaxations: totals.relaxations,
            degenerate: totals.degenerate,
            max_stretch_ratio: self.max_stretch_ratio(),
            kinetic_energy: self.kinetic_energy(timing.dt),
            wall_time: start.elapsed().as_secs_f64(),
        };
        tracing::trace!(
            substeps = report.substeps,
            relaxations = report.relaxations,
            max_stretch = report.max_stretch_ratio,
            "Frame simulated"
        );
        Ok(report)
    }

    // ─── Diagnostics ────────────────────────────────────────

    /// Largest current/rest length ratio over every spring of every strand.
    pub fn max_stretch_ratio(&self) -> Scalar {
        self.strands
            .iter()
            .flat_map(|s| s.springs().map(move |sp| s.stretch_ratio(sp)))
            .fold(0.0, Scalar::max)
    }

    /// Kinetic energy of all free masses, velocities estimated with `dt`.
    pub fn kinetic_energy(&self, dt: Scalar) -> Scalar {
        self.strands
            .iter()
            .map(|s| kinetic_energy(s, s.mass(self.config.density), dt))
            .sum()
    }
}

fn checked_acceleration(accelerations: &[DVec3]) -> WispResult<DVec3> {
    let total = total_acceleration(accelerations);
    if total.is_finite() {
        Ok(total)
    } else {
        Err(WispError::InvalidConfig(format!(
            "external acceleration must be finite, got {total}"
        )))
    }
}

fn checked_shift(shift: DVec3) -> WispResult<()> {
    if shift.is_finite() {
        Ok(())
    } else {
        Err(WispError::InvalidConfig(format!(
            "root shift must be finite, got {shift}"
        )))
    }
}
