//! Inspection hooks for live debugging.
//!
//! Hooks observe the frame loop at fixed points without the solver knowing
//! about them. [`drive_frame`] runs one frame sub-step by sub-step and calls
//! every hook along the way.

use wisp_math::DVec3;
use wisp_solver::forces::total_acceleration;
use wisp_solver::{FrameReport, StepTiming, StrandGroup, SubstepReport};
use wisp_telemetry::{EventKind, SimulationEvent};
use wisp_types::constants::{EPSILON, INEXTENSIBILITY_TOLERANCE};
use wisp_types::{WispError, WispResult};

/// Trait for simulation inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// for each frame:
///   hook.on_frame_begin(...)
///   for each sub-step:
///     hook.on_substep(...)
///   hook.on_frame_end(...)
/// hook.on_simulation_end()
/// ```
pub trait InspectionHook: Send {
    fn on_frame_begin(&mut self, frame: u64, sim_time: f64) {
        let _ = (frame, sim_time);
    }

    /// Called after each sub-step with the group in its post-step state.
    fn on_substep(&mut self, frame: u64, index: u32, report: &SubstepReport, group: &StrandGroup) {
        let _ = (frame, index, report, group);
    }

    fn on_frame_end(&mut self, frame: u64, report: &FrameReport, group: &StrandGroup) {
        let _ = (frame, report, group);
    }

    fn on_simulation_end(&mut self) {}

    fn name(&self) -> &str;
}

/// Runs one frame of `group`, notifying `hooks` around every sub-step.
///
/// Produces the same state as [`StrandGroup::simulate_steered`]: the roots
/// move by `root_shift / substeps_per_frame` before each sub-step.
///
/// # Errors
/// Whatever [`StrandGroup::simulate_observed`] rejects. Inputs are checked
/// before any hook runs or any mass moves.
pub fn drive_frame(
    group: &mut StrandGroup,
    timing: &StepTiming,
    accelerations: &[DVec3],
    root_shift: DVec3,
    frame: u64,
    hooks: &mut [&mut dyn InspectionHook],
) -> WispResult<FrameReport> {
    group.config().validate()?;
    let total = total_acceleration(accelerations);
    if !total.is_finite() || !root_shift.is_finite() {
        return Err(WispError::InvalidConfig(format!(
            "frame inputs must be finite, got acceleration {total} and root shift {root_shift}"
        )));
    }

    let sim_time = frame as f64 * timing.frame_time();
    for hook in hooks.iter_mut() {
        hook.on_frame_begin(frame, sim_time);
    }

    let report = group.simulate_observed(timing, accelerations, root_shift, |index, report, group| {
        for hook in hooks.iter_mut() {
            hook.on_substep(frame, index, report, group);
        }
    })?;

    for hook in hooks.iter_mut() {
        hook.on_frame_end(frame, &report, group);
    }
    Ok(report)
}

/// Records the frame loop as telemetry events.
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
    /// Emit one event per sub-step (verbose).
    per_substep: bool,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            per_substep: false,
        }
    }

    /// Also record a [`EventKind::Substep`] event for every sub-step.
    pub fn with_substeps(mut self) -> Self {
        self.per_substep = true;
        self
    }

    /// Drains collected events for dispatch.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for TelemetryHook {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectionHook for TelemetryHook {
    fn on_frame_begin(&mut self, frame: u64, sim_time: f64) {
        self.events
            .push(SimulationEvent::new(frame, EventKind::FrameBegin { sim_time }));
    }

    fn on_substep(&mut self, frame: u64, index: u32, report: &SubstepReport, _: &StrandGroup) {
        if self.per_substep {
            self.events.push(SimulationEvent::new(
                frame,
                EventKind::Substep {
                    index,
                    relaxations: report.relaxations,
                    degenerate: report.degenerate,
                },
            ));
        }
    }

    fn on_frame_end(&mut self, frame: u64, report: &FrameReport, _: &StrandGroup) {
        self.events.push(SimulationEvent::new(
            frame,
            EventKind::Relaxation {
                corrections: report.relaxations,
                max_stretch_ratio: report.max_stretch_ratio,
            },
        ));
        self.events.push(SimulationEvent::new(
            frame,
            EventKind::Energy {
                kinetic: report.kinetic_energy,
            },
        ));
        self.events.push(SimulationEvent::new(
            frame,
            EventKind::FrameEnd {
                wall_time: report.wall_time,
                substeps: report.substeps,
            },
        ));
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}

/// Watches for states the solver should never produce.
///
/// Non-finite positions are violations. Springs left beyond the
/// inextensibility limit after a sub-step are counted, since a single
/// relaxation pass does not always resolve a whole chain.
#[derive(Debug, Default)]
pub struct InvariantHook {
    violations: Vec<String>,
    overstretched_substeps: usize,
}

impl InvariantHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Sub-steps that ended with a spring over the limit.
    pub fn overstretched_substeps(&self) -> usize {
        self.overstretched_substeps
    }
}

impl InspectionHook for InvariantHook {
    fn on_substep(&mut self, frame: u64, index: u32, _: &SubstepReport, group: &StrandGroup) {
        for (s, strand) in group.strands().iter().enumerate() {
            if let Some(i) = strand.positions().position(|p| !p.is_finite()) {
                let message = format!("frame {frame} sub-step {index}: strand {s} mass {i} is not finite");
                tracing::warn!("{message}");
                self.violations.push(message);
            }
            let root = strand.root();
            if root.position != root.last_position {
                let message = format!("frame {frame} sub-step {index}: strand {s} root kept a velocity");
                tracing::warn!("{message}");
                self.violations.push(message);
            }
        }
        if group.max_stretch_ratio() > INEXTENSIBILITY_TOLERANCE + EPSILON {
            self.overstretched_substeps += 1;
        }
    }

    fn on_simulation_end(&mut self) {
        tracing::debug!(
            violations = self.violations.len(),
            overstretched = self.overstretched_substeps,
            "Invariant check finished"
        );
    }

    fn name(&self) -> &str {
        "invariant_hook"
    }
}
