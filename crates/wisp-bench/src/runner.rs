//! Benchmark runner: executes scenarios and collects metrics.

use std::time::Instant;

use wisp_debug::{drive_frame, InspectionHook, InvariantHook};
use wisp_math::DVec3;
use wisp_types::WispResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Runs a single scenario to completion.
    pub fn run(scenario: &Scenario) -> WispResult<BenchmarkMetrics> {
        let mut group = scenario.build_group()?;
        let timing = scenario.frame.timing()?;
        let gravity = [scenario.frame.gravity];

        let start_positions: Vec<Vec<DVec3>> =
            group.strands().iter().map(|s| s.positions().collect()).collect();

        let mut invariants = InvariantHook::new();
        let mut frame_times = Vec::with_capacity(scenario.frames as usize);
        let mut max_stretch_ratio = 0.0f64;
        let mut relaxations = 0;
        let mut final_kinetic_energy = 0.0;

        let total_start = Instant::now();
        for frame in 0..scenario.frames {
            let report = drive_frame(
                &mut group,
                &timing,
                &gravity,
                scenario.root_shift,
                u64::from(frame),
                &mut [&mut invariants],
            )?;
            frame_times.push(report.wall_time);
            max_stretch_ratio = max_stretch_ratio.max(report.max_stretch_ratio);
            relaxations += report.relaxations;
            final_kinetic_energy = report.kinetic_energy;
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();
        invariants.on_simulation_end();

        let max_displacement = group
            .strands()
            .iter()
            .zip(&start_positions)
            .flat_map(|(strand, start)| {
                strand
                    .positions()
                    .zip(start.iter())
                    .map(|(p, s)| p.distance(*s))
                    .collect::<Vec<_>>()
            })
            .fold(0.0, f64::max);

        let avg_frame_time = if frame_times.is_empty() {
            0.0
        } else {
            frame_times.iter().sum::<f64>() / frame_times.len() as f64
        };
        let min_frame_time = frame_times.iter().copied().reduce(f64::min).unwrap_or(0.0);
        let max_frame_time = frame_times.iter().copied().fold(0.0, f64::max);

        tracing::info!(
            scenario = scenario.kind.name(),
            frames = scenario.frames,
            wall_time = total_wall_time,
            "Benchmark finished"
        );

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            strand_count: group.len(),
            point_mass_count: group.point_mass_count(),
            frames: scenario.frames,
            substeps_per_frame: timing.substeps_per_frame,
            total_wall_time,
            avg_frame_time,
            min_frame_time,
            max_frame_time,
            final_kinetic_energy,
            max_displacement,
            max_stretch_ratio,
            relaxations,
            invariant_violations: invariants.violations().len(),
        })
    }

    /// Runs every scenario.
    pub fn run_all() -> WispResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
