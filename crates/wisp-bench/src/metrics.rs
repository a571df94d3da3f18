//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub strand_count: usize,
    pub point_mass_count: usize,
    pub frames: u32,
    pub substeps_per_frame: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame (seconds).
    pub avg_frame_time: f64,
    pub min_frame_time: f64,
    pub max_frame_time: f64,
    /// Kinetic energy after the last frame.
    pub final_kinetic_energy: f64,
    /// Largest distance of any mass from its start position.
    pub max_displacement: f64,
    /// Largest spring stretch ratio seen at the end of any frame.
    pub max_stretch_ratio: f64,
    /// Relaxation corrections across the run.
    pub relaxations: usize,
    /// Invariant violations reported by the inspection hook.
    pub invariant_violations: usize,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,strands,point_masses,frames,substeps,total_wall_time_s,avg_frame_ms,min_frame_ms,max_frame_ms,final_ke,max_displacement,max_stretch,relaxations,violations".to_string()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6},{},{}",
            self.scenario,
            self.strand_count,
            self.point_mass_count,
            self.frames,
            self.substeps_per_frame,
            self.total_wall_time,
            self.avg_frame_time * 1000.0,
            self.min_frame_time * 1000.0,
            self.max_frame_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_stretch_ratio,
            self.relaxations,
            self.invariant_violations,
        )
    }

    /// Header plus one row per entry.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
