//! Benchmark scenarios: strands + config + frame loop for each case.
//!
//! 1. **Hanging strand**: straight hair released from rest under gravity
//! 2. **Swinging strand**: hanging hair whose root is dragged sideways
//! 3. **Zigzag strand**: curly hair with every force category enabled
//! 4. **Strand bundle**: a grid of curly hairs with offset roots

use serde::{Deserialize, Serialize};

use wisp_math::DVec3;
use wisp_solver::{ForceToggles, FrameSettings, SimulationConfig, StrandGroup};
use wisp_strand::{StrandParams, StrandShape};
use wisp_types::WispResult;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    HangingStrand,
    SwingingStrand,
    ZigzagStrand,
    StrandBundle,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingStrand,
            ScenarioKind::SwingingStrand,
            ScenarioKind::ZigzagStrand,
            ScenarioKind::StrandBundle,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingStrand => "hanging_strand",
            ScenarioKind::SwingingStrand => "swinging_strand",
            ScenarioKind::ZigzagStrand => "zigzag_strand",
            ScenarioKind::StrandBundle => "strand_bundle",
        }
    }

    /// Looks a scenario up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<ScenarioKind> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    /// One entry per strand.
    pub strands: Vec<StrandParams>,
    pub config: SimulationConfig,
    pub frame: FrameSettings,
    /// Number of frames to simulate.
    pub frames: u32,
    /// Root displacement applied over each frame.
    pub root_shift: DVec3,
}

impl Scenario {
    /// 20 masses, 4 units long, hanging straight down. 1 s at 90 fps.
    pub fn hanging_strand() -> Self {
        Self {
            kind: ScenarioKind::HangingStrand,
            strands: vec![StrandParams::new(20, 4.0).with_shape(StrandShape::hanging())],
            config: SimulationConfig::default(),
            frame: FrameSettings::default(),
            frames: 90,
            root_shift: DVec3::ZERO,
        }
    }

    /// The hanging strand with its root dragged 0.02 per frame along +X.
    pub fn swinging_strand() -> Self {
        Self {
            kind: ScenarioKind::SwingingStrand,
            root_shift: DVec3::new(0.02, 0.0, 0.0),
            ..Self::hanging_strand()
        }
    }

    /// A 30-mass curly strand with bend springs enabled.
    pub fn zigzag_strand() -> Self {
        Self {
            kind: ScenarioKind::ZigzagStrand,
            strands: vec![StrandParams::new(30, 4.0).with_shape(StrandShape::Zigzag { seed: 7 })],
            config: SimulationConfig {
                forces: ForceToggles::all(),
                ..SimulationConfig::stiff()
            },
            frame: FrameSettings::default(),
            frames: 90,
            root_shift: DVec3::ZERO,
        }
    }

    /// 5 × 5 curly strands on a 0.25 spaced grid in the XZ plane.
    pub fn strand_bundle() -> Self {
        let side = 5;
        let spacing = 0.25;
        let strands = (0..side * side)
            .map(|i| {
                let (row, col) = (i / side, i % side);
                let offset = DVec3::new(col as f64 * spacing, 0.0, row as f64 * spacing);
                StrandParams::new(15, 3.0)
                    .with_offset(offset)
                    .with_shape(StrandShape::Zigzag { seed: i as u64 })
            })
            .collect();
        Self {
            kind: ScenarioKind::StrandBundle,
            strands,
            config: SimulationConfig::default(),
            frame: FrameSettings::default(),
            frames: 60,
            root_shift: DVec3::ZERO,
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingStrand => Self::hanging_strand(),
            ScenarioKind::SwingingStrand => Self::swinging_strand(),
            ScenarioKind::ZigzagStrand => Self::zigzag_strand(),
            ScenarioKind::StrandBundle => Self::strand_bundle(),
        }
    }

    /// Builds the group this scenario simulates.
    pub fn build_group(&self) -> WispResult<StrandGroup> {
        StrandGroup::from_params(self.config.clone(), self.strands.iter().cloned())
    }
}
