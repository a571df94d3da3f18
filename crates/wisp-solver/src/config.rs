//! Simulation configuration.
//!
//! One explicit value holds every shared physical constant and the
//! per-category force toggles. A UI or scene loader assembles it; the
//! solver only reads it.

use serde::{Deserialize, Serialize};
use wisp_math::DVec3;
use wisp_types::constants::{DEFAULT_FRAMES_PER_SEC, DEFAULT_SUBSTEPS_PER_FRAME, GRAVITY};
use wisp_types::{Scalar, WispError, WispResult};

use crate::timing::StepTiming;

/// Force categories, in the order they are applied each sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceCategory {
    Stretch,
    Support,
    Bend,
    Core,
}

impl ForceCategory {
    /// All categories in application order.
    pub const ALL: [ForceCategory; 4] = [
        ForceCategory::Stretch,
        ForceCategory::Support,
        ForceCategory::Bend,
        ForceCategory::Core,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ForceCategory::Stretch => "stretch",
            ForceCategory::Support => "support",
            ForceCategory::Bend => "bend",
            ForceCategory::Core => "core",
        }
    }
}

/// Per-category enable flags. Disabling a category skips its pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceToggles {
    pub stretch: bool,
    pub support: bool,
    pub bend: bool,
    pub core: bool,
}

impl Default for ForceToggles {
    fn default() -> Self {
        Self {
            stretch: true,
            support: true,
            bend: false,
            core: true,
        }
    }
}

impl ForceToggles {
    /// Every category off.
    pub fn none() -> Self {
        Self {
            stretch: false,
            support: false,
            bend: false,
            core: false,
        }
    }

    /// Every category on.
    pub fn all() -> Self {
        Self {
            stretch: true,
            support: true,
            bend: true,
            core: true,
        }
    }

    pub fn is_enabled(&self, category: ForceCategory) -> bool {
        match category {
            ForceCategory::Stretch => self.stretch,
            ForceCategory::Support => self.support,
            ForceCategory::Bend => self.bend,
            ForceCategory::Core => self.core,
        }
    }

    pub fn set(&mut self, category: ForceCategory, enabled: bool) {
        match category {
            ForceCategory::Stretch => self.stretch = enabled,
            ForceCategory::Support => self.support = enabled,
            ForceCategory::Bend => self.bend = enabled,
            ForceCategory::Core => self.core = enabled,
        }
    }
}

/// Shared physical parameters of a strand group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Linear density (mass per unit length).
    pub density: Scalar,

    /// Verlet velocity damping per sub-step (0.0 = none, must be < 1.0).
    pub damping: Scalar,

    /// Stretch spring stiffness.
    pub ks: Scalar,
    /// Stretch spring damping.
    pub cs: Scalar,

    /// Support/bend stiffness.
    pub kb: Scalar,
    /// Support/bend damping.
    pub cb: Scalar,
    /// Bend smoothing amount (τ for the bend frames).
    pub ab: Scalar,

    /// Core stiffness.
    pub kc: Scalar,
    /// Core damping.
    pub cc: Scalar,
    /// Core smoothing amount (τ for the core curve and the drawn smooth curve).
    pub ac: Scalar,

    /// Force category toggles.
    pub forces: ForceToggles,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            damping: 0.0,
            ks: 1000.0,
            cs: 1.0,
            kb: 100.0,
            cb: 0.5,
            ab: 0.5,
            kc: 100.0,
            cc: 0.5,
            ac: 0.2,
            forces: ForceToggles::default(),
        }
    }
}

impl SimulationConfig {
    /// Stretch springs only: every other stiffness and damping is zero
    /// and the other categories are disabled.
    pub fn stretch_only(ks: Scalar, cs: Scalar) -> Self {
        Self {
            ks,
            cs,
            kb: 0.0,
            cb: 0.0,
            kc: 0.0,
            cc: 0.0,
            forces: ForceToggles {
                stretch: true,
                ..ForceToggles::none()
            },
            ..Default::default()
        }
    }

    /// Stiff, strongly curl-preserving hair with every category enabled.
    pub fn stiff() -> Self {
        Self {
            ks: 5000.0,
            cs: 2.0,
            kb: 400.0,
            cb: 1.0,
            kc: 400.0,
            cc: 1.0,
            forces: ForceToggles::all(),
            ..Default::default()
        }
    }

    /// No forces at all besides external accelerations.
    pub fn free_fall() -> Self {
        Self {
            forces: ForceToggles::none(),
            ..Default::default()
        }
    }

    /// Rejects values that would make a sub-step ill-defined.
    pub fn validate(&self) -> WispResult<()> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(WispError::InvalidConfig(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        if !self.damping.is_finite() || !(0.0..1.0).contains(&self.damping) {
            return Err(WispError::InvalidConfig(format!(
                "damping must be in [0, 1), got {}",
                self.damping
            )));
        }
        let coefficients = [
            ("ks", self.ks),
            ("cs", self.cs),
            ("kb", self.kb),
            ("cb", self.cb),
            ("ab", self.ab),
            ("kc", self.kc),
            ("cc", self.cc),
            ("ac", self.ac),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(WispError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Frame loop settings supplied by the viewer (or a scene file).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSettings {
    pub frames_per_sec: u32,
    pub substeps_per_frame: u32,
    /// Constant acceleration applied every sub-step.
    pub gravity: DVec3,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            frames_per_sec: DEFAULT_FRAMES_PER_SEC,
            substeps_per_frame: DEFAULT_SUBSTEPS_PER_FRAME,
            gravity: DVec3::new(0.0, -GRAVITY, 0.0),
        }
    }
}

impl FrameSettings {
    /// Sub-step timing for these settings.
    pub fn timing(&self) -> WispResult<StepTiming> {
        StepTiming::new(self.frames_per_sec as Scalar, self.substeps_per_frame)
    }
}
