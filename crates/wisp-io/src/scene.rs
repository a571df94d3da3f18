//! JSON scene contract.
//!
//! ```json
//! {
//!   "hair": {
//!     "particles count": 20, "length": 4.0, "thickness": 1.0,
//!     "density": 1.0, "ks": 1000.0, "cs": 1.0, "kb": 100.0, "cb": 0.5,
//!     "bend smoothing amount": 0.5
//!   },
//!   "frame": { "frames_per_sec": 90, "substeps_per_frame": 30 }
//! }
//! ```
//!
//! `"hair"` may be a single object or an array of them. Unknown top-level
//! keys are rejected; unknown keys inside a hair are ignored.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use wisp_math::DVec3;
use wisp_solver::{ForceToggles, FrameSettings, SimulationConfig, StrandGroup};
use wisp_strand::{StrandParams, StrandShape};
use wisp_types::{Scalar, WispError, WispResult};

use crate::validator::validate_scene;

/// One hair as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HairDescriptor {
    #[serde(rename = "particles count")]
    pub particle_count: usize,
    pub length: Scalar,
    pub thickness: Scalar,
    pub density: Scalar,
    pub ks: Scalar,
    pub cs: Scalar,
    pub kb: Scalar,
    pub cb: Scalar,
    #[serde(rename = "bend smoothing amount")]
    pub bend_smoothing: Scalar,
    #[serde(
        rename = "core smoothing amount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub core_smoothing: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kc: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damping: Option<Scalar>,
    /// Root position.
    #[serde(default)]
    pub offset: DVec3,
    /// Straight hair along this direction instead of a zigzag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<DVec3>,
    /// Zigzag seed.
    #[serde(default)]
    pub seed: u64,
}

impl HairDescriptor {
    /// Descriptor carrying the default physical constants.
    pub fn new(particle_count: usize, length: Scalar) -> Self {
        let defaults = SimulationConfig::default();
        Self {
            particle_count,
            length,
            thickness: 1.0,
            density: defaults.density,
            ks: defaults.ks,
            cs: defaults.cs,
            kb: defaults.kb,
            cb: defaults.cb,
            bend_smoothing: defaults.ab,
            core_smoothing: None,
            kc: None,
            cc: None,
            damping: None,
            offset: DVec3::ZERO,
            direction: None,
            seed: 0,
        }
    }

    /// Geometry for [`Strand::build`](wisp_strand::Strand::build).
    pub fn strand_params(&self) -> StrandParams {
        let shape = match self.direction {
            Some(direction) => StrandShape::Straight { direction },
            None => StrandShape::Zigzag { seed: self.seed },
        };
        StrandParams::new(self.particle_count, self.length)
            .with_thickness(self.thickness)
            .with_offset(self.offset)
            .with_shape(shape)
    }

    /// Physical constants; keys the file omits take their defaults.
    pub fn config(&self, forces: ForceToggles) -> SimulationConfig {
        let defaults = SimulationConfig::default();
        SimulationConfig {
            density: self.density,
            damping: self.damping.unwrap_or(defaults.damping),
            ks: self.ks,
            cs: self.cs,
            kb: self.kb,
            cb: self.cb,
            ab: self.bend_smoothing,
            kc: self.kc.unwrap_or(defaults.kc),
            cc: self.cc.unwrap_or(defaults.cc),
            ac: self.core_smoothing.unwrap_or(defaults.ac),
            forces,
        }
    }
}

/// A complete scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(deserialize_with = "one_or_many")]
    pub hair: Vec<HairDescriptor>,
    #[serde(default)]
    pub frame: FrameSettings,
    #[serde(default)]
    pub forces: ForceToggles,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<HairDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<_>, _>>(),
        other => serde_json::from_value(other).map(|hair| vec![hair]),
    };
    parsed.map_err(serde::de::Error::custom)
}

impl Scene {
    /// Single-hair scene with default frame settings.
    pub fn single(hair: HairDescriptor) -> Self {
        Self {
            hair: vec![hair],
            frame: FrameSettings::default(),
            forces: ForceToggles::default(),
        }
    }

    /// Parses a scene. Missing required keys and unknown top-level keys
    /// are reported as [`WispError::Serialization`].
    pub fn from_json(text: &str) -> WispResult<Self> {
        serde_json::from_str(text).map_err(|e| WispError::Serialization(e.to_string()))
    }

    /// Reads and parses a scene file.
    pub fn load(path: impl AsRef<Path>) -> WispResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), hairs = scene.hair.len(), "Loaded scene");
        Ok(scene)
    }

    pub fn to_json(&self) -> WispResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WispError::Serialization(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> WispResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Group configuration, taken from the first hair.
    pub fn config(&self) -> WispResult<SimulationConfig> {
        self.hair
            .first()
            .map(|h| h.config(self.forces))
            .ok_or_else(|| WispError::InvalidConfig("scene has no hair".into()))
    }

    /// Validates the scene and builds a group with one strand per hair.
    pub fn to_group(&self) -> WispResult<StrandGroup> {
        validate_scene(self)?;
        StrandGroup::from_params(self.config()?, self.hair.iter().map(HairDescriptor::strand_params))
    }
}
