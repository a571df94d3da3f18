//! Scene validation.
//!
//! Catches data-level errors before a group is built, with messages that
//! name the offending hair.

use wisp_types::{WispError, WispResult};

use crate::scene::Scene;

/// Validates a complete scene.
///
/// Checks:
/// - At least one hair
/// - Each hair's geometry and physical constants
/// - All hairs agree on the physical constants (one group config)
/// - Frame settings yield a valid sub-step
pub fn validate_scene(scene: &Scene) -> WispResult<()> {
    let Some(first) = scene.hair.first() else {
        return Err(WispError::InvalidConfig("scene has no hair".into()));
    };
    let shared = first.config(scene.forces);

    for (i, hair) in scene.hair.iter().enumerate() {
        hair.strand_params()
            .validate()
            .map_err(|e| for_hair(i, e))?;

        let config = hair.config(scene.forces);
        config.validate().map_err(|e| for_hair(i, e))?;
        if config != shared {
            return Err(WispError::InvalidConfig(format!(
                "hair {i}: physical constants differ from hair 0"
            )));
        }
    }

    scene.frame.timing()?;
    if !scene.frame.gravity.is_finite() {
        return Err(WispError::InvalidConfig(
            "gravity must be finite".into(),
        ));
    }

    Ok(())
}

/// Prefixes the error's message with the hair index, keeping its variant.
fn for_hair(index: usize, err: WispError) -> WispError {
    match err {
        WispError::InvalidStrand(msg) => WispError::InvalidStrand(format!("hair {index}: {msg}")),
        WispError::InvalidConfig(msg) => WispError::InvalidConfig(format!("hair {index}: {msg}")),
        other => other,
    }
}
