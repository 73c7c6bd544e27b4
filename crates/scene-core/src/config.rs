//! Tunable scene parameters.
//!
//! Every field has a default matching [`crate::constants`], so an empty JSON
//! object (or no config at all) reproduces the stock scene. The web front-end
//! reads an optional `<script type="application/json" id="scene-config">`
//! block and feeds it to [`SceneConfig::from_json`].

use crate::color::Rgb;
use crate::constants::*;
use crate::error::{Result, SceneError};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Initial material colour as `#rrggbb`.
    pub material_color: String,
    pub object_distance: f32,
    pub particle_count: usize,
    pub particle_size: f32,
    /// Seed for the particle layout; `None` draws from entropy.
    pub particle_seed: Option<u64>,
    pub gradient_url: String,
    /// Step count of the procedural toon ramp used when the image is unavailable.
    pub gradient_steps: u32,
    /// Move the camera down as the page scrolls.
    pub camera_follows_scroll: bool,
    pub max_pixel_ratio: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            material_color: DEFAULT_MATERIAL_COLOR.to_string(),
            object_distance: OBJECT_DISTANCE,
            particle_count: PARTICLE_COUNT,
            particle_size: PARTICLE_SIZE,
            particle_seed: None,
            gradient_url: DEFAULT_GRADIENT_URL.to_string(),
            gradient_steps: DEFAULT_GRADIENT_STEPS,
            camera_follows_scroll: true,
            max_pixel_ratio: MAX_PIXEL_RATIO,
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: SceneConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        Rgb::parse_hex(&self.material_color)?;
        if !(self.object_distance > 0.0) {
            return Err(SceneError::OutOfRange {
                field: "object_distance",
                reason: "must be positive",
            });
        }
        if !(self.particle_size > 0.0) {
            return Err(SceneError::OutOfRange {
                field: "particle_size",
                reason: "must be positive",
            });
        }
        if self.gradient_steps < 2 {
            return Err(SceneError::OutOfRange {
                field: "gradient_steps",
                reason: "need at least two steps",
            });
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(SceneError::OutOfRange {
                field: "max_pixel_ratio",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    pub fn material_rgb(&self) -> Result<Rgb> {
        Rgb::parse_hex(&self.material_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = SceneConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SceneConfig::default());
        assert_eq!(cfg.particle_count, 200);
        assert!(cfg.camera_follows_scroll);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg =
            SceneConfig::from_json(r##"{"material_color":"#336699","particle_seed":7}"##).unwrap();
        assert_eq!(cfg.material_color, "#336699");
        assert_eq!(cfg.particle_seed, Some(7));
        assert_eq!(cfg.object_distance, OBJECT_DISTANCE);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SceneConfig::from_json(r##"{"colour":"#fff"}"##).unwrap_err();
        assert!(matches!(err, SceneError::Config(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            SceneConfig::from_json(r#"{"material_color":"pink"}"#),
            Err(SceneError::InvalidColor(_))
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{"object_distance":0.0}"#),
            Err(SceneError::OutOfRange { field: "object_distance", .. })
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{"gradient_steps":1}"#),
            Err(SceneError::OutOfRange { field: "gradient_steps", .. })
        ));
    }
}
