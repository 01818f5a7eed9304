use crate::error::{PlayerError, PlayerResult};
use serde::Deserialize;
use std::path::Path;

/// Viewer settings. Every field has a default so a config file only needs to
/// name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub window_title: String,
    pub window_w: u32,
    pub window_h: u32,
    pub start_playing: bool,
    /// First trajectory point.
    pub origin: [f32; 3],
    /// Offset added to the last trajectory point on every step.
    pub step_delta: [f32; 3],
    /// RGBA, 0..1.
    pub trajectory_color: [f32; 4],
    /// Displayed width of the feature tracker panel; height follows the image aspect.
    pub image_panel_w: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            window_title: "Player".to_owned(),
            window_w: 1200,
            window_h: 720,
            start_playing: false,
            origin: [0.0, 0.0, 1.0],
            step_delta: [0.1, 0.1, 0.0],
            trajectory_color: [1.0, 0.25, 0.4, 1.0],
            image_panel_w: 240.0,
        }
    }
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> PlayerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PlayerError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| PlayerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
