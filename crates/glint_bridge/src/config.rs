//! Bridge configuration, loaded once at startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use glint_input::KeyboardPreload;

use crate::error::{BridgeError, BridgeResult};

/// Host-tunable bridge settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BridgeConfig {
    /// Frame rate the engine's delta-time prediction assumes.
    pub target_fps: u32,
    /// Display scale forwarded to the engine every frame.
    pub pixels_per_point: f32,
    /// Engine dylib path; unused when the engine is linked in.
    pub engine_path: Option<PathBuf>,
    /// What the on-screen keyboard buffer starts with when it opens.
    pub keyboard_preload: KeyboardPreload,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            pixels_per_point: 1.0,
            engine_path: None,
            keyboard_preload: KeyboardPreload::default(),
        }
    }
}

impl BridgeConfig {
    /// Loads and sanitizes a config from a TOML file.
    pub fn load_toml(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BridgeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Clamps out-of-range values back to something usable, logging each
    /// correction.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !(30..=120).contains(&self.target_fps) {
            tracing::warn!(target_fps = self.target_fps, "target-fps clamped to 30..=120");
            self.target_fps = self.target_fps.clamp(30, 120);
        }
        if !self.pixels_per_point.is_finite() || self.pixels_per_point <= 0.0 {
            tracing::warn!(
                pixels_per_point = self.pixels_per_point,
                "pixels-per-point reset to 1.0"
            );
            self.pixels_per_point = 1.0;
        }
        self
    }
}
