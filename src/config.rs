use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_FAR, DEFAULT_FOV, DEFAULT_NEAR};
use crate::controls::LOOK_SENSITIVITY;
use crate::math::Color;

/// Tunables for the cube demo, loadable from JSON
///
/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the cube along +Z
    pub camera_distance: f32,
    pub cube_size: f32,
    /// Packed `0xRRGGBB`
    pub clear_color: u32,
    pub antialias: bool,
    /// Radians per pixel of mouse movement
    pub look_sensitivity: f32,
    /// Units per second for keyboard movement
    pub move_speed: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            camera_distance: 1.0,
            cube_size: 0.2,
            clear_color: 0x202020,
            antialias: true,
            look_sensitivity: LOOK_SENSITIVITY,
            move_speed: 1.0,
        }
    }
}

impl DemoConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse demo config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn clear_color(&self) -> Color {
        Color::from_hex(self.clear_color)
    }
}
