use serde::{Deserialize, Serialize};

/// Lighting parameters fed into the shared lighting uniform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingOptions {
    /// Primary (key) light intensity.
    pub key_intensity: f32,
    /// Secondary (fill) light intensity.
    pub fill_intensity: f32,
    /// Ambient light intensity.
    pub ambient: f32,
    /// Specular highlight intensity.
    pub specular_intensity: f32,
    /// Specular shininess exponent.
    pub shininess: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            key_intensity: 0.9,
            fill_intensity: 0.35,
            ambient: 0.45,
            specular_intensity: 0.3,
            shininess: 30.0,
        }
    }
}
