//! Centralized rendering/display options with TOML preset support.
//!
//! All tweakable settings (display toggles, lighting, camera, colors,
//! keybindings) are consolidated here and serialize to/from TOML. The PCR
//! timing constants (step duration, cycle count, temperatures) are
//! deliberately *not* options; the animation models a fixed protocol.

mod camera;
mod colors;
mod display;
mod keybindings;
mod lighting;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
use serde::{Deserialize, Serialize};

use crate::error::PcrVizError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Display toggles.
    pub display: DisplayOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Color palette options.
    pub colors: ColorOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PcrVizError`] on I/O or TOML parse failure.
    pub fn load(path: &Path) -> Result<Self, PcrVizError> {
        let content = std::fs::read_to_string(path).map_err(PcrVizError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| PcrVizError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`PcrVizError`] on I/O or TOML serialization failure.
    pub fn save(&self, path: &Path) -> Result<(), PcrVizError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PcrVizError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PcrVizError::Io)?;
        }
        std::fs::write(path, content).map_err(PcrVizError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r"
[lighting]
shininess = 80.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.lighting.shininess, 80.0);
        // Everything else should be default
        assert_eq!(opts.lighting.ambient, LightingOptions::default().ambient);
        assert!(opts.display.show_labels);
    }

    #[test]
    fn test_keybinding_lookup() {
        use crate::input::KeyAction;
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(KeyAction::TogglePlayback)
        );
        assert_eq!(opts.keybindings.lookup("KeyR"), Some(KeyAction::Restart));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }
}
