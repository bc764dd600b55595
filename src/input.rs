//! Engine-level input actions.

use serde::{Deserialize, Serialize};

/// Actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_playback = "Space"
/// restart = "KeyR"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Flip the animation clock's play/pause flag.
    TogglePlayback,
    /// Rewind to cycle 1, denaturation, progress 0, and resume playing.
    Restart,
    /// Reset the orbit camera to its initial view.
    RecenterCamera,
    /// Show/hide all billboard labels.
    ToggleLabels,
    /// Enable/disable the slow stage spin.
    ToggleSpin,
}
