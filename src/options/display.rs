use serde::{Deserialize, Serialize};

/// Display toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Whether billboard text labels are drawn at all.
    pub show_labels: bool,
    /// Whether the whole stage slowly spins while playing.
    pub auto_spin: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_labels: true,
            auto_spin: true,
        }
    }
}
