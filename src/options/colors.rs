use serde::{Deserialize, Serialize};

/// Color palette for the stage. Values are linear RGB in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Backbone color of the first (sense) strand.
    pub strand_a_backbone: [f32; 3],
    /// Backbone color of the second (antisense) strand.
    pub strand_b_backbone: [f32; 3],
    /// Adenine base color.
    pub adenine: [f32; 3],
    /// Thymine base color.
    pub thymine: [f32; 3],
    /// Cytosine base color.
    pub cytosine: [f32; 3],
    /// Guanine base color.
    pub guanine: [f32; 3],
    /// Primer backbone and nucleotide color.
    pub primer: [f32; 3],
    /// Polymerase enzyme body color.
    pub polymerase: [f32; 3],
    /// Polymerase active-site cavity color.
    pub active_site: [f32; 3],
    /// Base-pair rung and phosphate group color.
    pub rung: [f32; 3],
    /// Scene clear color.
    pub background: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        // Flat-UI palette.
        Self {
            strand_a_backbone: [0.20, 0.60, 0.86],
            strand_b_backbone: [0.91, 0.30, 0.24],
            adenine: [0.18, 0.80, 0.44],
            thymine: [0.95, 0.77, 0.06],
            cytosine: [0.61, 0.35, 0.71],
            guanine: [0.90, 0.49, 0.13],
            primer: [0.10, 0.74, 0.61],
            polymerase: [0.93, 0.94, 0.95],
            active_site: [0.85, 0.1, 0.1],
            rung: [0.9, 0.9, 0.9],
            background: [0.07, 0.07, 0.07],
        }
    }
}
