//! GPU-side rendering of the stage: lit instanced meshes plus billboard
//! text labels.

mod label_renderer;
mod lighting;
mod stage_renderer;

pub use label_renderer::LabelRenderer;
pub use lighting::{Lighting, LightingUniform};
pub use stage_renderer::StageRenderer;
