//! Thin wgpu plumbing: context ownership, growable buffers, depth target.

pub mod dynamic_buffer;
pub mod render_context;
pub mod texture;

pub use dynamic_buffer::TypedBuffer;
pub use render_context::{RenderContext, RenderContextError};
pub use texture::DepthTarget;
