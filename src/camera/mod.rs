//! Orbit camera: core projection math plus the GPU-backed controller.

mod controller;
mod core;

pub use controller::CameraController;
pub use core::{Camera, CameraUniform};
