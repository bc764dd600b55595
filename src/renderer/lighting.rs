use wgpu::util::DeviceExt;

use crate::gpu::RenderContext;
use crate::options::LightingOptions;

/// Lighting configuration shared across all shaders
/// NOTE: Must match WGSL struct layout exactly (64 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Key light direction (normalized)
    pub key_dir: [f32; 3],
    pub _pad1: f32,
    /// Fill light direction (normalized)
    pub fill_dir: [f32; 3],
    pub _pad2: f32,
    /// Key light intensity
    pub key_intensity: f32,
    /// Fill light intensity
    pub fill_intensity: f32,
    /// Ambient light intensity
    pub ambient: f32,
    /// Specular intensity
    pub specular_intensity: f32,
    /// Specular shininess exponent
    pub shininess: f32,
    pub _pad3: [f32; 3],
}

impl LightingUniform {
    /// Build the uniform from user options.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            // Key light: upper-front-left for directional contrast.
            key_dir: normalize([-0.4, 0.8, 0.4]),
            _pad1: 0.0,
            // Fill light: upper-right-front.
            fill_dir: normalize([0.3, 0.5, 0.6]),
            _pad2: 0.0,
            key_intensity: options.key_intensity,
            fill_intensity: options.fill_intensity,
            ambient: options.ambient,
            specular_intensity: options.specular_intensity,
            shininess: options.shininess,
            _pad3: [0.0; 3],
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}

/// GPU-resident lighting state bound at group 1.
pub struct Lighting {
    /// CPU copy of the uniform.
    pub uniform: LightingUniform,
    /// Uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (fragment-visible uniform).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group bound at slot 1.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Create lighting resources from options.
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from_options(options);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Lighting Bind Group"),
                });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload the current uniform to the GPU.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Update light directions to follow the camera (headlamp mode), so the
    /// stage stays lit from the viewer's side as it spins.
    pub fn update_headlamp(
        &mut self,
        camera_right: glam::Vec3,
        camera_up: glam::Vec3,
        camera_forward: glam::Vec3,
    ) {
        let key_camera = glam::Vec3::new(-0.4, 0.8, -0.4).normalize();
        let key_world = camera_right * key_camera.x
            + camera_up * key_camera.y
            + camera_forward * key_camera.z;
        self.uniform.key_dir = key_world.normalize().to_array();

        let fill_camera = glam::Vec3::new(0.3, 0.5, -0.6).normalize();
        let fill_world = camera_right * fill_camera.x
            + camera_up * fill_camera.y
            + camera_forward * fill_camera.z;
        self.uniform.fill_dir = fill_world.normalize().to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_is_64_bytes() {
        assert_eq!(std::mem::size_of::<LightingUniform>(), 64);
    }

    #[test]
    fn test_directions_are_normalized() {
        let uniform = LightingUniform::from_options(&LightingOptions::default());
        for dir in [uniform.key_dir, uniform.fill_dir] {
            let len =
                (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }
}
