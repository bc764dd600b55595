use glam::{Quat, Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform};
use crate::gpu::RenderContext;
use crate::options::CameraOptions;

/// Quaternion orbit controller around the stage center, owning the camera
/// uniform buffer and its bind group (group 0 in every pipeline).
pub struct CameraController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    /// The camera being controlled.
    pub camera: Camera,
    /// CPU copy of the GPU uniform.
    pub uniform: CameraUniform,
    /// Uniform buffer uploaded each frame.
    pub buffer: wgpu::Buffer,
    /// Bind group layout shared by all pipelines.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group bound at slot 0.
    pub bind_group: wgpu::BindGroup,

    /// Whether the left mouse button is held (drag = orbit).
    pub mouse_pressed: bool,
    /// Whether shift is held (drag = pan).
    pub shift_pressed: bool,
    initial_distance: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl CameraController {
    /// Create the controller looking at the origin from `options`'
    /// initial distance down +Z.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let focus_point = Vec3::ZERO;
        let distance = options.initial_distance;
        let orientation = Quat::IDENTITY;

        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect: context.config.width as f32 / context.config.height as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
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
                    label: Some("Camera Bind Group"),
                });

        Self {
            orientation,
            distance,
            focus_point,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
            mouse_pressed: false,
            shift_pressed: false,
            initial_distance: options.initial_distance,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
        }
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Upload the current camera state to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Track a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height as f32;
    }

    /// Orbit by a mouse-drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        let up = self.orientation * Vec3::Y;
        let horizontal =
            Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        let right = self.orientation * Vec3::X;
        let vertical =
            Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = vertical * self.orientation;

        self.update_camera_pos();
    }

    /// Pan the focus point by a mouse-drag delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;

        let translation = right * (-delta.x * self.pan_speed)
            + up * (delta.y * self.pan_speed);

        self.focus_point += translation;
        self.update_camera_pos();
    }

    /// Zoom by a scroll delta.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(5.0, 200.0);
        self.update_camera_pos();
    }

    /// Snap back to the initial framing of the stage.
    pub fn reset_view(&mut self) {
        self.orientation = Quat::IDENTITY;
        self.distance = self.initial_distance;
        self.focus_point = Vec3::ZERO;
        self.update_camera_pos();
    }
}
