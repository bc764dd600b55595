//! Billboard text labels rendered from CPU-rasterized glyph textures.
//!
//! Label texts are fixed for the lifetime of the stage, so each one is
//! rasterized once at startup with the 8x8 bitmap font and uploaded as a
//! small RGBA texture. Per frame only the anchor positions change. Quads
//! are expanded toward the camera in the vertex shader and drawn without
//! depth testing so labels stay readable in front of the meshes.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::gpu::{RenderContext, TypedBuffer};
use crate::stage::Stage;

/// World-space height of a label quad.
const LABEL_HEIGHT: f32 = 1.4;
/// World-space width of one glyph cell.
const GLYPH_WIDTH: f32 = 0.8;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadVertex {
    corner: [f32; 2],
    uv: [f32; 2],
}

/// Triangle-strip unit quad; uv origin at the texture's top-left.
const QUAD: [QuadVertex; 4] = [
    QuadVertex {
        corner: [-0.5, -0.5],
        uv: [0.0, 1.0],
    },
    QuadVertex {
        corner: [0.5, -0.5],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        corner: [-0.5, 0.5],
        uv: [0.0, 0.0],
    },
    QuadVertex {
        corner: [0.5, 0.5],
        uv: [1.0, 0.0],
    },
];

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct LabelRaw {
    anchor: [f32; 3],
    size: [f32; 2],
}

/// Rasterize `text` into RGBA pixels, 8 px tall, 8 px per glyph.
fn rasterize(text: &str) -> (Vec<u8>, u32) {
    let width = (text.chars().count() * 8) as u32;
    let mut pixels = vec![0u8; (width * 8 * 4) as usize];
    for (ci, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        for (y, row) in glyph.iter().enumerate() {
            for x in 0..8usize {
                if row & (1 << x) == 0 {
                    continue;
                }
                let px = ci * 8 + x;
                let offset = (y * width as usize + px) * 4;
                pixels[offset..offset + 4].copy_from_slice(&[255; 4]);
            }
        }
    }
    (pixels, width)
}

/// Renders every visible label as a camera-facing textured quad.
pub struct LabelRenderer {
    pipeline: wgpu::RenderPipeline,
    quad: wgpu::Buffer,
    instances: TypedBuffer<LabelRaw>,
    /// Texture bind group per label slot, in `Stage::LABEL_TEXTS` order.
    text_bind_groups: Vec<wgpu::BindGroup>,
    /// Slot of each written instance, parallel to the instance buffer.
    visible_slots: Vec<usize>,
    /// Glyph count per slot, for quad sizing.
    char_counts: Vec<usize>,
}

impl LabelRenderer {
    /// Rasterize all label textures and build the billboard pipeline.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/label.wgsl"
        ));

        let texture_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Label Texture Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float {
                                filterable: true,
                            },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Filtering,
                        ),
                        count: None,
                    },
                ],
            },
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Label Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let mut text_bind_groups = Vec::new();
        let mut char_counts = Vec::new();
        for text in Stage::LABEL_TEXTS {
            let (pixels, width) = rasterize(text);
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Label Texture"),
                size: wgpu::Extent3d {
                    width,
                    height: 8,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            context.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(width * 4),
                    rows_per_image: Some(8),
                },
                wgpu::Extent3d {
                    width,
                    height: 8,
                    depth_or_array_layers: 1,
                },
            );
            let view =
                texture.create_view(&wgpu::TextureViewDescriptor::default());
            text_bind_groups.push(device.create_bind_group(
                &wgpu::BindGroupDescriptor {
                    label: Some("Label Texture Bind Group"),
                    layout: &texture_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                &view,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(
                                &sampler,
                            ),
                        },
                    ],
                },
            ));
            char_counts.push(text.chars().count());
        }

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Label Pipeline Layout"),
                bind_group_layouts: &[camera_layout, &texture_layout],
                push_constant_ranges: &[],
            });

        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x2,
                1 => Float32x2,
            ],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LabelRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                2 => Float32x3,
                3 => Float32x2,
            ],
        };

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Label Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[quad_layout, instance_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    ..Default::default()
                },
                // Labels draw in their own pass, always on top.
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let quad =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Label Quad"),
                contents: bytemuck::cast_slice(&QUAD),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let instances = TypedBuffer::with_capacity(
            device,
            "Label Instances",
            Stage::LABEL_TEXTS.len(),
            wgpu::BufferUsages::VERTEX,
        );

        Self {
            pipeline,
            quad,
            instances,
            text_bind_groups,
            visible_slots: Vec::new(),
            char_counts,
        }
    }

    /// Rebuild the instance buffer from the stage's visible labels,
    /// carrying anchors through the turntable rotation.
    pub fn update(&mut self, context: &RenderContext, stage: &Stage) {
        let spin = Mat4::from_rotation_y(stage.spin_angle);
        let mut raws = Vec::new();
        self.visible_slots.clear();
        for label in stage.visible_labels() {
            let anchor = spin.transform_point3(label.position);
            raws.push(LabelRaw {
                anchor: anchor.to_array(),
                size: [
                    self.char_counts[label.slot] as f32 * GLYPH_WIDTH,
                    LABEL_HEIGHT,
                ],
            });
            self.visible_slots.push(label.slot);
        }
        let _ = self
            .instances
            .write(&context.device, &context.queue, &raws);
    }

    /// Record the label draws. The camera bind group must already be set
    /// at slot 0.
    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        if self.visible_slots.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        for (i, slot) in self.visible_slots.iter().enumerate() {
            pass.set_bind_group(1, &self.text_bind_groups[*slot], &[]);
            let instance = i as u32;
            pass.draw(0..4, instance..instance + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_width_matches_text() {
        let (pixels, width) = rasterize("DNA");
        assert_eq!(width, 24);
        assert_eq!(pixels.len(), 24 * 8 * 4);
    }

    #[test]
    fn test_rasterize_produces_opaque_glyph_pixels() {
        let (pixels, _) = rasterize("A");
        let opaque = pixels.chunks_exact(4).filter(|p| p[3] == 255).count();
        assert!(opaque > 0);
        assert!(opaque < 64);
    }

    #[test]
    fn test_rasterize_blank_for_space() {
        let (pixels, _) = rasterize(" ");
        assert!(pixels.iter().all(|&b| b == 0));
    }
}
