//! Instanced forward renderer for the stage meshes.
//!
//! Every mesh is uploaded once at startup; per-frame work is limited to
//! rebuilding the instance list (one model matrix per visible object or
//! pool nucleotide) and one draw call per mesh kind.

use std::ops::Range;

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::geometry::{Mesh, MeshVertex, StageGeometry};
use crate::gpu::texture::DEPTH_FORMAT;
use crate::gpu::{RenderContext, TypedBuffer};
use crate::stage::{Stage, StageId};

/// Per-instance data: a model matrix, column-major.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceRaw {
    model: [[f32; 4]; 4],
}

impl InstanceRaw {
    fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Mesh slots in upload and draw order.
const MESH_TEMPLATE: usize = 0;
const MESH_LEFT_STRAND: usize = 1;
const MESH_RIGHT_STRAND: usize = 2;
const MESH_PRIMER: usize = 3;
const MESH_POLYMERASE: usize = 4;
/// dNTP meshes occupy slots 5..9, indexed by `Base::index()`.
const MESH_DNTP_BASE: usize = 5;
const MESH_COUNT: usize = 9;

/// Renders every opaque mesh on the stage with one pipeline.
pub struct StageRenderer {
    pipeline: wgpu::RenderPipeline,
    meshes: [GpuMesh; MESH_COUNT],
    instances: TypedBuffer<InstanceRaw>,
    /// One (mesh slot, instance range) entry per draw, rebuilt each frame.
    draws: Vec<(usize, Range<u32>)>,
}

impl StageRenderer {
    /// Upload all stage meshes and build the mesh pipeline.
    pub fn new(
        context: &RenderContext,
        geometry: &StageGeometry,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/stage_mesh.wgsl"
        ));

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Stage Mesh Pipeline Layout"),
                bind_group_layouts: &[camera_layout, lighting_layout],
                push_constant_ranges: &[],
            });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Float32x3,
            ],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                3 => Float32x4,
                4 => Float32x4,
                5 => Float32x4,
                6 => Float32x4,
            ],
        };

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Stage Mesh Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout, instance_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    // Rod walls are visible from both sides.
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let meshes = [
            GpuMesh::upload(device, "Template Helix", &geometry.template),
            GpuMesh::upload(device, "Left Strand", &geometry.left_strand),
            GpuMesh::upload(device, "Right Strand", &geometry.right_strand),
            GpuMesh::upload(device, "Primer", &geometry.primer),
            GpuMesh::upload(device, "Polymerase", &geometry.polymerase),
            GpuMesh::upload(device, "dNTP A", &geometry.dntp[0]),
            GpuMesh::upload(device, "dNTP T", &geometry.dntp[1]),
            GpuMesh::upload(device, "dNTP C", &geometry.dntp[2]),
            GpuMesh::upload(device, "dNTP G", &geometry.dntp[3]),
        ];

        let instances = TypedBuffer::with_capacity(
            device,
            "Stage Instances",
            64,
            wgpu::BufferUsages::VERTEX,
        );

        Self {
            pipeline,
            meshes,
            instances,
            draws: Vec::new(),
        }
    }

    /// Rebuild the instance buffer from the stage's current state.
    pub fn update(&mut self, context: &RenderContext, stage: &Stage) {
        let spin = Mat4::from_rotation_y(stage.spin_angle);
        let mut raws: Vec<InstanceRaw> = Vec::new();
        self.draws.clear();

        let mut push_group =
            |mesh: usize,
             raws: &mut Vec<InstanceRaw>,
             draws: &mut Vec<(usize, Range<u32>)>,
             models: &mut dyn Iterator<Item = Mat4>| {
                let start = raws.len() as u32;
                for model in models {
                    raws.push(InstanceRaw::new(spin * model));
                }
                let end = raws.len() as u32;
                if end > start {
                    draws.push((mesh, start..end));
                }
            };

        for (mesh, id) in [
            (MESH_TEMPLATE, StageId::TemplateDna),
            (MESH_LEFT_STRAND, StageId::LeftStrand),
            (MESH_RIGHT_STRAND, StageId::RightStrand),
        ] {
            let obj = stage.object(id);
            let mut models = obj
                .visible
                .then(|| Mat4::from_translation(obj.position))
                .into_iter();
            push_group(mesh, &mut raws, &mut self.draws, &mut models);
        }

        for (mesh, ids) in [
            (
                MESH_PRIMER,
                [StageId::ForwardPrimer, StageId::ReversePrimer],
            ),
            (MESH_POLYMERASE, [StageId::PolymeraseA, StageId::PolymeraseB]),
        ] {
            let mut models = ids.into_iter().filter_map(|id| {
                let obj = stage.object(id);
                obj.visible.then(|| Mat4::from_translation(obj.position))
            });
            push_group(mesh, &mut raws, &mut self.draws, &mut models);
        }

        if stage.pool.visible {
            for base_index in 0..4 {
                let mut models = stage
                    .pool
                    .positions
                    .iter()
                    .zip(&stage.pool.kinds)
                    .filter(move |(_, kind)| kind.index() == base_index)
                    .map(|(p, _)| Mat4::from_translation(*p));
                push_group(
                    MESH_DNTP_BASE + base_index,
                    &mut raws,
                    &mut self.draws,
                    &mut models,
                );
            }
        }

        let _ = self
            .instances
            .write(&context.device, &context.queue, &raws);
    }

    /// Record the mesh draws. Camera and lighting bind groups must already
    /// be set at slots 0 and 1.
    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        if self.instances.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        for (mesh_index, range) in &self.draws {
            let mesh = &self.meshes[*mesh_index];
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(
                mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..mesh.index_count, 0, range.clone());
        }
    }
}
