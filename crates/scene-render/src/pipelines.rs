use super::helpers::{self, PipelineParams};
use glam::Mat4;
use scene_core::{BlendMode, DrawItem, Topology, Vertex};

/// Per-draw uniforms; one slot per draw item, selected by dynamic offset.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    pub(crate) model_view: [[f32; 4]; 4],
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) tint: [f32; 4],
    // x: particle size in world units
    pub(crate) params: [f32; 4],
}

impl ObjectUniforms {
    pub(crate) fn new(view: Mat4, projection: Mat4, item: &DrawItem, point_size: f32) -> Self {
        Self {
            model_view: (view * item.model).to_cols_array_2d(),
            proj: projection.to_cols_array_2d(),
            tint: item.color.to_array(),
            params: [point_size, 0.0, 0.0, 0.0],
        }
    }
}

const MESH_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const CORNER_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const PARTICLE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32x3];

/// Two triangles covering [-1, 1]², expanded per particle in the shader.
pub(crate) const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// One pipeline per (topology, blend mode) pair.
pub(crate) struct ScenePipelines {
    pub(crate) object_bgl: wgpu::BindGroupLayout,
    pipelines: [[wgpu::RenderPipeline; 2]; 3],
}

impl ScenePipelines {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::SCENE_WGSL.into()),
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ObjectUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&object_bgl],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRS,
        }];
        let point_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &CORNER_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &PARTICLE_ATTRS,
            },
        ];

        let make = |topology: Topology, blend: BlendMode| {
            let (label, vs_entry, buffers, prim) = match topology {
                Topology::Triangles => (
                    "triangles",
                    "vs_mesh",
                    &mesh_buffers[..],
                    wgpu::PrimitiveTopology::TriangleList,
                ),
                Topology::Lines => (
                    "lines",
                    "vs_mesh",
                    &mesh_buffers[..],
                    wgpu::PrimitiveTopology::LineList,
                ),
                Topology::Points => (
                    "points",
                    "vs_points",
                    &point_buffers[..],
                    wgpu::PrimitiveTopology::TriangleList,
                ),
            };
            let (blend, depth_write) = match blend {
                BlendMode::Alpha => (wgpu::BlendState::ALPHA_BLENDING, true),
                BlendMode::Additive => (ADDITIVE, false),
            };
            helpers::make_scene_pipeline(
                device,
                &layout,
                &shader,
                color_format,
                PipelineParams {
                    label,
                    vs_entry,
                    buffers,
                    topology: prim,
                    blend,
                    depth_write,
                },
            )
        };

        let pair = |topology| [make(topology, BlendMode::Alpha), make(topology, BlendMode::Additive)];
        Self {
            pipelines: [
                pair(Topology::Triangles),
                pair(Topology::Lines),
                pair(Topology::Points),
            ],
            object_bgl,
        }
    }

    pub(crate) fn get(&self, topology: Topology, blend: BlendMode) -> &wgpu::RenderPipeline {
        let t = match topology {
            Topology::Triangles => 0,
            Topology::Lines => 1,
            Topology::Points => 2,
        };
        let b = match blend {
            BlendMode::Alpha => 0,
            BlendMode::Additive => 1,
        };
        &self.pipelines[t][b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn uniform_size_matches_shader_struct() {
        // mat4 + mat4 + vec4 + vec4
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 160);
    }

    #[test]
    fn uniforms_fold_model_into_view() {
        let item = DrawItem {
            mesh: 0,
            model: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            color: Vec4::new(0.5, 0.25, 1.0, 0.8),
            blend: BlendMode::Additive,
        };
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let u = ObjectUniforms::new(view, Mat4::IDENTITY, &item, 0.02);
        assert_eq!(u.model_view[3], [1.0, 2.0, -2.0, 1.0]);
        assert_eq!(u.tint, [0.5, 0.25, 1.0, 0.8]);
        assert_eq!(u.params[0], 0.02);
    }
}
