//! wgpu implementation of the animator's `RenderSurface`.
//!
//! Works with any `wgpu::Surface`: the web front-end creates one from a
//! canvas, the native viewer from a winit window.

use scene_core::{Frame, MeshData, RenderSurface, SceneError, SurfaceSetup, Topology, Viewport};
use wgpu::util::DeviceExt;

mod context;
mod helpers;
mod pipelines;
mod targets;

pub use context::GpuContext;
use pipelines::{ObjectUniforms, ScenePipelines, QUAD_CORNERS};
use targets::RenderTargets;

pub(crate) const SAMPLE_COUNT: u32 = 4;
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

struct GpuMesh {
    topology: Topology,
    vertices: wgpu::Buffer,
    indices: Option<wgpu::Buffer>,
    /// Index count, or instance count for particle fields.
    count: u32,
    point_size: f32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let (indices, count) = match mesh.topology {
            // particles are drawn instanced straight from the vertex buffer
            Topology::Points => (None, mesh.vertices.len() as u32),
            Topology::Triangles | Topology::Lines => {
                let buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_indices"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                (Some(buf), mesh.index_count())
            }
        };
        Self {
            topology: mesh.topology,
            vertices,
            indices,
            count,
            point_size: mesh.point_size,
        }
    }

    fn destroy(&self) {
        self.vertices.destroy();
        if let Some(i) = &self.indices {
            i.destroy();
        }
    }
}

/// Uniform buffer holding one `ObjectUniforms` slot per draw item.
struct UniformSlots {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: usize,
    staging: Vec<u8>,
}

impl UniformSlots {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: usize) -> Self {
        let stride = helpers::align_to(
            std::mem::size_of::<ObjectUniforms>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let capacity = capacity.max(1);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_uniforms"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
                }),
            }],
        });
        Self {
            buffer,
            bind_group,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    fn ensure_capacity(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        count: usize,
    ) {
        if count > self.capacity {
            log::debug!("[gpu] growing uniform slots {} -> {}", self.capacity, count);
            self.buffer.destroy();
            *self = Self::new(device, layout, count);
        }
    }

    fn write(&mut self, queue: &wgpu::Queue, slots: impl ExactSizeIterator<Item = ObjectUniforms>) {
        let stride = self.stride as usize;
        self.staging.clear();
        self.staging.resize(stride * slots.len(), 0);
        for (i, u) in slots.enumerate() {
            let bytes = bytemuck::bytes_of(&u);
            self.staging[i * stride..i * stride + bytes.len()].copy_from_slice(bytes);
        }
        if !self.staging.is_empty() {
            queue.write_buffer(&self.buffer, 0, &self.staging);
        }
    }

    fn offset(&self, slot: usize) -> wgpu::DynamicOffset {
        (slot as u64 * self.stride) as wgpu::DynamicOffset
    }
}

pub struct GpuState<'w> {
    ctx: GpuContext<'w>,
    pipelines: ScenePipelines,
    targets: RenderTargets,
    meshes: Vec<GpuMesh>,
    corners: wgpu::Buffer,
    uniforms: UniformSlots,
    released: bool,
}

impl<'w> GpuState<'w> {
    /// Upload the scene's meshes and build pipelines and render targets.
    pub fn new(ctx: GpuContext<'w>, setup: &SurfaceSetup<'_>) -> Self {
        let device = &ctx.device;
        let pipelines = ScenePipelines::new(device, ctx.format());
        let targets = RenderTargets::new(
            device,
            ctx.format(),
            ctx.config.width,
            ctx.config.height,
        );
        let meshes = setup
            .meshes
            .iter()
            .map(|m| GpuMesh::upload(device, m))
            .collect();
        let corners = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_corners"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniforms = UniformSlots::new(device, &pipelines.object_bgl, setup.object_count);
        if setup.viewport.width != ctx.config.width || setup.viewport.height != ctx.config.height {
            log::warn!(
                "[gpu] surface configured at {}x{}, scene expects {}x{}",
                ctx.config.width,
                ctx.config.height,
                setup.viewport.width,
                setup.viewport.height
            );
        }
        Self {
            ctx,
            pipelines,
            targets,
            meshes,
            corners,
            uniforms,
            released: false,
        }
    }

    fn acquire(&self) -> Result<wgpu::SurfaceTexture, SceneError> {
        match self.ctx.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                self.ctx.reconfigure();
                Err(SceneError::Frame(format!("{e}; surface reconfigured")))
            }
            Err(e) => Err(SceneError::Frame(e.to_string())),
        }
    }
}

impl RenderSurface for GpuState<'_> {
    fn resize(&mut self, viewport: Viewport) {
        if self.released || viewport.is_empty() {
            return;
        }
        let (width, height) = self.ctx.fit_size(viewport.width, viewport.height);
        if self.targets.recreate(&self.ctx.device, width, height) {
            self.ctx.resize(width, height);
        }
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), SceneError> {
        if self.released {
            return Ok(());
        }
        let output = self.acquire()?;

        self.uniforms.ensure_capacity(
            &self.ctx.device,
            &self.pipelines.object_bgl,
            frame.items.len(),
        );
        let meshes = &self.meshes;
        self.uniforms.write(
            &self.ctx.queue,
            frame.items.iter().map(|item| {
                let point_size = meshes.get(item.mesh).map_or(0.0, |m| m.point_size);
                ObjectUniforms::new(frame.view, frame.projection, item, point_size)
            }),
        );

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b, a] = frame.clear_color.map(f64::from);
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for (slot, item) in frame.items.iter().enumerate() {
                let Some(mesh) = self.meshes.get(item.mesh) else {
                    continue;
                };
                if mesh.count == 0 {
                    continue;
                }
                rpass.set_pipeline(self.pipelines.get(mesh.topology, item.blend));
                rpass.set_bind_group(0, &self.uniforms.bind_group, &[self.uniforms.offset(slot)]);
                match &mesh.indices {
                    None => {
                        rpass.set_vertex_buffer(0, self.corners.slice(..));
                        rpass.set_vertex_buffer(1, mesh.vertices.slice(..));
                        rpass.draw(0..QUAD_CORNERS.len() as u32, 0..mesh.count);
                    }
                    Some(indices) => {
                        rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                        rpass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        rpass.draw_indexed(0..mesh.count, 0, 0..1);
                    }
                }
            }
        }
        self.ctx.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        if std::mem::replace(&mut self.released, true) {
            return;
        }
        for mesh in &self.meshes {
            mesh.destroy();
        }
        self.meshes.clear();
        self.corners.destroy();
        self.uniforms.buffer.destroy();
        self.targets.destroy();
        log::info!("[gpu] resources released");
    }
}
