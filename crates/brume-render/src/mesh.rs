use brume_core::PackedVertex;
use glam::IVec3;
use wgpu::util::DeviceExt;

use crate::uniforms::ChunkOffsetUniform;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Uint32];

/// Vertex buffer layout of the packed vertex: one u32 per vertex.
pub const fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PackedVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// GPU buffers for one chunk's mesh plus its per-draw origin uniform.
/// All buffers are created once at upload time; the origin is constant
/// across every vertex of the draw.
pub struct ChunkMesh {
    origin: IVec3,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    offset_bind_group: wgpu::BindGroup,
}

impl ChunkMesh {
    pub fn new(
        device: &wgpu::Device,
        offset_layout: &wgpu::BindGroupLayout,
        origin: IVec3,
        vertices: &[PackedVertex],
        indices: &[u16],
    ) -> Self {
        debug_assert!(vertices.len() % 4 == 0, "meshes are emitted quad by quad");
        debug_assert!(indices.len() % 6 == 0, "six indices per quad");

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk-vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk-indices"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let offset_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk-offset"),
            contents: bytemuck::bytes_of(&ChunkOffsetUniform::new(origin)),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let offset_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("chunk-offset-bg"),
            layout: offset_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: offset_buffer.as_entire_binding(),
            }],
        });

        Self {
            origin,
            vertices: vertex_buffer,
            indices: index_buffer,
            index_count: indices.len() as u32,
            offset_bind_group,
        }
    }

    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    /// Record this chunk's draw: per-draw bind group, buffers, indexed draw.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(2, &self.offset_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
