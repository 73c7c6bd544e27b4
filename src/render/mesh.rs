use super::helpers;
use bytemuck::{Pod, Zeroable};
use scene_core::{MeshData, MeshVertex, SectionMesh};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct ModelUniform {
    pub(crate) model: [[f32; 4]; 4],
}

const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

pub(crate) const MESH_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<MeshVertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &MESH_ATTRIBUTES,
};

/// GPU buffers for one section mesh plus its per-object transform.
pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub(crate) fn upload(
        device: &wgpu::Device,
        model_layout: &wgpu::BindGroupLayout,
        label: &str,
        data: &MeshData,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let model_buffer = helpers::uniform_buffer::<ModelUniform>(device, label);
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            model_buffer,
            model_bind_group,
        }
    }

    pub(crate) fn write_transform(&self, queue: &wgpu::Queue, mesh: &SectionMesh) {
        let u = ModelUniform {
            model: mesh.model_matrix().to_cols_array_2d(),
        };
        queue.write_buffer(&self.model_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn draw<'p>(&self, pass: &mut wgpu::RenderPass<'p>) {
        pass.set_bind_group(1, &self.model_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
