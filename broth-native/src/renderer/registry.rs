use wgpu::util::DeviceExt;

use crate::mesh::{MeshData, MeshKind};

use super::uniform::ModelUniform;

//
// ──────────────────────────────────────────────────────────────
//   MeshRecord
//
//   GPU handles for one primitive. The model uniform buffer is
//   per mesh because queue writes land before the pass runs; a
//   single shared buffer would leave every draw with the last
//   mesh's transform.
// ──────────────────────────────────────────────────────────────
//

pub struct MeshRecord
{
  pub kind: MeshKind,
  pub vertex_buffer: wgpu::Buffer,
  pub index_buffer: wgpu::Buffer,
  pub index_count: u32,

  pub model_buffer: wgpu::Buffer,
  pub model_bind_group: wgpu::BindGroup,
}

impl MeshRecord
{
  pub fn upload(device: &wgpu::Device, model_bgl: &wgpu::BindGroupLayout, kind: MeshKind, data: &MeshData) -> Self
  {
    let label = kind.label();
    let vertex_label = format!("{label} Vertex Buffer");
    let index_label = format!("{label} Index Buffer");
    let model_label = format!("{label} Model Buffer");
    let bind_group_label = format!("{label} Model BG");

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some(vertex_label.as_str()),
      contents: bytemuck::cast_slice(&data.vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some(index_label.as_str()),
      contents: bytemuck::cast_slice(&data.indices),
      usage: wgpu::BufferUsages::INDEX,
    });

    let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
      label: Some(model_label.as_str()),
      size: std::mem::size_of::<ModelUniform>() as u64,
      usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
      mapped_at_creation: false,
    });

    let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
      label: Some(bind_group_label.as_str()),
      layout: model_bgl,
      entries: &[wgpu::BindGroupEntry { binding: 0, resource: model_buffer.as_entire_binding() }],
    });

    Self { kind, vertex_buffer, index_buffer, index_count: data.index_count(), model_buffer, model_bind_group }
  }

  fn destroy(&self)
  {
    self.vertex_buffer.destroy();
    self.index_buffer.destroy();
    self.model_buffer.destroy();
  }
}

//
// ──────────────────────────────────────────────────────────────
//   MeshRegistry
//
//   Sole owner of the scene's mesh buffers. Built once at
//   startup, read-only while rendering, released at shutdown.
// ──────────────────────────────────────────────────────────────
//

pub struct MeshRegistry
{
  records: Vec<MeshRecord>,
}

impl MeshRegistry
{
  pub fn create(device: &wgpu::Device, model_bgl: &wgpu::BindGroupLayout) -> Self
  {
    let records = MeshKind::ALL
      .iter()
      .map(|&kind| {
        let data = kind.build();
        log::debug!("{}: {} vertices, {} indices", kind.label(), data.vertex_count(), data.index_count());
        MeshRecord::upload(device, model_bgl, kind, &data)
      })
      .collect();

    Self { records }
  }

  pub fn get(&self, kind: MeshKind) -> Option<&MeshRecord>
  {
    self.records.iter().find(|r| r.kind == kind)
  }

  pub fn release(&mut self)
  {
    for record in self.records.drain(..)
    {
      record.destroy();
    }
  }
}
