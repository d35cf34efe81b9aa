use std::mem::{offset_of, size_of};

use crate::error::StartupError;
use crate::mesh::Vertex;

use super::depth::DEPTH_FORMAT;
use super::uniform::{FrameUniform, ModelUniform};

//
// ──────────────────────────────────────────────────────────────
//   Vertex layout (offsets from the struct, not hand-counted)
// ──────────────────────────────────────────────────────────────
//

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
  wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x3,
    offset: offset_of!(Vertex, position) as u64,
    shader_location: 0,
  },
  wgpu::VertexAttribute {
    format: wgpu::VertexFormat::Float32x4,
    offset: offset_of!(Vertex, color) as u64,
    shader_location: 1,
  },
  wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x2, offset: offset_of!(Vertex, uv) as u64, shader_location: 2 },
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static>
{
  wgpu::VertexBufferLayout {
    array_stride: size_of::<Vertex>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &VERTEX_ATTRIBUTES,
  }
}

//
// ──────────────────────────────────────────────────────────────
//   ScenePipeline
//
//   The one program every mesh is drawn with:
//     group(0) frame uniforms   (view, projection, light)
//     group(1) model uniform    (per mesh)
//     group(2) texture + sampler
// ──────────────────────────────────────────────────────────────
//

pub struct ScenePipeline
{
  pub pipeline: wgpu::RenderPipeline,
  pub frame_bgl: wgpu::BindGroupLayout,
  pub model_bgl: wgpu::BindGroupLayout,
  pub texture_bgl: wgpu::BindGroupLayout,
}

impl ScenePipeline
{
  pub fn create(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Result<Self, StartupError>
  {
    let frame_bgl = uniform_layout(device, "Frame BGL", wgpu::ShaderStages::VERTEX_FRAGMENT, size_of::<FrameUniform>());
    let model_bgl = uniform_layout(device, "Model BGL", wgpu::ShaderStages::VERTEX, size_of::<ModelUniform>());
    let texture_bgl = texture_layout(device);

    let shader = compile_shader(device)?;
    let pipeline = link_pipeline(device, color_format, &shader, &[&frame_bgl, &model_bgl, &texture_bgl])?;

    Ok(Self { pipeline, frame_bgl, model_bgl, texture_bgl })
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Compile / link
//
//   wgpu reports validation failures asynchronously; an error
//   scope around each step turns them into startup errors with
//   the full diagnostic.
// ──────────────────────────────────────────────────────────────
//

fn compile_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule, StartupError>
{
  device.push_error_scope(wgpu::ErrorFilter::Validation);

  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Scene Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
  });

  match pollster::block_on(device.pop_error_scope())
  {
    Some(err) => Err(StartupError::ShaderCompile(err.to_string())),
    None => Ok(shader),
  }
}

fn link_pipeline(
  device: &wgpu::Device,
  color_format: wgpu::TextureFormat,
  shader: &wgpu::ShaderModule,
  bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> Result<wgpu::RenderPipeline, StartupError>
{
  device.push_error_scope(wgpu::ErrorFilter::Validation);

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Scene Pipeline Layout"),
    bind_group_layouts,
    push_constant_ranges: &[],
  });

  let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Scene Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: shader,
      entry_point: Some("vs_main"),
      buffers: &[vertex_layout()],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format: color_format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState {
      topology: wgpu::PrimitiveTopology::TriangleList,
      strip_index_format: None,
      front_face: wgpu::FrontFace::Ccw,
      cull_mode: None, // meshes mix windings and the cap/plane are single-sided
      unclipped_depth: false,
      polygon_mode: wgpu::PolygonMode::Fill,
      conservative: false,
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

  match pollster::block_on(device.pop_error_scope())
  {
    Some(err) => Err(StartupError::ShaderLink(err.to_string())),
    None => Ok(pipeline),
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Bind group layouts
// ──────────────────────────────────────────────────────────────
//

fn uniform_layout(
  device: &wgpu::Device,
  label: &str,
  visibility: wgpu::ShaderStages,
  size: usize,
) -> wgpu::BindGroupLayout
{
  device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some(label),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: wgpu::BufferSize::new(size as u64),
      },
      count: None,
    }],
  })
}

fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout
{
  device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Texture BGL"),
    entries: &[
      wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
          sample_type: wgpu::TextureSampleType::Float { filterable: true },
          view_dimension: wgpu::TextureViewDimension::D2,
          multisampled: false,
        },
        count: None,
      },
      wgpu::BindGroupLayoutEntry {
        binding: 1,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
      },
    ],
  })
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn attributes_follow_struct_layout()
  {
    let layout = vertex_layout();

    assert_eq!(layout.array_stride, 36);
    assert_eq!(layout.attributes[0].offset, 0);
    assert_eq!(layout.attributes[1].offset, 12);
    assert_eq!(layout.attributes[2].offset, 28);
  }

  #[test]
  fn attribute_sizes_fill_the_stride()
  {
    let total: u64 = VERTEX_ATTRIBUTES.iter().map(|a| a.format.size()).sum();
    assert_eq!(total, size_of::<Vertex>() as u64);
  }
}
