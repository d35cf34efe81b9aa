use std::sync::Arc;

use winit::event::WindowEvent;
use winit::window::Window;

use crate::config::SceneConfig;
use crate::error::StartupError;
use crate::state::AppState;

use super::depth::DepthResources;
use super::frame::{FramePlan, CLEAR_COLOR};
use super::gui::{GuiRenderer, HudReadout};
use super::pipeline::ScenePipeline;
use super::registry::MeshRegistry;
use super::texture::SceneTexture;
use super::uniform::FrameUniform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome
{
  Presented,
  Skipped,
  Fatal,
}

pub struct Renderer
{
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  depth: DepthResources,
  frame_buffer: wgpu::Buffer,
  frame_bind_group: wgpu::BindGroup,

  scene: ScenePipeline,
  texture: SceneTexture,
  meshes: MeshRegistry,
  gui: Option<GuiRenderer>,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>, scene_config: &SceneConfig) -> Result<Self, StartupError>
  {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone()).map_err(StartupError::context)?;

    let adapter = request_adapter(&instance, &surface).await?;
    let (device, queue) = request_device(&adapter).await?;

    let config = configure_surface(&window, &surface, &adapter, &device, scene_config.window.vsync)?;
    let depth = DepthResources::create(&device, &config);

    let scene = ScenePipeline::create(&device, config.format)?;
    let (frame_buffer, frame_bind_group) = create_frame_resources(&device, &scene.frame_bgl);

    let texture = SceneTexture::load(&device, &queue, &scene.texture_bgl, &scene_config.texture_path)?;
    let meshes = MeshRegistry::create(&device, &scene.model_bgl);

    let gui = scene_config.hud.then(|| GuiRenderer::new(&device, config.format, &window));

    log::info!("renderer ready: {}x{} {:?}", config.width, config.height, config.format);

    Ok(Self {
      surface,
      device,
      queue,
      config,
      depth,
      frame_buffer,
      frame_bind_group,
      scene,
      texture,
      meshes,
      gui,
    })
  }

  pub fn aspect(&self) -> f32
  {
    self.config.width as f32 / self.config.height.max(1) as f32
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);
    self.depth = DepthResources::create(&self.device, &self.config);
  }

  pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent)
  {
    if let Some(gui) = &mut self.gui
    {
      gui.on_window_event(window, event);
    }
  }

  pub fn render(&mut self, window: &Window, state: &AppState) -> FrameOutcome
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        log::warn!("surface lost or outdated, reconfiguring");
        self.surface.configure(&self.device, &self.config);
        return FrameOutcome::Skipped;
      }
      Err(wgpu::SurfaceError::OutOfMemory) =>
      {
        log::error!("surface out of memory");
        return FrameOutcome::Fatal;
      }
      Err(err) =>
      {
        log::warn!("skipping frame: {err}");
        return FrameOutcome::Skipped;
      }
    };

    let plan = FramePlan::build(state, self.aspect());
    self.upload_plan(&plan);

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
    let mut encoder =
      self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Scene Encoder") });

    self.record_scene_pass(&mut encoder, &view, &plan);

    if let Some(gui) = &mut self.gui
    {
      let hud = HudReadout::from_state(state);
      gui.render(&self.device, &self.queue, &mut encoder, window, &view, &hud);
    }

    self.queue.submit(Some(encoder.finish()));
    frame.present();

    FrameOutcome::Presented
  }

  pub fn shutdown(&mut self)
  {
    self.meshes.release();
    self.texture.release();
    self.depth.release();
    self.frame_buffer.destroy();
    log::info!("renderer resources released");
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Frame execution
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  fn upload_plan(&self, plan: &FramePlan)
  {
    let frame: FrameUniform = plan.frame_uniform();
    self.queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));

    for draw in &plan.draws
    {
      if let Some(record) = self.meshes.get(draw.mesh)
      {
        self.queue.write_buffer(&record.model_buffer, 0, bytemuck::bytes_of(&draw.model_uniform()));
      }
    }
  }

  fn record_scene_pass(&self, encoder: &mut wgpu::CommandEncoder, color_view: &wgpu::TextureView, plan: &FramePlan)
  {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
      label: Some("Scene Pass"),
      color_attachments: &[Some(wgpu::RenderPassColorAttachment {
        view: color_view,
        resolve_target: None,
        ops: wgpu::Operations { load: wgpu::LoadOp::Clear(CLEAR_COLOR), store: wgpu::StoreOp::Store },
        depth_slice: None,
      })],
      depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
        view: &self.depth.view,
        depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
        stencil_ops: None,
      }),
      occlusion_query_set: None,
      timestamp_writes: None,
    });

    pass.set_pipeline(&self.scene.pipeline);
    pass.set_bind_group(0, &self.frame_bind_group, &[]);
    pass.set_bind_group(2, &self.texture.bind_group, &[]);

    for draw in &plan.draws
    {
      let Some(record) = self.meshes.get(draw.mesh)
      else
      {
        continue;
      };

      pass.set_bind_group(1, &record.model_bind_group, &[]);
      pass.set_vertex_buffer(0, record.vertex_buffer.slice(..));
      pass.set_index_buffer(record.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
      pass.draw_indexed(0..record.index_count, 0, 0..1);
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(
  instance: &wgpu::Instance,
  surface: &wgpu::Surface<'_>,
) -> Result<wgpu::Adapter, StartupError>
{
  let adapter = instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await
    .map_err(StartupError::context)?;

  log::info!("adapter: {}", adapter.get_info().name);
  Ok(adapter)
}

async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue), StartupError>
{
  adapter
    .request_device(&wgpu::DeviceDescriptor {
      label: Some("Broth Device"),
      required_features: wgpu::Features::empty(),
      required_limits: wgpu::Limits::default(),
      ..Default::default()
    })
    .await
    .map_err(StartupError::context)
}

fn configure_surface(
  window: &Window,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
  vsync: bool,
) -> Result<wgpu::SurfaceConfiguration, StartupError>
{
  let size = window.inner_size();
  let caps = surface.get_capabilities(adapter);

  let format = caps
    .formats
    .iter()
    .copied()
    .find(|f| f.is_srgb())
    .or_else(|| caps.formats.first().copied())
    .ok_or_else(|| StartupError::context("surface reports no supported formats"))?;

  let present_mode = if vsync { wgpu::PresentMode::Fifo } else { wgpu::PresentMode::AutoNoVsync };

  let config = wgpu::SurfaceConfiguration {
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    format,
    width: size.width.max(1),
    height: size.height.max(1),
    present_mode,
    alpha_mode: wgpu::CompositeAlphaMode::Auto,
    view_formats: vec![],
    desired_maximum_frame_latency: 2,
  };

  surface.configure(device, &config);
  Ok(config)
}

fn create_frame_resources(device: &wgpu::Device, frame_bgl: &wgpu::BindGroupLayout) -> (wgpu::Buffer, wgpu::BindGroup)
{
  let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Frame Buffer"),
    size: std::mem::size_of::<FrameUniform>() as u64,
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  });

  let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Frame BG"),
    layout: frame_bgl,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: frame_buffer.as_entire_binding() }],
  });

  (frame_buffer, frame_bind_group)
}
