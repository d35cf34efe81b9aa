use egui_wgpu::{Renderer, RendererOptions, ScreenDescriptor};
use egui_winit::State;
use glam::Vec3;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::state::AppState;

//
// ──────────────────────────────────────────────────────────────
//   HUD readout
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudReadout
{
  pub projection: &'static str,
  pub position: Vec3,
  pub facing: Vec3,
  pub yaw: f32,
  pub pitch: f32,
  pub zoom: f32,
}

impl HudReadout
{
  pub fn from_state(state: &AppState) -> Self
  {
    Self {
      projection: state.projection.label(),
      position: state.camera.position(),
      facing: state.camera.front(),
      yaw: state.camera.yaw(),
      pitch: state.camera.pitch(),
      zoom: state.camera.zoom(),
    }
  }

  pub fn lines(&self) -> [String; 5]
  {
    let p = self.position;
    let f = self.facing;
    [
      format!("projection: {}  (P)", self.projection),
      format!("position: {:.2}, {:.2}, {:.2}", p.x, p.y, p.z),
      format!("facing: {:.2}, {:.2}, {:.2}", f.x, f.y, f.z),
      format!("yaw {:.1}°  pitch {:.1}°", self.yaw, self.pitch),
      format!("fov {:.1}°", self.zoom),
    ]
  }
}

//
// ──────────────────────────────────────────────────────────────
//   GuiRenderer
//
//   Read-only overlay drawn after the scene meshes, before the
//   frame is presented. It never takes input focus.
// ──────────────────────────────────────────────────────────────
//

pub struct GuiRenderer
{
  context: egui::Context,
  state: State,
  renderer: Renderer,
}

impl GuiRenderer
{
  pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self
  {
    let context = egui::Context::default();
    let state = State::new(
      context.clone(),
      egui::viewport::ViewportId::ROOT,
      window,
      Some(window.scale_factor() as f32),
      None,
      None,
    );

    let renderer = Renderer::new(
      device,
      output_format,
      RendererOptions {
        depth_stencil_format: None,
        msaa_samples: 1,
        predictable_texture_filtering: false,
        dithering: true,
      },
    );

    Self { context, state, renderer }
  }

  /// Keeps egui's view of the window (size, scale factor) current.
  pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent)
  {
    let _ = self.state.on_window_event(window, event);
  }

  pub fn render(
    &mut self,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    encoder: &mut wgpu::CommandEncoder,
    window: &Window,
    view: &wgpu::TextureView,
    hud: &HudReadout,
  )
  {
    let raw_input = self.state.take_egui_input(window);
    let full_output = self.context.run(raw_input, |ctx| draw_hud(ctx, hud));
    self.state.handle_platform_output(window, full_output.platform_output);

    let size = window.inner_size();
    let ppp = full_output.pixels_per_point;
    let screen_descriptor =
      ScreenDescriptor { size_in_pixels: [size.width, size.height], pixels_per_point: ppp };

    for (id, delta) in &full_output.textures_delta.set
    {
      self.renderer.update_texture(device, queue, *id, delta);
    }

    let tris = self.context.tessellate(full_output.shapes, ppp);
    self.renderer.update_buffers(device, queue, encoder, &tris, &screen_descriptor);

    {
      let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("HUD Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
          view,
          resolve_target: None,
          ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
          depth_slice: None,
        })],
        ..Default::default()
      });

      // The pass is dropped at the end of this block, before `encoder` is used again
      let mut pass = pass.forget_lifetime();

      self.renderer.render(&mut pass, &tris, &screen_descriptor);
    }

    for id in &full_output.textures_delta.free
    {
      self.renderer.free_texture(id);
    }
  }
}

fn draw_hud(ctx: &egui::Context, hud: &HudReadout)
{
  egui::Window::new("Camera")
    .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
    .resizable(false)
    .collapsible(false)
    .interactable(false)
    .show(ctx, |ui| {
      for line in hud.lines()
      {
        ui.label(line);
      }
    });
}
