use std::sync::Arc;
use std::time::Instant;

use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{DeviceEvent, DeviceId, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{CursorGrabMode, Window, WindowId},
};

use crate::config::SceneConfig;
use crate::error::StartupError;
use crate::input::camera_control::{dispatch_input, FrameControl};
use crate::input::InputState;
use crate::renderer::{FrameOutcome, Renderer};
use crate::state::AppState;

pub fn run(config: SceneConfig) -> Result<(), StartupError>
{
  let event_loop = EventLoop::new().map_err(StartupError::context)?;
  let mut app = BrothApp::new(config);

  event_loop.run_app(&mut app).map_err(StartupError::context)?;

  match app.startup_error.take()
  {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

// Where look deltas come from, depending on which cursor grab the platform allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerSource
{
  Cursor,
  RawMotion,
}

struct BrothApp
{
  config: SceneConfig,
  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,

  state: AppState,
  input: InputState,
  pointer_source: PointerSource,
  last_frame: Instant,

  startup_error: Option<StartupError>,
}

impl BrothApp
{
  fn new(config: SceneConfig) -> Self
  {
    let state = AppState::new(&config);

    Self {
      config,
      window: None,
      renderer: None,
      state,
      input: InputState::new(),
      pointer_source: PointerSource::Cursor,
      last_frame: Instant::now(),
      startup_error: None,
    }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<(), StartupError>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let attrs = Window::default_attributes()
      .with_title(self.config.window.title.clone())
      .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));
    let window = Arc::new(event_loop.create_window(attrs).map_err(StartupError::context)?);

    self.pointer_source = capture_cursor(&window);

    let renderer = pollster::block_on(Renderer::new(window.clone(), &self.config))?;

    self.window = Some(window);
    self.renderer = Some(renderer);
    self.last_frame = Instant::now();

    Ok(())
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w,
      _ => return,
    };

    if let Some(renderer) = &mut self.renderer
    {
      renderer.on_window_event(window, &event);
    }

    match &event
    {
      WindowEvent::CursorMoved { .. } if self.pointer_source == PointerSource::RawMotion =>
      {}

      _ => self.input.handle_event(&event),
    }

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }
      }

      _ =>
      {}
    }
  }

  fn frame(&mut self, elwt: &ActiveEventLoop)
  {
    let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer)
    else
    {
      return;
    };

    let now = Instant::now();
    let dt = now.duration_since(self.last_frame).as_secs_f32();
    self.last_frame = now;

    if dispatch_input(&mut self.input, &mut self.state, dt) == FrameControl::Quit
    {
      log::info!("escape pressed, exiting");
      elwt.exit();
      return;
    }

    if renderer.render(window, &self.state) == FrameOutcome::Fatal
    {
      elwt.exit();
      return;
    }

    self.input.end_frame();
  }
}

impl ApplicationHandler for BrothApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Poll);

    if let Err(err) = self.init_window_and_renderer(event_loop)
    {
      self.startup_error = Some(err);
      event_loop.exit();
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent)
  {
    if self.pointer_source != PointerSource::RawMotion
    {
      return;
    }

    if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event
    {
      self.input.pointer_delta(dx as f32, dy as f32);
    }
  }

  fn about_to_wait(&mut self, event_loop: &ActiveEventLoop)
  {
    self.frame(event_loop);
  }

  fn exiting(&mut self, _event_loop: &ActiveEventLoop)
  {
    if let Some(renderer) = &mut self.renderer
    {
      renderer.shutdown();
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Cursor capture
//
//   A grabbed cursor stops producing positions at the window edge
//   (Confined) or altogether (Locked), so any successful grab takes
//   look deltas from raw device motion. The pointer tracker is only
//   used when no grab is available.
// ──────────────────────────────────────────────────────────────
//

const GRAB_MODES: [CursorGrabMode; 2] = [CursorGrabMode::Locked, CursorGrabMode::Confined];

fn capture_cursor(window: &Window) -> PointerSource
{
  window.set_cursor_visible(false);

  let granted = GRAB_MODES.into_iter().find(|&mode| window.set_cursor_grab(mode).is_ok());

  match granted
  {
    Some(mode) => log::debug!("cursor grabbed ({mode:?})"),
    None =>
    {
      log::warn!("cursor grab unavailable; look follows the free cursor");
      window.set_cursor_visible(true);
    }
  }

  pointer_source_for(granted)
}

fn pointer_source_for(grab: Option<CursorGrabMode>) -> PointerSource
{
  match grab
  {
    Some(CursorGrabMode::None) | None => PointerSource::Cursor,
    Some(_) => PointerSource::RawMotion,
  }
}
