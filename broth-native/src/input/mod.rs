pub mod camera_control;

use std::collections::HashSet;

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

// Trackpads report pixels; the camera expects wheel lines
const SCROLL_PIXELS_PER_LINE: f32 = 50.0;

//
// ──────────────────────────────────────────────────────────────
//   Camera events
//
//   Pointer motion and scroll arrive during event polling. They
//   are queued here in arrival order and applied by the
//   dispatcher before the frame is drawn.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraEvent
{
  PointerMoved
  {
    dx: f32, dy: f32
  },
  Scrolled
  {
    dy: f32
  },
}

/// Turns absolute cursor positions into deltas. The first position
/// after a reset only seeds the baseline, so it never produces a jump.
#[derive(Debug, Default, Clone)]
pub struct PointerTracker
{
  last: Option<(f32, f32)>,
}

impl PointerTracker
{
  pub fn sample(&mut self, x: f32, y: f32) -> (f32, f32)
  {
    let delta = match self.last
    {
      Some((lx, ly)) => (x - lx, y - ly),
      None => (0.0, 0.0),
    };

    self.last = Some((x, y));
    delta
  }

  pub fn reset(&mut self)
  {
    self.last = None;
  }
}

//
// ──────────────────────────────────────────────────────────────
//   InputState
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Default)]
pub struct InputState
{
  held: HashSet<KeyCode>,
  // Key-down edges since the last `end_frame`; survives a release in the same frame
  pressed_this_frame: HashSet<KeyCode>,

  pointer: PointerTracker,
  camera_events: Vec<CameraEvent>,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self::default()
  }

  pub fn handle_event(&mut self, event: &WindowEvent)
  {
    match event
    {
      WindowEvent::KeyboardInput { event, .. } =>
      {
        if let PhysicalKey::Code(code) = event.physical_key
        {
          self.key_changed(code, event.state == ElementState::Pressed);
        }
      }

      WindowEvent::CursorMoved { position, .. } =>
      {
        self.cursor_moved(position.x as f32, position.y as f32);
      }

      WindowEvent::MouseWheel { delta, .. } => match delta
      {
        MouseScrollDelta::LineDelta(_, y) => self.scrolled(*y),
        MouseScrollDelta::PixelDelta(p) => self.scrolled(p.y as f32 / SCROLL_PIXELS_PER_LINE),
      },

      WindowEvent::Focused(false) =>
      {
        self.focus_lost();
      }

      _ =>
      {}
    }
  }

  pub fn key_changed(&mut self, code: KeyCode, pressed: bool)
  {
    if pressed
    {
      if self.held.insert(code)
      {
        self.pressed_this_frame.insert(code);
      }
    }
    else
    {
      self.held.remove(&code);
    }
  }

  pub fn cursor_moved(&mut self, x: f32, y: f32)
  {
    let (dx, dy) = self.pointer.sample(x, y);
    self.pointer_delta(dx, dy);
  }

  /// Relative motion from a locked pointer; no baseline needed.
  pub fn pointer_delta(&mut self, dx: f32, dy: f32)
  {
    if dx != 0.0 || dy != 0.0
    {
      self.camera_events.push(CameraEvent::PointerMoved { dx, dy });
    }
  }

  pub fn scrolled(&mut self, dy: f32)
  {
    if dy != 0.0
    {
      self.camera_events.push(CameraEvent::Scrolled { dy });
    }
  }

  /// Keys released while unfocused never reach us, and the cursor
  /// may come back anywhere.
  pub fn focus_lost(&mut self)
  {
    self.held.clear();
    self.pointer.reset();
  }

  pub fn is_held(&self, code: KeyCode) -> bool
  {
    self.held.contains(&code)
  }

  /// Went down at least once since the previous frame, even if already released.
  pub fn was_pressed(&self, code: KeyCode) -> bool
  {
    self.pressed_this_frame.contains(&code)
  }

  pub fn take_camera_events(&mut self) -> Vec<CameraEvent>
  {
    std::mem::take(&mut self.camera_events)
  }

  pub fn end_frame(&mut self)
  {
    self.pressed_this_frame.clear();
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn first_pointer_sample_is_a_zero_delta()
  {
    let mut tracker = PointerTracker::default();

    assert_eq!(tracker.sample(400.0, 300.0), (0.0, 0.0));
    assert_eq!(tracker.sample(410.0, 295.0), (10.0, -5.0));

    tracker.reset();
    assert_eq!(tracker.sample(0.0, 0.0), (0.0, 0.0));
  }

  #[test]
  fn cursor_motion_queues_events_in_order()
  {
    let mut input = InputState::new();

    input.cursor_moved(100.0, 100.0);
    input.cursor_moved(103.0, 98.0);
    input.scrolled(1.0);
    input.cursor_moved(103.0, 98.0);
    input.cursor_moved(100.0, 100.0);

    let events = input.take_camera_events();
    assert_eq!(
      events,
      vec![
        CameraEvent::PointerMoved { dx: 3.0, dy: -2.0 },
        CameraEvent::Scrolled { dy: 1.0 },
        CameraEvent::PointerMoved { dx: -3.0, dy: 2.0 },
      ]
    );
    assert!(input.take_camera_events().is_empty());
  }

  #[test]
  fn pressed_is_an_edge_across_frames()
  {
    let mut input = InputState::new();

    input.key_changed(KeyCode::KeyP, true);
    assert!(input.was_pressed(KeyCode::KeyP));
    input.end_frame();

    assert!(input.is_held(KeyCode::KeyP));
    assert!(!input.was_pressed(KeyCode::KeyP));

    input.key_changed(KeyCode::KeyP, false);
    input.end_frame();
    input.key_changed(KeyCode::KeyP, true);
    assert!(input.was_pressed(KeyCode::KeyP));
  }

  #[test]
  fn repeated_key_down_is_not_a_new_press()
  {
    let mut input = InputState::new();

    input.key_changed(KeyCode::KeyP, true);
    input.end_frame();
    input.key_changed(KeyCode::KeyP, true);

    assert!(!input.was_pressed(KeyCode::KeyP));
  }

  #[test]
  fn tap_within_one_frame_still_counts_as_pressed()
  {
    let mut input = InputState::new();

    input.key_changed(KeyCode::KeyP, true);
    input.key_changed(KeyCode::KeyP, false);

    assert!(input.was_pressed(KeyCode::KeyP));
    assert!(!input.is_held(KeyCode::KeyP));

    input.end_frame();
    assert!(!input.was_pressed(KeyCode::KeyP));
  }

  #[test]
  fn focus_loss_releases_keys_and_reseeds_pointer()
  {
    let mut input = InputState::new();
    input.key_changed(KeyCode::KeyW, true);
    input.cursor_moved(10.0, 10.0);

    input.focus_lost();
    input.cursor_moved(500.0, 500.0);

    assert!(!input.is_held(KeyCode::KeyW));
    assert!(input.take_camera_events().is_empty());
  }
}
