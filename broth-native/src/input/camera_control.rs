use winit::keyboard::KeyCode;

use crate::camera::Movement;
use crate::input::{CameraEvent, InputState};
use crate::state::{AppState, ToggleTrigger};

//
// ──────────────────────────────────────────────────────────────
//   Key bindings
// ──────────────────────────────────────────────────────────────
//

const MOVEMENT_KEYS: [(KeyCode, Movement); 6] = [
  (KeyCode::KeyW, Movement::Forward),
  (KeyCode::KeyS, Movement::Backward),
  (KeyCode::KeyA, Movement::Left),
  (KeyCode::KeyD, Movement::Right),
  (KeyCode::KeyQ, Movement::Up),
  (KeyCode::KeyE, Movement::Down),
];

const PROJECTION_KEY: KeyCode = KeyCode::KeyP;
const QUIT_KEY: KeyCode = KeyCode::Escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl
{
  Continue,
  Quit,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

/// Run once per frame, before drawing. Applies queued pointer/scroll
/// events, then held movement keys, then the projection toggle.
pub fn dispatch_input(input: &mut InputState, state: &mut AppState, dt: f32) -> FrameControl
{
  if input.is_held(QUIT_KEY)
  {
    return FrameControl::Quit;
  }

  apply_camera_events(input, state);
  apply_movement(input, state, dt);
  apply_projection_toggle(input, state);

  FrameControl::Continue
}

//
// ──────────────────────────────────────────────────────────────
//   Input handlers
// ──────────────────────────────────────────────────────────────
//

fn apply_camera_events(input: &mut InputState, state: &mut AppState)
{
  for event in input.take_camera_events()
  {
    match event
    {
      CameraEvent::PointerMoved { dx, dy } => state.camera.apply_pointer_delta(dx, dy),
      CameraEvent::Scrolled { dy } => state.camera.apply_scroll_delta(dy),
    }
  }
}

// Each held key moves independently; diagonals are not normalized
fn apply_movement(input: &InputState, state: &mut AppState, dt: f32)
{
  for (key, direction) in MOVEMENT_KEYS
  {
    if input.is_held(key)
    {
      state.camera.apply_movement(direction, dt);
    }
  }
}

fn apply_projection_toggle(input: &InputState, state: &mut AppState)
{
  let fire = match state.toggle_trigger
  {
    ToggleTrigger::OnPress => input.was_pressed(PROJECTION_KEY),
    ToggleTrigger::WhileHeld => input.is_held(PROJECTION_KEY),
  };

  if fire
  {
    state.toggle_projection();
  }
}

#[cfg(test)]
mod tests
{
  use glam::Vec3;

  use super::*;
  use crate::state::ProjectionMode;

  const DT: f32 = 1.0 / 60.0;

  fn run_frame(input: &mut InputState, state: &mut AppState) -> FrameControl
  {
    let control = dispatch_input(input, state, DT);
    input.end_frame();
    control
  }

  #[test]
  fn w_moves_forward_one_step()
  {
    let mut input = InputState::new();
    let mut state = AppState::default();

    input.key_changed(KeyCode::KeyW, true);
    run_frame(&mut input, &mut state);

    assert!(state.camera.position().abs_diff_eq(Vec3::new(0.0, 2.0, 4.95), 1e-5));
  }

  #[test]
  fn held_keys_compose_without_normalizing()
  {
    let mut input = InputState::new();
    let mut state = AppState::default();

    input.key_changed(KeyCode::KeyW, true);
    input.key_changed(KeyCode::KeyD, true);
    input.key_changed(KeyCode::KeyQ, true);
    run_frame(&mut input, &mut state);

    let moved = state.camera.position() - Vec3::new(0.0, 2.0, 5.0);
    assert!(moved.abs_diff_eq(Vec3::new(0.05, 0.05, -0.05), 1e-5), "{moved:?}");
  }

  #[test]
  fn conflicting_keys_cancel()
  {
    let mut input = InputState::new();
    let mut state = AppState::default();

    input.key_changed(KeyCode::KeyA, true);
    input.key_changed(KeyCode::KeyD, true);
    run_frame(&mut input, &mut state);

    assert!(state.camera.position().abs_diff_eq(Vec3::new(0.0, 2.0, 5.0), 1e-5));
  }

  #[test]
  fn on_press_toggles_once_per_press()
  {
    let mut input = InputState::new();
    let mut state = AppState::default();

    input.key_changed(KeyCode::KeyP, true);
    for _ in 0..5
    {
      run_frame(&mut input, &mut state);
    }
    assert_eq!(state.projection, ProjectionMode::Orthographic);

    input.key_changed(KeyCode::KeyP, false);
    run_frame(&mut input, &mut state);
    input.key_changed(KeyCode::KeyP, true);
    run_frame(&mut input, &mut state);
    assert_eq!(state.projection, ProjectionMode::Perspective);
  }

  #[test]
  fn quick_tap_between_frames_toggles_once()
  {
    let mut input = InputState::new();
    let mut state = AppState::default();

    input.key_changed(KeyCode::KeyP, true);
    input.key_changed(KeyCode::KeyP, false);
    run_frame(&mut input, &mut state);
    assert_eq!(state.projection, ProjectionMode::Orthographic);

    run_frame(&mut input, &mut state);
    assert_eq!(state.projection, ProjectionMode::Orthographic);
  }

  #[test]
  fn while_held_toggles_every_frame()
  {
    let mut input = InputState::new();
    let mut state = AppState::default();
    state.toggle_trigger = ToggleTrigger::WhileHeld;

    input.key_changed(KeyCode::KeyP, true);
    for _ in 0..3
    {
      run_frame(&mut input, &mut state);
    }

    assert_eq!(state.projection, ProjectionMode::Orthographic);
    run_frame(&mut input, &mut state);
    assert_eq!(state.projection, ProjectionMode::Perspective);
  }

  #[test]
  fn queued_pointer_and_scroll_reach_the_camera()
  {
    let mut input = InputState::new();
    let mut state = AppState::default();

    input.cursor_moved(400.0, 300.0);
    input.cursor_moved(400.0, 250.0);
    input.scrolled(5.0);
    run_frame(&mut input, &mut state);

    assert!((state.camera.pitch() - 5.0).abs() < 1e-5);
    assert!((state.camera.zoom() - 40.0).abs() < 1e-5);
  }

  #[test]
  fn escape_quits()
  {
    let mut input = InputState::new();
    let mut state = AppState::default();

    assert_eq!(run_frame(&mut input, &mut state), FrameControl::Continue);

    input.key_changed(KeyCode::Escape, true);
    assert_eq!(run_frame(&mut input, &mut state), FrameControl::Quit);
  }
}
