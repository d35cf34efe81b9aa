use glam::{Mat4, Vec3};
use serde::Deserialize;

use crate::config::CameraConfig;
use crate::state::ProjectionMode;

//
// ──────────────────────────────────────────────────────────────
//   Fly camera (Y-up, right-hand rule)
//
//   Orientation is yaw/pitch in degrees. front/right/up are
//   rebuilt from the angles after every orientation change and
//   are never edited directly, so the basis cannot drift:
//
//     front = normalize(cos(yaw)·cos(pitch),
//                       sin(pitch),
//                       sin(yaw)·cos(pitch))
//
//   yaw = -90° looks down -Z.
// ──────────────────────────────────────────────────────────────
//

pub const PITCH_LIMIT: f32 = 89.0;
pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 45.0;

pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
pub const ORTHO_HALF_EXTENT: f32 = 3.0;

const WORLD_UP: Vec3 = Vec3::Y;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement
{
  Forward,
  Backward,
  Left,
  Right,
  Up,
  Down,
}

/// How far one `apply_movement` call moves the camera.
///
/// `Fixed` ignores the frame time: every call is one constant step, so
/// speed depends on frame rate. `PerSecond` scales by the frame time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MoveStep
{
  Fixed
  {
    distance: f32
  },
  PerSecond
  {
    speed: f32
  },
}

impl Default for MoveStep
{
  fn default() -> Self
  {
    Self::Fixed { distance: 0.05 }
  }
}

impl MoveStep
{
  pub fn distance(self, dt: f32) -> f32
  {
    match self
    {
      Self::Fixed { distance } => distance,
      Self::PerSecond { speed } => speed * dt,
    }
  }
}

#[derive(Debug, Clone)]
pub struct FlyCamera
{
  position: Vec3,
  yaw: f32,
  pitch: f32,
  zoom: f32,

  sensitivity: f32,
  step: MoveStep,

  front: Vec3,
  right: Vec3,
  up: Vec3,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl FlyCamera
{
  pub fn new(config: &CameraConfig) -> Self
  {
    let mut camera = Self {
      position: config.position,
      yaw: config.yaw,
      pitch: config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
      zoom: config.zoom.clamp(ZOOM_MIN, ZOOM_MAX),
      sensitivity: config.sensitivity,
      step: config.step,
      front: Vec3::NEG_Z,
      right: Vec3::X,
      up: Vec3::Y,
    };

    camera.update_vectors();
    camera
  }

  /// Look around. `dx`/`dy` are raw pointer deltas in pixels, screen
  /// space (y grows downward), so moving the pointer up raises pitch.
  pub fn apply_pointer_delta(&mut self, dx: f32, dy: f32)
  {
    self.yaw += dx * self.sensitivity;
    self.pitch = (self.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

    self.update_vectors();
  }

  /// Scroll up (positive) narrows the field of view.
  pub fn apply_scroll_delta(&mut self, dy: f32)
  {
    self.zoom = (self.zoom - dy).clamp(ZOOM_MIN, ZOOM_MAX);
  }

  pub fn apply_movement(&mut self, direction: Movement, dt: f32)
  {
    let step = self.step.distance(dt);

    let delta = match direction
    {
      Movement::Forward => self.front * step,
      Movement::Backward => -self.front * step,
      Movement::Right => self.right * step,
      Movement::Left => -self.right * step,
      Movement::Up => WORLD_UP * step,
      Movement::Down => -WORLD_UP * step,
    };

    self.position += delta;
  }

  pub fn view_matrix(&self) -> Mat4
  {
    Mat4::look_at_rh(self.position, self.position + self.front, self.up)
  }

  pub fn projection_matrix(&self, mode: ProjectionMode, aspect: f32) -> Mat4
  {
    match mode
    {
      ProjectionMode::Perspective => Mat4::perspective_rh(self.zoom.to_radians(), aspect, Z_NEAR, Z_FAR),
      ProjectionMode::Orthographic => Mat4::orthographic_rh(
        -ORTHO_HALF_EXTENT,
        ORTHO_HALF_EXTENT,
        -ORTHO_HALF_EXTENT,
        ORTHO_HALF_EXTENT,
        Z_NEAR,
        Z_FAR,
      ),
    }
  }

  pub fn position(&self) -> Vec3
  {
    self.position
  }

  pub fn yaw(&self) -> f32
  {
    self.yaw
  }

  pub fn pitch(&self) -> f32
  {
    self.pitch
  }

  pub fn zoom(&self) -> f32
  {
    self.zoom
  }

  pub fn front(&self) -> Vec3
  {
    self.front
  }
}

impl Default for FlyCamera
{
  fn default() -> Self
  {
    Self::new(&CameraConfig::default())
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Basis rebuild
// ──────────────────────────────────────────────────────────────
//

impl FlyCamera
{
  fn update_vectors(&mut self)
  {
    self.front = front_from_angles(self.yaw, self.pitch);
    self.right = self.front.cross(WORLD_UP).normalize();
    self.up = self.right.cross(self.front).normalize();
  }
}

fn front_from_angles(yaw_deg: f32, pitch_deg: f32) -> Vec3
{
  let (sin_yaw, cos_yaw) = yaw_deg.to_radians().sin_cos();
  let (sin_pitch, cos_pitch) = pitch_deg.to_radians().sin_cos();

  Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
}

#[cfg(test)]
mod tests
{
  use super::*;

  const EPS: f32 = 1e-5;

  fn assert_unit_basis(cam: &FlyCamera)
  {
    assert!((cam.front().length() - 1.0).abs() < EPS, "front not unit: {:?}", cam.front());
    assert!((cam.right.length() - 1.0).abs() < EPS, "right not unit: {:?}", cam.right);
    assert!((cam.up.length() - 1.0).abs() < EPS, "up not unit: {:?}", cam.up);
    assert!(cam.front().dot(cam.right).abs() < EPS);
    assert!(cam.front().dot(cam.up).abs() < EPS);
  }

  #[test]
  fn starts_looking_down_negative_z()
  {
    let cam = FlyCamera::default();

    assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, EPS));
    assert!(cam.right.abs_diff_eq(Vec3::X, EPS));
    assert!(cam.up.abs_diff_eq(Vec3::Y, EPS));
    assert_unit_basis(&cam);
  }

  #[test]
  fn pitch_stays_clamped_for_any_pointer_sequence()
  {
    let mut cam = FlyCamera::default();
    let deltas = [(0.0, -5000.0), (12.0, -3.0), (-400.0, 9000.0), (0.5, 0.5), (0.0, -1.0e6), (3.0, 1.0e6)];

    for (dx, dy) in deltas
    {
      cam.apply_pointer_delta(dx, dy);
      assert!(cam.pitch() >= -PITCH_LIMIT && cam.pitch() <= PITCH_LIMIT, "pitch {}", cam.pitch());
      assert_unit_basis(&cam);
    }
  }

  #[test]
  fn pointer_up_raises_pitch()
  {
    let mut cam = FlyCamera::default();
    cam.apply_pointer_delta(0.0, -10.0);

    assert!((cam.pitch() - 1.0).abs() < EPS);
    assert!(cam.front().y > 0.0);
  }

  #[test]
  fn pointer_right_increases_yaw()
  {
    let mut cam = FlyCamera::default();
    cam.apply_pointer_delta(100.0, 0.0);

    assert!((cam.yaw() - -80.0).abs() < EPS);
    assert!(cam.front().x > 0.0);
  }

  #[test]
  fn yaw_is_unbounded()
  {
    let mut cam = FlyCamera::default();
    cam.apply_pointer_delta(3600.0 * 10.0, 0.0);

    assert!((cam.yaw() - 3510.0).abs() < 1e-2);
    assert_unit_basis(&cam);
  }

  #[test]
  fn zoom_stays_clamped_for_any_scroll_sequence()
  {
    let mut cam = FlyCamera::default();

    for dy in [1.0, 100.0, -3.0, -1000.0, 0.25, 44.0, -0.5]
    {
      cam.apply_scroll_delta(dy);
      assert!(cam.zoom() >= ZOOM_MIN && cam.zoom() <= ZOOM_MAX, "zoom {}", cam.zoom());
    }

    cam.apply_scroll_delta(1000.0);
    assert_eq!(cam.zoom(), ZOOM_MIN);
    cam.apply_scroll_delta(-1000.0);
    assert_eq!(cam.zoom(), ZOOM_MAX);
  }

  #[test]
  fn view_matrix_matches_look_at_reference()
  {
    let cam = FlyCamera::default();
    let expected = Mat4::from_translation(Vec3::new(0.0, -2.0, -5.0));

    assert!(cam.view_matrix().abs_diff_eq(expected, EPS), "{:?}", cam.view_matrix());
  }

  #[test]
  fn forward_once_moves_by_exactly_one_step()
  {
    let mut cam = FlyCamera::default();
    let start = cam.position();

    cam.apply_movement(Movement::Forward, 1.0 / 60.0);

    assert!((start.z - cam.position().z - 0.05).abs() < 1e-6);
    assert!((cam.position().x - start.x).abs() < 1e-6);
    assert_eq!(cam.position().y, start.y);
  }

  #[test]
  fn opposite_moves_cancel()
  {
    let mut cam = FlyCamera::default();
    cam.apply_pointer_delta(37.0, -12.0);
    let start = cam.position();

    for (a, b) in [
      (Movement::Forward, Movement::Backward),
      (Movement::Left, Movement::Right),
      (Movement::Up, Movement::Down),
    ]
    {
      cam.apply_movement(a, 0.0);
      cam.apply_movement(b, 0.0);
    }

    assert!(cam.position().abs_diff_eq(start, EPS));
  }

  #[test]
  fn up_down_follow_world_up()
  {
    let mut cam = FlyCamera::default();
    cam.apply_pointer_delta(0.0, -300.0);

    cam.apply_movement(Movement::Up, 0.0);
    assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 2.05, 5.0), EPS));
  }

  #[test]
  fn per_second_step_scales_with_dt()
  {
    let config = CameraConfig { step: MoveStep::PerSecond { speed: 3.0 }, ..CameraConfig::default() };
    let mut cam = FlyCamera::new(&config);

    cam.apply_movement(Movement::Right, 0.5);
    assert!(cam.position().abs_diff_eq(Vec3::new(1.5, 2.0, 5.0), EPS));
  }

  #[test]
  fn orthographic_ignores_zoom_and_aspect()
  {
    let mut cam = FlyCamera::default();
    let before = cam.projection_matrix(ProjectionMode::Orthographic, 4.0 / 3.0);

    cam.apply_scroll_delta(20.0);
    let after = cam.projection_matrix(ProjectionMode::Orthographic, 16.0 / 9.0);

    assert_eq!(before, after);
  }

  #[test]
  fn orthographic_box_is_three_units_each_way()
  {
    let proj = FlyCamera::default().projection_matrix(ProjectionMode::Orthographic, 4.0 / 3.0);

    assert!(proj.abs_diff_eq(Mat4::orthographic_rh(-3.0, 3.0, -3.0, 3.0, 0.1, 100.0), EPS));
    assert!((proj.x_axis.x - 1.0 / 3.0).abs() < EPS);
  }

  #[test]
  fn perspective_uses_zoom_as_vertical_fov()
  {
    let aspect = 800.0 / 600.0;
    let proj = FlyCamera::default().projection_matrix(ProjectionMode::Perspective, aspect);

    assert!(proj.abs_diff_eq(Mat4::perspective_rh(45.0_f32.to_radians(), aspect, 0.1, 100.0), EPS));
  }

  #[test]
  fn perspective_scale_decreases_as_zoom_grows()
  {
    let mut cam = FlyCamera::default();
    cam.apply_scroll_delta(100.0);

    let mut last = f32::INFINITY;
    for _ in 0..44
    {
      let scale = cam.projection_matrix(ProjectionMode::Perspective, 4.0 / 3.0).y_axis.y;
      assert!(scale < last, "projection must shrink as the field of view widens");
      last = scale;
      cam.apply_scroll_delta(-1.0);
    }
  }

  #[test]
  fn config_angles_are_clamped()
  {
    let config = CameraConfig { pitch: 120.0, zoom: 90.0, ..CameraConfig::default() };
    let cam = FlyCamera::new(&config);

    assert_eq!(cam.pitch(), PITCH_LIMIT);
    assert_eq!(cam.zoom(), ZOOM_MAX);
    assert_unit_basis(&cam);
  }
}
