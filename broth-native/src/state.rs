use glam::Vec3;
use serde::Deserialize;

use crate::camera::FlyCamera;
use crate::config::{LightConfig, SceneConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode
{
  #[default]
  Perspective,
  Orthographic,
}

impl ProjectionMode
{
  pub fn toggled(self) -> Self
  {
    match self
    {
      Self::Perspective => Self::Orthographic,
      Self::Orthographic => Self::Perspective,
    }
  }

  pub fn label(self) -> &'static str
  {
    match self
    {
      Self::Perspective => "perspective",
      Self::Orthographic => "orthographic",
    }
  }
}

/// When the projection key flips the mode.
///
/// `OnPress` flips once per key-down edge. `WhileHeld` flips on every
/// frame the key is observed down, which is what a plain per-frame
/// key-state poll does; holding the key makes the view flicker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleTrigger
{
  #[default]
  OnPress,
  WhileHeld,
}

/// Single directional light. Fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState
{
  pub direction: Vec3,
  pub color: Vec3,
  pub ambient_strength: f32,
}

impl From<&LightConfig> for LightState
{
  fn from(config: &LightConfig) -> Self
  {
    Self { direction: config.direction, color: config.color, ambient_strength: config.ambient_strength }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   AppState
//
//   Everything the input dispatcher mutates and the render pass
//   reads. One instance, owned by the app shell.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct AppState
{
  pub camera: FlyCamera,
  pub projection: ProjectionMode,
  pub toggle_trigger: ToggleTrigger,
  light: LightState,
}

impl AppState
{
  pub fn new(config: &SceneConfig) -> Self
  {
    Self {
      camera: FlyCamera::new(&config.camera),
      projection: ProjectionMode::default(),
      toggle_trigger: config.projection_toggle,
      light: LightState::from(&config.light),
    }
  }

  pub fn light(&self) -> &LightState
  {
    &self.light
  }

  pub fn toggle_projection(&mut self)
  {
    self.projection = self.projection.toggled();
    log::debug!("projection mode: {}", self.projection.label());
  }
}

impl Default for AppState
{
  fn default() -> Self
  {
    Self::new(&SceneConfig::default())
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn starts_in_perspective()
  {
    let state = AppState::default();
    assert_eq!(state.projection, ProjectionMode::Perspective);
  }

  #[test]
  fn toggling_twice_restores_the_mode()
  {
    let mut state = AppState::default();

    state.toggle_projection();
    assert_eq!(state.projection, ProjectionMode::Orthographic);

    state.toggle_projection();
    assert_eq!(state.projection, ProjectionMode::Perspective);
  }

  #[test]
  fn light_comes_from_config()
  {
    let state = AppState::default();
    let light = state.light();

    assert_eq!(light.direction, Vec3::splat(-0.5));
    assert_eq!(light.color, Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(light.ambient_strength, 0.3);
  }
}
