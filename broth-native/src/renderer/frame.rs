use glam::{Mat4, Vec3};

use crate::mesh::MeshKind;
use crate::state::{AppState, LightState};

use super::uniform::{FrameUniform, ModelUniform};

//
// ──────────────────────────────────────────────────────────────
//   Frame plan
//
//   Everything one frame needs, computed on the CPU before any
//   GPU work:
//
//     BeginFrame → ClearTargets
//       → for mesh in Cube, Cylinder, Plane, Sphere, Pyramid:
//           set model/view/projection, bind mesh, draw indexed
//       → Present
//
//   The renderer executes the plan; nothing here can fail.
// ──────────────────────────────────────────────────────────────
//

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

// Keeps the sphere and pyramid from overlapping the box
const SIDE_OFFSET: f32 = 1.5;

pub fn model_transform(kind: MeshKind) -> Mat4
{
  match kind
  {
    MeshKind::Cube | MeshKind::Cylinder | MeshKind::Plane => Mat4::IDENTITY,
    MeshKind::Sphere => Mat4::from_translation(Vec3::new(SIDE_OFFSET, 0.0, 0.0)),
    MeshKind::Pyramid => Mat4::from_translation(Vec3::new(-SIDE_OFFSET, 0.0, 0.0)),
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand
{
  pub mesh: MeshKind,
  pub model: Mat4,
}

impl DrawCommand
{
  pub fn model_uniform(&self) -> ModelUniform
  {
    ModelUniform { model: self.model.to_cols_array_2d() }
  }
}

#[derive(Debug, Clone)]
pub struct FramePlan
{
  pub view: Mat4,
  pub projection: Mat4,
  pub light: LightState,
  pub draws: Vec<DrawCommand>,
}

impl FramePlan
{
  pub fn build(state: &AppState, aspect: f32) -> Self
  {
    let draws = MeshKind::ALL.iter().map(|&mesh| DrawCommand { mesh, model: model_transform(mesh) }).collect();

    Self {
      view: state.camera.view_matrix(),
      projection: state.camera.projection_matrix(state.projection, aspect),
      light: *state.light(),
      draws,
    }
  }

  pub fn frame_uniform(&self) -> FrameUniform
  {
    FrameUniform {
      view: self.view.to_cols_array_2d(),
      projection: self.projection.to_cols_array_2d(),
      light_direction: self.light.direction.to_array(),
      ambient_strength: self.light.ambient_strength,
      light_color: self.light.color.to_array(),
      _pad: 0.0,
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::state::ProjectionMode;

  const ASPECT: f32 = 800.0 / 600.0;

  #[test]
  fn draws_every_mesh_in_order()
  {
    let plan = FramePlan::build(&AppState::default(), ASPECT);
    let order: Vec<MeshKind> = plan.draws.iter().map(|d| d.mesh).collect();

    assert_eq!(order, MeshKind::ALL.to_vec());
  }

  #[test]
  fn side_meshes_are_offset_along_x()
  {
    let plan = FramePlan::build(&AppState::default(), ASPECT);

    for draw in &plan.draws
    {
      let offset = draw.model.w_axis.truncate();
      let expected = match draw.mesh
      {
        MeshKind::Sphere => Vec3::new(1.5, 0.0, 0.0),
        MeshKind::Pyramid => Vec3::new(-1.5, 0.0, 0.0),
        _ => Vec3::ZERO,
      };

      assert_eq!(offset, expected, "{}", draw.mesh.label());
    }
  }

  #[test]
  fn projection_follows_mode()
  {
    let mut state = AppState::default();
    let perspective = FramePlan::build(&state, ASPECT).projection;

    state.toggle_projection();
    let orthographic = FramePlan::build(&state, ASPECT).projection;

    assert_eq!(perspective, state.camera.projection_matrix(ProjectionMode::Perspective, ASPECT));
    assert_eq!(orthographic, state.camera.projection_matrix(ProjectionMode::Orthographic, ASPECT));
    assert_ne!(perspective, orthographic);
  }

  #[test]
  fn uniform_carries_light_and_matrices()
  {
    let state = AppState::default();
    let plan = FramePlan::build(&state, ASPECT);
    let uniform = plan.frame_uniform();

    assert_eq!(uniform.view, state.camera.view_matrix().to_cols_array_2d());
    assert_eq!(uniform.light_direction, [-0.5, -0.5, -0.5]);
    assert_eq!(uniform.light_color, [1.0, 1.0, 0.0]);
    assert_eq!(uniform.ambient_strength, 0.3);
  }

  #[test]
  fn model_uniform_is_column_major()
  {
    let draw = DrawCommand { mesh: MeshKind::Sphere, model: model_transform(MeshKind::Sphere) };
    let uniform = draw.model_uniform();

    assert_eq!(uniform.model[3], [1.5, 0.0, 0.0, 1.0]);
  }
}
