pub mod primitives;

//
// ──────────────────────────────────────────────────────────────
//   Vertex layout: position, colour, texture coordinate
//
//   WGSL (scene.wgsl):
//     @location(0) position : vec3<f32>
//     @location(1) color    : vec4<f32>
//     @location(2) uv       : vec2<f32>
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex
{
  pub position: [f32; 3],
  pub color: [f32; 4],
  pub uv: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<Vertex>() == 36);

impl Vertex
{
  pub const fn new(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self
  {
    Self { position, color, uv }
  }
}

/// CPU-side geometry for one primitive, ready for upload.
#[derive(Debug, Clone, Default)]
pub struct MeshData
{
  pub vertices: Vec<Vertex>,
  pub indices: Vec<u32>,
}

impl MeshData
{
  pub fn vertex_count(&self) -> usize
  {
    self.vertices.len()
  }

  pub fn index_count(&self) -> u32
  {
    self.indices.len() as u32
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Scene primitives
// ──────────────────────────────────────────────────────────────
//

const PLANE_WIDTH: f32 = 5.0;
const PLANE_LENGTH: f32 = 5.0;
const SPHERE_RADIUS: f32 = 0.5;
const SPHERE_SEGMENTS: u32 = 32;
const CAP_RADIUS: f32 = 0.2;
const CAP_HEIGHT: f32 = 0.7;
const CAP_SEGMENTS: u32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind
{
  Cube,
  Cylinder,
  Plane,
  Sphere,
  Pyramid,
}

impl MeshKind
{
  /// Creation and draw order.
  pub const ALL: [MeshKind; 5] = [Self::Cube, Self::Cylinder, Self::Plane, Self::Sphere, Self::Pyramid];

  pub fn label(self) -> &'static str
  {
    match self
    {
      Self::Cube => "Cube",
      Self::Cylinder => "Cylinder",
      Self::Plane => "Plane",
      Self::Sphere => "Sphere",
      Self::Pyramid => "Pyramid",
    }
  }

  pub fn build(self) -> MeshData
  {
    match self
    {
      Self::Cube => primitives::cube(),
      Self::Cylinder => primitives::cylinder(CAP_RADIUS, CAP_HEIGHT, CAP_SEGMENTS),
      Self::Plane => primitives::plane(PLANE_WIDTH, PLANE_LENGTH),
      Self::Sphere => primitives::sphere(SPHERE_RADIUS, SPHERE_SEGMENTS),
      Self::Pyramid => primitives::pyramid(),
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn every_scene_mesh_has_in_range_indices()
  {
    for kind in MeshKind::ALL
    {
      let mesh = kind.build();
      let count = mesh.vertex_count() as u32;

      assert!(!mesh.indices.is_empty(), "{} has no indices", kind.label());
      assert_eq!(mesh.indices.len() % 3, 0, "{} is not a triangle list", kind.label());
      assert!(mesh.indices.iter().all(|&i| i < count), "{} index out of range", kind.label());
    }
  }

  #[test]
  fn vertex_bytes_are_tightly_packed()
  {
    let mesh = MeshKind::Pyramid.build();
    let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);

    assert_eq!(bytes.len(), 12 * 36);
  }
}
