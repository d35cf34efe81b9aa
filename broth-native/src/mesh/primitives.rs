use std::f32::consts::{PI, TAU};

use super::{MeshData, Vertex};

//
// ──────────────────────────────────────────────────────────────
//   Colours (r, g, b, a)
// ──────────────────────────────────────────────────────────────
//

const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const ORANGE: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const CHEESE: [f32; 4] = [1.0, 0.8, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const PEEL: [f32; 4] = [1.0, 0.55, 0.0, 1.0];
const CAP: [f32; 4] = [0.9, 0.9, 0.9, 1.0];

const PLANE_Y: f32 = -0.8;

//
// ──────────────────────────────────────────────────────────────
//   Box (the broth carton)
// ──────────────────────────────────────────────────────────────
//

const BOX_X: f32 = 0.3;
const BOX_TOP: f32 = 0.5;
const BOX_BOTTOM: f32 = -0.7;
const BOX_FRONT: f32 = 0.6;
const BOX_BACK: f32 = -0.25;

pub fn cube() -> MeshData
{
  let corners: [([f32; 3], [f32; 4]); 8] = [
    ([BOX_X, BOX_TOP, BOX_FRONT], YELLOW),      // 0 top right front
    ([BOX_X, BOX_BOTTOM, BOX_FRONT], ORANGE),   // 1 bottom right front
    ([-BOX_X, BOX_BOTTOM, BOX_FRONT], YELLOW),  // 2 bottom left front
    ([-BOX_X, BOX_TOP, BOX_FRONT], MAGENTA),    // 3 top left front
    ([BOX_X, BOX_TOP, BOX_BACK], YELLOW),       // 4 top right back
    ([BOX_X, BOX_BOTTOM, BOX_BACK], ORANGE),    // 5 bottom right back
    ([-BOX_X, BOX_BOTTOM, BOX_BACK], YELLOW),   // 6 bottom left back
    ([-BOX_X, BOX_TOP, BOX_BACK], ORANGE),      // 7 top left back
  ];

  // Front-facing planar mapping: u across X, v down Y
  let vertices = corners
    .iter()
    .map(|&(p, c)| {
      let u = (p[0] + BOX_X) / (2.0 * BOX_X);
      let v = (BOX_TOP - p[1]) / (BOX_TOP - BOX_BOTTOM);
      Vertex::new(p, c, [u, v])
    })
    .collect();

  #[rustfmt::skip]
  let indices = vec![
    0, 1, 4,  1, 4, 5,  // right
    4, 5, 7,  5, 6, 7,  // back
    1, 2, 5,  2, 5, 6,  // bottom
    0, 3, 4,  3, 4, 7,  // top
    2, 3, 6,  3, 6, 7,  // left
    0, 1, 3,  1, 2, 3,  // front
  ];

  MeshData { vertices, indices }
}

//
// ──────────────────────────────────────────────────────────────
//   Cap: a fan from the origin up to a ring at `height`
// ──────────────────────────────────────────────────────────────
//

pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData
{
  debug_assert!(segments >= 3, "a cap needs at least 3 segments, got {segments}");

  let mut vertices = Vec::with_capacity(segments as usize + 1);
  vertices.push(Vertex::new([0.0, 0.0, 0.0], CAP, [0.5, 0.5]));

  let step = TAU / segments as f32;
  for i in 0..segments
  {
    let (sin, cos) = (i as f32 * step).sin_cos();
    vertices.push(Vertex::new([radius * cos, radius * sin, height], CAP, [0.5 + 0.5 * cos, 0.5 + 0.5 * sin]));
  }

  let mut indices = Vec::with_capacity(segments as usize * 3);
  for i in 0..segments
  {
    indices.extend_from_slice(&[0, i + 1, (i + 1) % segments + 1]);
  }

  MeshData { vertices, indices }
}

//
// ──────────────────────────────────────────────────────────────
//   Ground plane (table surface)
// ──────────────────────────────────────────────────────────────
//

pub fn plane(width: f32, length: f32) -> MeshData
{
  let hw = width / 2.0;
  let hl = length / 2.0;

  let vertices = vec![
    Vertex::new([-hw, PLANE_Y, hl], GREEN, [0.0, 1.0]),  // left front
    Vertex::new([hw, PLANE_Y, hl], GREEN, [1.0, 1.0]),   // right front
    Vertex::new([hw, PLANE_Y, -hl], GREEN, [1.0, 0.0]),  // right back
    Vertex::new([-hw, PLANE_Y, -hl], GREEN, [0.0, 0.0]), // left back
  ];

  MeshData { vertices, indices: vec![0, 1, 2, 0, 2, 3] }
}

//
// ──────────────────────────────────────────────────────────────
//   UV sphere (the orange)
//
//   Ring i sits at polar angle phi = i/segments · π, column j at
//   azimuth theta = j/segments · 2π. The seam column is duplicated
//   so texture coordinates do not wrap.
// ──────────────────────────────────────────────────────────────
//

pub fn sphere(radius: f32, segments: u32) -> MeshData
{
  let ring = segments + 1;
  let mut vertices = Vec::with_capacity((ring * ring) as usize);

  for i in 0..=segments
  {
    let v = i as f32 / segments as f32;
    let (sin_phi, cos_phi) = (v * PI).sin_cos();

    for j in 0..=segments
    {
      let u = j as f32 / segments as f32;
      let (sin_theta, cos_theta) = (u * TAU).sin_cos();

      let position = [radius * sin_phi * cos_theta, radius * cos_phi, radius * sin_phi * sin_theta];
      vertices.push(Vertex::new(position, PEEL, [u, v]));
    }
  }

  let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
  for i in 0..segments
  {
    for j in 0..segments
    {
      let k = i * ring + j;
      indices.extend_from_slice(&[k, k + 1, k + ring, k + 1, k + ring + 1, k + ring]);
    }
  }

  MeshData { vertices, indices }
}

//
// ──────────────────────────────────────────────────────────────
//   Pyramid (the cheese piece)
//
//   Four side faces, each its own three vertices; no base.
// ──────────────────────────────────────────────────────────────
//

pub fn pyramid() -> MeshData
{
  const APEX: [f32; 3] = [0.0, 0.5, 0.0];
  const BASE: [[f32; 3]; 4] = [
    [-0.5, -0.5, -0.5], // left back
    [0.5, -0.5, -0.5],  // right back
    [0.5, -0.5, 0.5],   // right front
    [-0.5, -0.5, 0.5],  // left front
  ];

  let mut vertices = Vec::with_capacity(12);
  for face in 0..4
  {
    vertices.push(Vertex::new(APEX, YELLOW, [0.5, 0.0]));
    vertices.push(Vertex::new(BASE[face], CHEESE, [0.0, 1.0]));
    vertices.push(Vertex::new(BASE[(face + 1) % 4], CHEESE, [1.0, 1.0]));
  }

  let indices = (0..vertices.len() as u32).collect();

  MeshData { vertices, indices }
}
