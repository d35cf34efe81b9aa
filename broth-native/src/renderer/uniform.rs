//
// ──────────────────────────────────────────────────────────────
//   Uniforms (GPU side)
//
//   WGSL layout (scene.wgsl):
//
//   group(0) FrameUniforms
//     view             : mat4x4<f32>   → 64 bytes
//     projection       : mat4x4<f32>   → 64 bytes
//     light_direction  : vec3<f32>     → 12 bytes
//     ambient_strength : f32           →  4 bytes
//     light_color      : vec3<f32>     → 12 bytes
//     _pad             : f32           →  4 bytes
//   Total: 160 bytes
//
//   group(1) ModelUniforms
//     model            : mat4x4<f32>   → 64 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform
{
  pub view: [[f32; 4]; 4],
  pub projection: [[f32; 4]; 4],
  pub light_direction: [f32; 3],
  pub ambient_strength: f32,
  pub light_color: [f32; 3],
  pub _pad: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform
{
  pub model: [[f32; 4]; 4],
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<FrameUniform>() == 160);
const _: () = assert!(std::mem::size_of::<ModelUniform>() == 64);
