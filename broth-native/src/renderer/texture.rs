use std::path::Path;

use crate::error::StartupError;

//
// ──────────────────────────────────────────────────────────────
//   Decoding
// ──────────────────────────────────────────────────────────────
//

/// A decoded image, expanded to RGBA8 for upload.
pub struct DecodedImage
{
  pub width: u32,
  pub height: u32,
  pub channels: u8,
  pub rgba: Vec<u8>,
}

pub fn decode(path: &Path) -> Result<DecodedImage, StartupError>
{
  let image =
    image::open(path).map_err(|source| StartupError::TextureLoad { path: path.to_path_buf(), source })?;

  let channels = image.color().channel_count();
  if channels != 3 && channels != 4
  {
    return Err(StartupError::UnsupportedImageFormat { path: path.to_path_buf(), channels });
  }

  let rgba = image.to_rgba8();
  let (width, height) = rgba.dimensions();

  Ok(DecodedImage { width, height, channels, rgba: rgba.into_raw() })
}

//
// ──────────────────────────────────────────────────────────────
//   SceneTexture
//
//   The one texture the scene samples as `uTexture`. Bound once
//   at group(2) for the whole session.
// ──────────────────────────────────────────────────────────────
//

pub struct SceneTexture
{
  texture: wgpu::Texture,
  pub bind_group: wgpu::BindGroup,
}

impl SceneTexture
{
  pub fn load(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    path: &Path,
  ) -> Result<Self, StartupError>
  {
    let image = decode(path)?;
    log::info!("texture {}: {}x{}, {} channels", path.display(), image.width, image.height, image.channels);

    let size = wgpu::Extent3d { width: image.width, height: image.height, depth_or_array_layers: 1 };

    // Unorm, not sRGB: the shader reads the texels as encoded vectors
    let texture = device.create_texture(&wgpu::TextureDescriptor {
      label: Some("Scene Texture"),
      size,
      mip_level_count: 1,
      sample_count: 1,
      dimension: wgpu::TextureDimension::D2,
      format: wgpu::TextureFormat::Rgba8Unorm,
      usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
      view_formats: &[],
    });

    queue.write_texture(
      texture.as_image_copy(),
      &image.rgba,
      wgpu::TexelCopyBufferLayout {
        offset: 0,
        bytes_per_row: Some(4 * image.width),
        rows_per_image: Some(image.height),
      },
      size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
      label: Some("Scene Sampler"),
      address_mode_u: wgpu::AddressMode::Repeat,
      address_mode_v: wgpu::AddressMode::Repeat,
      mag_filter: wgpu::FilterMode::Linear,
      min_filter: wgpu::FilterMode::Linear,
      ..Default::default()
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
      label: Some("Scene Texture BG"),
      layout,
      entries: &[
        wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&view) },
        wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&sampler) },
      ],
    });

    Ok(Self { texture, bind_group })
  }

  pub fn release(&self)
  {
    self.texture.destroy();
  }
}
