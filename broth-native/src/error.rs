use std::path::PathBuf;

use thiserror::Error;

//
// ──────────────────────────────────────────────────────────────
//   Startup errors
//
//   Everything fallible happens before the first frame. Each
//   variant is fatal: it is logged and the process exits with a
//   failure status. Nothing in the frame loop returns these.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
pub enum StartupError
{
  #[error("failed to initialise the graphics context: {0}")]
  ContextInit(String),

  #[error("shader compilation failed:\n{0}")]
  ShaderCompile(String),

  #[error("shader program link failed:\n{0}")]
  ShaderLink(String),

  #[error("failed to load texture {}", .path.display())]
  TextureLoad
  {
    path: PathBuf,
    #[source]
    source: image::ImageError,
  },

  #[error("texture {} has {channels} channels; only RGB and RGBA are supported", .path.display())]
  UnsupportedImageFormat
  {
    path: PathBuf, channels: u8
  },

  #[error("failed to read config {}: {reason}", .path.display())]
  Config
  {
    path: PathBuf, reason: String
  },
}

impl StartupError
{
  pub fn context(err: impl std::fmt::Display) -> Self
  {
    Self::ContextInit(err.to_string())
  }
}
