use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;

use crate::camera::MoveStep;
use crate::error::StartupError;
use crate::state::ToggleTrigger;

//
// ──────────────────────────────────────────────────────────────
//   Config sources
//
//   1. $BROTH_CONFIG, if set (must exist)
//   2. ./broth.json, if present
//   3. built-in defaults
//
//   Every section is `#[serde(default)]`, so a file only needs
//   the keys it wants to change.
// ──────────────────────────────────────────────────────────────
//

pub const CONFIG_ENV: &str = "BROTH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "broth.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig
{
  pub window: WindowConfig,
  pub texture_path: PathBuf,
  pub camera: CameraConfig,
  pub light: LightConfig,
  pub projection_toggle: ToggleTrigger,
  pub hud: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig
{
  pub title: String,
  pub width: u32,
  pub height: u32,
  pub vsync: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig
{
  pub position: Vec3,
  pub yaw: f32,
  pub pitch: f32,
  pub zoom: f32,
  pub sensitivity: f32,
  pub step: MoveStep,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightConfig
{
  pub direction: Vec3,
  pub color: Vec3,
  pub ambient_strength: f32,
}

impl Default for SceneConfig
{
  fn default() -> Self
  {
    Self {
      window: WindowConfig::default(),
      texture_path: PathBuf::from("textures/broth.png"),
      camera: CameraConfig::default(),
      light: LightConfig::default(),
      projection_toggle: ToggleTrigger::default(),
      hud: true,
    }
  }
}

impl Default for WindowConfig
{
  fn default() -> Self
  {
    Self { title: "Chicken Broth Box".to_string(), width: 800, height: 600, vsync: true }
  }
}

impl Default for CameraConfig
{
  fn default() -> Self
  {
    Self {
      position: Vec3::new(0.0, 2.0, 5.0),
      yaw: -90.0,
      pitch: 0.0,
      zoom: 45.0,
      sensitivity: 0.1,
      step: MoveStep::default(),
    }
  }
}

impl Default for LightConfig
{
  fn default() -> Self
  {
    Self { direction: Vec3::splat(-0.5), color: Vec3::new(1.0, 1.0, 0.0), ambient_strength: 0.3 }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Loading
// ──────────────────────────────────────────────────────────────
//

impl SceneConfig
{
  pub fn load() -> Result<Self, StartupError>
  {
    if let Some(path) = std::env::var_os(CONFIG_ENV)
    {
      return Self::from_file(Path::new(&path));
    }

    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.exists()
    {
      return Self::from_file(local);
    }

    log::info!("no {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
    Ok(Self::default())
  }

  pub fn from_file(path: &Path) -> Result<Self, StartupError>
  {
    let config_err = |reason: String| StartupError::Config { path: path.to_path_buf(), reason };

    let text = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
    let config = Self::from_json(&text).map_err(|e| config_err(e.to_string()))?;

    log::info!("loaded config from {}", path.display());
    Ok(config)
  }

  pub fn from_json(text: &str) -> Result<Self, serde_json::Error>
  {
    serde_json::from_str(text)
  }
}
