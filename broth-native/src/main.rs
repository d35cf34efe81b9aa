mod app;
mod camera;
mod config;
mod error;
mod input;
mod mesh;
mod renderer;
mod state;

use std::process::ExitCode;

use anyhow::Context;

use crate::config::SceneConfig;

// RUST_LOG overrides this; RUST_LOG=wgpu=debug for more verbose GPU output
const DEFAULT_LOG_FILTER: &str = "info,wgpu_hal=off,naga=warn";

fn main() -> ExitCode
{
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();

  match run()
  {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) =>
    {
      log::error!("{err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run() -> anyhow::Result<()>
{
  let config = SceneConfig::load().context("loading scene config")?;
  app::run(config).context("starting the scene")?;
  Ok(())
}
