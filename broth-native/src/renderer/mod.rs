mod core;
mod depth;
mod frame;
mod gui;
mod pipeline;
mod registry;
mod texture;
mod uniform;

pub use self::core::{FrameOutcome, Renderer};
