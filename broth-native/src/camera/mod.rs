mod fly;

pub use fly::{FlyCamera, MoveStep, Movement};
