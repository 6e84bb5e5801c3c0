pub mod camera;
pub mod cli;
pub mod config;
pub mod controls;
pub mod core;
pub mod demo;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod traits;
pub mod types;

pub use camera::PerspectiveCamera;
pub use controls::{ControlsEvent, InputSource, PointerLockControls};
pub use demo::CubeDemo;
