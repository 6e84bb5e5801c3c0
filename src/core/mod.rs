pub mod controller;
pub mod gpu_context;
pub mod input_adapter;
pub mod timer;

pub use controller::{Button, Controller};
pub use gpu_context::GpuContext;
pub use input_adapter::{CursorHost, WinitInputSource};
pub use timer::{FixedHz, FpsCounter};
