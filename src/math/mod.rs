mod color;
mod euler;

pub use color::Color;
pub use euler::{Euler, EulerOrder};
