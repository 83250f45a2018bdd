pub mod common;
pub mod image;
pub mod mode;
pub mod wire;

pub use common::*;
pub use image::*;
pub use mode::*;
