pub mod gemini;
pub mod image;
pub mod outcome;
pub mod view;

pub use image::*;
pub use outcome::*;
pub use view::*;
