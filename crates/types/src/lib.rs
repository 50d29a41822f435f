pub mod color;
pub mod text;

pub use color::{Color, ColorParseError};
pub use text::{TextTransform, TransformParseError};
