pub mod color;
pub mod document;
pub mod geometry;

pub use color::Color;
pub use document::{Margins, PageSize};
pub use geometry::{Point, Rect, Size};
