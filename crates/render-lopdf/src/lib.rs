//! PDF canvas backend using lopdf.
//!
//! `LopdfCanvas` implements the render-core `Canvas` trait by accumulating
//! one content stream per page, and `PdfWriter` assembles those streams with
//! the shared font and graphics-state resources into the final document.

mod helpers;
mod renderer;
mod writer;

pub use renderer::{DocumentInfo, LopdfCanvas};
pub use writer::PdfWriter;
