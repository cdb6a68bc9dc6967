//! Core rendering abstractions for report generation.
//!
//! This crate provides the drawing surface shared by every output backend:
//! - `Canvas` trait for the drawing primitives a layout pass needs
//! - Text, rectangle and table styling types
//! - Table measurement (column sizing and text wrapping)
//! - Built-in Helvetica metrics used for measuring and aligning text
//! - `RecordingCanvas`, a backend that keeps every draw call for inspection

mod error;
mod recording;
mod table;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use recording::{DrawOp, RecordingCanvas};
pub use table::{paint_table, Column, MeasuredRow, MeasuredTable, Table, TableStyle};
pub use traits::Canvas;
pub use types::{FontFace, RectStyle, Stroke, TextAlign, TextStyle};
