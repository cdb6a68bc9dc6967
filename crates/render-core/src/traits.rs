use crate::error::RenderError;
use crate::table::{paint_table, MeasuredTable};
use crate::types::{RectStyle, Stroke, TextStyle};
use medreport_types::{Point, Rect, Size};
use std::ops::Range;

/// The drawing capabilities a layout pass needs from an output backend.
///
/// Coordinates are in points with the origin at the top-left corner of the
/// page. A canvas always has at least one page; drawing goes to the current
/// page, which `new_page` advances and `set_page` moves back to for
/// post-passes such as footers.
pub trait Canvas {
    fn page_size(&self) -> Size;

    fn page_count(&self) -> usize;

    /// Zero-based index of the page receiving draw calls.
    fn current_page(&self) -> usize;

    /// Appends a page, makes it current and returns its index.
    fn new_page(&mut self) -> Result<usize, RenderError>;

    fn set_page(&mut self, index: usize) -> Result<(), RenderError>;

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) -> Result<(), RenderError>;

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError>;

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), RenderError>;

    /// Draws the given row range of a measured table with its header on top,
    /// and returns the height consumed.
    fn draw_table(
        &mut self,
        table: &MeasuredTable<'_>,
        rows: Range<usize>,
        origin: Point,
    ) -> Result<f32, RenderError> {
        paint_table(self, table, rows, origin)
    }
}
