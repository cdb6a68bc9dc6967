use crate::error::RenderError;
use crate::table::MeasuredTable;
use crate::traits::Canvas;
use crate::types::{RectStyle, Stroke, TextStyle};
use crate::utils::{check_color, check_finite, check_rect};
use medreport_types::{Point, Rect, Size};
use std::ops::Range;

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        style: RectStyle,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        text: String,
        at: Point,
        style: TextStyle,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        origin: Point,
        height: f32,
    },
}

/// A canvas that keeps every draw call per page instead of producing output.
///
/// Used for dry runs (page counts, section summaries) and for asserting on
/// layout decisions without parsing a PDF. It applies the same argument
/// validation as the PDF backend.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: Size,
    pages: Vec<Vec<DrawOp>>,
    current: usize,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pages: vec![Vec::new()],
            current: 0,
        }
    }

    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    pub fn ops(&self, page: usize) -> &[DrawOp] {
        self.pages.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every text run drawn on `page`, in draw order.
    pub fn texts(&self, page: usize) -> Vec<&str> {
        self.ops(page)
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every text run of the document, in page then draw order.
    pub fn all_texts(&self) -> Vec<&str> {
        (0..self.pages.len()).flat_map(|p| self.texts(p)).collect()
    }

    /// Every table drawn, with the page it landed on.
    pub fn tables(&self) -> Vec<(usize, &DrawOp)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(page, ops)| {
                ops.iter()
                    .filter(|op| matches!(op, DrawOp::Table { .. }))
                    .map(move |op| (page, op))
            })
            .collect()
    }

    fn push(&mut self, op: DrawOp) {
        self.pages[self.current].push(op);
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> Size {
        self.size
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn new_page(&mut self) -> Result<usize, RenderError> {
        self.pages.push(Vec::new());
        self.current = self.pages.len() - 1;
        Ok(self.current)
    }

    fn set_page(&mut self, index: usize) -> Result<(), RenderError> {
        if index >= self.pages.len() {
            return Err(RenderError::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) -> Result<(), RenderError> {
        check_rect(&rect)?;
        if let Some(fill) = &style.fill {
            check_color(fill)?;
        }
        if let Some(stroke) = &style.stroke {
            check_color(&stroke.color)?;
        }
        self.push(DrawOp::Rect { rect, style: *style });
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        check_finite("line", &[from.x, from.y, to.x, to.y, stroke.width])?;
        check_color(&stroke.color)?;
        self.push(DrawOp::Line { from, to, stroke: *stroke });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), RenderError> {
        check_finite("text anchor", &[at.x, at.y, style.size, style.rotation])?;
        check_color(&style.color)?;
        self.push(DrawOp::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
        Ok(())
    }

    fn draw_table(
        &mut self,
        table: &MeasuredTable<'_>,
        rows: Range<usize>,
        origin: Point,
    ) -> Result<f32, RenderError> {
        if rows.start > rows.end || rows.end > table.rows.len() {
            return Err(RenderError::InvalidGeometry(format!(
                "row range {:?} is outside a table of {} rows",
                rows,
                table.rows.len()
            )));
        }
        let height = table.height_of(rows.clone());
        self.push(DrawOp::Table {
            headers: table.table.columns.iter().map(|c| c.header.clone()).collect(),
            rows: table.table.rows[rows].to_vec(),
            origin,
            height,
        });
        Ok(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Table, TableStyle};
    use medreport_types::Color;

    #[test]
    fn starts_with_one_page_and_tracks_current() {
        let mut canvas = RecordingCanvas::new(Size::new(100.0, 100.0));
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(canvas.new_page().unwrap(), 1);
        canvas.draw_text("second", Point::new(1.0, 1.0), &TextStyle::new(9.0)).unwrap();
        canvas.set_page(0).unwrap();
        canvas.draw_text("first", Point::new(1.0, 1.0), &TextStyle::new(9.0)).unwrap();
        assert_eq!(canvas.texts(0), vec!["first"]);
        assert_eq!(canvas.texts(1), vec!["second"]);
    }

    #[test]
    fn set_page_out_of_range_fails() {
        let mut canvas = RecordingCanvas::new(Size::new(100.0, 100.0));
        assert!(matches!(
            canvas.set_page(3),
            Err(RenderError::PageOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn rejects_invalid_color() {
        let mut canvas = RecordingCanvas::new(Size::new(100.0, 100.0));
        let style = RectStyle::filled(Color::gray(10).with_alpha(2.0));
        assert!(matches!(
            canvas.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &style),
            Err(RenderError::InvalidColor(_))
        ));
    }

    #[test]
    fn records_table_rows_for_the_requested_range() {
        let mut table = Table::new(vec![Column::new("#", 1.0), Column::new("Item", 4.0)], TableStyle::default());
        for i in 1..=3 {
            table.push_row(vec![i.to_string(), format!("item {}", i)]);
        }
        let measured = table.measure(100.0).unwrap();
        let mut canvas = RecordingCanvas::new(Size::new(200.0, 200.0));
        let height = canvas.draw_table(&measured, 1..3, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(height, measured.height_of(1..3));

        let tables = canvas.tables();
        assert_eq!(tables.len(), 1);
        match tables[0].1 {
            DrawOp::Table { rows, headers, .. } => {
                assert_eq!(headers, &vec!["#".to_string(), "Item".to_string()]);
                assert_eq!(rows[0][1], "item 2");
                assert_eq!(rows[1][1], "item 3");
            }
            other => panic!("unexpected op {:?}", other),
        }
    }
}
