use crate::error::RenderError;
use crate::traits::Canvas;
use crate::types::{FontFace, RectStyle, Stroke, TextAlign, TextStyle};
use crate::utils::wrap_text;
use medreport_types::{Color, Point, Rect};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    /// Share of the table width relative to the other columns.
    pub weight: f32,
    pub align: TextAlign,
}

impl Column {
    pub fn new(header: impl Into<String>, weight: f32) -> Self {
        Self {
            header: header.into(),
            weight,
            align: TextAlign::Left,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub font_size: f32,
    /// Line advance as a multiple of `font_size`.
    pub line_height: f32,
    pub padding: f32,
    pub header_fill: Color,
    pub header_text: Color,
    pub body_text: Color,
    /// Fill for every second body row.
    pub stripe_fill: Option<Color>,
    pub grid: Option<Stroke>,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size: 9.0,
            line_height: 1.15,
            padding: 4.0,
            header_fill: Color::gray(80),
            header_text: Color::WHITE,
            body_text: Color::BLACK,
            stripe_fill: None,
            grid: None,
        }
    }
}

/// A table of plain-text cells. Rows keep the order they were pushed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub style: TableStyle,
}

impl Table {
    pub fn new(columns: Vec<Column>, style: TableStyle) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            style,
        }
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Sizes the columns to `width` and wraps every cell.
    pub fn measure(&self, width: f32) -> Result<MeasuredTable<'_>, RenderError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(RenderError::InvalidGeometry(format!(
                "table width must be positive, got {}",
                width
            )));
        }
        if self.columns.is_empty() {
            return Err(RenderError::InvalidGeometry("table has no columns".into()));
        }
        if self.columns.iter().any(|c| !c.weight.is_finite() || c.weight <= 0.0) {
            return Err(RenderError::InvalidGeometry(
                "column weights must be positive".into(),
            ));
        }
        if let Some((index, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.columns.len())
        {
            return Err(RenderError::InvalidGeometry(format!(
                "row {} has {} cells but the table has {} columns",
                index,
                row.len(),
                self.columns.len()
            )));
        }

        let total_weight: f32 = self.columns.iter().map(|c| c.weight).sum();
        let column_widths: Vec<f32> = self
            .columns
            .iter()
            .map(|c| width * c.weight / total_weight)
            .collect();

        let headers: Vec<&str> = self.columns.iter().map(|c| c.header.as_str()).collect();
        let header = self.measure_row(&headers, &column_widths, FontFace::Bold);
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<&str> = row.iter().map(String::as_str).collect();
                self.measure_row(&cells, &column_widths, FontFace::Regular)
            })
            .collect();

        Ok(MeasuredTable {
            table: self,
            width,
            column_widths,
            header,
            rows,
        })
    }

    fn measure_row(&self, cells: &[&str], widths: &[f32], face: FontFace) -> MeasuredRow {
        let style = &self.style;
        let lines: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(text, width)| {
                let inner = (width - 2.0 * style.padding).max(1.0);
                wrap_text(text, face, style.font_size, inner)
            })
            .collect();
        let line_count = lines.iter().map(Vec::len).max().unwrap_or(1);
        MeasuredRow {
            height: line_count as f32 * style.font_size * style.line_height + 2.0 * style.padding,
            lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredRow {
    /// Wrapped lines, one entry per column.
    pub lines: Vec<Vec<String>>,
    pub height: f32,
}

/// A table whose column widths and row heights are known.
#[derive(Debug, Clone)]
pub struct MeasuredTable<'a> {
    pub table: &'a Table,
    pub width: f32,
    pub column_widths: Vec<f32>,
    pub header: MeasuredRow,
    pub rows: Vec<MeasuredRow>,
}

impl MeasuredTable<'_> {
    /// Height of the header plus every body row.
    pub fn height(&self) -> f32 {
        self.height_of(0..self.rows.len())
    }

    /// Height of the header plus the given body rows.
    pub fn height_of(&self, rows: Range<usize>) -> f32 {
        self.header.height + self.rows[rows].iter().map(|r| r.height).sum::<f32>()
    }

    pub fn line_height(&self) -> f32 {
        self.table.style.font_size * self.table.style.line_height
    }
}

/// Paints a table out of rectangles and text runs. Backends without a
/// native table primitive use this as their `draw_table`.
pub fn paint_table<C: Canvas + ?Sized>(
    canvas: &mut C,
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
    let style = &table.table.style;
    let mut y = origin.y;

    paint_row(
        canvas,
        table,
        &table.header,
        Point::new(origin.x, y),
        Some(style.header_fill),
        FontFace::Bold,
        style.header_text,
    )?;
    y += table.header.height;

    for index in rows {
        let row = &table.rows[index];
        let fill = if index % 2 == 1 { style.stripe_fill } else { None };
        paint_row(
            canvas,
            table,
            row,
            Point::new(origin.x, y),
            fill,
            FontFace::Regular,
            style.body_text,
        )?;
        y += row.height;
    }

    Ok(y - origin.y)
}

fn paint_row<C: Canvas + ?Sized>(
    canvas: &mut C,
    table: &MeasuredTable<'_>,
    row: &MeasuredRow,
    top_left: Point,
    fill: Option<Color>,
    face: FontFace,
    color: Color,
) -> Result<(), RenderError> {
    let style = &table.table.style;
    if let Some(fill) = fill {
        canvas.draw_rect(
            Rect::new(top_left.x, top_left.y, table.width, row.height),
            &RectStyle::filled(fill),
        )?;
    }

    let mut cell_x = top_left.x;
    let cells = table.table.columns.iter().zip(&table.column_widths).zip(&row.lines);
    for ((column, &width), lines) in cells {
        if let Some(grid) = style.grid {
            let outline = RectStyle::default().stroked(grid);
            canvas.draw_rect(Rect::new(cell_x, top_left.y, width, row.height), &outline)?;
        }

        let anchor_x = match column.align {
            TextAlign::Left => cell_x + style.padding,
            TextAlign::Center => cell_x + width / 2.0,
            TextAlign::Right => cell_x + width - style.padding,
        };
        let text_style = TextStyle::new(style.font_size)
            .face(face)
            .color(color)
            .align(column.align);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = top_left.y
                + style.padding
                + i as f32 * table.line_height()
                + style.font_size * 0.8;
            canvas.draw_text(line, Point::new(anchor_x, baseline), &text_style)?;
        }
        cell_x += width;
    }
    Ok(())
}
