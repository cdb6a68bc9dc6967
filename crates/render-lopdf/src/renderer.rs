use crate::helpers::{font_resource_name, PageContext};
use crate::writer::PdfWriter;
use lopdf::{dictionary, Dictionary, Object, StringFormat};
use medreport_render_core::utils::{check_color, check_finite, check_rect, text_width, to_win_ansi};
use medreport_render_core::{Canvas, FontFace, RectStyle, RenderError, Stroke, TextStyle};
use medreport_types::{Color, Point, Rect, Size};

/// Metadata written to the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: Option<String>,
    pub producer: String,
    /// PDF date string, e.g. `D:20240131120000`.
    pub creation_date: Option<String>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "Generated Document".to_string(),
            subject: None,
            producer: concat!("medreport ", env!("CARGO_PKG_VERSION")).to_string(),
            creation_date: None,
        }
    }
}

/// A `Canvas` that renders to PDF using the standard Helvetica faces.
///
/// Pages are kept in memory as content streams until `finish`, so earlier
/// pages can still be drawn on after later ones exist.
pub struct LopdfCanvas {
    size: Size,
    pages: Vec<PageContext>,
    current: usize,
    /// Opacity values in use; entry `i` is published as ExtGState `GS{i+1}`.
    alpha_states: Vec<f32>,
    info: DocumentInfo,
}

impl LopdfCanvas {
    pub fn new(size: Size, info: DocumentInfo) -> Self {
        Self {
            size,
            pages: vec![PageContext::new(size.height)],
            current: 0,
            alpha_states: Vec::new(),
            info,
        }
    }

    /// Returns the ExtGState name for the lowest opacity among `colors`, or
    /// `None` when everything is opaque.
    fn gstate_for(&mut self, colors: &[&Color]) -> Option<String> {
        let alpha = colors.iter().map(|c| c.a).fold(1.0f32, f32::min);
        if alpha >= 1.0 {
            return None;
        }
        let index = match self.alpha_states.iter().position(|a| *a == alpha) {
            Some(index) => index,
            None => {
                self.alpha_states.push(alpha);
                self.alpha_states.len() - 1
            }
        };
        Some(format!("GS{}", index + 1))
    }

    fn resources(&self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            fonts.set(
                font_resource_name(face),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => face.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }

        let mut resources = dictionary! { "Font" => fonts };
        if !self.alpha_states.is_empty() {
            let mut states = Dictionary::new();
            for (i, alpha) in self.alpha_states.iter().enumerate() {
                states.set(
                    format!("GS{}", i + 1),
                    dictionary! { "Type" => "ExtGState", "ca" => *alpha, "CA" => *alpha },
                );
            }
            resources.set("ExtGState", states);
        }
        resources
    }

    fn info_dictionary(&self) -> Dictionary {
        let text = |s: &str| Object::String(to_win_ansi(s).0, StringFormat::Literal);
        let mut info = dictionary! {
            "Title" => text(&self.info.title),
            "Producer" => text(&self.info.producer),
        };
        if let Some(subject) = &self.info.subject {
            info.set("Subject", text(subject));
        }
        if let Some(date) = &self.info.creation_date {
            info.set("CreationDate", text(date));
        }
        info
    }

    /// Writes every page and returns the serialized PDF.
    pub fn finish(self, compress: bool) -> Result<Vec<u8>, RenderError> {
        let mut writer = PdfWriter::new("1.7", self.resources());
        writer.set_info(self.info_dictionary());

        let size = self.size;
        for page in self.pages {
            let content_id = writer.write_content_stream(page.finish())?;
            writer.write_page(content_id, size);
        }
        log::debug!("Assembled PDF with {} pages", writer.page_count());
        writer.finish(compress)
    }

    fn page(&mut self) -> &mut PageContext {
        &mut self.pages[self.current]
    }
}

impl Canvas for LopdfCanvas {
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
        self.pages.push(PageContext::new(self.size.height));
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
        let mut colors = Vec::with_capacity(2);
        if let Some(fill) = &style.fill {
            check_color(fill)?;
            colors.push(fill);
        }
        if let Some(stroke) = &style.stroke {
            check_color(&stroke.color)?;
            check_finite("stroke", &[stroke.width])?;
            colors.push(&stroke.color);
        }
        let gstate = self.gstate_for(&colors);
        self.page().draw_rect(rect, style, gstate.as_deref());
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        check_finite("line", &[from.x, from.y, to.x, to.y, stroke.width])?;
        check_color(&stroke.color)?;
        let gstate = self.gstate_for(&[&stroke.color]);
        self.page().draw_line(from, to, stroke, gstate.as_deref());
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), RenderError> {
        check_finite("text anchor", &[at.x, at.y, style.size, style.rotation])?;
        check_color(&style.color)?;
        if text.is_empty() {
            return Ok(());
        }

        let (encoded, replaced) = to_win_ansi(text);
        if replaced {
            log::warn!("Text contains characters outside WinAnsiEncoding, substituted with '?': {}", text);
        }
        let width = text_width(text, style.face, style.size);
        let gstate = self.gstate_for(&[&style.color]);
        self.page().draw_text(encoded, width, at, style, gstate.as_deref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Document;
    use medreport_render_core::{Column, Table, TableStyle};

    fn canvas() -> LopdfCanvas {
        LopdfCanvas::new(Size::new(300.0, 400.0), DocumentInfo::default())
    }

    #[test]
    fn produces_one_pdf_page_per_canvas_page() {
        let mut canvas = canvas();
        canvas.draw_text("first", Point::new(10.0, 20.0), &TextStyle::new(12.0)).unwrap();
        canvas.new_page().unwrap();
        canvas.draw_text("second", Point::new(10.0, 20.0), &TextStyle::new(12.0)).unwrap();
        let bytes = canvas.finish(true).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert!(doc.extract_text(&[1]).unwrap().contains("first"));
        assert!(doc.extract_text(&[2]).unwrap().contains("second"));
    }

    #[test]
    fn drawing_on_an_earlier_page_lands_there() {
        let mut canvas = canvas();
        canvas.new_page().unwrap();
        canvas.set_page(0).unwrap();
        canvas.draw_text("late footer", Point::new(10.0, 390.0), &TextStyle::new(8.0)).unwrap();
        let bytes = canvas.finish(false).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.extract_text(&[1]).unwrap().contains("late footer"));
        assert!(!doc.extract_text(&[2]).unwrap().contains("late footer"));
    }

    #[test]
    fn registers_one_gstate_per_opacity() {
        let mut canvas = canvas();
        let faded = TextStyle::new(30.0).color(Color::gray(200).with_alpha(0.5));
        canvas.draw_text("A", Point::new(0.0, 50.0), &faded).unwrap();
        canvas.draw_text("B", Point::new(0.0, 90.0), &faded).unwrap();
        assert_eq!(canvas.alpha_states, vec![0.5]);
        assert!(canvas.resources().get(b"ExtGState").is_ok());
    }

    #[test]
    fn invalid_color_is_rejected() {
        let mut canvas = canvas();
        let style = RectStyle::filled(Color::BLACK.with_alpha(-0.1));
        assert!(matches!(
            canvas.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &style),
            Err(RenderError::InvalidColor(_))
        ));
    }

    #[test]
    fn default_table_painting_emits_cell_text() {
        let mut table = Table::new(vec![Column::new("#", 1.0), Column::new("Description", 5.0)], TableStyle::default());
        table.push_row(vec!["1".into(), "fever".into()]);
        let measured = table.measure(200.0).unwrap();

        let mut canvas = canvas();
        canvas.draw_table(&measured, 0..1, Point::new(20.0, 20.0)).unwrap();
        let bytes = canvas.finish(false).unwrap();
        let text = Document::load_mem(&bytes).unwrap().extract_text(&[1]).unwrap();
        assert!(text.contains("Description"));
        assert!(text.contains("fever"));
    }
}
