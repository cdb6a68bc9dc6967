//! Content-stream builders for a single page. Keeps track of the graphics
//! state already emitted so repeated colors and fonts are not re-set.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use medreport_render_core::utils::flip_y;
use medreport_render_core::{FontFace, RectStyle, Stroke, TextAlign, TextStyle};
use medreport_types::{Color, Point, Rect};

/// Control-point distance for approximating a quarter circle with a cubic Bézier.
const KAPPA: f32 = 0.552_284_8;

pub(crate) fn font_resource_name(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
        FontFace::Italic => "F3",
    }
}

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<[f32; 3]>,
    stroke_color: Option<[f32; 3]>,
    line_width: Option<f32>,
}

pub(crate) struct PageContext {
    page_height: f32,
    content: Content,
    state: PageRenderState,
}

impl PageContext {
    pub(crate) fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: Default::default(),
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    /// Opens a saved graphics state using the named ExtGState for opacity.
    fn begin_transparent(&mut self, gstate: Option<&str>) {
        if let Some(name) = gstate {
            self.push("q", vec![]);
            self.push("gs", vec![Object::Name(name.as_bytes().to_vec())]);
        }
    }

    /// Restoring the graphics state discards whatever was set inside it, so
    /// the cached state is forgotten too.
    fn end_transparent(&mut self, gstate: Option<&str>) {
        if gstate.is_some() {
            self.push("Q", vec![]);
            self.state = PageRenderState::default();
        }
    }

    fn set_fill_color(&mut self, color: &Color) {
        let rgb = color.components();
        if self.state.fill_color != Some(rgb) {
            self.push("rg", vec![rgb[0].into(), rgb[1].into(), rgb[2].into()]);
            self.state.fill_color = Some(rgb);
        }
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        let rgb = stroke.color.components();
        if self.state.stroke_color != Some(rgb) {
            self.push("RG", vec![rgb[0].into(), rgb[1].into(), rgb[2].into()]);
            self.state.stroke_color = Some(rgb);
        }
        if self.state.line_width != Some(stroke.width) {
            self.push("w", vec![stroke.width.into()]);
            self.state.line_width = Some(stroke.width);
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            let name = font_resource_name(face);
            self.push("Tf", vec![Object::Name(name.as_bytes().to_vec()), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    pub(crate) fn draw_rect(&mut self, rect: Rect, style: &RectStyle, gstate: Option<&str>) {
        let paint = match (&style.fill, &style.stroke) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            (None, Some(_)) => "S",
            (None, None) => return,
        };

        self.begin_transparent(gstate);
        if let Some(fill) = &style.fill {
            self.set_fill_color(fill);
        }
        if let Some(stroke) = &style.stroke {
            self.set_stroke(stroke);
        }

        let x = rect.x;
        let y = flip_y(rect.y + rect.height, self.page_height);
        let radius = style.corner_radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
        if radius > 0.0 {
            self.rounded_rect_path(x, y, rect.width, rect.height, radius);
        } else {
            self.push("re", vec![x.into(), y.into(), rect.width.into(), rect.height.into()]);
        }
        self.push(paint, vec![]);
        self.end_transparent(gstate);
    }

    fn rounded_rect_path(&mut self, x0: f32, y0: f32, width: f32, height: f32, r: f32) {
        let (x1, y1) = (x0 + width, y0 + height);
        let k = KAPPA * r;
        let curve = |ctx: &mut Self, pts: [f32; 6]| {
            ctx.push("c", pts.iter().map(|&v| v.into()).collect());
        };

        self.push("m", vec![(x0 + r).into(), y0.into()]);
        self.push("l", vec![(x1 - r).into(), y0.into()]);
        curve(self, [x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r]);
        self.push("l", vec![x1.into(), (y1 - r).into()]);
        curve(self, [x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1]);
        self.push("l", vec![(x0 + r).into(), y1.into()]);
        curve(self, [x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r]);
        self.push("l", vec![x0.into(), (y0 + r).into()]);
        curve(self, [x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0]);
        self.push("h", vec![]);
    }

    pub(crate) fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke, gstate: Option<&str>) {
        self.begin_transparent(gstate);
        self.set_stroke(stroke);
        self.push("m", vec![from.x.into(), flip_y(from.y, self.page_height).into()]);
        self.push("l", vec![to.x.into(), flip_y(to.y, self.page_height).into()]);
        self.push("S", vec![]);
        self.end_transparent(gstate);
    }

    /// Emits an already-encoded text run. `width` is the measured advance of
    /// the run, used to resolve alignment along the (possibly rotated) baseline.
    pub(crate) fn draw_text(
        &mut self,
        encoded: Vec<u8>,
        width: f32,
        at: Point,
        style: &TextStyle,
        gstate: Option<&str>,
    ) {
        let offset = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => width / 2.0,
            TextAlign::Right => width,
        };
        let (sin, cos) = style.rotation.to_radians().sin_cos();
        let x = at.x - offset * cos;
        let y = flip_y(at.y, self.page_height) - offset * sin;

        self.begin_transparent(gstate);
        self.push("BT", vec![]);
        self.set_font(style.face, style.size);
        self.set_fill_color(&style.color);
        if style.rotation == 0.0 {
            self.push("Td", vec![x.into(), y.into()]);
        } else {
            self.push(
                "Tm",
                vec![cos.into(), sin.into(), (-sin).into(), cos.into(), x.into(), y.into()],
            );
        }
        self.push("Tj", vec![Object::String(encoded, StringFormat::Literal)]);
        self.push("ET", vec![]);
        self.end_transparent(gstate);
    }
}
