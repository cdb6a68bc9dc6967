use medreport_types::Color;

/// The three faces of the built-in Helvetica family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// PostScript name of the standard Type1 font backing this face.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Styling for a single run of text. The anchor point passed alongside it is
/// the baseline origin; `align` decides whether the run starts, is centered
/// on, or ends at that point.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Counter-clockwise rotation in degrees around the anchor point.
    pub rotation: f32,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            face: FontFace::Regular,
            size,
            color: Color::BLACK,
            align: TextAlign::Left,
            rotation: 0.0,
        }
    }

    pub fn face(mut self, face: FontFace) -> Self {
        self.face = face;
        self
    }

    pub fn bold(self) -> Self {
        self.face(FontFace::Bold)
    }

    pub fn italic(self) -> Self {
        self.face(FontFace::Italic)
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub corner_radius: f32,
}

impl RectStyle {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn stroked(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}
