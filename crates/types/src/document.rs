use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Physical page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize { width: 595.28, height: 841.89 };
    pub const LETTER: PageSize = PageSize { width: 612.0, height: 792.0 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// The area left inside the margins of a page of the given size.
    pub fn content_box(&self, page: PageSize) -> Rect {
        Rect {
            x: self.left,
            y: self.top,
            width: (page.width - self.left - self.right).max(0.0),
            height: (page.height - self.top - self.bottom).max(0.0),
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        // 15mm
        Self::all(42.5)
    }
}
