/// The write position of a layout pass: a vertical offset from the top of
/// the page and the zero-based index of the page being written.
///
/// The page index only ever grows. Within a page `y` only moves down; a page
/// break resets it to the top margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    y: f32,
    page: usize,
    top: f32,
    bottom: f32,
}

impl PageCursor {
    /// A cursor at the top margin of the first page. `bottom` is the lowest
    /// point content may reach.
    pub fn new(top: f32, bottom: f32) -> Self {
        Self {
            y: top,
            page: 0,
            top,
            bottom,
        }
    }

    /// Moves the cursor down to `y` on the current page; positions above the
    /// cursor are ignored.
    pub fn starting_at(mut self, y: f32) -> Self {
        self.y = self.y.max(y);
        self
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Space left between the cursor and the bottom of the printable area.
    pub fn remaining(&self) -> f32 {
        (self.bottom - self.y).max(0.0)
    }

    /// Height of the printable area of a fresh page.
    pub fn page_capacity(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    pub fn at_top(&self) -> bool {
        self.y <= self.top
    }

    /// Whether the cursor has moved below `limit`.
    pub fn is_past(&self, limit: f32) -> bool {
        self.y > limit
    }

    pub fn advance(&mut self, dy: f32) {
        if dy > 0.0 && dy.is_finite() {
            self.y += dy;
        }
    }

    /// Starts the next page and returns its index.
    pub fn break_page(&mut self) -> usize {
        self.page += 1;
        self.y = self.top;
        log::debug!("Page break, now on page {}", self.page + 1);
        self.page
    }
}
