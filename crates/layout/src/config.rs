use crate::LayoutError;
use medreport_types::{Margins, PageSize, Rect};
use serde::{Deserialize, Serialize};

/// Geometry of a report page. All lengths are in points.
///
/// The defaults reproduce the report on A4 paper with 15mm margins. The
/// `*_break_reserve` values are the distance from the bottom edge of the
/// page past which the cursor forces a page break before the next section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page: PageSize,
    pub margins: Margins,
    /// Height of the banner at the top of the first page.
    pub header_height: f32,
    /// Offset of the summary card from the top of the first page.
    pub summary_top: f32,
    pub summary_height: f32,
    /// Space between the summary card and the first section.
    pub summary_gap: f32,
    /// Space between a section heading and what follows it.
    pub heading_gap: f32,
    /// Height of a colored category label band.
    pub band_height: f32,
    /// Space after each entity table.
    pub gutter: f32,
    /// Space after the recommendation, warning and notes tables.
    pub section_spacing: f32,
    pub entity_break_reserve: f32,
    pub recommendation_break_reserve: f32,
    pub warning_break_reserve: f32,
    /// Distance from the bottom edge to the footer rule.
    pub footer_rule_offset: f32,
    /// Distance from the bottom edge to the footer text baseline.
    pub footer_text_offset: f32,
    pub fonts: FontSizes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub subtitle: f32,
    pub meta: f32,
    pub heading: f32,
    pub label: f32,
    pub score: f32,
    pub table: f32,
    pub recommendation_table: f32,
    pub footer: f32,
    pub watermark: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 22.0,
            subtitle: 11.0,
            meta: 9.0,
            heading: 14.0,
            label: 10.0,
            score: 12.0,
            table: 9.0,
            recommendation_table: 8.0,
            footer: 8.0,
            watermark: 40.0,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            margins: Margins::default(),
            header_height: 156.0,
            summary_top: 170.0,
            summary_height: 71.0,
            summary_gap: 42.0,
            heading_gap: 12.0,
            band_height: 22.0,
            gutter: 22.0,
            section_spacing: 28.0,
            entity_break_reserve: 113.0,
            recommendation_break_reserve: 170.0,
            warning_break_reserve: 142.0,
            footer_rule_offset: 57.0,
            footer_text_offset: 34.0,
            fonts: FontSizes::default(),
        }
    }
}

impl LayoutConfig {
    /// The area between the margins.
    pub fn content_box(&self) -> Rect {
        self.margins.content_box(self.page)
    }

    /// Lowest point table content may reach: just above the footer rule.
    pub fn content_bottom(&self) -> f32 {
        self.page.height - self.footer_rule_offset - 8.0
    }

    /// Where the first section starts on page one.
    pub fn body_top(&self) -> f32 {
        self.summary_top + self.summary_height + self.summary_gap
    }

    /// Cursor position past which a page break is forced before a section
    /// guarded by `reserve`.
    pub fn break_limit(&self, reserve: f32) -> f32 {
        self.page.height - reserve
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let lengths = [
            ("page.width", self.page.width),
            ("page.height", self.page.height),
            ("margins.top", self.margins.top),
            ("margins.right", self.margins.right),
            ("margins.bottom", self.margins.bottom),
            ("margins.left", self.margins.left),
            ("header_height", self.header_height),
            ("summary_top", self.summary_top),
            ("summary_height", self.summary_height),
            ("summary_gap", self.summary_gap),
            ("heading_gap", self.heading_gap),
            ("band_height", self.band_height),
            ("gutter", self.gutter),
            ("section_spacing", self.section_spacing),
            ("entity_break_reserve", self.entity_break_reserve),
            ("recommendation_break_reserve", self.recommendation_break_reserve),
            ("warning_break_reserve", self.warning_break_reserve),
            ("footer_rule_offset", self.footer_rule_offset),
            ("footer_text_offset", self.footer_text_offset),
        ];
        if let Some((name, value)) = lengths.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "{} must be a non-negative length, got {}",
                name, value
            )));
        }

        let sizes = [
            self.fonts.title,
            self.fonts.subtitle,
            self.fonts.meta,
            self.fonts.heading,
            self.fonts.label,
            self.fonts.score,
            self.fonts.table,
            self.fonts.recommendation_table,
            self.fonts.footer,
            self.fonts.watermark,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(LayoutError::InvalidConfig("font sizes must be positive".into()));
        }

        let content = self.content_box();
        if content.width <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "margins leave no horizontal space on the page".into(),
            ));
        }
        if self.content_bottom() <= self.margins.top {
            return Err(LayoutError::InvalidConfig(
                "footer leaves no vertical space on the page".into(),
            ));
        }
        if self.body_top() >= self.content_bottom() {
            return Err(LayoutError::InvalidConfig(
                "header and summary do not fit on the first page".into(),
            ));
        }
        Ok(())
    }
}
