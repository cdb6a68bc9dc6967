//! Lays an [`AnalysisRecord`] out onto a [`Canvas`].
//!
//! The body is written top to bottom with a single [`PageCursor`]. Every
//! section is placed together with its lead-in (heading or label band), so a
//! heading is never left alone at the bottom of a page. Footers and the
//! watermark are added in a second pass once the page count is known.

use crate::error::ReportError;
use crate::options::ReportOptions;
use crate::record::{AnalysisRecord, EntityCategory};
use crate::theme::{ConfidenceLevel, Palette};
use itertools::Itertools;
use medreport_layout::{plan_table, LayoutConfig, PageCursor, TablePlan};
use medreport_render_core::{
    Canvas, Column, RectStyle, Stroke, Table, TableStyle, TextAlign, TextStyle,
};
use medreport_types::{Color, Point, Rect};
use serde::Serialize;

const CARD_RADIUS: f32 = 8.0;
const BAR_HEIGHT: f32 = 22.0;
const BAND_RADIUS: f32 = 5.0;
/// Space between a label band and its table.
const BAND_GAP: f32 = 6.0;
const CARD_TEXT_INSET: f32 = 8.0;
const SCORE_OFFSET: f32 = 170.0;
const DATE_OFFSET: f32 = 312.0;
const DATE_VALUE_OFFSET: f32 = 354.0;

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub page_count: usize,
    pub confidence_level: ConfidenceLevel,
    pub sections: Vec<SectionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSummary {
    pub title: String,
    /// Zero-based page the section starts on.
    pub page: usize,
    pub rows: usize,
}

/// Writes the full report for `record` onto `canvas`.
///
/// The canvas is expected to be fresh (one empty page). The record is only
/// read.
pub fn generate_into<C: Canvas>(
    record: &AnalysisRecord,
    config: &LayoutConfig,
    options: &ReportOptions,
    canvas: &mut C,
) -> Result<GenerationSummary, ReportError> {
    config.validate()?;

    let content = config.content_box();
    let mut writer = ReportWriter {
        canvas,
        config,
        options,
        palette: &options.palette,
        x: content.x,
        width: content.width,
        cursor: PageCursor::new(config.margins.top, config.content_bottom())
            .starting_at(config.body_top()),
        sections: Vec::new(),
    };

    writer.header(record)?;
    let confidence_level = writer.summary(record)?;
    writer.entities(record)?;
    writer.recommendations(record)?;
    writer.recommendation_details(record)?;
    writer.warnings(record)?;
    writer.doctor_notes(record)?;
    let page_count = writer.decorate_pages()?;

    log::info!(
        "Report for '{}' laid out on {} page(s)",
        record.patient_label,
        page_count
    );
    Ok(GenerationSummary {
        page_count,
        confidence_level,
        sections: writer.sections,
    })
}

struct ReportWriter<'a, C: Canvas> {
    canvas: &'a mut C,
    config: &'a LayoutConfig,
    options: &'a ReportOptions,
    palette: &'a Palette,
    x: f32,
    width: f32,
    cursor: PageCursor,
    sections: Vec<SectionSummary>,
}

/// The block drawn directly above a table.
enum Lead<'t> {
    Heading { text: &'t str, color: Color },
    Band { text: String, color: Color },
    /// Section heading followed by a label band, for the first entity group.
    HeadingAndBand {
        heading: &'t str,
        heading_color: Color,
        text: String,
        color: Color,
    },
}

impl<C: Canvas> ReportWriter<'_, C> {
    fn break_page(&mut self) -> Result<(), ReportError> {
        self.cursor.break_page();
        self.canvas.new_page()?;
        Ok(())
    }

    fn break_if_past(&mut self, reserve: f32) -> Result<(), ReportError> {
        if self.cursor.is_past(self.config.break_limit(reserve)) && !self.cursor.at_top() {
            self.break_page()?;
        }
        Ok(())
    }

    fn header(&mut self, record: &AnalysisRecord) -> Result<(), ReportError> {
        let page = self.config.page;
        let height = self.config.header_height;
        let fonts = &self.config.fonts;
        let center = page.width / 2.0;

        self.canvas.draw_rect(
            Rect::new(0.0, 0.0, page.width, height),
            &RectStyle::filled(self.palette.primary),
        )?;

        let title = TextStyle::new(fonts.title)
            .bold()
            .color(Color::WHITE)
            .align(TextAlign::Center);
        self.canvas.draw_text(
            &self.options.title,
            Point::new(center, height * 0.364),
            &title,
        )?;

        let subtitle = TextStyle::new(fonts.subtitle)
            .color(Color::WHITE)
            .align(TextAlign::Center);
        self.canvas.draw_text(
            &record.patient_label,
            Point::new(center, height * 0.582),
            &subtitle,
        )?;

        let meta = TextStyle::new(fonts.meta)
            .color(Color::WHITE)
            .align(TextAlign::Center);
        self.canvas.draw_text(
            &format!("Generated on: {}", self.options.timestamp()),
            Point::new(center, height * 0.8),
            &meta,
        )?;
        Ok(())
    }

    fn summary(&mut self, record: &AnalysisRecord) -> Result<ConfidenceLevel, ReportError> {
        let top = self.config.summary_top;
        let height = self.config.summary_height;
        let fonts = &self.config.fonts;
        let score = record.confidence_score.clamp(0.0, 100.0);
        let level = ConfidenceLevel::from_score(score);

        self.canvas.draw_rect(
            Rect::new(self.x, top, self.width, height),
            &RectStyle::filled(self.palette.light_gray).rounded(CARD_RADIUS),
        )?;
        let filled = self.width * score / 100.0;
        if filled > 0.0 {
            self.canvas.draw_rect(
                Rect::new(self.x, top, filled, BAR_HEIGHT.min(height)),
                &RectStyle::filled(self.palette.confidence(level)).rounded(CARD_RADIUS),
            )?;
        }

        let baseline = top + height * 0.8;
        let dark = self.palette.dark_gray;
        self.canvas.draw_text(
            "AI Confidence Level:",
            Point::new(self.x + CARD_TEXT_INSET, baseline),
            &TextStyle::new(fonts.label).bold().color(dark),
        )?;
        self.canvas.draw_text(
            &format!("{:.1}%", score),
            Point::new(self.x + SCORE_OFFSET, baseline),
            &TextStyle::new(fonts.score).bold().color(dark),
        )?;
        self.canvas.draw_text(
            "Date:",
            Point::new(self.x + DATE_OFFSET, baseline),
            &TextStyle::new(fonts.score).color(dark),
        )?;
        self.canvas.draw_text(
            &record.date_label,
            Point::new(self.x + DATE_VALUE_OFFSET, baseline),
            &TextStyle::new(fonts.score).bold().color(dark),
        )?;

        if let Some(review) = &record.review {
            let text = match review.reviewer() {
                Some(reviewer) => format!("Reviewed by {}", reviewer),
                None => "Reviewed by a doctor".to_string(),
            };
            self.canvas.draw_text(
                &text,
                Point::new(self.x + self.width - CARD_TEXT_INSET, top + height * 0.5),
                &TextStyle::new(fonts.meta)
                    .italic()
                    .color(dark)
                    .align(TextAlign::Right),
            )?;
        }

        log::debug!("Confidence {:.1}% drawn as {:?}", score, level);
        Ok(level)
    }

    fn entities(&mut self, record: &AnalysisRecord) -> Result<(), ReportError> {
        let groups: Vec<(EntityCategory, &[String])> = EntityCategory::ALL
            .iter()
            .map(|&c| (c, record.entities(c)))
            .filter(|(_, items)| !items.is_empty())
            .collect();

        for (index, &(category, items)) in groups.iter().enumerate() {
            let color = self.palette.category(category);
            let band = format!("{} ({})", category.label(), items.len());
            let lead = if index == 0 {
                Lead::HeadingAndBand {
                    heading: "Extracted Medical Entities",
                    heading_color: self.palette.primary,
                    text: band,
                    color,
                }
            } else {
                Lead::Band { text: band, color }
            };

            let mut table = Table::new(
                vec![
                    Column::new("#", 1.0).align(TextAlign::Center),
                    Column::new("Description", 12.0),
                ],
                TableStyle {
                    font_size: self.config.fonts.table,
                    header_fill: color,
                    header_text: Color::WHITE,
                    body_text: self.palette.dark_gray,
                    stripe_fill: Some(self.palette.subtle_blue),
                    ..TableStyle::default()
                },
            );
            for (n, item) in items.iter().enumerate() {
                table.push_row(vec![(n + 1).to_string(), item.clone()]);
            }

            self.section(category.label(), lead, &table)?;
            self.cursor.advance(self.config.gutter);

            if index + 1 < groups.len() || has_content_after_entities(record) {
                self.break_if_past(self.config.entity_break_reserve)?;
            }
        }
        Ok(())
    }

    fn recommendations(&mut self, record: &AnalysisRecord) -> Result<(), ReportError> {
        if record.recommendations.is_empty() {
            return Ok(());
        }
        self.break_if_past(self.config.recommendation_break_reserve)?;

        let mut table = Table::new(
            vec![
                Column::new("#", 1.0).align(TextAlign::Center),
                Column::new("Test/Procedure", 5.0),
                Column::new("Reason", 8.0),
                Column::new("Urgency", 3.0).align(TextAlign::Center),
                Column::new("Confidence", 3.0).align(TextAlign::Center),
            ],
            self.grid_style(self.palette.secondary, self.palette.light_gray, true),
        );
        for (n, rec) in record.recommendations.iter().enumerate() {
            table.push_row(vec![
                (n + 1).to_string(),
                or_na(&rec.test),
                or_na(&rec.reason),
                rec.urgency.label(),
                format!("{:.0}%", rec.confidence.clamp(0.0, 100.0)),
            ]);
        }

        let lead = Lead::Heading {
            text: "AI Recommendations",
            color: self.palette.secondary,
        };
        self.section("AI Recommendations", lead, &table)?;
        self.cursor.advance(self.config.section_spacing);
        Ok(())
    }

    fn recommendation_details(&mut self, record: &AnalysisRecord) -> Result<(), ReportError> {
        if !record.recommendations.iter().any(|r| r.has_details()) {
            return Ok(());
        }
        self.break_if_past(self.config.recommendation_break_reserve)?;

        let mut table = Table::new(
            vec![
                Column::new("#", 1.0).align(TextAlign::Center),
                Column::new("Test/Procedure", 5.0),
                Column::new("Explanation", 9.0),
                Column::new("Contraindications", 5.0),
            ],
            self.grid_style(self.palette.secondary, self.palette.light_gray, true),
        );
        for (n, rec) in record.recommendations.iter().enumerate() {
            let contraindications = if rec.contraindications.is_empty() {
                "None".to_string()
            } else {
                rec.contraindications.iter().join(", ")
            };
            table.push_row(vec![
                (n + 1).to_string(),
                or_na(&rec.test),
                rec.explanation.clone().unwrap_or_else(|| "N/A".to_string()),
                contraindications,
            ]);
        }

        let lead = Lead::Heading {
            text: "Recommendation Details",
            color: self.palette.secondary,
        };
        self.section("Recommendation Details", lead, &table)?;
        self.cursor.advance(self.config.section_spacing);
        Ok(())
    }

    fn warnings(&mut self, record: &AnalysisRecord) -> Result<(), ReportError> {
        if record.warnings.is_empty() {
            return Ok(());
        }
        self.break_if_past(self.config.warning_break_reserve)?;

        let mut table = Table::new(
            vec![
                Column::new("#", 1.0).align(TextAlign::Center),
                Column::new("Description", 12.0),
            ],
            self.grid_style(self.palette.danger, self.palette.warning_stripe, false),
        );
        for (n, warning) in record.warnings.iter().enumerate() {
            table.push_row(vec![(n + 1).to_string(), warning.clone()]);
        }

        let lead = Lead::Heading {
            text: "Warnings & Alerts",
            color: self.palette.danger,
        };
        self.section("Warnings & Alerts", lead, &table)?;
        self.cursor.advance(self.config.section_spacing);
        Ok(())
    }

    fn doctor_notes(&mut self, record: &AnalysisRecord) -> Result<(), ReportError> {
        let Some(notes) = record.review.as_ref().and_then(|r| r.notes()) else {
            return Ok(());
        };
        self.break_if_past(self.config.warning_break_reserve)?;

        let mut table = Table::new(
            vec![Column::new("Notes", 1.0)],
            self.grid_style(self.palette.primary, self.palette.subtle_blue, false),
        );
        for paragraph in notes.lines().map(str::trim).filter(|l| !l.is_empty()) {
            table.push_row(vec![paragraph.to_string()]);
        }

        let lead = Lead::Heading {
            text: "Doctor's Notes",
            color: self.palette.primary,
        };
        self.section("Doctor's Notes", lead, &table)?;
        self.cursor.advance(self.config.section_spacing);
        Ok(())
    }

    fn grid_style(&self, header: Color, stripe: Color, small: bool) -> TableStyle {
        let fonts = &self.config.fonts;
        TableStyle {
            font_size: if small { fonts.recommendation_table } else { fonts.table },
            header_fill: header,
            header_text: Color::WHITE,
            body_text: self.palette.dark_gray,
            stripe_fill: Some(stripe),
            grid: Some(Stroke::new(Color::gray(200), 0.3)),
            ..TableStyle::default()
        }
    }

    fn lead_height(&self, lead: &Lead<'_>) -> f32 {
        let heading = self.config.fonts.heading + self.config.heading_gap;
        let band = self.config.band_height + BAND_GAP;
        match lead {
            Lead::Heading { .. } => heading,
            Lead::Band { .. } => band,
            Lead::HeadingAndBand { .. } => heading + band,
        }
    }

    /// Places a lead-in and its table, breaking pages as the plan requires.
    fn section(&mut self, title: &str, lead: Lead<'_>, table: &Table) -> Result<(), ReportError> {
        let measured = table.measure(self.width)?;
        let row_heights: Vec<f32> = measured.rows.iter().map(|r| r.height).collect();
        let lead_height = self.lead_height(&lead);

        let mut plan = self.plan(lead_height, measured.header.height, &row_heights);
        if plan.break_before {
            self.break_page()?;
            plan = self.plan(lead_height, measured.header.height, &row_heights);
        }
        if plan.is_split() {
            log::debug!("Section '{}' spans {} pages", title, plan.chunks.len());
        }

        let first_page = self.cursor.page();
        self.draw_lead(&lead)?;
        self.cursor.advance(lead_height);

        for (index, rows) in plan.chunks.into_iter().enumerate() {
            if index > 0 {
                self.break_page()?;
            }
            let origin = Point::new(self.x, self.cursor.y());
            let height = self.canvas.draw_table(&measured, rows, origin)?;
            self.cursor.advance(height);
        }

        log::debug!(
            "Section '{}' with {} row(s) placed on page {}",
            title,
            table.rows.len(),
            first_page + 1
        );
        self.sections.push(SectionSummary {
            title: title.to_string(),
            page: first_page,
            rows: table.rows.len(),
        });
        Ok(())
    }

    /// Plans a table as if the lead-in were already drawn. At the top of a
    /// page the lead-in can not move anywhere better, so the table is planned
    /// against a page that starts below it.
    fn plan(&self, lead_height: f32, header_height: f32, row_heights: &[f32]) -> TablePlan {
        let lookahead = if self.cursor.at_top() {
            PageCursor::new(self.cursor.y() + lead_height, self.cursor.bottom())
        } else {
            let mut lookahead = self.cursor;
            lookahead.advance(lead_height);
            lookahead
        };
        plan_table(&lookahead, header_height, row_heights)
    }

    fn draw_lead(&mut self, lead: &Lead<'_>) -> Result<(), ReportError> {
        let y = self.cursor.y();
        match lead {
            Lead::Heading { text, color } => self.draw_heading(text, *color, y),
            Lead::Band { text, color } => self.draw_band(text, *color, y),
            Lead::HeadingAndBand {
                heading,
                heading_color,
                text,
                color,
            } => {
                self.draw_heading(heading, *heading_color, y)?;
                let band_top = y + self.config.fonts.heading + self.config.heading_gap;
                self.draw_band(text, *color, band_top)
            }
        }
    }

    fn draw_heading(&mut self, text: &str, color: Color, y: f32) -> Result<(), ReportError> {
        let size = self.config.fonts.heading;
        self.canvas.draw_text(
            text,
            Point::new(self.x, y + size),
            &TextStyle::new(size).bold().color(color),
        )?;
        Ok(())
    }

    fn draw_band(&mut self, text: &str, color: Color, y: f32) -> Result<(), ReportError> {
        let height = self.config.band_height;
        self.canvas.draw_rect(
            Rect::new(self.x, y, self.width, height),
            &RectStyle::filled(color).rounded(BAND_RADIUS),
        )?;
        self.canvas.draw_text(
            text,
            Point::new(self.x + CARD_TEXT_INSET, y + height * 0.72),
            &TextStyle::new(self.config.fonts.label).bold().color(Color::WHITE),
        )?;
        Ok(())
    }

    /// Footer and watermark on every page. Returns the page count.
    fn decorate_pages(&mut self) -> Result<usize, ReportError> {
        let pages = self.canvas.page_count();
        let page = self.config.page;
        let fonts = &self.config.fonts;
        let rule_y = page.height - self.config.footer_rule_offset;
        let text_y = page.height - self.config.footer_text_offset;
        let footer = TextStyle::new(fonts.footer).italic().color(self.palette.gray);
        let watermark = TextStyle::new(fonts.watermark)
            .bold()
            .color(self.palette.watermark.with_alpha(self.options.watermark_opacity))
            .align(TextAlign::Center)
            .rotated(45.0);

        for index in 0..pages {
            self.canvas.set_page(index)?;
            self.canvas.draw_line(
                Point::new(self.x, rule_y),
                Point::new(self.x + self.width, rule_y),
                &Stroke::new(self.palette.gray, 0.5),
            )?;
            if !self.options.disclaimer.is_empty() {
                self.canvas.draw_text(
                    &self.options.disclaimer,
                    Point::new(page.width / 2.0, text_y),
                    &footer.clone().align(TextAlign::Center),
                )?;
            }
            self.canvas.draw_text(
                &format!("Page {} of {}", index + 1, pages),
                Point::new(self.x + self.width, text_y),
                &footer.clone().align(TextAlign::Right),
            )?;
            if !self.options.watermark_text.is_empty() {
                self.canvas.draw_text(
                    &self.options.watermark_text,
                    Point::new(page.width / 2.0, page.height / 2.0),
                    &watermark,
                )?;
            }
        }
        Ok(pages)
    }
}

fn has_content_after_entities(record: &AnalysisRecord) -> bool {
    !record.recommendations.is_empty()
        || !record.warnings.is_empty()
        || record.review.as_ref().and_then(|r| r.notes()).is_some()
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}
