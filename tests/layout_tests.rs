//! Layout decisions checked through the recording canvas.

mod common;

use common::fixtures::*;
use common::TestResult;
use medreport::{generate_into, EntityCategory, LayoutConfig, ReportOptions};
use medreport_render_core::{Canvas, DrawOp, RecordingCanvas};

fn record_layout(record: &medreport::AnalysisRecord) -> RecordingCanvas {
    let config = LayoutConfig::default();
    let options = ReportOptions::default().generated_at("fixed");
    let mut canvas = RecordingCanvas::new(config.page.size());
    generate_into(record, &config, &options, &mut canvas).unwrap();
    canvas
}

fn table_rows(canvas: &RecordingCanvas) -> Vec<(usize, usize)> {
    canvas
        .tables()
        .into_iter()
        .filter_map(|(page, op)| match op {
            DrawOp::Table { rows, .. } => Some((page, rows.len())),
            _ => None,
        })
        .collect()
}

#[test]
fn test_tables_stay_inside_content_area() -> TestResult {
    let config = LayoutConfig::default();
    let canvas = record_layout(&long_record(150));
    for (_, op) in canvas.tables() {
        if let DrawOp::Table { origin, height, .. } = op {
            assert!(origin.y >= config.margins.top - 0.01);
            assert!(origin.y + height <= config.content_bottom() + 0.01);
        }
    }
    Ok(())
}

#[test]
fn test_fitting_tables_are_never_split() -> TestResult {
    let record = full_record();
    let canvas = record_layout(&record);
    let counts: Vec<usize> = table_rows(&canvas).into_iter().map(|(_, n)| n).collect();
    // Five entity groups, recommendations, details, warnings, notes
    assert_eq!(counts, [3, 1, 2, 1, 2, 1, 1, 1, 1]);
    Ok(())
}

#[test]
fn test_oversize_table_repeats_header_per_page() -> TestResult {
    let canvas = record_layout(&long_record(150));
    let chunks: Vec<_> = canvas
        .tables()
        .into_iter()
        .filter_map(|(page, op)| match op {
            DrawOp::Table { headers, rows, .. } if rows.len() > 1 => Some((page, headers.clone())),
            _ => None,
        })
        .collect();
    assert!(chunks.len() >= 3);
    for (_, headers) in &chunks {
        assert_eq!(headers, &["#", "Description"]);
    }
    Ok(())
}

#[test]
fn test_page_index_only_increases() -> TestResult {
    let canvas = record_layout(&long_record(120));
    let pages: Vec<usize> = table_rows(&canvas).into_iter().map(|(p, _)| p).collect();
    assert!(pages.windows(2).all(|w| w[0] <= w[1]));
    Ok(())
}

#[test]
fn test_header_band_on_first_page_only() -> TestResult {
    let config = LayoutConfig::default();
    let canvas = record_layout(&long_record(150));
    let is_header = |op: &DrawOp| {
        matches!(op, DrawOp::Rect { rect, .. }
            if rect.y == 0.0 && rect.height == config.header_height)
    };
    assert!(canvas.ops(0).iter().any(is_header));
    for page in 1..canvas.page_count() {
        assert!(!canvas.ops(page).iter().any(is_header));
    }
    Ok(())
}

#[test]
fn test_watermark_rotated_on_every_page() -> TestResult {
    let canvas = record_layout(&long_record(150));
    for page in 0..canvas.page_count() {
        let watermark = canvas.ops(page).iter().find_map(|op| match op {
            DrawOp::Text { text, style, .. } if text == "CONFIDENTIAL" => Some(style.clone()),
            _ => None,
        });
        let style = watermark.unwrap_or_else(|| panic!("no watermark on page {}", page));
        assert_eq!(style.rotation, 45.0);
        assert!(style.color.a < 1.0);
    }
    Ok(())
}

#[test]
fn test_no_trailing_blank_page() -> TestResult {
    // The table ends past the entity break limit with nothing after it
    let items: Vec<String> = (1..=21).map(|i| format!("item {}", i)).collect();
    let record = empty_record().with_entities(EntityCategory::Vitals, items);
    let canvas = record_layout(&record);
    assert_eq!(canvas.page_count(), 1);
    assert_eq!(table_rows(&canvas), [(0, 21)]);
    Ok(())
}
