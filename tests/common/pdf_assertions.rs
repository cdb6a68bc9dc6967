#![allow(dead_code)]

use lopdf::Document as LopdfDocument;
use std::collections::BTreeSet;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Base font names referenced from page resources
pub fn extract_font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut fonts = BTreeSet::new();
    for (_page_num, page_id) in doc.get_pages() {
        let Some(resources) = page_resources(doc, page_id) else {
            continue;
        };
        let Some(font_dict) = resources
            .get(b"Font")
            .ok()
            .and_then(|f| resolve_dict(doc, f))
        else {
            continue;
        };
        for (_name, font) in font_dict.iter() {
            if let Some(font) = resolve_dict(doc, font) {
                if let Ok(base) = font.get(b"BaseFont").and_then(|b| b.as_name()) {
                    fonts.insert(String::from_utf8_lossy(base).to_string());
                }
            }
        }
    }
    fonts.into_iter().collect()
}

/// Names of the graphics states (opacity) a page's resources publish
pub fn extract_gstate_names(doc: &LopdfDocument) -> Vec<String> {
    let mut names = BTreeSet::new();
    for (_page_num, page_id) in doc.get_pages() {
        let Some(resources) = page_resources(doc, page_id) else {
            continue;
        };
        if let Some(states) = resources
            .get(b"ExtGState")
            .ok()
            .and_then(|s| resolve_dict(doc, s))
        {
            for (name, _) in states.iter() {
                names.insert(String::from_utf8_lossy(name).to_string());
            }
        }
    }
    names.into_iter().collect()
}

fn page_resources(doc: &LopdfDocument, page_id: lopdf::ObjectId) -> Option<&lopdf::Dictionary> {
    let page = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let resources = page.get(b"Resources").ok()?;
    resolve_dict(doc, resources)
}

fn resolve_dict<'a>(doc: &'a LopdfDocument, obj: &'a lopdf::Object) -> Option<&'a lopdf::Dictionary> {
    match obj.as_reference() {
        Ok(id) => doc.get_object(id).ok().and_then(|o| o.as_dict().ok()),
        Err(_) => obj.as_dict().ok(),
    }
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}

/// Assert that PDF contains a font matching a pattern
#[macro_export]
macro_rules! assert_pdf_has_font {
    ($pdf:expr, $pattern:expr) => {
        let fonts = $crate::common::pdf_assertions::extract_font_names(&$pdf.doc);
        assert!(
            fonts.iter().any(|f| f.contains($pattern)),
            "PDF should contain font matching '{}', fonts found: {:?}",
            $pattern,
            fonts
        );
    };
}
