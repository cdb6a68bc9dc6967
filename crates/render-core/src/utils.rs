//! Text metrics and validation helpers shared by every backend.
//!
//! Widths come from the Adobe AFM files of the standard Helvetica faces, in
//! 1/1000 em, indexed by `(char as usize) - 32` over printable ASCII. The
//! oblique face shares the regular widths. Anything outside that range is
//! measured as a digit, which is close enough for the Latin-1 letters the
//! reports contain.

use crate::error::RenderError;
use crate::types::FontFace;
use medreport_types::{Color, Rect};

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Advance width of `c` in 1/1000 em.
pub fn char_width(c: char, face: FontFace) -> u16 {
    let table = match face {
        FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
        FontFace::Regular | FontFace::Italic => &HELVETICA_WIDTHS,
    };
    let code = c as usize;
    if (32..=126).contains(&code) {
        table[code - 32]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` in points when set at `size`.
pub fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, face) as u32).sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrapping against `max_width`. Explicit newlines always break;
/// a word wider than the line is split between characters. Always returns at
/// least one line, so an empty cell still occupies a row.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let space = text_width(" ", face, size);

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word, face, size);

            if !line.is_empty() && line_width + space + word_width <= max_width {
                line.push(' ');
                line.push_str(word);
                line_width += space + word_width;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            for c in word.chars() {
                let w = char_width(c, face) as f32 * size / 1000.0;
                if !line.is_empty() && line_width + w > max_width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                line.push(c);
                line_width += w;
            }
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Encodes text for a WinAnsiEncoding font. Typographic punctuation is mapped
/// to its WinAnsi code point; anything else outside Latin-1 becomes `?`.
/// The flag reports whether a substitution happened.
pub fn to_win_ansi(s: &str) -> (Vec<u8>, bool) {
    let mut replaced = false;
    let bytes = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => {
                replaced = true;
                b'?'
            }
        })
        .collect();
    (bytes, replaced)
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

pub fn check_color(color: &Color) -> Result<(), RenderError> {
    if color.is_valid() {
        Ok(())
    } else {
        Err(RenderError::InvalidColor(color.a))
    }
}

pub fn check_rect(rect: &Rect) -> Result<(), RenderError> {
    if !rect.is_finite() || rect.width < 0.0 || rect.height < 0.0 {
        return Err(RenderError::InvalidGeometry(format!(
            "rectangle {:?} must be finite with non-negative size",
            rect
        )));
    }
    Ok(())
}

pub fn check_finite(what: &str, values: &[f32]) -> Result<(), RenderError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RenderError::InvalidGeometry(format!("{} has non-finite coordinates", what)))
    }
}
