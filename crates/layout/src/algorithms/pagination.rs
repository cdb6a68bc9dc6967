use crate::cursor::PageCursor;
use std::ops::Range;

// Use a small epsilon to handle floating point inaccuracies
const EPSILON: f32 = 0.01;

pub struct BreakAnalysis {
    pub should_break: bool,
}

/// Checks whether a block of `height` fits below the cursor. A block that is
/// already at the top of a page never asks for a break, since a fresh page
/// would not give it more room.
pub fn check_fit(cursor: &PageCursor, height: f32) -> BreakAnalysis {
    BreakAnalysis {
        should_break: height > cursor.remaining() + EPSILON && !cursor.at_top(),
    }
}

/// Where a table goes: whether to break the page before it, and the row
/// ranges drawn on consecutive pages (each chunk repeats the header).
#[derive(Debug, Clone, PartialEq)]
pub struct TablePlan {
    pub break_before: bool,
    pub chunks: Vec<Range<usize>>,
}

impl TablePlan {
    pub fn is_split(&self) -> bool {
        self.chunks.len() > 1
    }
}

/// Plans the placement of a table with the given header and row heights.
///
/// A table that fits on a page is never split: it is drawn below the cursor
/// when it fits there, or moved whole to the next page otherwise. Only a
/// table taller than an entire page is split, between rows, with every
/// chunk filling as much of its page as it can.
pub fn plan_table(cursor: &PageCursor, header_height: f32, row_heights: &[f32]) -> TablePlan {
    let total = header_height + row_heights.iter().sum::<f32>();
    let capacity = cursor.page_capacity();
    let whole = vec![0..row_heights.len()];

    if !check_fit(cursor, total).should_break {
        if total > capacity + EPSILON {
            return split_rows(header_height, row_heights, cursor.remaining(), capacity, false);
        }
        return TablePlan { break_before: false, chunks: whole };
    }
    if total <= capacity + EPSILON {
        return TablePlan { break_before: true, chunks: whole };
    }

    // Taller than a page. Start here if the header and first row fit,
    // otherwise start on a fresh page.
    let first_block = header_height + row_heights.first().copied().unwrap_or(0.0);
    if first_block > cursor.remaining() + EPSILON {
        split_rows(header_height, row_heights, capacity, capacity, true)
    } else {
        split_rows(header_height, row_heights, cursor.remaining(), capacity, false)
    }
}

fn split_rows(
    header_height: f32,
    row_heights: &[f32],
    first_available: f32,
    capacity: f32,
    break_before: bool,
) -> TablePlan {
    let mut chunks = Vec::new();
    let mut available = first_available;
    let mut start = 0;
    let mut used = header_height;

    for (i, &height) in row_heights.iter().enumerate() {
        if i > start && used + height > available + EPSILON {
            chunks.push(start..i);
            start = i;
            used = header_height;
            available = capacity;
        }
        used += height;
    }
    chunks.push(start..row_heights.len());

    if chunks.len() > 1 {
        log::debug!("Table of {} rows split into {} chunks", row_heights.len(), chunks.len());
    }
    TablePlan { break_before, chunks }
}
