//! Block-boundary segmentation of a 16-codepoint address line.
//!
//! Contract:
//! - Offsets `0..16` of the line at `address` are split wherever the block
//!   classification changes.
//! - Stretches classifying as "no block" never become segments.
//! - A segment survives only if at least one of its offsets is in the table.
//! - Output is ordered by `start` and segments never overlap.
//!
//! Independent of width decisions; the renderer layers those on top.

use core_model::MetricsTable;
use core_text::BlockCursor;
use smallvec::SmallVec;

/// Codepoints per address line.
pub const LINE_WIDTH: u32 = 16;

/// Address of the line holding `cp`.
#[inline]
pub fn line_address(cp: u32) -> u32 {
    cp / LINE_WIDTH * LINE_WIDTH
}

/// Offsets `[start, end)` within a line sharing one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
    pub block: &'static str,
}

pub type Segments = SmallVec<[Segment; 4]>;

/// Partition the line at `address` into non-empty block segments.
pub fn line_segments(address: u32, table: &MetricsTable, cursor: &mut BlockCursor) -> Segments {
    let mut segments = Segments::new();
    let mut push = |start: u32, end: u32, block: &'static str| {
        if (start..end).any(|offset| table.contains(address + offset)) {
            segments.push(Segment { start, end, block });
        }
    };

    let mut run_start = 0u32;
    let mut run_block: Option<&'static str> = None;
    for offset in 0..LINE_WIDTH {
        let block = cursor.name(address + offset);
        if block != run_block {
            if let Some(name) = run_block {
                push(run_start, offset, name);
            }
            run_start = offset;
            run_block = block;
        }
    }
    if let Some(name) = run_block {
        push(run_start, LINE_WIDTH, name);
    }
    segments
}
