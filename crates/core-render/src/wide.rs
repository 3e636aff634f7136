//! Wide-block detection.
//!
//! A block renders in double-width columns when more than two of its glyphs
//! are at least one and a half cells wide. Requiring three avoids flagging a
//! narrow block because of a single oversized symbol.
//!
//! Detection walks the raw block table (overlapping entries included) over
//! the full metrics table once per run; the result is read-only afterwards.

use core_model::MetricsTable;
use core_text::BLOCKS;
use tracing::debug;

/// Glyph width (design units) at or above which a glyph counts as wide.
pub const WIDE_GLYPH_UNITS: i32 = 1536;

/// A block is wide when its wide-glyph count exceeds this.
pub const WIDE_COUNT_THRESHOLD: usize = 2;

/// Codepoints never counted as wide, whatever their measured width.
///
/// These are observed rendering anomalies, not a rule:
/// - U+1F96..U+1F97 (ᾖ ᾗ): ypogegrammeni drawn left of the stem inflates the
///   ink extent.
/// - U+100104..U+100107: oversized private-use glyphs in patched fonts.
pub const EXEMPT_FROM_WIDE_COUNT: &[(u32, u32)] = &[(0x1F96, 0x1F97), (0x100104, 0x100107)];

fn exempt(cp: u32) -> bool {
    EXEMPT_FROM_WIDE_COUNT
        .iter()
        .any(|&(start, end)| start <= cp && cp <= end)
}

/// Inclusive `(start, end)` ranges of blocks that render double width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideBlocks {
    ranges: Vec<(u32, u32)>,
}

impl WideBlocks {
    pub fn from_ranges(ranges: Vec<(u32, u32)>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether any codepoint in `[start, end)` lies in a wide block.
    pub fn intersects(&self, start: u32, end: u32) -> bool {
        if end <= start {
            return false;
        }
        let last = end - 1;
        self.ranges
            .iter()
            .any(|&(block_start, block_end)| block_start <= last && start <= block_end)
    }
}

/// Count wide glyphs per block and flag blocks above the threshold.
pub fn detect_wide_blocks(table: &MetricsTable) -> WideBlocks {
    let mut ranges = Vec::new();
    for block in BLOCKS {
        let count = table
            .range(block.start, block.end)
            .filter(|(cp, m)| !exempt(*cp) && m.visual_width() >= WIDE_GLYPH_UNITS)
            .count();
        if count > WIDE_COUNT_THRESHOLD {
            debug!(target: "coverage.wide", block = block.name, count, "wide_block");
            ranges.push((block.start, block.end));
        }
    }
    WideBlocks { ranges }
}
