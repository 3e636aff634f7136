//! Coverage document rendering.
//!
//! Turns a merged `MetricsTable` into the plain-text coverage table: one row
//! per 16-codepoint line, block headers, optional position headers, and
//! per-glyph padding derived from font metrics so columns stay aligned in a
//! monospace terminal.
//!
//! Pipeline (single pass, streaming):
//! 1. `wide::detect_wide_blocks` flags blocks whose glyphs need double-width
//!    columns.
//! 2. `render_engine::CoverageRenderer` walks the table in ascending line
//!    order, splitting each line into block segments (`segment`).
//! 3. Each supported codepoint is padded via `spacing`; unsupported offsets
//!    become placeholders.
//! 4. Output goes through `writer::CoverageWriter`, which counts bytes and
//!    lines for the final summary.
//!
//! Invariants:
//! - Output is deterministic for a given table and options.
//! - A line is emitted only if one of its block segments holds a supported
//!   codepoint.
//! - Narrow columns occupy 2 cells per offset, wide columns 3.
//!
//! Exposed Components:
//! - `RenderFlags` / `RenderOptions`: user-facing switches.
//! - `RenderError`: I/O or coverage failure surfaced by a render.
//! - `render_coverage`: one-call convenience wrapper.

use bitflags::bitflags;
use core_model::CoverageError;
use thiserror::Error;

pub mod render_engine;
pub mod segment;
pub mod spacing;
pub mod wide;
pub mod writer;

pub use render_engine::{
    CoverageRenderer, POSITION_HEADER_NARROW, POSITION_HEADER_WIDE, RenderStats, WidthMode,
    address_label, render_coverage,
};
pub use segment::{LINE_WIDTH, Segment, line_address, line_segments};
pub use wide::{WideBlocks, detect_wide_blocks};
pub use writer::{CoverageWriter, WriterStats};

pub use core_model::DEFAULT_COMBINING_BASE;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RenderFlags: u8 {
        const SHOW_GAPS        = 0b0000_0001; // blank line between non-adjacent lines
        const POSITION_HEADERS = 0b0000_0010; // header on narrow/wide transitions
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub combining_base: char,
    pub flags: RenderFlags,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            combining_base: DEFAULT_COMBINING_BASE,
            flags: RenderFlags::empty(),
        }
    }
}

impl RenderOptions {
    pub fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_combining_base(mut self, base: char) -> Self {
        self.combining_base = base;
        self
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write coverage output: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Coverage(#[from] CoverageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.combining_base, '◌');
        assert!(opts.flags.is_empty());
        let opts = opts
            .with_flags(RenderFlags::SHOW_GAPS | RenderFlags::POSITION_HEADERS)
            .with_combining_base('o');
        assert!(opts.flags.contains(RenderFlags::SHOW_GAPS));
        assert_eq!(opts.combining_base, 'o');
    }
}
