//! Coverage table renderer.
//!
//! Streams the full coverage document for a merged `MetricsTable`:
//!
//! ```text
//! \n\n<font name> coverage\n\n\n
//! [position header]            (on width-mode change, if enabled)
//!       ▾  <Block Name>        (on block change)
//!  U+0040  @ A B C ...          (one row per non-empty segment)
//! \n\n<final position header>\n
//! ```
//!
//! State carried across lines:
//! - `last_line`: address of the last *emitted* line (skipped lines do not
//!   update it), used for gap detection.
//! - `last_block`: name of the last printed block header.
//! - `last_mode`: width mode of the last printed segment (`None` before the
//!   first segment, so the first segment always gets a position header when
//!   headers are enabled).
//!
//! Invariants:
//! - Lines are visited in strictly ascending address order, only for
//!   addresses holding at least one table entry.
//! - Every row label is 9 columns wide regardless of address magnitude.
//! - No glyph can abort the render; the only failure is sink I/O.

use crate::segment::{LINE_WIDTH, Segment, line_address, line_segments};
use crate::spacing::{separator_spaces, spacing};
use crate::wide::{WideBlocks, detect_wide_blocks};
use crate::writer::{CoverageWriter, WriterStats};
use crate::{RenderError, RenderFlags, RenderOptions};
use core_model::{CoverageError, GlyphMetrics, MetricsTable};
use core_text::{BlockCursor, is_combining};
use std::io::{self, Write};
use tracing::info;

pub const POSITION_HEADER_NARROW: &str = "Position 0 1 2 3 4 5 6 7 8 9 A B C D E F";
pub const POSITION_HEADER_WIDE: &str = "Position 0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F";

const BLOCK_HEADER_INDENT: &str = "      ▾  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthMode {
    Narrow,
    Wide,
}

impl WidthMode {
    #[inline]
    pub fn from_wide(is_wide: bool) -> Self {
        if is_wide { Self::Wide } else { Self::Narrow }
    }

    #[inline]
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Wide)
    }

    pub fn position_header(self) -> &'static str {
        match self {
            Self::Narrow => POSITION_HEADER_NARROW,
            Self::Wide => POSITION_HEADER_WIDE,
        }
    }

    /// Columns occupied by one empty offset including its separator.
    fn offset_columns(self) -> usize {
        match self {
            Self::Narrow => 2,
            Self::Wide => 3,
        }
    }

    /// Placeholder written for an unsupported offset (separator excluded).
    fn placeholder(self) -> &'static str {
        match self {
            Self::Narrow => " ",
            Self::Wide => "  ",
        }
    }
}

/// Row label for a line address: ` U+0040  `, `U+1F600  `, `U+10FFF0 `.
pub fn address_label(address: u32) -> String {
    let digits = format!("{address:X}").len();
    let prefix = if digits <= 4 { " U+" } else { "U+" };
    let suffix = if digits <= 5 { "  " } else { " " };
    format!("{prefix}{address:0width$X}{suffix}", width = digits.max(4))
}

/// Counters reported after a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub lines_emitted: usize,
    pub lines_skipped: usize,
    pub segments_emitted: usize,
    pub wide_blocks: usize,
    pub writer: WriterStats,
}

#[derive(Debug, Default)]
struct SectionState {
    last_line: Option<u32>,
    last_block: Option<&'static str>,
    last_mode: Option<WidthMode>,
}

/// Renderer bound to one metrics table for one run.
#[derive(Debug)]
pub struct CoverageRenderer<'a> {
    table: &'a MetricsTable,
    wide: WideBlocks,
    options: RenderOptions,
    base_advance: i32,
}

impl<'a> CoverageRenderer<'a> {
    /// Validate the combining base and pre-compute wide blocks.
    pub fn new(table: &'a MetricsTable, options: RenderOptions) -> Result<Self, CoverageError> {
        let base = options.combining_base;
        let base_advance = table
            .get(base as u32)
            .map(|m| m.advance)
            .ok_or(CoverageError::UnresolvedCombiningBase { base })?;
        let wide = detect_wide_blocks(table);
        Ok(Self {
            table,
            wide,
            options,
            base_advance,
        })
    }

    /// Write the complete document (title, table, trailing header).
    pub fn render<W: Write>(&self, font_name: &str, out: W) -> Result<(W, RenderStats), RenderError> {
        info!(
            target: "coverage.render",
            show_gaps = self.options.flags.contains(RenderFlags::SHOW_GAPS),
            position_headers = self.options.flags.contains(RenderFlags::POSITION_HEADERS),
            combining_base = %self.options.combining_base,
            codepoints = self.table.len(),
            wide_blocks = self.wide.ranges().len(),
            "generating_coverage"
        );

        let mut w = CoverageWriter::new(out);
        w.print("\n\n")?;
        w.print(font_name)?;
        w.print(" coverage\n\n\n")?;

        let mut stats = RenderStats {
            wide_blocks: self.wide.ranges().len(),
            ..RenderStats::default()
        };
        let last_mode = self.render_section(&mut w, &mut stats)?;

        w.print("\n\n")?;
        w.print(last_mode.unwrap_or(WidthMode::Narrow).position_header())?;
        w.newline()?;

        let (out, writer_stats) = w.finish()?;
        stats.writer = writer_stats;
        info!(
            target: "coverage.render",
            lines = stats.lines_emitted,
            skipped = stats.lines_skipped,
            segments = stats.segments_emitted,
            bytes = stats.writer.bytes_written,
            "coverage_written"
        );
        Ok((out, stats))
    }

    /// Emit every line; returns the width mode of the last printed segment.
    fn render_section<W: Write>(
        &self,
        w: &mut CoverageWriter<W>,
        stats: &mut RenderStats,
    ) -> io::Result<Option<WidthMode>> {
        let show_gaps = self.options.flags.contains(RenderFlags::SHOW_GAPS);
        let position_headers = self.options.flags.contains(RenderFlags::POSITION_HEADERS);
        let mut cursor = BlockCursor::new();
        let mut state = SectionState::default();
        let mut prev_address: Option<u32> = None;

        for cp in self.table.codepoints() {
            let address = line_address(cp);
            if prev_address == Some(address) {
                continue;
            }
            prev_address = Some(address);

            let gap_here = state
                .last_line
                .is_some_and(|last| address != last + LINE_WIDTH);
            if show_gaps && gap_here {
                w.newline()?;
            }

            let segments = line_segments(address, self.table, &mut cursor);
            if segments.is_empty() {
                stats.lines_skipped += 1;
                continue;
            }

            let label = address_label(address);
            for segment in &segments {
                let mode = WidthMode::from_wide(
                    self.wide
                        .intersects(address + segment.start, address + segment.end),
                );

                if position_headers && state.last_mode != Some(mode) {
                    w.newline()?;
                    w.print(mode.position_header())?;
                    w.print("\n\n")?;
                }
                state.last_mode = Some(mode);

                if state.last_block != Some(segment.block) {
                    w.print(BLOCK_HEADER_INDENT)?;
                    w.print(segment.block)?;
                    w.newline()?;
                    state.last_block = Some(segment.block);
                }

                w.print(&label)?;
                w.spaces(segment.start as usize * mode.offset_columns())?;
                self.write_segment(w, address, segment, mode)?;
                w.newline()?;
                stats.segments_emitted += 1;
            }

            state.last_line = Some(address);
            stats.lines_emitted += 1;
        }
        Ok(state.last_mode)
    }

    fn write_segment<W: Write>(
        &self,
        w: &mut CoverageWriter<W>,
        address: u32,
        segment: &Segment,
        mode: WidthMode,
    ) -> io::Result<()> {
        for offset in segment.start..segment.end {
            let cp = address + offset;
            let last_column = offset == LINE_WIDTH - 1;
            match self.table.get(cp) {
                Some(metrics) => {
                    self.write_codepoint(w, cp, metrics, mode)?;
                    if !last_column {
                        w.spaces(separator_spaces(metrics.advance, mode.is_wide()))?;
                    }
                }
                None => {
                    w.print(mode.placeholder())?;
                    if !last_column {
                        w.print(" ")?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Combining base (for marks), prefix spaces, the glyph, suffix spaces.
    fn write_codepoint<W: Write>(
        &self,
        w: &mut CoverageWriter<W>,
        cp: u32,
        metrics: &GlyphMetrics,
        mode: WidthMode,
    ) -> io::Result<()> {
        let combining = is_combining(cp);
        let pad = spacing(cp, metrics, combining, self.base_advance, mode.is_wide());
        if combining {
            w.print_char(self.options.combining_base)?;
        }
        w.spaces(pad.prefix)?;
        w.print_char(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))?;
        w.spaces(pad.suffix)
    }
}

/// Render `table` into `out` in one call.
pub fn render_coverage<W: Write>(
    table: &MetricsTable,
    font_name: &str,
    options: RenderOptions,
    out: W,
) -> Result<(W, RenderStats), RenderError> {
    CoverageRenderer::new(table, options)?.render(font_name, out)
}
