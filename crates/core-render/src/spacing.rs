//! Per-glyph prefix / suffix spacing.
//!
//! One space is one terminal cell, modelled as 1024 design units. The
//! calculator pads each glyph so its physical extent lines up inside its
//! column:
//!
//! - prefix: `ceil(-lsb / 1024)` when the glyph overhangs its origin by more
//!   than half a cell (`lsb < -512`), else 0.
//! - suffix: `ceil(max(0, expected - advance) / 1024) - prefix`, rendered as
//!   zero spaces when negative. `expected` is 2048 in wide columns, else 1024.
//!
//! Combining marks are drawn on top of the combining base, so their prefix is
//! always 0 and their effective advance is `max(own, base)`. This approximates
//! composition without a shaping engine.
//!
//! Pure: identical inputs always produce identical output.

use core_model::GlyphMetrics;

/// Design units per terminal cell.
pub const CELL_UNITS: i32 = 1024;

/// Left overhang tolerated before a prefix space is added.
pub const PREFIX_DEAD_ZONE_UNITS: i32 = 512;

/// Codepoints whose measured bearing is ignored for prefix calculation.
///
/// U+1F96 / U+1F97 (ᾖ ᾗ): the ypogegrammeni renders left of the eta stem,
/// producing a bearing that would otherwise add a spurious prefix.
pub const EXEMPT_FROM_PREFIX: &[u32] = &[0x1F96, 0x1F97];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub prefix: usize,
    pub suffix: usize,
}

/// `ceil(units / 1024)` for non-negative `units`; 0 otherwise.
#[inline]
pub fn cells_ceil(units: i32) -> usize {
    if units <= 0 {
        0
    } else {
        (units as u32).div_ceil(CELL_UNITS as u32) as usize
    }
}

#[inline]
pub fn expected_units(is_wide: bool) -> i32 {
    if is_wide { 2 * CELL_UNITS } else { CELL_UNITS }
}

/// Prefix from bearing alone (no combining / exemption handling).
pub fn bearing_prefix(left_side_bearing: i32) -> usize {
    if left_side_bearing < -PREFIX_DEAD_ZONE_UNITS {
        cells_ceil(-left_side_bearing)
    } else {
        0
    }
}

/// Compute prefix and suffix for one glyph.
///
/// `combining` must be the general-category check for `cp`; `base_advance`
/// is the advance of the configured combining base.
pub fn spacing(
    cp: u32,
    metrics: &GlyphMetrics,
    combining: bool,
    base_advance: i32,
    is_wide: bool,
) -> Spacing {
    let prefix = if combining || EXEMPT_FROM_PREFIX.contains(&cp) {
        0
    } else {
        bearing_prefix(metrics.left_side_bearing)
    };

    let advance = if combining {
        metrics.advance.max(base_advance)
    } else {
        metrics.advance
    };
    let shortfall = expected_units(is_wide) - advance;
    let suffix = cells_ceil(shortfall).saturating_sub(prefix);

    Spacing { prefix, suffix }
}

/// Spaces after a column: one cell minus however far the glyph's advance
/// overruns its expected width, never below zero.
pub fn separator_spaces(advance: i32, is_wide: bool) -> usize {
    let overhang = (advance - expected_units(is_wide)).max(0);
    cells_ceil(CELL_UNITS - overhang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_glyph_needs_no_padding() {
        let m = GlyphMetrics::new(1024, 0, 800);
        assert_eq!(spacing(0x41, &m, false, 1024, false), Spacing::default());
    }

    #[test]
    fn wide_glyph_in_wide_column() {
        let m = GlyphMetrics::new(2048, 100, 2048);
        assert_eq!(spacing(0x4E2D, &m, false, 1024, true), Spacing::default());
    }

    #[test]
    fn narrow_glyph_in_wide_column_gets_suffix() {
        let m = GlyphMetrics::new(1024, 0, 900);
        assert_eq!(spacing(0x41, &m, false, 1024, true).suffix, 1);
    }

    #[test]
    fn deep_left_overhang_prefixes_two_cells() {
        let m = GlyphMetrics::new(1024, -1200, 600);
        let s = spacing(0x01C0, &m, false, 1024, false);
        assert_eq!(s.prefix, 2);
        assert_eq!(s.suffix, 0);
    }

    #[test]
    fn half_cell_dead_zone() {
        assert_eq!(bearing_prefix(-512), 0);
        assert_eq!(bearing_prefix(-513), 1);
        assert_eq!(bearing_prefix(-1024), 1);
        assert_eq!(bearing_prefix(-1025), 2);
        assert_eq!(bearing_prefix(200), 0);
    }

    #[test]
    fn suffix_reduced_by_prefix_and_clamped() {
        // zero-advance glyph overhanging left: shortfall 1 cell, prefix 2
        let m = GlyphMetrics::new(0, -1500, -200);
        let s = spacing(0x2DE0, &m, false, 1024, false);
        assert_eq!(s.prefix, 2);
        assert_eq!(s.suffix, 0);

        let m = GlyphMetrics::new(0, -600, -100);
        let s = spacing(0x2DE0, &m, false, 1024, true);
        assert_eq!((s.prefix, s.suffix), (1, 1));
    }

    #[test]
    fn combining_mark_uses_base_advance_and_no_prefix() {
        let mark = GlyphMetrics::new(0, -900, -100);
        let s = spacing(0x0301, &mark, true, 1024, false);
        assert_eq!(s, Spacing::default());
        // Narrower base leaves a shortfall.
        let s = spacing(0x0301, &mark, true, 600, false);
        assert_eq!(s, Spacing { prefix: 0, suffix: 1 });
    }

    #[test]
    fn exempt_codepoints_skip_prefix() {
        let m = GlyphMetrics::new(1024, -1100, 900);
        assert_eq!(spacing(0x1F96, &m, false, 1024, false).prefix, 0);
        assert_eq!(spacing(0x1F97, &m, false, 1024, false).prefix, 0);
        assert_eq!(spacing(0x1F95, &m, false, 1024, false).prefix, 2);
    }

    #[test]
    fn idempotent() {
        let m = GlyphMetrics::new(700, -800, 600);
        let a = spacing(0x1E9E, &m, false, 1024, true);
        let b = spacing(0x1E9E, &m, false, 1024, true);
        assert_eq!(a, b);
    }

    #[test]
    fn separator_eaten_by_overrun() {
        assert_eq!(separator_spaces(1024, false), 1);
        assert_eq!(separator_spaces(2047, false), 1);
        assert_eq!(separator_spaces(2048, false), 0);
        assert_eq!(separator_spaces(3000, false), 0);
        assert_eq!(separator_spaces(2048, true), 1);
        assert_eq!(separator_spaces(3072, true), 0);
    }
}
