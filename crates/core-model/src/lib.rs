//! Coverage data model: per-codepoint glyph metrics, the merged metrics
//! table, and the `WeightSource` seam through which font weights supply
//! codepoints and metrics.
//!
//! Invariants:
//! * A `MetricsTable` holds at most one record per codepoint and iterates in
//!   ascending codepoint order (the renderer depends on this).
//! * Records are immutable once inserted; the merger never overwrites an
//!   existing entry (first weight wins).
//! * `WeightSource::metrics` returning `None` means "cannot resolve", which is
//!   distinct from the codepoint being absent from `codepoints()`.

use ahash::{AHashMap, AHashSet};
use std::collections::BTreeMap;

mod error;
pub mod merge;

pub use error::CoverageError;
pub use merge::{build_metrics_table, merged_codepoints, require_combining_base};

/// Glyph drawn under combining marks unless configured otherwise.
pub const DEFAULT_COMBINING_BASE: char = '◌';

/// Horizontal glyph metrics in font design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphMetrics {
    pub advance: i32,
    pub left_side_bearing: i32,
    pub x_max: i32,
}

impl GlyphMetrics {
    pub const fn new(advance: i32, left_side_bearing: i32, x_max: i32) -> Self {
        Self {
            advance,
            left_side_bearing,
            x_max,
        }
    }

    /// Visual width: the larger of the advance and the inked extent.
    #[inline]
    pub fn visual_width(&self) -> i32 {
        self.advance.max(self.x_max - self.left_side_bearing)
    }
}

/// Merged codepoint -> metrics table, ordered by codepoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsTable {
    entries: BTreeMap<u32, GlyphMetrics>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless already present. Returns `true` when inserted.
    pub fn insert_first(&mut self, cp: u32, metrics: GlyphMetrics) -> bool {
        use std::collections::btree_map::Entry;
        match self.entries.entry(cp) {
            Entry::Vacant(slot) => {
                slot.insert(metrics);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    #[inline]
    pub fn get(&self, cp: u32) -> Option<&GlyphMetrics> {
        self.entries.get(&cp)
    }

    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        self.entries.contains_key(&cp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ascending iteration over `(codepoint, metrics)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &GlyphMetrics)> + '_ {
        self.entries.iter().map(|(cp, m)| (*cp, m))
    }

    /// Ascending iteration over entries with `start <= cp <= end`.
    pub fn range(&self, start: u32, end: u32) -> impl Iterator<Item = (u32, &GlyphMetrics)> + '_ {
        self.entries.range(start..=end).map(|(cp, m)| (*cp, m))
    }

    pub fn codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }
}

impl FromIterator<(u32, GlyphMetrics)> for MetricsTable {
    fn from_iter<I: IntoIterator<Item = (u32, GlyphMetrics)>>(iter: I) -> Self {
        let mut table = MetricsTable::new();
        for (cp, m) in iter {
            table.insert_first(cp, m);
        }
        table
    }
}

/// One weight of a font family (Regular, Bold, ...) as seen by the merger.
pub trait WeightSource {
    /// Style name used in diagnostics (e.g. `regular`, `bold_italic`).
    fn name(&self) -> &str;
    /// Every codepoint the weight's character map lists.
    fn codepoints(&self) -> &AHashSet<u32>;
    /// Metrics for `cp`, or `None` when the weight cannot resolve them.
    fn metrics(&self, cp: u32) -> Option<GlyphMetrics>;
}

impl<T: WeightSource + ?Sized> WeightSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn codepoints(&self) -> &AHashSet<u32> {
        (**self).codepoints()
    }
    fn metrics(&self, cp: u32) -> Option<GlyphMetrics> {
        (**self).metrics(cp)
    }
}

/// In-memory weight built from explicit entries. Used by tests, benches and
/// any caller that already holds decoded metrics.
#[derive(Debug, Clone, Default)]
pub struct StaticWeight {
    name: String,
    codepoints: AHashSet<u32>,
    metrics: AHashMap<u32, GlyphMetrics>,
}

impl StaticWeight {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a codepoint with resolvable metrics.
    pub fn with(mut self, cp: u32, metrics: GlyphMetrics) -> Self {
        self.codepoints.insert(cp);
        self.metrics.insert(cp, metrics);
        self
    }

    /// Add a codepoint the cmap lists but whose metrics cannot be resolved.
    pub fn with_unresolved(mut self, cp: u32) -> Self {
        self.codepoints.insert(cp);
        self.metrics.remove(&cp);
        self
    }
}

impl WeightSource for StaticWeight {
    fn name(&self) -> &str {
        &self.name
    }
    fn codepoints(&self) -> &AHashSet<u32> {
        &self.codepoints
    }
    fn metrics(&self, cp: u32) -> Option<GlyphMetrics> {
        self.metrics.get(&cp).copied()
    }
}

/// Title-case a style name for display: `bold italic` -> `Bold Italic`.
/// A letter is upper-cased when it follows a non-letter, lower-cased
/// otherwise.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Printable form of a codepoint for diagnostics (`U+00E9 (é)`).
pub fn describe(cp: u32) -> String {
    match char::from_u32(cp) {
        Some(c) => format!("U+{cp:X} ({c})"),
        None => format!("U+{cp:X}"),
    }
}
