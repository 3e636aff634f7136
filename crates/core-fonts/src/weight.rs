//! One decoded font file exposed as a `WeightSource`.
//!
//! Decoding happens once in `FontWeight::parse`:
//! - codepoints: union of every cmap subtable's mappings. Entries that land
//!   on glyph 0 (`.notdef`) are not mappings and are left out.
//! - metrics: for each codepoint, the glyph from the first subtable that maps
//!   it; advance and left side bearing from `hmtx`, `x_max` from the glyph
//!   bounding box (the advance when the glyph has no outline).
//!
//! A codepoint whose glyph has no horizontal advance stays in the codepoint
//! set but has no metrics, so the merger can fall back to another weight.

use crate::error::FontError;
use crate::info::FontInfo;
use ahash::{AHashMap, AHashSet};
use core_model::{GlyphMetrics, WeightSource};
use std::path::{Path, PathBuf};
use tracing::debug;
use ttf_parser::cmap::Subtable;
use ttf_parser::{Face, GlyphId};

#[derive(Debug, Clone)]
pub struct FontWeight {
    name: String,
    path: PathBuf,
    info: FontInfo,
    codepoints: AHashSet<u32>,
    metrics: AHashMap<u32, GlyphMetrics>,
}

impl FontWeight {
    /// Read and decode the font at `path`.
    pub fn open(path: &Path) -> Result<Self, FontError> {
        if !path.exists() {
            return Err(FontError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &data)
    }

    /// Decode font bytes; `path` is kept for diagnostics only.
    pub fn parse(path: &Path, data: &[u8]) -> Result<Self, FontError> {
        let face = Face::parse(data, 0).map_err(|e| FontError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let info = FontInfo::from_face(&face);
        let codepoints = cmap_codepoints(&face);

        let mut metrics = AHashMap::with_capacity(codepoints.len());
        let mut unresolved = 0usize;
        for &cp in &codepoints {
            match glyph_for(&face, cp).and_then(|gid| glyph_metrics(&face, gid)) {
                Some(m) => {
                    metrics.insert(cp, m);
                }
                None => unresolved += 1,
            }
        }
        debug!(
            target: "fonts.load",
            path = %path.display(),
            style = info.style_key(),
            codepoints = codepoints.len(),
            unresolved,
            "font_decoded"
        );

        Ok(Self {
            name: info.style_key().to_string(),
            path: path.to_path_buf(),
            info,
            codepoints,
            metrics,
        })
    }

    /// Assemble a weight from already-decoded parts.
    pub fn from_parts(
        path: PathBuf,
        info: FontInfo,
        codepoints: AHashSet<u32>,
        metrics: AHashMap<u32, GlyphMetrics>,
    ) -> Self {
        Self {
            name: info.style_key().to_string(),
            path,
            info,
            codepoints,
            metrics,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self) -> &FontInfo {
        &self.info
    }
}

impl WeightSource for FontWeight {
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

fn cmap_codepoints(face: &Face<'_>) -> AHashSet<u32> {
    let mut out = AHashSet::new();
    if let Some(cmap) = face.tables().cmap {
        for subtable in cmap.subtables {
            subtable.codepoints(|cp| {
                if mapped_glyph(&subtable, cp).is_some() {
                    out.insert(cp);
                }
            });
        }
    }
    out
}

/// Glyph for `cp` in one subtable; `.notdef` counts as unmapped.
#[inline]
fn mapped_glyph(subtable: &Subtable<'_>, cp: u32) -> Option<GlyphId> {
    subtable.glyph_index(cp).filter(|gid| gid.0 != 0)
}

fn glyph_for(face: &Face<'_>, cp: u32) -> Option<GlyphId> {
    let cmap = face.tables().cmap?;
    cmap.subtables
        .into_iter()
        .find_map(|subtable| mapped_glyph(&subtable, cp))
}

fn glyph_metrics(face: &Face<'_>, gid: GlyphId) -> Option<GlyphMetrics> {
    let advance = i32::from(face.glyph_hor_advance(gid)?);
    let lsb = face.glyph_hor_side_bearing(gid).map_or(0, i32::from);
    let x_max = face
        .glyph_bounding_box(gid)
        .map_or(advance, |bbox| i32::from(bbox.x_max));
    Some(GlyphMetrics::new(advance, lsb, x_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::FontFormat;

    fn sample() -> FontWeight {
        let info = FontInfo {
            family: Some("Sample".into()),
            style: Some("bold".into()),
            version: "1.0".into(),
            format: FontFormat::Ttf,
        };
        let codepoints: AHashSet<u32> = [0x41, 0x42].into_iter().collect();
        let metrics: AHashMap<u32, GlyphMetrics> = [(0x41, GlyphMetrics::new(1024, 10, 900))]
            .into_iter()
            .collect();
        FontWeight::from_parts(PathBuf::from("Sample-Bold.ttf"), info, codepoints, metrics)
    }

    #[test]
    fn weight_source_view() {
        let w = sample();
        assert_eq!(w.name(), "bold");
        assert_eq!(w.codepoints().len(), 2);
        assert_eq!(w.metrics(0x41), Some(GlyphMetrics::new(1024, 10, 900)));
        // listed but unresolvable
        assert!(w.codepoints().contains(&0x42));
        assert_eq!(w.metrics(0x42), None);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let err = FontWeight::parse(Path::new("junk.ttf"), b"not a font at all").unwrap_err();
        assert!(matches!(err, FontError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to load font file junk.ttf"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = FontWeight::open(Path::new("__no_such_font__.ttf")).unwrap_err();
        assert!(matches!(err, FontError::NotFound { .. }));
        assert_eq!(err.to_string(), "font file not found: __no_such_font__.ttf");
    }
}
