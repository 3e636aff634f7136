//! Descriptive font metadata read from the `name` table and table directory.

use std::fmt;
use ttf_parser::{Face, name_id};

pub const UNKNOWN: &str = "Unknown";

/// Outline flavour, decided by which outline table is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    Ttf,
    Otf,
    Unknown,
}

impl FontFormat {
    pub fn detect(face: &Face<'_>) -> Self {
        let tables = face.tables();
        if tables.glyf.is_some() {
            Self::Ttf
        } else if tables.cff.is_some() || tables.cff2.is_some() {
            Self::Otf
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ttf => "TTF",
            Self::Otf => "OTF",
            Self::Unknown => UNKNOWN,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    pub family: Option<String>,
    /// Lowercased subfamily (`regular`, `bold italic`, ...).
    pub style: Option<String>,
    pub version: String,
    pub format: FontFormat,
}

impl FontInfo {
    pub fn from_face(face: &Face<'_>) -> Self {
        Self {
            family: name_string(face, name_id::FAMILY),
            style: name_string(face, name_id::SUBFAMILY).map(|s| s.to_lowercase()),
            version: name_string(face, name_id::VERSION)
                .map(|v| clean_version(&v))
                .unwrap_or_else(|| UNKNOWN.to_string()),
            format: FontFormat::detect(face),
        }
    }

    /// `Family (version, format)`, the name printed in the document title.
    pub fn label(&self) -> String {
        format!(
            "{} ({}, {})",
            self.family.as_deref().unwrap_or(UNKNOWN),
            self.version,
            self.format
        )
    }

    /// Style used as the weight key; `unknown` when the font has none.
    pub fn style_key(&self) -> &str {
        self.style.as_deref().unwrap_or("unknown")
    }
}

/// Strip every `Version ` marker and surrounding whitespace.
pub fn clean_version(raw: &str) -> String {
    raw.replace("Version ", "").trim().to_string()
}

/// First decodable record with `id`.
fn name_string(face: &Face<'_>, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == id)
        .find_map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(family: Option<&str>, version: &str, format: FontFormat) -> FontInfo {
        FontInfo {
            family: family.map(str::to_string),
            style: Some("regular".into()),
            version: version.into(),
            format,
        }
    }

    #[test]
    fn label_combines_family_version_format() {
        let i = info(Some("Iosevka Term"), "3.1.0", FontFormat::Ttf);
        assert_eq!(i.label(), "Iosevka Term (3.1.0, TTF)");
        let i = info(None, UNKNOWN, FontFormat::Unknown);
        assert_eq!(i.label(), "Unknown (Unknown, Unknown)");
    }

    #[test]
    fn version_prefix_removed() {
        assert_eq!(clean_version("Version 2.304"), "2.304");
        assert_eq!(clean_version("  Version 1.0; ttfautohint "), "1.0; ttfautohint");
        assert_eq!(clean_version("1.2"), "1.2");
    }

    #[test]
    fn format_display() {
        assert_eq!(FontFormat::Otf.to_string(), "OTF");
        assert_eq!(FontFormat::Ttf.to_string(), "TTF");
    }

    #[test]
    fn missing_style_key() {
        let mut i = info(Some("X"), "1", FontFormat::Ttf);
        i.style = None;
        assert_eq!(i.style_key(), "unknown");
    }
}
