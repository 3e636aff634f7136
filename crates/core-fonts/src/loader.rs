//! Multi-file loading with family and style validation.
//!
//! Paths are loaded in the order given; that order is the weight priority
//! used by the merger. Validation problems that do not stop the run are
//! logged under `fonts.load`:
//! - `multiple_font_names`: a file's label differs from the first one.
//! - `duplicate_style`: a second file with an already-seen style is ignored.
//! - `primary_not_regular`: the first weight is not `regular`.

use crate::error::FontError;
use crate::weight::FontWeight;
use core_model::{WeightSource, title_case};
use std::path::Path;
use tracing::{info, warn};

pub const PRIMARY_STYLE: &str = "regular";

/// Weights in priority order plus the document title.
#[derive(Debug, Clone)]
pub struct LoadedFonts {
    pub font_name: String,
    pub weights: Vec<FontWeight>,
}

impl LoadedFonts {
    fn new() -> Self {
        Self {
            font_name: String::new(),
            weights: Vec::new(),
        }
    }

    /// Add a decoded weight, applying the label and style checks.
    /// Returns `false` when the weight was skipped as a duplicate style.
    pub fn push(&mut self, weight: FontWeight) -> bool {
        let label = weight.info().label();
        if self.weights.is_empty() {
            self.font_name = label;
        } else if self.font_name != label {
            warn!(
                target: "fonts.load",
                expected = %self.font_name,
                found = %label,
                path = %weight.path().display(),
                "multiple_font_names"
            );
        }

        if self.weights.iter().any(|w| w.name() == weight.name()) {
            warn!(
                target: "fonts.load",
                style = weight.name(),
                path = %weight.path().display(),
                "duplicate_style"
            );
            return false;
        }
        self.weights.push(weight);
        true
    }

    pub fn primary(&self) -> Option<&FontWeight> {
        self.weights.first()
    }
}

/// Load every path, failing on the first missing or undecodable file.
pub fn load_weights<P: AsRef<Path>>(paths: &[P]) -> Result<LoadedFonts, FontError> {
    if paths.is_empty() {
        return Err(FontError::NoFonts);
    }
    let mut loaded = LoadedFonts::new();
    for path in paths {
        loaded.push(FontWeight::open(path.as_ref())?);
    }
    log_summary(&loaded);
    Ok(loaded)
}

fn log_summary(loaded: &LoadedFonts) {
    info!(target: "fonts.load", font_name = %loaded.font_name, "font_name");
    for weight in &loaded.weights {
        info!(
            target: "fonts.load",
            style = %title_case(&weight.name().replace('_', "-")),
            path = %weight.path().display(),
            "font_loaded"
        );
    }
    let primary = loaded.primary().filter(|w| w.name() != PRIMARY_STYLE);
    if let Some(primary) = primary {
        warn!(
            target: "fonts.load",
            first = %title_case(primary.name()),
            expected = "Regular",
            "primary_not_regular"
        );
    }
}
