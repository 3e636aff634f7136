//! Font file decoding for coverage generation.
//!
//! Wraps `ttf-parser` to turn font files into `core_model::WeightSource`
//! implementations, plus the metadata (family, style, version, outline
//! format) used to title the coverage document.

mod error;
pub mod info;
pub mod loader;
pub mod weight;

pub use error::FontError;
pub use info::{FontFormat, FontInfo};
pub use loader::{LoadedFonts, load_weights};
pub use weight::FontWeight;
