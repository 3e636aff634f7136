use std::path::PathBuf;
use thiserror::Error;

/// Failures while opening or decoding font files. All are fatal for a run.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("no font files supplied")]
    NoFonts,
    #[error("font file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read font file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load font file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}
