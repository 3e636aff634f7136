use thiserror::Error;

/// Whole-run precondition failures. Per-codepoint problems never surface
/// here; they are logged as advisories and recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("no font weights supplied")]
    NoWeights,
    #[error("combining base ({base}) not found in font")]
    MissingCombiningBase { base: char },
    #[error("combining base ({base}) has no resolvable metrics")]
    UnresolvedCombiningBase { base: char },
}
