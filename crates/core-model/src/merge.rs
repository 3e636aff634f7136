//! Cross-weight codepoint merging.
//!
//! Contract:
//! - `merged_codepoints`: union of every weight's character map.
//! - `build_metrics_table`: for each printable codepoint of the union, the
//!   metrics of the first weight (priority order, index 0 = primary) that both
//!   lists the codepoint and resolves metrics for it.
//!
//! Advisories (target `coverage.merge`, level WARN, never fatal):
//! - `borrowed_from_secondary`: metrics came from a non-primary weight.
//! - `no_metrics`: no weight resolved the codepoint; it is dropped.
//!
//! Only an empty weight list is an error.

use crate::{CoverageError, GlyphMetrics, MetricsTable, WeightSource, describe, title_case};
use core_text::is_printable;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Union of all weights' codepoints (ascending).
pub fn merged_codepoints<W: WeightSource>(weights: &[W]) -> Result<BTreeSet<u32>, CoverageError> {
    if weights.is_empty() {
        return Err(CoverageError::NoWeights);
    }
    let mut merged = BTreeSet::new();
    for weight in weights {
        info!(
            target: "coverage.merge",
            weight = %title_case(&weight.name().replace('_', "-")),
            glyphs = weight.codepoints().len(),
            "weight_codepoints"
        );
        merged.extend(weight.codepoints().iter().copied());
    }
    info!(
        target: "coverage.merge",
        weights = weights.len(),
        total = merged.len(),
        "merged_codepoints"
    );
    Ok(merged)
}

/// Fail unless `base` is part of the merged set.
pub fn require_combining_base(merged: &BTreeSet<u32>, base: char) -> Result<(), CoverageError> {
    if merged.contains(&(base as u32)) {
        Ok(())
    } else {
        Err(CoverageError::MissingCombiningBase { base })
    }
}

fn resolve<W: WeightSource>(weights: &[W], cp: u32) -> Option<(usize, GlyphMetrics)> {
    weights.iter().enumerate().find_map(|(idx, weight)| {
        if !weight.codepoints().contains(&cp) {
            return None;
        }
        weight.metrics(cp).map(|m| (idx, m))
    })
}

/// Select one metrics record per printable codepoint of `merged`.
pub fn build_metrics_table<W: WeightSource>(
    weights: &[W],
    merged: &BTreeSet<u32>,
) -> Result<MetricsTable, CoverageError> {
    let Some(primary) = weights.first() else {
        return Err(CoverageError::NoWeights);
    };
    let primary_name = title_case(primary.name());

    let mut table = MetricsTable::new();
    let mut filtered = 0usize;
    let mut borrowed = 0usize;
    let mut dropped = 0usize;

    for &cp in merged {
        if !is_printable(cp) {
            filtered += 1;
            continue;
        }
        match resolve(weights, cp) {
            Some((idx, metrics)) => {
                if idx != 0 {
                    borrowed += 1;
                    warn!(
                        target: "coverage.merge",
                        "{} found in {} but not {}",
                        describe(cp),
                        title_case(weights[idx].name()),
                        primary_name
                    );
                }
                table.insert_first(cp, metrics);
            }
            None => {
                dropped += 1;
                warn!(target: "coverage.merge", "{} no metrics", describe(cp));
            }
        }
    }

    info!(
        target: "coverage.merge",
        resolved = table.len(),
        filtered,
        borrowed,
        dropped,
        "metrics_table_built"
    );
    Ok(table)
}
