//! Character property predicates used by the coverage pipeline.
//!
//! Both predicates take a raw `u32` codepoint because font cmaps may list
//! values that are not Unicode scalar values (surrogates, out of range). Such
//! values are never printable and never combining: they cannot be written to
//! UTF-8 output at all.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Invisible formatting characters (word joiner, invisible operators, ...).
const INVISIBLE_FORMAT: std::ops::RangeInclusive<u32> = 0x2060..=0x206F;

#[inline]
fn category(cp: u32) -> Option<GeneralCategory> {
    char::from_u32(cp).map(|c| c.general_category())
}

/// Combining mark: general category Mn, Mc or Me.
pub fn is_combining(cp: u32) -> bool {
    matches!(
        category(cp),
        Some(
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
        )
    )
}

/// Printable for coverage purposes: not in U+2060..U+206F and not of
/// category Cc, Cf or Zs.
pub fn is_printable(cp: u32) -> bool {
    if INVISIBLE_FORMAT.contains(&cp) {
        return false;
    }
    match category(cp) {
        None => false,
        Some(GeneralCategory::Control | GeneralCategory::Format | GeneralCategory::SpaceSeparator) => {
            false
        }
        Some(_) => true,
    }
}
