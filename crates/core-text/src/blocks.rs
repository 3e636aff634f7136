//! Unicode block table and cursor-based classifier.
//!
//! The table is a static, start-sorted list of `(start, end, name)` ranges
//! covering Basic Latin through Supplementary Private Use Area-B, interleaved
//! with the Nerd Fonts icon ranges that patched terminal fonts occupy inside
//! the Private Use Areas.
//!
//! Classification Contract:
//! - A codepoint belongs to the *first* table entry whose inclusive range
//!   contains it. `block_of` is the reference (stateless linear scan).
//! - `BlockCursor::classify` returns exactly what `block_of` returns for any
//!   call order; the cursor only changes how fast the answer is found.
//! - Codepoints outside every range classify as `None`.
//!
//! Overlap Note: "Nerd Fonts - Octicons" (U+F400..U+F533) and "Nerd Fonts -
//! Material Design" (U+F500..U+F7FF) overlap on U+F500..U+F533. First match
//! wins, so those codepoints classify as Octicons. Wide-block detection walks
//! the raw entries and therefore still sees the full Material Design range.
//!
//! Cursor Fast Path:
//! Traversal is almost always ascending, so the block that matched last is
//! very likely to match again. The cursor resumes the scan at that index and
//! wraps around. A hit at index `i` is only trusted when no earlier entry can
//! contain the codepoint, which is checked in O(1) against `PREFIX_MAX_END`
//! (running maximum of `end` over entries `0..i`). Otherwise the cursor
//! falls back to the linear scan so overlaps resolve identically.

/// One contiguous Unicode (or vendor icon) block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeBlock {
    pub start: u32,
    pub end: u32, // inclusive
    pub name: &'static str,
}

impl UnicodeBlock {
    const fn new(start: u32, end: u32, name: &'static str) -> Self {
        Self { start, end, name }
    }

    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        self.start <= cp && cp <= self.end
    }
}

const BLOCK_COUNT: usize = 125;

const fn b(start: u32, end: u32, name: &'static str) -> UnicodeBlock {
    UnicodeBlock::new(start, end, name)
}

const BLOCK_TABLE: [UnicodeBlock; BLOCK_COUNT] = [
    b(0x0000, 0x007F, "Basic Latin"),
    b(0x0080, 0x00FF, "Latin-1 Supplement"),
    b(0x0100, 0x017F, "Latin Extended-A"),
    b(0x0180, 0x024F, "Latin Extended-B"),
    b(0x0250, 0x02AF, "IPA Extensions"),
    b(0x02B0, 0x02FF, "Spacing Modifier Letters"),
    b(0x0300, 0x036F, "Combining Diacritical Marks"),
    b(0x0370, 0x03FF, "Greek and Coptic"),
    b(0x0400, 0x04FF, "Cyrillic"),
    b(0x0500, 0x052F, "Cyrillic Supplement"),
    b(0x0530, 0x058F, "Armenian"),
    b(0x0590, 0x05FF, "Hebrew"),
    b(0x0600, 0x06FF, "Arabic"),
    b(0x0700, 0x074F, "Syriac"),
    b(0x0750, 0x077F, "Arabic Supplement"),
    b(0x0780, 0x07BF, "Thaana"),
    b(0x0900, 0x097F, "Devanagari"),
    b(0x0980, 0x09FF, "Bengali"),
    b(0x1680, 0x169F, "Ogham"),
    b(0x16A0, 0x16FF, "Runic"),
    b(0x1700, 0x171F, "Tagalog"),
    b(0x1AB0, 0x1AFF, "Combining Diacritical Marks Extended"),
    b(0x1B00, 0x1B7F, "Balinese"),
    b(0x1D00, 0x1D7F, "Phonetic Extensions"),
    b(0x1D80, 0x1DBF, "Phonetic Extensions Supplement"),
    b(0x1DC0, 0x1DFF, "Combining Diacritical Marks Supplement"),
    b(0x1E00, 0x1EFF, "Latin Extended Additional"),
    b(0x1F00, 0x1FFF, "Greek Extended"),
    b(0x2000, 0x206F, "General Punctuation"),
    b(0x2070, 0x209F, "Superscripts and Subscripts"),
    b(0x20A0, 0x20CF, "Currency Symbols"),
    b(0x20D0, 0x20FF, "Combining Diacritical Marks for Symbols"),
    b(0x2100, 0x214F, "Letterlike Symbols"),
    b(0x2150, 0x218F, "Number Forms"),
    b(0x2190, 0x21FF, "Arrows"),
    b(0x2200, 0x22FF, "Mathematical Operators"),
    b(0x2300, 0x23FF, "Miscellaneous Technical"),
    b(0x2400, 0x243F, "Control Pictures"),
    b(0x2440, 0x245F, "Optical Character Recognition"),
    b(0x2460, 0x24FF, "Enclosed Alphanumerics"),
    b(0x2500, 0x257F, "Box Drawing"),
    b(0x2580, 0x259F, "Block Elements"),
    b(0x25A0, 0x25FF, "Geometric Shapes"),
    b(0x2600, 0x26FF, "Miscellaneous Symbols"),
    b(0x2700, 0x27BF, "Dingbats"),
    b(0x27C0, 0x27EF, "Miscellaneous Mathematical Symbols-A"),
    b(0x27F0, 0x27FF, "Supplemental Arrows-A"),
    b(0x2800, 0x28FF, "Braille Patterns"),
    b(0x2900, 0x297F, "Supplemental Arrows-B"),
    b(0x2980, 0x29FF, "Miscellaneous Mathematical Symbols-B"),
    b(0x2A00, 0x2AFF, "Supplemental Mathematical Operators"),
    b(0x2B00, 0x2BFF, "Miscellaneous Symbols and Arrows"),
    b(0x2C00, 0x2C5F, "Glagolitic"),
    b(0x2C60, 0x2C7F, "Latin Extended-C"),
    b(0x2C80, 0x2CFF, "Coptic"),
    b(0x2D00, 0x2D2F, "Georgian Supplement"),
    b(0x2D30, 0x2D7F, "Tifinagh"),
    b(0x2D80, 0x2DDF, "Ethiopic Extended"),
    b(0x2DE0, 0x2DFF, "Cyrillic Extended-A"),
    b(0x2E00, 0x2E7F, "Supplemental Punctuation"),
    b(0xE000, 0xE00A, "Nerd Fonts - Pomicons"),
    b(0xE00B, 0xE09F, "Private Use Area"),
    b(0xE0A0, 0xE0A3, "Nerd Fonts - Powerline"),
    b(0xE0A4, 0xE0AF, "Private Use Area"),
    b(0xE0B0, 0xE0D7, "Nerd Fonts - Powerline"),
    b(0xE200, 0xE2A9, "Nerd Fonts - Font Awesome Extension"),
    b(0xE2AA, 0xE2FF, "Private Use Area"),
    b(0xE300, 0xE3E3, "Nerd Fonts - Weather Icons"),
    b(0xE5FA, 0xE6B8, "Nerd Fonts - Seti-UI + Custom"),
    b(0xE700, 0xE8EF, "Nerd Fonts - Devicons"),
    b(0xEA60, 0xEC1E, "Nerd Fonts - Codicons"),
    b(0xED00, 0xEDFF, "Nerd Fonts - Font Awesome"),
    b(0xEE00, 0xEE0B, "Nerd Fonts - Progress Indicators"),
    b(0xEE0C, 0xF2FF, "Nerd Fonts - Font Awesome"),
    b(0xF300, 0xF381, "Nerd Fonts - Font Logos"),
    b(0xF400, 0xF533, "Nerd Fonts - Octicons"),
    b(0xF500, 0xF7FF, "Nerd Fonts - Material Design"),
    b(0xF800, 0xF8EF, "Private Use Area"),
    b(0xF8F0, 0xFADF, "Nerd Fonts - Material Design (v2 range)"),
    b(0xFB00, 0xFB4F, "Alphabetic Presentation Forms"),
    b(0xFB50, 0xFDFF, "Arabic Presentation Forms-A"),
    b(0xFE00, 0xFE0F, "Variation Selectors"),
    b(0xFE10, 0xFE1F, "Vertical Forms"),
    b(0xFE20, 0xFE2F, "Combining Half Marks"),
    b(0xFE30, 0xFE4F, "CJK Compatibility Forms"),
    b(0xFE50, 0xFE6F, "Small Form Variants"),
    b(0xFE70, 0xFEFF, "Arabic Presentation Forms-B"),
    b(0xFF00, 0xFFEF, "Halfwidth and Fullwidth Forms"),
    b(0xFFF0, 0xFFFF, "Specials"),
    b(0x10000, 0x1007F, "Linear B Syllabary"),
    b(0x10080, 0x100FF, "Linear B Ideograms"),
    b(0x10100, 0x1013F, "Aegean Numbers"),
    b(0x10140, 0x1018F, "Ancient Greek Numbers"),
    b(0x10190, 0x101CF, "Ancient Symbols"),
    b(0x101D0, 0x101FF, "Phaistos Disc"),
    b(0x10280, 0x1029F, "Lycian"),
    b(0x102A0, 0x102DF, "Carian"),
    b(0x10300, 0x1032F, "Old Italic"),
    b(0x10330, 0x1034F, "Gothic"),
    b(0x10380, 0x1039F, "Ugaritic"),
    b(0x103A0, 0x103DF, "Old Persian"),
    b(0x10400, 0x1044F, "Deseret"),
    b(0x10450, 0x1047F, "Shavian"),
    b(0x10480, 0x104AF, "Osmanya"),
    b(0x10800, 0x1083F, "Cypriot Syllabary"),
    b(0x1D400, 0x1D7FF, "Mathematical Alphanumeric Symbols"),
    b(0x1F000, 0x1F02F, "Mahjong Tiles"),
    b(0x1F030, 0x1F09F, "Domino Tiles"),
    b(0x1F0A0, 0x1F0FF, "Playing Cards"),
    b(0x1F100, 0x1F1FF, "Enclosed Alphanumeric Supplement"),
    b(0x1F200, 0x1F2FF, "Enclosed Ideographic Supplement"),
    b(0x1F300, 0x1F5FF, "Miscellaneous Symbols and Pictographs"),
    b(0x1F600, 0x1F64F, "Emoticons"),
    b(0x1F650, 0x1F67F, "Ornamental Dingbats"),
    b(0x1F680, 0x1F6FF, "Transport and Map Symbols"),
    b(0x1F700, 0x1F77F, "Alchemical Symbols"),
    b(0x1F780, 0x1F7FF, "Geometric Shapes Extended"),
    b(0x1F800, 0x1F8FF, "Supplemental Arrows-C"),
    b(0x1F900, 0x1F9FF, "Supplemental Symbols and Pictographs"),
    b(0x1FA00, 0x1FA6F, "Chess Symbols"),
    b(0x1FA70, 0x1FAFF, "Symbols and Pictographs Extended-A"),
    b(0x1FB00, 0x1FBFF, "Symbols for Legacy Computing"),
    b(0xF0000, 0xF1AF0, "Nerd Fonts - Material Design"),
    b(0xF1AF1, 0xFFFFF, "Private Use Area"),
    b(0x100000, 0x10FFFF, "Supplementary Private Use Area-B"),
];

/// The block table in classification order.
pub static BLOCKS: &[UnicodeBlock] = &BLOCK_TABLE;

// `PREFIX_MAX_END[i]` = max `end` over `BLOCK_TABLE[..i]` (never consulted
// for i == 0).
static PREFIX_MAX_END: [u32; BLOCK_COUNT] = prefix_max_end();

const fn prefix_max_end() -> [u32; BLOCK_COUNT] {
    let mut out = [0u32; BLOCK_COUNT];
    let mut running = 0u32;
    let mut i = 0;
    while i < BLOCK_COUNT {
        out[i] = running;
        if BLOCK_TABLE[i].end > running {
            running = BLOCK_TABLE[i].end;
        }
        i += 1;
    }
    out
}

/// Stateless reference lookup: first table entry containing `cp`.
pub fn block_of(cp: u32) -> Option<&'static UnicodeBlock> {
    BLOCKS.iter().find(|blk| blk.contains(cp))
}

/// Convenience: block name for `cp` (stateless).
pub fn block_name(cp: u32) -> Option<&'static str> {
    block_of(cp).map(|blk| blk.name)
}

/// Traversal-local classifier that resumes scanning at the last hit.
///
/// Each traversal (one render pass, one test) owns its own cursor; there is
/// no shared state between cursors.
#[derive(Debug, Clone, Default)]
pub struct BlockCursor {
    last: usize,
}

impl BlockCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `cp`, updating the cursor on a hit.
    pub fn classify(&mut self, cp: u32) -> Option<&'static UnicodeBlock> {
        let n = BLOCKS.len();
        for step in 0..n {
            let idx = (self.last + step) % n;
            let blk = &BLOCKS[idx];
            if !blk.contains(cp) {
                continue;
            }
            if idx == 0 || PREFIX_MAX_END[idx] < cp {
                self.last = idx;
                return Some(blk);
            }
            // An earlier entry may shadow this one; resolve by table order.
            let (first_idx, first) = BLOCKS
                .iter()
                .enumerate()
                .find(|(_, candidate)| candidate.contains(cp))?;
            self.last = first_idx;
            return Some(first);
        }
        None
    }

    /// Block name for `cp` (see `classify`).
    #[inline]
    pub fn name(&mut self, cp: u32) -> Option<&'static str> {
        self.classify(cp).map(|blk| blk.name)
    }
}
