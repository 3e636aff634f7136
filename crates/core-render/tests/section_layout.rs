use core_model::{GlyphMetrics, MetricsTable};
use core_render::{RenderFlags, RenderOptions, render_coverage};
use pretty_assertions::assert_eq;

const M: GlyphMetrics = GlyphMetrics::new(1024, 0, 900);
const BASE: u32 = 0x25CC;

fn render(cps: &[u32], flags: RenderFlags) -> String {
    let t: MetricsTable = cps.iter().map(|&cp| (cp, M)).chain([(BASE, M)]).collect();
    let opts = RenderOptions::default().with_flags(flags);
    let (buf, _) = render_coverage(&t, "Test", opts, Vec::new()).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Body lines between the title and the footer.
fn body(doc: &str) -> Vec<&str> {
    let lines: Vec<&str> = doc.split('\n').collect();
    // "", "", title, "", "" ... body ... "", "", footer, ""
    lines[5..lines.len() - 4].to_vec()
}

fn label(line: &str) -> &str {
    line.get(..9).unwrap_or(line)
}

#[test]
fn adjacent_lines_share_block_header() {
    let out = render(&[0x41, 0x51, 0x61], RenderFlags::SHOW_GAPS);
    let body = body(&out);
    assert_eq!(body.len(), 7);
    assert_eq!(body[0], "      ▾  Basic Latin");
    assert_eq!(label(body[1]), " U+0040  ");
    assert_eq!(label(body[2]), " U+0050  ");
    assert_eq!(label(body[3]), " U+0060  ");
    // Gap before the base line, then its block header.
    assert_eq!(body[4], "");
    assert_eq!(body[5], "      ▾  Geometric Shapes");
}

#[test]
fn no_gap_lines_unless_enabled() {
    let out = render(&[0x41, 0x61], RenderFlags::empty());
    assert!(!body(&out).contains(&""));
    let out = render(&[0x41, 0x61], RenderFlags::SHOW_GAPS);
    let body = body(&out);
    assert_eq!(label(body[1]), " U+0040  ");
    assert_eq!(body[2], "");
    assert_eq!(label(body[3]), " U+0060  ");
}

#[test]
fn skipped_line_still_emits_gap_line() {
    // U+07C5 sits outside every block: its line is skipped, but the gap
    // blank line before it is already written and last_line stays at U+0040.
    let out = render(&[0x41, 0x07C5], RenderFlags::SHOW_GAPS);
    let body = body(&out);
    assert_eq!(label(body[1]), " U+0040  ");
    assert_eq!(body[2], "");
    assert_eq!(body[3], "");
    assert_eq!(body[4], "      ▾  Geometric Shapes");
    assert!(!out.contains("U+07C0"));
}

#[test]
fn block_change_inside_line_splits_rows() {
    // Powerline ends at U+E0A3, Private Use Area resumes at U+E0A4.
    let out = render(&[0xE0A0, 0xE0A5], RenderFlags::empty());
    let body = body(&out);
    assert_eq!(body[2], "      ▾  Nerd Fonts - Powerline");
    assert_eq!(body[3], format!(" U+E0A0  \u{E0A0} {}", " ".repeat(6)));
    assert_eq!(body[4], "      ▾  Private Use Area");
    // padding: 4 offsets * 2 cells, then the glyph at offset 5
    assert!(body[5].starts_with(&format!(" U+E0A0  {}  \u{E0A5} ", " ".repeat(8))));
}

#[test]
fn unpopulated_block_segment_is_not_printed() {
    let out = render(&[0xE0A5], RenderFlags::empty());
    assert!(!out.contains("Nerd Fonts - Powerline"));
    assert!(out.contains("      ▾  Private Use Area\n"));
}

#[test]
fn returning_block_reprints_header_only_on_change() {
    // Font Awesome / Progress Indicators / Font Awesome across consecutive lines
    let out = render(&[0xEDF0, 0xEE00, 0xEE0C, 0xEE10], RenderFlags::empty());
    let headers: Vec<&str> = out
        .lines()
        .filter_map(|l| l.strip_prefix("      ▾  "))
        .collect();
    assert_eq!(
        headers,
        vec![
            "Geometric Shapes",
            "Nerd Fonts - Font Awesome",
            "Nerd Fonts - Progress Indicators",
            "Nerd Fonts - Font Awesome",
        ]
    );
}

#[test]
fn six_digit_addresses_keep_label_width() {
    let out = render(&[0x10FFF5, 0x1F0A1], RenderFlags::empty());
    assert!(out.contains("\nU+10FFF0 "));
    assert!(out.contains("\nU+1F0A0  "));
    assert!(out.contains("\n U+25C0  "));
}
