//! Streaming text writer for coverage output.
//!
//! Writes go straight to the wrapped `io::Write` (callers wrap stdout in a
//! `BufWriter`), so memory stays flat no matter how many codepoints a font
//! covers. The writer only adds a few primitives (runs of spaces, single
//! chars) plus counters reported once rendering finishes.
//!
//! Invariants:
//! * Output ordering equals call ordering; nothing is reordered or coalesced.
//! * `bytes_written` counts UTF-8 bytes handed to the sink.
//! * `lines_written` counts `\n` bytes emitted.

use std::io::{self, Write};

const SPACES: &str = "                                ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub bytes_written: u64,
    pub lines_written: u64,
}

pub struct CoverageWriter<W: Write> {
    out: W,
    stats: WriterStats,
}

impl<W: Write> CoverageWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            stats: WriterStats::default(),
        }
    }

    pub fn print(&mut self, s: &str) -> io::Result<()> {
        if s.is_empty() {
            return Ok(());
        }
        self.out.write_all(s.as_bytes())?;
        self.stats.bytes_written += s.len() as u64;
        self.stats.lines_written += s.bytes().filter(|b| *b == b'\n').count() as u64;
        Ok(())
    }

    pub fn print_char(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.print(c.encode_utf8(&mut buf))
    }

    pub fn spaces(&mut self, mut n: usize) -> io::Result<()> {
        while n > 0 {
            let chunk = n.min(SPACES.len());
            self.print(&SPACES[..chunk])?;
            n -= chunk;
        }
        Ok(())
    }

    pub fn newline(&mut self) -> io::Result<()> {
        self.print("\n")
    }

    /// Flush the sink and hand it back with final counters.
    pub fn finish(mut self) -> io::Result<(W, WriterStats)> {
        self.out.flush()?;
        Ok((self.out, self.stats))
    }
}
