//! Unicode text properties for coverage rendering.
//!
//! - `blocks`: static block table + traversal-local `BlockCursor` classifier.
//! - `props`: printable / combining predicates applied before metrics lookup.
//!
//! All functions accept raw `u32` codepoints; callers never need to convert
//! to `char` first.

pub mod blocks;
pub mod props;

pub use blocks::{BLOCKS, BlockCursor, UnicodeBlock, block_name, block_of};
pub use props::{is_combining, is_printable};
