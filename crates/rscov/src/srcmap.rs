//! Line/column to byte-offset mapping over an original source buffer.
//!
//! The frontend reports positions as 1-based lines and 0-based UTF-8
//! character columns (proc-macro2 `LineColumn`); the rewrite engine works in
//! byte offsets. This module bridges the two.

use crate::error::{Error, Result};
use proc_macro2::LineColumn;

/// Byte offsets of every line start in a source buffer.
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        LineIndex { line_starts }
    }

    /// Byte offset for a frontend position, or an error when the position
    /// does not exist in the buffer.
    pub fn offset(&self, source: &str, pos: LineColumn) -> Result<usize> {
        let out_of_range = || Error::Location {
            line: pos.line,
            column: pos.column,
        };

        let start = pos
            .line
            .checked_sub(1)
            .and_then(|l| self.line_starts.get(l).copied())
            .ok_or_else(out_of_range)?;

        // Columns count UTF-8 characters, not bytes.
        let mut offset = start;
        let mut chars = source[start..].chars();
        for _ in 0..pos.column {
            match chars.next() {
                Some('\n') | None => return Err(out_of_range()),
                Some(c) => offset += c.len_utf8(),
            }
        }
        Ok(offset)
    }
}
