//! Text insertion engine.
//!
//! Edits are an immutable list of (offset, text) pairs addressed against the
//! ORIGINAL buffer; applying them produces a new buffer and never mutates
//! shared state. Offsets outside the buffer, or inside a UTF-8 sequence, are
//! invariant violations and fail the whole file rather than corrupt output.

use crate::error::{Error, Result};

/// One text insertion at a byte offset of the original buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub offset: usize,
    pub text: String,
}

impl Edit {
    pub fn new(offset: usize, text: impl Into<String>) -> Self {
        Edit {
            offset,
            text: text.into(),
        }
    }
}

/// Apply all insertions to `source`, producing the rewritten buffer.
///
/// Original bytes are preserved verbatim outside the insertion points; an
/// empty edit list returns the source unchanged. Edits may arrive in any
/// order.
pub fn apply(source: &str, edits: &[Edit]) -> Result<String> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|e| e.offset);

    let inserted: usize = ordered.iter().map(|e| e.text.len()).sum();
    let mut out = String::with_capacity(source.len() + inserted);
    let mut cursor = 0;

    for edit in ordered {
        if edit.offset > source.len() || !source.is_char_boundary(edit.offset) {
            return Err(Error::Offset {
                offset: edit.offset,
                len: source.len(),
            });
        }
        out.push_str(&source[cursor..edit.offset]);
        out.push_str(&edit.text);
        cursor = edit.offset;
    }
    out.push_str(&source[cursor..]);

    Ok(out)
}
