//! Byte-offset text edits and their application.
//!
//! Everything here is pure string manipulation; no file I/O happens in this
//! module. Edits are checked for bounds and overlap before any of them is
//! applied, and they are applied back to front so earlier offsets stay valid.

use thiserror::Error;

/// Error type for edit application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixError {
    #[error("overlapping edits at byte {0}")]
    OverlappingEdits(usize),

    #[error("edit range [{start}..{end}) exceeds source length {source_len}")]
    InvalidRange {
        start: usize,
        end: usize,
        source_len: usize,
    },

    #[error("edit start {start} is after edit end {end}")]
    InvalidEditOrder { start: usize, end: usize },

    #[error("edit boundary {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

/// A replacement of the byte range `[start_byte..end_byte)`.
///
/// Offsets are UTF-8 byte indices, the same unit tree-sitter reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start_byte: usize,
    pub end_byte: usize,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(start_byte: usize, end_byte: usize, replacement: String) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement,
        }
    }

    /// Remove a range.
    pub fn delete(start_byte: usize, end_byte: usize) -> Self {
        Self::new(start_byte, end_byte, String::new())
    }

    /// Insert text at a position without removing anything.
    pub fn insert(byte_offset: usize, text: String) -> Self {
        Self::new(byte_offset, byte_offset, text)
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start_byte..self.end_byte
    }

    /// Two ranges `[a, b)` and `[c, d)` overlap when `a < d && c < b`.
    ///
    /// A pure insertion never overlaps a range that merely touches it.
    pub fn overlaps_with(&self, other: &TextEdit) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }

    pub fn validate(&self, source: &str) -> Result<(), FixError> {
        if self.start_byte > self.end_byte {
            return Err(FixError::InvalidEditOrder {
                start: self.start_byte,
                end: self.end_byte,
            });
        }

        if self.end_byte > source.len() {
            return Err(FixError::InvalidRange {
                start: self.start_byte,
                end: self.end_byte,
                source_len: source.len(),
            });
        }

        for offset in [self.start_byte, self.end_byte] {
            if !source.is_char_boundary(offset) {
                return Err(FixError::NotCharBoundary(offset));
            }
        }

        Ok(())
    }
}

/// Validate that a list of edits is in bounds and pairwise non-overlapping.
pub fn validate_edits(edits: &[TextEdit], source: &str) -> Result<(), FixError> {
    for edit in edits {
        edit.validate(source)?;
    }

    for (i, first) in edits.iter().enumerate() {
        if let Some(second) = edits[i + 1..].iter().find(|e| first.overlaps_with(e)) {
            return Err(FixError::OverlappingEdits(first.start_byte.max(second.start_byte)));
        }
    }

    Ok(())
}

/// Apply a list of non-overlapping edits to `source`.
///
/// Edits are applied from the end of the file towards the start. When a
/// deletion and an insertion share a start offset the deletion goes first, so
/// the inserted text is never swallowed by it.
///
/// ```rust
/// use sort_class_members::fix::{TextEdit, apply_fixes};
///
/// let source = "class A { b(){} a(){} }";
/// let edits = vec![
///     TextEdit::delete(16, 21),
///     TextEdit::insert(10, "a(){} ".to_string()),
/// ];
///
/// let result = apply_fixes(source, &edits).unwrap();
/// assert_eq!(result, "class A { a(){} b(){}  }");
/// ```
pub fn apply_fixes(source: &str, edits: &[TextEdit]) -> Result<String, FixError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    validate_edits(edits, source)?;

    let mut ordered = edits.to_vec();
    ordered.sort_by(|a, b| {
        b.start_byte
            .cmp(&a.start_byte)
            .then(b.end_byte.cmp(&a.end_byte))
    });

    let mut result = source.to_string();
    for edit in ordered {
        result.replace_range(edit.range(), &edit.replacement);
    }

    Ok(result)
}
