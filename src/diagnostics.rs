use crate::fix::TextEdit;
use crate::lint::{LintDescriptor, LintLevel};
use serde::Serialize;

/// A single lint finding.
#[derive(Debug, Clone)]
#[must_use]
pub struct Diagnostic {
    pub lint: &'static LintDescriptor,
    pub level: LintLevel,
    pub span: Span,
    pub message: String,
    pub suggestion: Option<Suggestion>,
}

/// Optional machine- or human-applicable fix for a diagnostic.
///
/// A suggestion is a set of edits that must be applied together.
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub message: String,
    pub edits: Vec<TextEdit>,
    pub applicability: Applicability,
}

impl Suggestion {
    /// Smallest byte range covering every edit of the suggestion.
    pub fn covering_range(&self) -> Option<std::ops::Range<usize>> {
        let start = self.edits.iter().map(|e| e.start_byte).min()?;
        let end = self.edits.iter().map(|e| e.end_byte).max()?;
        Some(start..end)
    }
}

/// Applicability of an automated suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    MachineApplicable,
    MaybeIncorrect,
    Unspecified,
}

/// Span in a source file (1-based row/column positions, columns in bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Single position in a source file (1-based row/column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}
