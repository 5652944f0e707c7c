//! Applies the suggestions attached to diagnostics to a source file.
//!
//! Suggestions are accepted in order of their covering range. A suggestion
//! whose range starts inside an already accepted one is deferred; the engine
//! re-lints and picks it up on the next pass.

use crate::diagnostics::{Applicability, Diagnostic};
use crate::fix::{self, FixError, TextEdit};
use std::fmt::Write as _;
use std::ops::Range;
use std::path::Path;

/// Result of applying fixes to a source file.
#[derive(Debug)]
pub struct FixResult {
    /// The modified source code.
    pub fixed_source: String,
    /// Number of suggestions applied.
    pub fixes_applied: usize,
    /// Suggestions that were not applied (not machine-applicable, or overlapping).
    pub fixes_skipped: usize,
}

/// Apply every machine-applicable suggestion that does not collide with an
/// earlier one.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> Result<FixResult, FixError> {
    let mut candidates: Vec<(Range<usize>, &[TextEdit])> = Vec::new();
    let mut skipped = 0;

    for diag in diagnostics {
        let Some(suggestion) = &diag.suggestion else {
            continue;
        };

        if suggestion.applicability != Applicability::MachineApplicable {
            skipped += 1;
            continue;
        }

        let Some(range) = suggestion.covering_range() else {
            skipped += 1;
            continue;
        };

        candidates.push((range, &suggestion.edits));
    }

    candidates.sort_by_key(|(range, _)| (range.start, range.end));

    let mut accepted: Vec<TextEdit> = Vec::new();
    let mut applied = 0;
    let mut last_end: Option<usize> = None;

    for (range, edits) in candidates {
        if last_end.is_some_and(|end| range.start <= end) {
            tracing::trace!(start = range.start, "deferring overlapping fix");
            skipped += 1;
            continue;
        }
        last_end = Some(range.end);
        accepted.extend_from_slice(edits);
        applied += 1;
    }

    let fixed_source = fix::apply_fixes(source, &accepted)?;

    Ok(FixResult {
        fixed_source,
        fixes_applied: applied,
        fixes_skipped: skipped,
    })
}

/// Generate a unified diff between original and fixed source.
///
/// Includes 3 context lines around each change.
pub fn format_diff(original: &str, fixed: &str, path: &Path) -> String {
    format_diff_with_context(original, fixed, path, 3)
}

type LineChange<'a> = (usize, Option<&'a str>, Option<&'a str>);

/// Generate a unified diff with configurable context lines.
///
/// Lines are compared positionally, which is enough to review a member move.
pub fn format_diff_with_context(
    original: &str,
    fixed: &str,
    path: &Path,
    context: usize,
) -> String {
    let orig_lines: Vec<&str> = original.lines().collect();
    let fixed_lines: Vec<&str> = fixed.lines().collect();
    let max_len = orig_lines.len().max(fixed_lines.len());

    let changes: Vec<LineChange<'_>> = (0..max_len)
        .filter_map(|i| {
            let orig = orig_lines.get(i).copied();
            let new = fixed_lines.get(i).copied();
            (orig != new).then_some((i, orig, new))
        })
        .collect();

    if changes.is_empty() {
        return String::new();
    }

    let mut hunks: Vec<(usize, usize, Vec<LineChange<'_>>)> = Vec::new();
    for change in changes {
        let start = change.0.saturating_sub(context);
        let end = (change.0 + context + 1).min(max_len);
        match hunks.last_mut() {
            Some((_, hunk_end, members)) if start <= *hunk_end => {
                *hunk_end = end;
                members.push(change);
            }
            _ => hunks.push((start, end, vec![change])),
        }
    }

    let path_str = path.display();
    let mut output = String::new();
    let _ = writeln!(output, "--- a/{path_str}");
    let _ = writeln!(output, "+++ b/{path_str}");

    for (hunk_start, hunk_end, hunk_changes) in hunks {
        let orig_size = hunk_end.min(orig_lines.len()).saturating_sub(hunk_start);
        let fixed_size = hunk_end.min(fixed_lines.len()).saturating_sub(hunk_start);
        let _ = writeln!(
            output,
            "@@ -{},{} +{},{} @@",
            hunk_start + 1,
            orig_size,
            hunk_start + 1,
            fixed_size
        );

        for line_idx in hunk_start..hunk_end {
            if let Some((_, orig, new)) = hunk_changes.iter().find(|(i, _, _)| *i == line_idx) {
                if let Some(orig) = orig {
                    let _ = writeln!(output, "-{orig}");
                }
                if let Some(new) = new {
                    let _ = writeln!(output, "+{new}");
                }
            } else if let Some(line) = orig_lines.get(line_idx) {
                let _ = writeln!(output, " {line}");
            }
        }
    }

    output
}
