//! Text edits that move one member in front of another.

use super::member::{MemberExtent, TextRange};
use crate::fix::TextEdit;

/// Move `moving` (with its leading comment) in front of `target`.
///
/// The member is removed from its old position and re-inserted before the
/// target's leading comment, or before the target itself (decorators
/// included). The text that followed the moved member keeps its separator:
/// a space when it was on the same line, otherwise a newline.
pub fn move_before(source: &str, moving: &MemberExtent, target: &MemberExtent) -> Vec<TextEdit> {
    let mut edits = Vec::with_capacity(3);
    let mut moved = String::new();

    if let Some(comment) = &moving.leading_comment {
        edits.push(TextEdit::delete(comment.start_byte, comment.end_byte));
        moved.push_str(text(source, comment));
        moved.push_str(separator(comment, &moving.node));
    }

    edits.push(TextEdit::delete(moving.node.start_byte, moving.node.end_byte));
    moved.push_str(text(source, &moving.node));
    moved.push_str(separator(&moving.node, &moving.next_token));

    let anchor = target.leading_comment.as_ref().unwrap_or(&target.node);
    edits.push(TextEdit::insert(anchor.start_byte, moved));
    edits
}

fn text<'a>(source: &'a str, range: &TextRange) -> &'a str {
    source.get(range.start_byte..range.end_byte).unwrap_or("")
}

fn separator(left: &TextRange, right: &TextRange) -> &'static str {
    if left.end.row == right.start.row {
        " "
    } else {
        "\n"
    }
}
