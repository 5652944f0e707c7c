//! Structural facts about one class or interface member.

use crate::diagnostics::{Position, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Method,
    Property,
}

impl MemberType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberType::Method => "method",
            MemberType::Property => "property",
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Constructor,
    Method,
    Get,
    Set,
    Field,
}

impl MemberKind {
    pub fn is_accessor(&self) -> bool {
        matches!(self, MemberKind::Get | MemberKind::Set)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Constructor => "constructor",
            MemberKind::Method => "method",
            MemberKind::Get => "get",
            MemberKind::Set => "set",
            MemberKind::Field => "field",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Accessibility {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "public" => Some(Accessibility::Public),
            "private" => Some(Accessibility::Private),
            "protected" => Some(Accessibility::Protected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Private => "private",
            Accessibility::Protected => "protected",
        }
    }
}

/// A byte range together with its 1-based start and end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end,
        }
    }
}

/// Where a member lives in the source text.
///
/// `node` starts at the member's first decorator and ends after a trailing
/// `;` when one belongs to the member. `next_token` is the first non-comment
/// token after `node` (the closing brace for the last member).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberExtent {
    pub node: TextRange,
    pub leading_comment: Option<TextRange>,
    pub next_token: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Position in declaration order within its class body.
    pub id: usize,
    pub name: String,
    pub member_type: MemberType,
    pub kind: MemberKind,
    pub is_static: bool,
    pub is_async: bool,
    /// Declared with a `#private` name.
    pub is_private: bool,
    pub accessibility: Accessibility,
    pub is_abstract: bool,
    pub is_readonly: bool,
    pub is_override: bool,
    pub decorators: Vec<String>,
    /// ESTree-style name of the initializer's node type.
    pub property_type: Option<String>,
    pub extent: MemberExtent,
}

impl Member {
    /// A member with every flag cleared and an empty extent.
    pub fn new(id: usize, name: impl Into<String>, member_type: MemberType, kind: MemberKind) -> Self {
        let name = name.into();
        let origin = Position { row: 1, column: 1 };
        let empty = TextRange {
            start_byte: 0,
            end_byte: 0,
            start: origin,
            end: origin,
        };
        Self {
            id,
            is_private: name.starts_with('#'),
            name,
            member_type,
            kind,
            is_static: false,
            is_async: false,
            accessibility: Accessibility::Public,
            is_abstract: false,
            is_readonly: false,
            is_override: false,
            decorators: Vec::new(),
            property_type: None,
            extent: MemberExtent {
                node: empty,
                leading_comment: None,
                next_token: empty,
            },
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_names_are_detected_from_the_hash() {
        let member = Member::new(0, "#secret", MemberType::Property, MemberKind::Field);
        assert!(member.is_private);
        let member = Member::new(0, "secret", MemberType::Property, MemberKind::Field);
        assert!(!member.is_private);
    }

    #[test]
    fn only_get_and_set_are_accessors() {
        assert!(MemberKind::Get.is_accessor());
        assert!(MemberKind::Set.is_accessor());
        assert!(!MemberKind::Method.is_accessor());
        assert!(!MemberKind::Constructor.is_accessor());
    }
}
