//! Rule options as they appear in JSON or TOML configuration.

use super::member::{Accessibility, MemberType};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleOptions {
    #[serde(default)]
    pub order: Vec<SlotSpec>,
    /// User groups. These replace built-in groups of the same name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: BTreeMap<String, SlotSpec>,
    #[serde(default)]
    pub stop_after_first_problem: bool,
    #[serde(default)]
    pub accessor_pair_positioning: AccessorPairPositioning,
    /// BCP 47 tag (e.g. `en-US`) selecting the collation used by
    /// alphabetical slots. Without it names compare by code point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Interfaces are only checked when this is set.
    #[serde(default)]
    pub sort_interfaces: bool,
}

impl RuleOptions {
    /// The packaged recommended configuration.
    pub fn recommended() -> Self {
        let order = [
            "[static-properties]",
            "[static-methods]",
            "[properties]",
            "[conventional-private-properties]",
            "constructor",
            "[methods]",
            "[conventional-private-methods]",
        ]
        .into_iter()
        .map(|s| SlotSpec::Name(s.to_string()))
        .collect();

        Self {
            order,
            accessor_pair_positioning: AccessorPairPositioning::GetThenSet,
            ..Self::default()
        }
    }

    /// Parse ESLint-style JSON options.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::invalid_options(e.to_string()))
    }
}

/// One entry of an `order` list or a group body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SlotSpec {
    /// A member name, a `/regex/`, or a `[group]` reference.
    Name(String),
    List(Vec<SlotSpec>),
    Object(Box<SlotObject>),
}

impl SlotSpec {
    pub fn object(slot: SlotObject) -> Self {
        SlotSpec::Object(Box::new(slot))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SlotObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Exact member name or `/regex/`. Patterns use Rust `regex` syntax,
    /// so lookaround and backreferences are rejected as invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub member_type: Option<MemberType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindFilter>,
    #[serde(default, rename = "static", skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    #[serde(default, rename = "async", skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub is_abstract: Option<bool>,
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub is_override: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor_pair: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by_decorator: Option<DecoratorSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KindFilter {
    Get,
    Set,
    Accessor,
    NonAccessor,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DecoratorSpec {
    /// `true` requires at least one decorator, `false` requires none.
    Flag(bool),
    /// Exact decorator name or `/regex/`.
    Name(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Alphabetical,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessorPairPositioning {
    #[default]
    GetThenSet,
    SetThenGet,
    Together,
    Any,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_eslint_style_options() {
        let options = RuleOptions::from_json(
            r#"{
                "order": ["[static-properties]", "constructor", { "type": "method", "sort": "alphabetical" }],
                "groups": { "handlers": [{ "name": "/on.+/", "type": "method" }] },
                "stopAfterFirstProblem": true,
                "accessorPairPositioning": "together"
            }"#,
        )
        .unwrap();

        assert_eq!(options.order.len(), 3);
        assert!(options.stop_after_first_problem);
        assert_eq!(
            options.accessor_pair_positioning,
            AccessorPairPositioning::Together
        );
        let SlotSpec::Object(slot) = &options.order[2] else {
            panic!("expected an inline slot");
        };
        assert_eq!(slot.member_type, Some(MemberType::Method));
        assert_eq!(slot.sort, Some(SortMode::Alphabetical));
        assert!(options.groups.contains_key("handlers"));
    }

    #[test]
    fn decorator_spec_accepts_bool_or_name() {
        let options = RuleOptions::from_json(
            r#"{ "order": [{ "groupByDecorator": true }, { "groupByDecorator": "Input" }] }"#,
        )
        .unwrap();
        let decorators: Vec<_> = options
            .order
            .iter()
            .filter_map(|s| match s {
                SlotSpec::Object(o) => o.group_by_decorator.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(
            decorators,
            vec![DecoratorSpec::Flag(true), DecoratorSpec::Name("Input".into())]
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RuleOptions::from_json(r#"{ "orderr": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOptions(_)));
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let options = RuleOptions::from_json("{}").unwrap();
        assert!(options.order.is_empty());
        assert!(!options.stop_after_first_problem);
        assert!(!options.sort_interfaces);
        assert_eq!(
            options.accessor_pair_positioning,
            AccessorPairPositioning::GetThenSet
        );
    }
}
