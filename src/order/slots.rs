//! Expansion of `order`/`groups` configuration into a flat, ranked slot list.

use super::member::{Accessibility, Member, MemberType};
use super::options::{DecoratorSpec, KindFilter, SlotObject, SlotSpec, SortMode};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// Matches a member (or decorator) name exactly or against an anchored regex.
#[derive(Debug, Clone)]
pub enum NameMatcher {
    Exact(String),
    Pattern(Regex),
}

impl NameMatcher {
    /// `/pattern/` compiles to a regex anchored at both ends; anything else is
    /// an exact name.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Self::parse_cached(raw, &mut HashMap::new())
    }

    fn parse_cached(raw: &str, cache: &mut HashMap<String, Regex>) -> Result<Self, ConfigError> {
        let Some(body) = raw.strip_prefix('/') else {
            return Ok(NameMatcher::Exact(raw.to_string()));
        };
        if let Some(re) = cache.get(raw) {
            return Ok(NameMatcher::Pattern(re.clone()));
        }

        let body = body.strip_suffix('/').unwrap_or(body);
        let mut pattern = String::with_capacity(body.len() + 2);
        if !body.starts_with('^') {
            pattern.push('^');
        }
        pattern.push_str(body);
        if !body.ends_with('$') {
            pattern.push('$');
        }

        let re = Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })?;
        cache.insert(raw.to_string(), re.clone());
        Ok(NameMatcher::Pattern(re))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::Exact(expected) => expected == name,
            NameMatcher::Pattern(re) => re.is_match(name),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DecoratorMatcher {
    /// Presence (`true`) or absence (`false`) of any decorator.
    Present(bool),
    Name(NameMatcher),
}

impl DecoratorMatcher {
    pub fn matches(&self, decorators: &[String]) -> bool {
        match self {
            DecoratorMatcher::Present(wanted) => decorators.is_empty() != *wanted,
            DecoratorMatcher::Name(matcher) => decorators.iter().any(|d| matcher.matches(d)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    Name,
    Type,
    Kind,
    Static,
    Async,
    Private,
    Accessibility,
    Abstract,
    Override,
    Readonly,
    PropertyType,
    AccessorPair,
    GroupByDecorator,
}

/// Score contributed by each predicate a member satisfies.
pub const PREDICATE_WEIGHTS: &[(PredicateKind, u32)] = &[
    (PredicateKind::Name, 100),
    (PredicateKind::AccessorPair, 20),
    (PredicateKind::PropertyType, 11),
    (PredicateKind::Type, 10),
    (PredicateKind::Kind, 10),
    (PredicateKind::Static, 10),
    (PredicateKind::Async, 10),
    (PredicateKind::Private, 10),
    (PredicateKind::Accessibility, 10),
    (PredicateKind::Abstract, 10),
    (PredicateKind::Override, 10),
    (PredicateKind::Readonly, 10),
    (PredicateKind::GroupByDecorator, 10),
];

impl PredicateKind {
    pub fn weight(self) -> u32 {
        PREDICATE_WEIGHTS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or(0, |(_, weight)| *weight)
    }
}

#[derive(Debug, Clone)]
pub enum Predicate {
    Name(NameMatcher),
    Type(MemberType),
    Kind(KindFilter),
    Static(bool),
    Async(bool),
    Private(bool),
    Accessibility(Accessibility),
    Abstract(bool),
    Override(bool),
    Readonly(bool),
    PropertyType(String),
    AccessorPair(bool),
    GroupByDecorator(DecoratorMatcher),
}

impl Predicate {
    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Name(_) => PredicateKind::Name,
            Predicate::Type(_) => PredicateKind::Type,
            Predicate::Kind(_) => PredicateKind::Kind,
            Predicate::Static(_) => PredicateKind::Static,
            Predicate::Async(_) => PredicateKind::Async,
            Predicate::Private(_) => PredicateKind::Private,
            Predicate::Accessibility(_) => PredicateKind::Accessibility,
            Predicate::Abstract(_) => PredicateKind::Abstract,
            Predicate::Override(_) => PredicateKind::Override,
            Predicate::Readonly(_) => PredicateKind::Readonly,
            Predicate::PropertyType(_) => PredicateKind::PropertyType,
            Predicate::AccessorPair(_) => PredicateKind::AccessorPair,
            Predicate::GroupByDecorator(_) => PredicateKind::GroupByDecorator,
        }
    }

    pub fn weight(&self) -> u32 {
        self.kind().weight()
    }

    /// `paired` tells whether the member belongs to a matched accessor pair.
    pub fn holds(&self, member: &Member, paired: bool) -> bool {
        match self {
            Predicate::Name(matcher) => matcher.matches(&member.name),
            Predicate::Type(ty) => member.member_type == *ty,
            Predicate::Kind(filter) => match filter {
                KindFilter::Get => member.kind == super::member::MemberKind::Get,
                KindFilter::Set => member.kind == super::member::MemberKind::Set,
                KindFilter::Accessor => member.kind.is_accessor(),
                KindFilter::NonAccessor => !member.kind.is_accessor(),
            },
            Predicate::Static(v) => member.is_static == *v,
            Predicate::Async(v) => member.is_async == *v,
            Predicate::Private(v) => member.is_private == *v,
            Predicate::Accessibility(a) => member.accessibility == *a,
            Predicate::Abstract(v) => member.is_abstract == *v,
            Predicate::Override(v) => member.is_override == *v,
            Predicate::Readonly(v) => member.is_readonly == *v,
            Predicate::PropertyType(expected) => {
                member.member_type == MemberType::Property
                    && member.property_type.as_deref() == Some(expected.as_str())
            }
            Predicate::AccessorPair(v) => paired == *v,
            Predicate::GroupByDecorator(matcher) => matcher.matches(&member.decorators),
        }
    }
}

/// One ranked position class.
#[derive(Debug, Clone)]
pub struct Slot {
    pub index: usize,
    pub predicates: Vec<Predicate>,
    pub sort: SortMode,
    /// Innermost group this slot was expanded from.
    pub group: Option<String>,
}

impl Slot {
    pub fn is_catch_all(&self) -> bool {
        self.predicates.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlotList {
    slots: Vec<Slot>,
}

impl SlotList {
    /// Expand `order` against the built-in groups overlaid with `groups`.
    pub fn expand(
        order: &[SlotSpec],
        groups: &BTreeMap<String, SlotSpec>,
    ) -> Result<Self, ConfigError> {
        let mut all_groups = builtin_groups();
        all_groups.extend(groups.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut expander = Expander {
            groups: &all_groups,
            stack: Vec::new(),
            patterns: HashMap::new(),
            slots: Vec::new(),
        };
        for spec in order {
            expander.expand(spec)?;
        }

        tracing::debug!(slots = expander.slots.len(), "expanded slot order");
        Ok(Self {
            slots: expander.slots,
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

struct Expander<'g> {
    groups: &'g BTreeMap<String, SlotSpec>,
    stack: Vec<String>,
    patterns: HashMap<String, Regex>,
    slots: Vec<Slot>,
}

impl Expander<'_> {
    fn expand(&mut self, spec: &SlotSpec) -> Result<(), ConfigError> {
        match spec {
            SlotSpec::List(items) => {
                for item in items {
                    self.expand(item)?;
                }
                Ok(())
            }
            SlotSpec::Name(text) => match group_reference(text) {
                Some(group) => self.expand_group(group),
                None => {
                    let matcher = NameMatcher::parse_cached(text, &mut self.patterns)?;
                    self.push(vec![Predicate::Name(matcher)], SortMode::None);
                    Ok(())
                }
            },
            SlotSpec::Object(object) => match &object.group {
                Some(group) => self.expand_group(group),
                None => {
                    let predicates = self.predicates(object)?;
                    self.push(predicates, object.sort.unwrap_or_default());
                    Ok(())
                }
            },
        }
    }

    fn expand_group(&mut self, name: &str) -> Result<(), ConfigError> {
        let Some(body) = self.groups.get(name) else {
            tracing::trace!(group = name, "ignoring undefined group");
            return Ok(());
        };

        if self.stack.iter().any(|g| g == name) {
            let mut path = self.stack.clone();
            path.push(name.to_string());
            return Err(ConfigError::GroupCycle {
                group: name.to_string(),
                path: path.join(" -> "),
            });
        }

        self.stack.push(name.to_string());
        let result = self.expand(body);
        self.stack.pop();
        result
    }

    fn push(&mut self, predicates: Vec<Predicate>, sort: SortMode) {
        let index = self.slots.len();
        self.slots.push(Slot {
            index,
            predicates,
            sort,
            group: self.stack.last().cloned(),
        });
    }

    fn predicates(&mut self, object: &SlotObject) -> Result<Vec<Predicate>, ConfigError> {
        let mut predicates = Vec::new();

        if let Some(name) = &object.name {
            predicates.push(Predicate::Name(NameMatcher::parse_cached(
                name,
                &mut self.patterns,
            )?));
        }
        if let Some(ty) = object.member_type {
            predicates.push(Predicate::Type(ty));
        }
        if let Some(kind) = object.kind {
            predicates.push(Predicate::Kind(kind));
        }
        if let Some(v) = object.is_static {
            predicates.push(Predicate::Static(v));
        }
        if let Some(v) = object.is_async {
            predicates.push(Predicate::Async(v));
        }
        if let Some(v) = object.private {
            predicates.push(Predicate::Private(v));
        }
        if let Some(a) = object.accessibility {
            predicates.push(Predicate::Accessibility(a));
        }
        if let Some(v) = object.is_abstract {
            predicates.push(Predicate::Abstract(v));
        }
        if let Some(v) = object.is_override {
            predicates.push(Predicate::Override(v));
        }
        if let Some(v) = object.readonly {
            predicates.push(Predicate::Readonly(v));
        }
        if let Some(pt) = &object.property_type {
            predicates.push(Predicate::PropertyType(pt.clone()));
        }
        if let Some(v) = object.accessor_pair {
            predicates.push(Predicate::AccessorPair(v));
        }
        if let Some(spec) = &object.group_by_decorator {
            let matcher = match spec {
                DecoratorSpec::Flag(v) => DecoratorMatcher::Present(*v),
                DecoratorSpec::Name(name) => {
                    DecoratorMatcher::Name(NameMatcher::parse_cached(name, &mut self.patterns)?)
                }
            };
            predicates.push(Predicate::GroupByDecorator(matcher));
        }

        Ok(predicates)
    }
}

/// `[name]` is shorthand for `{ group: name }`.
fn group_reference(text: &str) -> Option<&str> {
    text.strip_prefix('[')?.strip_suffix(']')
}

fn builtin_groups() -> BTreeMap<String, SlotSpec> {
    let method = Some(MemberType::Method);
    let property = Some(MemberType::Property);
    let conventional_private = Some("/_.+/".to_string());

    [
        (
            "constructor",
            SlotObject {
                name: Some("constructor".to_string()),
                member_type: method,
                ..SlotObject::default()
            },
        ),
        (
            "properties",
            SlotObject {
                member_type: property,
                ..SlotObject::default()
            },
        ),
        (
            "getters",
            SlotObject {
                kind: Some(KindFilter::Get),
                ..SlotObject::default()
            },
        ),
        (
            "setters",
            SlotObject {
                kind: Some(KindFilter::Set),
                ..SlotObject::default()
            },
        ),
        (
            "accessor-pairs",
            SlotObject {
                accessor_pair: Some(true),
                ..SlotObject::default()
            },
        ),
        (
            "static-properties",
            SlotObject {
                member_type: property,
                is_static: Some(true),
                ..SlotObject::default()
            },
        ),
        (
            "conventional-private-properties",
            SlotObject {
                member_type: property,
                name: conventional_private.clone(),
                ..SlotObject::default()
            },
        ),
        (
            "arrow-function-properties",
            SlotObject {
                property_type: Some("ArrowFunctionExpression".to_string()),
                ..SlotObject::default()
            },
        ),
        (
            "methods",
            SlotObject {
                member_type: method,
                ..SlotObject::default()
            },
        ),
        (
            "static-methods",
            SlotObject {
                member_type: method,
                is_static: Some(true),
                ..SlotObject::default()
            },
        ),
        (
            "async-methods",
            SlotObject {
                member_type: method,
                is_async: Some(true),
                ..SlotObject::default()
            },
        ),
        (
            "conventional-private-methods",
            SlotObject {
                member_type: method,
                name: conventional_private,
                ..SlotObject::default()
            },
        ),
        ("everything-else", SlotObject::default()),
    ]
    .into_iter()
    .map(|(name, slot)| (name.to_string(), SlotSpec::object(slot)))
    .collect()
}
