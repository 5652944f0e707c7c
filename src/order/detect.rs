//! Order-violation detection.

use super::accessors::AccessorPairs;
use super::collate::Collator;
use super::member::{Member, MemberKind};
use super::options::{AccessorPairPositioning, SortMode};
use super::scoring::AcceptableSlot;
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Before,
    After,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expected::Before => "before",
            Expected::After => "after",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// A getter/setter pair is split or in the wrong orientation.
    AccessorPair,
    /// Two members sit in the wrong slot order.
    Order,
}

/// `source` should move `expected` relative to `target`. Both are member ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub kind: ProblemKind,
    pub source: usize,
    pub target: usize,
    pub expected: Expected,
}

/// Check orientation and adjacency of every matched accessor pair.
///
/// `members` must be the full member list in declaration order.
pub fn accessor_pair_problems(
    members: &[Member],
    pairs: &AccessorPairs,
    positioning: AccessorPairPositioning,
) -> Vec<Problem> {
    if positioning == AccessorPairPositioning::Any {
        return Vec::new();
    }

    pairs
        .pairs()
        .iter()
        .filter_map(|&(first, second)| {
            let first_kind = members.get(first)?.kind;
            let out_of_order = match positioning {
                AccessorPairPositioning::GetThenSet => first_kind != MemberKind::Get,
                AccessorPairPositioning::SetThenGet => first_kind != MemberKind::Set,
                AccessorPairPositioning::Together | AccessorPairPositioning::Any => false,
            };
            let separated = second - first != 1;

            (out_of_order || separated).then_some(Problem {
                kind: ProblemKind::AccessorPair,
                source: second,
                target: first,
                expected: if out_of_order {
                    Expected::Before
                } else {
                    Expected::After
                },
            })
        })
        .collect()
}

/// A member taking part in the slot-order pass.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    pub id: usize,
    pub name: &'a str,
    pub slots: &'a [AcceptableSlot],
}

/// Compare every ordered pair of placed members.
pub fn order_problems(placed: &[Placed<'_>], collator: &Collator) -> Vec<Problem> {
    placed
        .iter()
        .tuple_combinations()
        .filter(|(first, second)| !in_correct_order(first, second, collator))
        .map(|(first, second)| Problem {
            kind: ProblemKind::Order,
            source: second.id,
            target: first.id,
            expected: Expected::Before,
        })
        .collect()
}

/// True when some acceptable slot of `first` may precede some acceptable
/// slot of `second`.
pub fn in_correct_order(first: &Placed<'_>, second: &Placed<'_>, collator: &Collator) -> bool {
    first.slots.iter().any(|a| {
        second.slots.iter().any(|b| {
            let alphabetical = a.sort == SortMode::Alphabetical && b.sort == SortMode::Alphabetical;
            if a.index == b.index && alphabetical {
                collator.compare(first.name, second.name) != Ordering::Greater
            } else {
                a.index <= b.index
            }
        })
    })
}
