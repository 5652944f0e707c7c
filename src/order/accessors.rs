use super::member::Member;
use itertools::Itertools;
use std::collections::HashMap;

/// Getter/setter pairs sharing a name and static-ness.
///
/// Pairing is greedy in declaration order and each member joins at most one
/// pair, so `partner(a) == Some(b)` implies `partner(b) == Some(a)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessorPairs {
    partners: HashMap<usize, usize>,
    /// `(first, second)` member ids in discovery order.
    pairs: Vec<(usize, usize)>,
}

impl AccessorPairs {
    pub fn build(members: &[Member]) -> Self {
        let mut this = Self::default();

        for (first, second) in members.iter().tuple_combinations() {
            if !first.kind.is_accessor() || !second.kind.is_accessor() {
                continue;
            }
            if first.name != second.name || first.is_static != second.is_static {
                continue;
            }
            if this.is_paired(first.id) || this.is_paired(second.id) {
                continue;
            }

            this.partners.insert(first.id, second.id);
            this.partners.insert(second.id, first.id);
            this.pairs.push((first.id, second.id));
        }

        this
    }

    pub fn partner(&self, id: usize) -> Option<usize> {
        self.partners.get(&id).copied()
    }

    pub fn is_paired(&self, id: usize) -> bool {
        self.partners.contains_key(&id)
    }

    /// True for the earlier member of a pair.
    pub fn is_first(&self, id: usize) -> bool {
        self.partner(id).is_some_and(|other| id < other)
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }
}
