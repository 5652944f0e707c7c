//! The member-ordering engine.
//!
//! [`MemberOrder`] is built once from [`RuleOptions`] and then run against
//! the member list of each class body independently:
//!
//! 1. the options expand into a ranked [`SlotList`];
//! 2. getters and setters are paired ([`AccessorPairs`]);
//! 3. every member is scored against every slot, keeping the tied-best slots;
//! 4. accessor pairs are checked for orientation and adjacency, then every
//!    ordered pair of remaining members is checked against slot order;
//! 5. each problem becomes a [`Finding`], with a move fix for `before`
//!    problems.

pub mod accessors;
pub mod collate;
pub mod describe;
pub mod detect;
pub mod member;
pub mod options;
pub mod relocate;
pub mod scoring;
pub mod slots;

pub use accessors::AccessorPairs;
pub use collate::Collator;
pub use detect::{Expected, Problem, ProblemKind};
pub use member::{Member, MemberExtent, MemberKind, MemberType, TextRange};
pub use options::{AccessorPairPositioning, RuleOptions, SlotSpec, SortMode};
pub use scoring::AcceptableSlot;
pub use slots::SlotList;

use crate::error::ConfigError;
use crate::fix::TextEdit;
use detect::Placed;

/// Compiled ordering policy.
#[derive(Debug, Clone)]
pub struct MemberOrder {
    slots: SlotList,
    collator: Collator,
    positioning: AccessorPairPositioning,
    stop_after_first: bool,
    sort_interfaces: bool,
}

/// Members of one class body with their pairing and acceptable slots.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub members: Vec<Member>,
    pub pairs: AccessorPairs,
    /// Indexed by member id.
    pub acceptable: Vec<Vec<AcceptableSlot>>,
}

/// A reportable problem, ready for the diagnostics sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub problem: Problem,
    pub message: String,
    /// Edits moving the source member; absent for `after` problems.
    pub fix: Option<Vec<TextEdit>>,
}

impl MemberOrder {
    pub fn new(options: &RuleOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            slots: SlotList::expand(&options.order, &options.groups)?,
            collator: Collator::new(options.locale.clone())?,
            positioning: options.accessor_pair_positioning,
            stop_after_first: options.stop_after_first_problem,
            sort_interfaces: options.sort_interfaces,
        })
    }

    pub fn slots(&self) -> &SlotList {
        &self.slots
    }

    pub fn sort_interfaces(&self) -> bool {
        self.sort_interfaces
    }

    /// Pair accessors and score every member. Member ids must equal their
    /// position in `members`.
    pub fn analyze(&self, members: Vec<Member>) -> Analysis {
        let pairs = AccessorPairs::build(&members);
        let acceptable = members
            .iter()
            .map(|m| scoring::acceptable_slots(&self.slots, m, pairs.is_paired(m.id)))
            .collect();

        Analysis {
            members,
            pairs,
            acceptable,
        }
    }

    /// Detect problems in an analysed class body and describe them.
    ///
    /// `source` is the full file text the member extents point into.
    pub fn findings(&self, analysis: &Analysis, source: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        let accessor_problems =
            detect::accessor_pair_problems(&analysis.members, &analysis.pairs, self.positioning);
        let take = if self.stop_after_first { 1 } else { usize::MAX };
        for problem in accessor_problems.iter().take(take) {
            findings.push(self.finding(analysis, problem, source, false, 0));
        }

        let placed: Vec<Placed<'_>> = analysis
            .members
            .iter()
            .filter(|m| !analysis.pairs.is_paired(m.id) || analysis.pairs.is_first(m.id))
            .filter_map(|m| {
                let slots = analysis.acceptable.get(m.id)?;
                (!slots.is_empty()).then_some(Placed {
                    id: m.id,
                    name: &m.name,
                    slots,
                })
            })
            .collect();

        let order_problems = detect::order_problems(&placed, &self.collator);
        let similar = if self.stop_after_first {
            order_problems.len().saturating_sub(1)
        } else {
            0
        };
        let group_accessors = self.positioning != AccessorPairPositioning::Any;
        for problem in order_problems.iter().take(take) {
            findings.push(self.finding(analysis, problem, source, group_accessors, similar));
        }

        tracing::trace!(
            members = analysis.members.len(),
            accessor_problems = accessor_problems.len(),
            order_problems = order_problems.len(),
            "checked class body"
        );
        findings
    }

    fn finding(
        &self,
        analysis: &Analysis,
        problem: &Problem,
        source: &str,
        group_accessors: bool,
        similar: usize,
    ) -> Finding {
        let label = |id: usize| {
            analysis.members.get(id).map_or_else(String::new, |m| {
                describe::describe(m, analysis.pairs.is_paired(id), group_accessors)
            })
        };
        let message = describe::message(problem, &label(problem.source), &label(problem.target), similar);

        let fix = match problem.expected {
            Expected::Before => analysis
                .members
                .get(problem.source)
                .zip(analysis.members.get(problem.target))
                .map(|(moving, target)| relocate::move_before(source, &moving.extent, &target.extent)),
            Expected::After => None,
        };

        Finding {
            problem: *problem,
            message,
            fix,
        }
    }
}
