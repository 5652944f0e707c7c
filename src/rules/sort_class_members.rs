use crate::diagnostics::{Applicability, Suggestion};
use crate::error::ConfigError;
use crate::lint::{FixDescriptor, LintCategory, LintContext, LintDescriptor, LintRule};
use crate::order::{MemberOrder, RuleOptions};
use crate::syntax::{class_members, member_bodies};
use tree_sitter::Node;

pub static SORT_CLASS_MEMBERS: LintDescriptor = LintDescriptor {
    name: "sort_class_members",
    category: LintCategory::Style,
    description: "Class members should appear in the configured order",
    fix: FixDescriptor::safe("Move the member in front of the member it should precede"),
};

/// Reports class (and optionally interface) members that break the
/// configured order.
pub struct SortClassMembersLint {
    order: MemberOrder,
}

impl SortClassMembersLint {
    pub fn new(options: &RuleOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            order: MemberOrder::new(options)?,
        })
    }
}

impl LintRule for SortClassMembersLint {
    fn descriptor(&self) -> &'static LintDescriptor {
        &SORT_CLASS_MEMBERS
    }

    fn check(&self, root: Node, source: &str, ctx: &mut LintContext) {
        for body in member_bodies(root, self.order.sort_interfaces()) {
            let analysis = self.order.analyze(class_members(body, source));
            for finding in self.order.findings(&analysis, source) {
                let Some(member) = analysis.members.get(finding.problem.source) else {
                    continue;
                };

                let suggestion = finding.fix.map(|edits| Suggestion {
                    message: format!("move `{}`", member.name),
                    edits,
                    applicability: Applicability::MachineApplicable,
                });

                ctx.report_with_suggestion(
                    &SORT_CLASS_MEMBERS,
                    member.extent.node.span(),
                    finding.message,
                    suggestion,
                );
            }
        }
    }
}
