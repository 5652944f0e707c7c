use super::detect::{Expected, Problem, ProblemKind};
use super::member::{Member, MemberKind};

/// Human-readable label such as `static method create` or `accessor pair value`.
///
/// `group_accessors` turns a paired getter or setter into `accessor pair`.
pub fn describe(member: &Member, paired: bool, group_accessors: bool) -> String {
    if member.is_constructor() {
        return "constructor".to_string();
    }

    let type_name = if paired && group_accessors {
        "accessor pair"
    } else {
        match member.kind {
            MemberKind::Get => "getter",
            MemberKind::Set => "setter",
            _ => member.member_type.as_str(),
        }
    };

    let prefix = if member.is_static { "static " } else { "" };
    format!("{prefix}{type_name} {}", member.name)
}

/// Diagnostic message for a problem whose members are already described.
///
/// `similar` is the number of further problems suppressed by
/// `stopAfterFirstProblem`.
pub fn message(problem: &Problem, source: &str, target: &str, similar: usize) -> String {
    let placement = match (problem.kind, problem.expected) {
        (ProblemKind::AccessorPair, Expected::Before) => "immediately before",
        (ProblemKind::AccessorPair, Expected::After) => "immediately after",
        (ProblemKind::Order, Expected::Before) => "before",
        (ProblemKind::Order, Expected::After) => "after",
    };

    let mut text = format!("Expected {source} to come {placement} {target}.");
    if similar > 0 {
        let noun = if similar == 1 { "problem" } else { "problems" };
        text.push_str(&format!(" ({similar} similar {noun} in this class)"));
    }
    text
}
