pub mod sort_class_members;

pub use sort_class_members::SortClassMembersLint;

use crate::error::ConfigError;
use crate::lint::LintRegistry;
use crate::order::RuleOptions;

/// Registry holding every rule, configured with `options`.
pub fn registry(options: &RuleOptions) -> Result<LintRegistry, ConfigError> {
    Ok(LintRegistry::new().with_rule(SortClassMembersLint::new(options)?))
}
