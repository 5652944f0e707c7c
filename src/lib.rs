//! Class-member ordering lint for TypeScript and JavaScript.
//!
//! The crate exposes a tree-sitter based [`LintEngine`] running the
//! `sort_class_members` rule, the ordering engine behind it ([`order`]), and
//! fix application for the reorderings it suggests.

#![allow(clippy::new_without_default)] // LintRegistry::new() requires explicit construction

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fix;
pub mod fixer;
pub mod lint;
pub mod order;
pub mod parser;
pub mod rules;
pub mod syntax;
pub mod telemetry;

use anyhow::{Context, Result};
use tree_sitter::Tree;

use crate::diagnostics::Diagnostic;
use crate::lint::{LintContext, LintRegistry, LintSettings};
use crate::order::RuleOptions;
use crate::parser::{Dialect, parse_source_as};

/// Upper bound on lint-and-fix rounds in [`LintEngine::fix_source`].
pub const MAX_FIX_PASSES: usize = 10;

/// Engine orchestrates linting by parsing source and running registered rules.
pub struct LintEngine {
    registry: LintRegistry,
    settings: LintSettings,
}

/// Result of [`LintEngine::fix_source`].
#[derive(Debug)]
pub struct FixOutcome {
    pub fixed_source: String,
    pub fixes_applied: usize,
    pub passes: usize,
    /// Diagnostics still reported for `fixed_source`.
    pub remaining: Vec<Diagnostic>,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.fixes_applied > 0
    }
}

impl LintEngine {
    /// Create a new engine with explicit lint settings (e.g. from config).
    pub fn new_with_settings(registry: LintRegistry, settings: LintSettings) -> Self {
        Self { registry, settings }
    }

    pub fn registry(&self) -> &LintRegistry {
        &self.registry
    }

    /// Lint a single in-memory TypeScript source string.
    pub fn lint_source(&self, source: &str) -> Result<Vec<Diagnostic>> {
        self.lint_source_as(source, Dialect::TypeScript)
    }

    pub fn lint_source_as(&self, source: &str, dialect: Dialect) -> Result<Vec<Diagnostic>> {
        let tree = parse_source_as(source, dialect)?;
        Ok(self.run_rules(source, &tree))
    }

    /// Lint and apply fixes repeatedly until nothing changes or
    /// [`MAX_FIX_PASSES`] rounds have run.
    pub fn fix_source(&self, source: &str, dialect: Dialect) -> Result<FixOutcome> {
        let mut current = source.to_string();
        let mut fixes_applied = 0;
        let mut passes = 0;

        let remaining = loop {
            let diagnostics = self.lint_source_as(&current, dialect)?;
            if passes == MAX_FIX_PASSES {
                break diagnostics;
            }

            let result = fixer::apply_fixes(&current, &diagnostics)
                .context("failed to apply suggested fixes")?;
            if result.fixes_applied == 0 {
                break diagnostics;
            }

            passes += 1;
            fixes_applied += result.fixes_applied;
            current = result.fixed_source;
            tracing::debug!(pass = passes, applied = result.fixes_applied, "applied fixes");
        };

        Ok(FixOutcome {
            fixed_source: current,
            fixes_applied,
            passes,
            remaining,
        })
    }

    fn run_rules(&self, source: &str, tree: &Tree) -> Vec<Diagnostic> {
        let mut ctx = LintContext::new(self.settings.clone());
        let root = tree.root_node();

        for rule in self.registry.rules() {
            rule.check(root, source, &mut ctx);
        }

        ctx.into_diagnostics()
    }
}

/// Engine configured with [`RuleOptions::recommended`].
pub fn create_default_engine() -> Result<LintEngine> {
    create_engine(&RuleOptions::recommended(), LintSettings::default())
}

pub fn create_engine(options: &RuleOptions, settings: LintSettings) -> Result<LintEngine> {
    let registry = rules::registry(options).context("invalid sort-class-members options")?;
    Ok(LintEngine::new_with_settings(registry, settings))
}
