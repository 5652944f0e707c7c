use crate::diagnostics::{Diagnostic, Span, Suggestion};
use serde::Deserialize;
use std::collections::HashMap;
use tree_sitter::Node;

/// Severity assigned to a lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintLevel {
    /// Findings are dropped before they reach the diagnostics list.
    Allow,
    #[default]
    Warn,
    Error,
}

impl LintLevel {
    /// Name used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LintLevel::Allow => "allow",
            LintLevel::Warn => "warning",
            LintLevel::Error => "error",
        }
    }
}

/// Descriptor for the auto-fix a lint can attach to its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixDescriptor {
    pub available: bool,
    /// Human-readable description of what the fix does.
    pub description: &'static str,
}

impl FixDescriptor {
    pub const fn safe(description: &'static str) -> Self {
        Self {
            available: true,
            description,
        }
    }

    pub const fn none() -> Self {
        Self {
            available: false,
            description: "",
        }
    }
}

/// High-level categories used to group lints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LintCategory {
    Style,
}

impl LintCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintCategory::Style => "style",
        }
    }
}

/// Static metadata describing a lint rule.
#[derive(Debug)]
pub struct LintDescriptor {
    pub name: &'static str,
    pub category: LintCategory,
    pub description: &'static str,
    pub fix: FixDescriptor,
}

/// A single lint rule that can inspect a syntax tree.
pub trait LintRule: Send + Sync {
    fn descriptor(&self) -> &'static LintDescriptor;
    fn check(&self, root: Node, source: &str, ctx: &mut LintContext);
}

/// Per-lint levels, usually from `sort-class-members.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintSettings {
    levels: HashMap<String, LintLevel>,
}

impl LintSettings {
    #[must_use]
    pub fn with_level(mut self, lint_name: impl Into<String>, level: LintLevel) -> Self {
        self.levels.insert(lint_name.into(), level);
        self
    }

    pub fn level_for(&self, lint_name: &str) -> LintLevel {
        self.levels.get(lint_name).copied().unwrap_or_default()
    }
}

/// Mutable context passed to lint rules while traversing a file.
///
/// This is the reporting sink: rules push findings here, and the level from
/// [`LintSettings`] decides whether a finding is kept.
pub struct LintContext {
    settings: LintSettings,
    diagnostics: Vec<Diagnostic>,
}

impl LintContext {
    pub fn new(settings: LintSettings) -> Self {
        Self {
            settings,
            diagnostics: Vec::new(),
        }
    }

    pub fn report_with_suggestion(
        &mut self,
        lint: &'static LintDescriptor,
        span: Span,
        message: impl Into<String>,
        suggestion: Option<Suggestion>,
    ) {
        let level = self.settings.level_for(lint.name);
        if level == LintLevel::Allow {
            return;
        }

        self.diagnostics.push(Diagnostic {
            lint,
            level,
            span,
            message: message.into(),
            suggestion,
        });
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Registry of lint rules run by the engine.
pub struct LintRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl Default for LintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl LintRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &'static LintDescriptor> + '_ {
        self.rules.iter().map(|r| r.descriptor())
    }
}
