use crate::lint::{LintLevel, LintSettings};
use crate::order::RuleOptions;
use crate::rules::sort_class_members::SORT_CLASS_MEMBERS;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of `sort-class-members.toml` (or an equivalent JSON file).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortMembersConfig {
    #[serde(default)]
    pub lint: LintConfig,

    /// Rule options; the recommended set applies when absent.
    #[serde(default)]
    pub options: Option<RuleOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    #[serde(default)]
    pub level: LintLevel,
}

impl SortMembersConfig {
    pub fn rule_options(&self) -> RuleOptions {
        self.options.clone().unwrap_or_else(RuleOptions::recommended)
    }

    pub fn settings(&self) -> LintSettings {
        LintSettings::default().with_level(SORT_CLASS_MEMBERS.name, self.lint.level)
    }
}

pub const DEFAULT_CONFIG_FILE_NAME: &str = "sort-class-members.toml";

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut cur = Some(start_dir);
    while let Some(dir) = cur {
        let candidate = dir.join(DEFAULT_CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        cur = dir.parent();
    }
    None
}

/// Load a config file. `.json` files are read as JSON, anything else as TOML.
pub fn load_config_file(path: &Path) -> Result<SortMembersConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let cfg: SortMembersConfig = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?
    } else {
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?
    };
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

pub fn load_config(
    explicit_path: Option<&Path>,
    start_dir: &Path,
) -> Result<Option<(PathBuf, SortMembersConfig)>> {
    if let Some(p) = explicit_path {
        let cfg = load_config_file(p)?;
        return Ok(Some((p.to_path_buf(), cfg)));
    }

    let Some(p) = find_config_file(start_dir) else {
        return Ok(None);
    };
    let cfg = load_config_file(&p)?;
    Ok(Some((p, cfg)))
}
