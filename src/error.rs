use thiserror::Error;

/// Problems with the rule configuration.
///
/// These are raised once, while the rule is being built, and never per member.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "invalid name pattern `{pattern}`: {source} (patterns use Rust regex syntax, which has no lookaround or backreferences)"
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("group `{group}` references itself ({path})")]
    GroupCycle { group: String, path: String },

    #[error("unsupported locale `{locale}`: {reason}")]
    InvalidLocale { locale: String, reason: String },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl ConfigError {
    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }

    pub fn invalid_locale(locale: &str, reason: impl std::fmt::Display) -> Self {
        Self::InvalidLocale {
            locale: locale.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_render_the_offending_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigError::InvalidPattern {
            pattern: "/(/".to_string(),
            source,
        };
        let message = err.to_string();
        assert!(message.starts_with("invalid name pattern `/(/`"));
        assert!(message.contains("no lookaround or backreferences"));
    }

    #[test]
    fn group_cycles_show_the_path() {
        let err = ConfigError::GroupCycle {
            group: "a".to_string(),
            path: "a -> b -> a".to_string(),
        };
        assert_eq!(err.to_string(), "group `a` references itself (a -> b -> a)");
    }

    #[test]
    fn config_errors_keep_their_source_through_anyhow() {
        let err = anyhow::Error::new(ConfigError::invalid_options("missing field `order`"))
            .context("invalid sort-class-members options");
        assert_eq!(
            format!("{err:#}"),
            "invalid sort-class-members options: invalid options: missing field `order`"
        );
    }
}
