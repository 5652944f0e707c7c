use crate::error::ConfigError;
use icu_collator::options::CollatorOptions;
use icu_collator::{CollatorBorrowed, CollatorPreferences};
use icu_locale_core::Locale;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Name comparison for alphabetically sorted slots.
///
/// Without a locale names compare by code point. With a locale they compare
/// with the CLDR collation rules of that locale.
#[derive(Clone, Default)]
pub struct Collator {
    locale: Option<String>,
    rules: Option<Arc<CollatorBorrowed<'static>>>,
}

impl Collator {
    /// Fails when `locale` is not a valid BCP 47 identifier or has no
    /// collation data.
    pub fn new(locale: Option<String>) -> Result<Self, ConfigError> {
        let Some(tag) = locale else {
            return Ok(Self::default());
        };

        let parsed: Locale = tag
            .parse()
            .map_err(|err| ConfigError::invalid_locale(&tag, err))?;
        let prefs = CollatorPreferences::from(parsed);
        let rules = icu_collator::Collator::try_new(prefs, CollatorOptions::default())
            .map_err(|err| ConfigError::invalid_locale(&tag, err))?;

        Ok(Self {
            locale: Some(tag),
            rules: Some(Arc::new(rules)),
        })
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.rules {
            Some(rules) => rules.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl fmt::Debug for Collator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collator")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
