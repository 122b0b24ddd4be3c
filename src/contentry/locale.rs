//! # Locales and Sessions
//!
//! A content entry keeps one value per locale for its localized fields. Which locale is
//! "current" is never global state: every accessor takes a [`Session`], built by the caller
//! (usually from [`crate::config::ContentConfig::session`]), and reads or writes under
//! `session.locale()`.
//!
//! Accessors never change the session. The only locale side effect of a write is that the
//! written locale gets registered on the entry as known.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_LOCALE: &str = "en";

/// Formats tried, in order, when a `date` field holds text.
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// A locale code such as `en` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

/// Per-locale values of one field.
pub type Translations<T> = BTreeMap<Locale, T>;

/// Caller-scoped context for field access: the current locale plus the
/// date formats used when casting textual dates.
#[derive(Debug, Clone)]
pub struct Session {
    locale: Locale,
    date_formats: Vec<String>,
}

impl Session {
    pub fn new(locale: impl Into<Locale>) -> Self {
        Self {
            locale: locale.into(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn with_date_formats(mut self, formats: Vec<String>) -> Self {
        self.date_formats = formats;
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn date_formats(&self) -> &[String] {
        &self.date_formats
    }

    /// Same settings, different locale.
    pub fn for_locale(&self, locale: impl Into<Locale>) -> Self {
        Self {
            locale: locale.into(),
            date_formats: self.date_formats.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
