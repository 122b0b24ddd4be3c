use crate::error::{ContentError, Result};
use crate::locale::{Locale, Session, DEFAULT_DATE_FORMATS, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::{debug, warn};

const CONFIG_FILENAME: &str = "config.json";

/// Site configuration, stored in `<site>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentConfig {
    /// Locale used when the caller does not pick one
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Locales the site is published in
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,

    /// chrono formats tried, in order, when a `date` field holds text
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_locales() -> Vec<String> {
    vec![DEFAULT_LOCALE.to_string()]
}

fn default_date_formats() -> Vec<String> {
    DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales: default_locales(),
            date_formats: default_date_formats(),
        }
    }
}

impl ContentConfig {
    /// Reads `<site>/config.json`. A missing file yields the defaults.
    ///
    /// The default locale is always part of `locales` after loading.
    pub fn load(site_dir: impl AsRef<Path>) -> Result<Self> {
        let path = site_dir.as_ref().join(CONFIG_FILENAME);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no site config, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ContentError::Io(e)),
        };

        let mut config: ContentConfig = serde_json::from_reader(BufReader::new(file))?;
        let default_locale = config.default_locale.clone();
        config.add_locale(&default_locale);
        Ok(config)
    }

    /// Writes `<site>/config.json`, creating the site directory if needed.
    pub fn save(&self, site_dir: impl AsRef<Path>) -> Result<()> {
        let site_dir = site_dir.as_ref();
        fs::create_dir_all(site_dir)?;

        let mut writer = BufWriter::new(File::create(site_dir.join(CONFIG_FILENAME))?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Register a locale (no-op if already present)
    pub fn add_locale(&mut self, locale: &str) {
        if !self.has_locale(locale) {
            self.locales.push(locale.to_string());
        }
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Session for `locale`, or for the default locale when `None`.
    ///
    /// Locales missing from `locales` are still honored, with a warning.
    pub fn session(&self, locale: Option<&str>) -> Session {
        let code = locale.unwrap_or(&self.default_locale);
        if !self.has_locale(code) {
            warn!(locale = code, "locale is not configured for this site");
        }
        Session::new(Locale::from(code)).with_date_formats(self.date_formats.clone())
    }
}
