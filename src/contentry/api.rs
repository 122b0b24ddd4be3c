//! # API Facade
//!
//! A thin layer over `commands/*.rs`. It owns the store and the site
//! configuration, turns an optional locale code into a [`Session`], and
//! dispatches. Nothing here prints or formats.
//!
//! `ContentApi<S: ContentStore>` is generic over the storage backend, so the
//! same facade runs against [`crate::store::memory::InMemoryStore`] in tests.

use crate::attributes::{FieldInput, FieldValue};
use crate::commands::{self, CmdResult, EntryAttributes};
use crate::config::ContentConfig;
use crate::content_type::ContentTypeDef;
use crate::error::Result;
use crate::locale::Session;
use crate::store::ContentStore;

pub struct ContentApi<S: ContentStore> {
    store: S,
    config: ContentConfig,
}

impl<S: ContentStore> ContentApi<S> {
    pub fn new(store: S, config: ContentConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Session for `locale`, or for the configured default locale.
    pub fn session(&self, locale: Option<&str>) -> Session {
        self.config.session(locale)
    }

    pub fn register_content_type(&mut self, def: ContentTypeDef) -> Result<CmdResult> {
        commands::register::run(&mut self.store, def)
    }

    pub fn create_entries(
        &mut self,
        locale: Option<&str>,
        content_type: &str,
        batch: Vec<EntryAttributes>,
    ) -> Result<CmdResult> {
        let session = self.session(locale);
        commands::create::run(&mut self.store, &session, content_type, batch)
    }

    pub fn read_field(
        &self,
        locale: Option<&str>,
        content_type: &str,
        slug: &str,
        field: &str,
    ) -> Result<FieldValue<'_>> {
        let session = self.session(locale);
        commands::fields::read(&self.store, &session, content_type, slug, field)
    }

    pub fn write_field(
        &mut self,
        locale: Option<&str>,
        content_type: &str,
        slug: &str,
        field: &str,
        input: impl Into<FieldInput>,
    ) -> Result<CmdResult> {
        let session = self.session(locale);
        commands::fields::write(
            &mut self.store,
            &session,
            content_type,
            slug,
            field,
            input.into(),
        )
    }

    pub fn export_entries<I: AsRef<str>>(
        &self,
        locale: Option<&str>,
        content_type: &str,
        slugs: &[I],
    ) -> Result<CmdResult> {
        let session = self.session(locale);
        let slugs: Vec<String> = slugs.iter().map(|s| s.as_ref().to_string()).collect();
        commands::export::run(&self.store, &session, content_type, &slugs)
    }

    /// Submission views in `locale`. `slugs` are the permalinks in the default locale.
    pub fn submission_params<I: AsRef<str>>(
        &mut self,
        locale: Option<&str>,
        content_type: &str,
        slugs: &[I],
    ) -> Result<CmdResult> {
        let lookup = self.session(None);
        let session = self.session(locale);
        let slugs: Vec<String> = slugs.iter().map(|s| s.as_ref().to_string()).collect();
        commands::params::run(&mut self.store, &lookup, &session, content_type, &slugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn api() -> ContentApi<InMemoryStore> {
        let fixture = StoreFixture::new().with_band("Blur");
        let mut config = ContentConfig::default();
        config.add_locale("fr");
        ContentApi::new(fixture.store, config)
    }

    #[test]
    fn session_defaults_to_configured_locale() {
        let api = api();
        assert_eq!(api.session(None).locale().as_str(), "en");
        assert_eq!(api.session(Some("fr")).locale().as_str(), "fr");
    }

    #[test]
    fn register_dispatches() {
        let mut api = api();
        api.register_content_type(StoreFixture::genres()).unwrap();
        assert!(api.store().content_type("genres").is_some());
    }

    #[test]
    fn create_and_read_dispatch() {
        let mut api = api();
        let result = api
            .create_entries(
                None,
                "bands",
                vec![vec![("name".to_string(), FieldInput::single("Pulp"))]],
            )
            .unwrap();
        assert_eq!(result.affected_entries.len(), 1);

        let name = api.read_field(None, "bands", "pulp", "name").unwrap();
        assert_eq!(name.as_str(), Some("Pulp"));
    }

    #[test]
    fn write_uses_requested_locale() {
        let mut api = api();
        api.write_field(Some("fr"), "bands", "blur", "bio", "Groupe anglais")
            .unwrap();
        assert!(api.read_field(None, "bands", "blur", "bio").unwrap().is_null());
    }

    #[test]
    fn export_dispatches() {
        let api = api();
        let result = api.export_entries(None, "bands", &["blur"]).unwrap();
        assert_eq!(result.documents.len(), 1);
    }

    #[test]
    fn params_look_up_default_locale_slug() {
        let mut api = api();
        let result = api.submission_params(Some("fr"), "bands", &["blur"]).unwrap();
        assert_eq!(result.documents[0]["_slug"], "blur");
    }

    #[test]
    fn unknown_content_type_propagates() {
        let api = api();
        let err = api.export_entries::<&str>(None, "albums", &[]).unwrap_err();
        assert!(matches!(err, ContentError::ContentTypeNotFound(_)));
    }
}
