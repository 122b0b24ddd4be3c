//! # Domain Model: Content Entries
//!
//! A [`ContentEntry`] is one record of a content type. Its fixed (core) fields
//! live in plain struct fields; its schema-defined (dynamic) fields live in an
//! attribute store keyed by field name.
//!
//! ## Field Access
//!
//! All field access goes through one pair of methods:
//!
//! - [`ContentEntry::get`]: resolve the value for the session locale and cast it
//! - [`ContentEntry::set`]: normalize the input into the field's storage shape
//!
//! Names are resolved in order: core field, then dynamic field (with one
//! trailing `=` ignored), then [`ContentError::UnknownField`].
//!
//! | Core field | Aliases | Shape |
//! |------------|---------|-------|
//! | `_slug` | `slug`, `_permalink`, `permalink` | localized string |
//! | `_position` | `position` | integer, default 0 |
//! | `_visible` | `visible` | boolean, default true |
//! | `seo_title` | | localized string |
//! | `meta_keywords` | | localized string |
//! | `meta_description` | | localized string |
//!
//! ## Known Locales
//!
//! Every locale that gets written to, on a core or a dynamic field, is
//! registered in the entry's known-locale set.
//!
//! ## Construction
//!
//! [`ContentEntry::build`] applies the initial attributes, then resolves the
//! slug against the sibling entries right away. See [`crate::slug`].

use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::attributes::{cast, FieldDef, FieldInput, FieldValue, RawValue, StoredValue};
use crate::content_type::ContentTypeDef;
use crate::error::{ContentError, Result};
use crate::locale::{Locale, Session, Translations};
use crate::slug;
use crate::store::ContentStore;

/// Fields every entry has, whatever its content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreField {
    Slug,
    Position,
    Visible,
    SeoTitle,
    MetaKeywords,
    MetaDescription,
}

impl CoreField {
    pub const ALL: [CoreField; 6] = [
        CoreField::Slug,
        CoreField::Position,
        CoreField::Visible,
        CoreField::SeoTitle,
        CoreField::MetaKeywords,
        CoreField::MetaDescription,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.strip_suffix('=').unwrap_or(name);
        match name {
            "_slug" | "slug" | "_permalink" | "permalink" => Some(CoreField::Slug),
            "_position" | "position" => Some(CoreField::Position),
            "_visible" | "visible" => Some(CoreField::Visible),
            "seo_title" => Some(CoreField::SeoTitle),
            "meta_keywords" => Some(CoreField::MetaKeywords),
            "meta_description" => Some(CoreField::MetaDescription),
            _ => None,
        }
    }

    /// Key used in the export and submission views.
    pub fn key(self) -> &'static str {
        match self {
            CoreField::Slug => "_slug",
            CoreField::Position => "_position",
            CoreField::Visible => "_visible",
            CoreField::SeoTitle => "seo_title",
            CoreField::MetaKeywords => "meta_keywords",
            CoreField::MetaDescription => "meta_description",
        }
    }

    pub fn is_localized(self) -> bool {
        !matches!(self, CoreField::Position | CoreField::Visible)
    }
}

#[derive(Debug, Clone)]
pub struct ContentEntry {
    id: Uuid,
    content_type: Arc<ContentTypeDef>,
    slug: Translations<String>,
    position: i64,
    visible: bool,
    seo_title: Translations<String>,
    meta_keywords: Translations<String>,
    meta_description: Translations<String>,
    dynamic_attributes: IndexMap<String, StoredValue>,
    known_locales: BTreeSet<Locale>,
}

impl ContentEntry {
    /// An empty entry. Its slug is not resolved; prefer [`ContentEntry::build`].
    pub fn new(content_type: Arc<ContentTypeDef>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_type,
            slug: BTreeMap::new(),
            position: 0,
            visible: true,
            seo_title: BTreeMap::new(),
            meta_keywords: BTreeMap::new(),
            meta_description: BTreeMap::new(),
            dynamic_attributes: IndexMap::new(),
            known_locales: BTreeSet::new(),
        }
    }

    /// Creates an entry, applies `attributes` in order, then resolves its slug
    /// against `siblings`.
    pub fn build<I, K>(
        content_type: Arc<ContentTypeDef>,
        session: &Session,
        attributes: I,
        siblings: &[ContentEntry],
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, FieldInput)>,
        K: AsRef<str>,
    {
        let mut entry = Self::new(content_type);
        for (name, input) in attributes {
            entry.set(name.as_ref(), input, session)?;
        }
        entry.resolve_slug(session, siblings);
        Ok(entry)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content_type(&self) -> &ContentTypeDef {
        &self.content_type
    }

    pub(crate) fn rebind(&mut self, content_type: Arc<ContentTypeDef>) {
        self.content_type = content_type;
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn dynamic_attributes(&self) -> &IndexMap<String, StoredValue> {
        &self.dynamic_attributes
    }

    pub fn known_locales(&self) -> &BTreeSet<Locale> {
        &self.known_locales
    }

    pub fn is_translated_in(&self, locale: &Locale) -> bool {
        self.known_locales.contains(locale)
    }

    /// Slug for the session locale, if any.
    pub fn slug(&self, session: &Session) -> Option<&str> {
        self.core_text(CoreField::Slug, session)
    }

    pub fn permalink(&self, session: &Session) -> Option<&str> {
        self.slug(session)
    }

    pub fn set_slug(&mut self, session: &Session, slug: impl Into<String>) {
        self.known_locales.insert(session.locale().clone());
        self.slug.insert(session.locale().clone(), slug.into());
    }

    /// Recomputes the slug for the session locale. See [`crate::slug::resolve`].
    pub fn resolve_slug(&mut self, session: &Session, siblings: &[ContentEntry]) {
        let resolved = slug::resolve(self, session, siblings);
        self.apply_slug(session, resolved);
    }

    /// Stores a resolved slug, or drops the session-locale slug on `None`.
    pub(crate) fn apply_slug(&mut self, session: &Session, resolved: Option<String>) {
        match resolved {
            Some(slug) => self.set_slug(session, slug),
            None => {
                self.slug.remove(session.locale());
            }
        }
    }

    /// All translations of a localized core field.
    pub fn translations(&self, field: CoreField) -> Option<&Translations<String>> {
        match field {
            CoreField::Slug => Some(&self.slug),
            CoreField::SeoTitle => Some(&self.seo_title),
            CoreField::MetaKeywords => Some(&self.meta_keywords),
            CoreField::MetaDescription => Some(&self.meta_description),
            CoreField::Position | CoreField::Visible => None,
        }
    }

    /// Non-blank value of a localized core field for the session locale.
    pub fn core_text(&self, field: CoreField, session: &Session) -> Option<&str> {
        self.translations(field)?
            .get(session.locale())
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    fn translations_mut(&mut self, field: CoreField) -> Option<&mut Translations<String>> {
        match field {
            CoreField::Slug => Some(&mut self.slug),
            CoreField::SeoTitle => Some(&mut self.seo_title),
            CoreField::MetaKeywords => Some(&mut self.meta_keywords),
            CoreField::MetaDescription => Some(&mut self.meta_description),
            CoreField::Position | CoreField::Visible => None,
        }
    }

    fn field(&self, name: &str) -> Result<&FieldDef> {
        self.content_type
            .find_field(name)
            .ok_or_else(|| ContentError::UnknownField {
                content_type: self.content_type.slug.clone(),
                name: name.to_string(),
            })
    }

    fn resolve_raw(&self, field: &FieldDef, session: &Session) -> Option<&RawValue> {
        let stored = self.dynamic_attributes.get(&field.name)?;
        if field.is_localizable() {
            stored.resolve(session.locale())
        } else {
            stored.shared()
        }
    }

    /// Locale-resolved stored value of a dynamic field, before casting.
    pub fn raw(&self, name: &str, session: &Session) -> Result<Option<&RawValue>> {
        let field = self.field(name)?;
        Ok(self.resolve_raw(field, session))
    }

    /// Reads a field by name and casts it according to its declared kind.
    ///
    /// Relationship fields are resolved through `store`; the returned entries
    /// borrow from it.
    pub fn get<'a, S>(&'a self, name: &str, session: &Session, store: &'a S) -> Result<FieldValue<'a>>
    where
        S: ContentStore + ?Sized,
    {
        if let Some(core) = CoreField::parse(name) {
            return Ok(self.core_value(core, session));
        }
        let field = self.field(name)?;
        let raw = self.resolve_raw(field, session);
        cast::cast(field, raw, self, session, store)
    }

    fn core_value(&self, field: CoreField, session: &Session) -> FieldValue<'static> {
        match field {
            CoreField::Position => FieldValue::Integer(self.position),
            CoreField::Visible => FieldValue::Bool(self.visible),
            localized => self
                .core_text(localized, session)
                .map_or(FieldValue::Null, |s| FieldValue::Text(s.to_string())),
        }
    }

    /// Writes a field by name.
    ///
    /// A [`FieldInput::Single`] lands under the session locale for localizable
    /// fields and replaces the shared value otherwise. A
    /// [`FieldInput::Translations`] is merged into the existing translations;
    /// it is rejected for fields stored flat. Nothing changes on error.
    pub fn set(&mut self, name: &str, input: impl Into<FieldInput>, session: &Session) -> Result<()> {
        let input = input.into();
        if let Some(core) = CoreField::parse(name) {
            return self.set_core(core, input, session);
        }

        let content_type = Arc::clone(&self.content_type);
        let field = content_type
            .find_field(name)
            .ok_or_else(|| ContentError::UnknownField {
                content_type: content_type.slug.clone(),
                name: name.to_string(),
            })?;

        debug!(field = %field.name, locale = %session.locale(), "set dynamic attribute");

        match input {
            FieldInput::Translations(values) => {
                if !field.is_localizable() {
                    return Err(ContentError::NotLocalized {
                        field: field.name.clone(),
                    });
                }
                self.known_locales.extend(values.keys().cloned());
                let slot = self
                    .dynamic_attributes
                    .entry(field.name.clone())
                    .or_insert_with(|| StoredValue::Localized(BTreeMap::new()));
                match slot {
                    StoredValue::Localized(existing) => existing.extend(values),
                    StoredValue::Scalar(_) => *slot = StoredValue::Localized(values),
                }
            }
            FieldInput::Single(value) if field.is_localizable() => {
                let locale = session.locale().clone();
                self.known_locales.insert(locale.clone());
                let slot = self
                    .dynamic_attributes
                    .entry(field.name.clone())
                    .or_insert_with(|| StoredValue::Localized(BTreeMap::new()));
                match slot {
                    StoredValue::Localized(existing) => {
                        existing.insert(locale, value);
                    }
                    StoredValue::Scalar(_) => {
                        *slot = StoredValue::Localized(BTreeMap::from([(locale, value)]));
                    }
                }
            }
            FieldInput::Single(value) => {
                self.dynamic_attributes
                    .insert(field.name.clone(), StoredValue::Scalar(value));
            }
        }
        Ok(())
    }

    fn set_core(&mut self, field: CoreField, input: FieldInput, session: &Session) -> Result<()> {
        let invalid = |reason: &str| ContentError::InvalidValue {
            field: field.key().to_string(),
            reason: reason.to_string(),
        };

        match field {
            CoreField::Position => {
                self.position = match input {
                    FieldInput::Single(RawValue::Integer(i)) => i,
                    FieldInput::Single(RawValue::Text(s)) => s
                        .trim()
                        .parse()
                        .map_err(|_| invalid("expected an integer"))?,
                    FieldInput::Single(_) => return Err(invalid("expected an integer")),
                    FieldInput::Translations(_) => {
                        return Err(ContentError::NotLocalized {
                            field: field.key().to_string(),
                        })
                    }
                };
            }
            CoreField::Visible => {
                self.visible = match input {
                    FieldInput::Single(RawValue::Bool(b)) => b,
                    FieldInput::Single(RawValue::Text(s)) => s
                        .trim()
                        .parse()
                        .map_err(|_| invalid("expected a boolean"))?,
                    FieldInput::Single(_) => return Err(invalid("expected a boolean")),
                    FieldInput::Translations(_) => {
                        return Err(ContentError::NotLocalized {
                            field: field.key().to_string(),
                        })
                    }
                };
            }
            localized => {
                let values: Vec<(Locale, Option<String>)> = match input {
                    FieldInput::Single(value) => vec![(session.locale().clone(), core_text(value))],
                    FieldInput::Translations(values) => values
                        .into_iter()
                        .map(|(locale, value)| (locale, core_text(value)))
                        .collect(),
                };
                if values.iter().any(|(_, v)| v.is_none()) {
                    return Err(invalid("expected text"));
                }
                let Some(target) = self.translations_mut(localized) else {
                    return Ok(());
                };
                let mut locales = Vec::with_capacity(values.len());
                for (locale, value) in values {
                    locales.push(locale.clone());
                    target.insert(locale, value.unwrap_or_default());
                }
                self.known_locales.extend(locales);
            }
        }
        Ok(())
    }

    /// Cast value of the content type's label field.
    pub fn label<'a, S>(&'a self, session: &Session, store: &'a S) -> Result<FieldValue<'a>>
    where
        S: ContentStore + ?Sized,
    {
        match self.content_type.label_field_name() {
            Some(name) => self.get(name, session, store),
            None => Ok(FieldValue::Null),
        }
    }

    /// Label as text for the session locale. Blank labels are `None`.
    pub fn label_text(&self, session: &Session) -> Option<String> {
        let field = self.content_type.label_field()?;
        self.resolve_raw(field, session)
            .and_then(RawValue::to_text)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Text for a localized core field. Null clears it to an empty string.
fn core_text(value: RawValue) -> Option<String> {
    match value {
        RawValue::Null => Some(String::new()),
        other => other.to_text(),
    }
}
