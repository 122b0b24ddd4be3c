//! # Content Types
//!
//! A content type is a runtime schema ([`ContentTypeDef`]) plus the ordered
//! collection of its entries ([`ContentType`]).
//!
//! Entries keep a shared handle to the definition, so they can resolve their
//! own fields without going back through the collection. The collection owns
//! the entries and answers the lookups relationship fields need:
//!
//! - [`ContentType::find_entry`]: one entry by permalink or label (`belongs_to`)
//! - [`ContentType::find_entries_by`]: entries whose field holds one of several keys (`has_many`)
//! - [`ContentType::find_entries_among`]: entries whose permalink is listed (`many_to_many`)
//!
//! A miss is an empty result, never an error.
//!
//! ## Construction Order
//!
//! Entries are built against the entries already present, and slug uniqueness
//! depends on that. [`ContentType::insert_entry`] appends in call order, so
//! inserting a batch is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::attributes::{FieldDef, FieldInput, FieldKind};
use crate::error::{ContentError, Result};
use crate::locale::Session;
use crate::model::ContentEntry;
use crate::slug;
use crate::views;

/// Schema of a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDef {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Field used as the human-readable identifier. Defaults to the first field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_field_name: Option<String>,
}

impl ContentTypeDef {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            fields: Vec::new(),
            label_field_name: None,
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_label_field(mut self, name: impl Into<String>) -> Self {
        self.label_field_name = Some(name.into());
        self
    }

    /// Looks up a dynamic field. One trailing `=` (setter form) is ignored.
    pub fn find_field(&self, name: &str) -> Option<&FieldDef> {
        let name = name.strip_suffix('=').unwrap_or(name);
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn label_field_name(&self) -> Option<&str> {
        self.label_field_name
            .as_deref()
            .or_else(|| self.fields.first().map(|f| f.name.as_str()))
    }

    pub fn label_field(&self) -> Option<&FieldDef> {
        self.label_field_name().and_then(|name| self.find_field(name))
    }

    /// Checks the schema is usable before any entry is built from it.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| ContentError::InvalidSchema {
            content_type: self.slug.clone(),
            reason,
        };

        if self.fields.is_empty() {
            return Err(invalid("no fields declared".to_string()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate field '{}'", field.name)));
            }
            if field.is_relationship() && field.target.is_none() {
                return Err(invalid(format!(
                    "relationship field '{}' has no target",
                    field.name
                )));
            }
            if field.kind == FieldKind::HasMany && field.inverse_of.is_none() {
                return Err(invalid(format!(
                    "has_many field '{}' has no inverse_of",
                    field.name
                )));
            }
        }

        if let Some(label) = &self.label_field_name {
            if self.find_field(label).is_none() {
                return Err(invalid(format!("label field '{}' is not declared", label)));
            }
        }

        Ok(())
    }
}

/// A content type and its entries, in declaration order.
#[derive(Debug, Clone)]
pub struct ContentType {
    def: Arc<ContentTypeDef>,
    entries: Vec<ContentEntry>,
}

impl ContentType {
    pub fn new(def: ContentTypeDef) -> Self {
        Self {
            def: Arc::new(def),
            entries: Vec::new(),
        }
    }

    pub fn def(&self) -> &ContentTypeDef {
        &self.def
    }

    pub fn slug(&self) -> &str {
        &self.def.slug
    }

    /// Swaps in a new schema. Existing entries keep their stored values.
    pub fn redefine(&mut self, def: ContentTypeDef) {
        self.def = Arc::new(def);
        for entry in &mut self.entries {
            entry.rebind(Arc::clone(&self.def));
        }
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &Uuid) -> Option<&ContentEntry> {
        self.entries.iter().find(|e| &e.id() == id)
    }

    pub fn entry_mut(&mut self, id: &Uuid) -> Option<&mut ContentEntry> {
        self.entries.iter_mut().find(|e| &e.id() == id)
    }

    pub fn entry_by_slug(&self, slug: &str, session: &Session) -> Option<&ContentEntry> {
        self.entries.iter().find(|e| e.slug(session) == Some(slug))
    }

    /// First entry whose permalink or label equals `key`.
    pub fn find_entry(&self, key: &str, session: &Session) -> Option<&ContentEntry> {
        self.entries.iter().find(|e| {
            e.slug(session) == Some(key) || e.label_text(session).as_deref() == Some(key)
        })
    }

    /// Entries whose value for `field` is one of `candidates`.
    pub fn find_entries_by(
        &self,
        field: &str,
        candidates: &[String],
        session: &Session,
    ) -> Vec<&ContentEntry> {
        if self.def.find_field(field).is_none() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| {
                e.raw(field, session)
                    .ok()
                    .flatten()
                    .and_then(|v| v.to_text())
                    .is_some_and(|v| candidates.contains(&v))
            })
            .collect()
    }

    /// Entries whose permalink is listed in `ids`, in collection order.
    pub fn find_entries_among(&self, ids: &[String], session: &Session) -> Vec<&ContentEntry> {
        self.entries
            .iter()
            .filter(|e| e.slug(session).is_some_and(|s| ids.iter().any(|id| id == s)))
            .collect()
    }

    /// Builds an entry of this type against the current siblings, without inserting it.
    pub fn build_entry<I, K>(&self, session: &Session, attributes: I) -> Result<ContentEntry>
    where
        I: IntoIterator<Item = (K, FieldInput)>,
        K: AsRef<str>,
    {
        ContentEntry::build(Arc::clone(&self.def), session, attributes, &self.entries)
    }

    /// Builds an entry and appends it.
    pub fn insert_entry<I, K>(&mut self, session: &Session, attributes: I) -> Result<&ContentEntry>
    where
        I: IntoIterator<Item = (K, FieldInput)>,
        K: AsRef<str>,
    {
        let entry = self.build_entry(session, attributes)?;
        let index = self.entries.len();
        self.entries.push(entry);
        Ok(&self.entries[index])
    }

    /// Drops every entry past the first `len`.
    pub(crate) fn truncate_entries(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Re-runs slug resolution for one entry.
    pub fn resolve_slug(&mut self, id: &Uuid, session: &Session) -> Result<()> {
        let index = self.index_of(id)?;
        self.resolve_slug_at(index, session);
        Ok(())
    }

    /// Re-runs slug resolution for every entry, in declaration order.
    pub fn resolve_slugs(&mut self, session: &Session) {
        for index in 0..self.entries.len() {
            self.resolve_slug_at(index, session);
        }
    }

    /// Submission view of one entry, after making sure its slug is resolved
    /// for the session locale.
    pub fn submission_view(&mut self, id: &Uuid, session: &Session) -> Result<serde_json::Value> {
        let index = self.index_of(id)?;
        self.resolve_slug_at(index, session);
        Ok(views::submission_view(&self.entries[index], session))
    }

    fn resolve_slug_at(&mut self, index: usize, session: &Session) {
        let resolved = slug::resolve(&self.entries[index], session, &self.entries);
        self.entries[index].apply_slug(session, resolved);
    }

    fn index_of(&self, id: &Uuid) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| &e.id() == id)
            .ok_or_else(|| ContentError::EntryNotFound(id.to_string()))
    }
}
