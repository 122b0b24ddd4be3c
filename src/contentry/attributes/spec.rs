//! Field specifications.
//!
//! A [`FieldDef`] is one dynamic field declared by a content type: its name, the
//! [`FieldKind`] that decides how values are cast, and the flags that decide how
//! values are stored.

use serde::{Deserialize, Serialize};

/// The declared type of a dynamic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Text,
    Select,
    Boolean,
    Category,
    /// Stored as text or a date, read back as a date.
    Date,
    /// Stored as a URL, read back as a [`crate::attributes::FileRef`].
    File,
    /// Holds the permalink (or label) of one entry of the target type.
    BelongsTo,
    /// Holds nothing: resolved through the target's `inverse_of` field.
    HasMany,
    /// Holds a list of permalinks of entries of the target type.
    ManyToMany,
}

impl FieldKind {
    pub fn is_relationship(self) -> bool {
        matches!(
            self,
            FieldKind::BelongsTo | FieldKind::HasMany | FieldKind::ManyToMany
        )
    }
}

/// Specification for a single dynamic field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Whether values vary per locale. Ignored for relationships.
    #[serde(default)]
    pub localized: bool,

    /// Slug of the target content type (relationships only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Name of the `belongs_to` field on the target pointing back here (`has_many` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_of: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            localized: false,
            target: None,
            inverse_of: None,
        }
    }

    pub fn localized(mut self) -> Self {
        self.localized = true;
        self
    }

    pub fn target(mut self, content_type: impl Into<String>) -> Self {
        self.target = Some(content_type.into());
        self
    }

    pub fn inverse_of(mut self, field: impl Into<String>) -> Self {
        self.inverse_of = Some(field.into());
        self
    }

    pub fn is_relationship(&self) -> bool {
        self.kind.is_relationship()
    }

    /// Whether stored values are keyed by locale.
    ///
    /// Relationships reference entries, not translatable text, so they are
    /// stored flat even when flagged `localized`.
    pub fn is_localizable(&self) -> bool {
        self.localized && !self.is_relationship()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_kinds() {
        assert!(FieldKind::BelongsTo.is_relationship());
        assert!(FieldKind::HasMany.is_relationship());
        assert!(FieldKind::ManyToMany.is_relationship());
        assert!(!FieldKind::Date.is_relationship());
        assert!(!FieldKind::Select.is_relationship());
    }

    #[test]
    fn localized_relationship_is_not_localizable() {
        let field = FieldDef::new("author", FieldKind::BelongsTo)
            .localized()
            .target("authors");
        assert!(field.localized);
        assert!(!field.is_localizable());
    }

    #[test]
    fn localized_text_is_localizable() {
        let field = FieldDef::new("body", FieldKind::Text).localized();
        assert!(field.is_localizable());
        assert!(!FieldDef::new("body", FieldKind::Text).is_localizable());
    }

    #[test]
    fn deserializes_from_schema_json() {
        let field: FieldDef = serde_json::from_str(
            r#"{"name": "songs", "type": "has_many", "target": "songs", "inverse_of": "band"}"#,
        )
        .unwrap();
        assert_eq!(field.kind, FieldKind::HasMany);
        assert_eq!(field.target.as_deref(), Some("songs"));
        assert_eq!(field.inverse_of.as_deref(), Some("band"));
        assert!(!field.localized);
    }
}
