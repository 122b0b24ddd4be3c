//! Attribute value types.
//!
//! Three layers, from storage to caller:
//!
//! - [`RawValue`]: what is stored for one locale (or for a flat field).
//! - [`StoredValue`]: the per-field storage shape, flat or keyed by locale.
//! - [`FieldValue`]: the cast result handed back by the typed accessor.
//!
//! [`FieldInput`] is what callers hand to the setter: a single value for the
//! session locale, or a bulk set of translations.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::locale::{Locale, Translations};
use crate::model::ContentEntry;

/// An uncast stored value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    List(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Null, whitespace-only text, and empty collections are blank.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::List(items) => items.is_empty(),
            RawValue::Map(map) => map.is_empty(),
            RawValue::Bool(_) | RawValue::Integer(_) | RawValue::Float(_) | RawValue::Date(_) => {
                false
            }
        }
    }

    /// Scalar rendering used for labels and lookup keys. Collections have none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Integer(i) => Some(i.to_string()),
            RawValue::Float(f) => Some(f.to_string()),
            RawValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            RawValue::Null | RawValue::List(_) | RawValue::Map(_) => None,
        }
    }

    /// Identifiers held by a list value. A single text value counts as a list of one.
    pub fn to_text_list(&self) -> Vec<String> {
        match self {
            RawValue::List(items) => items.iter().filter_map(RawValue::to_text).collect(),
            other => other.to_text().into_iter().collect(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            RawValue::Null => JsonValue::Null,
            RawValue::Bool(b) => JsonValue::Bool(*b),
            RawValue::Integer(i) => JsonValue::from(*i),
            RawValue::Float(f) => JsonValue::from(*f),
            RawValue::Text(s) => JsonValue::String(s.clone()),
            RawValue::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
            RawValue::List(items) => JsonValue::Array(items.iter().map(RawValue::to_json).collect()),
            RawValue::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(value: NaiveDate) -> Self {
        RawValue::Date(value)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(values: Vec<&str>) -> Self {
        RawValue::List(values.into_iter().map(RawValue::from).collect())
    }
}

impl From<Vec<String>> for RawValue {
    fn from(values: Vec<String>) -> Self {
        RawValue::List(values.into_iter().map(RawValue::from).collect())
    }
}

impl From<JsonValue> for RawValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => RawValue::Null,
            JsonValue::Bool(b) => RawValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Integer(i),
                None => RawValue::Float(n.as_f64().unwrap_or_default()),
            },
            JsonValue::String(s) => RawValue::Text(s),
            JsonValue::Array(items) => RawValue::List(items.into_iter().map(RawValue::from).collect()),
            JsonValue::Object(map) => {
                RawValue::Map(map.into_iter().map(|(k, v)| (k, RawValue::from(v))).collect())
            }
        }
    }
}

/// How one dynamic attribute is stored on an entry.
///
/// The shape follows the field definition: localizable fields are `Localized`,
/// everything else (relationships included) is `Scalar`.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Scalar(RawValue),
    Localized(Translations<RawValue>),
}

impl StoredValue {
    /// Value visible under `locale`. Flat values are visible under every locale.
    pub fn resolve(&self, locale: &Locale) -> Option<&RawValue> {
        match self {
            StoredValue::Scalar(value) => Some(value),
            StoredValue::Localized(map) => map.get(locale),
        }
    }

    /// Value of a field that must not be locale-indexed.
    pub fn shared(&self) -> Option<&RawValue> {
        match self {
            StoredValue::Scalar(value) => Some(value),
            StoredValue::Localized(_) => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            StoredValue::Scalar(value) => value.to_json(),
            StoredValue::Localized(map) => JsonValue::Object(
                map.iter()
                    .map(|(locale, v)| (locale.to_string(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// A value handed to the setter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// One value for the session locale (or the shared value of a flat field).
    Single(RawValue),
    /// Bulk assignment of several locales at once.
    Translations(Translations<RawValue>),
}

impl FieldInput {
    pub fn single(value: impl Into<RawValue>) -> Self {
        FieldInput::Single(value.into())
    }

    pub fn translations<L, V, I>(values: I) -> Self
    where
        L: Into<Locale>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (L, V)>,
    {
        FieldInput::Translations(
            values
                .into_iter()
                .map(|(locale, value)| (locale.into(), value.into()))
                .collect(),
        )
    }
}

impl From<RawValue> for FieldInput {
    fn from(value: RawValue) -> Self {
        FieldInput::Single(value)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::single(value)
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::single(value)
    }
}

impl From<bool> for FieldInput {
    fn from(value: bool) -> Self {
        FieldInput::single(value)
    }
}

impl From<i64> for FieldInput {
    fn from(value: i64) -> Self {
        FieldInput::single(value)
    }
}

impl From<NaiveDate> for FieldInput {
    fn from(value: NaiveDate) -> Self {
        FieldInput::single(value)
    }
}

/// Reference to an uploaded file. Only the URL is known here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    pub url: String,
}

/// A cast field value, borrowed from the store for relationships.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    Null,
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    List(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
    File(FileRef),
    Entry(&'a ContentEntry),
    Entries(Vec<&'a ContentEntry>),
}

impl<'a> FieldValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileRef> {
        match self {
            FieldValue::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_entry(&self) -> Option<&'a ContentEntry> {
        match self {
            FieldValue::Entry(e) => Some(*e),
            _ => None,
        }
    }

    pub fn as_entries(&self) -> Option<&[&'a ContentEntry]> {
        match self {
            FieldValue::Entries(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RawValue> for FieldValue<'_> {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Null => FieldValue::Null,
            RawValue::Bool(b) => FieldValue::Bool(b),
            RawValue::Integer(i) => FieldValue::Integer(i),
            RawValue::Float(f) => FieldValue::Float(f),
            RawValue::Text(s) => FieldValue::Text(s),
            RawValue::Date(d) => FieldValue::Date(d),
            RawValue::List(items) => FieldValue::List(items),
            RawValue::Map(map) => FieldValue::Map(map),
        }
    }
}
