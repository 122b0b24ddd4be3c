//! Casting stored values by field kind.
//!
//! Scalar kinds pass through, `date` and `file` are reshaped, and the three
//! relationship kinds are delegated to the target content type's lookups.

use chrono::{DateTime, NaiveDate};
use tracing::warn;

use super::spec::{FieldDef, FieldKind};
use super::value::{FieldValue, FileRef, RawValue};
use crate::content_type::ContentType;
use crate::error::{ContentError, Result};
use crate::locale::Session;
use crate::model::ContentEntry;
use crate::store::ContentStore;

/// Casts the locale-resolved `raw` value of `field`, owned by `owner`.
pub fn cast<'a, S>(
    field: &FieldDef,
    raw: Option<&RawValue>,
    owner: &ContentEntry,
    session: &Session,
    store: &'a S,
) -> Result<FieldValue<'a>>
where
    S: ContentStore + ?Sized,
{
    let raw = raw.cloned().unwrap_or(RawValue::Null);

    match field.kind {
        FieldKind::String
        | FieldKind::Text
        | FieldKind::Select
        | FieldKind::Boolean
        | FieldKind::Category => Ok(FieldValue::from(raw)),
        FieldKind::Date => cast_date(field, raw, session),
        FieldKind::File => Ok(match raw {
            RawValue::Null => FieldValue::Null,
            other => match other.to_text() {
                Some(url) => FieldValue::File(FileRef { url }),
                None => FieldValue::from(other),
            },
        }),
        FieldKind::BelongsTo => {
            let Some(target) = target_type(field, store) else {
                return Ok(FieldValue::Null);
            };
            Ok(raw
                .to_text()
                .and_then(|key| target.find_entry(&key, session))
                .map_or(FieldValue::Null, FieldValue::Entry))
        }
        FieldKind::HasMany => {
            let Some(target) = target_type(field, store) else {
                return Ok(FieldValue::Entries(Vec::new()));
            };
            let Some(inverse_of) = field.inverse_of.as_deref() else {
                warn!(field = %field.name, "has_many field without inverse_of");
                return Ok(FieldValue::Entries(Vec::new()));
            };
            // The inverse side may hold either the label or the permalink.
            let candidates: Vec<String> = owner
                .label_text(session)
                .into_iter()
                .chain(owner.slug(session).map(str::to_string))
                .collect();
            Ok(FieldValue::Entries(target.find_entries_by(
                inverse_of,
                &candidates,
                session,
            )))
        }
        FieldKind::ManyToMany => {
            let Some(target) = target_type(field, store) else {
                return Ok(FieldValue::Entries(Vec::new()));
            };
            let ids = raw.to_text_list();
            Ok(FieldValue::Entries(target.find_entries_among(&ids, session)))
        }
    }
}

fn target_type<'a, S>(field: &FieldDef, store: &'a S) -> Option<&'a ContentType>
where
    S: ContentStore + ?Sized,
{
    let slug = field.target.as_deref()?;
    let found = store.content_type(slug);
    if found.is_none() {
        warn!(field = %field.name, target = slug, "relationship target is not registered");
    }
    found
}

fn cast_date<'a>(field: &FieldDef, raw: RawValue, session: &Session) -> Result<FieldValue<'a>> {
    match raw {
        RawValue::Date(date) => Ok(FieldValue::Date(date)),
        RawValue::Null => Ok(FieldValue::Null),
        RawValue::Text(text) if text.trim().is_empty() => Ok(FieldValue::Null),
        RawValue::Text(text) => parse_date(&text, session.date_formats())
            .map(FieldValue::Date)
            .map_err(|reason| ContentError::InvalidDate {
                field: field.name.clone(),
                value: text,
                reason,
            }),
        other => Err(ContentError::InvalidDate {
            field: field.name.clone(),
            value: format!("{:?}", other),
            reason: "not a textual date".to_string(),
        }),
    }
}

/// Parses `text` with each format in turn, then as an RFC 3339 timestamp.
pub fn parse_date(text: &str, formats: &[String]) -> std::result::Result<NaiveDate, String> {
    let text = text.trim();
    let mut last_error = String::from("no date format configured");

    for format in formats {
        match NaiveDate::parse_from_str(text, format) {
            Ok(date) => return Ok(date),
            Err(e) => last_error = e.to_string(),
        }
    }

    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.date_naive())
        .map_err(|_| last_error)
}
