//! Read-only projections of an entry.
//!
//! - [`export_view`]: the full entry, all locales, keyed by its label.
//! - [`submission_view`]: the core fields for the session locale only.
//!
//! Both are pure functions of the entry's current state.

use serde_json::{Map, Value as JsonValue};

use crate::locale::{Session, Translations};
use crate::model::{ContentEntry, CoreField};

/// The entry as `{ <label>: { core fields…, dynamic attributes… } }`.
///
/// `_position` is never emitted and `_visible` only when `false`. Blank core
/// fields are skipped. A localizable label field loses its session-locale
/// translation, which is redundant with the label key, and is dropped if no
/// other translation remains.
pub fn export_view(entry: &ContentEntry, session: &Session) -> JsonValue {
    let mut attributes = Map::new();

    for field in CoreField::ALL {
        match field {
            CoreField::Position => {}
            CoreField::Visible => {
                if !entry.visible() {
                    attributes.insert(field.key().to_string(), JsonValue::Bool(false));
                }
            }
            localized => {
                if let Some(values) = entry.translations(localized).and_then(non_blank) {
                    attributes.insert(field.key().to_string(), values);
                }
            }
        }
    }

    for (name, stored) in entry.dynamic_attributes() {
        attributes.insert(name.clone(), stored.to_json());
    }

    if let Some(label_field) = entry
        .content_type()
        .label_field()
        .filter(|f| f.is_localizable())
    {
        let now_empty = match attributes.get_mut(&label_field.name) {
            Some(JsonValue::Object(translations)) => {
                translations.remove(session.locale().as_str());
                translations.is_empty()
            }
            _ => false,
        };
        if now_empty {
            attributes.remove(&label_field.name);
        }
    }

    let key = entry
        .label_text(session)
        .or_else(|| entry.slug(session).map(str::to_string))
        .unwrap_or_default();

    let mut document = Map::new();
    document.insert(key, JsonValue::Object(attributes));
    JsonValue::Object(document)
}

/// Core fields for the session locale, each only when present and non-blank.
///
/// Callers are expected to resolve the slug first; [`crate::content_type::ContentType::submission_view`]
/// does so.
pub fn submission_view(entry: &ContentEntry, session: &Session) -> JsonValue {
    let mut params = Map::new();

    for field in CoreField::ALL {
        let value = match field {
            CoreField::Position => Some(JsonValue::from(entry.position())),
            CoreField::Visible => Some(JsonValue::Bool(entry.visible())),
            localized => entry
                .core_text(localized, session)
                .map(|s| JsonValue::String(s.to_string())),
        };
        if let Some(value) = value {
            params.insert(field.key().to_string(), value);
        }
    }

    JsonValue::Object(params)
}

fn non_blank(values: &Translations<String>) -> Option<JsonValue> {
    let kept: Map<String, JsonValue> = values
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(locale, v)| (locale.to_string(), JsonValue::String(v.clone())))
        .collect();
    (!kept.is_empty()).then_some(JsonValue::Object(kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{FieldDef, FieldInput, FieldKind};
    use crate::content_type::{ContentType, ContentTypeDef};
    use serde_json::json;

    fn songs() -> ContentType {
        ContentType::new(
            ContentTypeDef::new("songs", "Songs")
                .with_field(FieldDef::new("title", FieldKind::String).localized())
                .with_field(FieldDef::new("duration", FieldKind::String))
                .with_field(FieldDef::new("band", FieldKind::BelongsTo).target("bands")),
        )
    }

    fn en() -> Session {
        Session::new("en")
    }

    #[test]
    fn export_omits_position_and_default_visibility() {
        let mut songs = songs();
        songs
            .insert_entry(
                &en(),
                vec![
                    ("title", FieldInput::single("Song #1")),
                    ("duration", FieldInput::single("3:14")),
                    ("_position", FieldInput::single(4_i64)),
                ],
            )
            .unwrap();

        let view = export_view(&songs.entries()[0], &en());
        assert_eq!(
            view,
            json!({
                "Song #1": {
                    "_slug": {"en": "song-1"},
                    "duration": "3:14"
                }
            })
        );
    }

    #[test]
    fn export_includes_hidden_flag() {
        let mut songs = songs();
        songs
            .insert_entry(
                &en(),
                vec![
                    ("title", FieldInput::single("Hidden")),
                    ("_visible", FieldInput::single(false)),
                ],
            )
            .unwrap();

        let view = export_view(&songs.entries()[0], &en());
        assert_eq!(view["Hidden"]["_visible"], json!(false));
    }

    #[test]
    fn export_keeps_other_label_translations() {
        let mut songs = songs();
        songs
            .insert_entry(
                &en(),
                vec![(
                    "title",
                    FieldInput::translations([("en", "Hello"), ("fr", "Bonjour")]),
                )],
            )
            .unwrap();

        let view = export_view(&songs.entries()[0], &en());
        assert_eq!(view["Hello"]["title"], json!({"fr": "Bonjour"}));
    }

    #[test]
    fn export_relationships_as_stored() {
        let mut songs = songs();
        songs
            .insert_entry(
                &en(),
                vec![
                    ("title", FieldInput::single("Hey")),
                    ("band", FieldInput::single("the-beatles")),
                ],
            )
            .unwrap();

        let view = export_view(&songs.entries()[0], &en());
        assert_eq!(view["Hey"]["band"], json!("the-beatles"));
        assert!(view["Hey"].get("title").is_none());
    }

    #[test]
    fn export_falls_back_to_slug_key() {
        let mut songs = songs();
        songs
            .insert_entry(&en(), vec![("_slug", FieldInput::single("untitled"))])
            .unwrap();
        let view = export_view(&songs.entries()[0], &en());
        assert!(view.get("untitled").is_some());
    }

    #[test]
    fn submission_view_lists_core_fields_only() {
        let mut songs = songs();
        let id = songs
            .insert_entry(
                &en(),
                vec![
                    ("title", FieldInput::single("Yesterday")),
                    ("seo_title", FieldInput::single("Yesterday - lyrics")),
                    ("meta_keywords", FieldInput::single("  ")),
                ],
            )
            .unwrap()
            .id();

        let view = songs.submission_view(&id, &en()).unwrap();
        assert_eq!(
            view,
            json!({
                "_slug": "yesterday",
                "_position": 0,
                "_visible": true,
                "seo_title": "Yesterday - lyrics"
            })
        );
    }

    #[test]
    fn submission_view_resolves_slug_for_new_locale() {
        let mut songs = songs();
        let id = songs
            .insert_entry(
                &en(),
                vec![(
                    "title",
                    FieldInput::translations([("en", "Hello"), ("fr", "Bonjour")]),
                )],
            )
            .unwrap()
            .id();

        let fr = en().for_locale("fr");
        let view = songs.submission_view(&id, &fr).unwrap();
        assert_eq!(view["_slug"], json!("bonjour"));
    }
}
