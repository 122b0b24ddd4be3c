use chrono::NaiveDate;
use contentry::api::ContentApi;
use contentry::attributes::{FieldDef, FieldInput, FieldKind};
use contentry::commands::EntryAttributes;
use contentry::config::ContentConfig;
use contentry::content_type::ContentTypeDef;
use contentry::error::ContentError;
use contentry::locale::Locale;
use contentry::store::memory::InMemoryStore;
use contentry::store::ContentStore;
use serde_json::json;

fn bands() -> ContentTypeDef {
    ContentTypeDef::new("bands", "Bands")
        .with_field(FieldDef::new("name", FieldKind::String))
        .with_field(FieldDef::new("bio", FieldKind::Text).localized())
        .with_field(FieldDef::new("formed_on", FieldKind::Date))
        .with_field(
            FieldDef::new("songs", FieldKind::HasMany)
                .target("songs")
                .inverse_of("band"),
        )
}

fn songs() -> ContentTypeDef {
    ContentTypeDef::new("songs", "Songs")
        .with_field(FieldDef::new("title", FieldKind::String).localized())
        .with_field(
            FieldDef::new("band", FieldKind::BelongsTo)
                .localized()
                .target("bands"),
        )
}

fn attrs(pairs: &[(&str, &str)]) -> EntryAttributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FieldInput::single(*v)))
        .collect()
}

fn site() -> ContentApi<InMemoryStore> {
    let mut config = ContentConfig::default();
    config.add_locale("fr");
    let mut api = ContentApi::new(InMemoryStore::new(), config);
    api.register_content_type(bands()).unwrap();
    api.register_content_type(songs()).unwrap();
    api
}

#[test]
fn localized_values_are_isolated_per_locale() {
    let mut api = site();
    api.create_entries(None, "bands", vec![attrs(&[("name", "Air")])])
        .unwrap();

    api.write_field(None, "bands", "air", "bio", "A French duo").unwrap();
    api.write_field(Some("fr"), "bands", "air", "bio", "Un duo français")
        .unwrap();

    let en = api.read_field(None, "bands", "air", "bio").unwrap();
    let fr = api.read_field(Some("fr"), "bands", "air", "bio").unwrap();
    assert_eq!(en.as_str(), Some("A French duo"));
    assert_eq!(fr.as_str(), Some("Un duo français"));
    assert!(api
        .read_field(Some("de"), "bands", "air", "bio")
        .unwrap()
        .is_null());
}

#[test]
fn relationships_ignore_the_session_locale() {
    let mut api = site();
    api.create_entries(None, "bands", vec![attrs(&[("name", "Blur")])])
        .unwrap();
    api.create_entries(
        None,
        "songs",
        vec![
            attrs(&[("title", "Song 2"), ("band", "Blur")]),
            attrs(&[("title", "Parklife"), ("band", "Blur")]),
        ],
    )
    .unwrap();

    let store = api.store();
    let band = &store.content_type("bands").unwrap().entries()[0];
    let song = &store.content_type("songs").unwrap().entries()[0];

    for locale in [None, Some("fr")] {
        let session = api.session(locale);

        let owner = song.get("band", &session, store).unwrap();
        assert_eq!(owner.as_entry().map(|b| b.id()), Some(band.id()));

        let songs = band.get("songs", &session, store).unwrap();
        assert_eq!(songs.as_entries().map(|s| s.len()), Some(2));
    }
}

#[test]
fn bulk_translations_register_locales() {
    let mut api = site();
    api.create_entries(None, "bands", vec![attrs(&[("name", "Daft Punk")])])
        .unwrap();

    let result = api
        .write_field(
            None,
            "bands",
            "daft-punk",
            "bio",
            FieldInput::translations([("fr", "Duo"), ("de", "Duo")]),
        )
        .unwrap();

    let entry = &result.affected_entries[0];
    assert!(entry.is_translated_in(&Locale::from("fr")));
    assert!(entry.is_translated_in(&Locale::from("de")));
    assert!(entry.is_translated_in(&Locale::from("en")));
}

#[test]
fn bulk_translations_on_flat_field_are_rejected() {
    let mut api = site();
    api.create_entries(None, "bands", vec![attrs(&[("name", "Muse")])])
        .unwrap();

    let err = api
        .write_field(
            None,
            "bands",
            "muse",
            "name",
            FieldInput::translations([("fr", "Muse")]),
        )
        .unwrap_err();
    assert!(matches!(err, ContentError::NotLocalized { .. }));
}

#[test]
fn duplicate_labels_get_unique_slugs() {
    let mut api = site();
    let result = api
        .create_entries(
            None,
            "bands",
            vec![
                attrs(&[("name", "Paris")]),
                attrs(&[("name", "Paris")]),
                attrs(&[("name", "Paris")]),
            ],
        )
        .unwrap();

    let session = api.session(None);
    let slugs: Vec<_> = result
        .affected_entries
        .iter()
        .filter_map(|e| e.slug(&session).map(str::to_string))
        .collect();
    assert_eq!(slugs, vec!["paris", "paris-1", "paris-2"]);
}

#[test]
fn suffix_continues_after_the_highest() {
    let mut api = site();
    api.create_entries(
        None,
        "bands",
        vec![
            attrs(&[("name", "Paris")]),
            attrs(&[("name", "Paris 3"), ("_slug", "paris-3")]),
        ],
    )
    .unwrap();

    let result = api
        .create_entries(None, "bands", vec![attrs(&[("name", "Paris")])])
        .unwrap();

    let session = api.session(None);
    assert_eq!(result.affected_entries[0].slug(&session), Some("paris-4"));
}

#[test]
fn unknown_field_is_an_error() {
    let mut api = site();
    api.create_entries(None, "bands", vec![attrs(&[("name", "Oasis")])])
        .unwrap();

    let err = api
        .read_field(None, "bands", "oasis", "members")
        .unwrap_err();
    assert!(matches!(
        err,
        ContentError::UnknownField { ref content_type, ref name }
            if content_type == "bands" && name == "members"
    ));
}

#[test]
fn export_hides_position_and_default_visibility() {
    let mut api = site();
    let mut hidden = attrs(&[("name", "Hidden")]);
    hidden.push(("_visible".to_string(), FieldInput::single(false)));
    api.create_entries(
        None,
        "bands",
        vec![attrs(&[("name", "Shown")]), hidden],
    )
    .unwrap();

    let result = api.export_entries::<&str>(None, "bands", &[]).unwrap();
    assert_eq!(
        result.documents[0],
        json!({"Shown": {"_slug": {"en": "shown"}, "name": "Shown"}})
    );
    assert_eq!(result.documents[1]["Hidden"]["_visible"], json!(false));
    assert!(result.documents[1]["Hidden"].get("_position").is_none());
}

#[test]
fn dates_follow_configured_formats() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = ContentConfig {
        date_formats: vec!["%d.%m.%Y".to_string()],
        ..ContentConfig::default()
    };
    config.save(temp_dir.path()).unwrap();

    let mut api = ContentApi::new(
        InMemoryStore::new(),
        ContentConfig::load(temp_dir.path()).unwrap(),
    );
    api.register_content_type(bands()).unwrap();
    api.create_entries(
        None,
        "bands",
        vec![attrs(&[("name", "Kraftwerk"), ("formed_on", "01.10.1970")])],
    )
    .unwrap();

    let first = api.read_field(None, "bands", "kraftwerk", "formed_on").unwrap();
    let second = api.read_field(None, "bands", "kraftwerk", "formed_on").unwrap();
    assert_eq!(first.as_date(), NaiveDate::from_ymd_opt(1970, 10, 1));
    assert_eq!(first.as_date(), second.as_date());

    api.write_field(None, "bands", "kraftwerk", "formed_on", "1970-10-01")
        .unwrap();
    let err = api
        .read_field(None, "bands", "kraftwerk", "formed_on")
        .unwrap_err();
    assert!(matches!(err, ContentError::InvalidDate { .. }));
}

#[test]
fn labels_in_any_script_produce_usable_slugs() {
    let mut api = site();
    let result = api
        .create_entries(
            None,
            "bands",
            vec![
                attrs(&[("name", "Sigur Rós")]),
                attrs(&[("name", "東京事変")]),
                attrs(&[("name", "Кино"), ("_slug", "???")]),
                attrs(&[("name", "Кино"), ("_slug", "???")]),
            ],
        )
        .unwrap();

    let session = api.session(None);
    let slugs: Vec<_> = result
        .affected_entries
        .iter()
        .map(|e| e.slug(&session).map(str::to_string))
        .collect();
    assert_eq!(
        slugs,
        vec![
            Some("sigur-rós".to_string()),
            Some("東京事変".to_string()),
            Some("кино".to_string()),
            Some("кино-1".to_string()),
        ]
    );

    let name = api.read_field(None, "bands", "東京事変", "name").unwrap();
    assert_eq!(name.as_str(), Some("東京事変"));
}
