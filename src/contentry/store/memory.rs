use indexmap::IndexMap;

use super::ContentStore;
use crate::content_type::ContentType;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    content_types: IndexMap<String, ContentType>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentStore for InMemoryStore {
    fn content_type(&self, slug: &str) -> Option<&ContentType> {
        self.content_types.get(slug)
    }

    fn content_type_mut(&mut self, slug: &str) -> Option<&mut ContentType> {
        self.content_types.get_mut(slug)
    }

    fn save_content_type(&mut self, content_type: ContentType) {
        self.content_types
            .insert(content_type.slug().to_string(), content_type);
    }

    fn list_content_types(&self) -> Vec<&ContentType> {
        self.content_types.values().collect()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::attributes::{FieldDef, FieldInput, FieldKind};
    use crate::content_type::ContentTypeDef;
    use crate::locale::Session;

    /// A small music catalogue: bands, their songs, and genres.
    ///
    /// - `bands.songs` is a `has_many` resolved through `songs.band`
    /// - `bands.genres` is a `many_to_many` over `genres`
    /// - `songs.band` is a `belongs_to`, flagged localized (and stored flat anyway)
    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub session: Session,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            let mut store = InMemoryStore::new();
            store.save_content_type(ContentType::new(Self::bands()));
            store.save_content_type(ContentType::new(Self::songs()));
            store.save_content_type(ContentType::new(Self::genres()));
            Self {
                store,
                session: Session::new("en"),
            }
        }

        pub fn bands() -> ContentTypeDef {
            ContentTypeDef::new("bands", "Bands")
                .with_field(FieldDef::new("name", FieldKind::String))
                .with_field(FieldDef::new("bio", FieldKind::Text).localized())
                .with_field(FieldDef::new("formed_on", FieldKind::Date))
                .with_field(FieldDef::new("logo", FieldKind::File))
                .with_field(
                    FieldDef::new("songs", FieldKind::HasMany)
                        .target("songs")
                        .inverse_of("band"),
                )
                .with_field(FieldDef::new("genres", FieldKind::ManyToMany).target("genres"))
        }

        pub fn songs() -> ContentTypeDef {
            ContentTypeDef::new("songs", "Songs")
                .with_field(FieldDef::new("title", FieldKind::String).localized())
                .with_field(
                    FieldDef::new("band", FieldKind::BelongsTo)
                        .localized()
                        .target("bands"),
                )
        }

        pub fn genres() -> ContentTypeDef {
            ContentTypeDef::new("genres", "Genres")
                .with_field(FieldDef::new("name", FieldKind::String))
        }

        pub fn with_entry(mut self, content_type: &str, attributes: Vec<(&str, FieldInput)>) -> Self {
            let session = self.session.clone();
            self.store
                .content_type_mut(content_type)
                .expect("fixture content type")
                .insert_entry(&session, attributes)
                .expect("fixture entry");
            self
        }

        pub fn with_band(self, name: &str) -> Self {
            self.with_entry("bands", vec![("name", FieldInput::single(name))])
        }

        pub fn with_song(self, title: &str, band: &str) -> Self {
            self.with_entry(
                "songs",
                vec![
                    ("title", FieldInput::single(title)),
                    ("band", FieldInput::single(band)),
                ],
            )
        }

        pub fn with_genre(self, name: &str) -> Self {
            self.with_entry("genres", vec![("name", FieldInput::single(name))])
        }
    }
}
