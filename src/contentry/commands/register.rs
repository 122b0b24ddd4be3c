use crate::commands::{CmdMessage, CmdResult};
use crate::content_type::{ContentType, ContentTypeDef};
use crate::error::Result;
use crate::store::ContentStore;
use tracing::info;

/// Validates and saves a content type definition.
///
/// Re-registering an existing slug swaps the schema and keeps its entries.
pub fn run<S: ContentStore>(store: &mut S, def: ContentTypeDef) -> Result<CmdResult> {
    def.validate()?;

    let mut result = CmdResult::default();
    let slug = def.slug.clone();

    match store.content_type_mut(&slug) {
        Some(existing) => {
            existing.redefine(def);
            info!(content_type = %slug, "content type redefined");
            result.add_message(CmdMessage::info(format!(
                "Content type updated: {} ({} entries kept)",
                slug,
                existing.entries().len()
            )));
        }
        None => {
            store.save_content_type(ContentType::new(def));
            info!(content_type = %slug, "content type registered");
            result.add_message(CmdMessage::success(format!(
                "Content type registered: {}",
                slug
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{FieldDef, FieldInput, FieldKind};
    use crate::commands::MessageLevel;
    use crate::error::ContentError;
    use crate::locale::Session;
    use crate::store::memory::InMemoryStore;

    fn posts() -> ContentTypeDef {
        ContentTypeDef::new("posts", "Posts").with_field(FieldDef::new("title", FieldKind::String))
    }

    #[test]
    fn registers_new_content_type() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, posts()).unwrap();
        assert!(store.content_type("posts").is_some());
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn rejects_invalid_schema() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, ContentTypeDef::new("posts", "Posts")).unwrap_err();
        assert!(matches!(err, ContentError::InvalidSchema { .. }));
        assert!(store.content_type("posts").is_none());
    }

    #[test]
    fn redefinition_keeps_entries() {
        let mut store = InMemoryStore::new();
        run(&mut store, posts()).unwrap();
        store
            .content_type_mut("posts")
            .unwrap()
            .insert_entry(&Session::default(), vec![("title", FieldInput::single("Hi"))])
            .unwrap();

        let result = run(
            &mut store,
            posts().with_field(FieldDef::new("body", FieldKind::Text)),
        )
        .unwrap();

        let posts = store.content_type("posts").unwrap();
        assert_eq!(posts.entries().len(), 1);
        assert!(posts.def().find_field("body").is_some());
        assert!(result.messages[0].content.contains("1 entries kept"));
    }
}
