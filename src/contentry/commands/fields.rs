use crate::attributes::{FieldInput, FieldValue};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ContentError, Result};
use crate::locale::Session;
use crate::store::ContentStore;

/// Reads one field of the entry with permalink `slug`.
pub fn read<'a, S: ContentStore>(
    store: &'a S,
    session: &Session,
    content_type: &str,
    slug: &str,
    field: &str,
) -> Result<FieldValue<'a>> {
    let target = store
        .content_type(content_type)
        .ok_or_else(|| ContentError::ContentTypeNotFound(content_type.to_string()))?;
    let entry = target
        .entry_by_slug(slug, session)
        .ok_or_else(|| ContentError::EntryNotFound(slug.to_string()))?;
    entry.get(field, session, store)
}

/// Writes one field of the entry with permalink `slug`.
pub fn write<S: ContentStore>(
    store: &mut S,
    session: &Session,
    content_type: &str,
    slug: &str,
    field: &str,
    input: FieldInput,
) -> Result<CmdResult> {
    let target = store
        .content_type_mut(content_type)
        .ok_or_else(|| ContentError::ContentTypeNotFound(content_type.to_string()))?;
    let id = target
        .entry_by_slug(slug, session)
        .map(|e| e.id())
        .ok_or_else(|| ContentError::EntryNotFound(slug.to_string()))?;
    let entry = target
        .entry_mut(&id)
        .ok_or_else(|| ContentError::EntryNotFound(slug.to_string()))?;

    entry.set(field, input, session)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated {} on {}",
        field, slug
    )));
    Ok(result.with_affected_entries(vec![entry.clone()]))
}
