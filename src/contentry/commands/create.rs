use crate::commands::{CmdMessage, CmdResult, EntryAttributes};
use crate::error::{ContentError, Result};
use crate::locale::Session;
use crate::store::ContentStore;

/// Inserts a batch of entries into a content type, in the given order.
///
/// Each entry's slug is resolved against the entries inserted before it. If any
/// entry fails, the whole batch is rolled back.
pub fn run<S: ContentStore>(
    store: &mut S,
    session: &Session,
    content_type: &str,
    batch: Vec<EntryAttributes>,
) -> Result<CmdResult> {
    let target = store
        .content_type_mut(content_type)
        .ok_or_else(|| ContentError::ContentTypeNotFound(content_type.to_string()))?;

    let existing = target.entries().len();
    let mut created = Vec::with_capacity(batch.len());

    for attributes in batch {
        match target.insert_entry(session, attributes) {
            Ok(entry) => created.push(entry.clone()),
            Err(e) => {
                target.truncate_entries(existing);
                return Err(e);
            }
        }
    }

    let mut result = CmdResult::default();
    for entry in &created {
        result.add_message(CmdMessage::success(format!(
            "Entry created: {}",
            entry.slug(session).unwrap_or("(no slug)")
        )));
    }
    Ok(result.with_affected_entries(created))
}
