use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ContentError, Result};
use crate::locale::Session;
use crate::model::ContentEntry;
use crate::store::ContentStore;
use crate::views::export_view;

/// Export documents for the entries of a content type.
///
/// With no `slugs`, every entry is exported. Otherwise only the entries whose
/// permalink is listed, in collection order; unknown slugs are reported as
/// warnings.
pub fn run<S: ContentStore>(
    store: &S,
    session: &Session,
    content_type: &str,
    slugs: &[String],
) -> Result<CmdResult> {
    let source = store
        .content_type(content_type)
        .ok_or_else(|| ContentError::ContentTypeNotFound(content_type.to_string()))?;

    let mut result = CmdResult::default();

    let entries: Vec<&ContentEntry> = if slugs.is_empty() {
        source.entries().iter().collect()
    } else {
        for slug in slugs {
            if source.entry_by_slug(slug, session).is_none() {
                result.add_message(CmdMessage::warning(format!("No entry found: {}", slug)));
            }
        }
        source.find_entries_among(slugs, session)
    };

    if entries.is_empty() {
        result.add_message(CmdMessage::info("No entries to export"));
        return Ok(result);
    }

    let documents = entries
        .iter()
        .map(|entry| export_view(entry, session))
        .collect();

    Ok(result.with_documents(documents))
}
