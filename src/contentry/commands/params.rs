use crate::commands::CmdResult;
use crate::error::{ContentError, Result};
use crate::locale::Session;
use crate::store::ContentStore;

/// Submission views for the entries with the given permalinks.
///
/// Each entry's slug is re-resolved for the session locale first, so an entry
/// viewed in a locale it has no slug for yet gets one seeded from its label.
/// `slugs` are matched in the locale of `lookup`.
pub fn run<S: ContentStore>(
    store: &mut S,
    lookup: &Session,
    session: &Session,
    content_type: &str,
    slugs: &[String],
) -> Result<CmdResult> {
    let target = store
        .content_type_mut(content_type)
        .ok_or_else(|| ContentError::ContentTypeNotFound(content_type.to_string()))?;

    let mut ids = Vec::with_capacity(slugs.len());
    for slug in slugs {
        let entry = target
            .entry_by_slug(slug, lookup)
            .ok_or_else(|| ContentError::EntryNotFound(slug.to_string()))?;
        ids.push(entry.id());
    }

    let mut documents = Vec::with_capacity(ids.len());
    let mut affected = Vec::with_capacity(ids.len());
    for id in &ids {
        documents.push(target.submission_view(id, session)?);
        if let Some(entry) = target.entry(id) {
            affected.push(entry.clone());
        }
    }

    Ok(CmdResult::default()
        .with_documents(documents)
        .with_affected_entries(affected))
}
