//! # Storage Layer
//!
//! The [`ContentStore`] trait is the registry of content types that entries
//! reach into when a relationship field is read: a `belongs_to`, `has_many`
//! or `many_to_many` field names its target content type by slug, and the
//! store resolves it.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: content types kept in memory, in registration order
//!
//! Loading content types from disk or a remote service is left to callers;
//! they build [`ContentType`] values and hand them to
//! [`ContentStore::save_content_type`].

use crate::content_type::ContentType;

pub mod memory;

/// Registry of content types, keyed by slug.
pub trait ContentStore {
    /// Get a content type by slug
    fn content_type(&self, slug: &str) -> Option<&ContentType>;

    /// Get a content type by slug, for mutation
    fn content_type_mut(&mut self, slug: &str) -> Option<&mut ContentType>;

    /// Save a content type (create or replace)
    fn save_content_type(&mut self, content_type: ContentType);

    /// List all content types in registration order
    fn list_content_types(&self) -> Vec<&ContentType>;
}
