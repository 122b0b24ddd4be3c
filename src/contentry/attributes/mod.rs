//! # Attribute System
//!
//! Content entries carry two kinds of fields:
//!
//! - **Core fields**, fixed for every entry: `_slug`, `_position`, `_visible`,
//!   `seo_title`, `meta_keywords`, `meta_description`.
//! - **Dynamic fields**, declared at runtime by the entry's content type.
//!
//! This module covers the dynamic side:
//!
//! - **Specifications** ([`FieldDef`], [`FieldKind`]): what a field is and how it is stored
//! - **Values** ([`RawValue`], [`StoredValue`], [`FieldInput`], [`FieldValue`])
//! - **Casting** ([`cast::cast`]): from stored value to typed value, per field kind
//!
//! ## Storage Shapes
//!
//! | Field | Stored as |
//! |-------|-----------|
//! | localized, not a relationship | `StoredValue::Localized({locale: value})` |
//! | not localized | `StoredValue::Scalar(value)` |
//! | relationship (`belongs_to`, `has_many`, `many_to_many`) | `StoredValue::Scalar(value)`, always |
//!
//! The shape is picked from the field definition, never from the shape of the
//! incoming value.
//!
//! ## Usage
//!
//! ```ignore
//! entry.set("title", FieldInput::single("Paris"), &session)?;
//! entry.set("title", FieldInput::translations([("fr", "Paris"), ("de", "Paris")]), &session)?;
//! let title = entry.get("title", &session, &store)?;
//! ```

pub mod cast;
mod spec;
mod value;

pub use spec::{FieldDef, FieldKind};
pub use value::{FieldInput, FieldValue, FileRef, RawValue, StoredValue};
