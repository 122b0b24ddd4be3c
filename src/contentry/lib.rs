//! # Contentry
//!
//! A content model for multilingual sites: typed content types, entries with
//! localized attributes, relationships between entries, per-locale permalinks,
//! and JSON projections for export and form submission.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Turns locale codes into Sessions                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - register, create, fields, export, params                 │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (content_type.rs, model.rs, attributes/, slug.rs)    │
//! │  - Schemas, entries, value casting, slug resolution         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ContentStore trait, InMemoryStore                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locales
//!
//! There is no global "current locale". Every read and write that depends on a
//! locale takes a [`locale::Session`], which also carries the date formats used
//! when casting `date` fields.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`content_type`]: Content type schemas and their entry collections
//! - [`model`]: Entries and their core fields
//! - [`attributes`]: Field definitions, stored values, and casting
//! - [`slug`]: Permalink normalization and uniqueness
//! - [`views`]: Export and submission projections
//! - [`store`]: Storage abstraction
//! - [`config`]: Site configuration
//! - [`locale`]: Locales and sessions
//! - [`error`]: Error types

pub mod api;
pub mod attributes;
pub mod commands;
pub mod config;
pub mod content_type;
pub mod error;
pub mod locale;
pub mod model;
pub mod slug;
pub mod store;
pub mod views;
