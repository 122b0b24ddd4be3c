use crate::model::ContentEntry;
use serde_json::Value as JsonValue;

pub mod create;
pub mod export;
pub mod fields;
pub mod params;
pub mod register;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<ContentEntry>,
    pub documents: Vec<JsonValue>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<ContentEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_documents(mut self, documents: Vec<JsonValue>) -> Self {
        self.documents = documents;
        self
    }
}

/// Attributes for one new entry, applied in order.
pub type EntryAttributes = Vec<(String, crate::attributes::FieldInput)>;
