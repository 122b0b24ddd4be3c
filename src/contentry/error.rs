use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    /// Neither a core field nor a field declared by the content type.
    #[error("Unknown field '{name}' for content type '{content_type}'")]
    UnknownField { content_type: String, name: String },

    #[error("Invalid date for field '{field}': {value:?} ({reason})")]
    InvalidDate {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field '{field}' is not localized and cannot take per-locale values")]
    NotLocalized { field: String },

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid content type '{content_type}': {reason}")]
    InvalidSchema {
        content_type: String,
        reason: String,
    },

    #[error("Content type not found: {0}")]
    ContentTypeNotFound(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_names_both_sides() {
        let err = ContentError::UnknownField {
            content_type: "events".into(),
            name: "venue".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown field 'venue' for content type 'events'"
        );
    }

    #[test]
    fn invalid_date_mentions_value() {
        let err = ContentError::InvalidDate {
            field: "date".into(),
            value: "yesterday".into(),
            reason: "input contains invalid characters".into(),
        };
        assert!(err.to_string().contains("\"yesterday\""));
    }
}
