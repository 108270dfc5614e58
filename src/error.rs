//! Error taxonomy for the widget core.

use thiserror::Error;

/// Errors produced while reading or mutating widget data.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Canonical value, reference list or options did not parse.
    #[error("malformed {what}: {source}")]
    MalformedInput {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Options file did not parse as TOML.
    #[error("invalid options file: {0}")]
    InvalidOptions(#[from] toml::de::Error),

    /// User-supplied edit failed validation.
    #[error("{0}")]
    Validation(String),

    /// Timestamp string could not be interpreted.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// An event with this id is already in the canonical list.
    #[error("event {0} already exists")]
    DuplicateId(String),
}

impl WidgetError {
    pub fn malformed(what: &'static str, source: serde_json::Error) -> Self {
        WidgetError::MalformedInput { what, source }
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
