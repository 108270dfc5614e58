// Event module
// Canonical event record as carried in the host form field

use crate::error::{Result, WidgetError};
use crate::utils::date::parse_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier as it appears in host JSON: either a number or a string.
///
/// Lookups compare the textual form, so `1` and `"1"` name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Identifier {
    /// Textual key used for comparisons and view-model ids.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// `1` matches `"1"` but not `"01"` or `"+1"`.
    pub fn matches(&self, other: &str) -> bool {
        match self {
            Identifier::Number(n) => n.to_string() == other,
            Identifier::Text(s) => s == other,
        }
    }

    pub fn same_as(&self, other: &Identifier) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Number(value)
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Identifier::Number(value.into())
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Text(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::Text(value)
    }
}

/// One schedulable time range in the canonical list.
///
/// Unknown fields are kept in `extra` so a read-modify-write cycle does not
/// drop data the host put there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: Identifier,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "proposal", default, skip_serializing_if = "Option::is_none")]
    pub proposal_ref: Option<Identifier>,
    #[serde(rename = "instrument", default, skip_serializing_if = "Option::is_none")]
    pub instrument_ref: Option<Identifier>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventRecord {
    /// Create a record with only the required fields
    ///
    /// # Examples
    /// ```
    /// use calendar_widget::models::event::EventRecord;
    ///
    /// let record = EventRecord::new(1, "2024-01-01T10:00", "2024-01-01T11:00")
    ///     .with_title("Calibration");
    /// assert!(record.validate().is_ok());
    /// ```
    pub fn new(
        id: impl Into<Identifier>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            title: None,
            event_type: None,
            proposal_ref: None,
            instrument_ref: None,
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_proposal(mut self, proposal: impl Into<Identifier>) -> Self {
        self.proposal_ref = Some(proposal.into());
        self
    }

    pub fn with_instrument(mut self, instrument: impl Into<Identifier>) -> Self {
        self.instrument_ref = Some(instrument.into());
        self
    }

    pub fn start_time(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.start)
    }

    pub fn end_time(&self) -> Result<NaiveDateTime> {
        parse_timestamp(&self.end)
    }

    /// Check the `end > start` invariant
    pub fn validate(&self) -> Result<()> {
        validate_range(&self.start, &self.end)
    }
}

/// Both timestamps must parse and `end` must be strictly after `start`.
pub fn validate_range(start: &str, end: &str) -> Result<()> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    if end <= start {
        return Err(WidgetError::Validation(
            "Event end time must be after start time".to_string(),
        ));
    }
    Ok(())
}

/// Parse the serialized canonical list.
pub fn parse_records(value: &str) -> Result<Vec<EventRecord>> {
    serde_json::from_str(value).map_err(|e| WidgetError::malformed("event list", e))
}

/// Serialize the canonical list back into its host representation.
pub fn serialize_records(records: &[EventRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(|e| WidgetError::malformed("event list", e))
}
