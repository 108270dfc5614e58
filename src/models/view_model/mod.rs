// View model module
// Display-ready events handed to the calendar surface, and the live
// occurrences the surface reports back

use crate::models::event::Identifier;
use crate::models::reference::ReferenceEntity;
use serde::{Deserialize, Serialize};

/// Data carried through the surface untouched, used to resolve tooltip details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedData {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(rename = "proposal", default, skip_serializing_if = "Option::is_none")]
    pub proposal_ref: Option<Identifier>,
    #[serde(rename = "instrument", default, skip_serializing_if = "Option::is_none")]
    pub instrument_ref: Option<Identifier>,
}

/// Derived, never persisted form of an event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModelEvent {
    pub id: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "title", default, skip_serializing_if = "Option::is_none")]
    pub display_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(rename = "classNames", default)]
    pub classification: Vec<String>,
    #[serde(rename = "extendedProps", default)]
    pub extended_data: ExtendedData,
}

impl ViewModelEvent {
    /// Add a classification tag unless already present.
    pub fn add_class(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.classification.contains(&tag) {
            self.classification.push(tag);
        }
    }

    pub fn has_class(&self, tag: &str) -> bool {
        self.classification.iter().any(|c| c == tag)
    }
}

/// One mounted occurrence of an event as reported by the calendar surface.
///
/// `instance_id` is the surface's identity for the occurrence and differs
/// from `event_id` when the surface expands recurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInstance {
    pub instance_id: String,
    pub event_id: String,
    pub start: String,
    pub end: String,
    pub title: Option<String>,
    pub background_color: Option<String>,
    pub extended_data: ExtendedData,
}

impl EventInstance {
    pub fn from_view_model(instance_id: impl Into<String>, event: &ViewModelEvent) -> Self {
        Self {
            instance_id: instance_id.into(),
            event_id: event.id.clone(),
            start: event.start.clone(),
            end: event.end.clone(),
            title: event.display_title.clone(),
            background_color: event.background_color.clone(),
            extended_data: event.extended_data.clone(),
        }
    }
}

/// Resolved reference data shown in the tooltip body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipExtra {
    pub event_type: Option<String>,
    pub proposal: Option<ReferenceEntity>,
    pub instrument: Option<ReferenceEntity>,
}
