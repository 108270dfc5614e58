//! Event data transformer.
//! Maps canonical event records onto the view models rendered by the
//! calendar surface, and resolves the reference data shown in tooltips.

pub mod palette;

use crate::models::event::EventRecord;
use crate::models::reference::{find_by_key, position_of, Instrument, Proposal};
use crate::models::view_model::{EventInstance, ExtendedData, TooltipExtra, ViewModelEvent};
use palette::{event_color, RESERVED_BG};

/// Marks an event as clickable for the surface's stylesheet.
pub const CLICKABLE_CLASS: &str = "fc-event-clickable";
pub const RESERVED_TYPE: &str = "reserved";
pub const RESERVED_TITLE: &str = "Reserved";

pub fn type_class(event_type: &str) -> String {
    format!("event--type-{}", event_type)
}

/// Read-only view over the current reference lists.
///
/// Re-running the transformation for the whole list is the way to refresh
/// after any reference list change.
#[derive(Debug, Clone, Copy)]
pub struct EventTransformer<'a> {
    proposals: &'a [Proposal],
    instruments: &'a [Instrument],
}

impl<'a> EventTransformer<'a> {
    pub fn new(proposals: &'a [Proposal], instruments: &'a [Instrument]) -> Self {
        Self {
            proposals,
            instruments,
        }
    }

    pub fn to_view_model(&self, record: &EventRecord) -> ViewModelEvent {
        let mut event = ViewModelEvent {
            id: record.id.key(),
            start: record.start.clone(),
            end: record.end.clone(),
            display_title: None,
            background_color: None,
            border_color: None,
            resource_id: None,
            classification: vec![CLICKABLE_CLASS.to_string()],
            extended_data: ExtendedData::default(),
        };

        if let Some(instrument) = &record.instrument_ref {
            event.resource_id = Some(instrument.key());
            event.extended_data.instrument_ref = Some(instrument.clone());
        }

        if let Some(proposal_ref) = &record.proposal_ref {
            event.extended_data.proposal_ref = Some(proposal_ref.clone());
            match position_of(self.proposals, proposal_ref) {
                Some((index, proposal)) => {
                    let color = event_color(index);
                    event.display_title = Some(proposal.title.clone());
                    event.background_color = Some(color.to_string());
                    event.border_color = Some(color.to_string());
                }
                None => log::warn!(
                    "Event {} references unknown proposal {}",
                    record.id,
                    proposal_ref
                ),
            }
        }

        if let Some(event_type) = record.event_type.as_ref().filter(|t| !t.is_empty()) {
            event.extended_data.event_type = Some(event_type.clone());
            event.add_class(type_class(event_type));

            if event_type == RESERVED_TYPE {
                event.background_color = Some(RESERVED_BG.to_string());
                event.border_color = Some(RESERVED_BG.to_string());
                event.display_title = Some(RESERVED_TITLE.to_string());
            }
        }

        // Free text is appended to a derived title, never replaces it
        if let Some(title) = record.title.as_ref().filter(|t| !t.is_empty()) {
            event.display_title = Some(match event.display_title.take() {
                Some(derived) if !derived.is_empty() => format!("{}: {}", derived, title),
                _ => title.clone(),
            });
        }

        event
    }

    pub fn to_view_models(&self, records: &[EventRecord]) -> Vec<ViewModelEvent> {
        records.iter().map(|record| self.to_view_model(record)).collect()
    }

    /// Resolve tooltip details for a mounted occurrence.
    ///
    /// The instrument is taken from the first resource the surface associates
    /// with the occurrence, falling back to the record's own reference.
    pub fn resolve_extra(&self, instance: &EventInstance, resource_ids: &[String]) -> TooltipExtra {
        let data = &instance.extended_data;

        let instrument = resource_ids
            .first()
            .cloned()
            .or_else(|| data.instrument_ref.as_ref().map(|id| id.key()))
            .and_then(|key| find_by_key(self.instruments, &key))
            .cloned();

        let proposal = data
            .proposal_ref
            .as_ref()
            .and_then(|id| position_of(self.proposals, id))
            .map(|(_, proposal)| proposal.clone());

        TooltipExtra {
            event_type: data.event_type.clone(),
            proposal,
            instrument,
        }
    }
}

/// Transform one record against the given reference lists.
pub fn to_view_model(
    record: &EventRecord,
    proposals: &[Proposal],
    instruments: &[Instrument],
) -> ViewModelEvent {
    EventTransformer::new(proposals, instruments).to_view_model(record)
}
