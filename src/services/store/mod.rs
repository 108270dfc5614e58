//! Canonical value store.
//! Owns the serialized event list held in the host field, applies
//! mutations to it and propagates every change to the surface and the host.
//!
//! Mutations read the full list, change it and write it back within one
//! call. Concurrent external edits to the value are overwritten
//! (last write wins).

use crate::error::{Result, WidgetError};
use crate::models::event::{parse_records, serialize_records, validate_range, EventRecord};
use crate::services::host::{CalendarSurface, HostNotifier};
use serde::Serialize;

/// Host-visible notification describing one applied mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Notification {
    Change {
        #[serde(rename = "eventId")]
        event_id: String,
        start: String,
        end: String,
    },
    Delete {
        #[serde(rename = "eventId")]
        event_id: String,
    },
    Add {
        record: EventRecord,
    },
}

impl Notification {
    /// Notifications bubble up through the host document.
    pub const BUBBLES: bool = true;
    pub const CANCELABLE: bool = false;

    /// Name of the host event carrying this notification.
    pub fn event_name(&self) -> &'static str {
        match self {
            Notification::Change { .. } => "change",
            Notification::Delete { .. } => "delete",
            Notification::Add { .. } => "add",
        }
    }

    pub fn event_id(&self) -> String {
        match self {
            Notification::Change { event_id, .. } | Notification::Delete { event_id } => {
                event_id.clone()
            }
            Notification::Add { record } => record.id.key(),
        }
    }
}

/// Authoritative serialized event list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalStore {
    value: String,
}

impl CanonicalStore {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Accept a value assigned from outside (host attribute change).
    pub fn replace_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Parse the current value. An empty field is an empty list.
    pub fn records(&self) -> Result<Vec<EventRecord>> {
        match self.value.trim() {
            "" | "null" => Ok(Vec::new()),
            raw => parse_records(raw),
        }
    }

    pub fn find_index_by_id(&self, event_id: &str) -> Result<Option<usize>> {
        Ok(index_of(&self.records()?, event_id))
    }

    /// Move an event to a new start/end (drag, resize or inline edit).
    ///
    /// Returns `Ok(None)` when the id is not in the list.
    pub fn apply_date_change<S, H>(
        &mut self,
        event_id: &str,
        start: &str,
        end: &str,
        surface: &mut S,
        host: &mut H,
    ) -> Result<Option<Notification>>
    where
        S: CalendarSurface + ?Sized,
        H: HostNotifier + ?Sized,
    {
        validate_range(start, end)?;

        let mut records = self.records()?;
        let Some(index) = index_of(&records, event_id) else {
            log::warn!("Ignoring date change for missing event {}", event_id);
            return Ok(None);
        };

        records[index].start = start.to_string();
        records[index].end = end.to_string();
        log::info!("Event {} moved to {} - {}", event_id, start, end);

        let notification = Notification::Change {
            event_id: records[index].id.key(),
            start: start.to_string(),
            end: end.to_string(),
        };
        self.commit(&records, notification, surface, host).map(Some)
    }

    /// Remove an event. Returns `Ok(None)` when the id is not in the list.
    pub fn apply_delete<S, H>(
        &mut self,
        event_id: &str,
        surface: &mut S,
        host: &mut H,
    ) -> Result<Option<Notification>>
    where
        S: CalendarSurface + ?Sized,
        H: HostNotifier + ?Sized,
    {
        let mut records = self.records()?;
        let Some(index) = index_of(&records, event_id) else {
            log::warn!("Ignoring delete for missing event {}", event_id);
            return Ok(None);
        };

        let removed = records.remove(index);
        log::info!("Event {} deleted", removed.id);

        let notification = Notification::Delete {
            event_id: removed.id.key(),
        };
        self.commit(&records, notification, surface, host).map(Some)
    }

    /// Append a new event. Ids must stay unique within the list.
    pub fn apply_add<S, H>(
        &mut self,
        record: EventRecord,
        surface: &mut S,
        host: &mut H,
    ) -> Result<Notification>
    where
        S: CalendarSurface + ?Sized,
        H: HostNotifier + ?Sized,
    {
        record.validate()?;

        let mut records = self.records()?;
        if index_of(&records, &record.id.key()).is_some() {
            return Err(WidgetError::DuplicateId(record.id.key()));
        }

        log::info!("Event {} added", record.id);
        records.push(record.clone());
        self.commit(&records, Notification::Add { record }, surface, host)
    }

    fn commit<S, H>(
        &mut self,
        records: &[EventRecord],
        notification: Notification,
        surface: &mut S,
        host: &mut H,
    ) -> Result<Notification>
    where
        S: CalendarSurface + ?Sized,
        H: HostNotifier + ?Sized,
    {
        self.value = serialize_records(records)?;
        host.value_written(&self.value);
        surface.refetch_events();
        host.dispatch(&notification);
        Ok(notification)
    }
}

fn index_of(records: &[EventRecord], event_id: &str) -> Option<usize> {
    records.iter().position(|record| record.id.matches(event_id))
}
