//! Contracts with the collaborators the widget core does not own.
//!
//! The calendar surface renders events and reports mount/unmount/change
//! callbacks; the host application receives the serialized value and the
//! bubbling notifications, runs delayed tasks and asks for confirmations.

use crate::models::settings::SurfaceOptions;
use crate::models::view_model::EventInstance;
use crate::services::store::Notification;
use crate::services::tooltip::dismissal::CleanupTask;
use crate::services::tooltip::position::Rect;
use std::time::Duration;

/// Calendar rendering engine, consumed through a narrow callback contract.
#[cfg_attr(test, mockall::automock)]
pub trait CalendarSurface {
    fn init(&mut self, options: &SurfaceOptions);
    fn reset_options(&mut self, options: &SurfaceOptions);
    /// Request full re-derivation of the event view models.
    fn refetch_events(&mut self);
    fn refetch_resources(&mut self);
    fn associated_resource_ids(&self, instance: &EventInstance) -> Vec<String>;
    fn destroy(&mut self);
}

/// Host element/form receiving the authoritative value.
#[cfg_attr(test, mockall::automock)]
pub trait HostNotifier {
    /// The canonical serialized value was rewritten.
    fn value_written(&mut self, value: &str);
    /// Bubbling, non-cancelable notification.
    fn dispatch(&mut self, notification: &Notification);
}

/// Runs a task once after a delay on the UI event loop.
#[cfg_attr(test, mockall::automock)]
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: CleanupTask);
}

/// Explicit user confirmation for destructive actions.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Visual element owned by the calendar surface that a tooltip anchors to.
pub trait Anchor {
    /// Bounding box in viewport coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Bounding box of the sticky title inside the element, if it has one.
    fn sticky_title_rect(&self) -> Option<Rect> {
        None
    }

    /// Rectangle tooltips are placed against.
    fn placement_rect(&self) -> Rect {
        self.sticky_title_rect()
            .unwrap_or_else(|| self.bounding_rect())
    }
}
