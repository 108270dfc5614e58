// Test fixtures - reusable collaborators and data
// Provides a recording calendar surface and host shared by integration tests

#![allow(dead_code)]

use calendar_widget::models::settings::SurfaceOptions;
use calendar_widget::models::view_model::EventInstance;
use calendar_widget::services::host::{Anchor, CalendarSurface, Confirmer, HostNotifier, Scheduler};
use calendar_widget::services::store::Notification;
use calendar_widget::services::tooltip::dismissal::CleanupTask;
use calendar_widget::services::tooltip::position::Rect;
use calendar_widget::{CalendarWidget, WidgetAttributes};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Calendar surface that records every call made by the widget
#[derive(Default)]
pub struct FakeSurface {
    pub inits: Vec<SurfaceOptions>,
    pub resets: Vec<SurfaceOptions>,
    pub event_refetches: usize,
    pub resource_refetches: usize,
    pub destroyed: bool,
    pub resources: HashMap<String, Vec<String>>,
}

impl CalendarSurface for FakeSurface {
    fn init(&mut self, options: &SurfaceOptions) {
        self.inits.push(options.clone());
    }

    fn reset_options(&mut self, options: &SurfaceOptions) {
        self.resets.push(options.clone());
    }

    fn refetch_events(&mut self) {
        self.event_refetches += 1;
    }

    fn refetch_resources(&mut self) {
        self.resource_refetches += 1;
    }

    fn associated_resource_ids(&self, instance: &EventInstance) -> Vec<String> {
        self.resources
            .get(&instance.instance_id)
            .cloned()
            .unwrap_or_default()
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// Host application that records written values and notifications
pub struct FakeHost {
    pub written: Vec<String>,
    pub notifications: Vec<Notification>,
    pub scheduled: Vec<(Duration, CleanupTask)>,
    pub confirmations: Vec<String>,
    pub confirm_answer: bool,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            written: Vec::new(),
            notifications: Vec::new(),
            scheduled: Vec::new(),
            confirmations: Vec::new(),
            confirm_answer: true,
        }
    }
}

impl HostNotifier for FakeHost {
    fn value_written(&mut self, value: &str) {
        self.written.push(value.to_string());
    }

    fn dispatch(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

impl Scheduler for FakeHost {
    fn schedule(&mut self, delay: Duration, task: CleanupTask) {
        self.scheduled.push((delay, task));
    }
}

impl Confirmer for FakeHost {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_answer
    }
}

/// Event element with a fixed bounding box
pub struct FakeAnchor {
    pub rect: Rect,
    pub sticky: Option<Rect>,
}

impl Anchor for FakeAnchor {
    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn sticky_title_rect(&self) -> Option<Rect> {
        self.sticky
    }
}

pub fn anchor() -> Rc<dyn Anchor> {
    Rc::new(FakeAnchor {
        rect: Rect::new(500.0, 300.0, 100.0, 40.0),
        sticky: None,
    })
}

pub type TestWidget = CalendarWidget<FakeSurface, FakeHost>;

pub mod data {
    pub const ONE_EVENT: &str =
        r#"[{"id":1,"start":"2024-01-01T10:00","end":"2024-01-01T11:00"}]"#;

    pub const PROPOSALS: &str = r#"[
        {"id": 10, "title": "Beamline A", "url": "/proposals/10"},
        {"id": 20, "title": "Beamline B"}
    ]"#;

    pub const INSTRUMENTS: &str = r#"[
        {"id": "i1", "title": "Diffractometer"},
        {"id": "i2", "title": "Spectrometer"}
    ]"#;

    pub const MIXED_EVENTS: &str = r#"[
        {"id": 1, "start": "2024-01-01T10:00", "end": "2024-01-01T11:00", "proposal": 10, "instrument": "i1", "type": "beamtime"},
        {"id": 2, "start": "2024-01-02T10:00", "end": "2024-01-02T12:00", "type": "reserved", "title": "Maintenance"},
        {"id": 3, "start": "2024-01-03T08:00", "end": "2024-01-03T09:00", "proposal": 20, "title": "Extra"}
    ]"#;
}

/// Connected widget with full permissions over the given value
pub fn widget_with(value: &str, options: &str) -> TestWidget {
    let mut widget = CalendarWidget::new(FakeSurface::default(), FakeHost::default());
    widget
        .connect(WidgetAttributes {
            value: Some(value.to_string()),
            name: Some("events".to_string()),
            options: Some(options.to_string()),
            proposals: Some(data::PROPOSALS.to_string()),
            instruments: Some(data::INSTRUMENTS.to_string()),
            read_only: false,
            license_key: None,
        })
        .expect("widget should connect");
    widget
}

pub fn editable_widget(value: &str) -> TestWidget {
    widget_with(
        value,
        r#"{"hasChangePermission": true, "hasDeletePermission": true}"#,
    )
}

/// Mount every event the surface would render, one instance per record
pub fn mount_all(widget: &mut TestWidget) -> Vec<(EventInstance, Rc<dyn Anchor>)> {
    let events = widget.event_source().expect("event source");
    events
        .iter()
        .map(|event| {
            let instance = EventInstance::from_view_model(format!("{}::0", event.id), event);
            let anchor = anchor();
            widget.on_event_mounted(&anchor, instance.clone(), false);
            (instance, anchor)
        })
        .collect()
}
