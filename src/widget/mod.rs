//! Calendar widget.
//! Binds the host form's attributes to the calendar surface: parses the
//! canonical value and reference lists, feeds the surface its events and
//! resources, and owns the tooltips of mounted events.

mod callbacks;

pub use callbacks::DELETE_CONFIRMATION;

use crate::error::WidgetError;
use crate::models::reference::{parse_references, Instrument, Proposal};
use crate::models::settings::{Permissions, SurfaceOptions, WidgetOptions};
use crate::models::view_model::ViewModelEvent;
use crate::services::host::{CalendarSurface, Confirmer, HostNotifier, Scheduler};
use crate::services::store::CanonicalStore;
use crate::services::tooltip::dismissal::DismissalHub;
use crate::services::tooltip::{Tooltip, TooltipRegistry};
use crate::services::transform::EventTransformer;
use anyhow::{Context, Result};

/// Everything the widget needs from its host application.
pub trait WidgetHost: HostNotifier + Scheduler + Confirmer {}

impl<T: HostNotifier + Scheduler + Confirmer> WidgetHost for T {}

/// Host attributes the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAttribute {
    Value,
    Name,
    Options,
    Proposals,
    Instruments,
}

impl WidgetAttribute {
    pub const OBSERVED: [&'static str; 5] = ["value", "name", "options", "instruments", "proposals"];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "value" => Some(Self::Value),
            "name" => Some(Self::Name),
            "options" => Some(Self::Options),
            "proposals" => Some(Self::Proposals),
            "instruments" => Some(Self::Instruments),
            _ => None,
        }
    }
}

/// Attribute values present when the widget is attached.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttributes {
    pub value: Option<String>,
    pub name: Option<String>,
    pub options: Option<String>,
    pub proposals: Option<String>,
    pub instruments: Option<String>,
    pub read_only: bool,
    pub license_key: Option<String>,
}

/// Read-only form input mirroring the canonical value for submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

pub struct CalendarWidget<S: CalendarSurface, H: WidgetHost> {
    surface: S,
    host: H,
    store: CanonicalStore,
    field: HiddenField,
    options: WidgetOptions,
    read_only: bool,
    license_key: Option<String>,
    proposals: Vec<Proposal>,
    instruments: Vec<Instrument>,
    registry: TooltipRegistry,
    hub: DismissalHub,
    connected: bool,
}

impl<S: CalendarSurface, H: WidgetHost> CalendarWidget<S, H> {
    pub fn new(surface: S, host: H) -> Self {
        Self {
            surface,
            host,
            store: CanonicalStore::default(),
            field: HiddenField::default(),
            options: WidgetOptions::default(),
            read_only: false,
            license_key: None,
            proposals: Vec::new(),
            instruments: Vec::new(),
            registry: TooltipRegistry::new(),
            hub: DismissalHub::new(),
            connected: false,
        }
    }

    /// Attach to the host: read all attributes and initialize the surface.
    pub fn connect(&mut self, attributes: WidgetAttributes) -> Result<()> {
        self.read_only = attributes.read_only;
        self.license_key = attributes.license_key;
        self.instruments = parse_references("instruments", attributes.instruments.as_deref())
            .context("Failed to read instruments attribute")?;
        self.proposals = parse_references("proposals", attributes.proposals.as_deref())
            .context("Failed to read proposals attribute")?;
        self.options = WidgetOptions::from_json_str(attributes.options.as_deref())
            .context("Failed to read options attribute")?;

        let value = attributes.value.unwrap_or_default();
        self.store.replace_value(value.as_str());
        self.field = HiddenField {
            name: attributes.name.unwrap_or_default(),
            value,
        };

        let surface_options = self.surface_options();
        self.surface.init(&surface_options);
        self.connected = true;
        log::info!(
            "Calendar widget connected ({} proposals, {} instruments)",
            self.proposals.len(),
            self.instruments.len()
        );
        Ok(())
    }

    /// Detach from the host: destroy the surface and every tooltip.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.surface.destroy();
        let disposed = self.registry.dispose_all(&mut self.hub);
        self.connected = false;
        log::info!("Calendar widget disconnected, {} tooltips disposed", disposed);
    }

    /// React to a host attribute assignment.
    ///
    /// Malformed values leave the previous state in place.
    pub fn attribute_changed(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        let Some(attribute) = WidgetAttribute::parse(name) else {
            log::debug!("Ignoring unobserved attribute {}", name);
            return Ok(());
        };
        let raw = value.unwrap_or_default();

        match attribute {
            WidgetAttribute::Value => {
                self.store.replace_value(raw);
                self.field.value = raw.to_string();
                if self.connected {
                    self.surface.refetch_events();
                }
            }
            WidgetAttribute::Name => {
                self.field.name = raw.to_string();
            }
            WidgetAttribute::Options => {
                let options = WidgetOptions::from_json_str(value)
                    .context("Failed to read options attribute")?;
                self.options = options;
                if self.connected {
                    let surface_options = self.surface_options();
                    self.surface.reset_options(&surface_options);
                }
            }
            WidgetAttribute::Proposals => {
                self.proposals = parse_references("proposals", value)
                    .context("Failed to read proposals attribute")?;
                // Colours and titles depend on the proposal list
                if self.connected {
                    self.surface.refetch_events();
                }
            }
            WidgetAttribute::Instruments => {
                self.instruments = parse_references("instruments", value)
                    .context("Failed to read instruments attribute")?;
                if self.connected {
                    self.surface.refetch_resources();
                }
            }
        }
        Ok(())
    }

    /// Event data source for the surface.
    pub fn event_source(&self) -> std::result::Result<Vec<ViewModelEvent>, WidgetError> {
        let records = self.store.records().map_err(|err| {
            log::error!("Failed to load calendar events: {}", err);
            err
        })?;
        Ok(self.transformer().to_view_models(&records))
    }

    /// Resource data source for the surface.
    pub fn resource_source(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions::from_options(&self.options, self.read_only, self.license_key.as_deref())
    }

    pub fn permissions(&self) -> Permissions {
        self.options.permissions(self.read_only)
    }

    fn transformer(&self) -> EventTransformer<'_> {
        EventTransformer::new(&self.proposals, &self.instruments)
    }

    fn sync_field(&mut self) {
        self.field.value = self.store.value().to_string();
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn value(&self) -> &str {
        self.store.value()
    }

    pub fn field(&self) -> &HiddenField {
        &self.field
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn tooltip(&self, instance_id: &str) -> Option<&Tooltip> {
        self.registry.get(instance_id)
    }

    pub fn registry(&self) -> &TooltipRegistry {
        &self.registry
    }

    pub fn hub(&self) -> &DismissalHub {
        &self.hub
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::view_model::EventInstance;
    use crate::services::store::Notification;
    use crate::services::tooltip::dismissal::CleanupTask;
    use crate::services::tooltip::position::Rect;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSurface {
        inits: usize,
        resets: usize,
        event_refetches: usize,
        resource_refetches: usize,
        destroyed: bool,
    }

    impl CalendarSurface for RecordingSurface {
        fn init(&mut self, _options: &SurfaceOptions) {
            self.inits += 1;
        }
        fn reset_options(&mut self, _options: &SurfaceOptions) {
            self.resets += 1;
        }
        fn refetch_events(&mut self) {
            self.event_refetches += 1;
        }
        fn refetch_resources(&mut self) {
            self.resource_refetches += 1;
        }
        fn associated_resource_ids(&self, _instance: &EventInstance) -> Vec<String> {
            Vec::new()
        }
        fn destroy(&mut self) {
            self.destroyed = true;
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        written: Vec<String>,
        notifications: Vec<Notification>,
    }

    impl HostNotifier for RecordingHost {
        fn value_written(&mut self, value: &str) {
            self.written.push(value.to_string());
        }
        fn dispatch(&mut self, notification: &Notification) {
            self.notifications.push(notification.clone());
        }
    }

    impl Scheduler for RecordingHost {
        fn schedule(&mut self, _delay: Duration, _task: CleanupTask) {}
    }

    impl Confirmer for RecordingHost {
        fn confirm(&mut self, _message: &str) -> bool {
            true
        }
    }

    fn widget() -> CalendarWidget<RecordingSurface, RecordingHost> {
        let mut widget = CalendarWidget::new(RecordingSurface::default(), RecordingHost::default());
        widget
            .connect(WidgetAttributes {
                value: Some(r#"[{"id":1,"start":"2024-01-01T10:00","end":"2024-01-01T11:00","proposal":2}]"#.into()),
                name: Some("events".into()),
                options: Some(r#"{"hasChangePermission": true}"#.into()),
                proposals: Some(r#"[{"id":1,"title":"P1"},{"id":2,"title":"P2"}]"#.into()),
                instruments: Some(r#"[{"id":"i1","title":"I1"}]"#.into()),
                ..Default::default()
            })
            .unwrap();
        widget
    }

    #[test]
    fn test_connect_reads_attributes() {
        let widget = widget();
        assert!(widget.is_connected());
        assert_eq!(widget.surface().inits, 1);
        assert_eq!(widget.field().name, "events");
        assert_eq!(widget.resource_source().len(), 1);
        assert_eq!(widget.permissions(), Permissions::new(true, false));
        assert!(widget.surface_options().editable);
    }

    #[test]
    fn test_read_only_disables_editing() {
        let mut widget = CalendarWidget::new(RecordingSurface::default(), RecordingHost::default());
        widget
            .connect(WidgetAttributes {
                options: Some(r#"{"hasChangePermission": true, "hasDeletePermission": true}"#.into()),
                read_only: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(widget.permissions(), Permissions::read_only());
        assert!(!widget.surface_options().editable);
    }

    #[test]
    fn test_event_source_transforms_records() {
        let events = widget().event_source().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].display_title.as_deref(), Some("P2"));
    }

    #[test]
    fn test_attribute_changes_trigger_refetch() {
        let mut widget = widget();
        widget.attribute_changed("value", Some("[]")).unwrap();
        widget
            .attribute_changed("instruments", Some(r#"[{"id":"i2","title":"I2"}]"#))
            .unwrap();
        widget
            .attribute_changed("options", Some(r#"{"initialView":"dayGridMonth"}"#))
            .unwrap();
        widget.attribute_changed("name", Some("slots")).unwrap();
        widget.attribute_changed("style", Some("color: red")).unwrap();

        let surface = widget.surface();
        assert_eq!(surface.event_refetches, 1);
        assert_eq!(surface.resource_refetches, 1);
        assert_eq!(surface.resets, 1);
        assert_eq!(widget.field(), &HiddenField { name: "slots".into(), value: "[]".into() });
        assert!(widget.event_source().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_attribute_keeps_previous_state() {
        let mut widget = widget();
        assert!(widget.attribute_changed("proposals", Some("[{")).is_err());
        assert_eq!(widget.proposals().len(), 2);
        assert_eq!(widget.surface().event_refetches, 0);
    }

    #[test]
    fn test_malformed_value_fails_event_source() {
        let mut widget = widget();
        widget.attribute_changed("value", Some("not json")).unwrap();
        assert!(matches!(
            widget.event_source(),
            Err(WidgetError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_disconnect_disposes_everything_once() {
        let mut widget = widget();
        let anchor: std::rc::Rc<dyn crate::services::host::Anchor> =
            std::rc::Rc::new(crate::services::tooltip::tests::FixedAnchor(Rect::new(
                0.0, 0.0, 10.0, 10.0,
            )));
        let event = widget.event_source().unwrap().remove(0);
        widget.on_event_mounted(&anchor, EventInstance::from_view_model("inst-1", &event), false);
        assert_eq!(widget.registry().len(), 1);

        widget.disconnect();
        widget.disconnect();
        assert!(widget.surface().destroyed);
        assert!(widget.registry().is_empty());
        assert!(!widget.is_connected());
    }
}
