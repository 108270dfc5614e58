use super::{CalendarWidget, WidgetHost};
use crate::models::event::EventRecord;
use crate::models::view_model::EventInstance;
use crate::services::host::{Anchor, CalendarSurface};
use crate::services::store::Notification;
use crate::services::tooltip::dismissal::{CleanupTask, GlobalEvent, TRANSITION_DURATION};
use crate::services::tooltip::position::{Size, Viewport};
use crate::services::tooltip::view_state::{EditForm, Effect, TooltipAction, SAVE_FAILED_MESSAGE};
use crate::utils::date::{to_input_value, to_iso, to_stored_frame};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::rc::Rc;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this event?";

impl<S: CalendarSurface, H: WidgetHost> CalendarWidget<S, H> {
    /// The surface mounted an event element. Drag previews are skipped.
    ///
    /// The tooltip keeps only a weak reference; the surface owns the anchor.
    pub fn on_event_mounted(&mut self, anchor: &Rc<dyn Anchor>, instance: EventInstance, is_mirror: bool) {
        if is_mirror {
            return;
        }

        let resource_ids = self.surface.associated_resource_ids(&instance);
        let extra = self.transformer().resolve_extra(&instance, &resource_ids);
        let permissions = self.permissions();

        log::debug!("Event {} mounted as {}", instance.event_id, instance.instance_id);
        self.registry
            .create(&mut self.hub, anchor, instance, extra, permissions);
    }

    /// The surface is about to remove an event element.
    pub fn on_event_will_unmount(&mut self, instance: &EventInstance, is_mirror: bool) {
        if is_mirror {
            return;
        }
        if !self.registry.dispose_one(&instance.instance_id, &mut self.hub) {
            log::debug!("Unmount without tooltip for {}", instance.instance_id);
        }
    }

    /// Drag or resize finished on the surface.
    pub fn on_event_changed_by_user(
        &mut self,
        instance: &EventInstance,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> Result<Option<Notification>> {
        let start = to_iso(new_start);
        let end = to_iso(new_end);
        self.change_dates(&instance.event_id, &start, &end)
    }

    /// The surface removed an event on its own.
    pub fn on_event_removed_by_user(&mut self, instance: &EventInstance) -> Result<Option<Notification>> {
        let notification = self
            .store
            .apply_delete(&instance.event_id, &mut self.surface, &mut self.host)
            .with_context(|| format!("Failed to delete event {}", instance.event_id))?;
        self.sync_field();
        self.registry.dispose_one(&instance.instance_id, &mut self.hub);
        Ok(notification)
    }

    /// Add a record to the canonical value.
    pub fn add_event(&mut self, record: EventRecord) -> Result<Notification> {
        let id = record.id.clone();
        let notification = self
            .store
            .apply_add(record, &mut self.surface, &mut self.host)
            .with_context(|| format!("Failed to add event {}", id))?;
        self.sync_field();
        Ok(notification)
    }

    /// The user clicked an event element: show its tooltip.
    pub fn on_event_click(&mut self, instance_id: &str, viewport: Viewport) -> bool {
        match self.registry.get_mut(instance_id) {
            Some(tooltip) => tooltip.show(viewport, &mut self.hub),
            None => {
                log::debug!("No tooltip for clicked instance {}", instance_id);
                false
            }
        }
    }

    /// The host laid out a tooltip popup.
    pub fn on_popup_measured(&mut self, instance_id: &str, size: Size) {
        if let Some(tooltip) = self.registry.get_mut(instance_id) {
            tooltip.set_measured_size(size);
        }
    }

    /// Route a global pointer/scroll/resize event to armed tooltips.
    ///
    /// Returns the number of tooltips hidden.
    pub fn on_global_event(&mut self, event: GlobalEvent) -> usize {
        let mut hidden = 0;
        for owner in self.hub.armed_owners() {
            let dismiss = self
                .registry
                .get(&owner)
                .map_or(false, |tooltip| tooltip.should_dismiss(&event));
            if dismiss {
                self.hide_tooltip(&owner);
                hidden += 1;
            }
        }
        hidden
    }

    /// Hide a tooltip now and schedule its style cleanup.
    pub fn hide_tooltip(&mut self, instance_id: &str) {
        let Some(tooltip) = self.registry.get_mut(instance_id) else {
            return;
        };
        if let Some(task) = tooltip.hide(&mut self.hub) {
            self.host.schedule(TRANSITION_DURATION, task);
        }
    }

    /// Delayed cleanup scheduled by [`CalendarWidget::hide_tooltip`].
    pub fn run_cleanup(&mut self, task: &CleanupTask) {
        if let Some(tooltip) = self.registry.get_mut(&task.instance_id) {
            tooltip.run_cleanup(task);
        }
    }

    /// Apply a tooltip button action.
    pub fn tooltip_action(&mut self, instance_id: &str, action: TooltipAction) -> Result<Effect> {
        let Some(tooltip) = self.registry.get_mut(instance_id) else {
            log::warn!("Tooltip action for unknown instance {}", instance_id);
            return Ok(Effect::Ignored);
        };
        let stored_start = tooltip.data().start.clone();
        let stored_end = tooltip.data().end.clone();
        let effect = tooltip.handle(action);
        let event_id = tooltip.event_id().to_string();

        match &effect {
            Effect::Hide => self.hide_tooltip(instance_id),
            Effect::DateChange { start, end } => {
                let new_start = to_stored_frame(&stored_start, *start);
                let new_end = to_stored_frame(&stored_end, *end);
                match self.change_dates(&event_id, &new_start, &new_end) {
                    Ok(Some(_)) => {
                        if let Some(tooltip) = self.registry.get_mut(instance_id) {
                            tooltip.set_range(new_start, new_end);
                        }
                    }
                    Ok(None) => {}
                    Err(err) => {
                        log::error!("Saving event {} failed: {:#}", event_id, err);
                        if let Some(tooltip) = self.registry.get_mut(instance_id) {
                            tooltip.reopen_edit(EditForm {
                                start: to_input_value(*start),
                                end: to_input_value(*end),
                                error: Some(SAVE_FAILED_MESSAGE.to_string()),
                            });
                        }
                        return Err(err);
                    }
                }
            }
            Effect::ConfirmDelete => {
                if self.host.confirm(DELETE_CONFIRMATION) {
                    self.store
                        .apply_delete(&event_id, &mut self.surface, &mut self.host)
                        .with_context(|| format!("Failed to delete event {}", event_id))?;
                    self.sync_field();
                    self.registry.dispose_one(instance_id, &mut self.hub);
                } else {
                    log::debug!("Delete of event {} cancelled", event_id);
                }
            }
            Effect::ValidationFailed(message) => {
                log::debug!("Edit of event {} rejected: {}", event_id, message);
            }
            Effect::Rerender | Effect::Ignored => {}
        }

        Ok(effect)
    }

    fn change_dates(&mut self, event_id: &str, start: &str, end: &str) -> Result<Option<Notification>> {
        let notification = self
            .store
            .apply_date_change(event_id, start, end, &mut self.surface, &mut self.host)
            .with_context(|| format!("Failed to update event {}", event_id))?;
        self.sync_field();
        Ok(notification)
    }
}
