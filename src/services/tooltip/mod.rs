//! Event tooltips.
//! One popup per mounted event occurrence, anchored to the surface's
//! element for that occurrence, showing details or an inline edit form.

pub mod dismissal;
pub mod position;
pub mod registry;
pub mod render;
pub mod view_state;

use crate::models::settings::Permissions;
use crate::models::view_model::{EventInstance, TooltipExtra};
use crate::services::host::Anchor;
use dismissal::{CleanupTask, DismissalController, DismissalHub, GlobalEvent};
use position::{place, Position, Rect, Size, Viewport};
use std::rc::{Rc, Weak};
use view_state::{EditForm, Effect, TooltipAction, ViewMode};

pub use registry::TooltipRegistry;

/// Popup element owned by its tooltip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupElement {
    markup: String,
    visible: bool,
    /// Inline position; cleared after the hide transition.
    position: Option<Position>,
    size: Size,
}

impl PopupElement {
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn class_name(&self) -> String {
        if self.visible {
            format!("{} {}", render::TOOLTIP_CLASS, render::VISIBLE_CLASS)
        } else {
            render::TOOLTIP_CLASS.to_string()
        }
    }

    /// Page-space bounds while positioned.
    pub fn bounds(&self) -> Option<Rect> {
        self.position
            .map(|p| Rect::new(p.x, p.y, self.size.width, self.size.height))
    }
}

/// Live tooltip for one event occurrence.
pub struct Tooltip {
    anchor: Weak<dyn Anchor>,
    data: EventInstance,
    extra: TooltipExtra,
    permissions: Permissions,
    view: ViewMode,
    popup: PopupElement,
    dismissal: DismissalController,
    generation: u64,
    /// Viewport of a show that is waiting for the popup to be measured.
    pending_show: Option<Viewport>,
}

impl Tooltip {
    pub fn new(
        anchor: &Rc<dyn Anchor>,
        data: EventInstance,
        extra: TooltipExtra,
        permissions: Permissions,
    ) -> Self {
        let mut tooltip = Self {
            anchor: Rc::downgrade(anchor),
            data,
            extra,
            permissions,
            view: ViewMode::Info,
            popup: PopupElement::default(),
            dismissal: DismissalController::default(),
            generation: 0,
            pending_show: None,
        };
        tooltip.rerender();
        tooltip
    }

    pub fn instance_id(&self) -> &str {
        &self.data.instance_id
    }

    pub fn event_id(&self) -> &str {
        &self.data.event_id
    }

    pub fn data(&self) -> &EventInstance {
        &self.data
    }

    pub fn extra(&self) -> &TooltipExtra {
        &self.extra
    }

    pub fn view(&self) -> &ViewMode {
        &self.view
    }

    pub fn popup(&self) -> &PopupElement {
        &self.popup
    }

    pub fn is_visible(&self) -> bool {
        self.popup.visible
    }

    pub fn is_armed(&self) -> bool {
        self.dismissal.is_armed()
    }

    /// Replace event data and reference details, then re-render.
    pub fn update(&mut self, data: EventInstance, extra: TooltipExtra) {
        self.data = data;
        self.extra = extra;
        self.rerender();
    }

    /// Record a range the canonical value now holds.
    pub fn set_range(&mut self, start: impl Into<String>, end: impl Into<String>) {
        self.data.start = start.into();
        self.data.end = end.into();
        self.rerender();
    }

    fn rerender(&mut self) {
        self.popup.markup = render::render(&self.view, &self.data, &self.extra, self.permissions);
    }

    /// Show next to the anchor and arm dismissal listeners.
    ///
    /// Positioning waits for [`Tooltip::set_measured_size`] when the popup
    /// has not been laid out yet.
    pub fn show(&mut self, viewport: Viewport, hub: &mut DismissalHub) -> bool {
        if self.anchor.upgrade().is_none() {
            log::warn!("Anchor for tooltip {} is gone, not showing", self.instance_id());
            return false;
        }

        if !self.popup.visible && self.view.is_edit() {
            self.view = ViewMode::Info;
            self.rerender();
        }

        self.generation += 1;
        self.popup.visible = true;
        self.dismissal.arm(hub, &self.data.instance_id);

        if self.popup.size.is_measured() {
            self.reposition(viewport);
        } else {
            self.pending_show = Some(viewport);
        }

        log::debug!("Tooltip {} shown", self.instance_id());
        true
    }

    /// Size reported by the host once the popup has been laid out.
    pub fn set_measured_size(&mut self, size: Size) {
        self.popup.size = size;
        if let Some(viewport) = self.pending_show.take() {
            if self.popup.visible && size.is_measured() {
                self.reposition(viewport);
            } else {
                self.pending_show = Some(viewport);
            }
        }
    }

    pub fn reposition(&mut self, viewport: Viewport) {
        let Some(anchor) = self.anchor.upgrade() else {
            return;
        };
        self.popup.position = Some(place(anchor.placement_rect(), self.popup.size, viewport));
    }

    /// Hide immediately and release listeners.
    ///
    /// Returns the delayed style cleanup to schedule, if anything is left to
    /// clean up. Safe to call in any state.
    pub fn hide(&mut self, hub: &mut DismissalHub) -> Option<CleanupTask> {
        self.dismissal.disarm(hub);
        self.pending_show = None;
        let was_visible = std::mem::replace(&mut self.popup.visible, false);

        if was_visible {
            log::debug!("Tooltip {} hidden", self.instance_id());
        }

        self.popup.position.map(|_| CleanupTask {
            instance_id: self.data.instance_id.clone(),
            generation: self.generation,
        })
    }

    /// Clear inline positioning unless a later show superseded the task.
    pub fn run_cleanup(&mut self, task: &CleanupTask) -> bool {
        if task.generation != self.generation || self.popup.visible {
            return false;
        }
        self.popup.position = None;
        true
    }

    /// Apply a user action to the view state.
    pub fn handle(&mut self, action: TooltipAction) -> Effect {
        let effect = self.view.handle(action, self.permissions, &self.data);
        match effect {
            Effect::Rerender | Effect::ValidationFailed(_) | Effect::DateChange { .. } => {
                self.rerender()
            }
            Effect::Hide => self.rerender(),
            Effect::Ignored | Effect::ConfirmDelete => {}
        }
        effect
    }

    /// Put the edit form back after a save that could not be applied.
    pub fn reopen_edit(&mut self, form: EditForm) {
        self.view = ViewMode::Edit(form);
        self.rerender();
    }

    /// Whether a global event should close this tooltip.
    pub fn should_dismiss(&self, event: &GlobalEvent) -> bool {
        match *event {
            GlobalEvent::PointerDown { x, y } => !self
                .popup
                .bounds()
                .map_or(false, |bounds| bounds.contains(x, y)),
            GlobalEvent::Scroll | GlobalEvent::Resize => true,
        }
    }

    /// Release listeners and drop the popup. The anchor is left alone.
    pub fn dispose(mut self, hub: &mut DismissalHub) {
        self.dismissal.disarm(hub);
        log::debug!("Tooltip {} disposed", self.instance_id());
    }
}
