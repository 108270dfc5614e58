//! Tooltip registry.
//!
//! Owned by one widget; maps event-occurrence ids to their live tooltip.
//! Creating a tooltip for an id that already has one disposes the old one
//! and keeps the new one.

use super::dismissal::DismissalHub;
use super::Tooltip;
use crate::models::settings::Permissions;
use crate::models::view_model::{EventInstance, TooltipExtra};
use crate::services::host::Anchor;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct TooltipRegistry {
    tooltips: HashMap<String, Tooltip>,
}

impl TooltipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, instance_id: &str) -> Option<&Tooltip> {
        self.tooltips.get(instance_id)
    }

    pub fn get_mut(&mut self, instance_id: &str) -> Option<&mut Tooltip> {
        self.tooltips.get_mut(instance_id)
    }

    pub fn create(
        &mut self,
        hub: &mut DismissalHub,
        anchor: &Rc<dyn Anchor>,
        data: EventInstance,
        extra: TooltipExtra,
        permissions: Permissions,
    ) -> &mut Tooltip {
        let instance_id = data.instance_id.clone();
        if let Some(existing) = self.tooltips.remove(&instance_id) {
            log::warn!("Replacing existing tooltip for instance {}", instance_id);
            existing.dispose(hub);
        }

        let tooltip = Tooltip::new(anchor, data, extra, permissions);
        self.tooltips.entry(instance_id).or_insert(tooltip)
    }

    /// Dispose one tooltip. Unknown ids are a no-op.
    pub fn dispose_one(&mut self, instance_id: &str, hub: &mut DismissalHub) -> bool {
        match self.tooltips.remove(instance_id) {
            Some(tooltip) => {
                tooltip.dispose(hub);
                true
            }
            None => false,
        }
    }

    /// Dispose every tooltip, returning how many were live.
    pub fn dispose_all(&mut self, hub: &mut DismissalHub) -> usize {
        let count = self.tooltips.len();
        for (_, tooltip) in self.tooltips.drain() {
            tooltip.dispose(hub);
        }
        log::debug!("Disposed {} tooltips", count);
        count
    }

    pub fn len(&self) -> usize {
        self.tooltips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tooltips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tooltip> {
        self.tooltips.values()
    }
}
