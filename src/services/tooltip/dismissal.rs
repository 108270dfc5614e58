//! Dismissal of visible tooltips.
//!
//! While a tooltip is shown it holds one listener set (pointer-down outside,
//! scroll, resize) registered in the widget's [`DismissalHub`]. Arming
//! returns a token; disarming releases everything tied to it.

use std::collections::BTreeMap;
use std::time::Duration;

/// Delay before inline positioning is cleared after hiding.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(100);

/// Global UI events a visible tooltip listens for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobalEvent {
    /// Pointer pressed at a page position.
    PointerDown { x: f64, y: f64 },
    Scroll,
    Resize,
}

/// Handle for one registered listener set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerToken(u64);

/// Registry of armed listener sets, keyed by token.
#[derive(Debug, Default)]
pub struct DismissalHub {
    next_token: u64,
    armed: BTreeMap<ListenerToken, String>,
}

impl DismissalHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, owner: &str) -> ListenerToken {
        self.next_token += 1;
        let token = ListenerToken(self.next_token);
        self.armed.insert(token, owner.to_string());
        token
    }

    fn release(&mut self, token: ListenerToken) -> bool {
        self.armed.remove(&token).is_some()
    }

    /// Number of listener sets currently registered.
    pub fn active_count(&self) -> usize {
        self.armed.len()
    }

    /// Number of listener sets registered for one tooltip.
    pub fn active_for(&self, owner: &str) -> usize {
        self.armed.values().filter(|o| o.as_str() == owner).count()
    }

    /// Owners to notify of a global event, in registration order.
    pub fn armed_owners(&self) -> Vec<String> {
        self.armed.values().cloned().collect()
    }
}

/// Per-tooltip handle on its listener set.
#[derive(Debug, Default)]
pub struct DismissalController {
    token: Option<ListenerToken>,
}

impl DismissalController {
    /// Register a fresh listener set, releasing any previous one first.
    pub fn arm(&mut self, hub: &mut DismissalHub, owner: &str) {
        self.disarm(hub);
        self.token = Some(hub.register(owner));
    }

    /// Release the listener set. Safe to call when not armed.
    pub fn disarm(&mut self, hub: &mut DismissalHub) {
        if let Some(token) = self.token.take() {
            hub.release(token);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.token.is_some()
    }
}

/// Delayed style cleanup for a hidden tooltip.
///
/// `generation` identifies the hide that scheduled it; a later show
/// supersedes the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupTask {
    pub instance_id: String,
    pub generation: u64,
}
