//! Enabled/disabled state, surface visibility and listener attachment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collaborators::DrawingSurface;
use crate::events::{EventSource, ListenerId, ListenerKind, ListenerSpec};

/// Snapshot of the lifecycle flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayState {
    pub enabled: bool,
    pub listeners_attached: bool,
}

/// Gates the overlay: toggles visibility and attaches/detaches all
/// listeners as one unit.
#[derive(Debug, Default)]
pub struct LifecycleController {
    enabled: bool,
    listeners: Vec<(ListenerSpec, ListenerId)>,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the overlay. Listeners are attached only if they are not
    /// attached already, so repeated calls never duplicate event delivery.
    pub fn show<E, S>(&mut self, events: &mut E, surface: &mut S)
    where
        E: EventSource,
        S: DrawingSurface,
    {
        self.enabled = true;
        if self.listeners.is_empty() {
            self.listeners = ListenerSpec::OVERLAY
                .iter()
                .map(|spec| (*spec, events.attach(*spec)))
                .collect();
            debug!(count = self.listeners.len(), "Attached overlay listeners");
        }
        surface.set_visible(true);
    }

    /// Disable the overlay, leaving the surface empty and hidden.
    pub fn hide<E, S>(&mut self, events: &mut E, surface: &mut S)
    where
        E: EventSource,
        S: DrawingSurface,
    {
        self.enabled = false;
        surface.clear();
        for (_, id) in self.listeners.drain(..) {
            events.detach(id);
        }
        surface.set_visible(false);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a listener for `kind` is currently attached.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.iter().any(|(spec, _)| spec.kind == kind)
    }

    pub fn state(&self) -> OverlayState {
        OverlayState {
            enabled: self.enabled,
            listeners_attached: !self.listeners.is_empty(),
        }
    }
}
