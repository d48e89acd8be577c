//! Typed event subscriptions over the content container.

use serde::{Deserialize, Serialize};

use crate::collaborators::TargetRegion;
use crate::geometry::Point;

/// Kind of input a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    PointerMove,
    HoverEnter,
    HoverLeave,
}

/// Which elements of the content container a listener covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerScope {
    /// The whole content surface.
    Surface,
    /// Only regions carrying the relation-target capability.
    RelationTargets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerSpec {
    pub kind: ListenerKind,
    pub scope: ListenerScope,
}

impl ListenerSpec {
    /// The three listeners the overlay keeps attached while enabled.
    pub const OVERLAY: [ListenerSpec; 3] = [
        ListenerSpec {
            kind: ListenerKind::PointerMove,
            scope: ListenerScope::Surface,
        },
        ListenerSpec {
            kind: ListenerKind::HoverEnter,
            scope: ListenerScope::RelationTargets,
        },
        ListenerSpec {
            kind: ListenerKind::HoverLeave,
            scope: ListenerScope::RelationTargets,
        },
    ];
}

/// Token returned by [`EventSource::attach`], used to detach the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Source of pointer and hover events (the content container).
pub trait EventSource {
    fn attach(&mut self, spec: ListenerSpec) -> ListenerId;
    fn detach(&mut self, id: ListenerId);
}

/// Input delivered to the overlay by the host.
#[derive(Clone, Copy)]
pub enum OverlayEvent<'a> {
    /// Pointer moved; position is relative to the content surface.
    PointerMove(Point),
    /// Pointer entered a region.
    HoverEnter(&'a dyn TargetRegion),
    /// Pointer left a region.
    HoverLeave(&'a dyn TargetRegion),
}

impl OverlayEvent<'_> {
    pub fn kind(&self) -> ListenerKind {
        match self {
            OverlayEvent::PointerMove(_) => ListenerKind::PointerMove,
            OverlayEvent::HoverEnter(_) => ListenerKind::HoverEnter,
            OverlayEvent::HoverLeave(_) => ListenerKind::HoverLeave,
        }
    }
}

impl std::fmt::Debug for OverlayEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayEvent::PointerMove(point) => f.debug_tuple("PointerMove").field(point).finish(),
            OverlayEvent::HoverEnter(target) => {
                f.debug_tuple("HoverEnter").field(&target.id()).finish()
            }
            OverlayEvent::HoverLeave(target) => {
                f.debug_tuple("HoverLeave").field(&target.id()).finish()
            }
        }
    }
}
