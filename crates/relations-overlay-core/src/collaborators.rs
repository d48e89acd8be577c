//! Interfaces the overlay consumes but does not implement.
//!
//! The host application supplies a drawing surface, a connection factory and
//! the regions (selections, targets) that anchors are computed from. The
//! overlay never inspects a connection's internals and never owns a region.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point, SurfaceMetrics};

/// Destination of the overlay's visual output.
pub trait DrawingSurface {
    /// Show or hide the whole surface.
    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Remove every child node currently placed on the surface.
    fn clear(&mut self);

    /// Number of child nodes currently placed on the surface.
    fn child_count(&self) -> usize;

    /// Live placement of the surface relative to the viewport and page.
    fn metrics(&self) -> SurfaceMetrics;
}

/// A user-chosen source region with a known bounding box.
pub trait Selection {
    fn bounds(&self) -> Bounds;
}

impl Selection for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}

/// Identifier of a target region, stable for the lifetime of the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u64);

/// Capability set used to classify regions at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Self = Self(0);
    /// The region may be the end of a relation.
    pub const RELATION_TARGET: Self = Self(1);
    /// The region may be the start of a relation.
    pub const RELATION_SOURCE: Self = Self(1 << 1);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// A UI region the pointer may hover over.
pub trait TargetRegion {
    fn id(&self) -> TargetId;

    /// Current bounding rectangle, measured at the time of the call.
    fn bounding_rect(&self) -> Bounds;

    fn capabilities(&self) -> Capabilities;

    fn is_relation_target(&self) -> bool {
        self.capabilities().contains(Capabilities::RELATION_TARGET)
    }
}

/// The visual object drawn between a start anchor and a moving endpoint.
pub trait Connection<S: DrawingSurface> {
    /// Redraw the connection so that it ends at `end`.
    fn refresh(&mut self, surface: &mut S, end: Point);

    /// Take every node this connection placed on the surface off it again.
    fn remove(&mut self, surface: &mut S);
}

/// Builds connections for new sessions.
pub trait ConnectionFactory<S: DrawingSurface> {
    type Connection: Connection<S>;

    /// Construct a connection anchored at `start`, the anchor computed from
    /// `selection`.
    fn construct(
        &mut self,
        surface: &mut S,
        selection: &dyn Selection,
        start: Point,
    ) -> Self::Connection;
}
