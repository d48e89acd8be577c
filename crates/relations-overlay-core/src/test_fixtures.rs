//! In-memory collaborators for unit tests.

use crate::collaborators::{
    Capabilities, Connection, ConnectionFactory, DrawingSurface, Selection, TargetId, TargetRegion,
};
use crate::events::{EventSource, ListenerId, ListenerSpec};
use crate::geometry::{Bounds, Point, SurfaceMetrics};
use crate::schedule::{FrameHandle, FrameScheduler};

/// Surface that only counts its child nodes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub visible: bool,
    pub children: usize,
    pub metrics: SurfaceMetrics,
}

impl DrawingSurface for RecordingSurface {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn clear(&mut self) {
        self.children = 0;
    }

    fn child_count(&self) -> usize {
        self.children
    }

    fn metrics(&self) -> SurfaceMetrics {
        self.metrics
    }
}

#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub attached: Vec<(ListenerId, ListenerSpec)>,
    pub total_attach_calls: usize,
    next_id: u64,
}

impl EventSource for RecordingEvents {
    fn attach(&mut self, spec: ListenerSpec) -> ListenerId {
        self.next_id += 1;
        self.total_attach_calls += 1;
        let id = ListenerId(self.next_id);
        self.attached.push((id, spec));
        id
    }

    fn detach(&mut self, id: ListenerId) {
        self.attached.retain(|(attached, _)| *attached != id);
    }
}

/// Connection that records every endpoint it is refreshed with.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    pub start: Point,
    pub refreshed: Vec<Point>,
    pub nodes: usize,
}

impl Connection<RecordingSurface> for RecordingConnection {
    fn refresh(&mut self, _surface: &mut RecordingSurface, end: Point) {
        self.refreshed.push(end);
    }

    fn remove(&mut self, surface: &mut RecordingSurface) {
        surface.children = surface.children.saturating_sub(self.nodes);
        self.nodes = 0;
    }
}

/// Places three nodes per connection: start handle, end handle, path.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    pub constructed: usize,
}

impl ConnectionFactory<RecordingSurface> for RecordingFactory {
    type Connection = RecordingConnection;

    fn construct(
        &mut self,
        surface: &mut RecordingSurface,
        _selection: &dyn Selection,
        start: Point,
    ) -> RecordingConnection {
        self.constructed += 1;
        surface.children += 3;
        RecordingConnection {
            start,
            nodes: 3,
            ..Default::default()
        }
    }
}

/// Scheduler whose frames only run when the test fires them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub pending: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    next: u64,
}

impl ManualScheduler {
    /// Remove and return the oldest pending frame.
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|pending| *pending != handle);
        self.cancelled.push(handle);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestTarget {
    pub id: TargetId,
    pub rect: Bounds,
    pub capabilities: Capabilities,
}

impl TestTarget {
    pub fn annotation(id: u64, rect: Bounds) -> Self {
        Self {
            id: TargetId(id),
            rect,
            capabilities: Capabilities::RELATION_TARGET | Capabilities::RELATION_SOURCE,
        }
    }

    pub fn plain(id: u64, rect: Bounds) -> Self {
        Self {
            id: TargetId(id),
            rect,
            capabilities: Capabilities::NONE,
        }
    }
}

impl TargetRegion for TestTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn bounding_rect(&self) -> Bounds {
        self.rect
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}
