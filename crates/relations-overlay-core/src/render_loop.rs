//! Self-rescheduling per-frame refresh of the session's endpoint.
//!
//! ```text
//! Idle --select(Some)--> Active --hide / cancel / select(Some)--> Idle | Active
//! ```
//!
//! While Active every due frame runs one tick and requests the next one.
//! The pending frame handle is held explicitly and cancelled when the
//! session ends, so a stale callback can never drive a torn-down session.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::Point;
use crate::schedule::{FrameHandle, FrameScheduler};

/// Render-loop state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderState {
    /// No session.
    Idle,
    /// A session exists and frames keep being scheduled.
    Active,
}

/// What a tick does with the connection's endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickAction {
    /// Move the endpoint to the pointer.
    FollowPointer(Point),
    /// Keep the endpoint where the last hover-enter snapped it.
    HoldSnapped,
    /// No pointer position recorded yet; nothing to follow.
    AwaitPointer,
}

impl TickAction {
    pub fn decide(snapped: bool, pointer: Option<Point>) -> Self {
        if snapped {
            return TickAction::HoldSnapped;
        }
        match pointer {
            Some(point) => TickAction::FollowPointer(point),
            None => TickAction::AwaitPointer,
        }
    }
}

/// Holds the handle of the one pending frame, if any.
#[derive(Debug, Default)]
pub struct RenderLoop {
    scheduled: Option<FrameHandle>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame, cancelling any frame still pending.
    pub fn schedule<K: FrameScheduler>(&mut self, scheduler: &mut K) {
        if let Some(previous) = self.scheduled.take() {
            scheduler.cancel_frame(previous);
        }
        let handle = scheduler.request_frame();
        trace!(?handle, "Scheduled frame");
        self.scheduled = Some(handle);
    }

    /// Consume `handle` if it is the pending frame. Returns false for stale
    /// or cancelled handles.
    pub fn take_due(&mut self, handle: FrameHandle) -> bool {
        if self.scheduled == Some(handle) {
            self.scheduled = None;
            true
        } else {
            false
        }
    }

    /// Cancel the pending frame, if any.
    pub fn stop<K: FrameScheduler>(&mut self, scheduler: &mut K) {
        if let Some(handle) = self.scheduled.take() {
            scheduler.cancel_frame(handle);
            trace!(?handle, "Cancelled frame");
        }
    }

    pub fn scheduled(&self) -> Option<FrameHandle> {
        self.scheduled
    }
}
