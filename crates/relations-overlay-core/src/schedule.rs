//! Per-frame scheduling.

use serde::{Deserialize, Serialize};

/// Token for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

/// Host-side frame scheduler (an animation-frame queue, a repaint request, ...).
///
/// When a requested frame comes due, the host calls
/// [`RelationsOverlay::on_frame`](crate::RelationsOverlay::on_frame) with its handle.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending frame. Cancelling a frame that already ran is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}
