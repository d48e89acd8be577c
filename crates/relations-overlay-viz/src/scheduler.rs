//! Frame scheduling on top of egui repaints.
//!
//! Requesting a frame asks egui for a repaint; the app hands the due handles
//! back to the overlay at the start of the next `update`.

use relations_overlay_core::{FrameHandle, FrameScheduler};

pub struct EguiFrameScheduler {
    ctx: Option<egui::Context>,
    pending: Vec<FrameHandle>,
    next: u64,
}

impl EguiFrameScheduler {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx: Some(ctx),
            pending: Vec::new(),
            next: 0,
        }
    }

    /// Scheduler that never requests repaints, for headless use.
    pub fn detached() -> Self {
        Self {
            ctx: None,
            pending: Vec::new(),
            next: 0,
        }
    }

    /// Drain every frame requested before this call.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl FrameScheduler for EguiFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|pending| *pending != handle);
    }
}
