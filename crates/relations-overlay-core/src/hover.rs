//! Tracks whether the pointer sits over a candidate target region.

use crate::collaborators::TargetId;

/// Hover flag plus a non-owning reference (by id) to the hovered region.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverDetector {
    target: Option<TargetId>,
    is_over: bool,
}

impl HoverDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, target: TargetId) {
        self.target = Some(target);
        self.is_over = true;
    }

    /// Any leave clears the hover, even one for a region other than the
    /// last one entered.
    pub fn leave(&mut self) {
        self.target = None;
        self.is_over = false;
    }

    pub fn clear(&mut self) {
        self.leave();
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }
}
