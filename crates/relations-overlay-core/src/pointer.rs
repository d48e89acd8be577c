//! Latest pointer position, surface-relative.

use crate::geometry::Point;

/// Pure buffer of the most recent pointer-move event.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    position: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move. Values are taken as-is.
    pub fn record(&mut self, position: Point) {
        self.position = Some(position);
    }

    /// `None` until the first move event.
    pub fn position(&self) -> Option<Point> {
        self.position
    }
}
