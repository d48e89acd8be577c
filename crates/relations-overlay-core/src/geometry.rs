//! Plain 2D value types shared by the overlay and its collaborators.

use serde::{Deserialize, Serialize};

/// A point in drawing-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box, as reported by a selection or a live target region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal midpoint of the box.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Whether `point` lies inside the box (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Live placement of the drawing surface, sampled whenever an anchor is computed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceMetrics {
    /// Offset of the surface's top edge from the top of the viewport.
    pub top_offset: f32,
    /// Vertical scroll offset of the page hosting the surface.
    pub scroll_top: f32,
}
