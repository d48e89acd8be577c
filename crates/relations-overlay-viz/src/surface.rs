//! Retained drawing surface painted into an egui viewport.
//!
//! Children are kept in surface coordinates. The surface sits over a
//! scrolling viewport: its vertical origin is the top of the scrolled
//! content and its horizontal origin is `x_origin` screen pixels from the
//! left, matching the anchor calibration.

use egui::{Pos2, Rect};
use relations_overlay_core::{DrawingSurface, Point, SurfaceMetrics};

/// Identifier of one child shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(u64);

/// A child node of the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceShape {
    Handle { center: Point, radius: f32, end: bool },
    Path { points: Vec<Point> },
}

#[derive(Debug)]
pub struct PainterSurface {
    children: Vec<(ShapeId, SurfaceShape)>,
    next_id: u64,
    visible: bool,
    viewport: Rect,
    scroll_top: f32,
    x_origin: f32,
}

impl PainterSurface {
    pub fn new(x_origin: f32) -> Self {
        Self {
            children: Vec::new(),
            next_id: 0,
            visible: false,
            viewport: Rect::NOTHING,
            scroll_top: 0.0,
            x_origin,
        }
    }

    /// Update where the surface is on screen. Call once per frame after layout.
    pub fn set_placement(&mut self, viewport: Rect, scroll_top: f32) {
        self.viewport = viewport;
        self.scroll_top = scroll_top;
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn to_screen(&self, point: Point) -> Pos2 {
        Pos2::new(
            point.x + self.x_origin,
            self.viewport.top() + point.y - self.scroll_top,
        )
    }

    pub fn to_surface(&self, pos: Pos2) -> Point {
        Point::new(
            pos.x - self.x_origin,
            pos.y - self.viewport.top() + self.scroll_top,
        )
    }

    pub fn add(&mut self, shape: SurfaceShape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.children.push((id, shape));
        id
    }

    /// Replace a child in place. Unknown ids are ignored.
    pub fn replace(&mut self, id: ShapeId, shape: SurfaceShape) {
        if let Some((_, slot)) = self.children.iter_mut().find(|(child, _)| *child == id) {
            *slot = shape;
        }
    }

    pub fn remove(&mut self, id: ShapeId) {
        self.children.retain(|(child, _)| *child != id);
    }

    pub fn shapes(&self) -> impl Iterator<Item = &SurfaceShape> {
        self.children.iter().map(|(_, shape)| shape)
    }
}

impl DrawingSurface for PainterSurface {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn clear(&mut self) {
        self.children.clear();
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn metrics(&self) -> SurfaceMetrics {
        SurfaceMetrics {
            top_offset: self.viewport.top(),
            scroll_top: self.scroll_top,
        }
    }
}
