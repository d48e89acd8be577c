//! Elbow-shaped connection drawn onto a [`PainterSurface`].
//!
//! The line rises from the start handle to a horizontal run `line_offset`
//! above the higher anchor, turns with rounded corners, and drops to the end
//! handle.

use std::f32::consts::FRAC_PI_2;

use relations_overlay_core::{Connection, ConnectionFactory, Point, Selection};
use tracing::trace;

use crate::settings::ConnectionStyle;
use crate::surface::{PainterSurface, ShapeId, SurfaceShape};

const ARC_SEGMENTS: usize = 4;

/// Polyline from `start` to `end` along the elbow route.
pub fn elbow_path(start: Point, end: Point, style: &ConnectionStyle) -> Vec<Point> {
    let top = start.y.min(end.y) - style.line_offset;
    let dx = end.x - start.x;

    if dx == 0.0 {
        return vec![start, Point::new(start.x, top), end];
    }

    let dir = dx.signum();
    let r = style
        .corner_radius
        .min(dx.abs() / 2.0)
        .min(style.line_offset)
        .max(0.0);

    let mut points = Vec::with_capacity(2 * (ARC_SEGMENTS + 1) + 2);
    points.push(start);

    let first = Point::new(start.x + dir * r, top + r);
    for i in 0..=ARC_SEGMENTS {
        let t = i as f32 / ARC_SEGMENTS as f32 * FRAC_PI_2;
        points.push(Point::new(first.x - dir * r * t.cos(), first.y - r * t.sin()));
    }

    let second = Point::new(end.x - dir * r, top + r);
    for i in 0..=ARC_SEGMENTS {
        let t = i as f32 / ARC_SEGMENTS as f32 * FRAC_PI_2;
        points.push(Point::new(second.x + dir * r * t.sin(), second.y - r * t.cos()));
    }

    points.push(end);
    points
}

#[derive(Debug, Clone, Copy)]
struct ConnectionShapes {
    start: ShapeId,
    end: ShapeId,
    path: ShapeId,
}

/// One drawn connection; owns the three surface children it placed.
#[derive(Debug)]
pub struct ElbowConnection {
    start: Point,
    style: ConnectionStyle,
    shapes: Option<ConnectionShapes>,
}

impl Connection<PainterSurface> for ElbowConnection {
    fn refresh(&mut self, surface: &mut PainterSurface, end: Point) {
        let Some(shapes) = self.shapes else {
            return;
        };
        surface.replace(
            shapes.end,
            SurfaceShape::Handle {
                center: end,
                radius: self.style.handle_radius,
                end: true,
            },
        );
        surface.replace(
            shapes.path,
            SurfaceShape::Path {
                points: elbow_path(self.start, end, &self.style),
            },
        );
    }

    fn remove(&mut self, surface: &mut PainterSurface) {
        if let Some(shapes) = self.shapes.take() {
            surface.remove(shapes.start);
            surface.remove(shapes.end);
            surface.remove(shapes.path);
        }
    }
}

/// Builds [`ElbowConnection`]s with a shared style.
#[derive(Debug, Clone, Default)]
pub struct ElbowConnectionFactory {
    pub style: ConnectionStyle,
}

impl ElbowConnectionFactory {
    pub fn new(style: ConnectionStyle) -> Self {
        Self { style }
    }
}

impl ConnectionFactory<PainterSurface> for ElbowConnectionFactory {
    type Connection = ElbowConnection;

    fn construct(
        &mut self,
        surface: &mut PainterSurface,
        selection: &dyn Selection,
        start: Point,
    ) -> ElbowConnection {
        trace!(bounds = ?selection.bounds(), "Constructing connection");
        let handle = |end| SurfaceShape::Handle {
            center: start,
            radius: self.style.handle_radius,
            end,
        };
        let shapes = ConnectionShapes {
            start: surface.add(handle(false)),
            end: surface.add(handle(true)),
            path: surface.add(SurfaceShape::Path {
                points: vec![start],
            }),
        };
        ElbowConnection {
            start,
            style: self.style,
            shapes: Some(shapes),
        }
    }
}
