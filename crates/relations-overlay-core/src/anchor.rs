//! Anchor-point computation.
//!
//! Maps a region's bounding box into drawing-surface coordinates. Selections
//! use their stored bounds, targets use their live bounding rect; the formula
//! is the same for both.

use crate::collaborators::{Selection, TargetRegion};
use crate::config::AnchorConfig;
use crate::geometry::{Bounds, Point, SurfaceMetrics};

/// Round half toward positive infinity, so `-2.5` maps to `-2.0`.
///
/// `f32::round` rounds half away from zero, which would shift anchors of
/// regions left of the origin by one pixel.
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Anchor for an arbitrary bounding box.
pub fn anchor_for_bounds(bounds: Bounds, metrics: SurfaceMetrics, config: &AnchorConfig) -> Point {
    let x = round_half_up(bounds.center_x()) - config.x_calibration;
    let y = round_half_up(bounds.y) - metrics.top_offset + metrics.scroll_top;
    Point::new(x, y)
}

/// Anchor where a connection starts, from the selection's stored bounds.
pub fn selection_anchor(
    selection: &dyn Selection,
    metrics: SurfaceMetrics,
    config: &AnchorConfig,
) -> Point {
    anchor_for_bounds(selection.bounds(), metrics, config)
}

/// Anchor where a connection snaps onto a hovered target.
pub fn target_anchor(
    target: &dyn TargetRegion,
    metrics: SurfaceMetrics,
    config: &AnchorConfig,
) -> Point {
    anchor_for_bounds(target.bounding_rect(), metrics, config)
}
