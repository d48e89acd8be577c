//! UI components for the relations view.
//!
//! This module contains rendering functions for the drawing surface and overlays.

mod overlays;

pub use overlays::{draw_mode_indicator, draw_span_highlight, draw_surface};
