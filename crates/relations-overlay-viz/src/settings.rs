//! Settings structures for the overlay UI.

use serde::{Deserialize, Serialize};

/// Geometry of a drawn connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
    /// How far above the higher of the two anchors the connecting line runs.
    pub line_offset: f32,
    /// Radius of the rounded corners where the line turns.
    pub corner_radius: f32,
    /// Radius of the start and end handles.
    pub handle_radius: f32,
    /// Stroke width of the line.
    pub stroke_width: f32,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            line_offset: 10.0,
            corner_radius: 4.0,
            handle_radius: 4.0,
            stroke_width: 1.5,
        }
    }
}

/// Visual style toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsStyle {
    pub connection: ConnectionStyle,
    /// Outline the annotation under the pointer while the overlay is enabled.
    pub highlight_hovered: bool,
    /// Show the list of created relations in the side panel.
    pub show_relations_panel: bool,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            connection: ConnectionStyle::default(),
            highlight_hovered: true,
            show_relations_panel: true,
        }
    }
}
