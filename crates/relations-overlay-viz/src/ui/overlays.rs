//! Overlay rendering for the connection surface and mode indicator.

use relations_overlay_core::DrawingSurface;

use crate::settings::ConnectionStyle;
use crate::surface::{PainterSurface, SurfaceShape};

fn connection_color(dark_mode: bool) -> egui::Color32 {
    if dark_mode {
        egui::Color32::from_rgb(100, 200, 255)
    } else {
        egui::Color32::from_rgb(50, 100, 200)
    }
}

/// Paint every child of the surface, clipped to its viewport.
pub fn draw_surface(
    painter: &egui::Painter,
    surface: &PainterSurface,
    style: &ConnectionStyle,
    dark_mode: bool,
) {
    if !surface.is_visible() {
        return;
    }

    let painter = painter.with_clip_rect(surface.viewport());
    let color = connection_color(dark_mode);
    let stroke = egui::Stroke::new(style.stroke_width, color);

    for shape in surface.shapes() {
        match shape {
            SurfaceShape::Path { points } if points.len() >= 2 => {
                let screen: Vec<_> = points.iter().map(|p| surface.to_screen(*p)).collect();
                painter.add(egui::Shape::line(screen, stroke));
            }
            SurfaceShape::Path { .. } => {}
            SurfaceShape::Handle {
                center,
                radius,
                end,
            } => {
                let center = surface.to_screen(*center);
                if *end {
                    painter.circle_stroke(center, *radius, stroke);
                } else {
                    painter.circle_filled(center, *radius, color);
                }
            }
        }
    }
}

/// Outline the annotation span under the pointer.
pub fn draw_span_highlight(painter: &egui::Painter, rect: egui::Rect, dark_mode: bool) {
    let color = connection_color(dark_mode).linear_multiply(0.8);
    painter.rect_stroke(
        rect.expand(2.0),
        3.0,
        egui::Stroke::new(1.0, color),
        egui::StrokeKind::Outside,
    );
}

/// Draw the relation mode indicator in the top-left corner.
pub fn draw_mode_indicator(ui: &mut egui::Ui, enabled: bool, dragging: bool) {
    if !enabled {
        return;
    }

    let rect = ui.max_rect();
    let indicator_pos = egui::pos2(rect.left() + 10.0, rect.top() + 10.0);
    let hint = if dragging {
        "  click a target · ESC to cancel"
    } else {
        "  click an annotation · R to exit"
    };

    egui::Area::new(egui::Id::new("relation_mode_indicator"))
        .order(egui::Order::Foreground)
        .fixed_pos(indicator_pos)
        .movable(false)
        .show(ui.ctx(), |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180))
                .corner_radius(4.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new("⤳ RELATION MODE")
                                .color(egui::Color32::from_rgb(100, 200, 255))
                                .strong(),
                        );
                        ui.label(
                            egui::RichText::new(hint)
                                .color(egui::Color32::GRAY)
                                .small(),
                        );
                    });
                });
        });
}
