//! Main application state and rendering logic.

use eframe::{App, CreationContext};
use egui::{Context, Pos2, Rect, RichText};
use relations_overlay_core::{
    ListenerKind, OverlayConfig, OverlayEvent, RelationsOverlay, TargetId,
};
use tracing::{debug, info};

use crate::connection::ElbowConnectionFactory;
use crate::document::{create_sample_document, AnnotatedDocument, Relation, Segment};
use crate::input::{span_at, EguiEventSource, HoverChange, SpanRegion};
use crate::scheduler::EguiFrameScheduler;
use crate::settings::SettingsStyle;
use crate::surface::PainterSurface;
use crate::ui::{draw_mode_indicator, draw_span_highlight, draw_surface};

type Overlay =
    RelationsOverlay<PainterSurface, EguiEventSource, ElbowConnectionFactory, EguiFrameScheduler>;

/// What one frame of layout and input produced for the text view.
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// Pointer position in screen coordinates.
    pub pointer: Option<Pos2>,
    /// Annotation spans laid out this frame.
    pub spans: Vec<SpanRegion>,
    /// Span clicked this frame.
    pub clicked: Option<SpanRegion>,
    /// Visible rect of the scroll area.
    pub viewport: Rect,
    /// Vertical scroll offset of the scroll area.
    pub scroll_top: f32,
}

/// Interaction state of the text view, independent of the eframe shell.
pub struct RelationsView {
    overlay: Overlay,
    relations: Vec<Relation>,
    hovered: Option<SpanRegion>,
    last_pointer: Option<Pos2>,
    drag_from: Option<TargetId>,
}

impl RelationsView {
    pub fn new(config: OverlayConfig, style: &SettingsStyle, scheduler: EguiFrameScheduler) -> Self {
        let surface = PainterSurface::new(config.anchor.x_calibration);
        let factory = ElbowConnectionFactory::new(style.connection);
        Self {
            overlay: RelationsOverlay::with_config(
                surface,
                EguiEventSource::new(),
                factory,
                scheduler,
                config,
            ),
            relations: Vec::new(),
            hovered: None,
            last_pointer: None,
            drag_from: None,
        }
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn clear_relations(&mut self) {
        self.relations.clear();
    }

    pub fn hovered(&self) -> Option<SpanRegion> {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.overlay.has_session()
    }

    pub fn toggle(&mut self) {
        if self.overlay.is_enabled() {
            self.overlay.hide();
            self.drag_from = None;
        } else {
            self.overlay.show();
            // input seen while disabled was never dispatched
            self.last_pointer = None;
            self.hovered = None;
        }
        debug!(enabled = self.overlay.is_enabled(), "Toggled relation mode");
    }

    pub fn cancel_drag(&mut self) {
        self.overlay.cancel();
        self.drag_from = None;
    }

    /// Hand every due frame to the overlay.
    pub fn run_due_frames(&mut self) {
        for handle in self.overlay.scheduler_mut().take_due() {
            self.overlay.on_frame(handle);
        }
    }

    /// Translate one frame of input into overlay events.
    pub fn handle_input(&mut self, input: &FrameInput) {
        self.overlay
            .surface_mut()
            .set_placement(input.viewport, input.scroll_top);

        let inside = input.pointer.filter(|pos| input.viewport.contains(*pos));

        if let Some(pos) = inside {
            if self.last_pointer != Some(pos)
                && self.overlay.events().is_attached(ListenerKind::PointerMove)
            {
                let point = self.overlay.surface().to_surface(pos);
                self.overlay.dispatch(OverlayEvent::PointerMove(point));
            }
        }
        self.last_pointer = inside;

        let current = inside.and_then(|pos| span_at(&input.spans, pos));
        match HoverChange::between(self.hovered, current) {
            HoverChange::Unchanged => {}
            HoverChange::Left(from) => self.overlay.dispatch(OverlayEvent::HoverLeave(&from)),
            HoverChange::Entered(to) => self.overlay.dispatch(OverlayEvent::HoverEnter(&to)),
            HoverChange::Moved { from, to } => {
                self.overlay.dispatch(OverlayEvent::HoverLeave(&from));
                self.overlay.dispatch(OverlayEvent::HoverEnter(&to));
            }
        }
        self.hovered = current;

        if let Some(span) = input.clicked {
            self.on_span_clicked(span);
        }
    }

    fn on_span_clicked(&mut self, span: SpanRegion) {
        if !self.overlay.is_enabled() {
            return;
        }
        match self.drag_from {
            Some(from) if self.overlay.has_session() && from != span.id => {
                let relation = Relation { from, to: span.id };
                info!(from = from.0, to = span.id.0, "Relation created");
                self.relations.push(relation);
                self.cancel_drag();
            }
            _ => {
                self.overlay.select(Some(&span.bounds()));
                self.drag_from = Some(span.id);
            }
        }
    }
}

/// The main relations application.
pub struct RelationsApp {
    view: RelationsView,
    document: AnnotatedDocument,
    settings_style: SettingsStyle,
    dark_mode: bool,
}

impl RelationsApp {
    /// Create a new app with the sample document and default settings.
    pub fn new(cc: &CreationContext<'_>) -> Self {
        Self::with_settings(cc, OverlayConfig::default(), SettingsStyle::default())
    }

    pub fn with_settings(
        cc: &CreationContext<'_>,
        config: OverlayConfig,
        settings_style: SettingsStyle,
    ) -> Self {
        let scheduler = EguiFrameScheduler::new(cc.egui_ctx.clone());
        Self {
            view: RelationsView::new(config, &settings_style, scheduler),
            document: Self::load_or_sample(),
            settings_style,
            dark_mode: cc.egui_ctx.style().visuals.dark_mode,
        }
    }

    /// Load the document embedded in the page, or fall back to the sample.
    fn load_or_sample() -> AnnotatedDocument {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(document) = Self::try_load_from_window() {
                return document;
            }
        }
        create_sample_document()
    }

    #[cfg(target_arch = "wasm32")]
    fn try_load_from_window() -> Option<AnnotatedDocument> {
        let window = web_sys::window()?;
        let data = js_sys::Reflect::get(&window, &"RELATIONS_DOCUMENT".into()).ok()?;
        let json_str = data.as_string()?;
        serde_json::from_str(&json_str).ok()
    }

    pub fn set_document(&mut self, document: AnnotatedDocument) {
        self.document = document;
        self.view.clear_relations();
    }

    /// Start with relation mode switched on.
    pub fn enable_relation_mode(&mut self) {
        if !self.view.overlay().is_enabled() {
            self.view.toggle();
        }
    }

    fn annotation_fill(&self) -> egui::Color32 {
        if self.dark_mode {
            egui::Color32::from_rgba_unmultiplied(255, 200, 50, 60)
        } else {
            egui::Color32::from_rgba_unmultiplied(255, 200, 50, 110)
        }
    }

    /// Lay out the document and collect the annotation spans.
    fn show_document(&self, ui: &mut egui::Ui) -> (Vec<SpanRegion>, Option<SpanRegion>) {
        let mut spans = Vec::new();
        let mut clicked = None;
        let fill = self.annotation_fill();

        ui.heading(&self.document.title);
        ui.add_space(8.0);

        for paragraph in &self.document.paragraphs {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for segment in paragraph {
                    match segment {
                        Segment::Text(text) => {
                            for word in text.split_inclusive(' ') {
                                ui.label(word);
                            }
                        }
                        Segment::Annotation { id, text, .. } => {
                            let label = egui::Label::new(RichText::new(text).background_color(fill))
                                .wrap_mode(egui::TextWrapMode::Extend)
                                .sense(egui::Sense::click());
                            let response = ui.add(label);
                            let region = SpanRegion {
                                id: *id,
                                rect: response.rect,
                            };
                            if response.clicked() {
                                clicked = Some(region);
                            }
                            spans.push(region);
                        }
                    }
                }
            });
            ui.add_space(12.0);
        }

        (spans, clicked)
    }

    fn show_top_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("⤳")
                        .size(18.0)
                        .color(egui::Color32::from_rgb(0, 212, 255)),
                );
                ui.label(RichText::new("Relations").strong().size(14.0));
                ui.separator();

                let mut enabled = self.view.overlay().is_enabled();
                if ui.toggle_value(&mut enabled, "Draw relations").changed() {
                    self.view.toggle();
                }

                ui.separator();
                ui.label(format!("{} relations", self.view.relations().len()));
            });
        });
    }

    fn show_relations_panel(&mut self, ctx: &Context) {
        egui::SidePanel::right("relations_panel")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Relations");
                ui.separator();

                for relation in self.view.relations() {
                    ui.label(format!(
                        "{} → {}",
                        self.document.caption(relation.from),
                        self.document.caption(relation.to)
                    ));
                }
                if self.view.relations().is_empty() {
                    ui.label(RichText::new("None yet").color(egui::Color32::GRAY));
                }

                ui.add_space(8.0);
                if ui.button("Clear").clicked() {
                    self.view.clear_relations();
                }
            });
    }
}

// =============================================================================
// Main Update Loop
// =============================================================================

impl App for RelationsApp {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        self.dark_mode = ctx.style().visuals.dark_mode;
        self.view.run_due_frames();

        // Read keys first: overlay calls may request a repaint, which must
        // not happen while the input lock is held.
        let (toggle, cancel) =
            ctx.input(|i| (i.key_pressed(egui::Key::R), i.key_pressed(egui::Key::Escape)));
        if toggle {
            self.view.toggle();
        }
        if cancel {
            self.view.cancel_drag();
        }

        self.show_top_bar(ctx);
        if self.settings_style.show_relations_panel {
            self.show_relations_panel(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let output = egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.show_document(ui));
            let (spans, clicked) = output.inner;

            let input = FrameInput {
                pointer: ctx.input(|i| i.pointer.hover_pos()),
                spans,
                clicked,
                viewport: output.inner_rect,
                scroll_top: output.state.offset.y,
            };
            self.view.handle_input(&input);

            let painter = ui.painter();
            if self.settings_style.highlight_hovered && self.view.overlay().is_enabled() {
                if let Some(span) = self.view.hovered() {
                    draw_span_highlight(painter, span.rect, self.dark_mode);
                }
            }
            draw_surface(
                painter,
                self.view.overlay().surface(),
                &self.settings_style.connection,
                self.dark_mode,
            );

            draw_mode_indicator(ui, self.view.overlay().is_enabled(), self.view.is_dragging());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use relations_overlay_core::{DrawingSurface, Point};

    fn view() -> RelationsView {
        RelationsView::new(
            OverlayConfig::default(),
            &SettingsStyle::default(),
            EguiFrameScheduler::detached(),
        )
    }

    fn span(id: u64, x: f32, y: f32) -> SpanRegion {
        SpanRegion {
            id: TargetId(id),
            rect: Rect::from_min_size(pos2(x, y), egui::vec2(60.0, 16.0)),
        }
    }

    fn input(pointer: Pos2, spans: &[SpanRegion], clicked: Option<SpanRegion>) -> FrameInput {
        FrameInput {
            pointer: Some(pointer),
            spans: spans.to_vec(),
            clicked,
            viewport: Rect::from_min_max(pos2(0.0, 40.0), pos2(800.0, 600.0)),
            scroll_top: 0.0,
        }
    }

    fn endpoint(view: &RelationsView) -> Option<Point> {
        view.overlay().session().and_then(|s| s.endpoint())
    }

    #[test]
    fn clicks_are_ignored_while_disabled() {
        let mut view = view();
        let a = span(1, 300.0, 100.0);
        view.handle_input(&input(pos2(310.0, 105.0), &[a], Some(a)));
        assert!(!view.is_dragging());
    }

    #[test]
    fn drag_follows_pointer_then_snaps_to_target() {
        let mut view = view();
        view.toggle();
        let a = span(1, 300.0, 100.0);
        let b = span(2, 500.0, 200.0);
        let spans = [a, b];

        view.handle_input(&input(pos2(310.0, 105.0), &spans, Some(a)));
        assert!(view.is_dragging());

        view.handle_input(&input(pos2(400.0, 150.0), &spans, None));
        view.run_due_frames();
        assert_eq!(endpoint(&view), Some(Point::new(400.0 - 199.5, 110.0)));

        view.handle_input(&input(pos2(510.0, 205.0), &spans, None));
        // round(530) - 199.5, round(200) - 40
        assert_eq!(endpoint(&view), Some(Point::new(330.5, 160.0)));
        view.run_due_frames();
        assert_eq!(endpoint(&view), Some(Point::new(330.5, 160.0)));
    }

    #[test]
    fn second_click_creates_a_relation_and_ends_the_drag() {
        let mut view = view();
        view.toggle();
        let a = span(1, 300.0, 100.0);
        let b = span(2, 500.0, 200.0);
        let spans = [a, b];

        view.handle_input(&input(pos2(310.0, 105.0), &spans, Some(a)));
        view.handle_input(&input(pos2(510.0, 205.0), &spans, Some(b)));

        assert_eq!(
            view.relations(),
            &[Relation {
                from: TargetId(1),
                to: TargetId(2)
            }]
        );
        assert!(!view.is_dragging());
        assert_eq!(view.overlay().surface().child_count(), 0);
        assert!(view.overlay().is_enabled());
    }

    #[test]
    fn toggling_off_mid_drag_clears_the_surface() {
        let mut view = view();
        view.toggle();
        let a = span(1, 300.0, 100.0);
        view.handle_input(&input(pos2(310.0, 105.0), &[a], Some(a)));
        assert_eq!(view.overlay().surface().child_count(), 3);

        view.toggle();
        assert!(!view.is_dragging());
        assert_eq!(view.overlay().surface().child_count(), 0);
        assert!(!view.overlay().surface().is_visible());
    }

    #[test]
    fn reshowing_forwards_a_pointer_that_has_not_moved() {
        let mut view = view();
        view.toggle();
        view.toggle();

        let b = span(2, 500.0, 200.0);
        let pos = pos2(510.0, 205.0);
        view.handle_input(&input(pos, &[b], None));
        assert_eq!(view.overlay().pointer(), None);

        view.toggle();
        view.handle_input(&input(pos, &[b], None));
        let expected = view.overlay().surface().to_surface(pos);
        assert_eq!(view.overlay().pointer(), Some(expected));
        assert_eq!(view.overlay().hovered_target(), Some(TargetId(2)));
    }

    #[test]
    fn pointer_outside_viewport_is_not_forwarded() {
        let mut view = view();
        view.toggle();
        view.handle_input(&input(pos2(10.0, 5.0), &[], None));
        assert_eq!(view.overlay().pointer(), None);
    }
}
