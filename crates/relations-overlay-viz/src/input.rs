//! Listener bookkeeping and event translation for the text view.
//!
//! egui has no retained listeners, so attachment is tracked here and the app
//! only translates pointer input into overlay events while the matching
//! listener is attached.

use relations_overlay_core::{
    Bounds, Capabilities, EventSource, ListenerId, ListenerKind, ListenerSpec, Point, TargetId,
    TargetRegion,
};
use tracing::trace;

#[derive(Debug, Default)]
pub struct EguiEventSource {
    listeners: Vec<(ListenerId, ListenerSpec)>,
    next: u64,
}

impl EguiEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.listeners.iter().any(|(_, spec)| spec.kind == kind)
    }
}

impl EventSource for EguiEventSource {
    fn attach(&mut self, spec: ListenerSpec) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        trace!(?id, ?spec, "Listener attached");
        self.listeners.push((id, spec));
        id
    }

    fn detach(&mut self, id: ListenerId) {
        self.listeners.retain(|(attached, _)| *attached != id);
    }
}

/// Screen-space placement of one annotation span, captured during layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanRegion {
    pub id: TargetId,
    pub rect: egui::Rect,
}

impl SpanRegion {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.rect.min.x,
            self.rect.min.y,
            self.rect.width(),
            self.rect.height(),
        )
    }
}

impl TargetRegion for SpanRegion {
    fn id(&self) -> TargetId {
        self.id
    }

    fn bounding_rect(&self) -> Bounds {
        self.bounds()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::RELATION_SOURCE | Capabilities::RELATION_TARGET
    }
}

/// Change in the hovered span between two frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverChange {
    Unchanged,
    Left(SpanRegion),
    Entered(SpanRegion),
    Moved { from: SpanRegion, to: SpanRegion },
}

impl HoverChange {
    pub fn between(previous: Option<SpanRegion>, current: Option<SpanRegion>) -> Self {
        match (previous, current) {
            (None, None) => HoverChange::Unchanged,
            (Some(from), None) => HoverChange::Left(from),
            (None, Some(to)) => HoverChange::Entered(to),
            (Some(from), Some(to)) if from.id == to.id => HoverChange::Unchanged,
            (Some(from), Some(to)) => HoverChange::Moved { from, to },
        }
    }
}

/// The span under `pos`, if any. Later spans win on overlap.
pub fn span_at(spans: &[SpanRegion], pos: egui::Pos2) -> Option<SpanRegion> {
    let point = Point::new(pos.x, pos.y);
    spans
        .iter()
        .rev()
        .find(|span| span.bounds().contains(point))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, Rect};

    fn span(id: u64, x: f32) -> SpanRegion {
        SpanRegion {
            id: TargetId(id),
            rect: Rect::from_min_max(pos2(x, 0.0), pos2(x + 10.0, 10.0)),
        }
    }

    #[test]
    fn attach_and_detach_track_kinds() {
        let mut source = EguiEventSource::new();
        let ids: Vec<_> = ListenerSpec::OVERLAY
            .iter()
            .map(|spec| source.attach(*spec))
            .collect();
        assert!(source.is_attached(ListenerKind::HoverLeave));

        for id in ids {
            source.detach(id);
        }
        assert!(!source.is_attached(ListenerKind::PointerMove));
        assert!(!source.is_attached(ListenerKind::HoverEnter));
        assert!(!source.is_attached(ListenerKind::HoverLeave));
    }

    #[test]
    fn hover_change_table() {
        let a = span(1, 0.0);
        let b = span(2, 20.0);
        assert_eq!(HoverChange::between(None, None), HoverChange::Unchanged);
        assert_eq!(HoverChange::between(Some(a), Some(a)), HoverChange::Unchanged);
        assert_eq!(HoverChange::between(None, Some(a)), HoverChange::Entered(a));
        assert_eq!(HoverChange::between(Some(a), None), HoverChange::Left(a));
        assert_eq!(
            HoverChange::between(Some(a), Some(b)),
            HoverChange::Moved { from: a, to: b }
        );
    }

    #[test]
    fn span_lookup_and_bounds() {
        let spans = [span(1, 0.0), span(2, 20.0)];
        assert_eq!(span_at(&spans, pos2(25.0, 5.0)).map(|s| s.id), Some(TargetId(2)));
        assert_eq!(span_at(&spans, pos2(15.0, 5.0)), None);
        // edges belong to the span
        assert_eq!(span_at(&spans, pos2(20.0, 10.0)).map(|s| s.id), Some(TargetId(2)));
        assert_eq!(spans[1].bounds(), Bounds::new(20.0, 0.0, 10.0, 10.0));
    }
}
