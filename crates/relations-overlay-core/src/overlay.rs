//! The relations overlay component.
//!
//! Owns every piece of mutable interaction state (enabled flag, pointer
//! buffer, hover flag, session, pending frame) and is driven entirely by the
//! host: public operations, [`RelationsOverlay::dispatch`] for input events
//! and [`RelationsOverlay::on_frame`] for due frames. All calls happen on one
//! cooperative thread, so no locking is involved.

use tracing::{debug, trace};

use crate::anchor::{selection_anchor, target_anchor};
use crate::collaborators::{ConnectionFactory, DrawingSurface, Selection, TargetId, TargetRegion};
use crate::config::OverlayConfig;
use crate::events::{EventSource, OverlayEvent};
use crate::geometry::Point;
use crate::hover::HoverDetector;
use crate::lifecycle::{LifecycleController, OverlayState};
use crate::pointer::PointerTracker;
use crate::render_loop::{RenderLoop, RenderState, TickAction};
use crate::schedule::{FrameHandle, FrameScheduler};
use crate::session::ConnectionSession;

/// Interactive overlay for dragging a relation from a selection to a target.
pub struct RelationsOverlay<S, E, F, K>
where
    S: DrawingSurface,
    E: EventSource,
    F: ConnectionFactory<S>,
    K: FrameScheduler,
{
    config: OverlayConfig,
    surface: S,
    events: E,
    factory: F,
    scheduler: K,
    lifecycle: LifecycleController,
    pointer: PointerTracker,
    hover: HoverDetector,
    session: Option<ConnectionSession<F::Connection>>,
    render_loop: RenderLoop,
}

impl<S, E, F, K> RelationsOverlay<S, E, F, K>
where
    S: DrawingSurface,
    E: EventSource,
    F: ConnectionFactory<S>,
    K: FrameScheduler,
{
    /// Build a disabled overlay over a content event source and a drawing surface.
    pub fn new(surface: S, events: E, factory: F, scheduler: K) -> Self {
        Self::with_config(surface, events, factory, scheduler, OverlayConfig::default())
    }

    pub fn with_config(
        surface: S,
        events: E,
        factory: F,
        scheduler: K,
        config: OverlayConfig,
    ) -> Self {
        Self {
            config,
            surface,
            events,
            factory,
            scheduler,
            lifecycle: LifecycleController::new(),
            pointer: PointerTracker::new(),
            hover: HoverDetector::new(),
            session: None,
            render_loop: RenderLoop::new(),
        }
    }

    // =========================================================================
    // Public operations
    // =========================================================================

    /// Enable the overlay: attach listeners (once) and reveal the surface.
    pub fn show(&mut self) {
        self.lifecycle.show(&mut self.events, &mut self.surface);
        debug!("Relations overlay shown");
    }

    /// Disable the overlay. Ends any active session, then empties, detaches
    /// and hides the surface.
    pub fn hide(&mut self) {
        self.end_session();
        self.hover.clear();
        self.lifecycle.hide(&mut self.events, &mut self.surface);
        debug!("Relations overlay hidden");
    }

    pub fn is_enabled(&self) -> bool {
        self.lifecycle.is_enabled()
    }

    /// Start a new session anchored at `selection`. `None` is a no-op.
    ///
    /// Any active session is torn down first, so at most one connection is
    /// ever on the surface.
    pub fn select(&mut self, selection: Option<&dyn Selection>) {
        let Some(selection) = selection else {
            return;
        };

        if self.session.is_some() {
            debug!("Replacing active session");
            self.end_session();
        }

        let bounds = selection.bounds();
        let start = selection_anchor(selection, self.surface.metrics(), &self.config.anchor);
        let connection = self.factory.construct(&mut self.surface, selection, start);
        self.session = Some(ConnectionSession::new(bounds, start, connection));
        debug!(x = start.x, y = start.y, "Session started");

        self.tick();
    }

    /// End the active session without hiding the overlay.
    pub fn cancel(&mut self) {
        if self.session.is_some() {
            debug!("Session cancelled");
            self.end_session();
        }
    }

    // =========================================================================
    // Host callbacks
    // =========================================================================

    /// Deliver an input event. Events without an attached listener are
    /// dropped, which covers late delivery after `hide()`.
    pub fn dispatch(&mut self, event: OverlayEvent<'_>) {
        if !self.lifecycle.is_listening(event.kind()) {
            trace!(?event, "No listener attached, event dropped");
            return;
        }

        match event {
            OverlayEvent::PointerMove(position) => self.pointer.record(position),
            OverlayEvent::HoverEnter(target) => self.on_hover_enter(target),
            OverlayEvent::HoverLeave(target) => self.on_hover_leave(target),
        }
    }

    /// Run the render-loop tick for a due frame. Handles that are not the
    /// currently pending frame are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if !self.render_loop.take_due(handle) {
            trace!(?handle, "Stale frame ignored");
            return;
        }
        self.tick();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> OverlayState {
        self.lifecycle.state()
    }

    pub fn render_state(&self) -> RenderState {
        if self.session.is_some() {
            RenderState::Active
        } else {
            RenderState::Idle
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer.position()
    }

    pub fn hovered_target(&self) -> Option<TargetId> {
        self.hover.target()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ConnectionSession<F::Connection>> {
        self.session.as_ref()
    }

    /// Handle of the frame the render loop is waiting for.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.render_loop.scheduled()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn scheduler_mut(&mut self) -> &mut K {
        &mut self.scheduler
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn on_hover_enter(&mut self, target: &dyn TargetRegion) {
        if !target.is_relation_target() {
            trace!(region = ?target.id(), "Not a relation target");
            return;
        }
        self.hover.enter(target.id());
        if self.config.snap_to_targets {
            let end = target_anchor(target, self.surface.metrics(), &self.config.anchor);
            self.apply_endpoint(end);
        }
    }

    fn on_hover_leave(&mut self, target: &dyn TargetRegion) {
        if !target.is_relation_target() {
            trace!(region = ?target.id(), "Not a relation target");
            return;
        }
        self.hover.leave();
    }

    /// Move the active session's endpoint. Without a session nothing happens.
    fn apply_endpoint(&mut self, end: Point) {
        if let Some(session) = self.session.as_mut() {
            session.update_endpoint(&mut self.surface, end);
        }
    }

    fn tick(&mut self) {
        if self.session.is_none() {
            return;
        }

        let snapped = self.config.snap_to_targets && self.hover.is_over();
        match TickAction::decide(snapped, self.pointer.position()) {
            TickAction::FollowPointer(position) => self.apply_endpoint(position),
            action => trace!(?action, "Endpoint unchanged"),
        }

        self.render_loop.schedule(&mut self.scheduler);
    }

    fn end_session(&mut self) {
        self.render_loop.stop(&mut self.scheduler);
        if let Some(session) = self.session.take() {
            session.teardown(&mut self.surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bounds, SurfaceMetrics};
    use crate::test_fixtures::{
        ManualScheduler, RecordingEvents, RecordingFactory, RecordingSurface, TestTarget,
    };

    type TestOverlay =
        RelationsOverlay<RecordingSurface, RecordingEvents, RecordingFactory, ManualScheduler>;

    fn overlay() -> TestOverlay {
        RelationsOverlay::new(
            RecordingSurface::default(),
            RecordingEvents::default(),
            RecordingFactory::default(),
            ManualScheduler::default(),
        )
    }

    fn fire_next_frame(overlay: &mut TestOverlay) {
        let handle = overlay
            .scheduler_mut()
            .next_due()
            .expect("a frame should be pending");
        overlay.on_frame(handle);
    }

    fn refreshed(overlay: &TestOverlay) -> Vec<Point> {
        overlay
            .session()
            .map(|s| s.connection().refreshed.clone())
            .unwrap_or_default()
    }

    const SELECTION: Bounds = Bounds::new(100.0, 50.0, 40.0, 20.0);

    #[test]
    fn show_and_hide_toggle_enabled() {
        let mut overlay = overlay();
        assert!(!overlay.is_enabled());
        overlay.show();
        assert!(overlay.is_enabled());
        assert!(overlay.surface().visible);
        overlay.hide();
        assert!(!overlay.is_enabled());
        assert!(!overlay.surface().visible);
    }

    #[test]
    fn select_none_is_a_noop() {
        let mut overlay = overlay();
        overlay.show();
        overlay.select(None);
        assert!(!overlay.has_session());
        assert_eq!(overlay.render_state(), RenderState::Idle);
        assert_eq!(overlay.pending_frame(), None);
    }

    #[test]
    fn select_anchors_connection_and_schedules_a_frame() {
        let mut overlay = overlay();
        overlay.surface_mut().metrics = SurfaceMetrics {
            top_offset: 10.0,
            scroll_top: 0.0,
        };
        overlay.show();
        overlay.select(Some(&SELECTION));

        let session = overlay.session().unwrap();
        assert_eq!(session.start_anchor(), Point::new(-79.5, 40.0));
        assert_eq!(session.connection().start, Point::new(-79.5, 40.0));
        assert_eq!(overlay.render_state(), RenderState::Active);
        assert!(overlay.pending_frame().is_some());
    }

    #[test]
    fn tick_before_any_pointer_movement_does_not_refresh() {
        let mut overlay = overlay();
        overlay.show();
        overlay.select(Some(&SELECTION));
        fire_next_frame(&mut overlay);

        assert!(refreshed(&overlay).is_empty());
        assert!(overlay.pending_frame().is_some());
    }

    #[test]
    fn ticks_follow_the_pointer() {
        let mut overlay = overlay();
        overlay.show();
        overlay.select(Some(&SELECTION));

        overlay.dispatch(OverlayEvent::PointerMove(Point::new(30.0, 40.0)));
        fire_next_frame(&mut overlay);

        assert_eq!(refreshed(&overlay), vec![Point::new(30.0, 40.0)]);
    }

    #[test]
    fn pointer_moves_alone_never_refresh() {
        let mut overlay = overlay();
        overlay.show();
        overlay.select(Some(&SELECTION));

        overlay.dispatch(OverlayEvent::PointerMove(Point::new(1.0, 1.0)));
        overlay.dispatch(OverlayEvent::PointerMove(Point::new(2.0, 2.0)));

        assert!(refreshed(&overlay).is_empty());
        assert_eq!(overlay.pointer(), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn non_candidate_regions_are_ignored() {
        let mut overlay = overlay();
        overlay.show();
        overlay.select(Some(&SELECTION));

        let plain = TestTarget::plain(9, Bounds::new(0.0, 0.0, 10.0, 10.0));
        overlay.dispatch(OverlayEvent::HoverEnter(&plain));

        assert_eq!(overlay.hovered_target(), None);
        assert!(refreshed(&overlay).is_empty());
    }

    #[test]
    fn hover_without_session_is_harmless() {
        let mut overlay = overlay();
        overlay.show();

        let target = TestTarget::annotation(1, Bounds::new(0.0, 0.0, 10.0, 10.0));
        overlay.dispatch(OverlayEvent::HoverEnter(&target));

        assert_eq!(overlay.hovered_target(), Some(TargetId(1)));
        assert!(!overlay.has_session());
        assert_eq!(overlay.pending_frame(), None);
    }

    #[test]
    fn events_before_show_are_dropped() {
        let mut overlay = overlay();
        overlay.dispatch(OverlayEvent::PointerMove(Point::new(5.0, 5.0)));
        assert_eq!(overlay.pointer(), None);
    }

    #[test]
    fn hide_ends_the_session_and_cancels_the_frame() {
        let mut overlay = overlay();
        overlay.show();
        overlay.select(Some(&SELECTION));
        let pending = overlay.pending_frame().unwrap();

        overlay.hide();

        assert!(!overlay.has_session());
        assert_eq!(overlay.pending_frame(), None);
        assert_eq!(overlay.surface().children, 0);

        // A late callback for the cancelled frame does nothing.
        overlay.on_frame(pending);
        assert_eq!(overlay.pending_frame(), None);
    }

    #[test]
    fn cancel_keeps_overlay_enabled() {
        let mut overlay = overlay();
        overlay.show();
        overlay.select(Some(&SELECTION));
        overlay.cancel();

        assert!(overlay.is_enabled());
        assert!(!overlay.has_session());
        assert_eq!(overlay.surface().children, 0);
        assert!(overlay.scheduler_mut().pending.is_empty());
    }

    #[test]
    fn snapping_can_be_disabled() {
        let config = OverlayConfig {
            snap_to_targets: false,
            ..Default::default()
        };
        let mut overlay = RelationsOverlay::with_config(
            RecordingSurface::default(),
            RecordingEvents::default(),
            RecordingFactory::default(),
            ManualScheduler::default(),
            config,
        );
        overlay.show();
        overlay.select(Some(&SELECTION));

        let target = TestTarget::annotation(1, Bounds::new(300.0, 100.0, 50.0, 10.0));
        overlay.dispatch(OverlayEvent::PointerMove(Point::new(7.0, 8.0)));
        overlay.dispatch(OverlayEvent::HoverEnter(&target));
        fire_next_frame(&mut overlay);

        assert_eq!(refreshed(&overlay), vec![Point::new(7.0, 8.0)]);
    }
}
