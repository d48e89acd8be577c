//! Interaction core for drawing directional relations between annotated
//! text regions.
//!
//! The user picks a start region (a [`Selection`]), then drags towards a
//! target region. While the drag is in progress a transient connection is
//! redrawn every frame so that its endpoint follows the pointer, and snaps
//! onto a candidate [`TargetRegion`] while the pointer hovers over it.
//!
//! ## Shape
//!
//! - [`RelationsOverlay`] owns all interaction state and is driven by its host.
//! - The host supplies the collaborators: a [`DrawingSurface`], an
//!   [`EventSource`] for the content container, a [`ConnectionFactory`] and a
//!   [`FrameScheduler`].
//! - Input arrives through [`RelationsOverlay::dispatch`]; due frames through
//!   [`RelationsOverlay::on_frame`].
//!
//! ```text
//! show() ──► listeners attached, surface visible
//! select(sel) ──► connection constructed at anchor(sel), frame requested
//! frame ──► endpoint = pointer (unless snapped to a hovered target), next frame requested
//! hide() ──► session ended, frame cancelled, surface emptied and hidden
//! ```

pub mod anchor;
pub mod collaborators;
pub mod config;
mod error;
pub mod events;
pub mod geometry;
mod hover;
mod lifecycle;
mod overlay;
mod pointer;
mod render_loop;
pub mod schedule;
mod session;

#[cfg(test)]
mod test_fixtures;

pub use anchor::{anchor_for_bounds, round_half_up, selection_anchor, target_anchor};
pub use collaborators::{
    Capabilities, Connection, ConnectionFactory, DrawingSurface, Selection, TargetId, TargetRegion,
};
pub use config::{AnchorConfig, OverlayConfig, DEFAULT_X_CALIBRATION};
pub use error::{OverlayError, OverlayResult};
pub use events::{EventSource, ListenerId, ListenerKind, ListenerScope, ListenerSpec, OverlayEvent};
pub use geometry::{Bounds, Point, SurfaceMetrics};
pub use hover::HoverDetector;
pub use lifecycle::{LifecycleController, OverlayState};
pub use overlay::RelationsOverlay;
pub use pointer::PointerTracker;
pub use render_loop::{RenderLoop, RenderState, TickAction};
pub use schedule::{FrameHandle, FrameScheduler};
pub use session::ConnectionSession;
