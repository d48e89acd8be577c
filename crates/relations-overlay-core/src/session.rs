//! One in-progress connection, from `select()` until teardown.

use tracing::debug;

use crate::collaborators::{Connection, DrawingSurface};
use crate::geometry::{Bounds, Point};

/// The single active connection and the anchor it started from.
#[derive(Debug)]
pub struct ConnectionSession<C> {
    start_bounds: Bounds,
    start_anchor: Point,
    connection: C,
    endpoint: Option<Point>,
    refreshes: u64,
}

impl<C> ConnectionSession<C> {
    pub fn new(start_bounds: Bounds, start_anchor: Point, connection: C) -> Self {
        Self {
            start_bounds,
            start_anchor,
            connection,
            endpoint: None,
            refreshes: 0,
        }
    }

    /// Bounds of the selection the session started from, as sampled at `select()`.
    pub fn start_bounds(&self) -> Bounds {
        self.start_bounds
    }

    pub fn start_anchor(&self) -> Point {
        self.start_anchor
    }

    /// Last endpoint applied to the connection, if any.
    pub fn endpoint(&self) -> Option<Point> {
        self.endpoint
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Apply a new endpoint through the connection's refresh operation.
    pub fn update_endpoint<S>(&mut self, surface: &mut S, end: Point)
    where
        S: DrawingSurface,
        C: Connection<S>,
    {
        self.connection.refresh(surface, end);
        self.endpoint = Some(end);
        self.refreshes += 1;
    }

    /// Remove the connection from the surface and drop the session.
    pub fn teardown<S>(mut self, surface: &mut S)
    where
        S: DrawingSurface,
        C: Connection<S>,
    {
        self.connection.remove(surface);
        debug!(refreshes = self.refreshes, "Session torn down");
    }
}
