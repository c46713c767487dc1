// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for candidate lookup over cell footprints.

use cardgrid_view::{CellRect, CellSpan};
use kurbo::Point;

/// Cells covered by one entity: its anchor plus span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Top-left occupied cell.
    pub anchor: Point,
    /// Cells covered along each axis.
    pub span: CellSpan,
}

impl Footprint {
    /// Creates a footprint.
    #[must_use]
    pub fn new(anchor: Point, span: CellSpan) -> Self {
        Self { anchor, span }
    }

    /// Closed-interval overlap test against a render window.
    #[must_use]
    pub fn intersects(&self, window: &CellRect) -> bool {
        window.intersects(self.anchor, self.span)
    }
}

/// Spatial backend abstraction used by [`crate::VirtualGrid`].
///
/// Slots are dense indices owned by the grid. A backend may report extra
/// candidates, but [`CellBackend::visit_window`] must only report slots whose
/// footprint overlaps the window, each at most once.
pub trait CellBackend {
    /// Insert a new slot.
    fn insert(&mut self, slot: usize, footprint: Footprint);

    /// Update an existing slot's footprint.
    fn update(&mut self, slot: usize, footprint: Footprint);

    /// Remove a slot.
    fn remove(&mut self, slot: usize);

    /// Clear all slots.
    fn clear(&mut self);

    /// Visit slots whose footprint overlaps the window.
    ///
    /// Visiting order is unspecified.
    fn visit_window<F: FnMut(usize)>(&self, window: &CellRect, f: F);
}
