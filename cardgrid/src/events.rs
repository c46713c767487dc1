// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Point;

/// Notifications queued by a [`Grid`](crate::Grid) for the rendering layer.
///
/// Events accumulate in the order they happen and are taken with
/// [`Grid::drain_events`](crate::Grid::drain_events). State events
/// (see [`GridEvent::is_state`]) are coalesced: a newer one replaces a queued
/// one of the same kind.
#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent<K> {
    /// The visible set changed; ids are in render order (priority descending).
    VisibleChanged(Vec<K>),
    /// The scroll position moved.
    PositionChanged(Point),
    /// Keyboard focus moved, or was cleared.
    FocusChanged(Option<K>),
    /// The focused entity was activated with Enter.
    Activate(K),
    /// Pinch scale relative to the start of the gesture.
    Zoom(f64),
}

impl<K> GridEvent<K> {
    /// Returns `true` for events that report current state rather than a
    /// discrete action: [`VisibleChanged`](Self::VisibleChanged),
    /// [`PositionChanged`](Self::PositionChanged) and [`Zoom`](Self::Zoom).
    #[must_use]
    pub fn is_state(&self) -> bool {
        matches!(
            self,
            Self::VisibleChanged(_) | Self::PositionChanged(_) | Self::Zoom(_)
        )
    }
}
