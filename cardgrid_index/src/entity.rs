// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid entities and their render priority.

use cardgrid_view::CellSpan;
use kurbo::Point;

/// How an entity's render priority is derived.
///
/// Chosen once at construction. [`PriorityRule::Distance`] and
/// [`PriorityRule::Boosted`] are re-evaluated whenever the entity moves.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriorityRule {
    /// `max(0, 100 - distance)` from the layout origin cell.
    #[default]
    Distance,
    /// The distance rule plus a constant bonus (for example, recency).
    Boosted(f64),
    /// A constant priority that ignores position.
    Fixed(f64),
}

impl PriorityRule {
    /// Base value the distance rule falls off from.
    pub const DISTANCE_BASE: f64 = 100.0;

    /// Evaluates the rule for an entity anchored at `anchor`.
    #[must_use]
    pub fn evaluate(self, anchor: Point, origin: Point) -> f64 {
        let falloff = || (Self::DISTANCE_BASE - (anchor - origin).hypot()).max(0.0);
        match self {
            Self::Distance => falloff(),
            Self::Boosted(bonus) => falloff() + bonus,
            Self::Fixed(value) => value,
        }
    }
}

/// Content loading state reported by the host.
///
/// Informational only; it never affects geometry or visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    /// Content has not been requested or has not arrived yet.
    #[default]
    NotLoaded,
    /// Content is ready to display.
    Loaded,
    /// Loading failed; hosts typically show an error state with retry.
    Failed,
}

/// A card placed on the grid.
///
/// The entity occupies cells `[anchor.x, anchor.x + span.x - 1]` by
/// `[anchor.y, anchor.y + span.y - 1]`. Anchors are usually integral but may be
/// fractional for hand-placed cluster cards.
///
/// Visibility and priority are derived by [`crate::VirtualGrid`]; values set
/// before insertion are overwritten.
#[derive(Clone, Debug, PartialEq)]
pub struct GridEntity<K> {
    id: K,
    anchor: Point,
    span: CellSpan,
    rule: PriorityRule,
    pub(crate) priority: f64,
    pub(crate) visible: bool,
    pub(crate) load_state: LoadState,
}

impl<K> GridEntity<K> {
    /// Creates an entity with the default distance priority rule.
    pub fn new(id: K, anchor: Point, span: CellSpan) -> Self {
        Self {
            id,
            anchor,
            span,
            rule: PriorityRule::Distance,
            priority: 0.0,
            visible: false,
            load_state: LoadState::NotLoaded,
        }
    }

    /// Replaces the priority rule.
    #[must_use]
    pub fn with_priority_rule(mut self, rule: PriorityRule) -> Self {
        self.rule = rule;
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Top-left occupied cell.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Cells covered along each axis.
    #[must_use]
    pub fn span(&self) -> CellSpan {
        self.span
    }

    /// Rule used to derive [`GridEntity::priority`].
    #[must_use]
    pub fn priority_rule(&self) -> PriorityRule {
        self.rule
    }

    /// Render priority; higher renders first.
    #[must_use]
    pub fn priority(&self) -> f64 {
        self.priority
    }

    /// Whether the entity overlaps the current render window.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Host-reported loading state.
    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Last occupied cell along each axis (inclusive).
    #[must_use]
    pub fn last_cell(&self) -> Point {
        Point::new(
            self.anchor.x + f64::from(self.span.x()) - 1.0,
            self.anchor.y + f64::from(self.span.y()) - 1.0,
        )
    }

    pub(crate) fn set_anchor(&mut self, anchor: Point, origin: Point) {
        self.anchor = anchor;
        self.refresh_priority(origin);
    }

    pub(crate) fn set_span(&mut self, span: CellSpan) {
        self.span = span;
    }

    pub(crate) fn refresh_priority(&mut self, origin: Point) {
        self.priority = self.rule.evaluate(self.anchor, origin);
    }
}

#[cfg(test)]
mod tests {
    use cardgrid_view::CellSpan;
    use kurbo::Point;

    use super::{GridEntity, PriorityRule};

    #[test]
    fn distance_rule_falls_off_from_origin() {
        let r = PriorityRule::Distance;
        assert_eq!(r.evaluate(Point::ZERO, Point::ZERO), 100.0);
        assert_eq!(r.evaluate(Point::new(3.0, 4.0), Point::ZERO), 95.0);
        assert_eq!(r.evaluate(Point::new(300.0, 400.0), Point::ZERO), 0.0);
        assert_eq!(r.evaluate(Point::new(4.0, 5.0), Point::new(1.0, 1.0)), 95.0);
    }

    #[test]
    fn boosted_and_fixed_rules() {
        let boosted = PriorityRule::Boosted(12.5);
        assert_eq!(boosted.evaluate(Point::new(3.0, 4.0), Point::ZERO), 107.5);
        let fixed = PriorityRule::Fixed(42.0);
        assert_eq!(fixed.evaluate(Point::new(1000.0, 0.0), Point::ZERO), 42.0);
    }

    #[test]
    fn moving_refreshes_priority() {
        let mut e = GridEntity::new("a", Point::ZERO, CellSpan::ONE);
        e.refresh_priority(Point::ZERO);
        assert_eq!(e.priority(), 100.0);
        e.set_anchor(Point::new(0.0, 10.0), Point::ZERO);
        assert_eq!(e.priority(), 90.0);
        assert_eq!(e.last_cell(), Point::new(0.0, 10.0));
    }
}
