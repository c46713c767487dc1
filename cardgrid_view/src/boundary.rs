// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::bounds::GridBounds;
use crate::geometry::GridGeometry;
use crate::modes::ElasticZone;

/// Resistance parameters for rubber-band clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElasticConfig {
    /// Overshoot in pixels covered by the soft zone.
    pub limit: f64,
    /// Fraction of overshoot kept inside the soft zone.
    pub soft_factor: f64,
    /// Fraction of overshoot kept beyond the soft zone.
    pub hard_factor: f64,
    /// Fraction of the out-of-bounds distance returned by
    /// [`BoundaryManager::elastic_force`].
    pub restoring_factor: f64,
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            limit: 200.0,
            soft_factor: 0.5,
            hard_factor: 0.3,
            restoring_factor: 0.1,
        }
    }
}

impl ElasticConfig {
    /// Maps a raw overshoot (pixels past an edge) to the displayed overshoot.
    ///
    /// Continuous at the soft/hard boundary: the hard zone continues from the
    /// already attenuated offset at the limit.
    #[must_use]
    pub fn attenuate(&self, overshoot: f64) -> f64 {
        if overshoot <= self.limit {
            overshoot * self.soft_factor
        } else {
            self.limit * self.soft_factor + (overshoot - self.limit) * self.hard_factor
        }
    }

    fn zone(&self, overshoot: f64) -> ElasticZone {
        if overshoot <= 0.0 {
            ElasticZone::Free
        } else if overshoot <= self.limit {
            ElasticZone::Soft
        } else {
            ElasticZone::Hard
        }
    }
}

/// Scrollable interval along one axis, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct AxisRange {
    lo: f64,
    hi: f64,
}

impl AxisRange {
    /// `lo` is the content's leading edge; `hi` is the furthest scroll offset
    /// that still keeps the trailing content edge inside the viewport.
    fn new(min_px: f64, max_px: f64, cell_size: f64, viewport: f64) -> Self {
        let hi = (max_px + cell_size - viewport).max(0.0).max(min_px);
        Self { lo: min_px, hi }
    }

    fn overshoot(&self, v: f64) -> f64 {
        if v < self.lo {
            self.lo - v
        } else if v > self.hi {
            v - self.hi
        } else {
            0.0
        }
    }

    fn constrain(&self, v: f64, elastic: &ElasticConfig) -> f64 {
        if v < self.lo {
            self.lo - elastic.attenuate(self.lo - v)
        } else if v > self.hi {
            self.hi + elastic.attenuate(v - self.hi)
        } else {
            v
        }
    }

    fn force(&self, v: f64, factor: f64) -> f64 {
        if v < self.lo {
            (self.lo - v) * factor
        } else if v > self.hi {
            (self.hi - v) * factor
        } else {
            0.0
        }
    }

    fn contains(&self, v: f64) -> bool {
        v >= self.lo && v <= self.hi
    }
}

/// Elastic clamp for scroll positions over content bounds.
///
/// `BoundaryManager` holds no entity references, only the derived
/// [`GridBounds`] and the viewport size. Each axis has three zones:
/// free movement inside the scrollable range, soft resistance up to
/// [`ElasticConfig::limit`] past an edge, and hard resistance beyond it.
///
/// With [`GridBounds::EMPTY`] every operation is a pass-through: positions are
/// unconstrained, always within bounds, and feel no restoring force.
#[derive(Clone, Debug)]
pub struct BoundaryManager {
    geometry: GridGeometry,
    elastic: ElasticConfig,
    bounds: GridBounds,
    viewport: Size,
}

impl BoundaryManager {
    /// Creates a manager with empty bounds and a zero-sized viewport.
    #[must_use]
    pub fn new(geometry: GridGeometry, elastic: ElasticConfig) -> Self {
        Self {
            geometry,
            elastic,
            bounds: GridBounds::EMPTY,
            viewport: Size::ZERO,
        }
    }

    /// Replaces the content bounds, typically after the entity set changed.
    pub fn set_bounds(&mut self, bounds: GridBounds) {
        self.bounds = bounds;
    }

    /// Returns the current content bounds in cell units.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Updates the viewport size used to derive the trailing scroll limits.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Returns the current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Returns the elastic parameters.
    #[must_use]
    pub fn elastic(&self) -> &ElasticConfig {
        &self.elastic
    }

    /// Content bounds scaled to pixels, or `None` when there is no content.
    #[must_use]
    pub fn pixel_bounds(&self) -> Option<Rect> {
        self.bounds.to_pixels(self.geometry.pitch())
    }

    /// The free (non-elastic) scroll rectangle, or `None` when there is no content.
    ///
    /// Any scroll position inside this rectangle is left untouched by
    /// [`BoundaryManager::constrain`].
    #[must_use]
    pub fn scroll_range(&self) -> Option<Rect> {
        let (x, y) = self.ranges()?;
        Some(Rect::new(x.lo, y.lo, x.hi, y.hi))
    }

    /// Applies rubber-band resistance to a proposed scroll position.
    #[must_use]
    pub fn constrain(&self, pos: Point) -> Point {
        match self.ranges() {
            Some((x, y)) => Point::new(
                x.constrain(pos.x, &self.elastic),
                y.constrain(pos.y, &self.elastic),
            ),
            None => pos,
        }
    }

    /// Returns `true` if the position lies inside the non-elastic scroll range.
    #[must_use]
    pub fn is_within_bounds(&self, pos: Point) -> bool {
        match self.ranges() {
            Some((x, y)) => x.contains(pos.x) && y.contains(pos.y),
            None => true,
        }
    }

    /// Restoring force pulling an out-of-bounds position back toward the range.
    ///
    /// Zero on any axis that is inside its range. Callers apply this once per
    /// frame until [`BoundaryManager::is_within_bounds`] holds again.
    #[must_use]
    pub fn elastic_force(&self, pos: Point) -> Vec2 {
        match self.ranges() {
            Some((x, y)) => {
                let k = self.elastic.restoring_factor;
                Vec2::new(x.force(pos.x, k), y.force(pos.y, k))
            }
            None => Vec2::ZERO,
        }
    }

    /// Resistance zone of a raw (unconstrained) position along each axis.
    #[must_use]
    pub fn zones(&self, pos: Point) -> (ElasticZone, ElasticZone) {
        match self.ranges() {
            Some((x, y)) => (
                self.elastic.zone(x.overshoot(pos.x)),
                self.elastic.zone(y.overshoot(pos.y)),
            ),
            None => (ElasticZone::Free, ElasticZone::Free),
        }
    }

    /// Snapshot of the current boundary state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> BoundaryDebugInfo {
        BoundaryDebugInfo {
            bounds: self.bounds,
            viewport: self.viewport,
            pixel_bounds: self.pixel_bounds(),
            scroll_range: self.scroll_range(),
            elastic: self.elastic,
        }
    }

    fn ranges(&self) -> Option<(AxisRange, AxisRange)> {
        let px = self.pixel_bounds()?;
        let cell = self.geometry.cell_size;
        Some((
            AxisRange::new(px.x0, px.x1, cell, self.viewport.width),
            AxisRange::new(px.y0, px.y1, cell, self.viewport.height),
        ))
    }
}

/// Debug snapshot of a [`BoundaryManager`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryDebugInfo {
    /// Content bounds in cell units.
    pub bounds: GridBounds,
    /// Current viewport size.
    pub viewport: Size,
    /// Content bounds in pixels, if any content exists.
    pub pixel_bounds: Option<Rect>,
    /// Free scroll rectangle, if any content exists.
    pub scroll_range: Option<Rect>,
    /// Elastic parameters in effect.
    pub elastic: ElasticConfig,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{BoundaryManager, ElasticConfig};
    use crate::geometry::{CellSpan, GridGeometry};
    use crate::modes::ElasticZone;

    fn manager() -> BoundaryManager {
        let geometry = GridGeometry::default();
        let mut m = BoundaryManager::new(geometry, ElasticConfig::default());
        m.set_viewport(Size::new(800.0, 600.0));
        m.set_bounds(geometry.boundary_from_spans([(Point::ZERO, CellSpan::ONE)]));
        m
    }

    #[test]
    fn scroll_range_accounts_for_viewport_and_trailing_cell() {
        let m = manager();
        // Bounds are -5..5 cells; 5 * 136 = 680px.
        assert_eq!(m.pixel_bounds(), Some(Rect::new(-680.0, -680.0, 680.0, 680.0)));
        // hi = 680 + 120 - viewport.
        assert_eq!(m.scroll_range(), Some(Rect::new(-680.0, -680.0, 0.0, 200.0)));
    }

    #[test]
    fn positions_inside_range_are_untouched() {
        let m = manager();
        for p in [
            Point::new(-600.0, -600.0),
            Point::new(0.0, 0.0),
            Point::new(-1.0, 199.0),
        ] {
            assert_eq!(m.constrain(p), p);
            assert!(m.is_within_bounds(p));
            assert_eq!(m.elastic_force(p), Vec2::ZERO);
            assert_eq!(m.zones(p), (ElasticZone::Free, ElasticZone::Free));
        }
    }

    #[test]
    fn soft_zone_halves_overshoot() {
        let m = manager();
        let p = m.constrain(Point::new(-780.0, 300.0));
        assert_eq!(p, Point::new(-730.0, 250.0));
        assert_eq!(
            m.zones(Point::new(-780.0, 300.0)),
            (ElasticZone::Soft, ElasticZone::Soft)
        );
    }

    #[test]
    fn hard_zone_continues_from_soft_limit() {
        let m = manager();
        // Exactly at the limit both formulas agree.
        let at_limit = m.constrain(Point::new(200.0, 0.0));
        assert_eq!(at_limit.x, 100.0);
        // Past it, the extra overshoot is scaled by 0.3.
        let past = m.constrain(Point::new(300.0, 0.0));
        assert!((past.x - 130.0).abs() < 1e-9);
        assert_eq!(m.zones(Point::new(300.0, 0.0)).0, ElasticZone::Hard);
    }

    #[test]
    fn elastic_force_points_back_into_range() {
        let m = manager();
        let f = m.elastic_force(Point::new(-780.0, 300.0));
        assert!((f.x - 10.0).abs() < 1e-9);
        assert!((f.y + 10.0).abs() < 1e-9);
        assert!(!m.is_within_bounds(Point::new(-780.0, 0.0)));
    }

    #[test]
    fn empty_bounds_pass_through() {
        let m = BoundaryManager::new(GridGeometry::default(), ElasticConfig::default());
        let p = Point::new(-1.0e6, 1.0e6);
        assert_eq!(m.constrain(p), p);
        assert!(m.is_within_bounds(p));
        assert_eq!(m.elastic_force(p), Vec2::ZERO);
        assert!(m.scroll_range().is_none());
    }

    #[test]
    fn wide_viewport_pins_trailing_edge_to_leading_edge() {
        let geometry = GridGeometry::default();
        let mut m = BoundaryManager::new(geometry, ElasticConfig::default());
        m.set_viewport(Size::new(10_000.0, 10_000.0));
        // Content far to the bottom-right: lo is positive, hi would clamp to 0.
        m.set_bounds(geometry.boundary_from_spans([(Point::new(20.0, 20.0), CellSpan::ONE)]));
        let range = m.scroll_range().unwrap();
        assert_eq!(range.x0, range.x1);
        assert_eq!(m.constrain(Point::new(range.x0, range.y0)), range.origin());
    }

    #[test]
    fn debug_info_reflects_state() {
        let m = manager();
        let info = m.debug_info();
        assert_eq!(info.viewport, Size::new(800.0, 600.0));
        assert_eq!(info.scroll_range, m.scroll_range());
        assert_eq!(info.elastic, ElasticConfig::default());
    }
}
