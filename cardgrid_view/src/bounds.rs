// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

use crate::geometry::CellSpan;

/// Bounding rectangle of placed content in cell units.
///
/// The maxima are inclusive cell indices: a single 1x1 entity at `(0, 0)` with
/// no padding has bounds `(0, 0, 0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridBounds {
    /// Leftmost occupied column, minus padding.
    pub min_x: f64,
    /// Rightmost occupied column, plus padding.
    pub max_x: f64,
    /// Topmost occupied row, minus padding.
    pub min_y: f64,
    /// Bottommost occupied row, plus padding.
    pub max_y: f64,
}

impl GridBounds {
    /// Degenerate bounds of an empty entity set.
    ///
    /// The minima are `+inf` and the maxima `-inf`, so that including any span
    /// yields that span's extents.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Builds padded bounds from anchored spans.
    ///
    /// Padding is only applied when at least one span was seen; an empty
    /// iterator yields [`GridBounds::EMPTY`].
    #[must_use]
    pub fn from_spans<I>(spans: I, padding: f64) -> Self
    where
        I: IntoIterator<Item = (Point, CellSpan)>,
    {
        let mut bounds = Self::EMPTY;
        for (anchor, span) in spans {
            bounds.include(anchor, span);
        }
        bounds.padded(padding)
    }

    /// Returns `true` for the degenerate bounds of an empty set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grows the bounds to cover the cells of an anchored span.
    pub fn include(&mut self, anchor: Point, span: CellSpan) {
        self.min_x = self.min_x.min(anchor.x);
        self.max_x = self.max_x.max(anchor.x + f64::from(span.x()) - 1.0);
        self.min_y = self.min_y.min(anchor.y);
        self.max_y = self.max_y.max(anchor.y + f64::from(span.y()) - 1.0);
    }

    /// Returns these bounds expanded by `padding` cells on every side.
    ///
    /// Empty bounds stay empty.
    #[must_use]
    pub fn padded(self, padding: f64) -> Self {
        if self.is_empty() {
            return self;
        }
        Self {
            min_x: self.min_x - padding,
            max_x: self.max_x + padding,
            min_y: self.min_y - padding,
            max_y: self.max_y + padding,
        }
    }

    /// Scales the bounds by a cell pitch into a pixel rectangle.
    ///
    /// The rectangle spans from the start of the minimum cell to the start of
    /// the maximum cell. Returns `None` for empty bounds.
    #[must_use]
    pub fn to_pixels(&self, pitch: f64) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(Rect::new(
            self.min_x * pitch,
            self.min_y * pitch,
            self.max_x * pitch,
            self.max_y * pitch,
        ))
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::GridBounds;
    use crate::geometry::CellSpan;

    #[test]
    fn empty_set_yields_degenerate_bounds() {
        let bounds = GridBounds::from_spans(core::iter::empty(), 5.0);
        assert!(bounds.is_empty());
        assert_eq!(bounds, GridBounds::EMPTY);
        assert_eq!(bounds.to_pixels(136.0), None);
    }

    #[test]
    fn single_cell_is_padded_by_five() {
        let bounds = GridBounds::from_spans([(Point::ZERO, CellSpan::ONE)], 5.0);
        assert_eq!(
            bounds,
            GridBounds {
                min_x: -5.0,
                max_x: 5.0,
                min_y: -5.0,
                max_y: 5.0,
            }
        );
    }

    #[test]
    fn spans_extend_the_maximum_edge() {
        let bounds = GridBounds::from_spans(
            [
                (Point::new(-2.0, 1.0), CellSpan::new(2, 2).unwrap()),
                (Point::new(3.0, -4.0), CellSpan::new(3, 1).unwrap()),
            ],
            0.0,
        );
        assert_eq!(bounds.min_x, -2.0);
        assert_eq!(bounds.max_x, 5.0);
        assert_eq!(bounds.min_y, -4.0);
        assert_eq!(bounds.max_y, 2.0);
        assert_eq!(
            bounds.to_pixels(10.0),
            Some(Rect::new(-20.0, -40.0, 50.0, 20.0))
        );
    }
}
