// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Size};

use crate::bounds::GridBounds;

/// Number of cells occupied by an entity along each axis.
///
/// Both components are at least `1`; [`CellSpan::new`] rejects zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellSpan {
    x: u32,
    y: u32,
}

impl CellSpan {
    /// A single cell.
    pub const ONE: Self = Self { x: 1, y: 1 };

    /// Creates a span, returning `None` if either component is zero.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Option<Self> {
        if x == 0 || y == 0 {
            None
        } else {
            Some(Self { x, y })
        }
    }

    /// Cells occupied along the horizontal axis.
    #[must_use]
    pub const fn x(self) -> u32 {
        self.x
    }

    /// Cells occupied along the vertical axis.
    #[must_use]
    pub const fn y(self) -> u32 {
        self.y
    }

    /// Total number of cells covered.
    #[must_use]
    pub const fn area(self) -> u64 {
        self.x as u64 * self.y as u64
    }
}

impl Default for CellSpan {
    fn default() -> Self {
        Self::ONE
    }
}

/// Inclusive rectangle of cell indices.
///
/// Produced by [`GridGeometry::viewport_cells`]; both ends are inclusive, so a
/// cell at `end_x` is still part of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// First column in the window.
    pub start_x: i64,
    /// Last column in the window (inclusive).
    pub end_x: i64,
    /// First row in the window.
    pub start_y: i64,
    /// Last row in the window (inclusive).
    pub end_y: i64,
}

impl CellRect {
    /// Returns `true` if the anchored span overlaps this window.
    ///
    /// The span occupies `[anchor.x, anchor.x + span.x - 1]` horizontally and
    /// likewise vertically; overlap is tested on closed intervals.
    #[must_use]
    pub fn intersects(&self, anchor: Point, span: CellSpan) -> bool {
        let last_x = anchor.x + f64::from(span.x()) - 1.0;
        let last_y = anchor.y + f64::from(span.y()) - 1.0;
        anchor.x <= self.end_x as f64
            && last_x >= self.start_x as f64
            && anchor.y <= self.end_y as f64
            && last_y >= self.start_y as f64
    }

    /// Returns `true` if the cell `(x, y)` lies inside the window.
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        (self.start_x..=self.end_x).contains(&x) && (self.start_y..=self.end_y).contains(&y)
    }

    /// Number of columns covered (zero for an inverted window).
    #[must_use]
    pub fn columns(&self) -> u64 {
        self.end_x.saturating_sub(self.start_x).saturating_add(1).max(0) as u64
    }

    /// Number of rows covered (zero for an inverted window).
    #[must_use]
    pub fn rows(&self) -> u64 {
        self.end_y.saturating_sub(self.start_y).saturating_add(1).max(0) as u64
    }
}

/// Error returned by [`GridGeometry::validate`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum InvalidGeometry {
    /// Cell size must be finite and strictly positive.
    #[error("cell size must be finite and positive, got {0}")]
    CellSize(f64),
    /// Gap must be finite and non-negative.
    #[error("gap must be finite and non-negative, got {0}")]
    Gap(f64),
    /// The origin cell must have finite coordinates.
    #[error("origin must be finite, got ({0}, {1})")]
    Origin(f64, f64),
}

/// Immutable grid layout constants and the pure conversions built on them.
///
/// Every cell is `cell_size` pixels square and separated from its neighbors by
/// `gap` pixels, so cells repeat on a pitch of `cell_size + gap`. Cell `(0, 0)`
/// starts at pixel `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridGeometry {
    /// Edge length of one cell in pixels.
    pub cell_size: f64,
    /// Spacing between neighboring cells in pixels.
    pub gap: f64,
    /// Cell that anchors the layout (the center of the reserved cluster).
    ///
    /// Default render priority falls off with distance from this cell.
    pub origin: Point,
    /// Extra cells realized beyond each viewport edge to mask pop-in.
    pub render_buffer: u32,
    /// Cells of padding added around content when deriving scroll bounds.
    pub boundary_padding: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_size: 120.0,
            gap: 16.0,
            origin: Point::ZERO,
            render_buffer: 2,
            boundary_padding: 5,
        }
    }
}

impl GridGeometry {
    /// Distance in pixels between the starts of two adjacent cells.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.cell_size + self.gap
    }

    /// Checks that the constants describe a usable grid.
    pub fn validate(&self) -> Result<(), InvalidGeometry> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(InvalidGeometry::CellSize(self.cell_size));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(InvalidGeometry::Gap(self.gap));
        }
        if !self.origin.is_finite() {
            return Err(InvalidGeometry::Origin(self.origin.x, self.origin.y));
        }
        Ok(())
    }

    /// Converts a cell coordinate into the pixel position of its top-left corner.
    #[must_use]
    pub fn grid_to_pixel(&self, gx: f64, gy: f64) -> Point {
        let pitch = self.pitch();
        Point::new(gx * pitch, gy * pitch)
    }

    /// Converts a pixel position into the nearest cell coordinate.
    ///
    /// This is lossy: `grid_to_pixel(pixel_to_grid(p))` snaps `p` to a cell
    /// corner, while `pixel_to_grid(grid_to_pixel(g)) == g` for integer cells.
    #[must_use]
    pub fn pixel_to_grid(&self, pixel: Point) -> (i64, i64) {
        let pitch = self.pitch();
        (
            round_to_i64(pixel.x / pitch),
            round_to_i64(pixel.y / pitch),
        )
    }

    /// Pixel extent of `span` consecutive cells, including the inner gaps.
    #[must_use]
    pub fn span_extent(&self, span: u32) -> f64 {
        let span = f64::from(span);
        span * self.cell_size + (span - 1.0) * self.gap
    }

    /// Pixel rectangle covered by a span anchored at a cell coordinate.
    #[must_use]
    pub fn cell_rect_to_pixels(&self, anchor: Point, span: CellSpan) -> Rect {
        let origin = self.grid_to_pixel(anchor.x, anchor.y);
        Rect::from_origin_size(
            origin,
            Size::new(self.span_extent(span.x()), self.span_extent(span.y())),
        )
    }

    /// Computes the cell window to realize for a viewport at a scroll offset.
    ///
    /// The window extends `render_buffer * cell_size` pixels beyond every
    /// viewport edge before being converted to cells:
    /// `start = floor((scroll - buffer) / pitch)` and
    /// `end = ceil((scroll + viewport + buffer) / pitch)`.
    #[must_use]
    pub fn viewport_cells(&self, viewport: Size, scroll: Point) -> CellRect {
        let pitch = self.pitch();
        let buffer = f64::from(self.render_buffer) * self.cell_size;
        CellRect {
            start_x: floor_to_i64((scroll.x - buffer) / pitch),
            end_x: ceil_to_i64((scroll.x + viewport.width + buffer) / pitch),
            start_y: floor_to_i64((scroll.y - buffer) / pitch),
            end_y: ceil_to_i64((scroll.y + viewport.height + buffer) / pitch),
        }
    }

    /// Padded bounding box of the cells occupied by the given anchored spans.
    ///
    /// Returns [`GridBounds::EMPTY`] (infinite, inverted extents) when the
    /// iterator is empty; callers must check [`GridBounds::is_empty`].
    #[must_use]
    pub fn boundary_from_spans<I>(&self, spans: I) -> GridBounds
    where
        I: IntoIterator<Item = (Point, CellSpan)>,
    {
        GridBounds::from_spans(spans, f64::from(self.boundary_padding))
    }
}

fn round_to_i64(v: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Cell indices are far inside i64 range; `as` saturates on overflow"
    )]
    {
        v.round() as i64
    }
}

fn floor_to_i64(v: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Cell indices are far inside i64 range; `as` saturates on overflow"
    )]
    {
        v.floor() as i64
    }
}

fn ceil_to_i64(v: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Cell indices are far inside i64 range; `as` saturates on overflow"
    )]
    {
        v.ceil() as i64
    }
}
