// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Square-ring spiral sequence.

/// Number of cells on the ring at Chebyshev distance `radius` (`8 * radius`).
#[must_use]
pub const fn ring_len(radius: u32) -> u64 {
    if radius == 0 { 1 } else { 8 * radius as u64 }
}

/// Chebyshev ring a cell lies on.
#[must_use]
pub fn ring_of((x, y): (i64, i64)) -> u64 {
    x.unsigned_abs().max(y.unsigned_abs())
}

/// Lazy walk over concentric square rings around the origin cell.
///
/// Each ring of radius `r` is visited as:
/// - top edge, left to right: `(-r..=r, -r)`;
/// - right edge, top to bottom: `(r, -r+1..=r)`;
/// - bottom edge, right to left: `(r-1..=-r, r)`;
/// - left edge, bottom to top: `(-r, r-1..-r)`.
///
/// A ring of radius zero is the origin cell alone.
///
/// ```
/// use cardgrid_layout::SpiralPattern;
///
/// let ring: Vec<_> = SpiralPattern::new(1, 1).collect();
/// assert_eq!(
///     ring,
///     [(-1, -1), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct SpiralPattern {
    radius: i64,
    max_radius: i64,
    /// Position within the current ring.
    step: i64,
}

impl SpiralPattern {
    /// Walks rings `inner..=outer`. Empty when `inner > outer`.
    #[must_use]
    pub fn new(inner: u32, outer: u32) -> Self {
        Self {
            radius: i64::from(inner),
            max_radius: i64::from(outer),
            step: 0,
        }
    }

    /// Radius of the ring the next cell comes from.
    #[must_use]
    pub fn current_radius(&self) -> i64 {
        self.radius
    }

    fn cell_at(r: i64, step: i64) -> (i64, i64) {
        let side = 2 * r;
        if step <= side {
            (-r + step, -r)
        } else if step <= 2 * side {
            (r, -r + (step - side))
        } else if step <= 3 * side {
            (r - (step - 2 * side), r)
        } else {
            (-r, r - (step - 3 * side))
        }
    }
}

impl Iterator for SpiralPattern {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.radius > self.max_radius {
            return None;
        }
        let r = self.radius;
        if r == 0 {
            self.radius = 1;
            return Some((0, 0));
        }
        let cell = Self::cell_at(r, self.step);
        self.step += 1;
        if self.step >= 8 * r {
            self.radius += 1;
            self.step = 0;
        }
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use hashbrown::HashSet;

    use super::{SpiralPattern, ring_len, ring_of};

    #[test]
    fn rings_cover_each_cell_once() {
        let cells: Vec<_> = SpiralPattern::new(3, 30).collect();
        let expected: u64 = (3..=30).map(ring_len).sum();
        assert_eq!(cells.len() as u64, expected);
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len());
        assert!(cells.iter().all(|c| (3..=30).contains(&ring_of(*c))));
    }

    #[test]
    fn ring_three_starts_top_left_and_ends_below_it() {
        let ring: Vec<_> = SpiralPattern::new(3, 3).collect();
        assert_eq!(ring.len(), 24);
        assert_eq!(ring[0], (-3, -3));
        assert_eq!(ring[6], (3, -3));
        assert_eq!(ring[7], (3, -2));
        assert_eq!(ring[12], (3, 3));
        assert_eq!(ring[13], (2, 3));
        assert_eq!(ring[18], (-3, 3));
        assert_eq!(ring[19], (-3, 2));
        assert_eq!(ring[23], (-3, -2));
    }

    #[test]
    fn radius_zero_is_the_origin() {
        let cells: Vec<_> = SpiralPattern::new(0, 1).collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], (0, 0));
        assert!(SpiralPattern::new(4, 3).next().is_none());
    }
}
