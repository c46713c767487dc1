// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hash-bucketed cell backend for large entity counts.

use alloc::vec::Vec;
use core::fmt::Debug;

use cardgrid_view::CellRect;
use hashbrown::HashMap;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use smallvec::SmallVec;

use crate::backend::{CellBackend, Footprint};

/// Inclusive range of bucket coordinates covered by one footprint or window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BucketRange {
    x0: i64,
    x1: i64,
    y0: i64,
    y1: i64,
}

impl BucketRange {
    fn contains(&self, (bx, by): (i64, i64)) -> bool {
        (self.x0..=self.x1).contains(&bx) && (self.y0..=self.y1).contains(&by)
    }

    fn len(&self) -> u64 {
        let w = self.x1.saturating_sub(self.x0).saturating_add(1).max(0) as u64;
        let h = self.y1.saturating_sub(self.y0).saturating_add(1).max(0) as u64;
        w.saturating_mul(h)
    }

    fn keys(self) -> impl Iterator<Item = (i64, i64)> {
        (self.y0..=self.y1).flat_map(move |by| (self.x0..=self.x1).map(move |bx| (bx, by)))
    }
}

/// Cell-bucket backend.
///
/// The plane is divided into square buckets of `bucket_cells` cells. Each slot
/// is registered in every bucket its footprint touches; window queries walk the
/// buckets overlapping the window (or, when that is larger, every non-empty
/// bucket) and then run the exact overlap test.
#[derive(Clone)]
pub struct CellBuckets {
    bucket_cells: i64,
    entries: Vec<Option<(Footprint, BucketRange)>>,
    buckets: HashMap<(i64, i64), SmallVec<[usize; 4]>>,
}

impl Default for CellBuckets {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKET_CELLS)
    }
}

impl Debug for CellBuckets {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("CellBuckets")
            .field("bucket_cells", &self.bucket_cells)
            .field("alive", &alive)
            .field("buckets", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl CellBuckets {
    /// Bucket edge length used by [`CellBuckets::default`].
    pub const DEFAULT_BUCKET_CELLS: u32 = 8;

    /// Creates an empty backend with buckets of `bucket_cells` cells per side.
    ///
    /// A value of zero is treated as one.
    #[must_use]
    pub fn new(bucket_cells: u32) -> Self {
        Self {
            bucket_cells: i64::from(bucket_cells.max(1)),
            entries: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    fn range_of(&self, fp: &Footprint) -> BucketRange {
        let last_x = fp.anchor.x + f64::from(fp.span.x()) - 1.0;
        let last_y = fp.anchor.y + f64::from(fp.span.y()) - 1.0;
        BucketRange {
            x0: floor_to_i64(fp.anchor.x).div_euclid(self.bucket_cells),
            x1: floor_to_i64(last_x).div_euclid(self.bucket_cells),
            y0: floor_to_i64(fp.anchor.y).div_euclid(self.bucket_cells),
            y1: floor_to_i64(last_y).div_euclid(self.bucket_cells),
        }
    }

    fn window_range(&self, window: &CellRect) -> BucketRange {
        BucketRange {
            x0: window.start_x.div_euclid(self.bucket_cells),
            x1: window.end_x.div_euclid(self.bucket_cells),
            y0: window.start_y.div_euclid(self.bucket_cells),
            y1: window.end_y.div_euclid(self.bucket_cells),
        }
    }

    fn register(&mut self, slot: usize, range: BucketRange) {
        for key in range.keys() {
            self.buckets.entry(key).or_default().push(slot);
        }
    }

    fn unregister(&mut self, slot: usize, range: BucketRange) {
        for key in range.keys() {
            if let Some(bucket) = self.buckets.get_mut(&key) {
                bucket.retain(|s| *s != slot);
                if bucket.is_empty() {
                    self.buckets.remove(&key);
                }
            }
        }
    }
}

impl CellBackend for CellBuckets {
    fn insert(&mut self, slot: usize, footprint: Footprint) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        if let Some((_, old)) = self.entries[slot].take() {
            self.unregister(slot, old);
        }
        let range = self.range_of(&footprint);
        self.register(slot, range);
        self.entries[slot] = Some((footprint, range));
    }

    fn update(&mut self, slot: usize, footprint: Footprint) {
        if self.entries.get(slot).is_some_and(Option::is_some) {
            self.insert(slot, footprint);
        }
    }

    fn remove(&mut self, slot: usize) {
        if let Some((_, range)) = self.entries.get_mut(slot).and_then(Option::take) {
            self.unregister(slot, range);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
    }

    fn visit_window<F: FnMut(usize)>(&self, window: &CellRect, mut f: F) {
        let range = self.window_range(window);
        let mut candidates: Vec<usize> = Vec::new();
        if range.len() > self.buckets.len() as u64 {
            for (key, slots) in &self.buckets {
                if range.contains(*key) {
                    candidates.extend_from_slice(slots);
                }
            }
        } else {
            for key in range.keys() {
                if let Some(slots) = self.buckets.get(&key) {
                    candidates.extend_from_slice(slots);
                }
            }
        }
        candidates.sort_unstable();
        candidates.dedup();
        for slot in candidates {
            if let Some(Some((fp, _))) = self.entries.get(slot)
                && fp.intersects(window)
            {
                f(slot);
            }
        }
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

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use cardgrid_view::{CellRect, CellSpan};
    use kurbo::Point;

    use super::CellBuckets;
    use crate::backend::{CellBackend, Footprint};
    use crate::backends::FlatScan;

    fn hits<B: CellBackend>(b: &B, window: &CellRect) -> Vec<usize> {
        let mut out = Vec::new();
        b.visit_window(window, |i| out.push(i));
        out.sort_unstable();
        out
    }

    #[test]
    fn spans_crossing_buckets_are_reported_once() {
        let mut b = CellBuckets::new(4);
        // Covers cells -2..=5 horizontally: three buckets.
        b.insert(0, Footprint::new(Point::new(-2.0, 0.0), CellSpan::new(8, 1).unwrap()));
        let window = CellRect {
            start_x: -10,
            end_x: 10,
            start_y: -1,
            end_y: 1,
        };
        assert_eq!(hits(&b, &window), [0]);
    }

    #[test]
    fn remove_and_update_move_registrations() {
        let mut b = CellBuckets::new(4);
        b.insert(0, Footprint::new(Point::ZERO, CellSpan::ONE));
        b.insert(1, Footprint::new(Point::new(100.0, 100.0), CellSpan::ONE));
        let window = CellRect {
            start_x: -2,
            end_x: 8,
            start_y: -2,
            end_y: 7,
        };
        assert_eq!(hits(&b, &window), [0]);

        b.update(1, Footprint::new(Point::new(3.0, 3.0), CellSpan::ONE));
        assert_eq!(hits(&b, &window), [0, 1]);

        b.remove(0);
        assert_eq!(hits(&b, &window), [1]);

        // Updating a removed slot is a no-op.
        b.update(0, Footprint::new(Point::ZERO, CellSpan::ONE));
        assert_eq!(hits(&b, &window), [1]);
    }

    #[test]
    fn huge_window_falls_back_to_bucket_scan() {
        let mut b = CellBuckets::default();
        b.insert(0, Footprint::new(Point::new(-1.0e6, 3.0), CellSpan::ONE));
        b.insert(1, Footprint::new(Point::new(1.0e6, -3.0), CellSpan::ONE));
        let window = CellRect {
            start_x: -2_000_000,
            end_x: 2_000_000,
            start_y: -2_000_000,
            end_y: 2_000_000,
        };
        assert_eq!(hits(&b, &window), [0, 1]);
    }

    #[test]
    fn agrees_with_flat_scan_on_fractional_anchors() {
        let fps = [
            Footprint::new(Point::new(-2.2, -1.8), CellSpan::new(2, 2).unwrap()),
            Footprint::new(Point::new(0.0, 0.0), CellSpan::new(2, 3).unwrap()),
            Footprint::new(Point::new(7.5, 6.5), CellSpan::ONE),
            Footprint::new(Point::new(9.0, 0.0), CellSpan::ONE),
        ];
        let mut flat = FlatScan::default();
        let mut buckets = CellBuckets::new(3);
        for (i, fp) in fps.iter().enumerate() {
            flat.insert(i, *fp);
            buckets.insert(i, *fp);
        }
        let window = CellRect {
            start_x: -2,
            end_x: 8,
            start_y: -2,
            end_y: 7,
        };
        assert_eq!(hits(&flat, &window), hits(&buckets, &window));
    }
}
