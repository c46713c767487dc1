// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tens of cards.

use alloc::vec::Vec;
use core::fmt::Debug;

use cardgrid_view::CellRect;

use crate::backend::{CellBackend, Footprint};

/// Flat vector backend with linear scans.
#[derive(Clone, Default)]
pub struct FlatScan {
    entries: Vec<Option<Footprint>>,
}

impl Debug for FlatScan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.entries.len();
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("FlatScan")
            .field("total_slots", &total)
            .field("alive", &alive)
            .finish_non_exhaustive()
    }
}

impl CellBackend for FlatScan {
    fn insert(&mut self, slot: usize, footprint: Footprint) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some(footprint);
    }

    fn update(&mut self, slot: usize, footprint: Footprint) {
        if let Some(e) = self.entries.get_mut(slot) {
            *e = Some(footprint);
        }
    }

    fn remove(&mut self, slot: usize) {
        if let Some(e) = self.entries.get_mut(slot) {
            *e = None;
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn visit_window<F: FnMut(usize)>(&self, window: &CellRect, mut f: F) {
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some(fp) = slot.as_ref()
                && fp.intersects(window)
            {
                f(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use cardgrid_view::{CellRect, CellSpan};
    use kurbo::Point;

    use super::FlatScan;
    use crate::backend::{CellBackend, Footprint};

    #[test]
    fn visits_only_live_overlapping_slots() {
        let mut b = FlatScan::default();
        b.insert(0, Footprint::new(Point::ZERO, CellSpan::ONE));
        b.insert(3, Footprint::new(Point::new(20.0, 0.0), CellSpan::ONE));
        b.insert(1, Footprint::new(Point::new(1.0, 1.0), CellSpan::ONE));
        b.remove(1);

        let window = CellRect {
            start_x: -2,
            end_x: 8,
            start_y: -2,
            end_y: 7,
        };
        let mut hits = Vec::new();
        b.visit_window(&window, |i| hits.push(i));
        assert_eq!(hits, [0]);

        b.update(3, Footprint::new(Point::new(8.0, 7.0), CellSpan::ONE));
        hits.clear();
        b.visit_window(&window, |i| hits.push(i));
        assert_eq!(hits, [0, 3]);
    }
}
