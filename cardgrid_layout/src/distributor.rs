// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spiral first-fit placement around a reserved cluster.

use alloc::vec::Vec;
use core::fmt::Debug;

use cardgrid_view::CellSpan;
use hashbrown::HashSet;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::spiral::{SpiralPattern, ring_of};

/// What to do with a card that fits nowhere on the configured rings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowPolicy {
    /// Skip the card and report it in [`Distribution::dropped`].
    #[default]
    Drop,
    /// Keep walking further rings, up to `max_radius`, before dropping.
    Expand {
        /// Outermost ring to try.
        max_radius: u32,
    },
    /// Abort with [`PlacementError::Exhausted`].
    Fail,
}

/// Spiral tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpiralConfig {
    /// First ring tried; rings inside it are left to the reserved cluster.
    pub inner_radius: u32,
    /// Last ring tried under [`OverflowPolicy::Drop`] and [`OverflowPolicy::Fail`].
    pub max_radius: u32,
    /// Handling of cards that do not fit.
    pub overflow: OverflowPolicy,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            inner_radius: 3,
            max_radius: 30,
            overflow: OverflowPolicy::Drop,
        }
    }
}

impl SpiralConfig {
    /// Outermost ring that may be walked under the overflow policy.
    #[must_use]
    pub fn outer_radius(&self) -> u32 {
        match self.overflow {
            OverflowPolicy::Expand { max_radius } => max_radius.max(self.max_radius),
            OverflowPolicy::Drop | OverflowPolicy::Fail => self.max_radius,
        }
    }
}

/// Error returned by [`SpiralDistributor::distribute`] under
/// [`OverflowPolicy::Fail`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError<K> {
    /// No free position remained on the spiral for a card.
    #[error("no free spiral position for {id:?} after placing {placed} cards")]
    Exhausted {
        /// Card that could not be placed.
        id: K,
        /// Cards placed before it.
        placed: usize,
    },
}

/// Where a card landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement<K> {
    /// Card id.
    pub id: K,
    /// Top-left occupied cell.
    pub cell: (i64, i64),
    /// Cells covered.
    pub span: CellSpan,
    /// Position in the spiral sequence where the card was placed.
    pub spiral_index: usize,
}

impl<K> Placement<K> {
    /// Anchor as a cell coordinate point.
    #[must_use]
    pub fn anchor(&self) -> Point {
        Point::new(self.cell.0 as f64, self.cell.1 as f64)
    }

    /// Ring the anchor cell lies on.
    #[must_use]
    pub fn ring(&self) -> u64 {
        ring_of(self.cell)
    }
}

/// Result of a distribution run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution<K> {
    /// Placed cards, in input order.
    pub placed: Vec<Placement<K>>,
    /// Cards that fit nowhere, in input order.
    pub dropped: Vec<K>,
    /// Number of cards requested.
    pub requested: usize,
}

impl<K> Distribution<K> {
    /// Number of cards placed.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Returns `true` if every requested card was placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Places cards on a square spiral around a fixed cluster without overlap.
///
/// Reserved cells come from hand-placed cluster cards; their anchors may be
/// fractional and are rounded to the nearest cell. Each content card, in input
/// order, resumes scanning the spiral just after the previous card's position
/// and takes the first candidate whose whole footprint is free. The scan never
/// revisits earlier positions, so cards keep their input order radiating
/// outward.
///
/// ```
/// use cardgrid_layout::{SpiralConfig, SpiralDistributor};
/// use cardgrid_view::CellSpan;
/// use kurbo::Point;
///
/// let mut spiral = SpiralDistributor::new(SpiralConfig::default());
/// spiral.reserve(Point::ZERO, CellSpan::new(2, 3).unwrap());
///
/// let cards = [("blog", CellSpan::ONE), ("case-study", CellSpan::new(2, 1).unwrap())];
/// let out = spiral.distribute(cards).unwrap();
/// assert_eq!(out.placed_count(), 2);
/// assert_eq!(out.placed[0].cell, (-3, -3));
/// assert_eq!(out.placed[1].cell, (-2, -3));
/// ```
#[derive(Clone, Debug)]
pub struct SpiralDistributor {
    config: SpiralConfig,
    reserved: Vec<((i64, i64), CellSpan)>,
}

impl SpiralDistributor {
    /// Creates a distributor with nothing reserved.
    #[must_use]
    pub fn new(config: SpiralConfig) -> Self {
        Self {
            config,
            reserved: Vec::new(),
        }
    }

    /// Tuning in effect.
    #[must_use]
    pub fn config(&self) -> &SpiralConfig {
        &self.config
    }

    /// Reserves the cells of a cluster card.
    pub fn reserve(&mut self, anchor: Point, span: CellSpan) {
        self.reserved
            .push(((round_to_i64(anchor.x), round_to_i64(anchor.y)), span));
    }

    /// Reserves the cells of several cluster cards.
    pub fn reserve_all<I: IntoIterator<Item = (Point, CellSpan)>>(&mut self, cards: I) {
        for (anchor, span) in cards {
            self.reserve(anchor, span);
        }
    }

    /// Forgets all reservations.
    pub fn clear_reserved(&mut self) {
        self.reserved.clear();
    }

    /// Places `cards` (id and span, in priority order).
    ///
    /// Each call starts from the reserved cells alone, so repeated runs over
    /// the same input are deterministic.
    pub fn distribute<K, I>(&self, cards: I) -> Result<Distribution<K>, PlacementError<K>>
    where
        K: Debug,
        I: IntoIterator<Item = (K, CellSpan)>,
    {
        let mut occupied: HashSet<(i64, i64)> = HashSet::new();
        for (cell, span) in &self.reserved {
            mark(&mut occupied, *cell, *span);
        }

        let mut spiral = SpiralPattern::new(self.config.inner_radius, self.config.outer_radius());
        let mut candidates: Vec<(i64, i64)> = Vec::new();
        let mut cursor = 0_usize;
        let mut out = Distribution {
            placed: Vec::new(),
            dropped: Vec::new(),
            requested: 0,
        };

        for (id, span) in cards {
            out.requested += 1;
            let mut found = None;
            let mut i = cursor;
            loop {
                if i == candidates.len() {
                    match spiral.next() {
                        Some(cell) => candidates.push(cell),
                        None => break,
                    }
                }
                let cell = candidates[i];
                if fits(&occupied, cell, span) {
                    found = Some((i, cell));
                    break;
                }
                i += 1;
            }

            match found {
                Some((index, cell)) => {
                    mark(&mut occupied, cell, span);
                    cursor = index + 1;
                    out.placed.push(Placement {
                        id,
                        cell,
                        span,
                        spiral_index: index,
                    });
                }
                None => {
                    if self.config.overflow == OverflowPolicy::Fail {
                        return Err(PlacementError::Exhausted {
                            id,
                            placed: out.placed.len(),
                        });
                    }
                    tracing::warn!(?id, "no free spiral position; card dropped");
                    out.dropped.push(id);
                }
            }
        }

        tracing::debug!(
            requested = out.requested,
            placed = out.placed.len(),
            dropped = out.dropped.len(),
            "spiral distribution finished"
        );
        Ok(out)
    }
}

fn cells(cell: (i64, i64), span: CellSpan) -> impl Iterator<Item = (i64, i64)> {
    let (x, y) = cell;
    (0..i64::from(span.x()))
        .flat_map(move |dx| (0..i64::from(span.y())).map(move |dy| (x + dx, y + dy)))
}

fn fits(occupied: &HashSet<(i64, i64)>, cell: (i64, i64), span: CellSpan) -> bool {
    cells(cell, span).all(|c| !occupied.contains(&c))
}

fn mark(occupied: &mut HashSet<(i64, i64)>, cell: (i64, i64), span: CellSpan) {
    occupied.extend(cells(cell, span));
}

fn round_to_i64(v: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Cluster anchors are small cell indices"
    )]
    {
        v.round() as i64
    }
}
