// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CardGrid Layout: spiral placement of cards around a reserved cluster.
//!
//! A fixed cluster of hand-placed cards sits around the layout origin. The
//! remaining content cards are placed by [`SpiralDistributor`] on concentric
//! square rings ([`SpiralPattern`]) from an inner radius outward, first-fit,
//! without overlapping the cluster or each other.
//!
//! Cards that fit nowhere are handled by [`OverflowPolicy`]: dropped and
//! reported, placed on further rings, or turned into a [`PlacementError`].
//!
//! ## Minimal example
//!
//! ```rust
//! use cardgrid_layout::{SpiralConfig, SpiralDistributor};
//! use cardgrid_view::CellSpan;
//! use kurbo::Point;
//!
//! let mut spiral = SpiralDistributor::new(SpiralConfig::default());
//! spiral.reserve(Point::new(-2.2, -1.8), CellSpan::new(2, 2).unwrap());
//! spiral.reserve(Point::ZERO, CellSpan::new(2, 3).unwrap());
//!
//! let cards = (0..20).map(|i| (i, CellSpan::ONE));
//! let out = spiral.distribute(cards).unwrap();
//! assert!(out.is_complete());
//! assert!(out.placed.iter().all(|p| p.ring() >= 3));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod distributor;
mod spiral;

pub use distributor::{
    Distribution, OverflowPolicy, Placement, PlacementError, SpiralConfig, SpiralDistributor,
};
pub use spiral::{SpiralPattern, ring_len, ring_of};
