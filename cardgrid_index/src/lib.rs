// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CardGrid Index: entity store and visibility culling.
//!
//! [`VirtualGrid`] owns the placed [`GridEntity`] values of an infinite card
//! grid and is the single authority on which of them are visible. Visibility
//! is derived from the render window of [`cardgrid_view::GridGeometry`]: an
//! entity is visible when its occupied cells overlap the window on both axes.
//!
//! - Entities carry a [`PriorityRule`] chosen at construction; the derived
//!   priority orders [`VirtualGrid::items_to_render`].
//! - The candidate scan is pluggable through [`CellBackend`]. [`FlatScan`] is
//!   a linear scan; `CellBuckets` (feature `backend_buckets`, on by default)
//!   buckets footprints by cell for large entity counts. Both produce the same
//!   visible set.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardgrid_index::{GridEntity, VirtualGrid};
//! use cardgrid_view::{CellSpan, GridGeometry};
//! use kurbo::{Point, Size};
//!
//! let mut grid = VirtualGrid::new(GridGeometry::default(), Size::new(800.0, 600.0));
//! grid.insert(GridEntity::new("near", Point::new(6.0, 6.0), CellSpan::ONE));
//! grid.insert(GridEntity::new("far", Point::new(10.0, 10.0), CellSpan::ONE));
//!
//! let visible: Vec<_> = grid.visible_ids().copied().collect();
//! assert_eq!(visible, ["near"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod entity;
mod grid;

pub use backend::{CellBackend, Footprint};
#[cfg(feature = "backend_buckets")]
pub use backends::CellBuckets;
pub use backends::FlatScan;
pub use entity::{GridEntity, LoadState, PriorityRule};
pub use grid::{VirtualGrid, VirtualGridDebugInfo};
