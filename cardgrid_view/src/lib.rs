// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CardGrid View: grid geometry and elastic scroll bounds.
//!
//! This crate provides the small, headless math underneath an infinite card
//! grid whose cells are laid out on a uniform pitch (`cell_size + gap`). It
//! focuses on:
//! - Conversion between grid cells and canvas pixels ([`GridGeometry`]).
//! - The cell window that must be realized for a given viewport and scroll
//!   offset, including an overscan "render buffer" ([`CellRect`]).
//! - The padded bounding rectangle of a set of placed cards ([`GridBounds`]).
//! - Rubber-band clamping of scroll positions against those bounds
//!   ([`BoundaryManager`]).
//!
//! It does **not** own any entities, input handling, or rendering. Callers are
//! expected to:
//! - Keep their own entity collection and feed anchors/spans in when the set
//!   changes.
//! - Own the scroll position and pass every proposed position through
//!   [`BoundaryManager::constrain`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use cardgrid_view::{CellSpan, GridGeometry};
//!
//! let geometry = GridGeometry::default();
//!
//! // Cell (2, 1) starts at 2 * 136 = 272px, 1 * 136 = 136px.
//! assert_eq!(geometry.grid_to_pixel(2.0, 1.0), Point::new(272.0, 136.0));
//!
//! // Which cells should be realized for an 800x600 viewport at the origin?
//! let cells = geometry.viewport_cells(Size::new(800.0, 600.0), Point::ZERO);
//! assert_eq!((cells.start_x, cells.end_x), (-2, 8));
//! assert!(cells.intersects(Point::new(6.0, 6.0), CellSpan::ONE));
//! ```
//!
//! ## Elastic bounds
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use cardgrid_view::{BoundaryManager, CellSpan, ElasticConfig, GridGeometry};
//!
//! let geometry = GridGeometry::default();
//! let mut boundary = BoundaryManager::new(geometry, ElasticConfig::default());
//! boundary.set_viewport(Size::new(800.0, 600.0));
//! boundary.set_bounds(geometry.boundary_from_spans([(Point::ZERO, CellSpan::ONE)]));
//!
//! // Inside the scrollable range positions pass through untouched.
//! assert_eq!(boundary.constrain(Point::ZERO), Point::ZERO);
//!
//! // Past the left edge the overshoot is attenuated.
//! let pulled = boundary.constrain(Point::new(-800.0, 0.0));
//! assert!(pulled.x > -800.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod boundary;
mod bounds;
mod geometry;
mod modes;

pub use boundary::{BoundaryDebugInfo, BoundaryManager, ElasticConfig};
pub use bounds::GridBounds;
pub use geometry::{CellRect, CellSpan, GridGeometry, InvalidGeometry};
pub use modes::ElasticZone;
