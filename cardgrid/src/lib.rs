// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CardGrid: a headless infinite canvas of cards.
//!
//! [`Grid`] is the entry point. It keeps a scroll position over a sparse set
//! of cards laid out on a uniform cell grid, works out which cards need to be
//! realized, and moves the canvas in response to touch, wheel and keyboard
//! input with momentum and rubber-band edges. Drawing is left to the host:
//! it reads [`Grid::items_to_render`] and [`Grid::pixel_position_of`], and
//! reacts to the [`GridEvent`]s taken from [`Grid::drain_events`].
//!
//! The pieces live in their own crates and are re-exported here:
//! - [`view`]: cell geometry, content bounds and elastic clamping.
//! - [`index`]: entities, priorities and viewport culling.
//! - [`motion`]: momentum, release velocity, eased tweens and frame tasks.
//! - [`input`]: touch, wheel and keyboard adapters.
//! - [`layout`]: spiral placement of cards around a reserved cluster.
//!
//! ## Driving a grid
//!
//! The host owns the clock. Call [`Grid::on_frame`] once per animation frame
//! with a monotonic timestamp in milliseconds; it advances momentum, held-key
//! panning, animated navigation and the pull back from past the edges.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardgrid::{Grid, GridConfig, GridEvent};
//! use cardgrid::index::GridEntity;
//! use cardgrid::view::CellSpan;
//! use kurbo::{Point, Size, Vec2};
//!
//! let cards = [
//!     GridEntity::new("hero", Point::new(0.0, 0.0), CellSpan::new(2, 2).unwrap()),
//!     GridEntity::new("far", Point::new(10.0, 10.0), CellSpan::ONE),
//! ];
//! let mut grid = Grid::new(GridConfig::default(), Size::new(800.0, 600.0), cards, Point::ZERO)
//!     .unwrap();
//! assert_eq!(grid.drain_events(), [GridEvent::VisibleChanged(vec!["hero"])]);
//!
//! // Pan until the far card comes into view.
//! grid.pan_by(Vec2::new(700.0, 700.0));
//! assert!(grid.visible_entities().any(|id| *id == "far"));
//!
//! // Jump to a card: it is centered and receives keyboard focus.
//! assert!(grid.navigate_to(&"hero", false));
//! assert_eq!(grid.focused(), Some(&"hero"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod coordinator;
mod events;
mod grid;

pub use cardgrid_index as index;
pub use cardgrid_input as input;
pub use cardgrid_layout as layout;
pub use cardgrid_motion as motion;
pub use cardgrid_view as view;

pub use config::{ConfigError, GridConfig, InputConfig};
pub use coordinator::{InputCoordinator, PanSink};
pub use events::GridEvent;
pub use grid::{Grid, GridDebugInfo};
