// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CardGrid Motion: momentum, release velocity, eased pans and frame tasks.
//!
//! The pieces here are headless and clock-agnostic: every time-dependent
//! operation takes a timestamp in milliseconds supplied by the host's frame
//! loop.
//!
//! - [`ScrollPhysics`]: velocity decayed by friction per reference frame,
//!   clamped on impulse, stopped below a threshold.
//! - [`VelocityTracker`]: a short window of movement deltas that estimates
//!   the release velocity of a drag ([`ReleaseVelocity`]).
//! - [`PanTween`]: a cubic ease-out between two scroll positions.
//! - [`FrameTask`]: an explicitly cancellable per-frame task.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardgrid_motion::{ScrollPhysics, VelocityTracker};
//! use kurbo::Vec2;
//!
//! let mut tracker = VelocityTracker::new();
//! tracker.add_sample(Vec2::new(-12.0, 0.0), 0.0);
//! tracker.add_sample(Vec2::new(-12.0, 0.0), 16.0);
//!
//! let release = tracker.velocity();
//! assert!(release.is_fling());
//!
//! let mut physics = ScrollPhysics::default();
//! physics.add_impulse(release.to_vec2());
//! assert!(physics.is_moving());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod frame;
mod physics;
mod tween;
mod velocity;

pub use frame::FrameTask;
pub use physics::{InvalidPhysics, PhysicsConfig, ScrollPhysics};
pub use tween::{PanTween, TweenSample, ease_out_cubic};
pub use velocity::{ReleaseVelocity, VelocityTracker};
