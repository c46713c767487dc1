// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CardGrid Input: adapters from raw input events to grid actions.
//!
//! Each adapter is a small, self-contained state machine. None of them shares
//! mutable state with another, and none of them touches the scroll position:
//! they return actions that the caller applies.
//!
//! - [`TouchAdapter`]: single-finger drags become inverted pan deltas, fast
//!   releases become momentum impulses, and two-finger pinches become zoom
//!   scales.
//! - [`WheelAdapter`]: wheel bursts are accelerated; Shift redirects dominant
//!   vertical scrolling to the horizontal axis; Ctrl+wheel is left to zoom.
//! - [`KeyboardAdapter`]: held arrows, WASD, Page Up/Down and Home/End pan
//!   every frame; Tab/Shift+Tab walk a focus cycle; Enter activates.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardgrid_input::{Key, KeyAction, KeyEvent, KeyboardAdapter, WheelAdapter, WheelEvent};
//! use kurbo::Vec2;
//!
//! let mut wheel = WheelAdapter::default();
//! let delta = wheel.wheel(WheelEvent::new(Vec2::new(0.0, 100.0), 0.0)).unwrap();
//! assert!(delta.y > 100.0);
//!
//! let mut keys = KeyboardAdapter::default();
//! keys.set_ids(["bio", "skills"]);
//! assert_eq!(keys.key_down(KeyEvent::new(Key::Tab)), Some(KeyAction::Focus("bio")));
//! assert_eq!(keys.key_down(KeyEvent::new(Key::Enter)), Some(KeyAction::Activate("bio")));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod keyboard;
mod modifiers;
pub mod touch;
mod wheel;

pub use keyboard::{
    HeldKeys, Key, KeyAction, KeyEvent, KeyTarget, KeyboardAdapter, KeyboardConfig, focus_cycle,
};
pub use modifiers::Modifiers;
pub use touch::{TouchAction, TouchActions, TouchAdapter, TouchPoint};
pub use wheel::{WheelAdapter, WheelConfig, WheelEvent};
