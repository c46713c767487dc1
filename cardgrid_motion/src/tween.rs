// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Eased pans between two scroll positions.

use kurbo::Point;

/// Cubic ease-out: fast start, gentle landing.
///
/// `t` is clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// One frame's result from [`PanTween::sample`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSample {
    /// Interpolated position for this frame.
    pub position: Point,
    /// `true` once the tween has reached its target.
    pub done: bool,
}

/// A time-based pan from one position to another.
///
/// The clock starts at the first [`PanTween::sample`], so the first frame
/// yields the start position and the tween always spans its full duration
/// regardless of when it was created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanTween {
    from: Point,
    to: Point,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl PanTween {
    /// Default duration for programmatic navigation.
    pub const DEFAULT_DURATION_MS: f64 = 500.0;

    /// Creates a tween that has not started yet.
    #[must_use]
    pub fn new(from: Point, to: Point, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            started_at: None,
        }
    }

    /// Position the tween departs from.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.from
    }

    /// Target position.
    #[must_use]
    pub fn target(&self) -> Point {
        self.to
    }

    /// Returns `true` once the first sample has been taken.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Position at `timestamp_ms`.
    pub fn sample(&mut self, timestamp_ms: f64) -> TweenSample {
        let start = *self.started_at.get_or_insert(timestamp_ms);
        let progress = if self.duration_ms > 0.0 {
            ((timestamp_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        TweenSample {
            position: self.from.lerp(self.to, ease_out_cubic(progress)),
            done: progress >= 1.0,
        }
    }
}
