// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release velocity estimation from recent movement samples.

use kurbo::Vec2;

/// Velocity estimate produced by [`VelocityTracker::velocity`].
///
/// Components are in pixels per ~60 Hz frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReleaseVelocity {
    /// Horizontal velocity.
    pub x: f64,
    /// Vertical velocity.
    pub y: f64,
    /// Euclidean norm of `(x, y)`.
    pub speed: f64,
}

impl ReleaseVelocity {
    /// Speed above which a release counts as a fling.
    pub const FLING_THRESHOLD: f64 = 0.5;

    /// Velocity as a vector.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns `true` if the release should start momentum.
    #[must_use]
    pub fn is_fling(&self) -> bool {
        self.speed > Self::FLING_THRESHOLD
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Sample {
    delta: Vec2,
    time_ms: f64,
}

/// Sliding window of the most recent movement deltas.
///
/// Holds at most [`VelocityTracker::CAPACITY`] samples; older samples are
/// discarded as new ones arrive.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: [Sample; Self::CAPACITY],
    len: usize,
}

impl VelocityTracker {
    /// Maximum number of retained samples.
    pub const CAPACITY: usize = 5;

    /// Milliseconds per frame used to scale the estimate.
    pub const FRAME_MS: f64 = 16.67;

    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a movement delta observed at `time_ms`.
    pub fn add_sample(&mut self, delta: Vec2, time_ms: f64) {
        let sample = Sample { delta, time_ms };
        if self.len == Self::CAPACITY {
            self.samples.copy_within(1.., 0);
            self.samples[Self::CAPACITY - 1] = sample;
        } else {
            self.samples[self.len] = sample;
            self.len += 1;
        }
    }

    /// Discards all samples.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Estimates the current velocity.
    ///
    /// The deltas after the oldest sample are averaged and divided by the
    /// window's time span, then scaled to [`VelocityTracker::FRAME_MS`].
    /// Fewer than two samples, or a zero time span, yield zero.
    #[must_use]
    pub fn velocity(&self) -> ReleaseVelocity {
        let window = &self.samples[..self.len];
        let (Some(oldest), Some(newest)) = (window.first(), window.last()) else {
            return ReleaseVelocity::default();
        };
        let span = newest.time_ms - oldest.time_ms;
        if window.len() < 2 || span == 0.0 {
            return ReleaseVelocity::default();
        }
        let total = window[1..]
            .iter()
            .fold(Vec2::ZERO, |acc, s| acc + s.delta);
        let count = (window.len() - 1) as f64;
        let v = total / count / span * Self::FRAME_MS;
        ReleaseVelocity {
            x: v.x,
            y: v.y,
            speed: v.hypot(),
        }
    }

    /// Shorthand for `self.velocity().is_fling()`.
    #[must_use]
    pub fn is_fling(&self) -> bool {
        self.velocity().is_fling()
    }
}
