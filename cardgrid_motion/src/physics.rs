// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Friction-decayed momentum.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Vec2;

/// Error returned by [`PhysicsConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum InvalidPhysics {
    /// Friction must lie in `(0, 1)`.
    #[error("friction must be in (0, 1), got {0}")]
    Friction(f64),
    /// Velocity thresholds must satisfy `0 <= min_velocity < max_velocity`.
    #[error("velocity limits must satisfy 0 <= min < max, got min {min} max {max}")]
    VelocityLimits {
        /// Configured stop threshold.
        min: f64,
        /// Configured cap.
        max: f64,
    },
    /// The reference frame duration must be finite and positive.
    #[error("frame duration must be positive, got {0} ms")]
    FrameDuration(f64),
}

/// Momentum tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsConfig {
    /// Velocity multiplier applied per reference frame.
    pub friction: f64,
    /// Per-axis speed below which motion stops, in pixels per frame.
    pub min_velocity: f64,
    /// Per-axis speed cap, in pixels per frame.
    pub max_velocity: f64,
    /// Duration of one reference frame in milliseconds.
    pub frame_ms: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.92,
            min_velocity: 0.1,
            max_velocity: 50.0,
            frame_ms: 16.0,
        }
    }
}

impl PhysicsConfig {
    /// Checks that the values describe decaying, bounded motion.
    pub fn validate(&self) -> Result<(), InvalidPhysics> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(InvalidPhysics::Friction(self.friction));
        }
        if !(self.min_velocity >= 0.0 && self.min_velocity < self.max_velocity)
            || !self.max_velocity.is_finite()
        {
            return Err(InvalidPhysics::VelocityLimits {
                min: self.min_velocity,
                max: self.max_velocity,
            });
        }
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            return Err(InvalidPhysics::FrameDuration(self.frame_ms));
        }
        Ok(())
    }
}

/// Momentum state for inertial scrolling.
///
/// Velocity is measured in pixels per reference frame. Each
/// [`ScrollPhysics::update`] decays it by `friction^elapsed`, where `elapsed`
/// is the time since the previous update in reference frames, and returns the
/// displacement to apply.
///
/// ```
/// use cardgrid_motion::{PhysicsConfig, ScrollPhysics};
/// use kurbo::Vec2;
///
/// let mut physics = ScrollPhysics::new(PhysicsConfig::default());
/// physics.add_impulse(Vec2::new(10.0, 0.0));
///
/// // The first update only starts the clock.
/// assert_eq!(physics.update(1000.0), Vec2::ZERO);
///
/// // One frame later the velocity has decayed by the friction factor.
/// let delta = physics.update(1016.0);
/// assert!((delta.x - 9.2).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct ScrollPhysics {
    config: PhysicsConfig,
    velocity: Vec2,
    last_timestamp: Option<f64>,
}

impl Default for ScrollPhysics {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl ScrollPhysics {
    /// Creates a resting state.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            velocity: Vec2::ZERO,
            last_timestamp: None,
        }
    }

    /// Tuning in effect.
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Current velocity in pixels per reference frame.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Adds to the velocity and clamps each component to `max_velocity`.
    ///
    /// An impulse applied from rest starts a new timing run, so the next
    /// [`ScrollPhysics::update`] only records its timestamp.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        if !impulse.is_finite() {
            return;
        }
        if !self.is_moving() {
            self.last_timestamp = None;
        }
        let max = self.config.max_velocity;
        self.velocity = Vec2::new(
            (self.velocity.x + impulse.x).clamp(-max, max),
            (self.velocity.y + impulse.y).clamp(-max, max),
        );
    }

    /// Advances to `timestamp_ms` and returns the displacement for the step.
    pub fn update(&mut self, timestamp_ms: f64) -> Vec2 {
        let Some(last) = self.last_timestamp.replace(timestamp_ms) else {
            return Vec2::ZERO;
        };
        let elapsed = ((timestamp_ms - last) / self.config.frame_ms).max(0.0);
        let decay = self.config.friction.powf(elapsed);
        let min = self.config.min_velocity;
        let damp = |v: f64| {
            let v = v * decay;
            if v.abs() < min { 0.0 } else { v }
        };
        self.velocity = Vec2::new(damp(self.velocity.x), damp(self.velocity.y));
        self.velocity * elapsed
    }

    /// Returns `true` while either component exceeds `min_velocity`.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        let min = self.config.min_velocity;
        self.velocity.x.abs() > min || self.velocity.y.abs() > min
    }

    /// Zeroes the velocity and resets timing.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.last_timestamp = None;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::{InvalidPhysics, PhysicsConfig, ScrollPhysics};

    #[test]
    fn impulse_is_clamped_per_component() {
        let mut p = ScrollPhysics::default();
        p.add_impulse(Vec2::new(80.0, -80.0));
        assert_eq!(p.velocity(), Vec2::new(50.0, -50.0));
        p.add_impulse(Vec2::new(-20.0, 0.0));
        assert_eq!(p.velocity(), Vec2::new(30.0, -50.0));
        p.add_impulse(Vec2::new(f64::NAN, 0.0));
        assert_eq!(p.velocity(), Vec2::new(30.0, -50.0));
    }

    #[test]
    fn first_update_starts_the_clock() {
        let mut p = ScrollPhysics::default();
        p.add_impulse(Vec2::new(10.0, 0.0));
        assert_eq!(p.update(500.0), Vec2::ZERO);
        assert_eq!(p.velocity(), Vec2::new(10.0, 0.0));
        let d = p.update(532.0);
        // Two frames: v = 10 * 0.92^2, displacement = v * 2.
        let v = 10.0 * 0.92 * 0.92;
        assert!((p.velocity().x - v).abs() < 1e-9);
        assert!((d.x - 2.0 * v).abs() < 1e-9);
    }

    #[test]
    fn small_components_snap_to_zero() {
        let mut p = ScrollPhysics::default();
        p.add_impulse(Vec2::new(10.0, 0.105));
        p.update(0.0);
        p.update(16.0);
        assert_eq!(p.velocity().y, 0.0);
        assert!(p.velocity().x > 0.0);
        assert!(p.is_moving());
    }

    #[test]
    fn stop_resets_velocity_and_timing() {
        let mut p = ScrollPhysics::default();
        p.add_impulse(Vec2::new(10.0, 10.0));
        p.update(0.0);
        p.stop();
        assert!(!p.is_moving());
        p.add_impulse(Vec2::new(5.0, 0.0));
        // Stale timestamps from before the stop are not reused.
        assert_eq!(p.update(10_000.0), Vec2::ZERO);
    }

    #[test]
    fn impulse_from_rest_restarts_timing() {
        let mut p = ScrollPhysics::default();
        p.add_impulse(Vec2::new(0.5, 0.0));
        p.update(0.0);
        // Decays below the threshold and stops on its own.
        let mut t = 0.0;
        while p.is_moving() {
            t += 16.0;
            p.update(t);
        }
        p.add_impulse(Vec2::new(5.0, 0.0));
        assert_eq!(p.update(t + 5_000.0), Vec2::ZERO);
    }

    #[test]
    fn friction_decay_stops_in_bounded_ticks() {
        let mut p = ScrollPhysics::default();
        p.add_impulse(Vec2::new(10.0, 0.0));
        p.update(0.0);
        let mut ticks = 0;
        let mut t = 0.0;
        while p.is_moving() {
            t += 16.0;
            let d = p.update(t);
            assert!(d.x >= 0.0);
            assert!(p.velocity().x >= 0.0);
            ticks += 1;
            assert!(ticks < 100, "momentum never settled");
        }
        // 10 * 0.92^n < 0.1 once n > ln(0.01) / ln(0.92), about 55.2.
        assert_eq!(ticks, 56);
    }

    #[test]
    fn validate_rejects_bad_tuning() {
        assert_eq!(PhysicsConfig::default().validate(), Ok(()));
        let bad = PhysicsConfig {
            friction: 1.0,
            ..PhysicsConfig::default()
        };
        assert_eq!(bad.validate(), Err(InvalidPhysics::Friction(1.0)));
        let bad = PhysicsConfig {
            min_velocity: 60.0,
            ..PhysicsConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(InvalidPhysics::VelocityLimits { .. })
        ));
        let bad = PhysicsConfig {
            frame_ms: 0.0,
            ..PhysicsConfig::default()
        };
        assert_eq!(bad.validate(), Err(InvalidPhysics::FrameDuration(0.0)));
    }
}
