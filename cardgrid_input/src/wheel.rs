// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accelerated wheel and trackpad scrolling.

use kurbo::Vec2;

use crate::modifiers::Modifiers;

/// Acceleration tuning for [`WheelAdapter`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WheelConfig {
    /// Acceleration factor at the start of a burst.
    pub initial_acceleration: f64,
    /// Multiplier applied to the factor on every event.
    pub growth: f64,
    /// Upper bound on the factor.
    pub max_acceleration: f64,
    /// Quiet period after which a burst ends and the factor resets.
    pub reset_after_ms: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            initial_acceleration: 1.2,
            growth: 1.1,
            max_acceleration: 3.0,
            reset_after_ms: 150.0,
        }
    }
}

/// One wheel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Raw scroll delta in pixels.
    pub delta: Vec2,
    /// Modifiers held during the event.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time_ms: f64,
}

impl WheelEvent {
    /// Creates an event without modifiers.
    #[must_use]
    pub fn new(delta: Vec2, time_ms: f64) -> Self {
        Self {
            delta,
            modifiers: Modifiers::empty(),
            time_ms,
        }
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Turns wheel events into accelerated pan deltas.
///
/// Consecutive events within [`WheelConfig::reset_after_ms`] of each other
/// form a burst; each event in a burst grows the acceleration factor until it
/// reaches [`WheelConfig::max_acceleration`].
///
/// - Ctrl+wheel (trackpad pinch) grows the factor but produces no pan.
/// - Shift with a dominant vertical delta scrolls horizontally instead.
/// - Events with non-finite deltas are ignored entirely.
#[derive(Clone, Debug)]
pub struct WheelAdapter {
    config: WheelConfig,
    acceleration: f64,
    last_event_ms: Option<f64>,
    enabled: bool,
}

impl Default for WheelAdapter {
    fn default() -> Self {
        Self::new(WheelConfig::default())
    }
}

impl WheelAdapter {
    /// Creates an enabled adapter.
    #[must_use]
    pub fn new(config: WheelConfig) -> Self {
        Self {
            config,
            acceleration: config.initial_acceleration,
            last_event_ms: None,
            enabled: true,
        }
    }

    /// Acceleration factor applied to the most recent event.
    #[must_use]
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Returns `true` while events are processed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resumes processing events.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops processing events and ends the current burst.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.end_burst();
    }

    /// Processes one event, returning the pan delta if any.
    pub fn wheel(&mut self, event: WheelEvent) -> Option<Vec2> {
        if !self.enabled || !event.delta.is_finite() {
            return None;
        }
        if let Some(last) = self.last_event_ms
            && event.time_ms - last >= self.config.reset_after_ms
        {
            self.acceleration = self.config.initial_acceleration;
        }
        self.last_event_ms = Some(event.time_ms);
        self.acceleration =
            (self.acceleration * self.config.growth).min(self.config.max_acceleration);

        if event.modifiers.contains(Modifiers::CTRL) {
            return None;
        }

        let delta = event.delta * self.acceleration;
        if event.modifiers.contains(Modifiers::SHIFT) && delta.y.abs() > delta.x.abs() {
            Some(Vec2::new(delta.y, 0.0))
        } else {
            Some(delta)
        }
    }

    fn end_burst(&mut self) {
        self.acceleration = self.config.initial_acceleration;
        self.last_event_ms = None;
    }
}
