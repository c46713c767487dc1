// Copyright 2025 the CardGrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration and validation.

use cardgrid_input::{KeyboardConfig, WheelConfig};
use cardgrid_layout::SpiralConfig;
use cardgrid_motion::{InvalidPhysics, PhysicsConfig};
use cardgrid_view::{ElasticConfig, GridGeometry, InvalidGeometry};

/// Input adapter settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Wheel acceleration.
    pub wheel: WheelConfig,
    /// Held-key panning speed.
    pub keyboard: KeyboardConfig,
    /// Whether keyboard panning and focus are active.
    pub keyboard_enabled: bool,
    /// Whether two-finger pinches produce [`GridEvent::Zoom`](crate::GridEvent::Zoom).
    pub report_zoom: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel: WheelConfig::default(),
            keyboard: KeyboardConfig::default(),
            keyboard_enabled: true,
            report_zoom: false,
        }
    }
}

/// Everything a [`Grid`](crate::Grid) needs to know up front.
///
/// Immutable once the grid is built.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Cell pitch, origin and window padding.
    pub geometry: GridGeometry,
    /// Rubber-band resistance past the content edges.
    pub elastic: ElasticConfig,
    /// Momentum decay.
    pub physics: PhysicsConfig,
    /// Input adapters.
    pub input: InputConfig,
    /// Spiral placement around the reserved cluster.
    pub spiral: SpiralConfig,
    /// Duration of animated navigation in milliseconds.
    pub navigation_ms: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::default(),
            elastic: ElasticConfig::default(),
            physics: PhysicsConfig::default(),
            input: InputConfig::default(),
            spiral: SpiralConfig::default(),
            navigation_ms: cardgrid_motion::PanTween::DEFAULT_DURATION_MS,
        }
    }
}

/// Reasons a [`GridConfig`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Cell size, gap or origin is unusable.
    #[error(transparent)]
    Geometry(#[from] InvalidGeometry),
    /// Momentum settings are unusable.
    #[error(transparent)]
    Physics(#[from] InvalidPhysics),
    /// An elastic setting is negative or not finite.
    #[error("elastic {field} must be finite and non-negative, got {value}")]
    Elastic {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: f64,
    },
    /// A wheel or keyboard speed is negative or not finite.
    #[error("input {field} must be finite and non-negative, got {value}")]
    Input {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: f64,
    },
    /// The inner spiral radius lies beyond the outer one.
    #[error("spiral inner radius {inner} exceeds max radius {max}")]
    SpiralRadius {
        /// Configured inner radius.
        inner: u32,
        /// Configured max radius.
        max: u32,
    },
    /// Navigation duration must be finite and non-negative.
    #[error("navigation duration must be finite and non-negative, got {0} ms")]
    NavigationDuration(f64),
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl GridConfig {
    /// Checks every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.physics.validate()?;

        let e = &self.elastic;
        for (field, value) in [
            ("limit", e.limit),
            ("soft_factor", e.soft_factor),
            ("hard_factor", e.hard_factor),
            ("restoring_factor", e.restoring_factor),
        ] {
            if !non_negative(value) {
                return Err(ConfigError::Elastic { field, value });
            }
        }

        let w = &self.input.wheel;
        let k = &self.input.keyboard;
        for (field, value) in [
            ("wheel.initial_acceleration", w.initial_acceleration),
            ("wheel.growth", w.growth),
            ("wheel.max_acceleration", w.max_acceleration),
            ("wheel.reset_after_ms", w.reset_after_ms),
            ("keyboard.step", k.step),
            ("keyboard.page_multiplier", k.page_multiplier),
        ] {
            if !non_negative(value) {
                return Err(ConfigError::Input { field, value });
            }
        }

        if self.spiral.inner_radius > self.spiral.max_radius {
            return Err(ConfigError::SpiralRadius {
                inner: self.spiral.inner_radius,
                max: self.spiral.max_radius,
            });
        }
        if !non_negative(self.navigation_ms) {
            return Err(ConfigError::NavigationDuration(self.navigation_ms));
        }
        Ok(())
    }
}
