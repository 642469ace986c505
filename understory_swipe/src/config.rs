// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for gesture capture and release.

use core::fmt;

/// Horizontal travel, in logical pixels, before an unclaimed pointer is
/// treated as a drag.
pub const DEFAULT_TOUCH_SLOP: f64 = 8.0;

/// Release speeds below this, in logical pixels per second, count as zero.
pub const DEFAULT_MIN_FLING_VELOCITY: f64 = 400.0;

/// Release speeds are clamped to this, in logical pixels per second.
pub const DEFAULT_MAX_FLING_VELOCITY: f64 = 8_000.0;

/// Capture and release thresholds for a [`crate::DragArbiter`].
///
/// Values are in logical pixels; use [`ArbiterConfig::with_density`] to
/// scale them for a display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArbiterConfig {
    /// Horizontal travel before an unclaimed pointer is captured.
    pub touch_slop: f64,
    /// Minimum release speed; slower releases report zero velocity.
    pub min_fling_velocity: f64,
    /// Maximum release speed.
    pub max_fling_velocity: f64,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbiterConfig {
    /// Creates a configuration with the default thresholds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
        }
    }

    /// Sets the touch slop.
    #[must_use]
    pub const fn with_touch_slop(mut self, touch_slop: f64) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    /// Sets the minimum fling velocity.
    #[must_use]
    pub const fn with_min_fling_velocity(mut self, velocity: f64) -> Self {
        self.min_fling_velocity = velocity;
        self
    }

    /// Sets the maximum fling velocity.
    #[must_use]
    pub const fn with_max_fling_velocity(mut self, velocity: f64) -> Self {
        self.max_fling_velocity = velocity;
        self
    }

    /// Scales every threshold by a display density (physical pixels per
    /// logical pixel).
    #[must_use]
    pub fn with_density(self, density: f64) -> Self {
        Self {
            touch_slop: self.touch_slop * density,
            min_fling_velocity: self.min_fling_velocity * density,
            max_fling_velocity: self.max_fling_velocity * density,
        }
    }

    /// Checks that every threshold is finite and non-negative and that the
    /// velocity range is ordered.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(self) -> Result<Self, ConfigError> {
        check("touch_slop", self.touch_slop)?;
        check("min_fling_velocity", self.min_fling_velocity)?;
        check("max_fling_velocity", self.max_fling_velocity)?;
        if self.min_fling_velocity > self.max_fling_velocity {
            return Err(ConfigError::VelocityRange {
                min: self.min_fling_velocity,
                max: self.max_fling_velocity,
            });
        }
        Ok(self)
    }
}

fn check(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        Err(ConfigError::NonFinite { field })
    } else if value < 0.0 {
        Err(ConfigError::Negative { field, value })
    } else {
        Ok(())
    }
}

/// Error returned when an [`ArbiterConfig`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A threshold is NaN or infinite.
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A threshold is negative.
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The minimum fling velocity exceeds the maximum.
    VelocityRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "`{field}` must be finite"),
            Self::Negative { field, value } => {
                write!(f, "`{field}` must not be negative (got {value})")
            }
            Self::VelocityRange { min, max } => write!(
                f,
                "minimum fling velocity {min} exceeds maximum fling velocity {max}"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
