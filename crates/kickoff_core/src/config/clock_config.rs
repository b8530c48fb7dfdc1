//! Match Clock Configuration

use crate::error::{ConfigError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Match clock 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClockConfig {
    /// Simulated seconds per real second (기본: 10.0)
    pub time_scale: f64,
    /// Regulation half length in minutes (기본: 45)
    pub half_length_minutes: f64,
    /// Extra-time half length in minutes (기본: 15)
    pub extra_time_half_minutes: f64,
    /// Host tick rate used by the fixed-step driver (기본: 60)
    pub tick_hz: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { time_scale: 10.0, half_length_minutes: 45.0, extra_time_half_minutes: 15.0, tick_hz: 60 }
    }
}

impl ClockConfig {
    /// First half ends once `match_time` reaches this (simulated seconds).
    ///
    /// Thresholds carry the time scale factor: 45 × 60 × time_scale.
    pub fn first_half_end(&self) -> f64 {
        self.half_length_minutes * 60.0 * self.time_scale
    }

    /// Regulation ends once `match_time` reaches this (simulated seconds).
    pub fn regulation_end(&self) -> f64 {
        2.0 * self.first_half_end()
    }

    /// Extra time ends once `phase_time` reaches this (two extra halves).
    pub fn extra_time_end(&self) -> f64 {
        2.0 * self.extra_time_half_minutes * 60.0 * self.time_scale
    }

    /// Fixed tick length in real seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }

    pub fn validate(&self) -> Result<()> {
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "clock.time_scale",
                value: self.time_scale,
                reason: "must be finite and > 0",
            });
        }
        if !self.half_length_minutes.is_finite() || self.half_length_minutes <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "clock.half_length_minutes",
                value: self.half_length_minutes,
                reason: "must be finite and > 0",
            });
        }
        if !self.extra_time_half_minutes.is_finite() || self.extra_time_half_minutes <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "clock.extra_time_half_minutes",
                value: self.extra_time_half_minutes,
                reason: "must be finite and > 0",
            });
        }
        if self.tick_hz == 0 {
            return Err(ConfigError::InvalidValue {
                field: "clock.tick_hz",
                value: 0.0,
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}
