//! # Simulation Configuration
//!
//! 모든 튜닝 파라미터를 한 곳에서 관리하는 설정 시스템.
//!
//! ## 목적
//! - Host loop / CLI / tests share one config surface
//! - Presets (Arcade, Realistic, LowEnd)
//! - YAML or JSON files, validated on load
//!
//! ## 사용법
//! ```rust
//! use kickoff_core::config::SimConfig;
//!
//! let config = SimConfig::default();
//! let low_end = SimConfig::low_end();
//! assert!(config.validate().is_ok());
//! assert!(low_end.clock.time_scale > 0.0);
//! ```

mod clock_config;
mod physics_config;

pub use clock_config::ClockConfig;
pub use physics_config::{PhysicsConfig, SimulationQuality};

use crate::error::{ConfigError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Match clock + ball physics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SimConfig {
    /// Match clock (time scale, phase lengths, tick rate)
    #[serde(default)]
    pub clock: ClockConfig,
    /// Ball physics fidelity
    #[serde(default)]
    pub physics: PhysicsConfig,
}

impl SimConfig {
    /// 아케이드 스타일 (기본): 10x time compression, full physics
    pub fn arcade() -> Self {
        Self::default()
    }

    /// Unscaled clock: `match_time` advances 1:1 with real time.
    ///
    /// Phase thresholds and the displayed match minute both divide out
    /// `time_scale`, so a half still takes the same real time and shows the same
    /// minute as `arcade`. Only the raw `match_time` / `phase_time` numbers (and
    /// stoppage seconds added against them) differ.
    pub fn realistic() -> Self {
        let mut cfg = Self::default();
        cfg.clock.time_scale = 1.0;
        cfg
    }

    /// Constrained devices: cheaper Magnus model, 30 Hz ticks
    pub fn low_end() -> Self {
        let mut cfg = Self::default();
        cfg.physics.quality = SimulationQuality::Low;
        cfg.clock.tick_hz = 30;
        cfg
    }

    /// Look up a preset by name (`arcade`, `realistic`, `low_end`)
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "arcade" => Some(Self::arcade()),
            "realistic" => Some(Self::realistic()),
            "low_end" | "low-end" => Some(Self::low_end()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.clock.validate()
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.yaml` / `.yml` / `.json` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let extension =
            path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_ascii_lowercase();

        let cfg = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat { extension }),
        };

        tracing::debug!(path = %path.display(), time_scale = cfg.clock.time_scale, "loaded sim config");
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// JSON Schema for editor tooling
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SimConfig)
    }
}

// ========== Tests ==========
