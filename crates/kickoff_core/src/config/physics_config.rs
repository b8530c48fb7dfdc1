//! Ball Physics Configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Simulation fidelity tier.
///
/// `Low` halves the Magnus coefficient for constrained devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimulationQuality {
    #[default]
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Magnus model fidelity (기본: high)
    pub quality: SimulationQuality,
}
