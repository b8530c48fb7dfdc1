use crate::engine::match_clock::MatchPhase;
use thiserror::Error;

/// Errors raised while loading or validating a [`crate::SimConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue { field: &'static str, value: f64, reason: &'static str },
}

/// Errors raised by administrative match clock operations.
///
/// Ticking never fails; only out-of-order phase commands are rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidPhaseTransition { from: MatchPhase, to: MatchPhase },
}

impl ClockError {
    /// Host may retry once the clock reaches the right phase.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClockError::InvalidPhaseTransition { .. } => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
