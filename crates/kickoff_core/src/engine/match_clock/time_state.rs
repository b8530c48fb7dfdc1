use super::phase::MatchPhase;
use serde::{Deserialize, Serialize};

/// Snapshot of the match clock.
///
/// Owned by `MatchClock`; readers always get a copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TimeState {
    /// Simulated seconds elapsed
    pub match_time: f64,
    /// Real seconds the clock has been accumulating
    pub elapsed_real_time: f64,
    pub is_running: bool,
    pub is_paused: bool,
    pub phase: MatchPhase,
    /// Simulated seconds within the current phase
    pub phase_time: f64,
    /// Added time (simulated seconds); reported only, never moves phase thresholds
    pub stoppage: f64,
    /// Extra time has been entered once; only penalties can follow
    #[serde(default)]
    pub extra_time_played: bool,
}

impl TimeState {
    /// Match time including added stoppage
    pub fn total_match_duration(&self) -> f64 {
        self.match_time + self.stoppage
    }

    pub fn is_match_finished(&self) -> bool {
        !self.is_running
            && matches!(self.phase, MatchPhase::FullTime | MatchPhase::PenaltyShootout)
    }

    /// Administrative transition check on top of [`MatchPhase::can_proceed_to`].
    pub fn can_proceed_to(&self, next: MatchPhase) -> bool {
        if next == MatchPhase::ExtraTime && self.extra_time_played {
            return false;
        }
        self.phase.can_proceed_to(next)
    }

    /// Running and not paused
    pub fn is_accumulating(&self) -> bool {
        self.is_running && !self.is_paused
    }
}
