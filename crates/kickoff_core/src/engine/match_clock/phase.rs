//! Match phase state machine.
//!
//! ```text
//! FirstHalf → HalfTime → SecondHalf → FullTime ─┬→ ExtraTime → FullTime → PenaltyShootout
//!                                                └→ PenaltyShootout
//! ```
//!
//! Extra time is played at most once (`TimeState::extra_time_played`).
//!
//! Timed transitions (end of a half) happen inside `MatchClock::advance`; the rest
//! are administrative `proceed_to_*` commands issued by the host.

use super::time_state::TimeState;
use crate::config::ClockConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    #[default]
    FirstHalf,
    HalfTime,
    SecondHalf,
    /// Regulation (or extra time) is over; the host decides what comes next
    FullTime,
    ExtraTime,
    PenaltyShootout,
}

impl MatchPhase {
    /// Phases in which the clock is expected to run
    pub fn is_timed(&self) -> bool {
        matches!(self, MatchPhase::FirstHalf | MatchPhase::SecondHalf | MatchPhase::ExtraTime)
    }

    pub fn is_break(&self) -> bool {
        matches!(self, MatchPhase::HalfTime | MatchPhase::FullTime)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchPhase::FirstHalf => "first-half",
            MatchPhase::HalfTime => "half-time",
            MatchPhase::SecondHalf => "second-half",
            MatchPhase::FullTime => "full-time",
            MatchPhase::ExtraTime => "extra-time",
            MatchPhase::PenaltyShootout => "penalty",
        }
    }

    /// Administrative transitions the host may request.
    pub fn can_proceed_to(&self, next: MatchPhase) -> bool {
        matches!(
            (self, next),
            (MatchPhase::HalfTime, MatchPhase::SecondHalf)
                | (MatchPhase::FullTime, MatchPhase::ExtraTime)
                | (MatchPhase::FullTime, MatchPhase::PenaltyShootout)
                | (MatchPhase::ExtraTime, MatchPhase::PenaltyShootout)
        )
    }
}

/// Timed transition due at the end of the current phase, if any.
///
/// Thresholds are in simulated seconds and carry the time scale factor
/// (first half: 45 × 60 × time_scale on `match_time`).
pub fn timed_transition(state: &TimeState, config: &ClockConfig) -> Option<MatchPhase> {
    match state.phase {
        MatchPhase::FirstHalf if state.match_time >= config.first_half_end() => {
            Some(MatchPhase::HalfTime)
        }
        MatchPhase::SecondHalf if state.match_time >= config.regulation_end() => {
            Some(MatchPhase::FullTime)
        }
        MatchPhase::ExtraTime if state.phase_time >= config.extra_time_end() => {
            Some(MatchPhase::FullTime)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(phase: MatchPhase, match_time: f64, phase_time: f64) -> TimeState {
        TimeState { phase, match_time, phase_time, ..TimeState::default() }
    }

    #[test]
    fn test_first_half_ends_at_threshold() {
        let cfg = ClockConfig::default();
        assert_eq!(timed_transition(&state(MatchPhase::FirstHalf, 26_999.9, 0.0), &cfg), None);
        assert_eq!(
            timed_transition(&state(MatchPhase::FirstHalf, 27_000.0, 0.0), &cfg),
            Some(MatchPhase::HalfTime)
        );
    }

    #[test]
    fn test_second_half_ends_in_full_time() {
        let cfg = ClockConfig::default();
        assert_eq!(
            timed_transition(&state(MatchPhase::SecondHalf, 54_000.0, 27_000.0), &cfg),
            Some(MatchPhase::FullTime)
        );
    }

    #[test]
    fn test_extra_time_uses_phase_time() {
        let cfg = ClockConfig::default();
        // match_time way past regulation does not matter for extra time
        assert_eq!(timed_transition(&state(MatchPhase::ExtraTime, 70_000.0, 17_999.0), &cfg), None);
        assert_eq!(
            timed_transition(&state(MatchPhase::ExtraTime, 72_000.0, 18_000.0), &cfg),
            Some(MatchPhase::FullTime)
        );
    }

    #[test]
    fn test_breaks_never_time_out() {
        let cfg = ClockConfig::default();
        for phase in [MatchPhase::HalfTime, MatchPhase::FullTime, MatchPhase::PenaltyShootout] {
            assert_eq!(timed_transition(&state(phase, 1e9, 1e9), &cfg), None);
        }
    }

    #[test]
    fn test_administrative_transitions() {
        assert!(MatchPhase::HalfTime.can_proceed_to(MatchPhase::SecondHalf));
        assert!(MatchPhase::FullTime.can_proceed_to(MatchPhase::ExtraTime));
        assert!(MatchPhase::FullTime.can_proceed_to(MatchPhase::PenaltyShootout));
        assert!(MatchPhase::ExtraTime.can_proceed_to(MatchPhase::PenaltyShootout));

        assert!(!MatchPhase::FirstHalf.can_proceed_to(MatchPhase::SecondHalf));
        assert!(!MatchPhase::SecondHalf.can_proceed_to(MatchPhase::ExtraTime));
        assert!(!MatchPhase::PenaltyShootout.can_proceed_to(MatchPhase::ExtraTime));
    }

    #[test]
    fn test_labels() {
        assert_eq!(MatchPhase::PenaltyShootout.label(), "penalty");
        assert_eq!(MatchPhase::default(), MatchPhase::FirstHalf);
        assert!(MatchPhase::ExtraTime.is_timed());
        assert!(MatchPhase::FullTime.is_break());
    }
}
