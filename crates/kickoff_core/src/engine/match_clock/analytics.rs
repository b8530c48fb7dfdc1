//! Clock analytics
//!
//! Pure helpers over a [`TimeState`] snapshot, used by the host for commentary
//! pacing and AI difficulty. Nothing here mutates the clock.

use super::{MatchPhase, TimeState};
use crate::config::ClockConfig;

/// Last minutes of a half that count as "closing stages"
const CLOSING_MINUTES: f64 = 5.0;
/// Minutes over which intensity builds up to its plateau
const BUILD_UP_MINUTES: f64 = 30.0;

const STOPPAGE_PER_EVENT: f64 = 30.0;
const STOPPAGE_PER_INJURY: f64 = 60.0;

/// Displayed match minute (0..90+). 표시용 분 = match_time / (60 × time_scale)
pub fn match_minute(state: &TimeState, config: &ClockConfig) -> f64 {
    state.match_time / (60.0 * config.time_scale)
}

/// Minutes played in the current phase
fn phase_minute(state: &TimeState, config: &ClockConfig) -> f64 {
    state.phase_time / (60.0 * config.time_scale)
}

/// 0.0 (calm) ~ 1.0 (frantic)
///
/// Builds from 0.3 to 0.8 over the first half hour, +0.2 in the closing stages of
/// each half. Breaks are 0.0, the shootout is always 1.0.
pub fn match_intensity(state: &TimeState, config: &ClockConfig) -> f64 {
    let minute = match_minute(state, config);

    let closing = match state.phase {
        MatchPhase::HalfTime | MatchPhase::FullTime => return 0.0,
        MatchPhase::PenaltyShootout => return 1.0,
        MatchPhase::FirstHalf => minute >= config.half_length_minutes - CLOSING_MINUTES,
        MatchPhase::SecondHalf => minute >= 2.0 * config.half_length_minutes - CLOSING_MINUTES,
        MatchPhase::ExtraTime => {
            let into_half = phase_minute(state, config) % config.extra_time_half_minutes;
            into_half >= config.extra_time_half_minutes - CLOSING_MINUTES
        }
    };

    let build_up = (minute / BUILD_UP_MINUTES).min(1.0);
    let mut intensity = 0.3 + 0.5 * build_up;
    if closing {
        intensity += 0.2;
    }
    intensity.clamp(0.0, 1.0)
}

/// Suggested added time (simulated seconds)
pub fn estimate_stoppage_time(events: u32, injuries: u32) -> f64 {
    f64::from(events) * STOPPAGE_PER_EVENT + f64::from(injuries) * STOPPAGE_PER_INJURY
}

/// AI difficulty scaling by phase
pub fn difficulty_multiplier(phase: MatchPhase) -> f64 {
    match phase {
        MatchPhase::FirstHalf => 0.8,
        MatchPhase::SecondHalf => 1.0,
        MatchPhase::ExtraTime => 1.2,
        MatchPhase::PenaltyShootout => 1.5,
        MatchPhase::HalfTime | MatchPhase::FullTime => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_minute(phase: MatchPhase, minute: f64, phase_minute: f64) -> TimeState {
        let cfg = ClockConfig::default();
        let scale = 60.0 * cfg.time_scale;
        TimeState {
            phase,
            match_time: minute * scale,
            phase_time: phase_minute * scale,
            is_running: true,
            ..TimeState::default()
        }
    }

    #[test]
    fn test_match_minute_uses_time_scale() {
        let cfg = ClockConfig::default();
        let state = TimeState { match_time: 27_000.0, ..TimeState::default() };
        assert!((match_minute(&state, &cfg) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_builds_up() {
        let cfg = ClockConfig::default();
        let kickoff = match_intensity(&at_minute(MatchPhase::FirstHalf, 0.0, 0.0), &cfg);
        let mid = match_intensity(&at_minute(MatchPhase::FirstHalf, 15.0, 15.0), &cfg);
        let plateau = match_intensity(&at_minute(MatchPhase::FirstHalf, 35.0, 35.0), &cfg);

        assert!((kickoff - 0.3).abs() < 1e-9);
        assert!((mid - 0.55).abs() < 1e-9);
        assert!((plateau - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_closing_stages_bonus() {
        let cfg = ClockConfig::default();
        let first = match_intensity(&at_minute(MatchPhase::FirstHalf, 42.0, 42.0), &cfg);
        let second = match_intensity(&at_minute(MatchPhase::SecondHalf, 88.0, 43.0), &cfg);
        let extra = match_intensity(&at_minute(MatchPhase::ExtraTime, 118.0, 28.0), &cfg);

        assert!((first - 1.0).abs() < 1e-9);
        assert!((second - 1.0).abs() < 1e-9);
        assert!((extra - 1.0).abs() < 1e-9);

        let early_second = match_intensity(&at_minute(MatchPhase::SecondHalf, 60.0, 15.0), &cfg);
        assert!((early_second - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_breaks_and_shootout() {
        let cfg = ClockConfig::default();
        assert_eq!(match_intensity(&at_minute(MatchPhase::HalfTime, 45.0, 0.0), &cfg), 0.0);
        assert_eq!(match_intensity(&at_minute(MatchPhase::FullTime, 90.0, 0.0), &cfg), 0.0);
        assert_eq!(match_intensity(&at_minute(MatchPhase::PenaltyShootout, 120.0, 0.0), &cfg), 1.0);
    }

    #[test]
    fn test_intensity_is_bounded() {
        let cfg = ClockConfig::default();
        for minute in [0.0, 10.0, 44.9, 89.0, 200.0, 1e6] {
            let value = match_intensity(&at_minute(MatchPhase::SecondHalf, minute, minute), &cfg);
            assert!((0.0..=1.0).contains(&value), "minute {minute}: {value}");
        }
    }

    #[test]
    fn test_stoppage_estimate() {
        assert_eq!(estimate_stoppage_time(0, 0), 0.0);
        assert_eq!(estimate_stoppage_time(3, 1), 150.0);
    }

    #[test]
    fn test_difficulty_by_phase() {
        assert_eq!(difficulty_multiplier(MatchPhase::FirstHalf), 0.8);
        assert_eq!(difficulty_multiplier(MatchPhase::SecondHalf), 1.0);
        assert_eq!(difficulty_multiplier(MatchPhase::ExtraTime), 1.2);
        assert_eq!(difficulty_multiplier(MatchPhase::PenaltyShootout), 1.5);
        assert_eq!(difficulty_multiplier(MatchPhase::HalfTime), 1.0);
    }
}
