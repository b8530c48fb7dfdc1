//! Match Clock
//!
//! Scaled simulated time + phase state machine.
//!
//! The clock never schedules itself: the host calls [`MatchClock::advance`] once per
//! fixed tick with the real elapsed seconds. 시뮬레이션 시간 = 실제 시간 × time_scale.
//!
//! ```text
//! advance(dt) ─→ accumulate ─→ Tick listeners ─→ timed transition? ─→ PhaseChanged listeners
//!                                                        │
//!                                                        └→ auto-pause (is_running = false)
//! ```

pub mod analytics;
mod listeners;
mod phase;
mod time_state;

pub use listeners::{ClockEvent, Listener, ListenerContext, ListenerHandle};
pub use phase::{timed_transition, MatchPhase};
pub use time_state::TimeState;

use crate::config::ClockConfig;
use crate::error::ClockError;
use listeners::ListenerRegistry;
use std::fmt;

/// Owns the authoritative [`TimeState`] for one match.
pub struct MatchClock {
    config: ClockConfig,
    state: TimeState,
    listeners: ListenerRegistry,
}

impl fmt::Debug for MatchClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchClock")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

impl MatchClock {
    pub fn new(config: ClockConfig) -> Self {
        Self { config, state: TimeState::default(), listeners: ListenerRegistry::default() }
    }

    /// Resume from a previously captured snapshot (replays, save states).
    pub fn from_snapshot(config: ClockConfig, state: TimeState) -> Self {
        Self { config, state, listeners: ListenerRegistry::default() }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> TimeState {
        self.state
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    // ========== Timer control ==========

    /// Arm the clock. Calling it on a running clock changes nothing.
    pub fn start_timer(&mut self) {
        if self.state.is_running {
            return;
        }
        self.state.is_running = true;
        self.state.is_paused = false;
        tracing::debug!(phase = self.state.phase.label(), "match clock started");
    }

    pub fn stop_timer(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        tracing::debug!(match_time = self.state.match_time, "match clock stopped");
    }

    /// Freeze accumulation without disarming the clock.
    pub fn pause_timer(&mut self) {
        self.state.is_paused = true;
    }

    pub fn resume_timer(&mut self) {
        self.state.is_paused = false;
    }

    /// One host tick. Returns the phase entered by a timed transition, if any.
    ///
    /// Negative or non-finite `real_dt` counts as zero.
    pub fn advance(&mut self, real_dt: f32) -> Option<MatchPhase> {
        if !self.state.is_accumulating() {
            return None;
        }

        let real_dt = if real_dt.is_finite() && real_dt > 0.0 { f64::from(real_dt) } else { 0.0 };
        let scaled = real_dt * self.config.time_scale;

        self.state.match_time += scaled;
        self.state.phase_time += scaled;
        self.state.elapsed_real_time += real_dt;

        let mut stop_requested =
            self.listeners.dispatch(&ClockEvent::Tick(self.state)).stop_requested;

        let entered = timed_transition(&self.state, &self.config);
        if let Some(next) = entered {
            let from = self.state.phase;
            self.state.phase = next;
            self.state.is_running = false;
            tracing::info!(
                from = from.label(),
                to = next.label(),
                match_time = self.state.match_time,
                "phase transition"
            );
            stop_requested |= self.notify_phase_change(from, next);
        }

        if stop_requested {
            self.stop_timer();
        }
        entered
    }

    // ========== Administrative transitions ==========

    pub fn proceed_to_second_half(&mut self) -> Result<(), ClockError> {
        self.enter_phase(MatchPhase::SecondHalf, true)
    }

    pub fn proceed_to_extra_time(&mut self) -> Result<(), ClockError> {
        self.enter_phase(MatchPhase::ExtraTime, true)
    }

    /// Shootout is untimed: the clock stops for good.
    pub fn proceed_to_penalties(&mut self) -> Result<(), ClockError> {
        self.enter_phase(MatchPhase::PenaltyShootout, false)
    }

    fn enter_phase(&mut self, next: MatchPhase, run: bool) -> Result<(), ClockError> {
        let from = self.state.phase;
        if !self.state.can_proceed_to(next) {
            tracing::warn!(from = from.label(), to = next.label(), "rejected phase transition");
            return Err(ClockError::InvalidPhaseTransition { from, to: next });
        }

        self.state.phase = next;
        self.state.phase_time = 0.0;
        if next == MatchPhase::ExtraTime {
            self.state.extra_time_played = true;
        }
        if run {
            self.start_timer();
        } else {
            self.stop_timer();
        }
        tracing::info!(from = from.label(), to = next.label(), "phase transition");

        // listeners see the clock already restarted (or stopped) and may still stop it
        if self.notify_phase_change(from, next) {
            self.stop_timer();
        }
        Ok(())
    }

    fn notify_phase_change(&mut self, from: MatchPhase, to: MatchPhase) -> bool {
        let event = ClockEvent::PhaseChanged { from, to, state: self.state };
        self.listeners.dispatch(&event).stop_requested
    }

    // ========== Stoppage ==========

    /// Non-finite or non-positive amounts are ignored.
    pub fn add_stoppage_time(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.state.stoppage += seconds;
        }
    }

    pub fn total_match_duration(&self) -> f64 {
        self.state.total_match_duration()
    }

    pub fn is_match_finished(&self) -> bool {
        self.state.is_match_finished()
    }

    // ========== Observers ==========

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: FnMut(&ClockEvent, &mut ListenerContext) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// `false` if the handle was already removed
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.unsubscribe(handle)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Back to kickoff; listeners stay subscribed.
    pub fn reset(&mut self) {
        self.state = TimeState::default();
    }
}
