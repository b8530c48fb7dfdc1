/// timestep.rs
/// Fixed-step tick driver
///
/// The host render loop hands us variable frame deltas; the simulation consumes
/// fixed 60 Hz ticks. Ticks are strictly sequential: the driver only reports how many
/// to run, the host runs them in order on its own stack.

/// Nominal simulation tick (60 Hz)
pub const TICK_DT: f32 = 1.0 / 60.0;

/// Nominal tick interval in milliseconds (~16ms cadence)
pub const TICK_MS: f32 = TICK_DT * 1000.0;

/// Max ticks run for a single frame; anything beyond is dropped
pub const MAX_CATCH_UP_TICKS: usize = 8;

// Compile-time validation
const _: () = assert!(MAX_CATCH_UP_TICKS > 0);

/// Accumulates real frame time into whole fixed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    total_ticks: u64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK_DT)
    }
}

impl FixedTimestep {
    /// Non-positive or non-finite steps fall back to [`TICK_DT`].
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 { step } else { TICK_DT };
        Self { step, accumulator: 0.0, total_ticks: 0 }
    }

    /// Fixed tick length (s)
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Ticks handed out so far
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Feed one frame's real elapsed time, get the number of ticks to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> usize {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_CATCH_UP_TICKS {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if self.accumulator >= self.step {
            // Spiral-of-death guard: drop the backlog instead of running it later
            let dropped = (self.accumulator / self.step) as u64;
            tracing::debug!(dropped, "fixed timestep backlog dropped");
            self.accumulator %= self.step;
        }

        self.total_ticks += ticks as u64;
        ticks
    }

    /// Interpolation fraction between the last tick and the next (0..1)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.total_ticks = 0;
    }
}
