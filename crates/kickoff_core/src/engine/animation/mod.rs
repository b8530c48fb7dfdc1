//! Player Animation State Machine
//!
//! 선수 애니메이션 FSM: allow-list gated transitions + blend tree output.
//!
//! The machine keeps its own clock, advanced by the `dt` handed to
//! [`AnimationStateMachine::update_animation`]; it never reads wall time.
//! Critical states (shoot, tackle, fall, celebrate, GK dives) always play out in
//! full, then settle into their exit state.

mod celebration;
mod goalkeeper;
mod state;

pub use celebration::{CelebrationAnimationController, CelebrationType};
pub use goalkeeper::{gk_dive_animation, DiveReaction, GoalkeeperAnimationController};
pub use state::AnimationState;

use crate::engine::coordinates::sanitize_dt;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Held-shoot time for full power (s)
pub const POWER_RAMP_SECONDS: f32 = 0.5;
/// Per-axis stick deflection above which the player runs
pub const RUN_THRESHOLD: f32 = 0.5;
/// Stick deflection treated as no input
const INPUT_DEAD_ZONE: f32 = 1e-3;

/// Per-tick player intent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationInput {
    /// Stick direction, x = strafe, y = forward (each -1..1)
    pub move_input: Vector2<f32>,
    pub sprinting: bool,
    pub shoot_pressed: bool,
    pub ball_near: bool,
    /// Normalized movement speed (0..1)
    pub speed: f32,
}

impl Default for AnimationInput {
    fn default() -> Self {
        Self {
            move_input: Vector2::zeros(),
            sprinting: false,
            shoot_pressed: false,
            ball_near: false,
            speed: 0.0,
        }
    }
}

impl AnimationInput {
    pub fn has_movement(&self) -> bool {
        self.move_input.x.abs() > INPUT_DEAD_ZONE || self.move_input.y.abs() > INPUT_DEAD_ZONE
    }
}

/// Blend parameters handed to the renderer each tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlendTree {
    pub state: AnimationState,
    /// 0..1
    pub speed: f32,
    /// Stick angle, atan2(y, x) in radians
    pub direction: f32,
    /// Shot charge 0..1
    pub power: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStateMachine {
    current: AnimationState,
    /// Machine clock (s)
    clock: f32,
    entered_at: f32,
    shoot_held: f32,
    blend: BlendTree,
}

impl Default for AnimationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationStateMachine {
    pub fn new() -> Self {
        Self::with_state(AnimationState::Idle)
    }

    pub fn with_state(state: AnimationState) -> Self {
        Self {
            current: state,
            clock: 0.0,
            entered_at: 0.0,
            shoot_held: 0.0,
            blend: BlendTree { state, ..BlendTree::default() },
        }
    }

    pub fn current_state(&self) -> AnimationState {
        self.current
    }

    /// Seconds since the current state was entered
    pub fn time_in_state(&self) -> f32 {
        self.clock - self.entered_at
    }

    /// Last blend tree produced by `update_animation`
    pub fn blend_tree(&self) -> &BlendTree {
        &self.blend
    }

    pub fn can_transition_to(&self, target: AnimationState) -> bool {
        self.current.can_transition_to(target)
    }

    /// Gated transition. `false` leaves the machine untouched.
    pub fn transition_to(&mut self, target: AnimationState) -> bool {
        if !self.current.can_transition_to(target) {
            tracing::trace!(from = self.current.name(), to = target.name(), "transition rejected");
            return false;
        }
        self.enter(target);
        true
    }

    /// Bypass the allow-list (cutscenes, resets, GK setup)
    pub fn force_state_change(&mut self, target: AnimationState) {
        self.enter(target);
    }

    fn enter(&mut self, target: AnimationState) {
        tracing::debug!(from = self.current.name(), to = target.name(), "animation transition");
        self.current = target;
        self.entered_at = self.clock;
        self.blend.state = target;
    }

    /// Advance by `dt` and pick the next state once the current clip has played.
    pub fn update_animation(&mut self, input: &AnimationInput, dt: f32) -> BlendTree {
        let dt = sanitize_dt(dt);
        self.clock += dt;

        if input.shoot_pressed {
            self.shoot_held += dt;
        } else {
            self.shoot_held = 0.0;
        }

        if self.time_in_state() >= self.current.duration() {
            if self.current.is_critical() {
                if let Some(exit) = self.current.exit_state() {
                    self.transition_to(exit);
                }
            } else {
                self.select_next(input);
            }
        }

        let speed = if input.speed.is_finite() { input.speed.clamp(0.0, 1.0) } else { 0.0 };
        let direction = if input.has_movement() {
            input.move_input.y.atan2(input.move_input.x)
        } else {
            0.0
        };
        self.blend = BlendTree {
            state: self.current,
            speed,
            direction,
            power: (self.shoot_held / POWER_RAMP_SECONDS).min(1.0),
        };
        self.blend
    }

    fn select_next(&mut self, input: &AnimationInput) {
        let desired = desired_state(self.current, input);
        if desired == self.current {
            return;
        }
        if !self.transition_to(desired)
            && desired.is_locomotion()
            && self.current != AnimationState::Jog
        {
            self.transition_to(AnimationState::Jog);
        }
    }
}

/// Input-driven selection, highest priority first:
/// shoot near the ball, no input, sprint, run, jog.
pub fn desired_state(current: AnimationState, input: &AnimationInput) -> AnimationState {
    if input.shoot_pressed && input.ball_near {
        return AnimationState::Shoot;
    }
    if !input.has_movement() {
        return if current == AnimationState::Celebrate {
            AnimationState::Celebrate
        } else {
            AnimationState::Idle
        };
    }
    if input.sprinting {
        return AnimationState::Sprint;
    }
    if input.move_input.x.abs() > RUN_THRESHOLD || input.move_input.y.abs() > RUN_THRESHOLD {
        return AnimationState::Run;
    }
    AnimationState::Jog
}
