//! Goalkeeper animation
//!
//! GK reaction = dive clip picked from the shot's lateral velocity + a reaction
//! delay that grows for fast wide or high shots.

use super::{AnimationState, AnimationStateMachine};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Lateral input inside this band is a punch, not a dive
pub const DIVE_DEAD_ZONE: f32 = 0.3;

pub const BASE_REACTION_DELAY: f32 = 0.3;
/// |vx| above this slows the reaction (wide shot)
pub const WIDE_SHOT_SPEED: f32 = 2.0;
pub const WIDE_SHOT_FACTOR: f32 = 1.2;
/// |vy| above this slows the reaction (rising / dipping shot)
pub const HIGH_SHOT_SPEED: f32 = 1.5;
pub const HIGH_SHOT_FACTOR: f32 = 1.1;

/// Dive clip for a lateral direction (negative = keeper's left)
pub fn gk_dive_animation(direction: f32) -> AnimationState {
    if direction < -DIVE_DEAD_ZONE {
        AnimationState::GkDiveLeft
    } else if direction > DIVE_DEAD_ZONE {
        AnimationState::GkDiveRight
    } else {
        AnimationState::GkPunch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiveReaction {
    pub animation: AnimationState,
    /// Seconds before the keeper starts moving
    pub reaction_delay: f32,
}

/// Wraps a player FSM that starts in `GkIdle`.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalkeeperAnimationController {
    machine: AnimationStateMachine,
}

impl Default for GoalkeeperAnimationController {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalkeeperAnimationController {
    pub fn new() -> Self {
        Self { machine: AnimationStateMachine::with_state(AnimationState::GkIdle) }
    }

    pub fn machine(&self) -> &AnimationStateMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut AnimationStateMachine {
        &mut self.machine
    }

    /// Pure: which clip and how late. 비선형 없음, 곱셈 보정만.
    pub fn calculate_dive_reaction(&self, shot_velocity: &Vector3<f32>) -> DiveReaction {
        let vx = if shot_velocity.x.is_finite() { shot_velocity.x } else { 0.0 };
        let vy = if shot_velocity.y.is_finite() { shot_velocity.y } else { 0.0 };

        let mut reaction_delay = BASE_REACTION_DELAY;
        if vx.abs() > WIDE_SHOT_SPEED {
            reaction_delay *= WIDE_SHOT_FACTOR;
        }
        if vy.abs() > HIGH_SHOT_SPEED {
            reaction_delay *= HIGH_SHOT_FACTOR;
        }

        DiveReaction { animation: gk_dive_animation(vx), reaction_delay }
    }

    /// Compute the reaction and start the clip. Returns `None` if the keeper is
    /// not in a state that can dive (already diving, on the floor...).
    pub fn react_to_shot(&mut self, shot_velocity: &Vector3<f32>) -> Option<DiveReaction> {
        let reaction = self.calculate_dive_reaction(shot_velocity);
        if self.machine.transition_to(reaction.animation) {
            Some(reaction)
        } else {
            None
        }
    }

    /// Back to the ready stance, regardless of the current clip
    pub fn reset(&mut self) {
        self.machine.force_state_change(AnimationState::GkIdle);
    }
}
