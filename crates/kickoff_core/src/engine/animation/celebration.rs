use super::AnimationState;
use serde::{Deserialize, Serialize};

/// Goal celebrations, each with a fixed clip length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationType {
    FistPump,
    PointToCrowd,
    KneeSlide,
    Airplane,
    Backflip,
    Dance,
    TeamHuddle,
}

impl CelebrationType {
    /// Seconds
    pub fn duration(&self) -> f32 {
        match self {
            CelebrationType::FistPump => 1.5,
            CelebrationType::PointToCrowd => 2.0,
            CelebrationType::KneeSlide => 2.5,
            CelebrationType::Airplane => 3.0,
            CelebrationType::Backflip => 3.5,
            CelebrationType::Dance | CelebrationType::TeamHuddle => 4.0,
        }
    }
}

/// Plays one celebration at a time on the host's dt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CelebrationAnimationController {
    active: Option<CelebrationType>,
    elapsed: f32,
}

impl CelebrationAnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any celebration already playing.
    pub fn start_celebration(&mut self, kind: CelebrationType) {
        tracing::debug!(?kind, "celebration started");
        self.active = Some(kind);
        self.elapsed = 0.0;
    }

    /// `true` while still playing; `false` once finished (the controller goes idle).
    pub fn update_celebration(&mut self, dt: f32) -> bool {
        let Some(kind) = self.active else {
            return false;
        };

        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed >= kind.duration() {
            self.active = None;
            self.elapsed = 0.0;
            return false;
        }
        true
    }

    pub fn is_celebrating(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<CelebrationType> {
        self.active
    }

    /// 0..1 through the current clip, 0 when idle
    pub fn progress(&self) -> f32 {
        match self.active {
            Some(kind) => (self.elapsed / kind.duration()).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Player FSM state to show while this controller is busy
    pub fn animation_state(&self) -> Option<AnimationState> {
        self.active.map(|_| AnimationState::Celebrate)
    }

    pub fn stop(&mut self) {
        self.active = None;
        self.elapsed = 0.0;
    }
}
