//! Animation states and their transition tables
//!
//! ```text
//! locomotion:  Idle ↔ Walk ↔ Jog ↔ Run ↔ Sprint
//! actions:     Shoot / Pass / Dribble / Tackle / SlideTackle / Header
//! recovery:    (Shoot|Tackle|SlideTackle|Dribble|Header) → Fall → GetUp → Idle
//! goalkeeper:  GkIdle → GkDiveLeft|GkDiveRight|GkCatch|GkPunch → GetUp|GkIdle
//! ```
//!
//! Sprint can only break into Tackle / SlideTackle or slow down; it never falls
//! directly. Idle never falls either.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Jog,
    Run,
    Sprint,
    Shoot,
    Pass,
    Dribble,
    Tackle,
    SlideTackle,
    Header,
    Fall,
    GetUp,
    Celebrate,
    GkIdle,
    GkDiveLeft,
    GkDiveRight,
    GkCatch,
    GkPunch,
}

use AnimationState::*;

impl AnimationState {
    pub const ALL: [AnimationState; 19] = [
        Idle,
        Walk,
        Jog,
        Run,
        Sprint,
        Shoot,
        Pass,
        Dribble,
        Tackle,
        SlideTackle,
        Header,
        Fall,
        GetUp,
        Celebrate,
        GkIdle,
        GkDiveLeft,
        GkDiveRight,
        GkCatch,
        GkPunch,
    ];

    /// Clip length in seconds (재생 시간)
    pub fn duration(&self) -> f32 {
        match self {
            Idle => 2.0,
            Walk => 1.0,
            Jog => 0.8,
            Run => 0.6,
            Sprint => 0.5,
            Shoot => 1.2,
            Pass => 0.8,
            Dribble => 0.6,
            Tackle => 1.0,
            SlideTackle => 1.2,
            Header => 0.9,
            Fall => 1.5,
            GetUp => 1.0,
            Celebrate => 3.0,
            GkIdle => 2.0,
            GkDiveLeft | GkDiveRight => 0.8,
            GkCatch => 0.7,
            GkPunch => 0.6,
        }
    }

    /// States reachable from this one through the gate
    pub fn allowed_transitions(&self) -> &'static [AnimationState] {
        match self {
            Idle => &[
                Walk,
                Jog,
                Run,
                Sprint,
                Shoot,
                Pass,
                Dribble,
                Tackle,
                SlideTackle,
                Header,
                Celebrate,
            ],
            Walk => &[Idle, Jog, Run, Shoot, Pass, Dribble, Tackle, Header],
            Jog => &[Idle, Walk, Run, Sprint, Shoot, Pass, Dribble, Tackle, SlideTackle, Header],
            Run => &[Idle, Jog, Sprint, Shoot, Pass, Dribble, Tackle, SlideTackle, Header],
            Sprint => &[Run, Jog, Tackle, SlideTackle],
            Shoot => &[Idle, Jog, Run, Celebrate, Fall],
            Pass => &[Idle, Walk, Jog, Run],
            Dribble => &[Idle, Jog, Run, Sprint, Shoot, Pass, Fall],
            Tackle => &[Idle, Jog, Run, Fall, GetUp],
            SlideTackle => &[GetUp, Fall, Idle],
            Header => &[Idle, Jog, Run, Fall, Celebrate],
            Fall => &[GetUp],
            GetUp => &[Idle, Jog, Walk],
            Celebrate => &[Idle, Jog, Walk],
            GkIdle => &[GkDiveLeft, GkDiveRight, GkCatch, GkPunch, Walk, Jog, Idle],
            GkDiveLeft | GkDiveRight => &[GetUp, GkIdle],
            GkCatch => &[GkIdle, Idle],
            GkPunch => &[GkIdle, GetUp],
        }
    }

    pub fn can_transition_to(&self, target: AnimationState) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Must play out in full before anything else is selected
    pub fn is_critical(&self) -> bool {
        matches!(self, Shoot | Tackle | Fall | Celebrate | GkDiveLeft | GkDiveRight)
    }

    /// Where a critical state settles once its clip has played
    pub fn exit_state(&self) -> Option<AnimationState> {
        match self {
            Shoot | Tackle | Celebrate => Some(Idle),
            Fall | GkDiveLeft | GkDiveRight => Some(GetUp),
            _ => None,
        }
    }

    pub fn is_locomotion(&self) -> bool {
        matches!(self, Idle | Walk | Jog | Run | Sprint)
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, GkIdle | GkDiveLeft | GkDiveRight | GkCatch | GkPunch)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Idle => "idle",
            Walk => "walk",
            Jog => "jog",
            Run => "run",
            Sprint => "sprint",
            Shoot => "shoot",
            Pass => "pass",
            Dribble => "dribble",
            Tackle => "tackle",
            SlideTackle => "slide_tackle",
            Header => "header",
            Fall => "fall",
            GetUp => "get_up",
            Celebrate => "celebrate",
            GkIdle => "gk_idle",
            GkDiveLeft => "gk_dive_left",
            GkDiveRight => "gk_dive_right",
            GkCatch => "gk_catch",
            GkPunch => "gk_punch",
        }
    }
}
