//! # kickoff_core - Arcade Football Simulation Core
//!
//! Real-time match simulation core for the browser-based arcade football game.
//! Everything here is evaluated once per simulation tick by an external host loop.
//!
//! ## Features
//! - Ball physics: shot / pass / dribble computation, Magnus + drag, friction, collisions
//! - Match clock: scaled simulated time, phase state machine, observers
//! - Player animation FSM: allow-list gated transitions, blend tree, GK + celebration controllers
//! - 100% deterministic (same inputs = same outputs), no hidden global state

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::empty_line_after_doc_comments)]
// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod config;
pub mod engine;
pub mod error;

pub use config::{ClockConfig, PhysicsConfig, SimConfig, SimulationQuality};
pub use engine::animation::{
    AnimationInput, AnimationState, AnimationStateMachine, BlendTree, CelebrationAnimationController,
    CelebrationType, DiveReaction, GoalkeeperAnimationController,
};
pub use engine::ball::{BallState, ContactSurface, PlayerId};
pub use engine::ball_physics::{
    BallPhysicsEngine, DribbleControl, DribbleInput, PassInput, PassResult, ShotInput, ShotResult,
};
pub use engine::match_clock::{
    ClockEvent, ListenerContext, ListenerHandle, MatchClock, MatchPhase, TimeState,
};
pub use engine::timestep::FixedTimestep;
pub use error::{ClockError, ConfigError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
