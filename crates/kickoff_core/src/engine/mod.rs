pub mod animation; // Player animation FSM + goalkeeper / celebration controllers
pub mod ball; // BallState + per-tick integration
pub mod ball_physics; // Shot / pass / dribble computation, Magnus, friction, collisions
pub mod coordinates; // World axes (Y-up, +Z forward) and NaN-safe vector helpers
pub mod match_clock; // Authoritative match time + phase state machine
pub mod physics_constants;
pub mod timestep; // Fixed-step tick driver (60 Hz)
