//! Ball state and per-tick integration
//!
//! This module contains:
//! - `BallState`: position / velocity / spin + last touch, created at kickoff
//! - `ContactSurface`: which part of the body struck the ball (drives shot lift)
//! - Per-tick integration: Magnus + drag + gravity in the air, friction on the ground,
//!   bounce on ground contact

use crate::config::SimulationQuality;
use crate::engine::ball_physics::{apply_ground_friction, apply_magnus_and_drag};
use crate::engine::coordinates::{horizontal_speed, sanitize_dt, sanitize_vec, up};
use crate::engine::physics_constants::{air, collision, ground, kick, shot};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Avatar identifier (assigned by the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// 볼 접촉 부위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactSurface {
    InsideFoot,
    OutsideFoot,
    #[default]
    Laces,
    Header,
}

impl ContactSurface {
    /// Vertical lift added to the launch direction.
    ///
    /// Header lifts the most, laces the least.
    pub fn lift(&self) -> f32 {
        match self {
            ContactSurface::InsideFoot => shot::LIFT_INSIDE_FOOT,
            ContactSurface::OutsideFoot => shot::LIFT_OUTSIDE_FOOT,
            ContactSurface::Laces => shot::LIFT_LACES,
            ContactSurface::Header => shot::LIFT_HEADER,
        }
    }
}

/// Ball physics state, threaded through by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub spin: Vector3<f32>,
    pub last_touch: Option<PlayerId>,
    pub contact_surface: ContactSurface,
    /// Seconds since last ground contact
    pub air_time: f32,
}

impl Default for BallState {
    fn default() -> Self {
        Self::kickoff(Vector3::zeros())
    }
}

impl BallState {
    /// Ball at rest on the center spot
    pub fn kickoff(center: Vector3<f32>) -> Self {
        Self {
            position: Vector3::new(center.x, 0.0, center.z),
            velocity: Vector3::zeros(),
            spin: Vector3::zeros(),
            last_touch: None,
            contact_surface: ContactSurface::default(),
            air_time: 0.0,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.height() > ground::AIRBORNE_HEIGHT || self.velocity.y > 0.0
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    pub fn is_at_rest(&self) -> bool {
        !self.is_airborne() && self.speed() < ground::REST_SPEED
    }

    /// Strike the ball with an action force (shot / pass vector) and spin.
    pub fn apply_kick(
        &mut self,
        toucher: PlayerId,
        surface: ContactSurface,
        force: Vector3<f32>,
        spin: Vector3<f32>,
    ) {
        self.velocity = sanitize_vec(force, "apply_kick.force") * kick::SPEED_PER_FORCE;
        self.spin = sanitize_vec(spin, "apply_kick.spin");
        self.last_touch = Some(toucher);
        self.contact_surface = surface;
        self.air_time = 0.0;
    }

    /// Advance the ball by one tick.
    ///
    /// Airborne: Magnus + quadratic drag + gravity. Grounded: rolling friction.
    /// Ground contact above `MIN_BOUNCE_SPEED` bounces with restitution, slower
    /// contacts settle onto the grass.
    pub fn integrate(&mut self, dt: f32, quality: SimulationQuality) {
        let dt = sanitize_dt(dt);
        if dt == 0.0 {
            return;
        }

        if self.is_airborne() {
            self.velocity = apply_magnus_and_drag(self.velocity, self.spin, dt, quality);
            self.velocity.y -= air::GRAVITY * dt;
            self.air_time += dt;
        } else {
            self.velocity = apply_ground_friction(self.velocity, dt);
            self.velocity.y = 0.0;
        }

        self.position += self.velocity * dt;

        if self.position.y <= 0.0 {
            self.resolve_ground_contact();
        }

        if horizontal_speed(&self.velocity) < ground::REST_SPEED && !self.is_airborne() {
            self.velocity = Vector3::zeros();
            self.spin = Vector3::zeros();
        }
    }

    fn resolve_ground_contact(&mut self) {
        self.position.y = 0.0;
        self.air_time = 0.0;

        let impact_speed = -self.velocity.y;
        if impact_speed > ground::MIN_BOUNCE_SPEED {
            // Vertical bounce only; the grass does not reflect horizontal pace
            self.velocity.y = impact_speed * collision::RESTITUTION;
            self.spin *= collision::RESTITUTION;
            tracing::trace!(impact_speed, "ball bounced");
        } else {
            self.velocity.y = 0.0;
        }
    }

    /// Mirror the velocity off a surface normal (posts, crossbar, boards).
    pub fn bounce_off(&mut self, normal: Vector3<f32>) {
        self.velocity = crate::engine::ball_physics::resolve_post_collision(self.velocity, normal);
    }

    /// Ball hits the net.
    pub fn hit_net(&mut self) {
        self.velocity = crate::engine::ball_physics::dampen_on_net_collision(self.velocity);
        self.spin = Vector3::zeros();
    }

    /// Height above the pitch along the up axis
    pub fn height(&self) -> f32 {
        self.position.dot(&up())
    }
}
