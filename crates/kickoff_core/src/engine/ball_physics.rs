//! Ball Physics Engine
//!
//! Pure action computations for the arcade ball model:
//! - Shot: power (stamina, balance), accuracy (angle, distance), spin + curve, surface lift
//! - Pass: force, accuracy (lane density, distance, receiver speed), through-ball lead target
//! - Dribble: tether radius, bad first touch
//! - Air / ground / collision response helpers used by per-tick integration
//!
//! Nothing in here owns world state. Callers thread `BallState` through explicitly;
//! every function is reproducible from its arguments alone and never panics on
//! degenerate numeric input (zero vectors, zero stats, NaN, overflow) - values are
//! clamped, zeroed or replaced by canonical axes instead.

use crate::config::SimulationQuality;
use crate::engine::ball::ContactSurface;
use crate::engine::coordinates::{
    angle_between, finite_or_zero, flatten, forward, horizontal_speed, normalize_or,
    safe_normalize, sanitize_dt, sanitize_vec, up, EPSILON_LEN,
};
use crate::engine::physics_constants::{air, collision, dribble, ground, pass, shot};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ===========================================
// Input / output bundles
// ===========================================

/// Shot parameters, consumed once per shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotInput {
    /// Charged power (0..=1)
    pub power: f32,
    /// Aim direction (need not be normalized)
    pub direction: Vector3<f32>,
    /// Direct line from the ball to the goal center
    pub goal_direction: Vector3<f32>,
    pub distance_from_goal: f32,
    /// 0..=100
    pub shot_stat: f32,
    /// 0..=100
    pub accuracy_stat: f32,
    /// 0..=100
    pub spin_stat: f32,
    /// 0..=1
    pub stamina: f32,
    /// Balance before situational penalties (0..=1)
    pub base_balance: f32,
    pub is_sprinting: bool,
    pub under_pressure: bool,
    /// Body-turn sharpness (0 = square to the ball, 1 = hardest turn)
    pub turn_sharpness: f32,
    /// Swipe angle of the shot gesture (radians, 0 = straight)
    pub swipe_angle: f32,
    /// Where the foot meets the ball laterally (-1..=1)
    pub foot_offset: f32,
    pub contact_surface: ContactSurface,
}

impl Default for ShotInput {
    fn default() -> Self {
        Self {
            power: 1.0,
            direction: forward(),
            goal_direction: forward(),
            distance_from_goal: 12.0,
            shot_stat: 50.0,
            accuracy_stat: 50.0,
            spin_stat: 50.0,
            stamina: 1.0,
            base_balance: 1.0,
            is_sprinting: false,
            under_pressure: false,
            turn_sharpness: 0.0,
            swipe_angle: 0.0,
            foot_offset: 0.0,
            contact_surface: ContactSurface::Laces,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    /// Launch force (direction × shot power, including curve and lift)
    pub force: Vector3<f32>,
    pub spin: Vector3<f32>,
    pub shot_power: f32,
    /// 0..=1
    pub effective_accuracy: f32,
    /// Effective balance used for the power (0..=1)
    pub balance: f32,
}

/// Pass parameters, consumed once per pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassInput {
    /// 0..=1
    pub power: f32,
    /// 0..=100
    pub passing_stat: f32,
    /// 0..=1
    pub balance: f32,
    pub passer_position: Vector3<f32>,
    /// Passer facing direction
    pub forward: Vector3<f32>,
    pub receiver_position: Vector3<f32>,
    pub receiver_velocity: Vector3<f32>,
    /// Opponents in the passing lane (0 = clear, 1 = packed)
    pub lane_density: f32,
}

impl Default for PassInput {
    fn default() -> Self {
        Self {
            power: 1.0,
            passing_stat: 50.0,
            balance: 1.0,
            passer_position: Vector3::zeros(),
            forward: forward(),
            receiver_position: Vector3::new(0.0, 0.0, 10.0),
            receiver_velocity: Vector3::zeros(),
            lane_density: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassResult {
    pub pass_force: f32,
    /// Direction to the through target × pass force
    pub pass_vector: Vector3<f32>,
    /// 0..=1
    pub accuracy: f32,
    /// Lead target on the ground plane
    pub through_target: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DribbleInput {
    /// Tether radius before stat / speed adjustment
    pub base_radius: f32,
    /// 0..=100
    pub dribble_stat: f32,
    /// Carrier speed (units/s)
    pub speed: f32,
    /// Incoming ball speed at the first touch (units/s)
    pub ball_speed: f32,
    /// 0..=100
    pub control_stat: f32,
}

impl Default for DribbleInput {
    fn default() -> Self {
        Self { base_radius: 1.0, dribble_stat: 50.0, speed: 0.0, ball_speed: 0.0, control_stat: 50.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DribbleControl {
    pub tether_radius: f32,
    pub bad_first_touch: bool,
}

// ===========================================
// Engine
// ===========================================

/// Caller-owned ball physics engine.
///
/// Holds only the simulation quality tier; everything else is an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BallPhysicsEngine {
    pub quality: SimulationQuality,
}

impl BallPhysicsEngine {
    pub fn new(quality: SimulationQuality) -> Self {
        Self { quality }
    }

    /// Shot force, spin, power and accuracy.
    pub fn compute_shot(&self, input: &ShotInput) -> ShotResult {
        let stamina_factor = stamina_factor(input.stamina);
        let balance = effective_balance(
            input.base_balance,
            input.is_sprinting,
            input.under_pressure,
            input.turn_sharpness,
        );
        let shot_power = unit(input.power) * stat(input.shot_stat) * balance * stamina_factor;

        let aim = safe_normalize(&input.direction);
        let goal_line = safe_normalize(&input.goal_direction);
        let effective_accuracy = shot_accuracy(
            input.accuracy_stat,
            angle_between(&aim, &goal_line),
            input.distance_from_goal,
        );

        // Side spin around the up axis: swipe + off-center contact, scaled by the spin stat
        let swipe = if input.swipe_angle.is_finite() { input.swipe_angle.sin() } else { 0.0 };
        let offset = signed_unit(input.foot_offset) * shot::FOOT_OFFSET_SPIN_WEIGHT;
        let side_spin = (swipe + offset) * (stat(input.spin_stat) / 100.0) * shot::MAX_SPIN;
        let spin = up() * side_spin;

        // Curve bends the same way the Magnus term will (up × forward)
        let lateral = normalize_or(&up().cross(&aim), Vector3::x());
        let curve = lateral * side_spin * shot::CURVE_PER_SPIN;
        let lift = up() * input.contact_surface.lift();

        let force = finite_or_zero((aim + curve + lift) * shot_power, "compute_shot.force");

        tracing::trace!(shot_power, effective_accuracy, side_spin, "shot computed");

        ShotResult { force, spin, shot_power, effective_accuracy, balance }
    }

    /// Pass force, accuracy and through-ball target.
    pub fn compute_pass(&self, input: &PassInput) -> PassResult {
        let pass_force = unit(input.power) * stat(input.passing_stat) * unit(input.balance);

        let passer = flatten(&sanitize_vec(input.passer_position, "pass.passer"));
        let receiver = flatten(&sanitize_vec(input.receiver_position, "pass.receiver"));
        let distance = (receiver - passer).norm();
        let receiver_speed =
            horizontal_speed(&sanitize_vec(input.receiver_velocity, "pass.receiver_velocity"));

        let accuracy = pass_accuracy(input.lane_density, distance, receiver_speed);

        // Lead the receiver along the passer's forward direction
        let prediction = pass::PREDICTION_BASE_SEC
            + pass::PREDICTION_SCALE_SEC * (pass_force / pass::PREDICTION_FORCE_NORM).min(1.0);
        let lead = finite_scalar(receiver_speed * prediction);
        let heading = normalize_or(&flatten(&input.forward), forward());
        // huge caller positions can still overflow here
        let through_target = sanitize_vec(receiver + heading * lead, "compute_pass.target");

        let pass_dir = normalize_or(&(through_target - passer), heading);
        let pass_vector = finite_or_zero(pass_dir * pass_force, "compute_pass.vector");

        PassResult { pass_force, pass_vector, accuracy, through_target }
    }

    /// Tether radius and first-touch check.
    pub fn compute_dribble_control(&self, input: &DribbleInput) -> DribbleControl {
        let dribble_stat = stat(input.dribble_stat);
        let speed = finite_scalar(input.speed);
        let speed_expansion =
            (speed - dribble::SPEED_EXPANSION_START).max(0.0) * dribble::SPEED_EXPANSION_RATE;
        let tether_radius = (finite_scalar(input.base_radius)
            - dribble_stat * dribble::STAT_TIGHTENING
            + speed_expansion)
            .max(dribble::MIN_TETHER_RADIUS);

        let control = stat(input.control_stat).max(dribble::MIN_CONTROL_STAT);
        let threshold =
            dribble::FIRST_TOUCH_BASE + (100.0 - dribble_stat) * dribble::FIRST_TOUCH_RATE;
        let bad_first_touch = finite_scalar(input.ball_speed) / control > threshold;

        DribbleControl { tether_radius, bad_first_touch }
    }

}

// ===========================================
// Air / ground / collision response
// ===========================================

/// Magnus coefficient for a quality tier
pub fn magnus_coefficient(quality: SimulationQuality) -> f32 {
    match quality {
        SimulationQuality::High => air::MAGNUS_HIGH,
        SimulationQuality::Low => air::MAGNUS_LOW,
    }
}

/// Magnus force (spin × velocity) followed by quadratic air drag.
///
/// Drag magnitude is `0.028 × |v|² × dt`, opposing v; it can stop the ball but never
/// reverse it.
pub fn apply_magnus_and_drag(
    velocity: Vector3<f32>,
    spin: Vector3<f32>,
    dt: f32,
    quality: SimulationQuality,
) -> Vector3<f32> {
    let dt = sanitize_dt(dt);
    let velocity = sanitize_vec(velocity, "magnus.velocity");
    let spin = sanitize_vec(spin, "magnus.spin");

    // spin × v overflows for extreme inputs
    let curved = sanitize_vec(
        velocity + spin.cross(&velocity) * magnus_coefficient(quality) * dt,
        "magnus.curved",
    );

    let speed = curved.norm();
    if speed < EPSILON_LEN {
        return curved;
    }
    if !speed.is_finite() {
        tracing::warn!(?curved, "ball speed overflowed, stopping the ball");
        return Vector3::zeros();
    }
    let drag = air::QUADRATIC_DRAG * speed * speed * dt;
    let new_speed = (speed - drag).max(0.0);
    sanitize_vec(curved * (new_speed / speed), "magnus.result")
}

/// Rolling friction on the horizontal component. Vertical velocity is untouched.
pub fn apply_ground_friction(velocity: Vector3<f32>, dt: f32) -> Vector3<f32> {
    let dt = sanitize_dt(dt);
    let velocity = sanitize_vec(velocity, "friction.velocity");

    let speed = horizontal_speed(&velocity);
    if speed < EPSILON_LEN || !speed.is_finite() {
        return Vector3::new(0.0, velocity.y, 0.0);
    }
    let new_speed = (speed - ground::FRICTION_DECEL * dt).max(0.0);
    let scale = new_speed / speed;
    Vector3::new(velocity.x * scale, velocity.y, velocity.z * scale)
}

/// Reflect about the collision normal and apply restitution (posts, bar, ground).
pub fn resolve_post_collision(velocity: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    let velocity = sanitize_vec(velocity, "collision.velocity");
    let n = normalize_or(&normal, up());
    let reflected = velocity - n * (2.0 * velocity.dot(&n));
    sanitize_vec(reflected * collision::RESTITUTION, "collision.result")
}

/// Net contact: most of the pace dies in the net.
pub fn dampen_on_net_collision(velocity: Vector3<f32>) -> Vector3<f32> {
    sanitize_vec(velocity, "net.velocity") * collision::NET_DAMPING
}

// ===========================================
// Formula helpers
// ===========================================

/// Power multiplier from stamina: 1.0 above 30%, linear down to 0.67 at zero.
pub fn stamina_factor(stamina: f32) -> f32 {
    let stamina = unit(stamina);
    if stamina >= shot::STAMINA_THRESHOLD {
        return 1.0;
    }
    let deficit = (shot::STAMINA_THRESHOLD - stamina) / shot::STAMINA_THRESHOLD;
    1.0 - shot::STAMINA_MAX_PENALTY * deficit
}

/// Balance after situational penalties, clamped to 0..=1.
pub fn effective_balance(
    base_balance: f32,
    is_sprinting: bool,
    under_pressure: bool,
    turn_sharpness: f32,
) -> f32 {
    let mut balance = unit(base_balance);
    if is_sprinting {
        balance -= shot::SPRINT_BALANCE_PENALTY;
    }
    if under_pressure {
        balance -= shot::PRESSURE_BALANCE_PENALTY;
    }
    balance -= shot::TURN_BALANCE_PENALTY * unit(turn_sharpness);
    balance.clamp(0.0, 1.0)
}

/// Shot accuracy from stat, angle off the goal line, and distance.
pub fn shot_accuracy(accuracy_stat: f32, angle_off_line: f32, distance: f32) -> f32 {
    let base = stat(accuracy_stat) / 100.0;
    let angle_factor = if angle_off_line.is_finite() {
        angle_off_line.cos().max(shot::ANGLE_ACCURACY_FLOOR)
    } else {
        shot::ANGLE_ACCURACY_FLOOR
    };
    let distance_penalty = if distance > shot::DISTANCE_FREE_RANGE {
        ((distance - shot::DISTANCE_FREE_RANGE) / shot::DISTANCE_PENALTY_SCALE)
            .min(shot::DISTANCE_PENALTY_CAP)
    } else {
        0.0
    };
    unit(base * angle_factor * (1.0 - distance_penalty))
}

/// Pass accuracy from lane density, distance and receiver speed.
pub fn pass_accuracy(lane_density: f32, distance: f32, receiver_speed: f32) -> f32 {
    let distance_term = (finite_scalar(distance) / pass::DISTANCE_NORM).min(1.0);
    let speed_term = (finite_scalar(receiver_speed) / pass::RECEIVER_SPEED_NORM).min(1.0);
    unit(
        1.0 - pass::LANE_DENSITY_WEIGHT * unit(lane_density)
            - pass::DISTANCE_WEIGHT * distance_term
            - pass::RECEIVER_SPEED_WEIGHT * speed_term,
    )
}

/// Clamp to 0..=1, NaN → 0
#[inline]
fn unit(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Clamp to -1..=1, NaN → 0
#[inline]
fn signed_unit(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(-1.0, 1.0)
    }
}

/// Clamp a 0..=100 stat, NaN → 0
#[inline]
fn stat(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 100.0)
    }
}

/// Non-negative finite scalar, otherwise 0
#[inline]
fn finite_scalar(x: f32) -> f32 {
    if x.is_finite() {
        x.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine() -> BallPhysicsEngine {
        BallPhysicsEngine::new(SimulationQuality::High)
    }

    fn shot_at(distance: f32) -> ShotInput {
        ShotInput { distance_from_goal: distance, accuracy_stat: 90.0, ..ShotInput::default() }
    }

    // ========== Shot ==========

    #[test]
    fn test_shot_power_formula() {
        let input = ShotInput { power: 0.5, shot_stat: 80.0, ..ShotInput::default() };
        let result = engine().compute_shot(&input);
        assert!((result.shot_power - 40.0).abs() < 1e-4);
        assert_eq!(result.balance, 1.0);
    }

    #[test]
    fn test_stamina_degrades_power_below_threshold() {
        assert_eq!(stamina_factor(1.0), 1.0);
        assert_eq!(stamina_factor(0.3), 1.0);
        assert!((stamina_factor(0.0) - 0.67).abs() < 1e-6);
        assert!((stamina_factor(0.15) - 0.835).abs() < 1e-6);

        let tired = ShotInput { stamina: 0.0, shot_stat: 100.0, ..ShotInput::default() };
        let result = engine().compute_shot(&tired);
        assert!((result.shot_power - 67.0).abs() < 1e-3);
    }

    #[test]
    fn test_balance_penalties_stack_and_clamp() {
        assert!((effective_balance(1.0, true, false, 0.0) - 0.84).abs() < 1e-6);
        assert!((effective_balance(1.0, false, true, 0.0) - 0.86).abs() < 1e-6);
        assert!((effective_balance(1.0, false, false, 0.5) - 0.91).abs() < 1e-6);
        assert!((effective_balance(1.0, true, true, 1.0) - 0.52).abs() < 1e-6);
        assert_eq!(effective_balance(0.2, true, true, 1.0), 0.0);
    }

    #[test]
    fn test_accuracy_strictly_decreases_beyond_free_range() {
        let e = engine();
        let distances = [18.5, 20.0, 25.0, 30.0, 40.0, 55.0, 70.0];
        let accuracies: Vec<f32> =
            distances.iter().map(|d| e.compute_shot(&shot_at(*d)).effective_accuracy).collect();
        for pair in accuracies.windows(2) {
            assert!(pair[1] < pair[0], "accuracy should drop with distance: {accuracies:?}");
        }
    }

    #[test]
    fn test_accuracy_flat_inside_free_range() {
        let e = engine();
        let close = e.compute_shot(&shot_at(5.0)).effective_accuracy;
        let edge = e.compute_shot(&shot_at(18.0)).effective_accuracy;
        assert!((close - 0.9).abs() < 1e-6);
        assert_eq!(close, edge);
    }

    #[test]
    fn test_accuracy_angle_falloff_has_floor() {
        let e = engine();
        let straight = e.compute_shot(&shot_at(10.0)).effective_accuracy;
        let sideways = e
            .compute_shot(&ShotInput { direction: Vector3::x(), ..shot_at(10.0) })
            .effective_accuracy;
        let backwards = e
            .compute_shot(&ShotInput { direction: -Vector3::z(), ..shot_at(10.0) })
            .effective_accuracy;

        assert!(sideways < straight);
        assert!((sideways - 0.9 * 0.05).abs() < 1e-4);
        assert!((backwards - 0.9 * 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_zero_direction_never_nan() {
        let input = ShotInput {
            direction: Vector3::zeros(),
            goal_direction: Vector3::zeros(),
            swipe_angle: 0.7,
            ..ShotInput::default()
        };
        let result = engine().compute_shot(&input);
        assert!(result.force.iter().all(|c| c.is_finite()), "force = {:?}", result.force);
        assert!(result.spin.iter().all(|c| c.is_finite()));
        assert!(result.force.z > 0.0, "falls back to canonical forward");
    }

    #[test]
    fn test_header_lifts_more_than_laces() {
        let e = engine();
        let laces = e.compute_shot(&ShotInput::default());
        let header =
            e.compute_shot(&ShotInput { contact_surface: ContactSurface::Header, ..ShotInput::default() });
        assert!(header.force.y > laces.force.y);
        assert!((header.force.y - 0.45 * header.shot_power).abs() < 1e-4);
        assert!((laces.force.y - 0.10 * laces.shot_power).abs() < 1e-4);
    }

    #[test]
    fn test_swipe_spin_curves_force_sideways() {
        let e = engine();
        let input = ShotInput {
            swipe_angle: std::f32::consts::FRAC_PI_2,
            spin_stat: 100.0,
            ..ShotInput::default()
        };
        let result = e.compute_shot(&input);
        assert!((result.spin.y - shot::MAX_SPIN).abs() < 1e-4);
        // up × forward = +x
        assert!(result.force.x > 0.0);

        let straight = e.compute_shot(&ShotInput::default());
        assert_eq!(straight.spin, Vector3::zeros());
        assert!(straight.force.x.abs() < 1e-6);
    }

    #[test]
    fn test_foot_offset_adds_spin() {
        let input = ShotInput { foot_offset: -1.0, spin_stat: 100.0, ..ShotInput::default() };
        let result = engine().compute_shot(&input);
        assert!((result.spin.y + 0.5 * shot::MAX_SPIN).abs() < 1e-4);
        assert!(result.force.x < 0.0);
    }

    // ========== Pass ==========

    #[test]
    fn test_pass_force_and_accuracy() {
        let input = PassInput {
            power: 0.5,
            passing_stat: 80.0,
            balance: 0.5,
            receiver_position: Vector3::new(0.0, 0.0, 27.5),
            receiver_velocity: Vector3::new(6.0, 0.0, 0.0),
            lane_density: 0.2,
            ..PassInput::default()
        };
        let result = engine().compute_pass(&input);
        assert!((result.pass_force - 20.0).abs() < 1e-4);
        // 1 - 0.1 - 0.175 - 0.175
        assert!((result.accuracy - 0.55).abs() < 1e-4);
    }

    #[test]
    fn test_pass_accuracy_clamped() {
        assert_eq!(pass_accuracy(1.0, 200.0, 40.0), 0.0);
        assert_eq!(pass_accuracy(0.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_through_ball_leads_receiver() {
        let input = PassInput {
            power: 1.0,
            passing_stat: 100.0,
            receiver_position: Vector3::new(5.0, 0.0, 20.0),
            receiver_velocity: Vector3::new(0.0, 0.0, 8.0),
            ..PassInput::default()
        };
        let result = engine().compute_pass(&input);
        // t = 0.18 + 0.55 × 1 = 0.73 → lead = 8 × 0.73
        let expected = Vector3::new(5.0, 0.0, 20.0 + 8.0 * 0.73);
        assert!((result.through_target - expected).norm() < 1e-4);
        assert!((result.pass_vector.norm() - result.pass_force).abs() < 1e-3);
    }

    #[test]
    fn test_stationary_receiver_is_the_target() {
        let input = PassInput { receiver_position: Vector3::new(3.0, 1.0, 4.0), ..PassInput::default() };
        let result = engine().compute_pass(&input);
        assert_eq!(result.through_target, Vector3::new(3.0, 0.0, 4.0));
    }

    #[test]
    fn test_pass_to_own_feet_is_finite() {
        let input = PassInput { receiver_position: Vector3::zeros(), forward: Vector3::zeros(), ..PassInput::default() };
        let result = engine().compute_pass(&input);
        assert!(result.pass_vector.iter().all(|c| c.is_finite()));
    }

    // ========== Dribble ==========

    #[test]
    fn test_tether_radius() {
        let e = engine();
        let slow = e.compute_dribble_control(&DribbleInput { dribble_stat: 50.0, speed: 3.0, ..DribbleInput::default() });
        assert!((slow.tether_radius - 0.5).abs() < 1e-6);

        let fast = e.compute_dribble_control(&DribbleInput { dribble_stat: 50.0, speed: 9.0, ..DribbleInput::default() });
        assert!((fast.tether_radius - 0.62).abs() < 1e-6);

        let elite = e.compute_dribble_control(&DribbleInput { dribble_stat: 99.0, ..DribbleInput::default() });
        assert_eq!(elite.tether_radius, dribble::MIN_TETHER_RADIUS);
    }

    #[test]
    fn test_bad_first_touch_threshold() {
        let e = engine();
        // threshold at dribble 60 = 0.16 + 40 × 0.0025 = 0.26
        let clean = e.compute_dribble_control(&DribbleInput {
            dribble_stat: 60.0,
            control_stat: 50.0,
            ball_speed: 12.0,
            ..DribbleInput::default()
        });
        assert!(!clean.bad_first_touch);

        let heavy = e.compute_dribble_control(&DribbleInput {
            dribble_stat: 60.0,
            control_stat: 50.0,
            ball_speed: 14.0,
            ..DribbleInput::default()
        });
        assert!(heavy.bad_first_touch);
    }

    #[test]
    fn test_zero_control_stat_does_not_divide_by_zero() {
        let result = engine().compute_dribble_control(&DribbleInput {
            control_stat: 0.0,
            ball_speed: 0.1,
            ..DribbleInput::default()
        });
        assert!(!result.bad_first_touch);
    }

    // ========== Air / ground / collision ==========

    #[test]
    fn test_magnus_deflects_and_quality_halves_it() {
        let v = Vector3::new(0.0, 0.0, 20.0);
        let spin = Vector3::new(0.0, 5.0, 0.0);
        let high = apply_magnus_and_drag(v, spin, 0.1, SimulationQuality::High);
        let low = apply_magnus_and_drag(v, spin, 0.1, SimulationQuality::Low);

        assert!(high.x > 0.0);
        assert!(low.x > 0.0);
        assert!(high.x > low.x);
        assert!(high.norm() < v.norm(), "drag slows the ball");
    }

    #[test]
    fn test_drag_magnitude_without_spin() {
        let v = Vector3::new(10.0, 0.0, 0.0);
        let out = apply_magnus_and_drag(v, Vector3::zeros(), 0.1, SimulationQuality::High);
        // 0.028 × 100 × 0.1 = 0.28
        assert!((out.x - 9.72).abs() < 1e-4);
    }

    #[test]
    fn test_drag_never_reverses() {
        let v = Vector3::new(50.0, 0.0, 0.0);
        let out = apply_magnus_and_drag(v, Vector3::zeros(), 10.0, SimulationQuality::High);
        assert!(out.x >= 0.0);
    }

    #[test]
    fn test_ground_friction_preserves_direction_and_vertical() {
        let v = Vector3::new(3.0, 2.0, 4.0);
        let out = apply_ground_friction(v, 1.0);
        assert!((horizontal_speed(&out) - (5.0 - 0.42)).abs() < 1e-5);
        assert_eq!(out.y, 2.0);
        assert!((out.x / out.z - 0.75).abs() < 1e-5);

        let stopped = apply_ground_friction(Vector3::new(0.1, 0.0, 0.0), 1.0);
        assert_eq!(stopped, Vector3::zeros());
    }

    #[test]
    fn test_post_collision_reflects_with_restitution() {
        let out = resolve_post_collision(Vector3::new(10.0, 0.0, 5.0), Vector3::new(-3.0, 0.0, 0.0));
        assert!((out.x + 7.2).abs() < 1e-5);
        assert!((out.z - 3.6).abs() < 1e-5);

        // zero normal falls back to ground normal
        let bounce = resolve_post_collision(Vector3::new(0.0, -10.0, 0.0), Vector3::zeros());
        assert!((bounce.y - 7.2).abs() < 1e-5);
    }

    #[test]
    fn test_net_dampening() {
        let out = dampen_on_net_collision(Vector3::new(10.0, 5.0, -20.0));
        assert!((out - Vector3::new(4.2, 2.1, -8.4)).norm() < 1e-5);
    }

    #[test]
    fn test_nan_inputs_are_zeroed_not_propagated() {
        let nan = Vector3::new(f32::NAN, 0.0, 1.0);
        let finite = |v: Vector3<f32>| v.iter().all(|c| c.is_finite());

        let rolled = apply_ground_friction(nan, 0.1);
        assert!(finite(rolled));
        assert_eq!(rolled.x, 0.0);

        assert!(finite(apply_magnus_and_drag(nan, Vector3::y(), 0.1, SimulationQuality::High)));
        assert!(finite(apply_magnus_and_drag(Vector3::z(), nan, 0.1, SimulationQuality::Low)));
        assert!(finite(resolve_post_collision(nan, Vector3::new(f32::NAN, 1.0, 0.0))));
        assert_eq!(dampen_on_net_collision(nan), Vector3::new(0.0, 0.0, 0.42));

        let pass = engine().compute_pass(&PassInput {
            receiver_position: Vector3::new(f32::NAN, 0.0, 10.0),
            receiver_velocity: Vector3::new(0.0, 0.0, f32::INFINITY),
            ..PassInput::default()
        });
        assert!(finite(pass.through_target));
        assert!(finite(pass.pass_vector));
    }

    #[test]
    fn test_extreme_magnitudes_stay_finite() {
        let finite = |v: Vector3<f32>| v.iter().all(|c| c.is_finite());
        let huge = Vector3::new(1e20, 0.0, 0.0);

        let flown = apply_magnus_and_drag(huge, Vector3::new(0.0, 1e20, 0.0), 0.1, SimulationQuality::High);
        assert!(finite(flown), "{flown:?}");

        let big = Vector3::new(3e38, 0.0, 3e38);
        assert!(finite(apply_magnus_and_drag(big, Vector3::zeros(), 0.1, SimulationQuality::High)));
        assert!(finite(apply_ground_friction(big, 0.1)));
        assert!(finite(resolve_post_collision(big, Vector3::new(1.0, 0.0, 1.0))));
        assert!(finite(dampen_on_net_collision(big)));
    }

    // ========== Properties ==========

    fn vec3_strategy() -> impl Strategy<Value = Vector3<f32>> {
        (-50.0f32..=50.0, -50.0f32..=50.0, -50.0f32..=50.0).prop_map(|(x, y, z)| Vector3::new(x, y, z))
    }

    fn surface_strategy() -> impl Strategy<Value = ContactSurface> {
        prop_oneof![
            Just(ContactSurface::InsideFoot),
            Just(ContactSurface::OutsideFoot),
            Just(ContactSurface::Laces),
            Just(ContactSurface::Header),
        ]
    }

    proptest! {
        #[test]
        fn prop_shot_outputs_bounded_and_finite(
            power in -1.0f32..=2.0,
            direction in vec3_strategy(),
            goal_direction in vec3_strategy(),
            distance in 0.0f32..=120.0,
            shot_stat in -10.0f32..=150.0,
            accuracy_stat in 0.0f32..=100.0,
            stamina in -0.5f32..=1.5,
            base_balance in 0.0f32..=1.0,
            is_sprinting in any::<bool>(),
            under_pressure in any::<bool>(),
            turn_sharpness in 0.0f32..=1.0,
            swipe_angle in -3.2f32..=3.2,
            foot_offset in -2.0f32..=2.0,
            contact_surface in surface_strategy(),
        ) {
            let input = ShotInput {
                power, direction, goal_direction, distance_from_goal: distance, shot_stat,
                accuracy_stat, spin_stat: 70.0, stamina, base_balance, is_sprinting,
                under_pressure, turn_sharpness, swipe_angle, foot_offset, contact_surface,
            };
            let result = engine().compute_shot(&input);
            prop_assert!((0.0..=1.0).contains(&result.effective_accuracy));
            prop_assert!((0.0..=1.0).contains(&result.balance));
            prop_assert!(result.shot_power >= 0.0);
            prop_assert!(result.force.iter().all(|c| c.is_finite()));
        }

        #[test]
        fn prop_ground_friction_never_reverses(v in vec3_strategy(), dt in 0.0f32..=5.0) {
            let out = apply_ground_friction(v, dt);
            prop_assert!(flatten(&out).dot(&flatten(&v)) >= 0.0);
            prop_assert!(horizontal_speed(&out) <= horizontal_speed(&v) + 1e-4);
            prop_assert_eq!(out.y, v.y);
        }

        #[test]
        fn prop_tether_has_floor(
            base_radius in 0.0f32..=3.0,
            dribble_stat in 0.0f32..=100.0,
            speed in 0.0f32..=15.0,
        ) {
            let input = DribbleInput { base_radius, dribble_stat, speed, ..DribbleInput::default() };
            let control = engine().compute_dribble_control(&input);
            prop_assert!(control.tether_radius >= dribble::MIN_TETHER_RADIUS);
        }

        #[test]
        fn prop_pass_accuracy_in_unit_range(
            lane in -1.0f32..=2.0,
            receiver in vec3_strategy(),
            receiver_velocity in vec3_strategy(),
        ) {
            let input = PassInput {
                lane_density: lane,
                receiver_position: receiver,
                receiver_velocity,
                ..PassInput::default()
            };
            let result = engine().compute_pass(&input);
            prop_assert!((0.0..=1.0).contains(&result.accuracy));
            prop_assert!(result.through_target.iter().all(|c| c.is_finite()));
        }
    }
}
