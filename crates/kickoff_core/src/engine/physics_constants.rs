//! Physics constants for the arcade ball model
//!
//! World units are meters-ish; stats use the 0..=100 scale, ratios 0..=1.

// ============================================================
// Shot
// ============================================================
pub mod shot {
    /// Stamina below this fraction starts degrading shot power
    pub const STAMINA_THRESHOLD: f32 = 0.30;
    /// Power lost at zero stamina (33%)
    pub const STAMINA_MAX_PENALTY: f32 = 0.33;

    // ========================================
    // Balance penalties (effective balance is clamped to 0..=1)
    // ========================================

    /// 스프린트 중 슈팅
    pub const SPRINT_BALANCE_PENALTY: f32 = 0.16;
    /// 압박 상태 슈팅
    pub const PRESSURE_BALANCE_PENALTY: f32 = 0.14;
    /// Max penalty at full body-turn sharpness (scaled by sharpness 0..=1)
    pub const TURN_BALANCE_PENALTY: f32 = 0.18;

    // ========================================
    // Accuracy
    // ========================================

    /// Floor of the cosine falloff for shots off the direct line to goal
    pub const ANGLE_ACCURACY_FLOOR: f32 = 0.05;
    /// No distance penalty inside this range
    pub const DISTANCE_FREE_RANGE: f32 = 18.0;
    /// Linear penalty per unit beyond the free range = 1/60
    pub const DISTANCE_PENALTY_SCALE: f32 = 60.0;
    /// Distance penalty cap
    pub const DISTANCE_PENALTY_CAP: f32 = 0.9;

    // ========================================
    // Spin / curve
    // ========================================

    /// Side spin at full swipe with a 100 spin stat
    pub const MAX_SPIN: f32 = 12.0;
    /// Weight of the foot-contact offset relative to the swipe
    pub const FOOT_OFFSET_SPIN_WEIGHT: f32 = 0.5;
    /// Perpendicular curve per unit of side spin (fraction of forward direction)
    pub const CURVE_PER_SPIN: f32 = 0.02;

    // ========================================
    // Vertical lift by contact surface
    // ========================================

    /// 인사이드 - 감아차기 궤적
    pub const LIFT_INSIDE_FOOT: f32 = 0.35;
    /// 아웃사이드
    pub const LIFT_OUTSIDE_FOOT: f32 = 0.18;
    /// 인스텝 - 낮고 강한 궤적
    pub const LIFT_LACES: f32 = 0.10;
    /// 헤더 - 가장 높은 궤적
    pub const LIFT_HEADER: f32 = 0.45;
}

// ============================================================
// Pass
// ============================================================
pub mod pass {
    pub const LANE_DENSITY_WEIGHT: f32 = 0.5;
    pub const DISTANCE_WEIGHT: f32 = 0.35;
    /// Distance at which the distance penalty saturates
    pub const DISTANCE_NORM: f32 = 55.0;
    pub const RECEIVER_SPEED_WEIGHT: f32 = 0.35;
    /// Receiver speed at which the speed penalty saturates (units/s)
    pub const RECEIVER_SPEED_NORM: f32 = 12.0;

    // Through-ball lead targeting: t = BASE + SCALE × min(force / FORCE_NORM, 1)
    pub const PREDICTION_BASE_SEC: f32 = 0.18;
    pub const PREDICTION_SCALE_SEC: f32 = 0.55;
    pub const PREDICTION_FORCE_NORM: f32 = 100.0;
}

// ============================================================
// Dribble
// ============================================================
pub mod dribble {
    /// Tether never shrinks below this radius
    pub const MIN_TETHER_RADIUS: f32 = 0.28;
    /// Radius reduction per dribble stat point
    pub const STAT_TIGHTENING: f32 = 0.01;
    /// Tether expands above this carrier speed (units/s)
    pub const SPEED_EXPANSION_START: f32 = 5.0;
    /// Expansion per unit/s above the start speed
    pub const SPEED_EXPANSION_RATE: f32 = 0.03;

    // Bad first touch: ball_speed / control > BASE + (100 - dribble) × RATE
    pub const FIRST_TOUCH_BASE: f32 = 0.16;
    pub const FIRST_TOUCH_RATE: f32 = 0.0025;
    /// Control stat floor (avoids division by zero)
    pub const MIN_CONTROL_STAT: f32 = 1.0;
}

// ============================================================
// Air (Magnus + drag)
// ============================================================
pub mod air {
    /// Magnus coefficient at high simulation quality
    pub const MAGNUS_HIGH: f32 = 0.24;
    /// Magnus coefficient at low quality (constrained devices)
    pub const MAGNUS_LOW: f32 = 0.12;
    /// Quadratic drag: |Δv| = DRAG × |v|² × dt
    pub const QUADRATIC_DRAG: f32 = 0.028;
    /// Gravity (units/s²)
    pub const GRAVITY: f32 = 9.81;
}

// ============================================================
// Ground / collisions
// ============================================================
pub mod ground {
    /// Rolling friction: horizontal speed loss per second
    pub const FRICTION_DECEL: f32 = 0.42;
    /// Below this speed the ball is snapped to rest
    pub const REST_SPEED: f32 = 0.05;
    /// Minimum impact speed for a bounce; slower impacts settle on the grass
    pub const MIN_BOUNCE_SPEED: f32 = 1.4;
    /// Ball considered airborne above this height
    pub const AIRBORNE_HEIGHT: f32 = 0.01;
}

pub mod collision {
    /// Restitution for post / crossbar / ground impacts
    pub const RESTITUTION: f32 = 0.72;
    /// Net contact kills most of the pace
    pub const NET_DAMPING: f32 = 0.42;
}

pub mod kick {
    /// Converts an action force (0..~100) into launch speed (units/s)
    pub const SPEED_PER_FORCE: f32 = 0.35;
}
