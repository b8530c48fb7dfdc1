//! World coordinate contract
//!
//! - Y is up, the pitch is the XZ plane (y = 0 is the ground)
//! - +Z is the canonical forward direction
//! - All helpers are NaN-safe: degenerate input falls back to a canonical axis

use nalgebra::Vector3;

/// Below this length a vector is treated as zero.
pub const EPSILON_LEN: f32 = 1e-6;

/// Canonical up axis (+Y)
#[inline]
pub fn up() -> Vector3<f32> {
    Vector3::y()
}

/// Canonical forward axis (+Z)
#[inline]
pub fn forward() -> Vector3<f32> {
    Vector3::z()
}

/// Normalize, or return `fallback` for zero-length / non-finite input.
#[inline]
pub fn normalize_or(v: &Vector3<f32>, fallback: Vector3<f32>) -> Vector3<f32> {
    let len = v.norm();
    if !len.is_finite() || len < EPSILON_LEN {
        return fallback;
    }
    v / len
}

/// Normalize, falling back to canonical forward.
#[inline]
pub fn safe_normalize(v: &Vector3<f32>) -> Vector3<f32> {
    normalize_or(v, forward())
}

/// Drop the vertical component (project onto the pitch plane).
#[inline]
pub fn flatten(v: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x, 0.0, v.z)
}

/// Horizontal (XZ) speed
#[inline]
pub fn horizontal_speed(v: &Vector3<f32>) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Angle between two directions in radians, NaN-safe.
pub fn angle_between(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    let dot = safe_normalize(a).dot(&safe_normalize(b));
    dot.clamp(-1.0, 1.0).acos()
}

/// Caller-supplied vector: non-finite components become zero, with a warning.
///
/// Never asserts, in any build.
pub fn sanitize_vec(v: Vector3<f32>, context: &'static str) -> Vector3<f32> {
    if v.iter().all(|c| c.is_finite()) {
        return v;
    }
    tracing::warn!(context, ?v, "non-finite input sanitized to zero");
    v.map(|c| if c.is_finite() { c } else { 0.0 })
}

/// Replace non-finite components with zero.
///
/// Contract: internally computed outputs are always finite. A violation is a bug
/// upstream. Use [`sanitize_vec`] for caller input.
pub fn finite_or_zero(v: Vector3<f32>, context: &'static str) -> Vector3<f32> {
    if v.iter().all(|c| c.is_finite()) {
        return v;
    }

    // Level 1: debug builds stop here
    debug_assert!(false, "non-finite vector in {context}: {v:?}");

    // Level 2: strict mode panics in CI/test builds
    if cfg!(feature = "strict_contracts") {
        panic!("STRICT: non-finite vector in {context}: {v:?}");
    }

    // Level 3: release - warn and sanitize
    tracing::warn!(context, ?v, "non-finite vector sanitized to zero");
    v.map(|c| if c.is_finite() { c } else { 0.0 })
}

/// Non-finite or negative time steps are treated as zero.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}
