//! Interpolation helpers:
//! - lerp_f32 / lerp_vec3 (component-wise)
//! - slerp_quat (shortest-arc, NLERP fallback for near-parallel inputs)
//! - inverse_lerp (clamped)
//! - step (choose left for t < 0.5)

use crate::snapshot::{Quat, Vec3, IDENTITY_ROTATION};

/// Dot product above which slerp degenerates to a normalized lerp.
const SLERP_DOT_THRESHOLD: f32 = 0.9995;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

/// Where `value` sits between `a` and `b`, clamped to [0, 1].
/// A zero-length span yields 0.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Discrete selection for fields that cannot be blended.
#[inline]
pub fn step<T>(a: T, b: T, t: f32) -> T {
    if t < 0.5 {
        a
    } else {
        b
    }
}

#[inline]
fn dot4(a: Quat, b: Quat) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

/// Normalize a quaternion; a zero quaternion becomes identity.
#[inline]
pub fn normalize_quat(q: Quat) -> Quat {
    let len2 = dot4(q, q);
    if len2 > 0.0 && len2.is_finite() {
        let inv_len = len2.sqrt().recip();
        [q[0] * inv_len, q[1] * inv_len, q[2] * inv_len, q[3] * inv_len]
    } else {
        IDENTITY_ROTATION
    }
}

/// Spherical interpolation along the shortest arc. The result is unit-norm.
///
/// The endpoints return the normalized inputs unchanged, never the negated
/// `b` used for the shortest arc.
pub fn slerp_quat(a: Quat, b: Quat, t: f32) -> Quat {
    let qa = normalize_quat(a);
    if t <= 0.0 {
        return qa;
    }
    let mut qb = normalize_quat(b);
    if t >= 1.0 {
        return qb;
    }

    let mut dot = dot4(qa, qb);
    if dot < 0.0 {
        qb = [-qb[0], -qb[1], -qb[2], -qb[3]];
        dot = -dot;
    }

    if dot > SLERP_DOT_THRESHOLD {
        return normalize_quat([
            lerp_f32(qa[0], qb[0], t),
            lerp_f32(qa[1], qb[1], t),
            lerp_f32(qa[2], qb[2], t),
            lerp_f32(qa[3], qb[3], t),
        ]);
    }

    let theta_0 = dot.clamp(-1.0, 1.0).acos();
    let theta = theta_0 * t;
    let sin_theta_0 = theta_0.sin();
    let s0 = (theta_0 - theta).sin() / sin_theta_0;
    let s1 = theta.sin() / sin_theta_0;

    normalize_quat([
        s0 * qa[0] + s1 * qb[0],
        s0 * qa[1] + s1 * qb[1],
        s0 * qa[2] + s1 * qb[2],
        s0 * qa[3] + s1 * qb[3],
    ])
}
