//! Interpolation helpers:
//! - lerp_f32 / lerp_vec3 (component-wise)
//! - slerp_quat (spherical, shortest arc)
//! - quaternion construction from XYZ Euler angles and basic algebra

/// Threshold under which two quaternions are treated as parallel for slerp.
const SLERP_EPSILON: f32 = 1e-6;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
pub fn mul_vec3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2]]
}

#[inline]
pub fn add_vec3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub_vec3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn length_vec3(a: [f32; 3]) -> f32 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

#[inline]
pub fn distance_vec3(a: [f32; 3], b: [f32; 3]) -> f32 {
    length_vec3(sub_vec3(a, b))
}

#[inline]
pub fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
pub fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

#[inline]
pub fn deg_to_rad(v: [f32; 3]) -> [f32; 3] {
    [v[0].to_radians(), v[1].to_radians(), v[2].to_radians()]
}

/// Quaternion (x, y, z, w) for intrinsic XYZ Euler angles in radians.
pub fn quat_from_euler_xyz(e: [f32; 3]) -> [f32; 4] {
    let (s1, c1) = (e[0] * 0.5).sin_cos();
    let (s2, c2) = (e[1] * 0.5).sin_cos();
    let (s3, c3) = (e[2] * 0.5).sin_cos();
    [
        s1 * c2 * c3 + c1 * s2 * s3,
        c1 * s2 * c3 - s1 * c2 * s3,
        c1 * c2 * s3 + s1 * s2 * c3,
        c1 * c2 * c3 - s1 * s2 * s3,
    ]
}

/// Rotation about +Y by `angle` radians.
#[inline]
pub fn quat_from_rotation_y(angle: f32) -> [f32; 4] {
    let (s, c) = (angle * 0.5).sin_cos();
    [0.0, s, 0.0, c]
}

/// Hamilton product `a * b` (apply `b` first, then `a`).
#[inline]
pub fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [
        a[0] * b[3] + a[3] * b[0] + a[1] * b[2] - a[2] * b[1],
        a[1] * b[3] + a[3] * b[1] + a[2] * b[0] - a[0] * b[2],
        a[2] * b[3] + a[3] * b[2] + a[0] * b[1] - a[1] * b[0],
        a[3] * b[3] - a[0] * b[0] - a[1] * b[1] - a[2] * b[2],
    ]
}

/// Rotate vector `v` by unit quaternion `q`.
#[inline]
pub fn quat_rotate_vec3(q: [f32; 4], v: [f32; 3]) -> [f32; 3] {
    let u = [q[0], q[1], q[2]];
    let t = cross(u, v);
    let t = [2.0 * t[0], 2.0 * t[1], 2.0 * t[2]];
    let ut = cross(u, t);
    [
        v[0] + q[3] * t[0] + ut[0],
        v[1] + q[3] * t[1] + ut[1],
        v[2] + q[3] * t[2] + ut[2],
    ]
}

/// Angle in radians between two unit quaternions, sign-agnostic.
#[inline]
pub fn quat_angle_between(a: [f32; 4], b: [f32; 4]) -> f32 {
    let d = dot4(a, b).abs().min(1.0);
    2.0 * d.acos()
}

/// Quaternion SLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Falls back to normalized lerp when the inputs are nearly parallel.
pub fn slerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    let mut cos_half = dot4(a, b);
    if cos_half < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
        cos_half = -cos_half;
    }
    if cos_half >= 1.0 {
        return a;
    }

    let sqr_sin = 1.0 - cos_half * cos_half;
    if sqr_sin <= SLERP_EPSILON {
        let s = 1.0 - t;
        return normalize4([
            s * a[0] + t * b[0],
            s * a[1] + t * b[1],
            s * a[2] + t * b[2],
            s * a[3] + t * b[3],
        ]);
    }

    let sin_half = sqr_sin.sqrt();
    let half_theta = sin_half.atan2(cos_half);
    let ra = ((1.0 - t) * half_theta).sin() / sin_half;
    let rb = (t * half_theta).sin() / sin_half;
    normalize4([
        a[0] * ra + b[0] * rb,
        a[1] * ra + b[1] * rb,
        a[2] * ra + b[2] * rb,
        a[3] * ra + b[3] * rb,
    ])
}
