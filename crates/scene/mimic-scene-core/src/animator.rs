//! Per-frame animation of rendered state.
//!
//! - stepped mode: exponential smoothing toward the resolved target
//!   (`alpha = clamp(dt * rate, 0, 1)`), slerp for orientation, visibility snaps
//! - idle mode (no sequence): orbit around the parent origin and mesh spin,
//!   driven by the object's motion hints
//!
//! All functions are pure: `(current, target, dt) -> next`.

use serde::{Deserialize, Serialize};

use crate::data::SceneObject;
use crate::interp::functions::{lerp_vec3, quat_from_rotation_y, quat_mul, slerp_quat};
use crate::resolver::ResolvedState;
use crate::transform::Transform;

/// What is actually on screen for one object, trailing its resolved state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderedState {
    /// Local position in the parent's frame.
    pub position: [f32; 3],
    /// Unit quaternion (x, y, z, w).
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub color: [f32; 3],
    pub visible: bool,
    /// Accumulated idle spin of the primary mesh about local Y, radians.
    pub spin: f32,
}

impl RenderedState {
    /// Rendered state sitting exactly on `target`.
    pub fn at(target: &ResolvedState) -> Self {
        Self {
            position: target.position,
            rotation: target.orientation(),
            scale: target.scale,
            color: target.color,
            visible: target.visible,
            spin: 0.0,
        }
    }

    /// Local transform of the object's group (children compose with this).
    pub fn local_transform(&self) -> Transform {
        Transform::new(self.position, self.rotation, self.scale)
    }

    /// Transform of the primary mesh inside the group (idle spin only).
    pub fn mesh_transform(&self) -> Transform {
        Transform::new([0.0; 3], quat_from_rotation_y(self.spin), [1.0; 3])
    }
}

/// Missing, negative, or non-finite deltas count as no elapsed time.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Blend factor for one frame, never above 1 so approach cannot overshoot.
#[inline]
pub fn smoothing_factor(dt: f32, rate: f32) -> f32 {
    let rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
    (sanitize_dt(dt) * rate).min(1.0)
}

/// Advance `current` one frame toward `target`.
pub fn advance(current: &RenderedState, target: &ResolvedState, dt: f32, rate: f32) -> RenderedState {
    let t = smoothing_factor(dt, rate);
    RenderedState {
        position: lerp_vec3(current.position, target.position, t),
        rotation: slerp_quat(current.rotation, target.orientation(), t),
        scale: lerp_vec3(current.scale, target.scale, t),
        color: lerp_vec3(current.color, target.color, t),
        visible: target.visible,
        spin: current.spin,
    }
}

/// Orbit angle at `elapsed` seconds, wrapped to `[0, TAU)`; `speed` of `None`
/// uses `default_speed`.
///
/// Time stays in `f64` until the phase is wrapped so long-running scenes keep
/// sub-frame resolution.
#[inline]
pub fn orbit_angle(elapsed: f64, speed: Option<f32>, default_speed: f32) -> f32 {
    let speed = f64::from(speed.unwrap_or(default_speed));
    (elapsed * speed).rem_euclid(std::f64::consts::TAU) as f32
}

/// Local position on an XZ circle of `radius` around the parent origin,
/// keeping the declared height.
#[inline]
pub fn orbit_position(base: [f32; 3], radius: f32, angle: f32) -> [f32; 3] {
    let (s, c) = angle.sin_cos();
    [s * radius, base[1], c * radius]
}

/// Idle-mode frame: state snaps to `initial`, motion comes from the hints.
pub fn advance_idle(
    current: &RenderedState,
    object: &SceneObject,
    initial: &ResolvedState,
    elapsed: f64,
    dt: f32,
    default_orbit_speed: f32,
) -> RenderedState {
    let mut next = RenderedState::at(initial);
    if let Some(radius) = object.orbit_radius {
        let angle = orbit_angle(elapsed, object.orbit_speed, default_orbit_speed);
        next.position = orbit_position(initial.position, radius, angle);
    }
    next.spin = current.spin;
    if let Some(speed) = object.rotation_speed {
        next.spin = (current.spin + sanitize_dt(dt) * speed) % std::f32::consts::TAU;
    }
    next
}

/// World transform of the primary mesh given the group's world transform.
pub fn mesh_world(group_world: &Transform, rendered: &RenderedState) -> Transform {
    if rendered.spin == 0.0 {
        return *group_world;
    }
    let mut t = *group_world;
    t.rotation = quat_mul(group_world.rotation, rendered.mesh_transform().rotation);
    t
}
