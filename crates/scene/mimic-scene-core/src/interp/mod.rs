//! Interpolation helpers shared by the resolver, the animator, and the
//! hierarchy composer.
//!
//! Vectors are `[f32; 3]`, quaternions are `[f32; 4]` in (x, y, z, w) order.

pub mod functions;

pub use functions::{lerp_f32, lerp_vec3, quat_from_euler_xyz, slerp_quat};
