//! Translation / rotation / scale triple and local→world composition.

use serde::{Deserialize, Serialize};

use crate::interp::functions::{add_vec3, mul_vec3, quat_mul, quat_rotate_vec3};

pub const IDENTITY_QUAT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// TRS transform. Rotation is a unit quaternion (x, y, z, w).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: [0.0, 0.0, 0.0],
        rotation: IDENTITY_QUAT,
        scale: [1.0, 1.0, 1.0],
    };

    pub fn new(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Map a point from this transform's local frame into its parent frame.
    #[inline]
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        add_vec3(
            self.translation,
            quat_rotate_vec3(self.rotation, mul_vec3(self.scale, p)),
        )
    }

    /// Compose `self` (parent, world) with `local` (child, in parent's frame).
    ///
    /// Scale is composed component-wise; shear from non-uniform parent scale
    /// combined with child rotation is not represented.
    pub fn mul_transform(&self, local: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(local.translation),
            rotation: quat_mul(self.rotation, local.rotation),
            scale: mul_vec3(self.scale, local.scale),
        }
    }
}
