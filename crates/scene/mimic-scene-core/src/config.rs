//! Core configuration for mimic-scene-core.

use serde::{Deserialize, Serialize};

/// Tuning constants for animation, labels, and the static stage.
///
/// Every field has a default, so hosts may pass a partial JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Exponential smoothing rate toward step targets, per second.
    pub smoothing_rate: f32,
    /// Orbit speed (rad/s) for objects with `orbitRadius` but no `orbitSpeed`.
    pub default_orbit_speed: f32,
    /// Seconds between steps while playing.
    pub auto_advance_secs: f32,
    /// Extra height of an object label above the top of its shape.
    pub label_offset: f32,
    pub label_font_size: f32,
    /// Lift of a relationship label above the connector midpoint.
    pub relationship_label_lift: f32,
    pub relationship_font_size: f32,
    pub emissive_intensity: f32,
    pub environment: Environment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing_rate: 3.0,
            default_orbit_speed: 0.1,
            auto_advance_secs: 2.5,
            label_offset: 0.5,
            label_font_size: 0.5,
            relationship_label_lift: 0.5,
            relationship_font_size: 0.4,
            emissive_intensity: 1.5,
            environment: Environment::default(),
        }
    }
}

/// Static lighting and ground, identical for every scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Environment {
    pub ambient_intensity: f32,
    pub directional_position: [f32; 3],
    pub directional_intensity: f32,
    pub ground: GroundPlane,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.6,
            directional_position: [10.0, 10.0, 5.0],
            directional_intensity: 1.5,
            ground: GroundPlane::default(),
        }
    }
}

/// Horizontal plane just below the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroundPlane {
    pub width: f32,
    pub depth: f32,
    /// sRGB components in 0..1 (light blue, `#ADD8E6`).
    pub color: [f32; 3],
    pub y: f32,
    /// Rotation about X in radians; the plane geometry is authored in XY.
    pub rotation_x: f32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            width: 500.0,
            depth: 500.0,
            color: [173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0],
            y: -0.01,
            rotation_x: -std::f32::consts::FRAC_PI_2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{"smoothingRate": 6.0, "environment": {"ambientIntensity": 0.2}}"#)
                .unwrap();
        assert_eq!(cfg.smoothing_rate, 6.0);
        assert_eq!(cfg.auto_advance_secs, 2.5);
        assert_eq!(cfg.environment.ambient_intensity, 0.2);
        assert_eq!(cfg.environment.directional_position, [10.0, 10.0, 5.0]);
        assert_eq!(cfg.environment.ground.width, 500.0);
    }

    #[test]
    fn serializes_camel_case() {
        let v = serde_json::to_value(Config::default()).unwrap();
        assert!(v.get("emissiveIntensity").is_some());
        assert!(v["environment"]["ground"].get("rotationX").is_some());
    }
}
