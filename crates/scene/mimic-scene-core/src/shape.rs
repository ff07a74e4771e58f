//! Primitive shapes, size backfill, and the geometry descriptors handed to
//! renderer adapters.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Closed set of primitives a scene object can take.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Box,
    Sphere,
    Cone,
    Cylinder,
    Torus,
    Plane,
    Ring,
    Octahedron,
    Icosahedron,
}

impl Shape {
    /// Look up a shape by name (case-insensitive, with common aliases).
    pub fn from_name(name: &str) -> Option<Shape> {
        let shape = match name.trim().to_ascii_lowercase().as_str() {
            "box" | "cube" => Shape::Box,
            "sphere" => Shape::Sphere,
            "cone" | "pyramid" => Shape::Cone,
            "cylinder" => Shape::Cylinder,
            "torus" | "donut" => Shape::Torus,
            "plane" => Shape::Plane,
            "ring" => Shape::Ring,
            "octahedron" => Shape::Octahedron,
            "icosahedron" => Shape::Icosahedron,
            _ => return None,
        };
        Some(shape)
    }

    /// Like [`Shape::from_name`], substituting [`Shape::Box`] for unknown names.
    pub fn from_name_or_default(name: &str) -> Shape {
        Shape::from_name(name).unwrap_or_else(|| {
            log::warn!("unknown shape '{name}', rendering as box");
            Shape::Box
        })
    }
}

/// Backfill a declared size into exactly three positive components.
///
/// Width falls back to 1; height and depth fall back to width. Zero, negative,
/// and non-numeric components count as missing. A bare number is a one-component
/// size.
pub fn effective_size(declared: Option<&JsonValue>) -> [f32; 3] {
    let component = |v: Option<&JsonValue>| -> Option<f32> {
        let x = v?.as_f64()? as f32;
        (x.is_finite() && x > 0.0).then_some(x)
    };
    let (w, h, d) = match declared {
        Some(JsonValue::Array(items)) => (
            component(items.first()),
            component(items.get(1)),
            component(items.get(2)),
        ),
        Some(n @ JsonValue::Number(_)) => (component(Some(n)), None, None),
        _ => (None, None, None),
    };
    let w = w.unwrap_or(1.0);
    [w, h.unwrap_or(w), d.unwrap_or(w)]
}

/// Renderer-facing geometry parameters derived from shape and size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
    Cone { radius: f32, height: f32 },
    Cylinder { radius: f32, height: f32 },
    Torus { radius: f32, tube: f32 },
    Plane { width: f32, height: f32 },
    Ring { inner_radius: f32, outer_radius: f32 },
    Octahedron { radius: f32 },
    Icosahedron { radius: f32 },
}

/// Ratio between a ring's inner and outer radius.
const RING_INNER_RATIO: f32 = 0.7;

impl Geometry {
    pub fn new(shape: Shape, size: [f32; 3]) -> Geometry {
        let [w, h, d] = size;
        match shape {
            Shape::Box => Geometry::Box {
                width: w,
                height: h,
                depth: d,
            },
            Shape::Sphere => Geometry::Sphere {
                radius: (w + h + d) / 6.0,
            },
            Shape::Cone => Geometry::Cone {
                radius: w / 2.0,
                height: h,
            },
            Shape::Cylinder => Geometry::Cylinder {
                radius: w / 2.0,
                height: h,
            },
            Shape::Torus => Geometry::Torus {
                radius: w / 2.0,
                tube: d / 2.0,
            },
            Shape::Plane => Geometry::Plane {
                width: w,
                height: h,
            },
            Shape::Ring => Geometry::Ring {
                inner_radius: w / 2.0 * RING_INNER_RATIO,
                outer_radius: w / 2.0,
            },
            Shape::Octahedron => Geometry::Octahedron { radius: w / 2.0 },
            Shape::Icosahedron => Geometry::Icosahedron { radius: w / 2.0 },
        }
    }
}

/// Shape plus effective size, as handed to the renderer adapter each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub shape: Shape,
    pub size: [f32; 3],
    pub geometry: Geometry,
}

impl ShapeDescriptor {
    pub fn new(shape: Shape, size: [f32; 3]) -> Self {
        Self {
            shape,
            size,
            geometry: Geometry::new(shape, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn size_cascade_backfills_from_width() {
        assert_eq!(effective_size(Some(&json!([2]))), [2.0, 2.0, 2.0]);
        assert_eq!(effective_size(Some(&json!([2, 4]))), [2.0, 4.0, 2.0]);
        assert_eq!(effective_size(Some(&json!([2, 4, 6]))), [2.0, 4.0, 6.0]);
        assert_eq!(effective_size(None), [1.0, 1.0, 1.0]);
        assert_eq!(effective_size(Some(&json!(3))), [3.0, 3.0, 3.0]);
    }

    #[test]
    fn degenerate_components_count_as_missing() {
        assert_eq!(effective_size(Some(&json!([0, 0, 0]))), [1.0, 1.0, 1.0]);
        assert_eq!(effective_size(Some(&json!([3, -1, "x"]))), [3.0, 3.0, 3.0]);
        assert_eq!(effective_size(Some(&json!("big"))), [1.0, 1.0, 1.0]);
        assert_eq!(effective_size(Some(&json!([]))), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn aliases_and_unknown_shapes() {
        assert_eq!(Shape::from_name("Cube"), Some(Shape::Box));
        assert_eq!(Shape::from_name("pyramid"), Some(Shape::Cone));
        assert_eq!(Shape::from_name("donut"), Some(Shape::Torus));
        assert_eq!(Shape::from_name("dodecahedron"), None);
        assert_eq!(Shape::from_name_or_default("dodecahedron"), Shape::Box);
    }

    #[test]
    fn geometry_follows_size() {
        let sphere = Geometry::new(Shape::Sphere, [1.0, 2.0, 3.0]);
        assert_eq!(sphere, Geometry::Sphere { radius: 1.0 });
        let ring = Geometry::new(Shape::Ring, [2.0, 2.0, 2.0]);
        match ring {
            Geometry::Ring {
                inner_radius,
                outer_radius,
            } => {
                assert_eq!(outer_radius, 1.0);
                assert!((inner_radius - 0.7).abs() < 1e-6);
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }
}
