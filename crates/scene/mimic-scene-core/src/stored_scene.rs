//! Intake of scene-generator JSON into the canonical model (data.rs).
//!
//! The generator output is loosely shaped, so conversion is tolerant per
//! entity:
//! - entries that are not JSON objects, and objects without an id, are dropped
//! - malformed vectors, colors, and step payloads fall back or become no-ops
//! - only a missing graph or a non-array collection is an error

use serde_json::{Map, Value as JsonValue};

use crate::color::{parse_color, DEFAULT_COLOR};
use crate::data::{
    Relationship, RelationshipKind, SceneGraph, SceneObject, SceneResponse, SequenceStep,
    StepAction,
};
use crate::error::{Result, SceneError};
use crate::shape::{effective_size, Shape};

/// Parse a service response: either `{ explanation, sceneGraph }` or a bare
/// scene graph at the top level.
pub fn parse_scene_response(s: &str) -> Result<SceneResponse> {
    let value: JsonValue = serde_json::from_str(s)?;
    scene_response_from_value(value)
}

/// Parse a response and keep only the scene graph.
pub fn parse_scene_json(s: &str) -> Result<SceneGraph> {
    parse_scene_response(s).map(|r| r.scene_graph)
}

/// Locate the JSON object inside raw generator text (which may carry prose or
/// code fences around it): the slice from the first `{` to the last `}`.
pub fn extract_scene_json(text: &str) -> Result<&str> {
    let start = text.find('{').ok_or(SceneError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(SceneError::NoJsonObject)?;
    if end < start {
        return Err(SceneError::NoJsonObject);
    }
    Ok(&text[start..=end])
}

/// [`extract_scene_json`] followed by [`parse_scene_response`].
pub fn parse_scene_text(text: &str) -> Result<SceneResponse> {
    parse_scene_response(extract_scene_json(text)?)
}

pub fn scene_response_from_value(value: JsonValue) -> Result<SceneResponse> {
    let JsonValue::Object(mut map) = value else {
        return Err(SceneError::MissingSceneGraph);
    };
    let explanation = map
        .get("explanation")
        .and_then(JsonValue::as_str)
        .map(str::to_string);

    let scene_graph = match map.remove("sceneGraph") {
        Some(JsonValue::Object(inner)) => scene_graph_from_map(&inner)?,
        _ if ["objects", "relationships", "sequence"]
            .iter()
            .any(|k| map.contains_key(*k)) =>
        {
            scene_graph_from_map(&map)?
        }
        _ => return Err(SceneError::MissingSceneGraph),
    };

    Ok(SceneResponse {
        explanation,
        scene_graph,
    })
}

/// Convert a JSON scene graph. Absent collections default to empty.
pub fn scene_graph_from_value(value: &JsonValue) -> Result<SceneGraph> {
    match value {
        JsonValue::Object(map) => scene_graph_from_map(map),
        _ => Err(SceneError::MissingSceneGraph),
    }
}

impl TryFrom<JsonValue> for SceneGraph {
    type Error = SceneError;

    fn try_from(value: JsonValue) -> Result<Self> {
        scene_graph_from_value(&value)
    }
}

fn scene_graph_from_map(map: &Map<String, JsonValue>) -> Result<SceneGraph> {
    let objects: Vec<SceneObject> = collection(map, "objects")?
        .iter()
        .enumerate()
        .filter_map(|(i, v)| object_from_value(i, v))
        .collect();
    let relationships: Vec<Relationship> = collection(map, "relationships")?
        .iter()
        .enumerate()
        .filter_map(|(i, v)| relationship_from_value(i, v))
        .collect();
    let sequence: Vec<SequenceStep> = collection(map, "sequence")?
        .iter()
        .enumerate()
        .filter_map(|(i, v)| step_from_value(i, v))
        .collect();

    log::debug!(
        "scene graph parsed: {} objects, {} relationships, {} steps",
        objects.len(),
        relationships.len(),
        sequence.len()
    );
    Ok(SceneGraph::new(objects, relationships, sequence))
}

fn collection<'a>(map: &'a Map<String, JsonValue>, field: &'static str) -> Result<&'a [JsonValue]> {
    match map.get(field) {
        None | Some(JsonValue::Null) => Ok(&[]),
        Some(JsonValue::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(SceneError::InvalidCollection { field }),
    }
}

/// Non-empty string, or a number rendered as text.
fn id_string(v: Option<&JsonValue>) -> Option<String> {
    match v? {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text(v: Option<&JsonValue>) -> Option<String> {
    v.and_then(JsonValue::as_str).map(str::to_string)
}

fn flag(v: Option<&JsonValue>) -> bool {
    matches!(v, Some(JsonValue::Bool(true)))
}

/// Finite, non-zero number. Zero counts as unset for motion hints.
fn nonzero(v: Option<&JsonValue>) -> Option<f32> {
    let x = v?.as_f64()? as f32;
    (x.is_finite() && x != 0.0).then_some(x)
}

/// Parse a JSON array into a 3-vector. The first three items must be finite
/// numbers when present; missing items take `fill`, extra items are ignored.
pub fn parse_vec3(v: &JsonValue, fill: f32) -> Option<[f32; 3]> {
    let items = v.as_array()?;
    let mut out = [fill; 3];
    for (slot, item) in out.iter_mut().zip(items.iter()) {
        let x = item.as_f64()? as f32;
        if !x.is_finite() {
            return None;
        }
        *slot = x;
    }
    Some(out)
}

fn object_from_value(index: usize, value: &JsonValue) -> Option<SceneObject> {
    let Some(map) = value.as_object() else {
        log::warn!("objects[{index}] is not an object; dropped");
        return None;
    };
    let Some(id) = id_string(map.get("id")) else {
        log::warn!("objects[{index}] has no id; dropped");
        return None;
    };

    let shape = match map.get("shape").and_then(JsonValue::as_str) {
        Some(name) => Shape::from_name_or_default(name),
        None => Shape::Box,
    };
    let color = match map.get("color") {
        None | Some(JsonValue::Null) => DEFAULT_COLOR,
        Some(spec) => parse_color(spec).unwrap_or_else(|| {
            log::warn!("object '{id}' has unusable color {spec}; using grey");
            DEFAULT_COLOR
        }),
    };

    Some(SceneObject {
        parent: id_string(map.get("parent")),
        shape,
        size: effective_size(map.get("size")),
        position: map
            .get("position")
            .and_then(|v| parse_vec3(v, 0.0))
            .unwrap_or([0.0; 3]),
        rotation: map
            .get("rotation")
            .and_then(|v| parse_vec3(v, 0.0))
            .unwrap_or([0.0; 3]),
        color,
        visible: !matches!(map.get("visible"), Some(JsonValue::Bool(false))),
        label: text(map.get("label")),
        show_label: flag(map.get("showLabel")),
        emissive: flag(map.get("emissive")),
        orbit_radius: nonzero(map.get("orbitRadius")),
        orbit_speed: nonzero(map.get("orbitSpeed")),
        rotation_speed: nonzero(map.get("rotationSpeed")),
        id,
    })
}

fn relationship_from_value(index: usize, value: &JsonValue) -> Option<Relationship> {
    let Some(map) = value.as_object() else {
        log::warn!("relationships[{index}] is not an object; dropped");
        return None;
    };
    let kind = map
        .get("type")
        .or_else(|| map.get("kind"))
        .and_then(JsonValue::as_str)
        .map(RelationshipKind::from_name)
        .unwrap_or_default();
    Some(Relationship {
        from: id_string(map.get("from")).unwrap_or_default(),
        to: id_string(map.get("to")).unwrap_or_default(),
        kind,
        label: text(map.get("label")),
    })
}

/// Step number: positive integers, integral floats, and numeric strings.
/// Anything else maps to 0, which never applies.
fn step_number(v: Option<&JsonValue>) -> u32 {
    match v {
        Some(JsonValue::Number(n)) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).unwrap_or(u32::MAX)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f > 0.0 && f.fract() == 0.0 => {
                        f.min(u32::MAX as f64) as u32
                    }
                    _ => 0,
                }
            }
        }
        Some(JsonValue::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn action_from_parts(name: &str, params: Option<&Map<String, JsonValue>>) -> StepAction {
    let param = |key: &str| params.and_then(|p| p.get(key));
    match name.to_ascii_lowercase().as_str() {
        "move" => StepAction::Move {
            position: param("position").and_then(|v| parse_vec3(v, 0.0)),
        },
        "rotate" => StepAction::Rotate {
            rotation: param("rotation").and_then(|v| parse_vec3(v, 0.0)),
        },
        "scale" => StepAction::Scale {
            scale: param("scale").and_then(|v| parse_vec3(v, 1.0)),
        },
        "changecolor" => StepAction::ChangeColor {
            color: param("color").and_then(parse_color),
        },
        "appear" => StepAction::Appear,
        "disappear" => StepAction::Disappear,
        _ => StepAction::Unknown(name.to_string()),
    }
}

fn step_from_value(index: usize, value: &JsonValue) -> Option<SequenceStep> {
    let Some(map) = value.as_object() else {
        log::warn!("sequence[{index}] is not an object; dropped");
        return None;
    };
    let step = step_number(map.get("step"));
    if step == 0 {
        log::warn!("sequence[{index}] has no usable step number; it will never apply");
    }
    let target_id = id_string(map.get("targetId")).unwrap_or_default();
    let name = map.get("action").and_then(JsonValue::as_str).unwrap_or("");
    let action = action_from_parts(name, map.get("params").and_then(JsonValue::as_object));
    if let StepAction::Unknown(name) = &action {
        log::warn!("sequence[{index}] has unknown action '{name}'; it is a no-op");
    }

    Some(SequenceStep {
        step,
        target_id,
        action,
        label: text(map.get("label")),
    })
}
