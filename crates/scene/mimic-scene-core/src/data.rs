//! Canonical scene-graph data model.
//!
//! These types carry no behavior beyond small accessors. Conversion from the
//! loosely-shaped JSON produced by scene generators lives in `stored_scene.rs`.

use serde::{Deserialize, Serialize};

use crate::color::DEFAULT_COLOR;
use crate::shape::{Shape, ShapeDescriptor};

/// A renderable node.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub id: String,
    /// Id of the parent object; `None` means root.
    pub parent: Option<String>,
    pub shape: Shape,
    /// Effective size, always three positive components.
    pub size: [f32; 3],
    pub position: [f32; 3],
    /// Declared rotation in degrees (XYZ order).
    pub rotation: [f32; 3],
    /// sRGB components in 0..1.
    pub color: [f32; 3],
    pub visible: bool,
    pub label: Option<String>,
    pub show_label: bool,
    pub emissive: bool,
    /// Idle-motion hints, only used when the graph has no sequence.
    pub orbit_radius: Option<f32>,
    pub orbit_speed: Option<f32>,
    pub rotation_speed: Option<f32>,
}

impl SceneObject {
    /// A grey unit box at the origin.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            shape: Shape::Box,
            size: [1.0, 1.0, 1.0],
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            color: DEFAULT_COLOR,
            visible: true,
            label: None,
            show_label: false,
            emissive: false,
            orbit_radius: None,
            orbit_speed: None,
            rotation_speed: None,
        }
    }

    pub fn descriptor(&self) -> ShapeDescriptor {
        ShapeDescriptor::new(self.shape, self.size)
    }

    /// Label text when the object asks for it to be shown.
    pub fn visible_label(&self) -> Option<&str> {
        if self.show_label {
            self.label.as_deref().filter(|l| !l.is_empty())
        } else {
            None
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    #[default]
    Line,
    Arrow,
}

impl RelationshipKind {
    pub fn from_name(name: &str) -> RelationshipKind {
        if name.trim().eq_ignore_ascii_case("arrow") {
            RelationshipKind::Arrow
        } else {
            RelationshipKind::Line
        }
    }
}

/// Non-hierarchical, purely presentational link between two objects.
#[derive(Clone, Debug, PartialEq)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub label: Option<String>,
}

/// Action performed by a sequence step.
///
/// Payload-carrying variants hold `None` when the payload was missing or
/// malformed; resolving such an action leaves the state unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum StepAction {
    Move { position: Option<[f32; 3]> },
    /// Rotation in degrees.
    Rotate { rotation: Option<[f32; 3]> },
    Scale { scale: Option<[f32; 3]> },
    ChangeColor { color: Option<[f32; 3]> },
    Appear,
    Disappear,
    /// Unrecognized action name, kept for diagnostics.
    Unknown(String),
}

impl StepAction {
    pub fn name(&self) -> &str {
        match self {
            StepAction::Move { .. } => "move",
            StepAction::Rotate { .. } => "rotate",
            StepAction::Scale { .. } => "scale",
            StepAction::ChangeColor { .. } => "changeColor",
            StepAction::Appear => "appear",
            StepAction::Disappear => "disappear",
            StepAction::Unknown(name) => name,
        }
    }
}

/// One discrete event in the numbered timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceStep {
    /// 1-based step number; 0 marks an entry that never applies.
    pub step: u32,
    pub target_id: String,
    pub action: StepAction,
    pub label: Option<String>,
}

/// Objects, relationships, and the ordered action sequence of one visualization.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct SceneGraph {
    pub objects: Vec<SceneObject>,
    pub relationships: Vec<Relationship>,
    pub sequence: Vec<SequenceStep>,
}

impl SceneGraph {
    pub fn new(
        objects: Vec<SceneObject>,
        relationships: Vec<Relationship>,
        sequence: Vec<SequenceStep>,
    ) -> Self {
        Self {
            objects,
            relationships,
            sequence,
        }
    }

    /// Whether the graph drives stepped motion (otherwise idle motion applies).
    pub fn has_sequence(&self) -> bool {
        !self.sequence.is_empty()
    }

    /// Number of navigable steps, as shown to the user.
    pub fn step_count(&self) -> u32 {
        u32::try_from(self.sequence.len()).unwrap_or(u32::MAX)
    }
}

/// Envelope returned by the text-to-scene service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneResponse {
    pub explanation: Option<String>,
    pub scene_graph: SceneGraph,
}
