//! Output contracts from the scene engine.
//!
//! A [`Frame`] holds everything a renderer adapter needs to draw one tick:
//! one draw call per effectively visible object, one connector per resolvable
//! relationship, the current step metadata, and the semantic events raised
//! since the previous frame.

use serde::{Deserialize, Serialize};

use crate::data::RelationshipKind;
use crate::navigation::StepInfo;
use crate::shape::ShapeDescriptor;
use crate::transform::Transform;

/// Text drawn in world space, facing the camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDraw {
    pub text: String,
    pub position: [f32; 3],
    pub font_size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Emissive {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// One visible object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCall {
    pub id: String,
    /// World transform of the primary mesh (idle spin included).
    pub transform: Transform,
    pub shape: ShapeDescriptor,
    pub color: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive: Option<Emissive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelDraw>,
}

/// A presentational link between two objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub start: [f32; 3],
    pub end: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelDraw>,
}

/// Discrete signals raised by commands and playback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[non_exhaustive]
pub enum SceneEvent {
    SceneAdopted {
        objects: usize,
        steps: u32,
    },
    StepChanged {
        #[serde(rename = "oldStep")]
        old_step: u32,
        #[serde(rename = "newStep")]
        new_step: u32,
    },
    PlaybackStarted,
    PlaybackPaused,
    /// Auto-advance reached the last step.
    PlaybackEnded {
        step: u32,
    },
}

/// Output returned by `SceneEngine::update()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub draws: Vec<DrawCall>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
    pub step: StepInfo,
    #[serde(default)]
    pub events: Vec<SceneEvent>,
}

impl Frame {
    #[inline]
    pub fn clear(&mut self) {
        self.draws.clear();
        self.connectors.clear();
        self.events.clear();
    }

    /// Draw call for the object with this id, if it is visible.
    pub fn draw(&self, id: &str) -> Option<&DrawCall> {
        self.draws.iter().find(|d| d.id == id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty() && self.connectors.is_empty() && self.events.is_empty()
    }
}
