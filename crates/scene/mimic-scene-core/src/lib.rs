//! Mimic Scene Core (renderer-agnostic)
//!
//! Stepwise scene-graph state engine: a flat list of shaped objects with
//! optional parents, presentational relationships, and a numbered action
//! sequence. Navigating to a step resolves each object's target state; every
//! frame the rendered state eases toward it (or follows idle orbit/spin
//! motion when the graph has no sequence) and the engine emits draw calls.

pub mod animator;
pub mod color;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod navigation;
pub mod outputs;
pub mod relationships;
pub mod resolver;
pub mod shape;
pub mod stored_scene;
pub mod transform;

// Re-exports for consumers (adapters)
pub use animator::RenderedState;
pub use config::{Config, Environment, GroundPlane};
pub use data::{
    Relationship, RelationshipKind, SceneGraph, SceneObject, SceneResponse, SequenceStep,
    StepAction,
};
pub use engine::SceneEngine;
pub use error::{Result, SceneError};
pub use hierarchy::SceneIndex;
pub use ids::{ObjIdx, SceneEpoch};
pub use inputs::SceneCommand;
pub use navigation::{StepCursor, StepInfo};
pub use outputs::{Connector, DrawCall, Emissive, Frame, LabelDraw, SceneEvent};
pub use resolver::{resolve, ResolvedState, StepTimeline};
pub use shape::{Geometry, Shape, ShapeDescriptor};
pub use stored_scene::{extract_scene_json, parse_scene_json, parse_scene_response, parse_scene_text};
pub use transform::Transform;
