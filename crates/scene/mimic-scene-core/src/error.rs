//! Errors raised while turning a scene payload into a [`SceneGraph`].
//!
//! Only structural problems are errors. Anomalies inside individual objects,
//! relationships, or steps degrade per entity and never surface here.
//!
//! [`SceneGraph`]: crate::data::SceneGraph

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no JSON object found in scene text")]
    NoJsonObject,
    #[error("payload has no scene graph (expected `sceneGraph` or top-level objects/relationships/sequence)")]
    MissingSceneGraph,
    #[error("`{field}` must be an array")]
    InvalidCollection { field: &'static str },
}

pub type Result<T> = std::result::Result<T, SceneError>;
