//! Input contracts for the scene engine.
//!
//! Hosts queue navigation and playback commands and hand them to
//! `SceneEngine::apply()` before the next `update()`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SceneCommand {
    /// Jump to a step; out-of-range values are clamped to `0..=total`.
    SetStep { step: i64 },
    Next,
    Prev,
    /// Back to the initial scene (step 0).
    Reset,
    Play,
    Pause,
}
