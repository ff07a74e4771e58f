//! Identifiers for core entities.

use serde::{Deserialize, Serialize};

/// Dense index of an object within the adopted `SceneGraph::objects`.
/// Only meaningful for the graph it was issued for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ObjIdx(pub u32);

impl ObjIdx {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for ObjIdx {
    #[inline]
    fn from(i: usize) -> Self {
        ObjIdx(i as u32)
    }
}

/// Monotonic counter of adopted graphs, so hosts can tell a replaced scene
/// from an updated one.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SceneEpoch(pub u32);

impl SceneEpoch {
    #[inline]
    pub fn next(self) -> SceneEpoch {
        SceneEpoch(self.0.wrapping_add(1))
    }
}
