//! Step resolution: fold sequence actions into an object's target state.
//!
//! Resolution is pure. Entries apply in ascending step number; entries sharing
//! a step number apply in array order, so later entries win per field.
//! Actions with a missing or malformed payload leave the state unchanged.

use serde::{Deserialize, Serialize};

use crate::data::{SceneObject, SequenceStep, StepAction};
use crate::hierarchy::SceneIndex;
use crate::ids::ObjIdx;
use crate::interp::functions::{deg_to_rad, quat_from_euler_xyz};
use crate::transform::Transform;

/// Authoritative (non-interpolated) state of an object at a step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedState {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    /// Radians, XYZ order.
    pub rotation: [f32; 3],
    pub color: [f32; 3],
    pub visible: bool,
}

impl ResolvedState {
    /// Declared state of the object before any step applies.
    pub fn initial(object: &SceneObject) -> Self {
        Self {
            position: object.position,
            scale: [1.0, 1.0, 1.0],
            rotation: deg_to_rad(object.rotation),
            color: object.color,
            visible: object.visible,
        }
    }

    /// Apply one action in place.
    pub fn apply(&mut self, action: &StepAction) {
        match action {
            StepAction::Move {
                position: Some(p),
            } => self.position = *p,
            StepAction::Rotate {
                rotation: Some(r),
            } => self.rotation = deg_to_rad(*r),
            StepAction::Scale { scale: Some(s) } => self.scale = *s,
            StepAction::ChangeColor { color: Some(c) } => self.color = *c,
            StepAction::Appear => self.visible = true,
            StepAction::Disappear => self.visible = false,
            StepAction::Move { position: None }
            | StepAction::Rotate { rotation: None }
            | StepAction::Scale { scale: None }
            | StepAction::ChangeColor { color: None }
            | StepAction::Unknown(_) => {}
        }
    }

    pub fn orientation(&self) -> [f32; 4] {
        quat_from_euler_xyz(self.rotation)
    }

    /// Local transform in the parent's frame.
    pub fn local_transform(&self) -> Transform {
        Transform::new(self.position, self.orientation(), self.scale)
    }
}

#[inline]
fn applies(step: u32, current_step: i64) -> bool {
    step >= 1 && i64::from(step) <= current_step
}

/// Resolve `object` at `current_step` by scanning the whole sequence.
///
/// Any integer is accepted: zero or negative yields the initial state, values
/// past the last step yield the fully folded state.
pub fn resolve(object: &SceneObject, sequence: &[SequenceStep], current_step: i64) -> ResolvedState {
    let mut state = ResolvedState::initial(object);
    if current_step < 1 {
        return state;
    }
    let mut hits: Vec<&SequenceStep> = sequence
        .iter()
        .filter(|s| s.target_id == object.id && applies(s.step, current_step))
        .collect();
    // stable: same-step entries keep array order
    hits.sort_by_key(|s| s.step);
    for s in hits {
        state.apply(&s.action);
    }
    state
}

/// Per-object view of the sequence: indices of the entries targeting each
/// object, stably sorted by step number.
#[derive(Debug, Default, Clone)]
pub struct StepTimeline {
    per_object: Vec<Vec<usize>>,
    max_step: u32,
}

impl StepTimeline {
    pub fn build(index: &SceneIndex, sequence: &[SequenceStep]) -> Self {
        let mut per_object: Vec<Vec<usize>> = vec![Vec::new(); index.len()];
        let mut max_step = 0;
        for (i, s) in sequence.iter().enumerate() {
            match index.get(&s.target_id) {
                Some(obj) if s.step >= 1 => {
                    per_object[obj.index()].push(i);
                    max_step = max_step.max(s.step);
                }
                Some(_) => {}
                None => log::debug!(
                    "sequence[{i}] targets unknown object '{}'; ignored",
                    s.target_id
                ),
            }
        }
        for entries in &mut per_object {
            entries.sort_by_key(|&i| sequence[i].step);
        }
        Self {
            per_object,
            max_step,
        }
    }

    /// Highest step number that changes anything.
    pub fn max_step(&self) -> u32 {
        self.max_step
    }

    /// Same result as [`resolve`] for the object at `idx`, without scanning
    /// entries that target other objects.
    ///
    /// Duplicate ids share the first declaration's entries, matching lookup by id.
    pub fn resolve(
        &self,
        idx: ObjIdx,
        object: &SceneObject,
        sequence: &[SequenceStep],
        current_step: i64,
    ) -> ResolvedState {
        let mut state = ResolvedState::initial(object);
        if current_step < 1 {
            return state;
        }
        let Some(entries) = self.per_object.get(idx.index()) else {
            return state;
        };
        for &i in entries {
            let s = &sequence[i];
            if i64::from(s.step) > current_step {
                break;
            }
            state.apply(&s.action);
        }
        state
    }

    /// Resolve every object of an indexed graph.
    pub fn resolve_all(
        &self,
        index: &SceneIndex,
        objects: &[SceneObject],
        sequence: &[SequenceStep],
        current_step: i64,
    ) -> Vec<ResolvedState> {
        objects
            .iter()
            .enumerate()
            .map(|(i, obj)| {
                let owner = index.get(&obj.id).unwrap_or(ObjIdx::from(i));
                self.resolve(owner, obj, sequence, current_step)
            })
            .collect()
    }
}
