//! Parent/child index over a flat object list, and world-space composition.
//!
//! Built once when a graph is adopted. Objects are referred to by their dense
//! position in `SceneGraph::objects` ([`ObjIdx`]).

use hashbrown::HashMap;

use crate::data::SceneObject;
use crate::ids::ObjIdx;
use crate::transform::Transform;

#[derive(Debug, Default, Clone)]
pub struct SceneIndex {
    by_id: HashMap<String, ObjIdx>,
    parents: Vec<Option<ObjIdx>>,
    children: Vec<Vec<ObjIdx>>,
    roots: Vec<ObjIdx>,
    /// Every object exactly once, each parent before its children.
    order: Vec<ObjIdx>,
}

impl SceneIndex {
    pub fn build(objects: &[SceneObject]) -> Self {
        let n = objects.len();
        let mut by_id: HashMap<String, ObjIdx> = HashMap::with_capacity(n);
        for (i, obj) in objects.iter().enumerate() {
            if by_id.contains_key(obj.id.as_str()) {
                log::warn!("duplicate object id '{}'; first declaration wins", obj.id);
                continue;
            }
            by_id.insert(obj.id.clone(), ObjIdx::from(i));
        }

        let mut parents: Vec<Option<ObjIdx>> = Vec::with_capacity(n);
        for (i, obj) in objects.iter().enumerate() {
            let parent = obj.parent.as_deref().and_then(|pid| match by_id.get(pid) {
                Some(&p) if p.index() != i => Some(p),
                Some(_) => {
                    log::warn!("object '{}' is its own parent; treated as root", obj.id);
                    None
                }
                None => {
                    log::debug!("object '{}' has unknown parent '{pid}'; treated as root", obj.id);
                    None
                }
            });
            parents.push(parent);
        }

        let mut index = SceneIndex {
            by_id,
            parents,
            children: vec![Vec::new(); n],
            roots: Vec::new(),
            order: Vec::with_capacity(n),
        };
        index.link_children();
        index.break_cycles(objects);
        index
    }

    fn link_children(&mut self) {
        for (i, parent) in self.parents.iter().enumerate() {
            match parent {
                Some(p) => self.children[p.index()].push(ObjIdx::from(i)),
                None => self.roots.push(ObjIdx::from(i)),
            }
        }
    }

    /// Traverse from the roots; anything left unvisited hangs off a parent
    /// cycle. Promote the first revisited node of each such chain to a root.
    fn break_cycles(&mut self, objects: &[SceneObject]) {
        let n = self.parents.len();
        let mut visited = vec![false; n];
        for r in self.roots.clone() {
            self.visit_subtree(r, &mut visited);
        }

        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut seen = vec![false; n];
            let mut cur = start;
            let cut = loop {
                if seen[cur] {
                    break cur;
                }
                seen[cur] = true;
                match self.parents[cur] {
                    Some(p) => cur = p.index(),
                    // Unreachable for a well-formed index: every root was visited.
                    None => break cur,
                }
            };
            if let Some(old) = self.parents[cut].take() {
                self.children[old.index()].retain(|c| c.index() != cut);
            }
            log::warn!(
                "parent cycle through object '{}'; promoted to root",
                objects[cut].id
            );
            self.roots.push(ObjIdx::from(cut));
            self.visit_subtree(ObjIdx::from(cut), &mut visited);
        }
    }

    /// Iterative pre-order DFS appending to `order`; children keep declaration order.
    fn visit_subtree(&mut self, root: ObjIdx, visited: &mut [bool]) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if visited[node.index()] {
                continue;
            }
            visited[node.index()] = true;
            self.order.push(node);
            for &c in self.children[node.index()].iter().rev() {
                stack.push(c);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Index of the object with this id (first declaration wins).
    pub fn get(&self, id: &str) -> Option<ObjIdx> {
        self.by_id.get(id).copied()
    }

    pub fn parent(&self, idx: ObjIdx) -> Option<ObjIdx> {
        self.parents.get(idx.index()).copied().flatten()
    }

    pub fn children(&self, idx: ObjIdx) -> &[ObjIdx] {
        self.children
            .get(idx.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn roots(&self) -> &[ObjIdx] {
        &self.roots
    }

    /// Parent-before-child traversal order covering every object once.
    pub fn order(&self) -> &[ObjIdx] {
        &self.order
    }

    /// Compose per-object local transforms into world transforms.
    pub fn compose_world(&self, locals: &[Transform]) -> Vec<Transform> {
        let mut world = vec![Transform::IDENTITY; locals.len()];
        for &idx in &self.order {
            let i = idx.index();
            world[i] = match self.parent(idx) {
                Some(p) => world[p.index()].mul_transform(&locals[i]),
                None => locals[i],
            };
        }
        world
    }

    /// An object is effectively visible only if it and every ancestor are.
    pub fn effective_visibility(&self, own: &[bool]) -> Vec<bool> {
        let mut out = vec![false; own.len()];
        for &idx in &self.order {
            let i = idx.index();
            out[i] = own[i] && self.parent(idx).map_or(true, |p| out[p.index()]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(id: &str, parent: Option<&str>) -> SceneObject {
        let mut o = SceneObject::new(id);
        o.parent = parent.map(str::to_string);
        o
    }

    #[test]
    fn children_roots_and_order() {
        let objects = vec![
            obj("leaf", Some("mid")),
            obj("root", None),
            obj("mid", Some("root")),
            obj("orphan", Some("ghost")),
        ];
        let idx = SceneIndex::build(&objects);
        assert_eq!(idx.roots(), &[ObjIdx(1), ObjIdx(3)]);
        assert_eq!(idx.children(ObjIdx(1)), &[ObjIdx(2)]);
        assert_eq!(idx.children(ObjIdx(2)), &[ObjIdx(0)]);
        assert_eq!(idx.order(), &[ObjIdx(1), ObjIdx(2), ObjIdx(0), ObjIdx(3)]);
        assert_eq!(idx.get("mid"), Some(ObjIdx(2)));
        assert_eq!(idx.get("ghost"), None);
    }

    #[test]
    fn cycles_terminate_and_cover_every_object() {
        let objects = vec![
            obj("a", Some("b")),
            obj("b", Some("a")),
            obj("c", Some("a")),
            obj("self", Some("self")),
        ];
        let idx = SceneIndex::build(&objects);
        assert_eq!(idx.order().len(), 4);
        // "self" is a root, and exactly one of a/b was promoted
        assert_eq!(idx.parent(ObjIdx(3)), None);
        let promoted = [0u32, 1]
            .iter()
            .filter(|&&i| idx.parent(ObjIdx(i)).is_none())
            .count();
        assert_eq!(promoted, 1);
        let pos = |i: usize| idx.order().iter().position(|o| o.index() == i).unwrap();
        assert!(pos(0) < pos(2), "parent before child");
    }

    #[test]
    fn duplicate_ids_resolve_to_first() {
        let objects = vec![obj("x", None), obj("x", None), obj("y", Some("x"))];
        let idx = SceneIndex::build(&objects);
        assert_eq!(idx.get("x"), Some(ObjIdx(0)));
        assert_eq!(idx.children(ObjIdx(0)), &[ObjIdx(2)]);
        assert_eq!(idx.order().len(), 3);
    }

    #[test]
    fn visibility_is_inherited() {
        let objects = vec![obj("p", None), obj("c", Some("p")), obj("g", Some("c"))];
        let idx = SceneIndex::build(&objects);
        assert_eq!(idx.effective_visibility(&[false, true, true]), vec![false, false, false]);
        assert_eq!(idx.effective_visibility(&[true, false, true]), vec![true, false, false]);
    }
}
