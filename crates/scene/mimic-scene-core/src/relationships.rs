//! Relationship endpoints to connector descriptors.

use crate::config::Config;
use crate::data::Relationship;
use crate::hierarchy::SceneIndex;
use crate::interp::functions::lerp_vec3;
use crate::outputs::{Connector, LabelDraw};

/// Midpoint of a connector, lifted on Y for its label.
#[inline]
pub fn label_anchor(start: [f32; 3], end: [f32; 3], lift: f32) -> [f32; 3] {
    let mid = lerp_vec3(start, end, 0.5);
    [mid[0], mid[1] + lift, mid[2]]
}

/// Connector between the resolved world positions of both endpoints, or
/// `None` when either id is unknown.
pub fn connector(
    rel: &Relationship,
    index: &SceneIndex,
    world_positions: &[[f32; 3]],
    cfg: &Config,
) -> Option<Connector> {
    let from = index.get(&rel.from)?;
    let to = index.get(&rel.to)?;
    let start = *world_positions.get(from.index())?;
    let end = *world_positions.get(to.index())?;
    let label = rel
        .label
        .as_deref()
        .filter(|l| !l.is_empty())
        .map(|text| LabelDraw {
            text: text.to_string(),
            position: label_anchor(start, end, cfg.relationship_label_lift),
            font_size: cfg.relationship_font_size,
        });
    Some(Connector {
        from: rel.from.clone(),
        to: rel.to.clone(),
        kind: rel.kind,
        start,
        end,
        label,
    })
}

/// Write connectors for every resolvable relationship into `out`.
pub fn connectors_into(
    relationships: &[Relationship],
    index: &SceneIndex,
    world_positions: &[[f32; 3]],
    cfg: &Config,
    out: &mut Vec<Connector>,
) {
    for rel in relationships {
        match connector(rel, index, world_positions, cfg) {
            Some(c) => out.push(c),
            None => log::debug!(
                "relationship {} -> {} has a missing endpoint; skipped",
                rel.from,
                rel.to
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RelationshipKind, SceneObject};

    fn rel(from: &str, to: &str, label: Option<&str>) -> Relationship {
        Relationship {
            from: from.into(),
            to: to.into(),
            kind: RelationshipKind::Arrow,
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn dangling_endpoints_are_skipped() {
        let objects = vec![SceneObject::new("a"), SceneObject::new("b")];
        let index = SceneIndex::build(&objects);
        let positions = [[0.0, 0.0, 0.0], [2.0, 2.0, 0.0]];
        let cfg = Config::default();
        let mut out = Vec::new();
        connectors_into(
            &[rel("a", "b", Some("feeds")), rel("a", "ghost", None), rel("ghost", "b", None)],
            &index,
            &positions,
            &cfg,
            &mut out,
        );
        assert_eq!(out.len(), 1);
        let c = &out[0];
        assert_eq!(c.kind, RelationshipKind::Arrow);
        assert_eq!(c.start, [0.0, 0.0, 0.0]);
        assert_eq!(c.end, [2.0, 2.0, 0.0]);
        let label = c.label.as_ref().unwrap();
        assert_eq!(label.text, "feeds");
        assert_eq!(label.position, [1.0, 1.5, 0.0]);
        assert_eq!(label.font_size, 0.4);
    }

    #[test]
    fn empty_label_is_omitted() {
        let objects = vec![SceneObject::new("a")];
        let index = SceneIndex::build(&objects);
        let c = connector(&rel("a", "a", Some("")), &index, &[[1.0; 3]], &Config::default()).unwrap();
        assert!(c.label.is_none());
    }
}
