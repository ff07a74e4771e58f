use mimic_scene_core::{
    parse_scene_json, parse_scene_response, parse_scene_text, Config, Geometry, RelationshipKind,
    SceneEngine, SceneEvent, SceneGraph, Shape,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn approx3(a: [f32; 3], b: [f32; 3], eps: f32) {
    for i in 0..3 {
        assert!((a[i] - b[i]).abs() <= eps, "left={a:?} right={b:?} eps={eps}");
    }
}

fn engine_for(name: &str) -> SceneEngine {
    let json = mimic_test_fixtures::scenes::json(name).expect("load scene fixture");
    let mut engine = SceneEngine::new(Config::default());
    engine.load_json(&json).expect("adopt scene fixture");
    engine
}

#[test]
fn water_cycle_steps_end_to_end() {
    let mut e = engine_for("water-cycle");
    assert_eq!(e.step_info().total, 2);

    // Step 0: vapor hidden at its declared position
    let frame = e.update(1.0 / 60.0);
    assert_eq!(frame.step.label, "Initial Scene");
    assert!(frame.draw("ocean").is_some());
    assert!(frame.draw("vapor").is_none());
    assert_eq!(e.resolved("vapor").unwrap().position, [0.0, 0.5, 0.0]);
    assert!(!e.resolved("vapor").unwrap().visible);

    // Step 1: vapor appears in place
    e.next_step();
    let frame = e.update(1.0 / 60.0);
    assert_eq!(frame.step.label, "Evaporation");
    let vapor = frame.draw("vapor").expect("vapor visible at step 1");
    approx3(vapor.transform.translation, [0.0, 0.5, 0.0], 1e-6);
    assert!(frame
        .events
        .contains(&SceneEvent::StepChanged { old_step: 0, new_step: 1 }));

    // Step 2: target moves up, rendered position eases toward it
    e.next_step();
    assert_eq!(e.resolved("vapor").unwrap().position, [0.0, 4.0, 0.0]);
    let mut last_y = 0.5;
    for _ in 0..180 {
        let frame = e.update(1.0 / 60.0);
        let y = frame.draw("vapor").unwrap().transform.translation[1];
        assert!(y > last_y, "vapor must keep rising: {y} <= {last_y}");
        assert!(y <= 4.0, "no overshoot: {y}");
        last_y = y;
    }
    approx(last_y, 4.0, 1e-3);
    assert_eq!(e.step_info().label, "Vapor rises");

    // next at the end is a no-op
    e.next_step();
    assert_eq!(e.current_step(), 2);
}

#[test]
fn water_cycle_connector_tracks_resolved_positions() {
    let mut e = engine_for("water-cycle");
    e.set_step(2);
    // first frame after the jump: rendered vapor is still low, connector is not
    let frame = e.update(1.0 / 60.0);
    assert_eq!(frame.connectors.len(), 1);
    let c = &frame.connectors[0];
    assert_eq!(c.kind, RelationshipKind::Arrow);
    assert_eq!(c.start, [0.0, 0.0, 0.0]);
    assert_eq!(c.end, [0.0, 4.0, 0.0]);
    let label = c.label.as_ref().unwrap();
    assert_eq!(label.text, "evaporates");
    approx3(label.position, [0.0, 2.5, 0.0], 1e-6);
}

#[test]
fn water_cycle_fixture_shapes_and_colors() {
    let json = mimic_test_fixtures::scenes::json("water-cycle").unwrap();
    let resp = parse_scene_response(&json).unwrap();
    assert_eq!(
        resp.explanation.as_deref(),
        Some("Water evaporates from the ocean and rises as vapor.")
    );
    let ocean = &resp.scene_graph.objects[0];
    assert_eq!(ocean.shape, Shape::Plane);
    assert_eq!(ocean.color, [0.0, 0.0, 1.0]);
    assert!(matches!(
        ocean.descriptor().geometry,
        Geometry::Plane { .. }
    ));
    let vapor = &resp.scene_graph.objects[1];
    approx3(vapor.color, [173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0], 1e-6);
}

#[test]
fn generator_reply_text_is_extracted() {
    let text = mimic_test_fixtures::texts::text("water-cycle-reply").unwrap();
    let resp = parse_scene_text(&text).expect("extract JSON from reply");
    assert_eq!(resp.scene_graph.objects.len(), 2);
    assert_eq!(resp.scene_graph.sequence.len(), 2);

    let mut e = SceneEngine::default();
    let explanation = e.load_text(&text).unwrap();
    assert!(explanation.unwrap().contains("evaporates"));
    assert_eq!(e.step_info().total, 2);
}

#[test]
fn supply_demand_has_no_steps_and_one_line() {
    let mut e = engine_for("supply-demand");
    let frame = e.update(0.5);
    assert_eq!(frame.step.total, 0);
    assert_eq!(frame.draws.len(), 2);
    let supply = frame.draw("supply_obj").unwrap();
    assert_eq!(supply.shape.shape, Shape::Box);
    assert_eq!(supply.transform.translation, [-4.0, 0.0, 0.0]);
    // label sits above the top of a 2-unit cube
    approx3(supply.label.as_ref().unwrap().position, [-4.0, 1.5, 0.0], 1e-6);
    let c = &frame.connectors[0];
    assert_eq!(c.kind, RelationshipKind::Line);
    approx3(c.label.as_ref().unwrap().position, [0.0, 0.5, 0.0], 1e-6);
}

#[test]
fn snowman_subtree_follows_body() {
    let mut e = engine_for("snowman");
    let body0 = e.resolved_world_position("body").unwrap();
    let head0 = e.resolved_world_position("head").unwrap();
    let hat0 = e.resolved_world_position("hat").unwrap();
    approx3(head0, [0.0, 2.5, 0.0], 1e-6);
    approx3(hat0, [0.0, 3.2, 0.0], 1e-6);

    e.set_step(1);
    let body1 = e.resolved_world_position("body").unwrap();
    let delta = [body1[0] - body0[0], body1[1] - body0[1], body1[2] - body0[2]];
    assert_eq!(delta, [3.0, 0.0, 0.0]);
    for id in ["head", "hat", "nose"] {
        e.set_step(0);
        let before = e.resolved_world_position(id).unwrap();
        e.set_step(1);
        let after = e.resolved_world_position(id).unwrap();
        approx3(
            after,
            [before[0] + delta[0], before[1] + delta[1], before[2] + delta[2]],
            1e-5,
        );
    }

    // Growing the body scales the head's offset
    e.set_step(3);
    approx3(e.resolved_world_position("head").unwrap(), [3.0, 3.25, 0.0], 1e-5);

    // Melting the head hides its whole subtree
    e.set_step(4);
    let frame = e.update(0.0);
    let ids: Vec<&str> = frame.draws.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["body"]);
    assert_eq!(frame.step.label, "Melt");
}

#[test]
fn bare_graph_fixture_deserializes_directly() {
    let graph: SceneGraph = mimic_test_fixtures::scenes::load("solar-system").unwrap();
    assert_eq!(graph.objects.len(), 4);
    assert!(!graph.has_sequence());
    assert_eq!(graph.objects[0].size, [4.0, 4.0, 4.0]);
    assert_eq!(graph.objects[3].rotation, [90.0, 0.0, 0.0]);
}

#[test]
fn solar_system_idles_in_orbit() {
    let mut e = engine_for("solar-system");
    assert_eq!(e.step_info().total, 0);
    let mut last_angle = f32::NEG_INFINITY;
    for _ in 0..60 {
        let frame = e.update(1.0 / 30.0);
        let sun = frame.draw("sun").unwrap();
        let earth = frame.draw("earth").unwrap();
        let moon = frame.draw("moon").unwrap();

        let p = earth.transform.translation;
        approx((p[0] * p[0] + p[2] * p[2]).sqrt(), 8.0, 1e-3);
        let angle = p[0].atan2(p[2]);
        assert!(angle > last_angle);
        last_angle = angle;

        // moon orbits earth's origin, not the sun's, at its own height
        let m = moon.transform.translation;
        let (dx, dz) = (m[0] - p[0], m[2] - p[2]);
        approx((dx * dx + dz * dz).sqrt(), 2.0, 1e-3);
        approx(m[1], 0.2, 1e-5);

        // sun spins but stays put and glows with its own color
        assert_eq!(sun.transform.translation, [0.0, 0.0, 0.0]);
        let glow = sun.emissive.unwrap();
        assert_eq!(glow.color, sun.color);
        assert_eq!(glow.intensity, 1.5);
    }
    // spin is on the sun's mesh only: earth's orbit plane is not rotated
    approx(e.rendered("sun").unwrap().spin, 0.4, 1e-4);

    let frame = e.frame();
    let ring = frame.draw("ring").unwrap();
    assert_eq!(ring.shape.shape, Shape::Torus);
    // connectors use resolved (declared) positions in idle mode
    let c = &frame.connectors[0];
    approx3(c.start, [0.0, 0.0, 8.0], 1e-6);
    approx3(c.end, [0.0, 0.2, 10.0], 1e-6);

    // navigation is inert without a sequence
    e.next_step();
    assert_eq!(e.current_step(), 0);
}

#[test]
fn malformed_scene_degrades_per_entity() {
    let json = mimic_test_fixtures::scenes::json("malformed").unwrap();
    let graph = parse_scene_json(&json).expect("structurally valid payload");
    // the id-less object and the bare number are dropped
    assert_eq!(graph.objects.len(), 5);
    assert_eq!(graph.objects[0].shape, Shape::Box);
    assert_eq!(graph.objects[0].size, [1.0, 1.0, 1.0]);
    assert_eq!(graph.objects[4].id, "7");
    assert_eq!(graph.sequence.len(), 5);
    assert_eq!(graph.sequence[2].step, 0);

    let mut e = SceneEngine::default();
    e.adopt(graph);
    e.set_step(99);
    assert_eq!(e.current_step(), 5);
    let a = e.resolved("a").unwrap();
    assert_eq!(a.position, [0.0, 0.0, 0.0]);
    assert_eq!(a.color, [1.0, 0.0, 0.0]);

    let frame = e.update(1.0);
    assert_eq!(frame.draws.len(), 5);
    assert_eq!(frame.connectors.len(), 1);
    assert_eq!(frame.connectors[0].kind, RelationshipKind::Line);
}

#[test]
fn every_scene_fixture_adopts() {
    for key in mimic_test_fixtures::scenes::keys() {
        let json = mimic_test_fixtures::scenes::json(&key).unwrap();
        let mut e = SceneEngine::default();
        e.load_json(&json)
            .unwrap_or_else(|err| panic!("fixture {key} failed: {err}"));
        let total = e.step_info().total;
        for k in 0..=i64::from(total) {
            e.set_step(k);
            let frame = e.update(1.0 / 60.0);
            for d in &frame.draws {
                assert!(d.transform.translation.iter().all(|x| x.is_finite()));
                assert!(d.shape.size.iter().all(|x| *x > 0.0));
            }
        }
    }
}
