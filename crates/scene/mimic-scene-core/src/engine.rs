//! Scene engine: owns one adopted graph and all per-object runtime state.
//!
//! Methods:
//! - new, adopt / load_json / load_text (graph intake)
//! - set_step, next_step, prev_step, reset_step, play, pause, apply (navigation)
//! - update (auto-advance → animate → compose → frame)
//!
//! Step targets are resolved once per step change, never per frame.

use crate::animator::{advance, advance_idle, mesh_world, sanitize_dt, RenderedState};
use crate::config::{Config, Environment};
use crate::data::SceneGraph;
use crate::error::Result;
use crate::hierarchy::SceneIndex;
use crate::ids::SceneEpoch;
use crate::inputs::SceneCommand;
use crate::navigation::{AutoAdvance, StepCursor, StepInfo, Tick};
use crate::outputs::{DrawCall, Emissive, Frame, LabelDraw, SceneEvent};
use crate::relationships::connectors_into;
use crate::resolver::{ResolvedState, StepTimeline};
use crate::stored_scene::{parse_scene_response, parse_scene_text};
use crate::transform::Transform;

#[derive(Debug)]
pub struct SceneEngine {
    cfg: Config,
    graph: SceneGraph,
    epoch: SceneEpoch,

    // Derived from the graph on adoption
    index: SceneIndex,
    timeline: StepTimeline,
    initial: Vec<ResolvedState>,

    // Navigation
    cursor: StepCursor,
    playback: AutoAdvance,

    // Per-object state, indexed like `graph.objects`
    targets: Vec<ResolvedState>,
    target_world: Vec<[f32; 3]>,
    rendered: Vec<RenderedState>,

    /// Seconds of frame time since adoption; drives idle orbits.
    elapsed: f64,
    pending_events: Vec<SceneEvent>,
    frame: Frame,
}

impl Default for SceneEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl SceneEngine {
    /// Engine with an empty scene.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            graph: SceneGraph::default(),
            epoch: SceneEpoch::default(),
            index: SceneIndex::default(),
            timeline: StepTimeline::default(),
            initial: Vec::new(),
            cursor: StepCursor::default(),
            playback: AutoAdvance::default(),
            targets: Vec::new(),
            target_world: Vec::new(),
            rendered: Vec::new(),
            elapsed: 0.0,
            pending_events: Vec::new(),
            frame: Frame::default(),
        }
    }

    /// Replace the current graph. Navigation returns to step 0, playback stops,
    /// and every object is rendered exactly at its initial state.
    pub fn adopt(&mut self, graph: SceneGraph) {
        self.index = SceneIndex::build(&graph.objects);
        self.timeline = StepTimeline::build(&self.index, &graph.sequence);
        self.initial = self
            .timeline
            .resolve_all(&self.index, &graph.objects, &graph.sequence, 0);
        self.cursor = StepCursor::new(graph.step_count());
        self.playback = AutoAdvance::default();
        self.targets = self.initial.clone();
        self.rendered = self.initial.iter().map(RenderedState::at).collect();
        self.elapsed = 0.0;
        self.graph = graph;
        self.epoch = self.epoch.next();
        self.refresh_target_world();

        log::debug!(
            "adopted scene: {} objects, {} relationships, {} steps",
            self.graph.objects.len(),
            self.graph.relationships.len(),
            self.cursor.total()
        );
        self.pending_events.push(SceneEvent::SceneAdopted {
            objects: self.graph.objects.len(),
            steps: self.cursor.total(),
        });
    }

    /// Parse an `{explanation, sceneGraph}` envelope (or a bare graph) and adopt
    /// it, returning the explanation. On error the current graph is kept.
    pub fn load_json(&mut self, json: &str) -> Result<Option<String>> {
        let response = parse_scene_response(json)?;
        self.adopt(response.scene_graph);
        Ok(response.explanation)
    }

    /// Like [`load_json`](Self::load_json) for raw generator text with prose
    /// around the JSON object.
    pub fn load_text(&mut self, text: &str) -> Result<Option<String>> {
        let response = parse_scene_text(text)?;
        self.adopt(response.scene_graph);
        Ok(response.explanation)
    }

    pub fn set_step(&mut self, step: i64) {
        let changed = self.cursor.set(step);
        self.on_step_changed(changed);
    }

    pub fn next_step(&mut self) {
        let changed = self.cursor.next();
        self.on_step_changed(changed);
    }

    pub fn prev_step(&mut self) {
        let changed = self.cursor.prev();
        self.on_step_changed(changed);
    }

    pub fn reset_step(&mut self) {
        let changed = self.cursor.reset();
        self.on_step_changed(changed);
    }

    /// Start auto-advance. At the last step this only reports the end.
    pub fn play(&mut self) {
        if self.cursor.at_end() {
            self.pending_events.push(SceneEvent::PlaybackEnded {
                step: self.cursor.current(),
            });
            return;
        }
        if self.playback.play() {
            self.pending_events.push(SceneEvent::PlaybackStarted);
        }
    }

    pub fn pause(&mut self) {
        if self.playback.pause() {
            self.pending_events.push(SceneEvent::PlaybackPaused);
        }
    }

    pub fn apply(&mut self, cmds: &[SceneCommand]) {
        for cmd in cmds {
            match *cmd {
                SceneCommand::SetStep { step } => self.set_step(step),
                SceneCommand::Next => self.next_step(),
                SceneCommand::Prev => self.prev_step(),
                SceneCommand::Reset => self.reset_step(),
                SceneCommand::Play => self.play(),
                SceneCommand::Pause => self.pause(),
            }
        }
    }

    fn on_step_changed(&mut self, old: Option<u32>) {
        let Some(old_step) = old else {
            return;
        };
        let new_step = self.cursor.current();
        log::debug!("step {old_step} -> {new_step}");
        self.targets = self.timeline.resolve_all(
            &self.index,
            &self.graph.objects,
            &self.graph.sequence,
            i64::from(new_step),
        );
        self.refresh_target_world();
        self.pending_events
            .push(SceneEvent::StepChanged { old_step, new_step });
    }

    fn refresh_target_world(&mut self) {
        let locals: Vec<Transform> = self
            .targets
            .iter()
            .map(ResolvedState::local_transform)
            .collect();
        self.target_world = self
            .index
            .compose_world(&locals)
            .into_iter()
            .map(|t| t.translation)
            .collect();
    }

    /// Advance by `dt` seconds and build the frame to draw.
    ///
    /// Missing, negative, or non-finite `dt` counts as zero.
    pub fn update(&mut self, dt: f32) -> &Frame {
        let dt = sanitize_dt(dt);
        self.elapsed += f64::from(dt);
        self.frame.clear();

        if self.playback.tick(dt, self.cfg.auto_advance_secs) == Tick::Advance {
            self.next_step();
            if self.cursor.at_end() {
                self.playback.pause();
                self.pending_events.push(SceneEvent::PlaybackEnded {
                    step: self.cursor.current(),
                });
            }
        }

        self.animate(dt);
        self.build_frame();
        &self.frame
    }

    fn animate(&mut self, dt: f32) {
        let stepped = self.graph.has_sequence();
        for (i, obj) in self.graph.objects.iter().enumerate() {
            let cur = self.rendered[i];
            self.rendered[i] = if stepped {
                advance(&cur, &self.targets[i], dt, self.cfg.smoothing_rate)
            } else {
                advance_idle(
                    &cur,
                    obj,
                    &self.initial[i],
                    self.elapsed,
                    dt,
                    self.cfg.default_orbit_speed,
                )
            };
        }
    }

    fn build_frame(&mut self) {
        let locals: Vec<Transform> = self
            .rendered
            .iter()
            .map(RenderedState::local_transform)
            .collect();
        let world = self.index.compose_world(&locals);
        let own: Vec<bool> = self.rendered.iter().map(|r| r.visible).collect();
        let visible = self.index.effective_visibility(&own);

        for (i, obj) in self.graph.objects.iter().enumerate() {
            if !visible[i] {
                continue;
            }
            let rendered = &self.rendered[i];
            let shape = obj.descriptor();
            let label = obj.visible_label().map(|text| LabelDraw {
                text: text.to_string(),
                position: world[i].transform_point([
                    0.0,
                    shape.size[1] / 2.0 + self.cfg.label_offset,
                    0.0,
                ]),
                font_size: self.cfg.label_font_size,
            });
            let emissive = obj.emissive.then_some(Emissive {
                color: obj.color,
                intensity: self.cfg.emissive_intensity,
            });
            self.frame.draws.push(DrawCall {
                id: obj.id.clone(),
                transform: mesh_world(&world[i], rendered),
                shape,
                color: rendered.color,
                emissive,
                label,
            });
        }

        connectors_into(
            &self.graph.relationships,
            &self.index,
            &self.target_world,
            &self.cfg,
            &mut self.frame.connectors,
        );
        self.frame.step = self.cursor.info(&self.graph.sequence);
        self.frame.events.append(&mut self.pending_events);
    }

    pub fn step_info(&self) -> StepInfo {
        self.cursor.info(&self.graph.sequence)
    }

    pub fn current_step(&self) -> u32 {
        self.cursor.current()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Target state of the object at the current step.
    pub fn resolved(&self, id: &str) -> Option<&ResolvedState> {
        self.index.get(id).and_then(|i| self.targets.get(i.index()))
    }

    /// Target world position (hierarchy composed, not interpolated).
    pub fn resolved_world_position(&self, id: &str) -> Option<[f32; 3]> {
        self.index
            .get(id)
            .and_then(|i| self.target_world.get(i.index()).copied())
    }

    /// State currently on screen for the object.
    pub fn rendered(&self, id: &str) -> Option<&RenderedState> {
        self.index.get(id).and_then(|i| self.rendered.get(i.index()))
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn environment(&self) -> &Environment {
        &self.cfg.environment
    }

    pub fn epoch(&self) -> SceneEpoch {
        self.epoch
    }

    /// Last frame built by [`update`](Self::update).
    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}
