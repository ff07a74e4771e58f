use js_sys::JSON;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use mimic_scene_core::{Config, SceneCommand, SceneEngine};

#[wasm_bindgen]
pub struct MimicScene {
    core: SceneEngine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    swb::to_value(value).map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn explanation_to_js(explanation: Option<String>) -> JsValue {
    explanation.map_or(JsValue::UNDEFINED, |s| JsValue::from_str(&s))
}

/// Frame delta from an arbitrary JS value; anything but a finite
/// non-negative number counts as zero.
fn dt_from_js(dt: &JsValue) -> f32 {
    match dt.as_f64() {
        Some(x) if x.is_finite() && x > 0.0 => x as f32,
        _ => 0.0,
    }
}

#[wasm_bindgen]
impl MimicScene {
    /// Create an engine with an empty scene. Pass a (partial) config object or
    /// undefined/null for defaults.
    /// Example:
    ///   new MimicScene({ smoothingRate: 6 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MimicScene, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(MimicScene {
            core: SceneEngine::new(cfg),
        })
    }

    /// Adopt a scene from a JS object: `{ explanation, sceneGraph }` or a bare
    /// scene graph. Returns the explanation (or undefined). On error the
    /// current scene is kept.
    #[wasm_bindgen(js_name = load_scene)]
    pub fn load_scene(&mut self, scene: JsValue) -> Result<JsValue, JsError> {
        if jsvalue_is_undefined_or_null(&scene) {
            return Err(JsError::new("load_scene: scene is null/undefined"));
        }
        // Stringify so the core's tolerant converter sees plain JSON
        let s = JSON::stringify(&scene)
            .map_err(|e| JsError::new(&format!("load_scene stringify error: {:?}", e)))?
            .as_string()
            .ok_or_else(|| JsError::new("load_scene: stringify produced non-string"))?;
        let explanation = self
            .core
            .load_json(&s)
            .map_err(|e| JsError::new(&format!("load_scene parse error: {e}")))?;
        Ok(explanation_to_js(explanation))
    }

    /// Adopt a scene from raw generator text (prose around a JSON object).
    #[wasm_bindgen(js_name = load_scene_text)]
    pub fn load_scene_text(&mut self, text: &str) -> Result<JsValue, JsError> {
        let explanation = self
            .core
            .load_text(text)
            .map_err(|e| JsError::new(&format!("load_scene_text error: {e}")))?;
        Ok(explanation_to_js(explanation))
    }

    /// Jump to a step; values outside `0..=total` are clamped, fractions truncated.
    #[wasm_bindgen(js_name = set_step)]
    pub fn set_step(&mut self, step: f64) {
        // `as` saturates and maps NaN to 0
        self.core.set_step(step as i64);
    }

    #[wasm_bindgen(js_name = next_step)]
    pub fn next_step(&mut self) {
        self.core.next_step();
    }

    #[wasm_bindgen(js_name = prev_step)]
    pub fn prev_step(&mut self) {
        self.core.prev_step();
    }

    #[wasm_bindgen(js_name = reset_step)]
    pub fn reset_step(&mut self) {
        self.core.reset_step();
    }

    #[wasm_bindgen]
    pub fn play(&mut self) {
        self.core.play();
    }

    #[wasm_bindgen]
    pub fn pause(&mut self) {
        self.core.pause();
    }

    /// Apply an array of commands, e.g. `[{ type: "next" }, { type: "setStep", step: 2 }]`.
    #[wasm_bindgen]
    pub fn apply(&mut self, commands: JsValue) -> Result<(), JsError> {
        if jsvalue_is_undefined_or_null(&commands) {
            return Ok(());
        }
        let cmds: Vec<SceneCommand> = swb::from_value(commands)
            .map_err(|e| JsError::new(&format!("commands parse error: {e}")))?;
        self.core.apply(&cmds);
        Ok(())
    }

    /// `{ current, total, label }`.
    #[wasm_bindgen(js_name = step_info)]
    pub fn step_info(&self) -> Result<JsValue, JsError> {
        to_js(&self.core.step_info(), "step_info")
    }

    /// Advance by `dt` seconds and return the frame to draw. `dt` may be
    /// undefined, null, or non-numeric, which counts as zero.
    #[wasm_bindgen]
    pub fn update(&mut self, dt: JsValue) -> Result<JsValue, JsError> {
        let frame = self.core.update(dt_from_js(&dt));
        to_js(frame, "frame")
    }

    /// Static lighting and ground plane.
    #[wasm_bindgen]
    pub fn environment(&self) -> Result<JsValue, JsError> {
        to_js(self.core.environment(), "environment")
    }

    #[wasm_bindgen(js_name = is_playing)]
    pub fn is_playing(&self) -> bool {
        self.core.is_playing()
    }
}

/// ABI guard for JS wrappers.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
