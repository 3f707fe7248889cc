use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use odometer_core::{ColumnState, Config, RollEngine, RollEvent};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Per-frame payload handed back to JS.
#[derive(Serialize)]
struct Frame<'a> {
    events: &'a [RollEvent],
    animating: bool,
    columns: &'a [ColumnState],
}

#[derive(Default)]
struct JsListener {
    on_invalidate: Option<Function>,
    on_animation_end: Option<Function>,
}

impl JsListener {
    fn dispatch(&self, events: &[RollEvent]) {
        for event in events {
            let (callback, arg) = match event {
                RollEvent::Invalidate => (self.on_invalidate.as_ref(), JsValue::UNDEFINED),
                RollEvent::AnimationEnd { run } => {
                    (self.on_animation_end.as_ref(), JsValue::from(run.0))
                }
                _ => (None, JsValue::UNDEFINED),
            };
            if let Some(f) = callback {
                if let Err(e) = f.call1(&JsValue::UNDEFINED, &arg) {
                    log::warn!("odometer listener threw: {:?}", e);
                }
            }
        }
    }
}

#[wasm_bindgen]
pub struct OdometerRoll {
    core: RollEngine,
    listener: JsListener,
}

#[wasm_bindgen]
impl OdometerRoll {
    /// Create an engine. Pass a (partial) config object or undefined/null for defaults.
    /// Example:
    ///   new OdometerRoll({ base_duration_ms: 1500, sampling: "per_column" })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<OdometerRoll, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core = RollEngine::new(cfg).map_err(|e| JsError::new(&e.to_string()))?;

        Ok(OdometerRoll {
            core,
            listener: JsListener::default(),
        })
    }

    /// Register callbacks: `onInvalidate()` and `onAnimationEnd(runId)`. Either may be null.
    #[wasm_bindgen(js_name = set_listener)]
    pub fn set_listener(
        &mut self,
        on_invalidate: Option<Function>,
        on_animation_end: Option<Function>,
    ) {
        self.listener = JsListener {
            on_invalidate,
            on_animation_end,
        };
    }

    /// Store a new from/to pair. Returns false (state unchanged) on non-digit input.
    #[wasm_bindgen(js_name = set_numbers)]
    pub fn set_numbers(&mut self, from: &str, to: &str) -> bool {
        let accepted = self.core.set_numbers(from, to).is_ok();
        self.flush_events();
        accepted
    }

    /// Start a run. Returns the run id, or undefined when a number is unset.
    #[wasm_bindgen(js_name = start_animation)]
    pub fn start_animation(&mut self) -> Option<u32> {
        let run = self.core.start_animation().map(|r| r.0);
        self.flush_events();
        run
    }

    #[wasm_bindgen(js_name = stop_animation)]
    pub fn stop_animation(&mut self) {
        self.core.stop_animation();
        self.flush_events();
    }

    /// Advance by dt (milliseconds). Returns `{ events, animating, columns }`.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f32) -> Result<JsValue, JsError> {
        let out = self.core.update(dt_ms);
        let events = out.events.clone();
        let animating = out.animating;
        self.listener.dispatch(&events);
        let frame = Frame {
            events: &events,
            animating,
            columns: self.core.column_states(),
        };
        swb::to_value(&frame).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Latest column snapshot, most significant first.
    #[wasm_bindgen(js_name = column_states)]
    pub fn column_states(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.core.column_states())
            .map_err(|e| JsError::new(&format!("column states error: {e}")))
    }

    #[wasm_bindgen(js_name = is_animating)]
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    #[wasm_bindgen(js_name = display_text)]
    pub fn display_text(&self) -> String {
        self.core.display_text()
    }

    fn flush_events(&mut self) {
        let events = self.core.take_events();
        self.listener.dispatch(&events);
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
