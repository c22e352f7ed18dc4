//! Browser boundary
//!
//! The scene, shaders and keyboard polling stay in JavaScript. Each animation
//! frame the page hands the held keys, camera direction and clock to
//! [`Session::tick`] and reads positions back for its meshes and uniforms.

use glam::Vec3;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;

use crate::hud::{self, BatteryBand};
use crate::sim::{GameState, TickInput, session_rng, tick};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Survive the Dark core loaded");
}

fn to_array(v: Vec3) -> Vec<f32> {
    v.to_array().to_vec()
}

/// One play session, owned by the page
#[wasm_bindgen]
pub struct Session {
    state: GameState,
    rng: Pcg32,
}

#[wasm_bindgen]
impl Session {
    /// Start a session; a seed of 0 picks one from the clock
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Session {
        let seed = if seed == 0 { js_sys::Date::now() as u64 } else { seed };
        log::info!("New session with seed: {}", seed);
        Session {
            state: GameState::new(seed),
            rng: session_rng(seed),
        }
    }

    /// Start a session with a tuning JSON document
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: u64, tuning_json: &str) -> Result<Session, JsValue> {
        let tuning = crate::Tuning::from_json(tuning_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut session = Session::new(seed);
        session.state = GameState::with_tuning(session.state.seed, tuning)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(session)
    }

    /// Advance one frame. Returns false once the orb has been caught.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        w: bool,
        s: bool,
        a: bool,
        d: bool,
        forward_x: f32,
        forward_y: f32,
        forward_z: f32,
        elapsed: f32,
    ) -> bool {
        let input = TickInput {
            forward: w,
            backward: s,
            left: a,
            right: d,
            camera_forward: Vec3::new(forward_x, forward_y, forward_z),
            elapsed,
        };
        tick(&mut self.state, &input, &mut self.rng);
        !self.state.is_game_over()
    }

    #[wasm_bindgen(getter)]
    pub fn orb(&self) -> Vec<f32> {
        to_array(self.state.orb.pos)
    }

    #[wasm_bindgen(getter, js_name = orbRadius)]
    pub fn orb_radius(&self) -> f32 {
        self.state.orb.radius
    }

    #[wasm_bindgen(getter, js_name = lightOn)]
    pub fn light_on(&self) -> bool {
        self.state.light_on
    }

    #[wasm_bindgen(getter)]
    pub fn battery(&self) -> f32 {
        self.state.battery
    }

    #[wasm_bindgen(getter, js_name = batteryColor)]
    pub fn battery_color(&self) -> String {
        BatteryBand::from_battery(self.state.battery).css().to_string()
    }

    #[wasm_bindgen(getter, js_name = batteryWidth)]
    pub fn battery_width(&self) -> String {
        hud::battery_bar_width(self.state.battery)
    }

    #[wasm_bindgen(getter, js_name = timeLabel)]
    pub fn time_label(&self) -> String {
        hud::time_survived_label(self.state.time_survived)
    }

    #[wasm_bindgen(getter)]
    pub fn pursuer(&self) -> Vec<f32> {
        to_array(self.state.pursuer.pos)
    }

    #[wasm_bindgen(getter, js_name = pursuerYaw)]
    pub fn pursuer_yaw(&self) -> f32 {
        self.state.pursuer.yaw
    }

    #[wasm_bindgen(getter, js_name = cameraPosition)]
    pub fn camera_position(&self) -> Vec<f32> {
        to_array(self.state.camera.position)
    }

    #[wasm_bindgen(getter, js_name = cameraTarget)]
    pub fn camera_target(&self) -> Vec<f32> {
        to_array(self.state.camera.target)
    }

    /// Live pickups flattened as `[id, x, y, z, ...]`
    #[wasm_bindgen(getter)]
    pub fn pickups(&self) -> Vec<f32> {
        self.state
            .pickups
            .iter()
            .flat_map(|p| [p.id as f32, p.pos.x, p.pos.y, p.pos.z])
            .collect()
    }

    /// Events from the last tick as JSON
    pub fn events(&self) -> String {
        serde_json::to_string(&self.state.events).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(getter, js_name = gameOver)]
    pub fn game_over(&self) -> bool {
        self.state.is_game_over()
    }
}
