//! Browser host binding
//!
//! The page owns the canvas, the DOM widgets and the event listeners; it
//! forwards `requestAnimationFrame` timestamps and `keydown` keys here and
//! draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::autopilot;
use crate::game::Game;
use crate::settings::Settings;

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    idle_mode: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `settings_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> Result<WebGame, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        Ok(WebGame {
            game: Game::new(seed, settings),
            idle_mode: false,
        })
    }

    pub fn start(&mut self) -> bool {
        self.game.start()
    }

    pub fn restart(&mut self) -> bool {
        self.game.restart()
    }

    pub fn stop(&mut self) -> bool {
        self.game.stop()
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.game.handle_key(key)
    }

    pub fn set_idle(&mut self, idle: bool) {
        self.idle_mode = idle;
        log::info!("Idle mode: {}", idle);
    }

    /// `requestAnimationFrame` callback; returns whether another frame is wanted
    pub fn frame(&mut self, time_ms: f64) -> bool {
        if self.idle_mode {
            if let Some(dir) = autopilot::steer(self.game.state()) {
                self.game.steer(dir);
            }
        }
        self.game.frame(time_ms);
        self.game.is_ticking() || self.game.is_animating()
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.game
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stop both clocks before the page drops the game
    pub fn teardown(&mut self) {
        self.game.shutdown();
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // Already installed if the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Rabbit Game module loaded");
}
