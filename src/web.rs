//! Browser binding
//!
//! The host page owns the canvas, the DOM overlays and the animation frame
//! loop. It hands three callbacks to [`WasmGame`] and feeds it elapsed time
//! from `requestAnimationFrame`; the session's clock runs on that time.

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::platform::{ManualClock, UiEvent, UiPort};
use crate::renderer::{Feedback, Renderer};
use crate::sim::{Difficulty, Direction, Droplet, GameSession, Player};

/// Frame payload handed to the host's draw callback
#[derive(Serialize)]
struct FrameView<'a> {
    player: &'a Player,
    drops: Vec<DropView>,
}

#[derive(Serialize)]
struct DropView {
    x: f32,
    y: f32,
    radius: f32,
    color: &'static str,
    pollutant: bool,
}

impl From<&Droplet> for DropView {
    fn from(drop: &Droplet) -> Self {
        Self {
            x: drop.pos.x,
            y: drop.pos.y,
            radius: drop.radius,
            color: drop.color(),
            pollutant: drop.is_pollutant(),
        }
    }
}

fn call_json<T: Serialize>(callback: &Function, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("Host callback failed: {:?}", e);
            }
        }
        Err(e) => log::error!("Failed to serialize for host: {}", e),
    }
}

struct JsRenderer {
    draw: Function,
    flash: Function,
}

impl Renderer for JsRenderer {
    fn render(&mut self, player: &Player, drops: &[Droplet]) {
        let frame = FrameView {
            player,
            drops: drops.iter().map(DropView::from).collect(),
        };
        call_json(&self.draw, &frame);
    }

    fn flash(&mut self, feedback: Feedback) {
        let color = JsValue::from_str(feedback.color());
        if let Err(e) = self.flash.call1(&JsValue::NULL, &color) {
            log::warn!("Host flash callback failed: {:?}", e);
        }
    }
}

struct JsUi {
    notify: Function,
}

impl JsUi {
    fn emit(&self, event: UiEvent) {
        call_json(&self.notify, &event);
    }
}

impl UiPort for JsUi {
    fn on_score_changed(&mut self, score: u32) {
        self.emit(UiEvent::ScoreChanged { score });
    }

    fn on_lives_changed(&mut self, lives: u8) {
        self.emit(UiEvent::LivesChanged { lives });
    }

    fn on_level_complete(&mut self, level: u32, is_final: bool, fact: &str) {
        self.emit(UiEvent::LevelComplete {
            level,
            is_final,
            fact: fact.to_string(),
        });
    }

    fn on_game_over(&mut self) {
        self.emit(UiEvent::GameOver);
    }

    fn on_mode_changed(&mut self, name: &str) {
        self.emit(UiEvent::ModeChanged {
            name: name.to_string(),
        });
    }

    fn on_milestone(&mut self, message: &str) {
        self.emit(UiEvent::Milestone {
            message: message.to_string(),
        });
    }

    fn on_milestone_hidden(&mut self) {
        self.emit(UiEvent::MilestoneHidden);
    }

    fn on_timer_changed(&mut self, seconds: u32, urgent: bool) {
        self.emit(UiEvent::TimerChanged { seconds, urgent });
    }
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession<JsRenderer, JsUi, ManualClock>,
}

#[wasm_bindgen]
impl WasmGame {
    /// `draw(frameJson)`, `flash(color)` and `notify(eventJson)` are host callbacks
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        draw: Function,
        flash: Function,
        notify: Function,
    ) -> WasmGame {
        let config = match config_json.as_deref() {
            Some(json) => GameConfig::load_or_default(Some(json)),
            None => GameConfig::default().with_seed(js_sys::Date::now() as u64),
        };
        let session = GameSession::new(
            config,
            JsRenderer { draw, flash },
            JsUi { notify },
            ManualClock::new(),
        );
        WasmGame { session }
    }

    /// Difficulty button: configure and start at level 1
    pub fn select_difficulty(&mut self, mode: &str) {
        let difficulty = Difficulty::from_str(mode).unwrap_or_else(|| {
            log::warn!("Unknown difficulty '{}', using normal", mode);
            Difficulty::Normal
        });
        self.session.configure(difficulty);
        self.session.start();
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Level-complete overlay button
    pub fn next_level(&mut self) {
        self.session.advance_level();
    }

    pub fn exit_to_menu(&mut self) {
        self.session.exit_to_menu();
    }

    pub fn on_key(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.session.on_key(direction);
        }
    }

    pub fn on_key_event(&mut self, event: &web_sys::KeyboardEvent) {
        self.on_key(&event.key());
    }

    /// Sprite image loaded: natural height / natural width
    pub fn set_sprite_aspect(&mut self, ratio: f32) {
        self.session.set_player_aspect_ratio(ratio);
    }

    /// Called from the host's animation frame with milliseconds since the last call
    pub fn advance(&mut self, elapsed_ms: f64) {
        // Cap so a backgrounded tab does not replay minutes of frames
        let elapsed = elapsed_ms.clamp(0.0, 100.0) as u64;
        self.session.advance_clock(elapsed);
    }

    pub fn phase(&self) -> String {
        self.session.phase().as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn lives(&self) -> u8 {
        self.session.lives()
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Droplet Catch (web) starting...");
}
