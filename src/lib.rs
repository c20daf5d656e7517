//! Droplet Catch - A falling-droplet catching arcade game
//!
//! Core modules:
//! - `sim`: Game session state machine (kinematics, collisions, scoring, levels)
//! - `platform`: Clock/scheduler and UI port seams the session is driven through
//! - `renderer`: Render seam (the presentation layer draws, the session only asks)
//! - `config`: Feature flags unifying the game variants

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{DropRadii, GameConfig, PlayerSkin};
pub use sim::{Difficulty, GamePhase, GameSession};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 370.0;
    pub const PLAYER_Y: f32 = 480.0;
    pub const PLAYER_WIDTH: f32 = 70.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    /// Horizontal distance moved per key press
    pub const PLAYER_STEP: f32 = 40.0;

    /// Drops on the field at any time
    pub const INITIAL_DROPS: usize = 3;
    pub const MAX_LIVES: u8 = 4;
    pub const MAX_LEVELS: u32 = 2;
    /// A life is regained every N clean catches
    pub const LIFE_REGEN_EVERY: u32 = 3;
    /// Pollutant probability never scales past this
    pub const MAX_POLLUTANT_CHANCE: f32 = 0.85;

    /// Countdown length per level (seconds)
    pub const TIMER_SECONDS: u32 = 25;
    /// Countdown turns urgent at or below this many seconds
    pub const TIMER_URGENT_SECONDS: u32 = 5;
    pub const TIMER_INTERVAL_MS: u64 = 1000;

    /// Milestone overlay display duration
    pub const MILESTONE_DURATION_MS: u64 = 2500;
    /// Catch/miss flash duration before the field is redrawn
    pub const FLASH_DURATION_MS: u64 = 100;
    /// Nominal frame interval (~60 Hz)
    pub const FRAME_MS: u64 = 16;
}

/// Clamp a player x so the catcher stays fully inside the field
#[inline]
pub fn clamp_to_field(x: f32, width: f32) -> f32 {
    x.clamp(0.0, (consts::FIELD_WIDTH - width).max(0.0))
}
