//! Game variant configuration
//!
//! Every variant of the game is the same session with a different set of
//! feature flags. Configs round-trip through JSON so a host page can ship one.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the catcher is drawn (affects its height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum PlayerSkin {
    /// Image sprite; height follows the image aspect ratio once it loads
    #[default]
    Sprite,
    /// Flat rectangle with the default dimensions
    Rect,
}

impl PlayerSkin {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerSkin::Sprite => "Sprite",
            PlayerSkin::Rect => "Rect",
        }
    }
}

/// Drop radius per category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropRadii {
    pub clean: f32,
    pub pollutant: f32,
}

impl Default for DropRadii {
    fn default() -> Self {
        Self {
            clean: 16.0,
            pollutant: 16.0,
        }
    }
}

/// Feature flags and tunables for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Countdown per level; running out ends the game
    pub has_timer: bool,
    /// One-time celebratory messages at fixed scores
    pub has_milestones: bool,
    /// Regain a life every few clean catches
    pub has_life_regen: bool,
    /// Score targets and level progression
    pub has_levels: bool,

    pub drop_radii: DropRadii,
    pub player_skin: PlayerSkin,

    pub max_lives: u8,
    pub timer_seconds: u32,
    /// Drops kept on the field
    pub initial_drops: usize,
    /// RNG seed for drop spawning
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::jerry_can()
    }
}

impl GameConfig {
    /// The full game: jerry can sprite, levels, milestones, life regen and countdown
    pub fn jerry_can() -> Self {
        Self {
            has_timer: true,
            has_milestones: true,
            has_life_regen: true,
            has_levels: true,
            drop_radii: DropRadii::default(),
            player_skin: PlayerSkin::Sprite,
            max_lives: MAX_LIVES,
            timer_seconds: TIMER_SECONDS,
            initial_drops: INITIAL_DROPS,
            seed: 0x5eed_d20b,
        }
    }

    /// The first cut: flat catcher, endless play until lives run out
    pub fn classic() -> Self {
        Self {
            has_timer: false,
            has_milestones: false,
            has_life_regen: false,
            has_levels: false,
            drop_radii: DropRadii {
                clean: 10.0,
                pollutant: 12.0,
            },
            player_skin: PlayerSkin::Rect,
            ..Self::jerry_can()
        }
    }

    /// Same config with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a host-supplied config, falling back to defaults on absence or error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(config)) => {
                log::info!("Loaded game config ({} skin)", config.player_skin.as_str());
                config.sanitized()
            }
            Some(Err(e)) => {
                log::warn!("Invalid game config, using defaults: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Clamp tunables into ranges the session can run with
    pub fn sanitized(mut self) -> Self {
        self.max_lives = self.max_lives.max(1);
        self.initial_drops = self.initial_drops.max(1);
        self.timer_seconds = self.timer_seconds.max(1);
        self.drop_radii.clean = self.drop_radii.clean.clamp(1.0, FIELD_WIDTH / 2.0);
        self.drop_radii.pollutant = self.drop_radii.pollutant.clamp(1.0, FIELD_WIDTH / 2.0);
        self
    }
}
