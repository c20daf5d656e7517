//! Session entities and state types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session in progress (start screen / menu)
    Idle,
    /// Active gameplay, tick loop running
    Playing,
    /// Tick loop suspended, resumable
    Paused,
    /// Level target reached while a milestone overlay is up; the level
    /// completes once the overlay expires
    LevelClearing,
    /// Level cleared, waiting for the player to advance
    LevelComplete,
    /// Run ended (out of lives or out of time)
    Ended,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::LevelClearing => "level_clearing",
            GamePhase::LevelComplete => "level_complete",
            GamePhase::Ended => "ended",
        }
    }
}

/// Droplet category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropKind {
    /// Clean water, scores when caught, costs a life when missed
    Clean,
    /// Costs a life when caught, harmless when missed
    Pollutant,
}

impl DropKind {
    /// Fill color tag
    pub fn color(&self) -> &'static str {
        match self {
            DropKind::Clean => "#00bfff",
            DropKind::Pollutant => "#6b4f4f",
        }
    }
}

/// A falling drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    /// Center of the drop
    pub pos: Vec2,
    pub radius: f32,
    pub kind: DropKind,
}

impl Droplet {
    pub fn new(kind: DropKind, x: f32, radius: f32) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            radius,
            kind,
        }
    }

    pub fn is_pollutant(&self) -> bool {
        self.kind == DropKind::Pollutant
    }

    pub fn color(&self) -> &'static str {
        self.kind.color()
    }
}

/// The catcher at the bottom of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_Y),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        }
    }
}

impl Player {
    /// Back to the canonical start position, keeping the current size
    pub fn reset(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_Y);
        self.keep_on_field();
    }

    /// Shift horizontally, staying inside the field
    pub fn shift(&mut self, dx: f32) {
        self.pos.x = crate::clamp_to_field(self.pos.x + dx, self.width);
    }

    /// Derive height from a sprite aspect ratio (height / width)
    pub fn apply_aspect_ratio(&mut self, ratio: f32) {
        let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        self.height = (self.width * ratio).round();
        self.keep_on_field();
    }

    /// Lift the player so it never clips below the field
    fn keep_on_field(&mut self) {
        if self.pos.y + self.height > FIELD_HEIGHT {
            self.pos.y = (FIELD_HEIGHT - self.height).max(0.0);
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// Horizontal input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a DOM key name
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A one-time celebratory message at a fixed score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub score: u32,
    pub message: &'static str,
}

pub const MILESTONES: [Milestone; 4] = [
    Milestone { score: 5, message: "Nice start!" },
    Milestone { score: 10, message: "Halfway there!" },
    Milestone { score: 15, message: "Almost done!" },
    Milestone { score: 20, message: "Amazing! You reached 20 points!" },
];

/// Facts shown on the level-complete overlay
pub const WATER_FACTS: [&str; 3] = [
    "1 in 10 people lack access to clean water.",
    "Women and girls are responsible for water collection in 7 out of 10 households with water off premises. When a community gets water, women and girls get their lives back. They start businesses, improve their homes, and take charge of their own futures.",
    "Clean water helps keep kids in school, especially girls. Less time collecting water means more time in class. Clean water and proper toilets at school means teenage girls don’t have to stay home for a week out of every month.",
];

/// Fact for the overlay after clearing `level` (1-based)
pub fn fact_for_level(level: u32) -> &'static str {
    let index = (level.saturating_sub(1) as usize) % WATER_FACTS.len();
    WATER_FACTS[index]
}

/// Overlay currently blocking scoring-triggered transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    /// Milestone message on screen
    Milestone { score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_shift_clamped() {
        let mut player = Player::default();
        for _ in 0..50 {
            player.shift(-PLAYER_STEP);
        }
        assert_eq!(player.pos.x, 0.0);
        for _ in 0..50 {
            player.shift(PLAYER_STEP);
        }
        assert_eq!(player.pos.x, FIELD_WIDTH - player.width);
    }

    #[test]
    fn test_aspect_ratio_keeps_player_on_field() {
        let mut player = Player::default();
        player.apply_aspect_ratio(2.0);
        assert_eq!(player.height, 140.0);
        assert_eq!(player.pos.y, FIELD_HEIGHT - 140.0);

        player.apply_aspect_ratio(f32::NAN);
        assert_eq!(player.height, PLAYER_WIDTH);
    }

    #[test]
    fn test_fact_cycles() {
        assert_eq!(fact_for_level(1), WATER_FACTS[0]);
        assert_eq!(fact_for_level(4), WATER_FACTS[0]);
    }
}
