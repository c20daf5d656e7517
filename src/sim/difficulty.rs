//! Difficulty tiers and per-level scaling

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty tier chosen on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Label shown in the HUD
    pub fn mode_label(&self) -> String {
        format!("Mode: {}", self.as_str().to_uppercase())
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                base_speed: 2.5,
                base_pollutant_chance: 0.25,
                speed_bump: 0.5,
                pollutant_bump: 0.05,
            },
            Difficulty::Normal => DifficultyProfile {
                base_speed: 4.0,
                base_pollutant_chance: 0.4,
                speed_bump: 0.7,
                pollutant_bump: 0.08,
            },
            Difficulty::Hard => DifficultyProfile {
                base_speed: 5.5,
                base_pollutant_chance: 0.55,
                speed_bump: 1.0,
                pollutant_bump: 0.10,
            },
        }
    }
}

/// Fall speed and pollutant odds for a tier, plus how much each level adds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Pixels per tick at level 1
    pub base_speed: f32,
    /// Probability a spawn is a pollutant at level 1
    pub base_pollutant_chance: f32,
    pub speed_bump: f32,
    pub pollutant_bump: f32,
}

/// Derived per-level parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelState {
    /// 1-based
    pub level: u32,
    /// Score needed to clear the level
    pub target_score: u32,
    pub drop_speed: f32,
    pub pollutant_chance: f32,
}

impl LevelState {
    /// Scale a difficulty profile to a level
    pub fn new(difficulty: Difficulty, level: u32) -> Self {
        let level = level.clamp(1, MAX_LEVELS);
        let profile = difficulty.profile();
        let steps = (level - 1) as f32;

        Self {
            level,
            target_score: target_score_for(level),
            drop_speed: profile.base_speed + steps * profile.speed_bump,
            pollutant_chance: (profile.base_pollutant_chance + steps * profile.pollutant_bump)
                .min(MAX_POLLUTANT_CHANCE),
        }
    }

    pub fn is_final(&self) -> bool {
        self.level >= MAX_LEVELS
    }
}

/// Level 1 is a short warm-up, later levels ask for more
pub fn target_score_for(level: u32) -> u32 {
    if level <= 1 { 5 } else { 10 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_uses_base_values() {
        let state = LevelState::new(Difficulty::Normal, 1);
        assert_eq!(state.target_score, 5);
        assert_eq!(state.drop_speed, 4.0);
        assert_eq!(state.pollutant_chance, 0.4);
        assert!(!state.is_final());
    }

    #[test]
    fn test_level_two_scaling() {
        let easy = LevelState::new(Difficulty::Easy, 2);
        assert_eq!(easy.target_score, 10);
        assert!((easy.drop_speed - 3.0).abs() < 1e-6);
        assert!((easy.pollutant_chance - 0.30).abs() < 1e-6);

        let hard = LevelState::new(Difficulty::Hard, 2);
        assert!((hard.drop_speed - 6.5).abs() < 1e-6);
        assert!((hard.pollutant_chance - 0.65).abs() < 1e-6);
        assert!(hard.is_final());
    }

    #[test]
    fn test_pollutant_chance_capped() {
        for difficulty in Difficulty::ALL {
            for level in 1..=MAX_LEVELS + 3 {
                let state = LevelState::new(difficulty, level);
                assert!(state.pollutant_chance <= MAX_POLLUTANT_CHANCE);
                assert!(state.level <= MAX_LEVELS);
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert_eq!(Difficulty::Easy.mode_label(), "Mode: EASY");
    }
}
