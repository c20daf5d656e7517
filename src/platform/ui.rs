//! Outbound UI notifications
//!
//! The session reports what changed; the presentation layer decides how the
//! HUD, overlays and screens react.

use serde::{Deserialize, Serialize};

/// Notifications the session emits toward the presentation layer
pub trait UiPort {
    fn on_score_changed(&mut self, score: u32);
    fn on_lives_changed(&mut self, lives: u8);
    /// Level target reached. `is_final` means the next advance restarts the game.
    fn on_level_complete(&mut self, level: u32, is_final: bool, fact: &str);
    fn on_game_over(&mut self);
    fn on_mode_changed(&mut self, name: &str);
    fn on_milestone(&mut self, message: &str);

    /// Milestone overlay display time is over
    fn on_milestone_hidden(&mut self) {}

    /// Countdown changed. `urgent` is set for the last few seconds.
    fn on_timer_changed(&mut self, _seconds: u32, _urgent: bool) {}
}

/// A recorded UI notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    ScoreChanged { score: u32 },
    LivesChanged { lives: u8 },
    LevelComplete { level: u32, is_final: bool, fact: String },
    GameOver,
    ModeChanged { name: String },
    Milestone { message: String },
    MilestoneHidden,
    TimerChanged { seconds: u32, urgent: bool },
}

/// UI port that keeps every notification in order
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    pub events: Vec<UiEvent>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, pred: impl Fn(&UiEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl UiPort for RecordingUi {
    fn on_score_changed(&mut self, score: u32) {
        self.events.push(UiEvent::ScoreChanged { score });
    }

    fn on_lives_changed(&mut self, lives: u8) {
        self.events.push(UiEvent::LivesChanged { lives });
    }

    fn on_level_complete(&mut self, level: u32, is_final: bool, fact: &str) {
        self.events.push(UiEvent::LevelComplete {
            level,
            is_final,
            fact: fact.to_string(),
        });
    }

    fn on_game_over(&mut self) {
        self.events.push(UiEvent::GameOver);
    }

    fn on_mode_changed(&mut self, name: &str) {
        self.events.push(UiEvent::ModeChanged {
            name: name.to_string(),
        });
    }

    fn on_milestone(&mut self, message: &str) {
        self.events.push(UiEvent::Milestone {
            message: message.to_string(),
        });
    }

    fn on_milestone_hidden(&mut self) {
        self.events.push(UiEvent::MilestoneHidden);
    }

    fn on_timer_changed(&mut self, seconds: u32, urgent: bool) {
        self.events.push(UiEvent::TimerChanged { seconds, urgent });
    }
}

/// UI port for headless runs: writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogUi;

impl UiPort for LogUi {
    fn on_score_changed(&mut self, score: u32) {
        log::debug!("Score: {}", score);
    }

    fn on_lives_changed(&mut self, lives: u8) {
        log::debug!("Lives: {}", lives);
    }

    fn on_level_complete(&mut self, level: u32, is_final: bool, fact: &str) {
        log::info!("Level {} Completed! (final: {})", level, is_final);
        log::info!("💧 Did you know? {}", fact);
    }

    fn on_game_over(&mut self) {
        log::info!("Game over");
    }

    fn on_mode_changed(&mut self, name: &str) {
        log::info!("Mode: {}", name);
    }

    fn on_milestone(&mut self, message: &str) {
        log::info!("🎉 {}", message);
    }

    fn on_timer_changed(&mut self, seconds: u32, urgent: bool) {
        if urgent {
            log::debug!("Time: {}s", seconds);
        }
    }
}
