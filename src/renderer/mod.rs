//! Render seam
//!
//! The session asks for frames; how they are drawn (canvas, sprite, terminal)
//! is up to the host.

use serde::{Deserialize, Serialize};

use crate::sim::{Droplet, Player};

/// Full-field flash shown after a catch or a miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Clean drop caught
    Positive,
    /// Life lost
    Negative,
}

impl Feedback {
    /// Overlay color for the flash
    pub fn color(&self) -> &'static str {
        match self {
            Feedback::Positive => "rgba(50, 255, 50, 0.4)",
            Feedback::Negative => "rgba(255, 50, 50, 0.4)",
        }
    }
}

/// Draws the play field
pub trait Renderer {
    /// Draw the current frame
    fn render(&mut self, player: &Player, drops: &[Droplet]);

    /// Tint the whole field; the session requests a redraw once it is over
    fn flash(&mut self, feedback: Feedback);
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _player: &Player, _drops: &[Droplet]) {}

    fn flash(&mut self, _feedback: Feedback) {}
}

/// Renderer that remembers what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Number of frames rendered
    pub frames: u32,
    /// Drops in the most recent frame
    pub last_drops: Vec<Droplet>,
    /// Player in the most recent frame
    pub last_player: Option<Player>,
    pub flashes: Vec<Feedback>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, player: &Player, drops: &[Droplet]) {
        self.frames += 1;
        self.last_player = Some(player.clone());
        self.last_drops.clear();
        self.last_drops.extend_from_slice(drops);
    }

    fn flash(&mut self, feedback: Feedback) {
        self.flashes.push(feedback);
    }
}
