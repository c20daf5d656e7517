//! Game session module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Time only advances through scheduled tasks
//! - Seeded RNG only
//! - Drops are processed in collection order, once per tick

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod session;
pub mod state;
pub mod tick;

pub use autopilot::steer;
pub use collision::{catches, is_missed};
pub use difficulty::{Difficulty, DifficultyProfile, LevelState, target_score_for};
pub use session::GameSession;
pub use state::{
    Direction, DropKind, Droplet, GamePhase, MILESTONES, Milestone, Overlay, Player, WATER_FACTS,
    fact_for_level,
};
