//! Per-frame update
//!
//! Advances every drop, resolves catches and misses in collection order, and
//! decides whether the session stays in play.

use super::collision;
use super::session::GameSession;
use super::state::{DropKind, GamePhase, MILESTONES, Overlay};
use crate::consts::*;
use crate::platform::{Clock, Scheduled, TaskKind, UiPort};
use crate::renderer::{Feedback, Renderer};

impl<R: Renderer, U: UiPort, C: Clock> GameSession<R, U, C> {
    /// Advance the session by one frame
    pub fn tick(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let speed = self.level.drop_speed;
        for drop in &mut self.drops {
            drop.pos.y += speed;
        }

        // Replacements land at the same index and are not looked at until next tick
        for index in 0..self.drops.len() {
            if self.phase != GamePhase::Playing {
                break;
            }

            let drop = &self.drops[index];
            let kind = drop.kind;
            if collision::catches(&self.player, drop) {
                self.replace_drop(index);
                match kind {
                    DropKind::Pollutant => {
                        log::debug!("Caught pollutant");
                        self.lose_life();
                    }
                    DropKind::Clean => self.score_point(),
                }
            } else if collision::is_missed(drop) {
                self.replace_drop(index);
                if kind == DropKind::Clean {
                    log::debug!("Missed clean drop");
                    self.lose_life();
                }
            }
        }

        self.render();
        if self.phase == GamePhase::Playing {
            self.schedule_frame();
        }
    }

    fn replace_drop(&mut self, index: usize) {
        let fresh = self.spawn_drop();
        self.drops[index] = fresh;
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.ui.on_lives_changed(self.lives);
        self.flash(Feedback::Negative);
        if self.lives == 0 {
            self.end();
        }
    }

    fn score_point(&mut self) {
        self.score = self.score.saturating_add(1);
        self.ui.on_score_changed(self.score);
        self.flash(Feedback::Positive);
        log::debug!("Caught clean drop, score {}", self.score);

        if self.config.has_milestones {
            self.check_milestones();
        }
        if self.config.has_life_regen {
            self.regenerate_life();
        }
        if self.config.has_levels && self.score >= self.level.target_score {
            self.clear_level();
        }
    }

    fn check_milestones(&mut self) {
        let Some(milestone) = MILESTONES.iter().find(|m| m.score == self.score).copied() else {
            return;
        };
        if !self.shown_milestones.insert(milestone.score) {
            return;
        }

        self.ui.on_milestone(milestone.message);
        self.overlay = Some(Overlay::Milestone {
            score: milestone.score,
        });
        self.cancel_overlay();
        let task = Scheduled::new(self.generation, TaskKind::MilestoneExpired);
        self.overlay_task = Some(self.clock.after(MILESTONE_DURATION_MS, task));
        log::info!("Milestone at {}: {}", milestone.score, milestone.message);
    }

    fn regenerate_life(&mut self) {
        if self.score > 0
            && self.score % LIFE_REGEN_EVERY == 0
            && self.lives < self.config.max_lives
        {
            self.lives += 1;
            self.ui.on_lives_changed(self.lives);
            log::debug!("Regained a life, lives {}", self.lives);
        }
    }

    /// Target reached: complete now, or once the milestone overlay is gone
    fn clear_level(&mut self) {
        if matches!(self.overlay, Some(Overlay::Milestone { .. })) {
            self.phase = GamePhase::LevelClearing;
            self.cancel_frame();
            self.cancel_timer();
            log::debug!("Level clear waiting on milestone overlay");
        } else {
            self.complete_level();
        }
    }

    fn flash(&mut self, feedback: Feedback) {
        self.renderer.flash(feedback);
        let task = Scheduled::new(self.generation, TaskKind::FlashReset);
        self.clock.after(FLASH_DURATION_MS, task);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::GameConfig;
    use crate::platform::{ManualClock, RecordingUi, UiEvent};
    use crate::renderer::RecordingRenderer;
    use crate::sim::{Difficulty, Droplet};

    type TestSession = GameSession<RecordingRenderer, RecordingUi, ManualClock>;

    fn session(config: GameConfig) -> TestSession {
        let mut session = GameSession::new(
            config,
            RecordingRenderer::default(),
            RecordingUi::new(),
            ManualClock::new(),
        );
        session.configure(Difficulty::Normal);
        session.start();
        session
    }

    /// A drop that lands in the catcher on the next tick
    fn caught(session: &TestSession, kind: DropKind) -> Droplet {
        let player = session.player();
        Droplet {
            pos: Vec2::new(player.center_x(), player.pos.y),
            radius: 16.0,
            kind,
        }
    }

    #[test]
    fn test_tick_moves_drops_by_speed() {
        let mut session = session(GameConfig::default());
        let before: Vec<f32> = session.drops().iter().map(|d| d.pos.y).collect();
        session.tick();
        for (drop, y) in session.drops().iter().zip(before) {
            assert_eq!(drop.pos.y, y + 4.0);
        }
    }

    #[test]
    fn test_caught_drop_replaced_at_top() {
        let mut session = session(GameConfig::default());
        let drop = caught(&session, DropKind::Clean);
        session.place_drop(1, drop);
        session.tick();

        assert_eq!(session.score(), 1);
        assert_eq!(session.drops().len(), INITIAL_DROPS);
        assert_eq!(session.drops()[1].pos.y, 0.0);
        assert_eq!(session.renderer().flashes, vec![Feedback::Positive]);
    }

    #[test]
    fn test_missed_pollutant_is_free() {
        let mut session = session(GameConfig::default());
        let mut drop = caught(&session, DropKind::Pollutant);
        drop.pos = Vec2::new(5.0, FIELD_HEIGHT);
        session.place_drop(0, drop);
        session.tick();

        assert_eq!(session.lives(), MAX_LIVES);
        assert_eq!(session.drops()[0].pos.y, 0.0);
    }

    #[test]
    fn test_missed_clean_costs_a_life() {
        let mut session = session(GameConfig::default());
        let mut drop = caught(&session, DropKind::Clean);
        drop.pos = Vec2::new(5.0, FIELD_HEIGHT);
        session.place_drop(0, drop);
        session.tick();

        assert_eq!(session.lives(), MAX_LIVES - 1);
        assert_eq!(session.renderer().flashes, vec![Feedback::Negative]);
    }

    #[test]
    fn test_life_regen_every_third_catch() {
        let mut session = session(GameConfig {
            has_levels: false,
            has_milestones: false,
            ..GameConfig::default()
        });
        let drop = caught(&session, DropKind::Pollutant);
        session.place_drop(0, drop);
        session.tick();
        assert_eq!(session.lives(), MAX_LIVES - 1);

        for _ in 0..3 {
            let drop = caught(&session, DropKind::Clean);
            session.place_drop(0, drop);
            session.tick();
        }
        assert_eq!(session.score(), 3);
        assert_eq!(session.lives(), MAX_LIVES);

        // Already at the cap: no further regen
        for _ in 0..3 {
            let drop = caught(&session, DropKind::Clean);
            session.place_drop(0, drop);
            session.tick();
        }
        assert_eq!(session.lives(), MAX_LIVES);
    }

    #[test]
    fn test_two_catches_in_one_tick() {
        let mut session = session(GameConfig::default());
        let drop = caught(&session, DropKind::Clean);
        session.place_drop(0, drop.clone());
        session.place_drop(2, drop);
        session.tick();

        assert_eq!(session.score(), 2);
        assert_eq!(session.drops().len(), INITIAL_DROPS);
        assert_eq!(
            session.ui().count(|e| matches!(e, UiEvent::ScoreChanged { .. })),
            3 // initial zero + two catches
        );
    }

    #[test]
    fn test_tick_reschedules_single_frame() {
        let mut session = session(GameConfig::default());
        session.tick();
        session.tick();
        assert_eq!(session.clock().pending_of(TaskKind::Frame), 1);
    }
}
