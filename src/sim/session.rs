//! Game session: owns all mutable state and the lifecycle transitions
//!
//! The per-frame update lives in `tick.rs`. Everything here either resets
//! state or moves the session between phases.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::{Difficulty, LevelState};
use super::state::{Direction, DropKind, Droplet, GamePhase, Overlay, Player, fact_for_level};
use crate::config::{GameConfig, PlayerSkin};
use crate::consts::*;
use crate::platform::{Clock, Scheduled, TaskHandle, TaskKind, UiPort};
use crate::renderer::Renderer;

/// One page's worth of game: state, collaborators and scheduled tasks
pub struct GameSession<R: Renderer, U: UiPort, C: Clock> {
    pub(super) config: GameConfig,
    pub(super) difficulty: Difficulty,
    pub(super) level: LevelState,
    pub(super) phase: GamePhase,
    pub(super) score: u32,
    pub(super) lives: u8,
    /// Seconds left on the countdown (timed variants only)
    pub(super) time_remaining: Option<u32>,
    /// Clock time the next countdown second is due
    pub(super) timer_due_ms: u64,
    /// Milliseconds of the current countdown second still to play
    pub(super) timer_left_ms: u64,
    pub(super) player: Player,
    /// Active drops, always `initial_drops` long once a session starts
    pub(super) drops: Vec<Droplet>,
    pub(super) shown_milestones: BTreeSet<u32>,
    pub(super) overlay: Option<Overlay>,
    /// Bumped on start, advance and menu exit; tasks from older generations are ignored
    pub(super) generation: u64,
    pub(super) frame_task: Option<TaskHandle>,
    pub(super) timer_task: Option<TaskHandle>,
    pub(super) overlay_task: Option<TaskHandle>,
    pub(super) rng: Pcg32,
    pub(super) renderer: R,
    pub(super) ui: U,
    pub(super) clock: C,
}

impl<R: Renderer, U: UiPort, C: Clock> GameSession<R, U, C> {
    pub fn new(config: GameConfig, renderer: R, ui: U, clock: C) -> Self {
        let config = config.sanitized();
        let difficulty = Difficulty::default();
        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            difficulty,
            level: LevelState::new(difficulty, 1),
            phase: GamePhase::Idle,
            score: 0,
            lives: config.max_lives,
            time_remaining: None,
            timer_due_ms: 0,
            timer_left_ms: TIMER_INTERVAL_MS,
            player: Player::default(),
            drops: Vec::with_capacity(config.initial_drops),
            shown_milestones: BTreeSet::new(),
            overlay: None,
            generation: 0,
            frame_task: None,
            timer_task: None,
            overlay_task: None,
            config,
            renderer,
            ui,
            clock,
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level.level
    }

    pub fn level_state(&self) -> &LevelState {
        &self.level
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn drops(&self) -> &[Droplet] {
        &self.drops
    }

    pub fn shown_milestones(&self) -> &BTreeSet<u32> {
        &self.shown_milestones
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Whether an advance would move to another level (rather than restart)
    pub fn can_advance_level(&self) -> bool {
        self.phase == GamePhase::LevelComplete && !self.level.is_final()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Replace an active drop in place (scripted scenarios, replays).
    /// Returns false if there is no drop at `index`.
    pub fn place_drop(&mut self, index: usize, drop: Droplet) -> bool {
        match self.drops.get_mut(index) {
            Some(slot) => {
                *slot = drop;
                true
            }
            None => false,
        }
    }

    // === Lifecycle ===

    /// Pick a difficulty tier and go back to level 1
    pub fn configure(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.level = LevelState::new(difficulty, 1);
        log::info!(
            "Configured {} (speed {}, pollutant chance {})",
            difficulty.as_str(),
            self.level.drop_speed,
            self.level.pollutant_chance
        );
    }

    /// Begin a fresh run at the current level
    pub fn start(&mut self) {
        self.begin_generation();
        self.level = LevelState::new(self.difficulty, self.level.level);

        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = self.config.max_lives;
        self.player.reset();
        self.shown_milestones.clear();

        self.ui.on_mode_changed(&self.difficulty.mode_label());
        self.ui.on_lives_changed(self.lives);
        self.ui.on_score_changed(self.score);

        self.respawn_all();
        self.start_timer();
        self.render();
        self.schedule_frame();

        log::info!(
            "Session {} started: {} level {} (target {})",
            self.generation,
            self.difficulty.as_str(),
            self.level.level,
            self.level.target_score
        );
    }

    pub fn pause(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Paused;
        self.cancel_frame();
        self.cancel_timer();
        self.timer_left_ms = self
            .timer_due_ms
            .saturating_sub(self.clock.now_ms())
            .min(TIMER_INTERVAL_MS);
        log::debug!("Paused");
    }

    pub fn resume(&mut self) {
        if self.phase != GamePhase::Paused {
            return;
        }
        self.phase = GamePhase::Playing;
        self.resume_timer();
        self.schedule_frame();
        log::debug!("Resumed");
    }

    /// Back to level 1 with a fresh run
    pub fn restart(&mut self) {
        log::info!("Restarting");
        self.level = LevelState::new(self.difficulty, 1);
        self.start();
    }

    /// Leave the level-complete overlay: next level, or a full restart after the last one
    pub fn advance_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            return;
        }
        if self.level.is_final() {
            self.restart();
            return;
        }

        self.begin_generation();
        self.level = LevelState::new(self.difficulty, self.level.level + 1);
        self.score = 0;
        self.ui.on_score_changed(self.score);

        self.respawn_all();
        self.phase = GamePhase::Playing;
        self.start_timer();
        self.render();
        self.schedule_frame();

        log::info!(
            "Advanced to level {} (target {}, speed {}, pollutant chance {})",
            self.level.level,
            self.level.target_score,
            self.level.drop_speed,
            self.level.pollutant_chance
        );
    }

    /// Abandon the run and return to the start screen
    pub fn exit_to_menu(&mut self) {
        self.begin_generation();
        self.phase = GamePhase::Idle;
        log::info!("Exited to menu");
    }

    /// Stop the run for good (until restart)
    pub fn end(&mut self) {
        if matches!(self.phase, GamePhase::Idle | GamePhase::Ended) {
            return;
        }
        self.phase = GamePhase::Ended;
        self.cancel_frame();
        self.cancel_timer();
        self.dismiss_overlay();
        self.ui.on_game_over();
        log::info!(
            "Game over at level {} (score {}, lives {})",
            self.level.level,
            self.score,
            self.lives
        );
    }

    /// Show the level-complete overlay and suspend the tick loop
    pub fn complete_level(&mut self) {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::LevelClearing) {
            return;
        }
        self.phase = GamePhase::LevelComplete;
        self.cancel_frame();
        self.cancel_timer();

        let level = self.level.level;
        self.ui
            .on_level_complete(level, self.level.is_final(), fact_for_level(level));
        log::info!("Level {} completed with score {}", level, self.score);
    }

    // === Input ===

    pub fn on_key(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.player.shift(direction.sign() * PLAYER_STEP);
    }

    /// Sprite finished loading; size the catcher to its aspect ratio (height / width)
    pub fn set_player_aspect_ratio(&mut self, ratio: f32) {
        if self.config.player_skin != PlayerSkin::Sprite {
            return;
        }
        self.player.apply_aspect_ratio(ratio);
    }

    /// Countdown ran out
    pub fn on_timer_expire(&mut self) {
        if !self.config.has_timer {
            return;
        }
        if matches!(
            self.phase,
            GamePhase::Playing | GamePhase::Paused | GamePhase::LevelClearing
        ) {
            log::info!("Out of time");
            self.end();
        }
    }

    // === Scheduled tasks ===

    /// Run a task the clock reported due. Tasks from an older generation are dropped.
    pub fn fire(&mut self, task: Scheduled) {
        if task.generation != self.generation {
            log::debug!(
                "Dropping stale {:?} from session {} (now {})",
                task.kind,
                task.generation,
                self.generation
            );
            return;
        }

        match task.kind {
            TaskKind::Frame => {
                self.frame_task = None;
                self.tick();
            }
            TaskKind::TimerSecond => self.timer_second(),
            TaskKind::MilestoneExpired => self.milestone_expired(),
            TaskKind::FlashReset => {
                if self.phase != GamePhase::Idle {
                    self.render();
                }
            }
        }
    }

    /// Let `elapsed_ms` pass on the clock, running every task that comes due
    pub fn advance_clock(&mut self, elapsed_ms: u64) {
        let until = self.clock.now_ms() + elapsed_ms;
        while let Some(task) = self.clock.pop_due(until) {
            self.fire(task);
        }
    }

    fn timer_second(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(seconds) = self.time_remaining else {
            return;
        };
        if self.timer_left_ms < TIMER_INTERVAL_MS {
            // Partial second after a resume is done, back on the regular interval
            self.timer_left_ms = TIMER_INTERVAL_MS;
            self.resume_timer();
        } else {
            self.timer_due_ms = self.clock.now_ms() + TIMER_INTERVAL_MS;
        }

        let seconds = seconds.saturating_sub(1);
        self.time_remaining = Some(seconds);
        self.ui
            .on_timer_changed(seconds, seconds <= TIMER_URGENT_SECONDS);
        if seconds == 0 {
            self.on_timer_expire();
        }
    }

    fn milestone_expired(&mut self) {
        self.overlay_task = None;
        if self.overlay.take().is_some() {
            self.ui.on_milestone_hidden();
        }
        if self.phase == GamePhase::LevelClearing {
            self.complete_level();
        }
    }

    // === Internals ===

    /// Invalidate everything scheduled under the previous generation
    fn begin_generation(&mut self) {
        self.generation += 1;
        self.cancel_frame();
        self.cancel_timer();
        self.dismiss_overlay();
    }

    pub(super) fn schedule_frame(&mut self) {
        self.cancel_frame();
        let task = Scheduled::new(self.generation, TaskKind::Frame);
        self.frame_task = Some(self.clock.request_frame(task));
    }

    pub(super) fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame_task.take() {
            self.clock.cancel(handle);
        }
    }

    fn start_timer(&mut self) {
        self.cancel_timer();
        if !self.config.has_timer {
            self.time_remaining = None;
            return;
        }
        let seconds = self.config.timer_seconds;
        self.time_remaining = Some(seconds);
        self.timer_left_ms = TIMER_INTERVAL_MS;
        self.ui
            .on_timer_changed(seconds, seconds <= TIMER_URGENT_SECONDS);
        self.resume_timer();
    }

    /// Re-create the countdown without touching the remaining time. A second
    /// cut short by a pause finishes on a one-shot before the interval resumes.
    fn resume_timer(&mut self) {
        if self.time_remaining.is_none() {
            return;
        }
        self.cancel_timer();
        let task = Scheduled::new(self.generation, TaskKind::TimerSecond);
        let left = self.timer_left_ms;
        self.timer_due_ms = self.clock.now_ms() + left;
        let handle = if left < TIMER_INTERVAL_MS {
            self.clock.after(left, task)
        } else {
            self.clock.every(TIMER_INTERVAL_MS, task)
        };
        self.timer_task = Some(handle);
    }

    pub(super) fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer_task.take() {
            self.clock.cancel(handle);
        }
    }

    pub(super) fn cancel_overlay(&mut self) {
        if let Some(handle) = self.overlay_task.take() {
            self.clock.cancel(handle);
        }
    }

    /// Take down the milestone overlay early, telling the host to hide it
    fn dismiss_overlay(&mut self) {
        self.cancel_overlay();
        if self.overlay.take().is_some() {
            self.ui.on_milestone_hidden();
        }
    }

    pub(super) fn render(&mut self) {
        self.renderer.render(&self.player, &self.drops);
    }

    /// Clear the field and spawn the initial batch
    fn respawn_all(&mut self) {
        self.drops.clear();
        for _ in 0..self.config.initial_drops {
            let drop = self.spawn_drop();
            self.drops.push(drop);
        }
    }

    /// Make a new drop at the top of the field
    ///
    /// Category is a Bernoulli draw on the current pollutant chance; x keeps the
    /// whole circle on screen.
    pub fn spawn_drop(&mut self) -> Droplet {
        let kind = if self.rng.random::<f32>() < self.level.pollutant_chance {
            DropKind::Pollutant
        } else {
            DropKind::Clean
        };
        let radius = match kind {
            DropKind::Clean => self.config.drop_radii.clean,
            DropKind::Pollutant => self.config.drop_radii.pollutant,
        };
        let span = (FIELD_WIDTH - 2.0 * radius).max(0.0);
        let x = radius + self.rng.random::<f32>() * span;
        Droplet::new(kind, x, radius)
    }
}
