//! Droplet Catch entry point
//!
//! The browser build is driven through `droplet_catch::web::WasmGame`. Natively
//! this runs a headless autopilot session on a virtual clock and reports how
//! it went.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use droplet_catch::consts::FRAME_MS;
    use droplet_catch::platform::{LogUi, ManualClock};
    use droplet_catch::renderer::NullRenderer;
    use droplet_catch::{Difficulty, GameConfig, GamePhase, GameSession};

    env_logger::init();
    log::info!("Droplet Catch (native) starting...");

    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(GameConfig::default().seed);

    let config = GameConfig::default().with_seed(seed);
    let mut session = GameSession::new(config, NullRenderer, LogUi, ManualClock::new());
    session.configure(difficulty);
    session.start();

    // Ten minutes of virtual play at most
    let max_frames = 10 * 60 * 1000 / FRAME_MS;
    let mut frames = 0;
    while frames < max_frames {
        session.autopilot_step();
        session.advance_clock(FRAME_MS);
        frames += 1;

        match session.phase() {
            GamePhase::LevelComplete if session.can_advance_level() => session.advance_level(),
            GamePhase::LevelComplete | GamePhase::Ended => break,
            _ => {}
        }
    }

    println!(
        "\n{} run (seed {}): {} at level {}, score {}, lives {}, {:.1}s simulated",
        difficulty.as_str(),
        seed,
        session.phase().as_str(),
        session.level(),
        session.score(),
        session.lives(),
        (frames * FRAME_MS) as f64 / 1000.0
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
