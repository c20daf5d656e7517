use droplet_catch::consts::*;
use droplet_catch::platform::{ManualClock, RecordingUi};
use droplet_catch::renderer::NullRenderer;
use droplet_catch::sim::{Direction, DropKind, Droplet};
use droplet_catch::{Difficulty, GameConfig, GamePhase, GameSession};
use glam::Vec2;
use proptest::prelude::*;

type Session = GameSession<NullRenderer, RecordingUi, ManualClock>;

#[derive(Debug, Clone)]
enum Action {
    Tick,
    Key(Direction),
    Catch(DropKind),
    Miss(DropKind),
    Pause,
    Resume,
    Wait(u64),
    AdvanceLevel,
    Restart,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => Just(Action::Tick),
        2 => prop_oneof![Just(Direction::Left), Just(Direction::Right)].prop_map(Action::Key),
        4 => prop_oneof![Just(DropKind::Clean), Just(DropKind::Pollutant)].prop_map(Action::Catch),
        2 => prop_oneof![Just(DropKind::Clean), Just(DropKind::Pollutant)].prop_map(Action::Miss),
        1 => Just(Action::Pause),
        1 => Just(Action::Resume),
        2 => (0u64..3000).prop_map(Action::Wait),
        1 => Just(Action::AdvanceLevel),
        1 => Just(Action::Restart),
    ]
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Normal),
        Just(Difficulty::Hard)
    ]
}

fn apply(session: &mut Session, action: &Action) {
    match action {
        Action::Tick => session.tick(),
        Action::Key(direction) => session.on_key(*direction),
        Action::Catch(kind) => {
            let player = session.player();
            let drop = Droplet {
                pos: Vec2::new(player.center_x(), player.pos.y),
                radius: 16.0,
                kind: *kind,
            };
            session.place_drop(0, drop);
            session.tick();
        }
        Action::Miss(kind) => {
            let drop = Droplet {
                pos: Vec2::new(5.0, FIELD_HEIGHT),
                radius: 16.0,
                kind: *kind,
            };
            session.place_drop(0, drop);
            session.tick();
        }
        Action::Pause => session.pause(),
        Action::Resume => session.resume(),
        Action::Wait(ms) => session.advance_clock(*ms),
        Action::AdvanceLevel => session.advance_level(),
        Action::Restart => session.restart(),
    }
}

proptest! {
    #[test]
    fn session_invariants_hold(
        seed in any::<u64>(),
        difficulty in difficulty(),
        actions in prop::collection::vec(action(), 1..80),
    ) {
        let config = GameConfig::default().with_seed(seed);
        let mut session: Session =
            GameSession::new(config, NullRenderer, RecordingUi::new(), ManualClock::new());
        session.configure(difficulty);
        session.start();

        for action in &actions {
            let score_before = session.score();
            let phase_before = session.phase();
            apply(&mut session, action);

            prop_assert!(session.lives() <= MAX_LIVES);
            prop_assert_eq!(session.drops().len(), INITIAL_DROPS);
            prop_assert!(session.player().pos.x >= 0.0);
            prop_assert!(session.player().pos.x <= FIELD_WIDTH - session.player().width);

            let target = session.level_state().target_score;
            match session.phase() {
                GamePhase::Playing | GamePhase::Paused => {
                    prop_assert!(session.score() < target);
                }
                GamePhase::LevelClearing | GamePhase::LevelComplete => {
                    prop_assert_eq!(session.score(), target);
                }
                GamePhase::Ended => {
                    prop_assert!(session.lives() == 0 || session.time_remaining() == Some(0));
                }
                GamePhase::Idle => {
                    prop_assert!(false, "never left for the menu");
                }
            }

            // Score only moves up within a level
            let reset = matches!(action, Action::Restart | Action::AdvanceLevel);
            if !reset && phase_before == session.phase() {
                prop_assert!(session.score() >= score_before);
            }
            if matches!(phase_before, GamePhase::Ended) && !reset {
                prop_assert_eq!(session.phase(), GamePhase::Ended);
            }
        }
    }

    #[test]
    fn spawns_stay_on_field(seed in any::<u64>(), difficulty in difficulty()) {
        let config = GameConfig::default().with_seed(seed);
        let mut session: Session =
            GameSession::new(config, NullRenderer, RecordingUi::new(), ManualClock::new());
        session.configure(difficulty);
        session.start();

        for _ in 0..64 {
            let drop = session.spawn_drop();
            prop_assert_eq!(drop.pos.y, 0.0);
            prop_assert!(drop.pos.x >= drop.radius);
            prop_assert!(drop.pos.x <= FIELD_WIDTH - drop.radius);
        }
    }

    #[test]
    fn single_tick_keeps_drop_count(seed in any::<u64>(), ticks in 1usize..400) {
        let config = GameConfig {
            has_levels: false,
            ..GameConfig::default().with_seed(seed)
        };
        let mut session: Session =
            GameSession::new(config, NullRenderer, RecordingUi::new(), ManualClock::new());
        session.configure(Difficulty::Hard);
        session.start();

        for _ in 0..ticks {
            session.tick();
            prop_assert_eq!(session.drops().len(), INITIAL_DROPS);
            if session.phase() == GamePhase::Ended {
                prop_assert_eq!(session.lives(), 0);
                break;
            }
        }
    }
}
