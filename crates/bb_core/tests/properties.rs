//! Invariants over arbitrary pitch sequences, and seeded full-game determinism.

use std::sync::mpsc;

use bb_core::{
    AutoBatter, GameConfig, GameEvent, GameListener, GameState, HitType, OutType, PitchOutcome,
    TeamFactory,
};
use proptest::prelude::*;

fn outcome_strategy() -> impl Strategy<Value = PitchOutcome> {
    prop_oneof![
        4 => Just(PitchOutcome::Ball),
        4 => Just(PitchOutcome::Strike),
        2 => Just(PitchOutcome::Foul),
        2 => prop_oneof![
            Just(HitType::Single),
            Just(HitType::Double),
            Just(HitType::Triple),
            Just(HitType::HomeRun),
        ]
        .prop_map(PitchOutcome::Hit),
        3 => prop_oneof![
            Just(OutType::Groundout),
            Just(OutType::Flyout),
            Just(OutType::Lineout),
        ]
        .prop_map(PitchOutcome::InPlayOut),
    ]
}

fn new_game(seed: u64) -> GameState {
    let mut factory = TeamFactory::new(seed);
    let home = factory.create_team("home", "Home").unwrap();
    let away = factory.create_team("away", "Away").unwrap();
    let mut game = GameState::new(GameConfig::short_game().with_seed(seed)).unwrap();
    game.initialize_game(home, away);
    game
}

proptest! {
    #[test]
    fn test_state_invariants_hold(outcomes in prop::collection::vec(outcome_strategy(), 0..400)) {
        let mut game = new_game(1);
        let mut last_score = (0, 0);

        for outcome in outcomes {
            if game.is_game_over() {
                prop_assert!(!game.record_outcome(outcome));
                continue;
            }
            game.record_outcome(outcome);

            let summary = game.game_summary();
            prop_assert!(summary.balls <= 3);
            prop_assert!(summary.strikes <= 2);
            prop_assert!(summary.outs <= 2);
            prop_assert!(summary.home_score >= last_score.0);
            prop_assert!(summary.away_score >= last_score.1);
            last_score = (summary.home_score, summary.away_score);

            // Every runner belongs to the batting team.
            let batting = game.batting_team().unwrap();
            for runner in game.bases().runners() {
                prop_assert!(batting.player(runner).is_some());
            }
            prop_assert_eq!(summary.runners_on(), game.bases().runner_count());

            if summary.game_over {
                prop_assert_ne!(summary.home_score, summary.away_score);
                prop_assert!(summary.inning >= 3);
            }
        }
    }

    #[test]
    fn test_summary_is_idempotent(outcomes in prop::collection::vec(outcome_strategy(), 0..100)) {
        let mut game = new_game(2);
        for outcome in outcomes {
            game.record_outcome(outcome);
        }
        let first = game.game_summary();
        let second = game.game_summary();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_plate_appearance_runs_are_bounded(outcomes in prop::collection::vec(outcome_strategy(), 0..200)) {
        let (tx, rx) = mpsc::channel::<GameEvent>();
        let listeners: Vec<Box<dyn GameListener>> = vec![Box::new(tx)];
        let mut game = GameState::with_listeners(GameConfig::short_game(), listeners).unwrap();
        let mut factory = TeamFactory::new(3);
        game.initialize_game(
            factory.create_team("home", "Home").unwrap(),
            factory.create_team("away", "Away").unwrap(),
        );
        for outcome in outcomes {
            game.record_outcome(outcome);
        }
        for event in rx.try_iter() {
            if let GameEvent::PitchResult { runs_scored, .. } = event {
                prop_assert!(runs_scored <= 4);
            }
        }
    }
}

fn play_seeded(seed: u64) -> (Vec<GameEvent>, bb_core::GameSummary) {
    let (tx, rx) = mpsc::channel::<GameEvent>();
    let mut game = new_game(seed);
    game.subscribe(tx);
    let summary = game.simulate_to_completion(&mut AutoBatter::new(seed), 50_000).unwrap();
    (rx.try_iter().collect(), summary)
}

#[test]
fn same_seed_replays_identically() {
    let (events_a, summary_a) = play_seeded(2024);
    let (events_b, summary_b) = play_seeded(2024);
    assert_eq!(summary_a, summary_b);
    assert_eq!(events_a, events_b);
    assert!(summary_a.game_over);
}

#[test]
fn event_stream_ends_with_game_over() {
    let (events, summary) = play_seeded(77);
    assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
    let game_overs = events.iter().filter(|e| matches!(e, GameEvent::GameOver { .. })).count();
    assert_eq!(game_overs, 1);
    assert!(summary.winner_name.is_some());
}
