// Headless game runner
// Run with: cargo run --bin simulate_game -- [seed] [innings]
//
// Plays one CPU-vs-CPU game and prints the event stream and final summary.

use std::sync::mpsc;

use anyhow::Context;
use bb_core::{
    AutoBatter, GameConfig, GameEvent, GameListener, GameState, PitchOutcome, TeamFactory,
};

const MAX_PITCHES: usize = 20_000;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed '{s}'"))?,
        None => 42,
    };
    let innings: u8 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid inning count '{s}'"))?,
        None => 9,
    };

    let config = GameConfig { max_innings: innings, ..GameConfig::standard() }.with_seed(seed);

    let mut factory = TeamFactory::new(seed);
    let home = factory.create_team("home", "Harbor Hawks")?;
    let away = factory.create_team("away", "Valley Vipers")?;

    let (tx, rx) = mpsc::channel::<GameEvent>();
    let listeners: Vec<Box<dyn GameListener>> = vec![Box::new(tx)];
    let mut game = GameState::with_listeners(config, listeners)?;
    game.initialize_game(home, away);

    let summary = game.simulate_to_completion(&mut AutoBatter::new(seed), MAX_PITCHES)?;

    let mut pitches = 0;
    for event in rx.try_iter() {
        match event {
            GameEvent::PitchResult { outcome, plate_appearance: Some(end), runs_scored, .. } => {
                pitches += 1;
                if runs_scored > 0 || matches!(outcome, PitchOutcome::Hit(_)) {
                    println!("  {:?} ({} scored)", end, runs_scored);
                }
            }
            GameEvent::PitchResult { .. } => pitches += 1,
            GameEvent::ScoreUpdate { home, away } => println!("  score: away {away} - home {home}"),
            GameEvent::InningChange { inning, half } => println!("-- {:?} {} --", half, inning),
            GameEvent::GameOver { winner_name, .. } => println!("== {winner_name} win =="),
        }
    }

    println!("{} pitches", pitches);
    println!("{}", summary.scoreboard_line());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
