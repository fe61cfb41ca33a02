//! # bb_core - Baseball Game Simulation Core
//!
//! The plate appearance and inning lifecycle behind a baseball game:
//! pitch resolution, ball/strike/out counting, baserunner advancement,
//! half-inning transitions and extra innings.
//!
//! ## Features
//! - Deterministic: same seed and same inputs give the same game
//! - Never panics or errors on the gameplay surface
//! - Ordered event stream for rendering, audio and UI listeners
//!
//! ```rust
//! use bb_core::{GameConfig, GameState, TeamFactory};
//!
//! let mut factory = TeamFactory::new(7);
//! let home = factory.create_team("home", "Harbor Hawks").unwrap();
//! let away = factory.create_team("away", "Valley Vipers").unwrap();
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//! game.initialize_game(home, away);
//! game.swing_bat(0.5, 0.8);
//! let summary = game.game_summary();
//! assert_eq!(summary.inning, 1);
//! ```

pub mod engine;
pub mod error;
pub mod models;
pub mod roster;

pub use engine::{
    AutoBatter, GameConfig, GameListener, GameState, PitchCall, PitchLocation, WalkAdvancement,
};
pub use error::{ConfigError, GameError, Result, RosterError};
pub use models::{
    GameEvent, GameSummary, Half, HitType, OutType, PitchOutcome, PlateAppearanceEnd, Player,
    PlayerId, PlayerStats, Position, Team, TeamSide,
};
pub use roster::TeamFactory;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
