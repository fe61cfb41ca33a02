//! Plate appearance / inning state machine.
//!
//! Leaf-first: `resolver` decides what a pitch did, `count` and `bases` record
//! it, `inning` moves the game between halves, and `game` wires them together
//! behind the public gameplay surface.

pub mod autoplay;
pub mod bases;
pub mod config;
pub mod count;
pub mod game;
pub mod inning;
pub mod listener;
pub mod resolver;

pub use autoplay::{AutoBatter, BatterAction};
pub use bases::{advance, award_walk, Advance, BaseState, WalkAdvancement};
pub use config::{GameConfig, ResolverConfig};
pub use count::{CountEvent, CountTracker, OutEvent};
pub use game::{GameState, PitchCall, PitchLocation};
pub use inning::{HalfTransition, InningPhase, InningState};
pub use listener::{EventBus, GameListener};
pub use resolver::PlateAppearanceResolver;
