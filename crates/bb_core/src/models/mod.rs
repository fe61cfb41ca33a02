pub mod events;
pub mod player;
pub mod summary;
pub mod team;

pub use events::{GameEvent, Half, HitType, OutType, PitchOutcome, PlateAppearanceEnd};
pub use player::{Player, PlayerId, PlayerStats, Position, MAX_STAT};
pub use summary::GameSummary;
pub use team::{Team, TeamRecord, TeamSide};
