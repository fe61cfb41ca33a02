//! Pitch outcomes and the event stream published to rendering, audio and UI.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::team::TeamSide;

/// Kind of base hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitType {
    Single,
    Double,
    Triple,
    HomeRun,
}

impl HitType {
    /// Bases the batter is awarded (4 = home run).
    pub fn bases(self) -> u8 {
        match self {
            HitType::Single => 1,
            HitType::Double => 2,
            HitType::Triple => 3,
            HitType::HomeRun => 4,
        }
    }
}

/// How a ball put in play was turned into an out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutType {
    Groundout,
    Flyout,
    Lineout,
}

/// Result of a single pitch as produced by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "snake_case")]
pub enum PitchOutcome {
    Ball,
    Strike,
    Foul,
    Hit(HitType),
    InPlayOut(OutType),
}

/// Half of an inning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    #[default]
    Top,
    Bottom,
}

impl Half {
    /// Side that bats in this half.
    pub fn batting_side(self) -> TeamSide {
        match self {
            Half::Top => TeamSide::Away,
            Half::Bottom => TeamSide::Home,
        }
    }

    pub fn fielding_side(self) -> TeamSide {
        self.batting_side().opponent()
    }
}

/// How a plate appearance ended, if the pitch ended one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlateAppearanceEnd {
    Hit(HitType),
    Walk,
    Strikeout,
    Out(OutType),
}

/// Events published to every registered listener.
///
/// For a single swing or take the order is always: `PitchResult`, then
/// `ScoreUpdate` (only if runs scored), then `InningChange` (only if the half
/// flipped), then `GameOver` (only if the game ended).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    PitchResult {
        outcome: PitchOutcome,
        batter: PlayerId,
        pitcher: PlayerId,
        /// Set when the pitch ended the plate appearance.
        plate_appearance: Option<PlateAppearanceEnd>,
        runs_scored: u8,
    },
    ScoreUpdate {
        home: u32,
        away: u32,
    },
    InningChange {
        inning: u16,
        half: Half,
    },
    GameOver {
        winner: TeamSide,
        winner_name: String,
    },
}
