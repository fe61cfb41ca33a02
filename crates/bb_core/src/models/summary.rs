use serde::{Deserialize, Serialize};

use super::events::Half;

/// Read-only snapshot of the game for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSummary {
    pub inning: u16,
    pub half: Half,
    pub max_innings: u16,
    pub balls: u8,
    pub strikes: u8,
    pub outs: u8,
    pub home_score: u32,
    pub away_score: u32,
    /// Occupant of first, second and third base, by display name.
    pub bases: [Option<String>; 3],
    pub batter_name: Option<String>,
    pub pitcher_name: Option<String>,
    pub game_over: bool,
    pub winner_name: Option<String>,
}

impl GameSummary {
    pub fn runners_on(&self) -> usize {
        self.bases.iter().filter(|b| b.is_some()).count()
    }

    /// Scoreboard line, e.g. `"Top 3 | 1-2, 1 out | AWAY 2 - HOME 1"`.
    pub fn scoreboard_line(&self) -> String {
        let half = match self.half {
            Half::Top => "Top",
            Half::Bottom => "Bot",
        };
        let outs = if self.outs == 1 { "out" } else { "outs" };
        let status = if self.game_over { " | FINAL" } else { "" };
        format!(
            "{} {} | {}-{}, {} {} | AWAY {} - HOME {}{}",
            half,
            self.inning,
            self.balls,
            self.strikes,
            self.outs,
            outs,
            self.away_score,
            self.home_score,
            status
        )
    }
}
