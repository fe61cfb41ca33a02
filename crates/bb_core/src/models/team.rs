use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::player::{Player, PlayerId};
use crate::error::RosterError;

/// Which side of the scoreboard a team is on.
///
/// The away team bats in the top half, the home team in the bottom half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// A team with a fixed, non-empty roster.
///
/// Roster order is the batting order. The score only ever goes up during a
/// game, and the batting cursor only ever moves forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TeamRecord")]
pub struct Team {
    pub id: String,
    pub name: String,
    roster: Vec<Player>,
    score: u32,
    batting_cursor: usize,
}

/// Unvalidated wire shape of a [`Team`].
#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    pub id: String,
    pub name: String,
    pub roster: Vec<Player>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub batting_cursor: usize,
}

impl TryFrom<TeamRecord> for Team {
    type Error = RosterError;

    fn try_from(record: TeamRecord) -> Result<Self, Self::Error> {
        let mut team = Team::new(record.id, record.name, record.roster)?;
        team.score = record.score;
        team.batting_cursor = record.batting_cursor;
        Ok(team)
    }
}

impl Team {
    /// Build a team, rejecting an empty roster or duplicated player ids.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        roster: Vec<Player>,
    ) -> Result<Self, RosterError> {
        let name = name.into();
        if roster.is_empty() {
            return Err(RosterError::EmptyRoster { team: name });
        }

        let mut seen = HashSet::with_capacity(roster.len());
        for player in &roster {
            if !seen.insert(player.id) {
                return Err(RosterError::DuplicatePlayerId { id: player.id.0 });
            }
        }

        Ok(Self { id: id.into(), name, roster, score: 0, batting_cursor: 0 })
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn batting_cursor(&self) -> usize {
        self.batting_cursor
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// The batter due up: `roster[cursor % len]`.
    pub fn current_batter(&self) -> &Player {
        &self.roster[self.batting_cursor % self.roster.len()]
    }

    /// Whether anyone on the roster is listed at P.
    pub fn has_pitcher(&self) -> bool {
        self.roster.iter().any(|p| p.position.is_pitcher())
    }

    /// First player listed at P, or the first player on the roster when the
    /// team carries no pitcher.
    pub fn pitcher(&self) -> &Player {
        self.roster.iter().find(|p| p.position.is_pitcher()).unwrap_or(&self.roster[0])
    }

    pub(crate) fn add_runs(&mut self, runs: u32) {
        self.score = self.score.saturating_add(runs);
    }

    pub(crate) fn advance_batting_order(&mut self) {
        self.batting_cursor = self.batting_cursor.wrapping_add(1);
    }

    /// Zero the score and move the cursor back to the leadoff hitter.
    pub(crate) fn reset_for_game(&mut self) {
        self.score = 0;
        self.batting_cursor = 0;
    }
}
