//! Roster provider.
//!
//! `TeamFactory` hands the engine validated [`Team`]s: from explicit player
//! lists, from JSON, or generated from a seed with one player per position.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::RosterError;
use crate::models::{Player, PlayerStats, Position, Team, MAX_STAT};

const FIRST_NAMES: &[&str] = &[
    "Jake", "Carlos", "Mickey", "Hank", "Ichiro", "Tony", "Ozzie", "Reggie", "Cal", "Roberto",
    "Yogi", "Satchel", "Dizzy", "Lou", "Shohei", "Pedro", "Ken", "Willie",
];

const LAST_NAMES: &[&str] = &[
    "Martinez", "Gibson", "Robinson", "Ramirez", "Suzuki", "Johnson", "Smith", "Clemente",
    "Walker", "Ortiz", "Griffey", "Mays", "Aaron", "Ripken", "Berra", "Ohtani", "Dean", "Young",
];

const NICKNAMES: &[&str] = &["Slugger", "Ace", "Flash", "Hammer", "Rocket", "Wizard", "Tank", "Lefty"];

/// Builds teams with globally unique player ids.
#[derive(Debug, Clone)]
pub struct TeamFactory {
    rng: ChaCha8Rng,
    next_player_id: u32,
}

impl Default for TeamFactory {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TeamFactory {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), next_player_id: 1 }
    }

    /// Nine generated players, one per position, in a typical batting order.
    pub fn create_team(&mut self, id: &str, name: &str) -> Result<Team, RosterError> {
        let mut players = Vec::with_capacity(Position::ALL.len());
        for position in Position::ALL {
            players.push(self.generate_player(position)?);
        }
        // Pitcher hits last; everyone else keeps scorebook order.
        players.rotate_left(1);
        Team::new(id, name, players)
    }

    /// Team from an explicit batting order.
    pub fn team_from_players(
        &self,
        id: &str,
        name: &str,
        players: Vec<Player>,
    ) -> Result<Team, RosterError> {
        Team::new(id, name, players)
    }

    /// Team from its JSON form (`{"id", "name", "roster": [...]}`).
    pub fn team_from_json(&self, json: &str) -> Result<Team, RosterError> {
        let team: Team = serde_json::from_str(json)?;
        log::debug!("Loaded {} with {} players", team.name, team.roster().len());
        Ok(team)
    }

    fn generate_player(&mut self, position: Position) -> Result<Player, RosterError> {
        let id = self.next_player_id;
        self.next_player_id += 1;

        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Joe");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Doe");

        let (batting, power, speed, pitching, fielding) = match position {
            Position::Pitcher => (self.roll(1, 4), self.roll(1, 3), self.roll(2, 5), self.roll(6, 10), self.roll(4, 7)),
            Position::Catcher => (self.roll(3, 7), self.roll(4, 7), self.roll(1, 4), self.roll(0, 2), self.roll(6, 9)),
            Position::FirstBase | Position::LeftField | Position::RightField => {
                (self.roll(5, 9), self.roll(6, 10), self.roll(3, 6), self.roll(0, 2), self.roll(4, 7))
            }
            Position::Shortstop | Position::SecondBase | Position::CenterField => {
                (self.roll(5, 8), self.roll(2, 6), self.roll(6, 10), self.roll(0, 2), self.roll(7, 10))
            }
            Position::ThirdBase => (self.roll(5, 8), self.roll(5, 8), self.roll(3, 6), self.roll(0, 2), self.roll(5, 8)),
        };

        let mut player = Player::new(
            id,
            format!("{first} {last}"),
            position,
            PlayerStats::new(batting, power, speed, pitching, fielding)?,
        );
        if self.rng.gen_bool(0.25) {
            if let Some(nick) = NICKNAMES.choose(&mut self.rng) {
                player = player.with_nickname(*nick);
            }
        }
        Ok(player)
    }

    fn roll(&mut self, lo: u8, hi: u8) -> u8 {
        self.rng.gen_range(lo..=hi).min(MAX_STAT)
    }
}
