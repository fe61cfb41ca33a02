//! CPU batting and headless full-game simulation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::count::CountTracker;
use super::game::GameState;
use crate::error::GameError;
use crate::models::{GameSummary, Player, PlayerStats};

/// Seed offset so the batter's decisions do not mirror the game's own draws.
const AUTO_BATTER_SALT: u64 = 0x5EED_BA77;

/// What the CPU batter does with the next pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BatterAction {
    Swing { timing: f64, power: f64 },
    Take,
}

/// Picks swing/take and swing inputs for a CPU-controlled batter.
///
/// Good hitters swing on time more often; everyone protects the plate with
/// two strikes and lays off with three balls.
#[derive(Debug, Clone)]
pub struct AutoBatter {
    rng: ChaCha8Rng,
    swing_rate: f64,
}

impl AutoBatter {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed ^ AUTO_BATTER_SALT), swing_rate: 0.55 }
    }

    pub fn with_swing_rate(mut self, swing_rate: f64) -> Self {
        self.swing_rate = swing_rate.clamp(0.0, 1.0);
        self
    }

    pub fn decide(&mut self, batter: &Player, count: &CountTracker) -> BatterAction {
        let mut swing_chance = self.swing_rate;
        if count.strikes() == 2 {
            swing_chance += 0.2;
        }
        if count.balls() == 3 {
            swing_chance -= 0.25;
        }

        if !self.rng.gen_bool(swing_chance.clamp(0.0, 1.0)) {
            return BatterAction::Take;
        }

        // Timing error shrinks with batting skill.
        let skill = PlayerStats::normalize(batter.stats.batting);
        let spread = 0.5 * (1.0 - 0.7 * skill);
        let timing = 0.5 + self.rng.gen_range(-1.0..=1.0) * spread;

        let power_bias = PlayerStats::normalize(batter.stats.power);
        let power = (self.rng.gen::<f64>() * 0.6 + power_bias * 0.4).clamp(0.0, 1.0);

        BatterAction::Swing { timing, power }
    }
}

impl GameState {
    /// Play with CPU batters until the game ends or `max_pitches` have been
    /// thrown, whichever comes first. The cap bounds the extra-innings loop.
    pub fn simulate_to_completion(
        &mut self,
        batter: &mut AutoBatter,
        max_pitches: usize,
    ) -> Result<GameSummary, GameError> {
        if !self.is_initialized() {
            return Err(GameError::NotInitialized);
        }

        let mut pitches = 0;
        while !self.is_game_over() && pitches < max_pitches {
            let Some(current) = self.current_batter() else {
                break;
            };
            match batter.decide(current, self.count()) {
                BatterAction::Swing { timing, power } => {
                    self.swing_bat(timing, power);
                }
                BatterAction::Take => {
                    self.take_pitch();
                }
            }
            pitches += 1;
        }

        if !self.is_game_over() {
            log::warn!("Stopped after {} pitches without a result", pitches);
        }
        Ok(self.game_summary())
    }
}
