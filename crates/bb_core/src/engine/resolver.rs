//! Plate appearance resolution
//!
//! Turns a batter, a pitcher and the swing inputs into one [`PitchOutcome`].
//! Everything here is a pure function of its inputs plus the RNG handed in,
//! so a seeded generator reproduces a game exactly.
//!
//! A swing draws once against four cumulative bands:
//!
//! ```text
//! 0.0 |--- hit ---|--- foul ---|--- out in play ---|------ strike ------| 1.0
//! ```
//!
//! The hit band widens with batter skill and timing and narrows with pitcher
//! skill. A hit then draws its type, an out in play draws its kind.

use rand::Rng;

use super::config::ResolverConfig;
use crate::models::{HitType, OutType, PitchOutcome, Player, PlayerStats};

/// Clamp a caller-supplied `0..=1` input. NaN becomes the midpoint.
pub(crate) fn sanitize_unit(value: f64) -> f64 {
    if value.is_nan() {
        log::debug!("NaN swing input, using 0.5");
        return 0.5;
    }
    if !(0.0..=1.0).contains(&value) {
        log::debug!("swing input {} clamped to 0..=1", value);
    }
    value.clamp(0.0, 1.0)
}

/// Timing bonus: 1.0 for a perfectly timed swing (0.5), 0.0 at either edge.
#[inline]
pub fn timing_bonus(timing: f64) -> f64 {
    (1.0 - 2.0 * (sanitize_unit(timing) - 0.5).abs()).clamp(0.0, 1.0)
}

/// Resolves pitches. Holds only configuration, never game state.
#[derive(Debug, Clone, Default)]
pub struct PlateAppearanceResolver {
    config: ResolverConfig,
}

impl PlateAppearanceResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Width of the hit band for this matchup and timing.
    pub fn hit_chance(&self, batter: &Player, pitcher: &Player, timing: f64) -> f64 {
        let cfg = &self.config;
        let batting = PlayerStats::normalize(batter.stats.batting);
        let pitching = PlayerStats::normalize(pitcher.stats.pitching);

        let skill = cfg.base_hit_chance + cfg.batting_weight * batting
            + cfg.timing_weight * timing_bonus(timing)
            - cfg.pitching_weight * pitching;
        skill.clamp(cfg.hit_chance_min, cfg.hit_chance_max)
    }

    /// Resolve a swing. Without a batter or pitcher the result is a plain
    /// strike and nothing is drawn from `rng`.
    pub fn resolve_swing<R: Rng + ?Sized>(
        &self,
        batter: Option<&Player>,
        pitcher: Option<&Player>,
        timing: f64,
        power: f64,
        rng: &mut R,
    ) -> PitchOutcome {
        let (Some(batter), Some(pitcher)) = (batter, pitcher) else {
            return PitchOutcome::Strike;
        };

        let hit = self.hit_chance(batter, pitcher, timing);
        let foul = hit + self.config.foul_chance;
        let in_play = foul + self.config.in_play_out_chance;

        let roll: f64 = rng.gen();
        if roll < hit {
            PitchOutcome::Hit(self.select_hit_type(batter, power, rng))
        } else if roll < foul {
            PitchOutcome::Foul
        } else if roll < in_play {
            PitchOutcome::InPlayOut(self.select_out_type(rng))
        } else {
            PitchOutcome::Strike
        }
    }

    /// Resolve a taken pitch from pitcher control alone. Without a pitcher the
    /// result is a ball and nothing is drawn from `rng`.
    pub fn resolve_take<R: Rng + ?Sized>(&self, pitcher: Option<&Player>, rng: &mut R) -> PitchOutcome {
        let Some(pitcher) = pitcher else {
            return PitchOutcome::Ball;
        };

        if rng.gen::<f64>() < self.strike_chance(pitcher) {
            PitchOutcome::Strike
        } else {
            PitchOutcome::Ball
        }
    }

    /// Probability that a taken pitch is called a strike.
    pub fn strike_chance(&self, pitcher: &Player) -> f64 {
        let control = PlayerStats::normalize(pitcher.stats.pitching);
        (self.config.take_strike_base + self.config.take_control_weight * control).clamp(0.0, 1.0)
    }

    /// Blend of the batter's power rating and the swing's power input.
    pub fn power_score(&self, batter: &Player, power: f64) -> f64 {
        let cfg = &self.config;
        let weights = cfg.power_rating_weight + cfg.power_input_weight;
        if weights <= 0.0 {
            return 0.0;
        }
        let score = cfg.power_rating_weight * PlayerStats::normalize(batter.stats.power)
            + cfg.power_input_weight * sanitize_unit(power);
        score / weights
    }

    fn select_hit_type<R: Rng + ?Sized>(&self, batter: &Player, power: f64, rng: &mut R) -> HitType {
        let cfg = &self.config;
        let ps = self.power_score(batter, power);

        let home_run = cfg.home_run_base + cfg.home_run_power_scale * ps;
        let triple = home_run + cfg.triple_chance;
        let double = triple + cfg.double_base + cfg.double_power_scale * ps;

        let roll: f64 = rng.gen();
        if roll < home_run {
            HitType::HomeRun
        } else if roll < triple {
            HitType::Triple
        } else if roll < double {
            HitType::Double
        } else {
            HitType::Single
        }
    }

    fn select_out_type<R: Rng + ?Sized>(&self, rng: &mut R) -> OutType {
        let cfg = &self.config;
        let total = cfg.groundout_weight + cfg.flyout_weight + cfg.lineout_weight;
        let roll = rng.gen::<f64>() * total;
        if roll < cfg.groundout_weight {
            OutType::Groundout
        } else if roll < cfg.groundout_weight + cfg.flyout_weight {
            OutType::Flyout
        } else {
            OutType::Lineout
        }
    }
}
