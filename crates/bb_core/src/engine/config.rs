//! # Engine Configuration
//!
//! Every tuning constant for a game lives here so balance changes never touch
//! the state machine.
//!
//! ```rust
//! use bb_core::engine::config::GameConfig;
//!
//! let standard = GameConfig::default();
//! let arcade = GameConfig::arcade();
//! assert!(arcade.resolver.base_hit_chance > standard.resolver.base_hit_chance);
//! ```

use serde::{Deserialize, Serialize};

use super::bases::WalkAdvancement;
use crate::error::ConfigError;

/// Regulation length of a game.
pub const DEFAULT_MAX_INNINGS: u8 = 9;
/// Shortest game the lifecycle accepts.
pub const MIN_INNINGS: u8 = 3;

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the game-owned RNG. Same seed + same inputs = same game.
    pub seed: u64,
    /// Scheduled innings. Extended by one for every tied regulation end.
    pub max_innings: u8,
    /// How runners move on a walk.
    pub walk_advancement: WalkAdvancement,
    /// Length of the cosmetic "pitch in progress" window.
    pub pitch_animation_ms: u64,
    pub resolver: ResolverConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_innings: DEFAULT_MAX_INNINGS,
            walk_advancement: WalkAdvancement::default(),
            pitch_animation_ms: 600,
            resolver: ResolverConfig::default(),
        }
    }
}

impl GameConfig {
    /// Regulation nine innings.
    pub fn standard() -> Self {
        Self::default()
    }

    /// More contact, more power.
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.resolver.base_hit_chance = 0.22;
        cfg.resolver.hit_chance_max = 0.55;
        cfg.resolver.in_play_out_chance = 0.2;
        cfg.resolver.home_run_base = 0.12;
        cfg
    }

    /// Three-inning game.
    pub fn short_game() -> Self {
        Self { max_innings: MIN_INNINGS, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_walk_advancement(mut self, walk_advancement: WalkAdvancement) -> Self {
        self.walk_advancement = walk_advancement;
        self
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_innings < MIN_INNINGS {
            return Err(ConfigError::MaxInningsTooLow { found: self.max_innings });
        }
        self.resolver.validate()
    }
}

/// Weights for [`crate::engine::resolver`].
///
/// Swing bands are drawn in the order hit, foul, out-in-play, strike; the
/// strike band takes whatever probability mass is left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    // Swing bands
    pub base_hit_chance: f64,
    pub batting_weight: f64,
    pub timing_weight: f64,
    pub pitching_weight: f64,
    pub hit_chance_min: f64,
    pub hit_chance_max: f64,
    pub foul_chance: f64,
    pub in_play_out_chance: f64,

    // Hit type: batter power rating vs. swing power input
    pub power_rating_weight: f64,
    pub power_input_weight: f64,
    pub home_run_base: f64,
    pub home_run_power_scale: f64,
    pub triple_chance: f64,
    pub double_base: f64,
    pub double_power_scale: f64,

    // Out type
    pub groundout_weight: f64,
    pub flyout_weight: f64,
    pub lineout_weight: f64,

    // Take
    pub take_strike_base: f64,
    pub take_control_weight: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_hit_chance: 0.12,
            batting_weight: 0.2,
            timing_weight: 0.2,
            pitching_weight: 0.15,
            hit_chance_min: 0.05,
            hit_chance_max: 0.5,
            foul_chance: 0.2,
            in_play_out_chance: 0.25,

            power_rating_weight: 0.7,
            power_input_weight: 0.3,
            home_run_base: 0.05,
            home_run_power_scale: 0.15,
            triple_chance: 0.04,
            double_base: 0.15,
            double_power_scale: 0.1,

            groundout_weight: 0.45,
            flyout_weight: 0.35,
            lineout_weight: 0.2,

            take_strike_base: 0.3,
            take_control_weight: 0.4,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("base_hit_chance", self.base_hit_chance),
            ("batting_weight", self.batting_weight),
            ("timing_weight", self.timing_weight),
            ("pitching_weight", self.pitching_weight),
            ("hit_chance_min", self.hit_chance_min),
            ("foul_chance", self.foul_chance),
            ("in_play_out_chance", self.in_play_out_chance),
            ("power_rating_weight", self.power_rating_weight),
            ("power_input_weight", self.power_input_weight),
            ("home_run_base", self.home_run_base),
            ("home_run_power_scale", self.home_run_power_scale),
            ("triple_chance", self.triple_chance),
            ("double_base", self.double_base),
            ("double_power_scale", self.double_power_scale),
            ("groundout_weight", self.groundout_weight),
            ("flyout_weight", self.flyout_weight),
            ("lineout_weight", self.lineout_weight),
            ("take_strike_base", self.take_strike_base),
            ("take_control_weight", self.take_control_weight),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        if self.hit_chance_max < self.hit_chance_min {
            return Err(ConfigError::InvalidWeight {
                name: "hit_chance_max",
                value: self.hit_chance_max,
            });
        }
        // The strike band must never be squeezed out entirely.
        let swing_mass = self.hit_chance_max + self.foul_chance + self.in_play_out_chance;
        if swing_mass >= 1.0 {
            return Err(ConfigError::InvalidWeight { name: "swing_bands", value: swing_mass });
        }
        // Power-scaled hit types must leave room for singles at full power.
        let extra_base = self.home_run_base
            + self.home_run_power_scale
            + self.triple_chance
            + self.double_base
            + self.double_power_scale;
        if extra_base > 1.0 {
            return Err(ConfigError::InvalidWeight { name: "extra_base_hits", value: extra_base });
        }
        let out_total = self.groundout_weight + self.flyout_weight + self.lineout_weight;
        if out_total <= 0.0 {
            return Err(ConfigError::InvalidWeight { name: "out_weights", value: out_total });
        }
        let take_max = self.take_strike_base + self.take_control_weight;
        if take_max > 1.0 {
            return Err(ConfigError::InvalidWeight { name: "take_strike", value: take_max });
        }
        Ok(())
    }
}
