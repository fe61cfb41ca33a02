use thiserror::Error;

/// Problems with roster data handed over by the roster provider.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Team '{team}' has an empty roster")]
    EmptyRoster { team: String },

    #[error("Stat '{stat}' out of range: {value} (expected 0..=10)")]
    StatOutOfRange { stat: &'static str, value: u8 },

    #[error("Unknown position: {0}")]
    UnknownPosition(String),

    #[error("Duplicate player id: {id}")]
    DuplicatePlayerId { id: u32 },

    #[error("Roster parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invalid engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max_innings must be at least 3, found {found}")]
    MaxInningsTooLow { found: u8 },

    #[error("Invalid weight '{name}': {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Game has not been initialized")]
    NotInitialized,

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, GameError>;
