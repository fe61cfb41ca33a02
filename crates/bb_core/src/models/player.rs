use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;

/// Upper bound for every player rating.
pub const MAX_STAT: u8 = 10;

/// Stable player identifier assigned by the roster provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fielding position. The set is closed: a player is always exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
}

impl Position {
    /// All nine positions in scorebook order (1 = P ... 9 = RF).
    pub const ALL: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    /// Scorebook abbreviation ("P", "1B", "CF", ...).
    pub fn code(&self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
        }
    }

    pub fn is_pitcher(&self) -> bool {
        matches!(self, Position::Pitcher)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.code() == code)
            .ok_or_else(|| RosterError::UnknownPosition(s.to_string()))
    }
}

/// Player ratings, each in `0..=10`.
///
/// Construct through [`PlayerStats::new`] (or deserialize) so the range is
/// always checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStats")]
pub struct PlayerStats {
    pub batting: u8,
    pub power: u8,
    pub speed: u8,
    pub pitching: u8,
    pub fielding: u8,
}

#[derive(Deserialize)]
struct RawStats {
    batting: u8,
    power: u8,
    speed: u8,
    pitching: u8,
    fielding: u8,
}

impl TryFrom<RawStats> for PlayerStats {
    type Error = RosterError;

    fn try_from(raw: RawStats) -> Result<Self, Self::Error> {
        PlayerStats::new(raw.batting, raw.power, raw.speed, raw.pitching, raw.fielding)
    }
}

impl PlayerStats {
    pub fn new(
        batting: u8,
        power: u8,
        speed: u8,
        pitching: u8,
        fielding: u8,
    ) -> Result<Self, RosterError> {
        for (stat, value) in [
            ("batting", batting),
            ("power", power),
            ("speed", speed),
            ("pitching", pitching),
            ("fielding", fielding),
        ] {
            if value > MAX_STAT {
                return Err(RosterError::StatOutOfRange { stat, value });
            }
        }
        Ok(Self { batting, power, speed, pitching, fielding })
    }

    /// Every rating at `value` (clamped to the legal range).
    pub fn uniform(value: u8) -> Self {
        let v = value.min(MAX_STAT);
        Self { batting: v, power: v, speed: v, pitching: v, fielding: v }
    }

    /// Rating scaled to `0.0..=1.0`.
    #[inline]
    pub fn normalize(value: u8) -> f64 {
        f64::from(value.min(MAX_STAT)) / f64::from(MAX_STAT)
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::uniform(5)
    }
}

/// Immutable player identity, created once by the roster provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    pub stats: PlayerStats,
    pub position: Position,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: Position, stats: PlayerStats) -> Self {
        Self { id: PlayerId(id), name: name.into(), nickname: String::new(), stats, position }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    /// Nickname if one is set, otherwise the full name.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.name
        } else {
            &self.nickname
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_reject_out_of_range() {
        let err = PlayerStats::new(5, 11, 5, 5, 5).unwrap_err();
        assert!(matches!(err, RosterError::StatOutOfRange { stat: "power", value: 11 }));
        assert!(PlayerStats::new(0, 10, 10, 0, 10).is_ok());
    }

    #[test]
    fn test_stats_deserialize_validates() {
        let ok: PlayerStats = serde_json::from_str(
            r#"{"batting":7,"power":3,"speed":5,"pitching":1,"fielding":6}"#,
        )
        .unwrap();
        assert_eq!(ok.batting, 7);

        let bad = serde_json::from_str::<PlayerStats>(
            r#"{"batting":70,"power":3,"speed":5,"pitching":1,"fielding":6}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_position_codes() {
        assert_eq!("ss".parse::<Position>().unwrap(), Position::Shortstop);
        assert_eq!("1B".parse::<Position>().unwrap(), Position::FirstBase);
        assert!("DH".parse::<Position>().is_err());

        let json = serde_json::to_string(&Position::ThirdBase).unwrap();
        assert_eq!(json, "\"3B\"");
    }

    #[test]
    fn test_display_name_prefers_nickname() {
        let p = Player::new(1, "George Herman Ruth", Position::RightField, PlayerStats::default());
        assert_eq!(p.display_name(), "George Herman Ruth");
        let p = p.with_nickname("Babe");
        assert_eq!(p.display_name(), "Babe");
    }
}
