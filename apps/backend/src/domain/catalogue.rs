//! Fixed catalogues: map pool seed, match formats, sides and coin faces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Full map pool every session starts from, in prompt order.
pub const MAP_CATALOGUE: [&str; 7] = [
    "Ascent", "Icebox", "Sunset", "Haven", "Lotus", "Pearl", "Split",
];

/// Fresh copy of the catalogue for a new veto.
pub fn full_map_pool() -> Vec<String> {
    MAP_CATALOGUE.iter().map(|m| m.to_string()).collect()
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    #[serde(rename = "BO1")]
    Bo1,
    #[serde(rename = "BO3")]
    Bo3,
    #[serde(rename = "BO5")]
    Bo5,
}

impl MatchFormat {
    pub const ALL: [MatchFormat; 3] = [MatchFormat::Bo1, MatchFormat::Bo3, MatchFormat::Bo5];

    /// Number of maps played, which is also the number of `pick_side` steps.
    pub const fn maps_played(self) -> usize {
        match self {
            MatchFormat::Bo1 => 1,
            MatchFormat::Bo3 => 3,
            MatchFormat::Bo5 => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MatchFormat::Bo1 => "BO1",
            MatchFormat::Bo3 => "BO3",
            MatchFormat::Bo5 => "BO5",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchFormat::Bo1 => "Best of 1",
            MatchFormat::Bo3 => "Best of 3",
            MatchFormat::Bo5 => "Best of 5",
        }
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BO1" => Ok(MatchFormat::Bo1),
            "BO3" => Ok(MatchFormat::Bo3),
            "BO5" => Ok(MatchFormat::Bo5),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidFormat,
                format!("Unknown match format: {s}"),
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    /// Prompt order used for side picks.
    pub const OPTIONS: [Side; 2] = [Side::Defender, Side::Attacker];

    pub const fn opposite(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Attacker => "Attacker",
            Side::Defender => "Defender",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Attacker" => Ok(Side::Attacker),
            "Defender" => Ok(Side::Defender),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidSide,
                format!("Side must be Attacker or Defender, got: {s}"),
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CoinFace {
    Heads,
    Tails,
}

impl CoinFace {
    pub const OPTIONS: [CoinFace; 2] = [CoinFace::Heads, CoinFace::Tails];

    pub const fn opposite(self) -> CoinFace {
        match self {
            CoinFace::Heads => CoinFace::Tails,
            CoinFace::Tails => CoinFace::Heads,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CoinFace::Heads => "Heads",
            CoinFace::Tails => "Tails",
        }
    }
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoinFace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Heads" => Ok(CoinFace::Heads),
            "Tails" => Ok(CoinFace::Tails),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidCoinFace,
                format!("Pick Heads or Tails, got: {s}"),
            )),
        }
    }
}
