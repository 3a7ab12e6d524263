use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Diamonds = 0,
    Hearts = 1,
    Spades = 2,
    Clubs = 3,
}

impl Suit {
    /// Precedence order; also breaks ties when a bot picks a suit to declare.
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Diamonds),
            1 => Some(Suit::Hearts),
            2 => Some(Suit::Spades),
            3 => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Diamonds => "DIAMONDS",
            Suit::Hearts => "HEARTS",
            Suit::Spades => "SPADES",
            Suit::Clubs => "CLUBS",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
            Suit::Clubs => "C",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a suit")]
pub struct UnknownSuit(pub String);

impl FromStr for Suit {
    type Err = UnknownSuit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Suit::ALL
            .iter()
            .copied()
            .find(|suit| suit.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSuit(trimmed.to_string()))
    }
}
