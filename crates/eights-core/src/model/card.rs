use crate::model::rank::{Rank, UnknownRank};
use crate::model::suit::{Suit, UnknownSuit};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_wild(self) -> bool {
        matches!(self.rank, Rank::Eight)
    }

    /// A card may go on the pile when it is wild, shares the top card's rank,
    /// or matches the suit currently in force.
    pub fn is_playable_on(self, top: Card, active_suit: Suit) -> bool {
        self.is_wild() || self.rank == top.rank || self.suit == active_suit
    }

    pub const fn point_value(self) -> u8 {
        if self.is_wild() {
            50
        } else if self.rank.is_face() {
            10
        } else {
            self.rank.value()
        }
    }

    /// Long form used for console input and output, e.g. `ACE of DIAMONDS`.
    pub fn label(self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("expected \"RANK of SUIT\", got {0} word(s)")]
    WordCount(usize),
    #[error("expected \"of\" between rank and suit, got '{0}'")]
    MissingOf(String),
    #[error(transparent)]
    Rank(#[from] UnknownRank),
    #[error(transparent)]
    Suit(#[from] UnknownSuit),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let [rank, of, suit] = words.as_slice() else {
            return Err(CardParseError::WordCount(words.len()));
        };
        if !of.eq_ignore_ascii_case("of") {
            return Err(CardParseError::MissingOf((*of).to_string()));
        }
        Ok(Card::new(rank.parse()?, suit.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, CardParseError, Rank, Suit};

    #[test]
    fn eights_are_wild() {
        assert!(Card::new(Rank::Eight, Suit::Clubs).is_wild());
        assert!(!Card::new(Rank::Nine, Suit::Clubs).is_wild());
    }

    #[test]
    fn wild_is_playable_on_anything() {
        let eight = Card::new(Rank::Eight, Suit::Clubs);
        let top = Card::new(Rank::Three, Suit::Diamonds);
        for suit in Suit::ALL {
            assert!(eight.is_playable_on(top, suit));
        }
    }

    #[test]
    fn rank_and_suit_match_independently() {
        let top = Card::new(Rank::Three, Suit::Diamonds);
        assert!(Card::new(Rank::Three, Suit::Spades).is_playable_on(top, Suit::Diamonds));
        assert!(Card::new(Rank::King, Suit::Diamonds).is_playable_on(top, Suit::Diamonds));
        assert!(!Card::new(Rank::King, Suit::Spades).is_playable_on(top, Suit::Diamonds));
    }

    #[test]
    fn active_suit_overrides_printed_suit() {
        let top = Card::new(Rank::Eight, Suit::Clubs);
        let club = Card::new(Rank::Two, Suit::Clubs);
        let spade = Card::new(Rank::Two, Suit::Spades);
        assert!(!club.is_playable_on(top, Suit::Spades));
        assert!(spade.is_playable_on(top, Suit::Spades));
    }

    #[test]
    fn point_values() {
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).point_value(), 1);
        assert_eq!(Card::new(Rank::Seven, Suit::Hearts).point_value(), 7);
        assert_eq!(Card::new(Rank::Eight, Suit::Hearts).point_value(), 50);
        assert_eq!(Card::new(Rank::Nine, Suit::Hearts).point_value(), 9);
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).point_value(), 10);
        assert_eq!(Card::new(Rank::Jack, Suit::Hearts).point_value(), 10);
        assert_eq!(Card::new(Rank::King, Suit::Hearts).point_value(), 10);
    }

    #[test]
    fn label_and_parse_agree() {
        let card = Card::new(Rank::Ace, Suit::Diamonds);
        assert_eq!(card.label(), "ACE of DIAMONDS");
        assert_eq!("ace of diamonds".parse::<Card>(), Ok(card));
        assert_eq!("  Seven  OF clubs ".parse::<Card>(), Ok(Card::new(Rank::Seven, Suit::Clubs)));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!("ace".parse::<Card>(), Err(CardParseError::WordCount(1)));
        assert!(matches!(
            "ace in diamonds".parse::<Card>(),
            Err(CardParseError::MissingOf(_))
        ));
        assert!(matches!("one of diamonds".parse::<Card>(), Err(CardParseError::Rank(_))));
        assert!(matches!("ace of cups".parse::<Card>(), Err(CardParseError::Suit(_))));
    }

    #[test]
    fn compact_display() {
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10H");
        assert_eq!(Card::new(Rank::Queen, Suit::Spades).to_string(), "QS");
    }
}
