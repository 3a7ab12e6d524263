use core::fmt;
use serde::{Deserialize, Serialize};

/// 1-based seat identifier, assigned in join order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(id: u8) -> Option<Self> {
        if id == 0 { None } else { Some(Self(id)) }
    }

    /// Seat indices stop at 254 so the 1-based id still fits a `u8`.
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < u8::MAX as usize, "seat index out of range");
        Self(index as u8 + 1)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerId;

    #[test]
    fn zero_is_not_an_id() {
        assert_eq!(PlayerId::new(0), None);
        assert_eq!(PlayerId::new(3).map(PlayerId::get), Some(3));
    }

    #[test]
    fn index_roundtrip() {
        for index in 0..6 {
            assert_eq!(PlayerId::from_index(index).index(), index);
        }
        assert_eq!(PlayerId::from_index(0).get(), 1);
    }

    #[test]
    fn display_names_the_player() {
        assert_eq!(PlayerId::from_index(1).to_string(), "Player 2");
    }

    #[test]
    fn last_representable_seat() {
        assert_eq!(PlayerId::from_index(254).get(), 255);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "seat index out of range")]
    fn seat_index_past_u8_panics() {
        let _ = PlayerId::from_index(255);
    }
}
