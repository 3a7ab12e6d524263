use eights_core::model::card::Card;
use eights_core::model::hand::Hand;
use eights_core::model::suit::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayChoice {
    pub card: Card,
    pub index: usize,
    pub reason: &'static str,
}

pub struct PlayPlanner;

impl PlayPlanner {
    /// First matching non-eight in hand order; an eight only when nothing
    /// else fits.
    pub fn choose(hand: &Hand, top: Card, active_suit: Suit) -> Option<PlayChoice> {
        let mut wild = None;
        for (index, card) in hand.iter().copied().enumerate() {
            if !card.is_playable_on(top, active_suit) {
                continue;
            }
            if !card.is_wild() {
                let reason = if card.suit == active_suit {
                    "match_suit"
                } else {
                    "match_rank"
                };
                return Some(PlayChoice {
                    card,
                    index,
                    reason,
                });
            }
            wild.get_or_insert(PlayChoice {
                card,
                index,
                reason: "wild_last_resort",
            });
        }
        wild
    }
}
