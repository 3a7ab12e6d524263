use crate::model::card::Card;
use crate::model::suit::Suit;
use std::vec::Vec;

/// Cards held by one participant, kept in the order they arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn playable(&self, top: Card, active_suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards
            .iter()
            .copied()
            .filter(move |card| card.is_playable_on(top, active_suit))
    }

    pub fn has_playable(&self, top: Card, active_suit: Suit) -> bool {
        self.playable(top, active_suit).next().is_some()
    }

    /// Card counts indexed by `Suit::index`.
    pub fn suit_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for card in &self.cards {
            counts[card.suit.index()] += 1;
        }
        counts
    }

    pub fn point_total(&self) -> u32 {
        self.cards.iter().map(|c| u32::from(c.point_value())).sum()
    }
}
