use crate::model::card::Card;
use rand::seq::SliceRandom;

/// Stack of cards; the end of the vector is the top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn peek(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Pops `count` cards in draw order, or returns `None` without touching
    /// the pile when fewer remain.
    pub fn deal(&mut self, count: usize) -> Option<Vec<Card>> {
        if self.cards.len() < count {
            return None;
        }
        let split = self.cards.len() - count;
        let mut dealt = self.cards.split_off(split);
        dealt.reverse();
        Some(dealt)
    }

    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
