use crate::game::player::PlayerId;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;

/// Contract between the turn engine and a participant, human or automated.
///
/// Participants own their hands; the engine owns both piles and the active
/// suit and only ever hands values across this boundary.
pub trait PlayerStrategy {
    /// One-time assignment of this participant's id and its opponents' ids.
    fn init(&mut self, id: PlayerId, opponents: &[PlayerId]);

    /// Sets the starting hand, replacing whatever was held before.
    fn receive_initial_hand(&mut self, cards: Vec<Card>);

    /// Decide whether this turn is a draw-turn.
    ///
    /// `active_suit` may differ from `top.suit` after an eight was played.
    /// Must return `false` exactly when the hand holds a card matching the
    /// top card's rank, the active suit, or an eight.
    fn should_draw(&mut self, top: Card, active_suit: Suit) -> bool;

    /// Appends a card taken from the draw pile.
    fn receive_card(&mut self, card: Card);

    /// Removes and returns a card playable against the state seen by the
    /// preceding `should_draw`. `None` means the strategy broke its contract.
    fn play_card(&mut self) -> Option<Card>;

    /// Called only right after this participant played an eight.
    fn declare_suit(&mut self) -> Suit;

    /// Empties the hand ahead of a fresh game.
    fn reset(&mut self);

    fn hand(&self) -> &Hand;
}
