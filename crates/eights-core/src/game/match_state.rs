use crate::game::player::PlayerId;
use crate::game::strategy::PlayerStrategy;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::pile::Pile;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, event};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 6;
pub const HAND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner(PlayerId),
    Tie,
}

/// What a single call to [`MatchState::step_turn`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Drew {
        player: PlayerId,
    },
    Played {
        player: PlayerId,
        card: Card,
        declared: Option<Suit>,
    },
    Won {
        player: PlayerId,
        card: Card,
    },
    DrawPileExhausted {
        player: PlayerId,
    },
}

impl TurnEvent {
    pub fn player(&self) -> PlayerId {
        match *self {
            TurnEvent::Drew { player }
            | TurnEvent::Played { player, .. }
            | TurnEvent::Won { player, .. }
            | TurnEvent::DrawPileExhausted { player } => player,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match *self {
            TurnEvent::Won { player, .. } => Some(Outcome::Winner(player)),
            TurnEvent::DrawPileExhausted { .. } => Some(Outcome::Tie),
            TurnEvent::Drew { .. } | TurnEvent::Played { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game needs between 3 and 6 players, got {requested}")]
    PlayerCount { requested: usize },
    #[error("dealing needs {needed} cards but the deck holds {available}")]
    DeckTooSmall { needed: usize, available: usize },
    #[error("the draw pile has no non-wild card to open the discard pile")]
    NoOpeningCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("declined to draw but produced no card")]
    NoCardPlayed,
    #[error("played {card} which does not fit on {top} with {active_suit} to match")]
    IllegalCard {
        card: Card,
        top: Card,
        active_suit: Suit,
    },
    #[error("played {card} which was not in hand")]
    CardNotInHand { card: Card },
    #[error("played {card} without removing it from hand")]
    CardNotRemoved { card: Card },
}

fn copies(hand: &Hand, card: Card) -> usize {
    hand.iter().filter(|held| **held == card).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("the game is already over")]
    GameOver,
    #[error("{player} broke the strategy contract: {violation}")]
    ContractViolation {
        player: PlayerId,
        violation: ContractViolation,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameStatus {
    Ongoing,
    Over(Outcome),
    Aborted,
}

struct Seat {
    id: PlayerId,
    strategy: Box<dyn PlayerStrategy>,
}

/// Shared state of one game: both piles, the suit to match and whose turn it is.
pub struct MatchState {
    seats: Vec<Seat>,
    draw_pile: Pile,
    discard_pile: Pile,
    active_suit: Suit,
    current: usize,
    round_number: u32,
    turns_taken: u32,
    status: GameStatus,
    seed: u64,
}

impl MatchState {
    pub fn new(participants: Vec<Box<dyn PlayerStrategy>>) -> Result<Self, SetupError> {
        let seed: u64 = rand::random();
        Self::with_seed(participants, seed)
    }

    pub fn with_seed(
        participants: Vec<Box<dyn PlayerStrategy>>,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng).into_pile();
        Self::setup(participants, deck, rng, seed)
    }

    /// Deals from the top (end) of `deck` without shuffling it first. The seed only
    /// drives the reshuffles that keep an eight off the opening discard.
    pub fn with_deck(
        participants: Vec<Box<dyn PlayerStrategy>>,
        deck: Pile,
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::setup(participants, deck, StdRng::seed_from_u64(seed), seed)
    }

    fn setup(
        participants: Vec<Box<dyn PlayerStrategy>>,
        mut deck: Pile,
        mut rng: StdRng,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let count = participants.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(SetupError::PlayerCount { requested: count });
        }

        let needed = count * HAND_SIZE + 1;
        if deck.len() < needed {
            return Err(SetupError::DeckTooSmall {
                needed,
                available: deck.len(),
            });
        }

        let ids: Vec<PlayerId> = (0..count).map(PlayerId::from_index).collect();
        let mut seats = Vec::with_capacity(count);
        for (id, mut strategy) in ids.iter().copied().zip(participants) {
            let opponents: Vec<PlayerId> = ids.iter().copied().filter(|o| *o != id).collect();
            strategy.init(id, &opponents);
            seats.push(Seat { id, strategy });
        }

        for seat in seats.iter_mut() {
            let cards = deck.deal(HAND_SIZE).ok_or(SetupError::DeckTooSmall {
                needed,
                available: deck.len(),
            })?;
            seat.strategy.receive_initial_hand(cards);
        }

        let mut draw_pile = deck;
        if draw_pile.cards().iter().all(|card| card.is_wild()) {
            return Err(SetupError::NoOpeningCard);
        }
        while draw_pile.peek().is_some_and(|card| card.is_wild()) {
            draw_pile.shuffle(&mut rng);
        }

        let opening = draw_pile.pop().ok_or(SetupError::NoOpeningCard)?;
        let mut discard_pile = Pile::new();
        discard_pile.push(opening);

        event!(
            Level::INFO,
            seed,
            players = count,
            opening = %opening,
            draw_pile = draw_pile.len(),
            "game set up"
        );

        Ok(Self {
            seats,
            draw_pile,
            discard_pile,
            active_suit: opening.suit,
            current: 0,
            round_number: 1,
            turns_taken: 0,
            status: GameStatus::Ongoing,
            seed,
        })
    }

    /// Runs exactly one participant's turn.
    pub fn step_turn(&mut self) -> Result<TurnEvent, EngineError> {
        if self.status != GameStatus::Ongoing {
            return Err(EngineError::GameOver);
        }

        let top = self.top_discard();
        let active_suit = self.active_suit;
        let seat = &mut self.seats[self.current];
        let player = seat.id;
        self.turns_taken += 1;

        if seat.strategy.should_draw(top, active_suit) {
            let Some(card) = self.draw_pile.pop() else {
                event!(Level::INFO, player = %player, "draw pile exhausted, game tied");
                self.status = GameStatus::Over(Outcome::Tie);
                return Ok(TurnEvent::DrawPileExhausted { player });
            };
            seat.strategy.receive_card(card);
            event!(Level::DEBUG, player = %player, remaining = self.draw_pile.len(), "drew");
            self.advance();
            return Ok(TurnEvent::Drew { player });
        }

        let held = seat.strategy.hand().clone();
        let card = match seat.strategy.play_card() {
            Some(card) => card,
            None => return Err(self.abort(player, ContractViolation::NoCardPlayed)),
        };
        if !held.contains(card) {
            return Err(self.abort(player, ContractViolation::CardNotInHand { card }));
        }
        if !card.is_playable_on(top, active_suit) {
            let violation = ContractViolation::IllegalCard {
                card,
                top,
                active_suit,
            };
            return Err(self.abort(player, violation));
        }
        let hand = self.seats[self.current].strategy.hand();
        let remaining = hand.len();
        if remaining + 1 != held.len() || copies(hand, card) + 1 != copies(&held, card) {
            return Err(self.abort(player, ContractViolation::CardNotRemoved { card }));
        }

        self.discard_pile.push(card);
        self.active_suit = card.suit;
        event!(Level::DEBUG, player = %player, card = %card, remaining, "played");

        if remaining == 0 {
            event!(Level::INFO, player = %player, turns = self.turns_taken, "game won");
            self.status = GameStatus::Over(Outcome::Winner(player));
            return Ok(TurnEvent::Won { player, card });
        }

        let declared = if card.is_wild() {
            let suit = self.seats[self.current].strategy.declare_suit();
            self.active_suit = suit;
            event!(Level::DEBUG, player = %player, suit = suit.name(), "declared suit");
            Some(suit)
        } else {
            None
        };

        self.advance();
        Ok(TurnEvent::Played {
            player,
            card,
            declared,
        })
    }

    pub fn run_to_completion(&mut self) -> Result<Outcome, EngineError> {
        if let GameStatus::Over(outcome) = self.status {
            return Ok(outcome);
        }
        loop {
            if let Some(outcome) = self.step_turn()?.outcome() {
                return Ok(outcome);
            }
        }
    }

    /// Hands the participants back with emptied hands, ready for another game.
    pub fn into_participants(self) -> Vec<Box<dyn PlayerStrategy>> {
        self.seats
            .into_iter()
            .map(|mut seat| {
                seat.strategy.reset();
                seat.strategy
            })
            .collect()
    }

    fn advance(&mut self) {
        self.current = (self.current + 1) % self.seats.len();
        if self.current == 0 {
            self.round_number += 1;
        }
    }

    fn abort(&mut self, player: PlayerId, violation: ContractViolation) -> EngineError {
        event!(Level::ERROR, player = %player, %violation, "strategy contract violated");
        self.status = GameStatus::Aborted;
        EngineError::ContractViolation { player, violation }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn top_discard(&self) -> Card {
        self.discard_pile
            .peek()
            .expect("discard pile always holds the opening card")
    }

    pub fn active_suit(&self) -> Suit {
        self.active_suit
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.seats.iter().map(|seat| seat.id).collect()
    }

    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    pub fn hand(&self, player: PlayerId) -> Option<&Hand> {
        self.seats
            .get(player.index())
            .map(|seat| seat.strategy.hand())
    }

    pub fn hand_sizes(&self) -> Vec<usize> {
        self.seats
            .iter()
            .map(|seat| seat.strategy.hand().len())
            .collect()
    }

    /// Cards across both piles and every hand; 52 in every reachable state.
    pub fn card_total(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len() + self.hand_sizes().iter().sum::<usize>()
    }

    pub fn current_player(&self) -> PlayerId {
        self.seats[self.current].id
    }

    /// The human seat is the last one to join.
    pub fn interactive_player(&self) -> PlayerId {
        PlayerId::from_index(self.seats.len() - 1)
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == GameStatus::Ongoing
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Over(outcome) => Some(outcome),
            GameStatus::Ongoing | GameStatus::Aborted => None,
        }
    }
}
