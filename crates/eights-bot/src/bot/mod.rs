mod declare;
mod play;

pub use declare::DeclarePlanner;
pub use play::{PlayChoice, PlayPlanner};

use eights_core::game::player::PlayerId;
use eights_core::game::strategy::PlayerStrategy;
use eights_core::model::card::Card;
use eights_core::model::hand::Hand;
use eights_core::model::suit::Suit;
use tracing::{Level, event};

/// Automated participant.
#[derive(Debug, Clone, Default)]
pub struct BotStrategy {
    id: Option<PlayerId>,
    opponents: Vec<PlayerId>,
    hand: Hand,
    target: Option<(Card, Suit)>,
    last_played_wild: bool,
}

impl BotStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<PlayerId> {
        self.id
    }

    pub fn opponents(&self) -> &[PlayerId] {
        &self.opponents
    }
}

/// `count` fresh bots boxed for [`eights_core::game::MatchState`].
pub fn bots(count: usize) -> Vec<Box<dyn PlayerStrategy>> {
    (0..count)
        .map(|_| Box::new(BotStrategy::new()) as Box<dyn PlayerStrategy>)
        .collect()
}

impl PlayerStrategy for BotStrategy {
    fn init(&mut self, id: PlayerId, opponents: &[PlayerId]) {
        self.id = Some(id);
        self.opponents = opponents.to_vec();
    }

    fn receive_initial_hand(&mut self, cards: Vec<Card>) {
        self.hand = Hand::with_cards(cards);
        self.last_played_wild = false;
    }

    fn should_draw(&mut self, top: Card, active_suit: Suit) -> bool {
        self.target = Some((top, active_suit));
        self.last_played_wild = false;
        !self.hand.has_playable(top, active_suit)
    }

    fn receive_card(&mut self, card: Card) {
        self.hand.add(card);
    }

    fn play_card(&mut self) -> Option<Card> {
        let (top, active_suit) = self.target.take()?;
        let choice = PlayPlanner::choose(&self.hand, top, active_suit)?;
        let card = self.hand.remove_at(choice.index)?;
        self.last_played_wild = card.is_wild();
        log_play_decision(self.id, &self.hand, top, active_suit, choice);
        Some(card)
    }

    fn declare_suit(&mut self) -> Suit {
        debug_assert!(
            self.last_played_wild,
            "declare_suit called without a preceding eight"
        );
        self.last_played_wild = false;
        let suit = DeclarePlanner::choose(&self.hand);
        event!(
            target: "eights_bot::declare",
            Level::DEBUG,
            player = ?self.id,
            suit = suit.name(),
            counts = ?self.hand.suit_counts(),
        );
        suit
    }

    fn reset(&mut self) {
        self.hand.clear();
        self.target = None;
        self.last_played_wild = false;
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }
}

fn log_play_decision(
    player: Option<PlayerId>,
    hand: &Hand,
    top: Card,
    active_suit: Suit,
    choice: PlayChoice,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    event!(
        target: "eights_bot::play",
        Level::DEBUG,
        player = ?player,
        top = %top,
        active_suit = active_suit.name(),
        chosen = %choice.card,
        hand_left = hand.len(),
        reason = choice.reason,
    );
}

#[cfg(test)]
mod tests {
    use super::BotStrategy;
    use eights_core::game::player::PlayerId;
    use eights_core::game::strategy::PlayerStrategy;
    use eights_core::model::card::Card;
    use eights_core::model::rank::Rank;
    use eights_core::model::suit::Suit;

    fn bot_with(cards: Vec<Card>) -> BotStrategy {
        let mut bot = BotStrategy::new();
        bot.init(
            PlayerId::from_index(0),
            &[PlayerId::from_index(1), PlayerId::from_index(2)],
        );
        bot.receive_initial_hand(cards);
        bot
    }

    #[test]
    fn init_records_identity() {
        let bot = bot_with(Vec::new());
        assert_eq!(bot.id(), Some(PlayerId::from_index(0)));
        assert_eq!(bot.opponents().len(), 2);
    }

    #[test]
    fn forced_draw_scenario() {
        let mut bot = bot_with(vec![
            Card::new(Rank::Nine, Suit::Spades),
            Card::new(Rank::Queen, Suit::Hearts),
        ]);
        assert!(bot.should_draw(Card::new(Rank::Three, Suit::Diamonds), Suit::Diamonds));
        bot.receive_card(Card::new(Rank::Three, Suit::Clubs));
        assert_eq!(bot.hand().len(), 3);
        assert!(!bot.should_draw(Card::new(Rank::Three, Suit::Diamonds), Suit::Diamonds));
        assert_eq!(bot.play_card(), Some(Card::new(Rank::Three, Suit::Clubs)));
    }

    #[test]
    fn play_removes_card_from_hand() {
        let mut bot = bot_with(vec![
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Five, Suit::Spades),
        ]);
        assert!(!bot.should_draw(Card::new(Rank::Nine, Suit::Hearts), Suit::Hearts));
        assert_eq!(bot.play_card(), Some(Card::new(Rank::Two, Suit::Hearts)));
        assert_eq!(bot.hand().cards(), &[Card::new(Rank::Five, Suit::Spades)]);
    }

    #[test]
    fn play_without_should_draw_yields_nothing() {
        let mut bot = bot_with(vec![Card::new(Rank::Two, Suit::Hearts)]);
        assert_eq!(bot.play_card(), None);
        assert_eq!(bot.hand().len(), 1);
    }

    #[test]
    fn wild_override_declares_hand_majority() {
        let mut bot = bot_with(vec![
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Two, Suit::Spades),
            Card::new(Rank::Jack, Suit::Spades),
            Card::new(Rank::Four, Suit::Diamonds),
        ]);
        assert!(!bot.should_draw(Card::new(Rank::Six, Suit::Hearts), Suit::Hearts));
        assert_eq!(bot.play_card(), Some(Card::new(Rank::Eight, Suit::Clubs)));
        assert_eq!(bot.declare_suit(), Suit::Spades);
    }

    #[test]
    fn reset_clears_hand() {
        let mut bot = bot_with(vec![Card::new(Rank::Two, Suit::Hearts)]);
        bot.reset();
        assert!(bot.hand().is_empty());
    }
}
