use eights_core::model::hand::Hand;
use eights_core::model::suit::Suit;

pub struct DeclarePlanner;

impl DeclarePlanner {
    /// Most common suit left in hand; ties and empty hands fall back to
    /// `Suit::ALL` precedence.
    pub fn choose(hand: &Hand) -> Suit {
        let counts = hand.suit_counts();
        let mut best = Suit::ALL[0];
        for suit in Suit::ALL.iter().copied().skip(1) {
            if counts[suit.index()] > counts[best.index()] {
                best = suit;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::DeclarePlanner;
    use eights_core::model::card::Card;
    use eights_core::model::hand::Hand;
    use eights_core::model::rank::Rank;
    use eights_core::model::suit::Suit;

    #[test]
    fn picks_majority_suit() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Two, Suit::Spades),
            Card::new(Rank::Three, Suit::Spades),
            Card::new(Rank::Four, Suit::Hearts),
        ]);
        assert_eq!(DeclarePlanner::choose(&hand), Suit::Spades);
    }

    #[test]
    fn ties_follow_precedence() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Three, Suit::Hearts),
        ]);
        assert_eq!(DeclarePlanner::choose(&hand), Suit::Hearts);
    }

    #[test]
    fn empty_hand_declares_diamonds() {
        assert_eq!(DeclarePlanner::choose(&Hand::new()), Suit::Diamonds);
    }
}
