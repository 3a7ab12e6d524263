pub mod card;
pub mod deck;
pub mod hand;
pub mod pile;
pub mod rank;
pub mod suit;

pub use card::{Card, CardParseError};
pub use deck::Deck;
pub use hand::Hand;
pub use pile::Pile;
pub use rank::Rank;
pub use suit::Suit;
