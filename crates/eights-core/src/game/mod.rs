pub mod match_state;
pub mod player;
pub mod strategy;

pub use match_state::{
    ContractViolation, EngineError, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, MatchState, Outcome,
    SetupError, TurnEvent,
};
pub use player::PlayerId;
pub use strategy::PlayerStrategy;
