pub mod bot;

pub use bot::{BotStrategy, DeclarePlanner, PlayChoice, PlayPlanner, bots};
