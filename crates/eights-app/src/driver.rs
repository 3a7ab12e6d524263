use std::io::{self, Write};

use eights_core::game::{EngineError, MatchState, Outcome, PlayerId, TurnEvent};
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Steps a match turn by turn and narrates it to `out`.
pub struct GameDriver<W> {
    state: MatchState,
    out: W,
}

impl<W: Write> GameDriver<W> {
    pub fn new(state: MatchState, out: W) -> Self {
        Self { state, out }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn into_parts(self) -> (MatchState, W) {
        (self.state, self.out)
    }

    pub fn announce(&mut self) -> io::Result<()> {
        let interactive = self.state.interactive_player();
        writeln!(self.out)?;
        for player in self.state.player_ids() {
            if player == interactive {
                writeln!(self.out, "You have joined the game!")?;
            } else {
                writeln!(self.out, "{player} has joined the game.")?;
            }
        }
        writeln!(self.out, "------------------------------")?;
        writeln!(self.out, "\nA new game has begun.")
    }

    pub fn run(&mut self) -> Result<Outcome, DriverError> {
        loop {
            let round = self.state.round_number();
            writeln!(
                self.out,
                "\nThe card on top of the discard pile is a {} and the declared suit to match \
                 is {}",
                self.state.top_discard().label(),
                self.state.active_suit().name()
            )?;

            let turn = self.state.step_turn()?;
            render_event(&mut self.out, &turn, self.state.interactive_player())?;
            if let Some(outcome) = turn.outcome() {
                event!(Level::INFO, ?outcome, turns = self.state.turns_taken(), "match finished");
                self.out.flush()?;
                return Ok(outcome);
            }

            if self.state.round_number() != round {
                writeln!(self.out, "\n\n----------NEW TURN----------\n")?;
            }
        }
    }
}

pub fn render_event<W: Write>(
    out: &mut W,
    turn: &TurnEvent,
    interactive: PlayerId,
) -> io::Result<()> {
    let is_human = turn.player() == interactive;
    match *turn {
        TurnEvent::Drew { player } => {
            if is_human {
                writeln!(out, "You have drawn a card.")
            } else {
                writeln!(out, "{player} has drawn a card.")
            }
        }
        TurnEvent::Played {
            player,
            card,
            declared,
        } => {
            if is_human {
                writeln!(out, "\nYou have played a {}", card.label())?;
            } else {
                writeln!(out, "{player} has played a {}", card.label())?;
            }
            if let Some(suit) = declared {
                writeln!(
                    out,
                    "\nBecause an eight was played, the new declared suit to match is {}",
                    suit.name()
                )?;
            }
            Ok(())
        }
        TurnEvent::Won { player, card } => {
            if is_human {
                writeln!(out, "\nYou have played a {}", card.label())?;
                writeln!(
                    out,
                    "You've successfully discarded all of your cards and won the game!"
                )
            } else {
                writeln!(out, "{player} has played a {}", card.label())?;
                writeln!(out, "{player} has won the game. Better luck next time")
            }
        }
        TurnEvent::DrawPileExhausted { .. } => {
            writeln!(out, "The draw pile is out of cards. The game ends in a tie.")
        }
    }
}
