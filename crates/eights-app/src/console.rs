//! Text adapter that lets a person at a terminal take the human seat.
//!
//! All free-form input is parsed and validated here; the engine only ever
//! receives cards that are in hand and playable against the active suit.

use std::fmt;
use std::io::{self, BufRead, Write};

use eights_core::game::{PlayerId, PlayerStrategy};
use eights_core::model::{Card, Hand, Suit};
use tracing::{Level, event};

use crate::config::GameConfig;

const CARD_FORMAT_HELP: &str = "Choose which card you'd like to play by entering it as \
\"RANK of SUIT\", for example \"ACE of DIAMONDS\", \"ace of diamonds\" or \"seven of clubs\".";

pub struct ConsoleStrategy<R, W> {
    input: R,
    output: W,
    id: Option<PlayerId>,
    hand: Hand,
    target: Option<(Card, Suit)>,
}

impl<R: BufRead, W: Write> ConsoleStrategy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            id: None,
            hand: Hand::new(),
            target: None,
        }
    }

    pub fn id(&self) -> Option<PlayerId> {
        self.id
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn say(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.output, "{args}") {
            event!(Level::WARN, %err, "console write failed");
        }
    }

    /// `None` once input is exhausted.
    fn read_line(&mut self) -> Option<String> {
        if let Err(err) = self.output.flush() {
            event!(Level::WARN, %err, "console flush failed");
        }
        read_trimmed_line(&mut self.input)
    }

    fn show_cards(&mut self, heading: &str, cards: &[Card]) {
        self.say(format_args!("\n{heading}"));
        if cards.is_empty() {
            self.say(format_args!("NOTHING"));
        }
        for card in cards {
            self.say(format_args!("{}", card.label()));
        }
    }
}

impl<R: BufRead, W: Write> PlayerStrategy for ConsoleStrategy<R, W> {
    fn init(&mut self, id: PlayerId, _opponents: &[PlayerId]) {
        self.id = Some(id);
    }

    fn receive_initial_hand(&mut self, cards: Vec<Card>) {
        self.hand = Hand::with_cards(cards);
    }

    fn should_draw(&mut self, top: Card, active_suit: Suit) -> bool {
        self.target = Some((top, active_suit));
        let held = self.hand.cards().to_vec();
        self.show_cards("The cards in your hand are:", &held);
        let playable: Vec<Card> = self.hand.playable(top, active_suit).collect();
        self.show_cards("The cards that you can play are:", &playable);

        if playable.is_empty() {
            self.say(format_args!(
                "\nBecause you have no legally playable cards, you must draw a card."
            ));
            return true;
        }
        false
    }

    fn receive_card(&mut self, card: Card) {
        self.say(format_args!(
            "\nThe card that you've drawn is a {}",
            card.label()
        ));
        self.hand.add(card);
    }

    fn play_card(&mut self) -> Option<Card> {
        let (top, active_suit) = self.target?;
        self.say(format_args!(
            "\nAs a reminder, the card on top of the discard pile is a {} and the suit to \
             match is {}",
            top.label(),
            active_suit.name()
        ));

        loop {
            self.say(format_args!("\n{CARD_FORMAT_HELP}"));
            let line = self.read_line()?;
            let card = match line.parse::<Card>() {
                Ok(card) => card,
                Err(err) => {
                    self.say(format_args!(
                        "\nThe format which you entered does not match a valid card ({err})."
                    ));
                    continue;
                }
            };
            if !self.hand.contains(card) {
                self.say(format_args!("\nYou don't have the {} in your hand.", card.label()));
                continue;
            }
            if !card.is_playable_on(top, active_suit) {
                self.say(format_args!(
                    "\nThe {} can't be played: match the {} rank, the suit {}, or play an eight.",
                    card.label(),
                    top.rank.name(),
                    active_suit.name()
                ));
                continue;
            }
            self.hand.remove(card);
            self.target = None;
            return Some(card);
        }
    }

    fn declare_suit(&mut self) -> Suit {
        loop {
            self.say(format_args!(
                "\nBecause you've played an eight, you can pick the next suit. \
                 Enter the suit that you'd like (Diamonds, Hearts, Spades, Clubs):"
            ));
            let Some(line) = self.read_line() else {
                return Suit::ALL[0];
            };
            match line.parse::<Suit>() {
                Ok(suit) => return suit,
                Err(err) => self.say(format_args!("\n{err}.")),
            }
        }
    }

    fn reset(&mut self) {
        self.hand.clear();
        self.target = None;
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }
}

fn read_trimmed_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(err) => {
            event!(Level::WARN, %err, "console read failed");
            None
        }
    }
}

/// Asks how many bots to face until a count in range is entered. `None`
/// when input runs out first.
pub fn prompt_bot_count<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<usize>> {
    writeln!(
        output,
        "Welcome to Crazy 8's! How many bots would you like to play against? \
         You can play against {} bots, or against up to {}:",
        GameConfig::MIN_BOTS,
        GameConfig::MAX_BOTS
    )?;
    loop {
        output.flush()?;
        let Some(line) = read_trimmed_line(input) else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(count) if (GameConfig::MIN_BOTS..=GameConfig::MAX_BOTS).contains(&count) => {
                return Ok(Some(count));
            }
            _ => writeln!(
                output,
                "That is an invalid number of bots. Please enter a number between {} and {}.",
                GameConfig::MIN_BOTS,
                GameConfig::MAX_BOTS
            )?,
        }
    }
}
