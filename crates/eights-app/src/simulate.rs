use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use eights_bot::bots;
use eights_core::game::{EngineError, MatchState, Outcome, SetupError};
use eights_core::model::Hand;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::SimulationConfig;

/// Plays bot-only games back to back with one roster, one JSONL row per game.
pub struct Simulator {
    config: SimulationConfig,
}

/// Summary details returned after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSummary {
    pub games: usize,
    pub ties: usize,
    /// Wins per seat, indexed by `PlayerId::index`.
    pub wins: Vec<usize>,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct GameRow {
    game_index: usize,
    seed: u64,
    players: usize,
    outcome: Outcome,
    turns: u32,
    rounds: u32,
    draw_pile_left: usize,
    remaining_points: Vec<u32>,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<SimulationSummary, SimulationError> {
        ensure_parent(self.config.output.parent())?;
        let mut writer = BufWriter::new(File::create(&self.config.output)?);
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or(0));

        let mut participants = bots(self.config.players);
        let mut wins = vec![0usize; self.config.players];
        let mut ties = 0usize;
        let mut rows_written = 0usize;

        for game_index in 0..self.config.games {
            let seed = rng.next_u64();
            let mut state = MatchState::with_seed(participants, seed)?;
            let outcome = state.run_to_completion()?;
            match outcome {
                Outcome::Winner(player) => wins[player.index()] += 1,
                Outcome::Tie => ties += 1,
            }

            let row = GameRow {
                game_index,
                seed,
                players: state.player_count(),
                outcome,
                turns: state.turns_taken(),
                rounds: state.round_number(),
                draw_pile_left: state.draw_pile_len(),
                remaining_points: state
                    .player_ids()
                    .into_iter()
                    .map(|id| state.hand(id).map(Hand::point_total).unwrap_or(0))
                    .collect(),
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            event!(Level::DEBUG, game_index, seed, ?outcome, turns = row.turns, "simulated game");
            participants = state.into_participants();
        }

        writer.flush()?;
        event!(
            Level::INFO,
            games = self.config.games,
            ties,
            ?wins,
            "simulation complete"
        );

        Ok(SimulationSummary {
            games: self.config.games,
            ties,
            wins,
            rows_written,
            jsonl_path: self.config.output.clone(),
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), SimulationError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize game row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game setup failed: {0}")]
    Setup(#[from] SetupError),
    #[error("game execution failed: {0}")]
    Engine(#[from] EngineError),
}
