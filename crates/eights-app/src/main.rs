use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use eights_app::config::AppConfig;
use eights_app::console::{ConsoleStrategy, prompt_bot_count};
use eights_app::driver::GameDriver;
use eights_app::logging::init_logging;
use eights_app::simulate::Simulator;
use eights_bot::bots;
use eights_core::AppInfo;
use eights_core::game::{MatchState, PlayerId};

/// Crazy Eights against automated opponents.
#[derive(Debug, Parser)]
#[command(name = "crazy8s", author, version, about = "Crazy Eights in the terminal")]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one game at the terminal (the default).
    Play(PlayArgs),
    /// Run bot-only games and write one JSONL row per game.
    Simulate(SimulateArgs),
}

#[derive(Debug, Default, Args)]
struct PlayArgs {
    /// Number of bot opponents (2-5); prompted for when omitted.
    #[arg(long, value_name = "COUNT")]
    bots: Option<usize>,

    /// Seed for the shuffle.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Players per game (3-6).
    #[arg(long, value_name = "COUNT")]
    players: Option<usize>,

    /// Base seed for per-game seeds.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Destination JSONL file.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };

    if let Some(level) = cli.log_level {
        config.logging.tracing_level = level;
    }

    match cli.command.unwrap_or(Command::Play(PlayArgs::default())) {
        Command::Play(args) => {
            if let Some(bots) = args.bots {
                config.game.bots = Some(bots);
            }
            if let Some(seed) = args.seed {
                config.game.seed = Some(seed);
            }
            config.validate()?;
            let _logging_guard = init_logging(&config.logging)?;
            play(&config)
        }
        Command::Simulate(args) => {
            if let Some(games) = args.games {
                config.simulation.games = games;
            }
            if let Some(players) = args.players {
                config.simulation.players = players;
            }
            if let Some(seed) = args.seed {
                config.simulation.seed = Some(seed);
            }
            if let Some(output) = args.output {
                config.simulation.output = output;
            }
            config.validate()?;
            let _logging_guard = init_logging(&config.logging)?;
            simulate(&config)
        }
    }
}

fn play(config: &AppConfig) -> anyhow::Result<()> {
    let mut input = io::stdin().lock();
    let mut stdout = io::stdout();
    writeln!(stdout, "{} {}", AppInfo::title(), AppInfo::version())?;

    let bot_count = match config.game.bots {
        Some(count) => count,
        None => match prompt_bot_count(&mut input, &mut stdout)? {
            Some(count) => count,
            None => bail!("input closed before a bot count was entered"),
        },
    };

    let mut participants = bots(bot_count);
    participants.push(Box::new(ConsoleStrategy::new(input, io::stdout())));
    let state = match config.game.seed {
        Some(seed) => MatchState::with_seed(participants, seed),
        None => MatchState::new(participants),
    }
    .context("setting up the game")?;

    let mut driver = GameDriver::new(state, stdout);
    driver.announce()?;
    driver.run().context("playing the game")?;
    Ok(())
}

fn simulate(config: &AppConfig) -> anyhow::Result<()> {
    let simulation = &config.simulation;
    println!(
        "Simulating {} game{} with {} players",
        simulation.games,
        if simulation.games == 1 { "" } else { "s" },
        simulation.players
    );

    let summary = Simulator::new(simulation.clone())
        .run()
        .with_context(|| format!("writing games to {}", simulation.output.display()))?;

    for (index, wins) in summary.wins.iter().enumerate() {
        let player = PlayerId::from_index(index);
        println!("  {player}: {wins} win{}", if *wins == 1 { "" } else { "s" });
    }
    println!("  Ties: {}", summary.ties);
    println!(
        "Wrote {} rows to {}",
        summary.rows_written,
        summary.jsonl_path.display()
    );
    Ok(())
}
