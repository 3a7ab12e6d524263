use eights_core::game::{MAX_PLAYERS, MIN_PLAYERS};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_SIMULATION_GAMES: usize = 100;
const DEFAULT_SIMULATION_PLAYERS: usize = 4;
const DEFAULT_SIMULATION_OUTPUT: &str = "out/simulation.jsonl";

/// Root configuration, optionally loaded from YAML. Every section defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AppConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.game.validate()?;
        self.simulation.validate()?;
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.logging.tracing_level),
            });
        }
        Ok(())
    }
}

/// Interactive game settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct GameConfig {
    /// Automated opponents facing the human; prompted for when absent.
    #[serde(default)]
    pub bots: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    pub const MIN_BOTS: usize = MIN_PLAYERS - 1;
    pub const MAX_BOTS: usize = MAX_PLAYERS - 1;

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(bots) = self.bots {
            if !(Self::MIN_BOTS..=Self::MAX_BOTS).contains(&bots) {
                return Err(ValidationError::InvalidField {
                    field: "game.bots".to_string(),
                    message: format!(
                        "bot count must be between {} and {}, got {bots}",
                        Self::MIN_BOTS,
                        Self::MAX_BOTS
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Bot-only batch settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_simulation_games")]
    pub games: usize,
    #[serde(default = "default_simulation_players")]
    pub players: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_simulation_output")]
    pub output: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: default_simulation_games(),
            players: default_simulation_players(),
            seed: None,
            output: default_simulation_output(),
        }
    }
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.games == 0 {
            return Err(ValidationError::InvalidField {
                field: "simulation.games".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(ValidationError::InvalidField {
                field: "simulation.players".to_string(),
                message: format!(
                    "player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                    self.players
                ),
            });
        }

        if self.output.components().count() == 0 {
            return Err(ValidationError::InvalidField {
                field: "simulation.output".to_string(),
                message: "path must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn default_simulation_games() -> usize {
    DEFAULT_SIMULATION_GAMES
}

fn default_simulation_players() -> usize {
    DEFAULT_SIMULATION_PLAYERS
}

fn default_simulation_output() -> PathBuf {
    PathBuf::from(DEFAULT_SIMULATION_OUTPUT)
}

/// Logging goes to stderr unless a file is named, in which case it is JSON.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BASIC_YAML: &str = r#"
game:
  bots: 3
  seed: 77
simulation:
  games: 20
  players: 5
  output: "out/run/games.jsonl"
logging:
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: AppConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.game.bots, Some(3));
        assert_eq!(cfg.game.seed, Some(77));
        assert_eq!(cfg.simulation.players, 5);
        assert_eq!(cfg.simulation.output, PathBuf::from("out/run/games.jsonl"));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: AppConfig = serde_yaml::from_str("{}").expect("parse");
        cfg.validate().expect("defaults validate");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.simulation.games, DEFAULT_SIMULATION_GAMES);
        assert_eq!(cfg.logging.level(), Some(Level::WARN));
    }

    #[test]
    fn rejects_bot_count_out_of_range() {
        let yaml = BASIC_YAML.replace("bots: 3", "bots: 6");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("six bots is too many");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "game.bots"
        ));
    }

    #[test]
    fn rejects_simulation_player_count() {
        let yaml = BASIC_YAML.replace("players: 5", "players: 2");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("two players is too few");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "simulation.players"
        ));
    }

    #[test]
    fn rejects_zero_games() {
        let yaml = BASIC_YAML.replace("games: 20", "games: 0");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unknown_level() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"chatty\"");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("unknown level");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "logging.tracing_level"
        ));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = AppConfig::from_path("does/not/exist.yaml").expect_err("missing");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), Path::new("does/not/exist.yaml"));
    }

    #[test]
    fn from_path_reads_yaml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(BASIC_YAML.as_bytes()).expect("write yaml");
        let cfg = AppConfig::from_path(file.path()).expect("load");
        assert_eq!(cfg.simulation.games, 20);
    }
}
