//! Process configuration read from the environment (and `.env`, loaded by `main`).

use std::env;
use std::path::PathBuf;

use arena_core::constants::{DEFAULT_PLAYERS, MAX_PLAYERS, MIN_PLAYERS};
use arena_map::ArenaMap;
use arena_sim::SimConfig;

use crate::error::ConfigError;

/// Rounds played before the runner stops when `ARENA_ROUNDS` is unset.
pub const DEFAULT_ROUNDS: u32 = 5;

/// Seed used when `ARENA_SEED` is unset.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: u64,
    pub players: usize,
    /// JSON map file; the built-in arena when `None`.
    pub map_path: Option<PathBuf>,
    /// Stop after this many rounds. 0 runs until shut down.
    pub rounds: u32,
    /// Tick limit as a safety net for unattended runs.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold 60 Hz instead of running flat out.
    pub realtime: bool,
    /// Print every snapshot as a JSON line on stdout.
    pub snapshot_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            players: DEFAULT_PLAYERS,
            map_path: None,
            rounds: DEFAULT_ROUNDS,
            max_ticks: None,
            realtime: false,
            snapshot_json: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let players = parse_or("ARENA_PLAYERS", &lookup, defaults.players, "a number")?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(ConfigError::Invalid {
                var: "ARENA_PLAYERS",
                value: players.to_string(),
                expected: "between 2 and 4",
            });
        }

        Ok(Self {
            seed: parse_or("ARENA_SEED", &lookup, defaults.seed, "an unsigned integer")?,
            players,
            map_path: lookup("ARENA_MAP")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            rounds: parse_or("ARENA_ROUNDS", &lookup, defaults.rounds, "a number")?,
            max_ticks: match lookup("ARENA_MAX_TICKS") {
                Some(value) => Some(parse("ARENA_MAX_TICKS", &value, "a number")?),
                None => None,
            },
            realtime: flag("ARENA_REALTIME", &lookup, defaults.realtime)?,
            snapshot_json: flag("ARENA_SNAPSHOT_JSON", &lookup, defaults.snapshot_json)?,
        })
    }

    /// Engine configuration, loading the map file if one is set.
    pub fn sim_config(&self) -> Result<SimConfig, ConfigError> {
        let map = match &self.map_path {
            Some(path) => ArenaMap::load(path)?,
            None => ArenaMap::default_arena(),
        };
        Ok(SimConfig {
            seed: self.seed,
            player_count: self.players,
            map,
            ..Default::default()
        })
    }
}

fn parse<T: std::str::FromStr>(
    var: &'static str,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
        expected,
    })
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => parse(var, &value, expected),
        None => Ok(default),
    }
}

fn flag(
    var: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            expected: "a boolean",
        }),
    }
}
