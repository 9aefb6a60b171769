// Configuration module for reading Pakku.toml
// All tunable knobs for the connection, the game session, and the Hide
// strategy live here so nothing is a magic number in the engine

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
    pub strategy: StrategyConfig,
    pub debug: DebugConfig,
}

/// Where to find the game server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// host:port string for the TCP connect call
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Session parameters sent with the start command
#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    pub email: String,
    pub ghosts: u32,
    pub map: String,
}

/// Hide strategy constants
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// BFS depth bound when scanning for nearby food
    pub food_search_depth: usize,
    /// Stop scanning once more than this many food positions are found
    pub food_cap: usize,
    /// Candidates are discarded when the path from their step to the nearest
    /// ghost spans this many nodes or fewer, endpoints included; 2 means only
    /// steps on or directly beside a ghost count as suicide
    pub suicide_distance: usize,
    /// How many chosen destinations the oscillation history keeps
    pub history_capacity: usize,
    /// How many of the latest destinations trigger the oscillation breaker
    pub recent_window: usize,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Pakku.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Pakku.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Pakku.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Pakku.toml
    pub fn default_hardcoded() -> Self {
        Config {
            server: ServerConfig {
                host: "localhost".to_string(),
                port: 2222,
            },
            game: GameConfig {
                email: "knutin@gmail.com".to_string(),
                ghosts: 1,
                map: "classic".to_string(),
            },
            strategy: StrategyConfig {
                food_search_depth: 8,
                food_cap: 3,
                suicide_distance: 2,
                history_capacity: 5,
                recent_window: 2,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "pakku_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Pakku.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
