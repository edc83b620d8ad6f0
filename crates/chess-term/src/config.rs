//! Configuration file loading for the terminal front end.
//!
//! Settings come from a TOML file, `chess-term.toml` in the working
//! directory unless another path is given. A missing default file means
//! default settings.

use chess_core::FenParser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The log level is not one of error, warn, info, debug or trace.
    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}

/// How pieces are drawn.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlyphStyle {
    /// Unicode chess symbols.
    #[default]
    Unicode,
    /// FEN letters, uppercase for White.
    Ascii,
}

/// Terminal front end settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChessTermConfig {
    /// Position the game starts from, as FEN.
    #[serde(default = "default_start_position")]
    pub start_position: String,
    /// Piece rendering.
    #[serde(default)]
    pub glyphs: GlyphStyle,
    /// Maximum level written to stderr.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_start_position() -> String {
    FenParser::STARTPOS.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ChessTermConfig {
    fn default() -> Self {
        ChessTermConfig {
            start_position: default_start_position(),
            glyphs: GlyphStyle::default(),
            log_level: default_log_level(),
        }
    }
}

impl ChessTermConfig {
    /// Loads the configuration.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// path from [`Self::config_path()`] is tried and a missing file yields
    /// the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ReadError {
                path: config_path.clone(),
                source,
            }
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess-term.toml")
    }

    /// Parses the configured log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for an unknown level name.
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
