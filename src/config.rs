#![warn(clippy::all, clippy::pedantic)]

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

// Environment override for the config file location, mainly for tests
const CONFIG_ENV_VAR: &str = "GRIDFALL_CONFIG";
const CONFIG_FILE_PATH: &str = "config/gridfall.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Start the background clip as soon as the program launches.
    pub autoplay: bool,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            volume: 0.5,
        }
    }
}

/// Loads the configuration, writing a default file on first run so the
/// user has something to edit.
pub fn load() -> Result<Config, ConfigError> {
    let path = config_file_path();

    if !path.exists() {
        let config = Config::default();
        save(&config)?;
        return Ok(config);
    }

    let contents = fs::read_to_string(&path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_file_path();

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(&path, toml_string)?;
    Ok(())
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("gridfall").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
