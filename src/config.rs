use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{splog_debug, Error, Result};

const DEFAULT_STAR: &str = "★";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Start with the keymap legend expanded.
    #[serde(default)]
    pub show_keymap: bool,
    /// Glyph used to draw importance stars.
    pub star: Option<String>,
    /// Fixed RNG seed for reproducible picks.
    pub seed: Option<u64>,
}

impl Config {
    pub fn starpick_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".starpick"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::starpick_dir()?.join("starpick.toml"))
    }

    pub fn effective_star(&self) -> &str {
        match self.star.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => DEFAULT_STAR,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        splog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            splog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        splog_debug!(
            "Config loaded: show_keymap={}, star={:?}, seed={:?}",
            config.show_keymap,
            config.star,
            config.seed
        );
        Ok(config)
    }
}
