//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Session defaults (base stake, starting capital, active chances) are
//! validated here so a bad config fails at startup, not mid-session.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

use crate::types::{validate_stake, Chance};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub dashboard: DashboardConfig,
}

/// Defaults applied when no saved session exists.
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub base_stake: Decimal,
    pub starting_capital: Decimal,
    pub active_chances: Vec<Chance>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub state_file: String,
    pub autosave_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;

        validate_stake(config.session.base_stake)
            .with_context(|| format!("Bad base_stake in config file: {path}"))?;

        Ok(config)
    }
}
