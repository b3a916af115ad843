// SPDX-License-Identifier: MPL-2.0
//! This module handles the queue configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use said_toasts::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.capacity = Some(3);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.capacity, Some(3));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::BufferCapacity;
use crate::domain::notifications::QueueCapacity;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SaidToasts";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub default_duration_ms: Option<u64>,
    #[serde(default)]
    pub removal_delay_ms: Option<u64>,
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: Some(DEFAULT_QUEUE_CAPACITY),
            default_duration_ms: Some(DEFAULT_TOAST_DURATION_MS),
            removal_delay_ms: Some(DEFAULT_REMOVAL_DELAY_MS),
            diagnostics_capacity: None,
        }
    }
}

/// Resolved queue settings, with every optional config field filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSettings {
    /// Maximum number of toasts kept in the queue.
    pub capacity: QueueCapacity,
    /// Lifetime applied when a toast does not specify one.
    pub default_duration: Duration,
    /// Delay between dismissal and removal.
    pub removal_delay: Duration,
}

impl QueueSettings {
    /// Resolves settings from a loaded config, clamping out-of-range values.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            capacity: config
                .capacity
                .map(QueueCapacity::new)
                .unwrap_or_default(),
            default_duration: Duration::from_millis(
                config
                    .default_duration_ms
                    .unwrap_or(DEFAULT_TOAST_DURATION_MS),
            ),
            removal_delay: Duration::from_millis(
                config.removal_delay_ms.unwrap_or(DEFAULT_REMOVAL_DELAY_MS),
            ),
        }
    }
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Config {
    /// Returns the diagnostics buffer capacity, clamped to valid bounds.
    #[must_use]
    pub fn diagnostics_buffer_capacity(&self) -> BufferCapacity {
        self.diagnostics_capacity
            .map(BufferCapacity::new)
            .unwrap_or_default()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
