//! Configuration file management for trackviz.
//!
//! This module handles loading application configuration from TOML files.
//! Configuration is stored in the user's config directory.

use anyhow::anyhow;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::render::WaveformStyle;

/// Waveform display configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    /// Waveform colour as `#rrggbb`
    #[serde(default = "default_color")]
    pub color: String,
    /// Background colour as `#rrggbb`
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_color() -> String {
    "#e246ab".to_string()
}

fn default_background() -> String {
    "#191414".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            background: default_background(),
        }
    }
}

impl DisplayConfig {
    /// Resolves the configured colours.
    ///
    /// # Errors
    /// - If either colour is not a `#rrggbb` string
    pub fn waveform_style(&self) -> anyhow::Result<WaveformStyle> {
        Ok(WaveformStyle {
            foreground: parse_hex_color(&self.color)?,
            background: parse_hex_color(&self.background)?,
        })
    }
}

/// Feature card configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CardsConfig {
    /// Print each feature's description under its value
    #[serde(default)]
    pub show_descriptions: bool,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackvizConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub cards: CardsConfig,
}

impl TrackvizConfig {
    /// Loads configuration from the user's config directory.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If the config file cannot be read
    /// - If the TOML is malformed
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: TrackvizConfig = toml::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {}: {e}", config_path.display()))?;
        Ok(config)
    }
}

/// Parses a `#rrggbb` colour string.
///
/// # Errors
/// - If the string is not a `#` followed by six hex digits
pub fn parse_hex_color(value: &str) -> anyhow::Result<Color> {
    let hex = value
        .trim()
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| anyhow!("Invalid colour '{value}'. Expected '#rrggbb'"))?;

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
    Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Retrieves the path to the config file, creating its directory if needed.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the config directory cannot be created
pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not determine home directory"))?
        .join(".config")
        .join("trackviz");

    fs::create_dir_all(&config_dir)
        .map_err(|e| anyhow!("Failed to create config directory: {e}"))?;

    Ok(config_dir.join("trackviz.toml"))
}
