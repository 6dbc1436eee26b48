//! Setup module for initial application configuration.
//!
//! Writes the default config file on first run and keeps its version line
//! current after upgrades.

pub mod version;

use std::path::Path;

pub use version::SetupState;

/// Embedded default configuration template.
pub const DEFAULT_CONFIG: &str = include_str!("../../environments/trackviz.toml");

/// Current application version from Cargo.toml
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Writes the default config file, prefixed with the current version.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_default_config(config_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config_with_version = format!(r#"config_version = "{}""#, CURRENT_VERSION);
    let full_config = format!("{}\n{}", config_with_version, DEFAULT_CONFIG);
    std::fs::write(config_path, full_config)?;

    tracing::info!("Wrote default config to {}", config_path.display());
    Ok(())
}

/// Creates or migrates the config file at `config_path` as needed.
///
/// An outdated config keeps its settings; only the version line changes.
///
/// # Errors
/// Returns an error if the config file cannot be read or written.
pub fn ensure_config(config_path: &Path) -> anyhow::Result<()> {
    match version::check_setup_needed(config_path)? {
        SetupState::Missing => write_default_config(config_path),
        SetupState::Outdated(old_version) => {
            tracing::info!(
                "Migrating config from version {} to {}",
                old_version,
                CURRENT_VERSION
            );
            version::update_config_version(config_path)
        }
        SetupState::Current => {
            tracing::debug!("Config version up to date ({})", CURRENT_VERSION);
            Ok(())
        }
    }
}
