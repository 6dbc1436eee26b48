//! Configuration management for trackviz.
//!
//! This module handles loading and saving application configuration from a TOML
//! file in the user's config directory. Every setting has a default, so a
//! missing or partial file is fine.

pub mod file;

pub use file::{get_config_path, TrackvizConfig};
