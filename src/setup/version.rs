//! Version comparison and migration logic.
//!
//! Handles checking if setup is needed by comparing embedded version with config file version.

use anyhow::anyhow;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

/// Current application version from Cargo.toml
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Represents a semantic version (major.minor.patch)
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct SemanticVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl SemanticVersion {
    /// Parse a version string like "0.0.5" into a SemanticVersion
    fn parse(version_str: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = version_str.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(anyhow!(
                "Invalid version format: '{}'. Expected 'major.minor.patch'",
                version_str
            ));
        }

        let component = |name: &str, part: &str| {
            part.parse::<u32>()
                .map_err(|_| anyhow!("Invalid {name} version: '{part}'"))
        };

        Ok(SemanticVersion {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// What startup has to do about the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupState {
    /// No config file yet
    Missing,
    /// Config written by an older version (or without a version line)
    Outdated(String),
    /// Nothing to do
    Current,
}

/// Reads the config version from the first line of the config file.
///
/// Expects the first line to match: `config_version = "X.Y.Z"`
///
/// # Errors
/// Returns an error if the file can't be read.
fn read_config_version_from_file(config_path: &Path) -> anyhow::Result<Option<String>> {
    let content = std::fs::read_to_string(config_path)?;
    let Some(first_line) = content.lines().next() else {
        return Ok(None);
    };

    let regex = Regex::new(r#"^\s*config_version\s*=\s*"([^"]+)""#)?;
    Ok(regex
        .captures(first_line)
        .map(|caps| caps[1].to_string()))
}

/// Determines whether the config file needs to be created or migrated.
pub fn check_setup_needed(config_path: &Path) -> anyhow::Result<SetupState> {
    check_against_version(config_path, CURRENT_VERSION)
}

fn check_against_version(config_path: &Path, current: &str) -> anyhow::Result<SetupState> {
    if !config_path.exists() {
        return Ok(SetupState::Missing);
    }

    let Some(config_version) = read_config_version_from_file(config_path)? else {
        return Ok(SetupState::Outdated("unknown (legacy config)".to_string()));
    };

    let config_parsed = SemanticVersion::parse(&config_version)?;
    let current_parsed = SemanticVersion::parse(current)?;

    match config_parsed.cmp(&current_parsed) {
        Ordering::Less => Ok(SetupState::Outdated(config_version)),
        Ordering::Equal => Ok(SetupState::Current),
        Ordering::Greater => {
            tracing::warn!(
                "Config version {} is newer than app version {}",
                config_parsed,
                current_parsed
            );
            Ok(SetupState::Current)
        }
    }
}

/// Adds or updates the config_version line as the first line of the config file.
///
/// All other content is preserved.
pub fn update_config_version(config_path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(config_path)?;

    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().starts_with("config_version"))
        .collect();

    let version_line = format!(r#"config_version = "{}""#, CURRENT_VERSION);
    let new_content = if lines.is_empty() {
        version_line
    } else {
        format!("{}\n{}", version_line, lines.join("\n"))
    };

    std::fs::write(config_path, new_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_version_parse() {
        let v = SemanticVersion::parse("0.1.5").unwrap();
        assert_eq!(v.major, 0);
        assert_eq!(v.minor, 1);
        assert_eq!(v.patch, 5);
        assert_eq!(v.to_string(), "0.1.5");
    }

    #[test]
    fn test_semantic_version_comparison() {
        let v1 = SemanticVersion::parse("0.0.4").unwrap();
        let v2 = SemanticVersion::parse("0.0.5").unwrap();
        let v3 = SemanticVersion::parse("0.1.0").unwrap();

        assert!(v1 < v2);
        assert!(v2 < v3);
        assert_eq!(v1, v1.clone());
    }

    #[test]
    fn test_invalid_version_format() {
        assert!(SemanticVersion::parse("0.0").is_err());
        assert!(SemanticVersion::parse("0.0.5.1").is_err());
        assert!(SemanticVersion::parse("invalid").is_err());
    }

    #[test]
    fn test_setup_states() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trackviz.toml");

        assert_eq!(
            check_against_version(&path, "0.2.0").unwrap(),
            SetupState::Missing
        );

        std::fs::write(&path, "[display]\n").unwrap();
        assert!(matches!(
            check_against_version(&path, "0.2.0").unwrap(),
            SetupState::Outdated(_)
        ));

        std::fs::write(&path, "config_version = \"0.1.0\"\n[display]\n").unwrap();
        assert_eq!(
            check_against_version(&path, "0.2.0").unwrap(),
            SetupState::Outdated("0.1.0".to_string())
        );
        assert_eq!(
            check_against_version(&path, "0.1.0").unwrap(),
            SetupState::Current
        );
        assert_eq!(
            check_against_version(&path, "0.0.9").unwrap(),
            SetupState::Current
        );
    }

    #[test]
    fn test_update_config_version_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trackviz.toml");
        std::fs::write(&path, "config_version = \"0.0.1\"\n[cards]\nshow_descriptions = true").unwrap();

        update_config_version(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some(format!(r#"config_version = "{}""#, CURRENT_VERSION).as_str())
        );
        assert_eq!(lines.next(), Some("[cards]"));
        assert_eq!(lines.next(), Some("show_descriptions = true"));
        assert_eq!(check_setup_needed(&path).unwrap(), SetupState::Current);
    }
}
