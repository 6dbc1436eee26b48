//! Audio feature descriptions.

use anyhow::anyhow;
use console::style;

use crate::features::AudioFeature;

/// Prints the description of one feature, or of every feature when `feature` is None.
///
/// # Errors
/// - If the feature name is not known
pub fn handle_describe(feature: Option<&str>) -> anyhow::Result<()> {
    match feature {
        Some(name) => {
            let feature = AudioFeature::from_name(name).ok_or_else(|| unknown_feature(name))?;
            println!("{}", feature.description());
        }
        None => {
            for feature in AudioFeature::ALL {
                println!("{}", style(feature.label()).green().bold());
                println!("{}\n", feature.description());
            }
        }
    }
    Ok(())
}

fn unknown_feature(name: &str) -> anyhow::Error {
    let known: Vec<&str> = AudioFeature::ALL.iter().map(|f| f.name()).collect();
    anyhow!(
        "Unknown audio feature '{}'. Known features: {}",
        name,
        known.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_feature_lists_known_names() {
        let err = handle_describe(Some("key")).unwrap_err().to_string();
        assert!(err.contains("'key'"));
        assert!(err.contains("danceability"));
        assert!(err.contains("acousticness"));
    }

    #[test]
    fn test_known_feature_succeeds() {
        assert!(handle_describe(Some("Energy")).is_ok());
        assert!(handle_describe(None).is_ok());
    }
}
