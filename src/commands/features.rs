//! Feature cards for a track.

use std::path::Path;

use crate::config::TrackvizConfig;
use crate::features::{render_cards, render_metadata, TrackFeatures, TrackMetadata};

/// Prints the feature cards from `file`, with the track header when `track` is given.
///
/// Descriptions are shown when `describe` is set or enabled in the config.
///
/// # Errors
/// - If either document cannot be loaded
/// - If the config file is malformed
pub fn handle_features(file: &Path, track: Option<&Path>, describe: bool) -> anyhow::Result<()> {
    tracing::info!("=== trackviz Features Command ===");

    let features = TrackFeatures::load(file)?;
    let config = TrackvizConfig::load()?;
    let show_descriptions = describe || config.cards.show_descriptions;

    if let Some(track_path) = track {
        let metadata = TrackMetadata::load(track_path)?;
        tracing::info!("Showing features for '{}'", metadata.name);
        println!("{}", render_metadata(&metadata));
    }

    print!("{}", render_cards(&features, show_descriptions));
    Ok(())
}
