//! Text cards for feature scores and track details.

use super::{AudioFeature, TrackFeatures, TrackMetadata};
use console::style;

/// Column at which card values start.
const LABEL_WIDTH: usize = 18;

/// Width that descriptions are wrapped to.
pub const DESCRIPTION_WIDTH: usize = 72;

/// Renders one card line per feature, optionally followed by its description.
pub fn render_cards(features: &TrackFeatures, show_descriptions: bool) -> String {
    let mut out = String::new();

    for feature in AudioFeature::ALL {
        let label = format!("{:<width$}", feature.label(), width = LABEL_WIDTH);
        out.push_str(&format!(
            "{}{}\n",
            style(label).green().bold(),
            features.value(feature)
        ));

        if show_descriptions {
            for line in wrap(feature.description(), DESCRIPTION_WIDTH) {
                out.push_str(&format!("    {}\n", style(line).dim()));
            }
            out.push('\n');
        }
    }

    out
}

/// Renders the name / artist / album block shown above the cards.
pub fn render_metadata(metadata: &TrackMetadata) -> String {
    let mut out = format!("{}\n", style(&metadata.name).bold());

    if let Some(artist) = &metadata.artist {
        out.push_str(&format!("by {artist}\n"));
    }
    out.push_str(&format!("on {}\n", metadata.album));

    if let Some(image) = &metadata.image_url {
        out.push_str(&format!("cover:   {image}\n"));
    }
    match &metadata.preview_url {
        Some(url) => out.push_str(&format!("preview: {url}\n")),
        None => out.push_str("preview: no preview available\n"),
    }

    out
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tests::{FEATURES, TRACK};
    use console::strip_ansi_codes;

    #[test]
    fn test_cards_list_every_feature_in_order() {
        let features = TrackFeatures::from_json(FEATURES).unwrap();
        let rendered = strip_ansi_codes(&render_cards(&features, false)).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("DANCEABILITY"));
        assert!(lines[0].ends_with("0.735"));
        assert!(lines[3].starts_with("TEMPO"));
        assert!(lines[3].ends_with("98.002"));
        assert!(lines[8].starts_with("ACOUSTICNESS"));
    }

    #[test]
    fn test_cards_with_descriptions() {
        let features = TrackFeatures::from_json(FEATURES).unwrap();
        let rendered = strip_ansi_codes(&render_cards(&features, true)).to_string();

        assert!(rendered.contains("beats per minute"));
        for line in rendered.lines() {
            assert!(line.len() <= DESCRIPTION_WIDTH + 4 || line.starts_with(char::is_uppercase));
        }
    }

    #[test]
    fn test_metadata_block() {
        let metadata = TrackMetadata::from_track_json(TRACK).unwrap();
        let rendered = strip_ansi_codes(&render_metadata(&metadata)).to_string();

        assert!(rendered.starts_with("Cut To The Feeling\n"));
        assert!(rendered.contains("by Carly Rae Jepsen\n"));
        assert!(rendered.contains("on Cut To The Feeling\n"));
        assert!(rendered.contains("no preview available"));
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("one two three four five six", 9);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
        assert!(wrap("", 10).is_empty());
        assert_eq!(wrap("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }
}
