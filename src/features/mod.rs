//! Audio feature scores, their descriptions and track metadata.
//!
//! Feature documents come from the catalog's audio-features endpoint, either
//! as a single object or as the batch form (an array of objects). Track
//! documents come from the track endpoint and are flattened into the few
//! fields shown above the feature cards.

pub mod cards;

pub use cards::{render_cards, render_metadata};

use anyhow::anyhow;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// The audio features shown as cards, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFeature {
    Danceability,
    Valence,
    Energy,
    Tempo,
    Loudness,
    Speechiness,
    Instrumentalness,
    Liveness,
    Acousticness,
}

impl AudioFeature {
    pub const ALL: [AudioFeature; 9] = [
        Self::Danceability,
        Self::Valence,
        Self::Energy,
        Self::Tempo,
        Self::Loudness,
        Self::Speechiness,
        Self::Instrumentalness,
        Self::Liveness,
        Self::Acousticness,
    ];

    /// Looks up a feature by its name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|feature| feature.name().eq_ignore_ascii_case(name))
    }

    /// Field name as used by the catalog.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Danceability => "danceability",
            Self::Valence => "valence",
            Self::Energy => "energy",
            Self::Tempo => "tempo",
            Self::Loudness => "loudness",
            Self::Speechiness => "speechiness",
            Self::Instrumentalness => "instrumentalness",
            Self::Liveness => "liveness",
            Self::Acousticness => "acousticness",
        }
    }

    /// Card heading.
    pub fn label(&self) -> String {
        self.name().to_uppercase()
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Danceability => "Danceability describes how suitable a track is for dancing based on a combination of musical elements including tempo, rhythm stability, beat strength, and overall regularity. A value of 0.0 is least danceable and 1.0 is most danceable.",
            Self::Valence => "A measure from 0.0 to 1.0 describing the musical positiveness conveyed by a track. Tracks with high valence sound more positive (e.g. happy, cheerful, euphoric), while tracks with low valence sound more negative (e.g. sad, depressed, angry).",
            Self::Energy => "Energy is a measure from 0.0 to 1.0 and represents a perceptual measure of intensity and activity. Typically, energetic tracks feel fast, loud, and noisy. For example, death metal has high energy, while a Bach prelude scores low on the scale. Perceptual features contributing to this attribute include dynamic range, perceived loudness, timbre, onset rate, and general entropy.",
            Self::Tempo => "The overall estimated tempo of a track in beats per minute (BPM). In musical terminology, tempo is the speed or pace of a given piece and derives directly from the average beat duration.",
            Self::Loudness => "The overall loudness of a track in decibels (dB). Loudness values are averaged across the entire track and are useful for comparing relative loudness of tracks. Loudness is the quality of a sound that is the primary psychological correlate of physical strength (amplitude). Values typically range between -60 and 0 db.",
            Self::Speechiness => "Speechiness detects the presence of spoken words in a track. The more exclusively speech-like the recording (e.g. talk show, audio book, poetry), the closer to 1.0 the attribute value. Values above 0.66 describe tracks that are probably made entirely of spoken words. Values between 0.33 and 0.66 describe tracks that may contain both music and speech, either in sections or layered, including such cases as rap music. Values below 0.33 most likely represent music and other non-speech-like tracks.",
            Self::Instrumentalness => "Predicts whether a track contains no vocals. \"Ooh\" and \"aah\" sounds are treated as instrumental in this context. Rap or spoken word tracks are clearly \"vocal\". The closer the instrumentalness value is to 1.0, the greater likelihood the track contains no vocal content. Values above 0.5 are intended to represent instrumental tracks, but confidence is higher as the value approaches 1.0.",
            Self::Liveness => "Detects the presence of an audience in the recording. Higher liveness values represent an increased probability that the track was performed live. A value above 0.8 provides strong likelihood that the track is live.",
            Self::Acousticness => "A confidence measure from 0.0 to 1.0 of whether the track is acoustic. 1.0 represents high confidence the track is acoustic.",
        }
    }
}

impl fmt::Display for AudioFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Feature scores of one track.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackFeatures {
    pub danceability: f64,
    pub valence: f64,
    pub energy: f64,
    pub tempo: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub acousticness: f64,
}

/// Single-object or batch form of the features endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum FeaturesDocument {
    Batch(Vec<TrackFeatures>),
    Single(TrackFeatures),
}

impl TrackFeatures {
    pub fn value(&self, feature: AudioFeature) -> f64 {
        match feature {
            AudioFeature::Danceability => self.danceability,
            AudioFeature::Valence => self.valence,
            AudioFeature::Energy => self.energy,
            AudioFeature::Tempo => self.tempo,
            AudioFeature::Loudness => self.loudness,
            AudioFeature::Speechiness => self.speechiness,
            AudioFeature::Instrumentalness => self.instrumentalness,
            AudioFeature::Liveness => self.liveness,
            AudioFeature::Acousticness => self.acousticness,
        }
    }

    /// Parses a features document; for the batch form the first entry is used.
    ///
    /// # Errors
    /// - If the JSON is malformed or lacks a feature field
    /// - If a batch document is empty
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let document: FeaturesDocument = serde_json::from_str(content)
            .map_err(|e| anyhow!("Invalid audio features: {e}"))?;

        match document {
            FeaturesDocument::Single(features) => Ok(features),
            FeaturesDocument::Batch(batch) => batch
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("No audio features in document")),
        }
    }

    /// Reads and parses a features document from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {e}", path.display()))?;
        Self::from_json(&content).map_err(|e| anyhow!("{}: {e}", path.display()))
    }
}

#[derive(Deserialize)]
struct RawArtist {
    name: String,
}

#[derive(Deserialize)]
struct RawImage {
    url: String,
}

#[derive(Deserialize)]
struct RawAlbum {
    name: String,
    #[serde(default)]
    artists: Vec<RawArtist>,
    #[serde(default)]
    images: Vec<RawImage>,
}

#[derive(Deserialize)]
struct RawTrack {
    name: String,
    album: RawAlbum,
    #[serde(default)]
    preview_url: Option<String>,
}

/// The track details shown above the feature cards.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub name: String,
    pub artist: Option<String>,
    pub album: String,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
}

impl TrackMetadata {
    /// Flattens a catalog track object.
    ///
    /// The artist is the album's first artist. The cover is the medium-sized
    /// (second) image when the album lists more than one.
    pub fn from_track_json(content: &str) -> anyhow::Result<Self> {
        let raw: RawTrack =
            serde_json::from_str(content).map_err(|e| anyhow!("Invalid track document: {e}"))?;

        let image_url = raw
            .album
            .images
            .get(1)
            .or_else(|| raw.album.images.first())
            .map(|image| image.url.clone());

        Ok(Self {
            name: raw.name,
            artist: raw.album.artists.into_iter().next().map(|a| a.name),
            album: raw.album.name,
            image_url,
            preview_url: raw.preview_url.filter(|url| !url.is_empty()),
        })
    }

    /// Reads and parses a track document from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {e}", path.display()))?;
        Self::from_track_json(&content).map_err(|e| anyhow!("{}: {e}", path.display()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const FEATURES: &str = r#"{
        "danceability": 0.735,
        "energy": 0.578,
        "key": 5,
        "loudness": -11.84,
        "mode": 0,
        "speechiness": 0.0461,
        "acousticness": 0.514,
        "instrumentalness": 0.0902,
        "liveness": 0.159,
        "valence": 0.636,
        "tempo": 98.002,
        "id": "06AKEBrKUckW0KREUWRnvT",
        "duration_ms": 255349
    }"#;

    pub(crate) const TRACK: &str = r#"{
        "name": "Cut To The Feeling",
        "preview_url": null,
        "album": {
            "name": "Cut To The Feeling",
            "artists": [{ "name": "Carly Rae Jepsen" }, { "name": "Someone Else" }],
            "images": [
                { "url": "https://img.example/640", "height": 640 },
                { "url": "https://img.example/300", "height": 300 },
                { "url": "https://img.example/64", "height": 64 }
            ]
        }
    }"#;

    #[test]
    fn test_feature_lookup_is_case_insensitive() {
        assert_eq!(
            AudioFeature::from_name("Danceability"),
            Some(AudioFeature::Danceability)
        );
        assert_eq!(
            AudioFeature::from_name("  TEMPO "),
            Some(AudioFeature::Tempo)
        );
        assert_eq!(AudioFeature::from_name("key"), None);
        assert_eq!(AudioFeature::from_name(""), None);
    }

    #[test]
    fn test_every_feature_has_a_description() {
        for feature in AudioFeature::ALL {
            assert!(!feature.description().is_empty());
            assert_eq!(AudioFeature::from_name(feature.name()), Some(feature));
        }
        assert!(AudioFeature::Tempo.description().contains("BPM"));
        assert_eq!(AudioFeature::Liveness.label(), "LIVENESS");
    }

    #[test]
    fn test_single_features_document() {
        let features = TrackFeatures::from_json(FEATURES).unwrap();
        assert_eq!(features.value(AudioFeature::Danceability), 0.735);
        assert_eq!(features.value(AudioFeature::Tempo), 98.002);
        assert_eq!(features.value(AudioFeature::Loudness), -11.84);
    }

    #[test]
    fn test_batch_features_document_uses_first_entry() {
        let batch = format!("[{FEATURES}, {FEATURES}]");
        let features = TrackFeatures::from_json(&batch).unwrap();
        assert_eq!(features.valence, 0.636);
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        let err = TrackFeatures::from_json("[]").unwrap_err();
        assert!(err.to_string().contains("No audio features"));
    }

    #[test]
    fn test_missing_feature_is_an_error() {
        assert!(TrackFeatures::from_json(r#"{"danceability": 0.5}"#).is_err());
    }

    #[test]
    fn test_track_metadata_flattening() {
        let metadata = TrackMetadata::from_track_json(TRACK).unwrap();
        assert_eq!(metadata.name, "Cut To The Feeling");
        assert_eq!(metadata.artist.as_deref(), Some("Carly Rae Jepsen"));
        assert_eq!(metadata.image_url.as_deref(), Some("https://img.example/300"));
        assert_eq!(metadata.preview_url, None);
    }

    #[test]
    fn test_track_metadata_with_single_image() {
        let json = r#"{
            "name": "B-side",
            "preview_url": "https://preview.example/1",
            "album": { "name": "Singles", "images": [{ "url": "https://img.example/only" }] }
        }"#;
        let metadata = TrackMetadata::from_track_json(json).unwrap();
        assert_eq!(metadata.artist, None);
        assert_eq!(metadata.image_url.as_deref(), Some("https://img.example/only"));
        assert_eq!(metadata.preview_url.as_deref(), Some("https://preview.example/1"));
    }
}
