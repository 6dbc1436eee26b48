//! Audio-analysis documents and the waveform derived from them.
//!
//! An analysis document is the catalog's per-track timing breakdown. Only
//! the track duration and the segment list are read; every other field is
//! ignored.

pub mod waveform;

pub use waveform::{bucket_waveform, Segment, WaveformError, WaveformSample};

use anyhow::anyhow;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Track-level section of an analysis document.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisTrack {
    /// Track length in seconds
    pub duration: f64,
}

/// A parsed audio-analysis document.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioAnalysis {
    pub track: AnalysisTrack,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl AudioAnalysis {
    /// Parses an analysis document from JSON text.
    ///
    /// # Errors
    /// - If the JSON is malformed or lacks `track.duration`
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).map_err(|e| anyhow!("Invalid audio analysis: {e}"))
    }

    /// Reads and parses an analysis document from disk.
    ///
    /// # Errors
    /// - If the file cannot be read
    /// - If the content is not a valid analysis document
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read {}: {e}", path.display()))?;
        let analysis = Self::from_json(&content)
            .map_err(|e| anyhow!("{}: {e}", path.display()))?;

        tracing::info!(
            "Loaded analysis from {} ({} segments, {:.1}s)",
            path.display(),
            analysis.segments.len(),
            analysis.track.duration
        );
        Ok(analysis)
    }

    /// Track length in seconds.
    pub fn duration(&self) -> f64 {
        self.track.duration
    }

    /// Builds the loudness waveform for this track.
    ///
    /// # Errors
    /// - If the track duration is not positive
    pub fn waveform(&self) -> Result<Vec<WaveformSample>, WaveformError> {
        bucket_waveform(&self.segments, self.track.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "meta": { "analyzer_version": "4.0.0" },
        "track": { "duration": 10.0, "tempo": 120.5, "key": 5 },
        "segments": [
            {
                "start": 0.0,
                "duration": 5.0,
                "confidence": 0.9,
                "loudness_start": -60.0,
                "loudness_max": -35.0,
                "loudness_max_time": 0.1,
                "pitches": [0.1, 0.2],
                "timbre": [1.0, 2.0]
            },
            { "start": 5.0, "duration": 5.0, "loudness_max": 0.0 }
        ]
    }"#;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let analysis = AudioAnalysis::from_json(SAMPLE).unwrap();
        assert_eq!(analysis.duration(), 10.0);
        assert_eq!(analysis.segments.len(), 2);
        assert_eq!(analysis.segments[0].loudness_max, -35.0);
    }

    #[test]
    fn test_waveform_from_document() {
        let analysis = AudioAnalysis::from_json(SAMPLE).unwrap();
        let samples = analysis.waveform().unwrap();
        assert_eq!(samples.len(), 125);
        assert_eq!(samples[0].upper, 0.0);
        assert_eq!(samples[124].upper, 0.5);
    }

    #[test]
    fn test_missing_segments_defaults_to_empty() {
        let analysis = AudioAnalysis::from_json(r#"{"track": {"duration": 3.0}}"#).unwrap();
        assert!(analysis.segments.is_empty());
        assert!(analysis.waveform().unwrap().is_empty());
    }

    #[test]
    fn test_missing_duration_is_an_error() {
        assert!(AudioAnalysis::from_json(r#"{"track": {}, "segments": []}"#).is_err());
        assert!(AudioAnalysis::from_json("not json").is_err());
    }

    #[test]
    fn test_zero_duration_surfaces_waveform_error() {
        let analysis = AudioAnalysis::from_json(r#"{"track": {"duration": 0.0}}"#).unwrap();
        assert!(matches!(
            analysis.waveform(),
            Err(WaveformError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ broken").unwrap();

        let err = AudioAnalysis::load(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let analysis = AudioAnalysis::load(file.path()).unwrap();
        assert_eq!(analysis.segments.len(), 2);
    }
}
