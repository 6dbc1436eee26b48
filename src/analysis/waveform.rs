//! Loudness waveform built from audio-analysis segments.
//!
//! Each segment's peak loudness is mapped from the [-35, 0] dB range onto
//! [0, 1], then sampled at every 8th position of a 1000-step timeline. The
//! result is a mirrored envelope of `(index, +amp, -amp)` triples that can be
//! drawn directly as two bar series around a zero baseline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of positions on the normalized timeline.
pub const RESOLUTION: usize = 1000;

/// Only every `STRIDE`th position receives a sample.
pub const STRIDE: usize = 8;

/// Loudness at or below this level maps to silence.
pub const LOUDNESS_FLOOR_DB: f64 = -35.0;

/// Errors raised while building a waveform.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveformError {
    #[error("track duration must be positive (got {0})")]
    InvalidDuration(f64),
}

/// One analysis unit of a track as delivered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Offset from track start in seconds
    pub start: f64,
    /// Length in seconds
    pub duration: f64,
    /// Peak loudness in dB
    pub loudness_max: f64,
}

/// A segment expressed as fractions of the whole track.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NormalizedSegment {
    relative_start: f64,
    relative_duration: f64,
    loudness: f64,
}

impl NormalizedSegment {
    fn new(segment: &Segment, duration: f64) -> Self {
        Self {
            relative_start: segment.start / duration,
            relative_duration: segment.duration / duration,
            loudness: normalize_loudness(segment.loudness_max),
        }
    }

    fn contains(&self, position: f64) -> bool {
        self.relative_start <= position && position <= self.relative_start + self.relative_duration
    }
}

/// One bar pair of the rendered waveform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveformSample {
    /// Position on the 0..1000 timeline
    pub index: usize,
    /// Upper amplitude in [0, 0.5]
    pub upper: f64,
    /// Mirror of `upper`
    pub lower: f64,
}

impl WaveformSample {
    fn new(index: usize, loudness: f64) -> Self {
        Self {
            index,
            upper: loudness / 2.0,
            lower: -loudness / 2.0,
        }
    }
}

/// Maps a peak loudness in dB onto [0, 1], with 0 dB as 1.0.
///
/// NaN is treated as the quietest level.
pub fn normalize_loudness(loudness_db: f64) -> f64 {
    if loudness_db.is_nan() {
        return 0.0;
    }
    1.0 - loudness_db.clamp(LOUDNESS_FLOOR_DB, 0.0) / LOUDNESS_FLOOR_DB
}

/// Builds the mirrored loudness envelope of a track.
///
/// For every eligible bucket the first segment (in input order) covering the
/// bucket position supplies the amplitude. Buckets that no segment covers are
/// left out, so the result holds at most `RESOLUTION / STRIDE` samples in
/// ascending index order. Amplitudes are scaled so the loudest segment of the
/// track reaches 0.5; a track whose segments all sit at the floor yields
/// zero amplitudes throughout.
///
/// # Errors
/// - If `duration` is zero, negative or NaN
pub fn bucket_waveform(
    segments: &[Segment],
    duration: f64,
) -> Result<Vec<WaveformSample>, WaveformError> {
    if duration.is_nan() || duration <= 0.0 {
        return Err(WaveformError::InvalidDuration(duration));
    }

    let normalized: Vec<NormalizedSegment> = segments
        .iter()
        .map(|segment| NormalizedSegment::new(segment, duration))
        .collect();

    let maximum = normalized
        .iter()
        .map(|segment| segment.loudness)
        .fold(0.0_f64, f64::max);

    let samples: Vec<WaveformSample> = (0..RESOLUTION)
        .step_by(STRIDE)
        .filter_map(|index| {
            let position = index as f64 / RESOLUTION as f64;
            normalized
                .iter()
                .find(|segment| segment.contains(position))
                .map(|segment| {
                    let loudness = if maximum > 0.0 {
                        segment.loudness / maximum
                    } else {
                        0.0
                    };
                    WaveformSample::new(index, loudness)
                })
        })
        .collect();

    tracing::debug!(
        "Bucketed {} segments into {} waveform samples (peak {:.3})",
        segments.len(),
        samples.len(),
        maximum
    );

    Ok(samples)
}
