//! Terminal rendering of analysis results.

pub mod waveform;

pub use waveform::{plain_table, WaveformStyle, WaveformView};
