//! Waveform display for an audio-analysis document.

use anyhow::anyhow;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::analysis::{AudioAnalysis, WaveformSample};
use crate::config::TrackvizConfig;
use crate::render::plain_table;
use crate::ui::WaveformViewer;

/// How the waveform is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformOutput {
    /// Full-screen viewer
    Viewer,
    /// Tab-separated table on stdout
    Plain,
    /// JSON array on stdout
    Json,
}

impl WaveformOutput {
    /// Picks the output mode from the command flags.
    ///
    /// The viewer is only used when stdout is a terminal.
    pub fn from_flags(plain: bool, json: bool, stdout_is_terminal: bool) -> Self {
        if json {
            Self::Json
        } else if plain || !stdout_is_terminal {
            Self::Plain
        } else {
            Self::Viewer
        }
    }
}

/// Serializes samples as a JSON array of `{index, upper, lower}` objects.
pub fn samples_to_json(samples: &[WaveformSample]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(samples)?)
}

/// Builds and shows the loudness waveform of the analysis in `file`.
///
/// # Errors
/// - If the analysis document cannot be loaded
/// - If the track duration is not positive
/// - If the config is invalid or output fails
pub fn handle_waveform(file: &Path, plain: bool, json: bool) -> anyhow::Result<()> {
    tracing::info!("=== trackviz Waveform Command ===");

    let analysis = AudioAnalysis::load(file)?;
    let samples = analysis.waveform().map_err(|e| {
        tracing::error!("Waveform failed for {}: {e}", file.display());
        anyhow!("{}: {e}", file.display())
    })?;

    if samples.is_empty() {
        tracing::warn!("No segment covers any waveform bucket in {}", file.display());
    }

    match WaveformOutput::from_flags(plain, json, io::stdout().is_terminal()) {
        WaveformOutput::Json => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", samples_to_json(&samples)?)?;
        }
        WaveformOutput::Plain => {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", plain_table(&samples))?;
        }
        WaveformOutput::Viewer => {
            let config = TrackvizConfig::load()?;
            let style = config.display.waveform_style()?;
            let title = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| file.display().to_string());

            let mut viewer = WaveformViewer::new(style)?;
            viewer.show(&title, analysis.duration(), &samples)?;
            viewer.cleanup()?;
        }
    }

    Ok(())
}
