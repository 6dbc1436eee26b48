//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::commands;
use crate::config::get_config_path;
use crate::logging;
use crate::setup;

/// Terminal viewer for track audio features and loudness waveforms
#[derive(Parser)]
#[command(name = "trackviz")]
#[command(version)]
#[command(about = "Terminal viewer for track audio features and loudness waveforms")]
#[command(long_about = "Terminal viewer for track audio features and loudness waveforms.\n\nReads audio-analysis and audio-features documents saved from a music-catalog\nAPI as JSON and shows them in the terminal.\n\nEXAMPLES:\n    # Show the loudness waveform of a track\n    $ trackviz waveform analysis.json\n    \n    # Print waveform samples for other tools\n    $ trackviz waveform analysis.json --plain | head\n    $ trackviz waveform analysis.json --json > waveform.json\n    \n    # Show feature cards with track details\n    $ trackviz features features.json --track track.json\n    \n    # Explain a feature\n    $ trackviz describe danceability")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/trackviz/trackviz.toml\n    Logs:               ~/.local/state/trackviz/trackviz.log.*"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the loudness waveform of an audio-analysis document
    ///
    /// Opens a full-screen view when stdout is a terminal (q/Esc to quit),
    /// otherwise prints one `index upper lower` line per sample.
    #[command(visible_alias = "w")]
    Waveform {
        /// Path to the audio-analysis JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print samples as a tab-separated table
        #[arg(short, long)]
        plain: bool,

        /// Print samples as JSON
        #[arg(short, long, conflicts_with = "plain")]
        json: bool,
    },

    /// Show audio feature cards for a track
    #[command(visible_alias = "f")]
    Features {
        /// Path to the audio-features JSON document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the track JSON document, for name, artist and album
        #[arg(short, long, value_name = "TRACK")]
        track: Option<PathBuf>,

        /// Print each feature's description under its value
        #[arg(short, long)]
        describe: bool,
    },

    /// Describe an audio feature, or all of them
    #[command(visible_alias = "d")]
    Describe {
        /// Feature name, e.g. danceability or tempo
        #[arg(value_name = "FEATURE")]
        feature: Option<String>,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Uses $EDITOR environment variable or falls back to nano/vi.
    #[command(visible_alias = "c")]
    Config,

    /// Show recent log entries from the application
    ///
    /// Display the last 50 lines of the most recent log file.
    Logs,

    /// Generate shell completion script
    ///
    /// Examples:
    ///   trackviz completions bash > trackviz.bash
    ///   trackviz completions zsh > _trackviz
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the application based on command-line arguments.
///
/// # Errors
/// - If logging initialization or config setup fails
/// - If command execution fails
pub fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Commands that don't need logging or config setup
    match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "trackviz", &mut io::stdout());
            return Ok(());
        }
        Commands::Logs => return commands::handle_logs(),
        Commands::Describe { feature } => return commands::handle_describe(feature.as_deref()),
        _ => {}
    }

    logging::init_logging()?;
    setup::ensure_config(&get_config_path()?)?;

    match cli.command {
        Commands::Waveform { file, plain, json } => {
            commands::handle_waveform(&file, plain, json)?;
        }
        Commands::Features {
            file,
            track,
            describe,
        } => {
            commands::handle_features(&file, track.as_deref(), describe)?;
        }
        Commands::Config => {
            commands::handle_config()?;
        }
        Commands::Completions { .. } | Commands::Logs | Commands::Describe { .. } => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
