//! trackviz: terminal viewer for track audio features and loudness waveforms.

mod analysis;
mod app;
mod commands;
mod config;
mod features;
mod logging;
mod render;
mod setup;
mod ui;

fn main() {
    if let Err(e) = app::run() {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
