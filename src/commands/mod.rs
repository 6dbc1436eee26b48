//! Application command handlers for trackviz.
//!
//! Each submodule handles one command.
//!
//! # Commands
//! - `waveform`: Loudness waveform of an audio-analysis document
//! - `features`: Feature cards for an audio-features document
//! - `describe`: Descriptions of the audio features
//! - `config`: Open configuration file in user's preferred editor
//! - `logs`: Display recent log entries

pub mod config;
pub mod describe;
pub mod features;
pub mod logs;
pub mod waveform;

pub use config::handle_config;
pub use describe::handle_describe;
pub use features::handle_features;
pub use logs::handle_logs;
pub use waveform::handle_waveform;
