//! Full-screen terminal views.

pub mod viewer;

pub use viewer::WaveformViewer;
