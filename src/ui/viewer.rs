//! Full-screen waveform viewer.
//!
//! Shows the mirrored waveform of one track with a footer line, and waits
//! for the user to quit.

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io::{self, Stdout};
use std::time::Duration;

use crate::analysis::WaveformSample;
use crate::render::{WaveformStyle, WaveformView};

/// Formats seconds as `m:ss`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Footer text under the waveform.
fn footer_line(title: &str, duration: f64, sample_count: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::Rgb(0x1d, 0xb9, 0x54))),
        Span::raw(title.to_string()),
        Span::raw(" / "),
        Span::raw(format_duration(duration)),
        Span::raw(" / "),
        Span::raw(format!("{sample_count} samples")),
        Span::raw(" / q to quit"),
    ])
}

/// Terminal viewer for a single waveform.
pub struct WaveformViewer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    style: WaveformStyle,
}

impl WaveformViewer {
    /// Creates a new viewer and enters alternate screen mode.
    ///
    /// # Errors
    /// - If terminal cannot be initialized
    /// - If raw mode cannot be enabled
    /// - If alternate screen cannot be entered
    pub fn new(style: WaveformStyle) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(WaveformViewer { terminal, style })
    }

    /// Draws the waveform until `q`, Escape or Ctrl+C is pressed.
    ///
    /// The screen is redrawn on every poll, so resizes take effect right away.
    ///
    /// # Errors
    /// - If terminal rendering or event polling fails
    pub fn show(&mut self, title: &str, duration: f64, samples: &[WaveformSample]) -> anyhow::Result<()> {
        let style = self.style;
        let footer = footer_line(title, duration, samples.len());

        loop {
            self.terminal.draw(|frame| {
                let area = frame.area();
                let footer_height = 1;

                let content_area = Rect {
                    x: area.x,
                    y: area.y,
                    width: area.width,
                    height: area.height.saturating_sub(footer_height),
                };
                frame.render_widget(WaveformView::new(samples).style(style), content_area);

                let footer_area = Rect {
                    x: area.x,
                    y: area.y + area.height.saturating_sub(footer_height),
                    width: area.width,
                    height: footer_height.min(area.height),
                };
                frame.render_widget(
                    Paragraph::new(footer.clone())
                        .style(Style::default().fg(Color::White).bg(style.background)),
                    footer_area,
                );
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break
                        }
                        _ => {}
                    }
                }
            }
        }

        tracing::debug!("Viewer closed");
        Ok(())
    }

    /// Cleans up terminal state and exits alternate screen mode.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    /// - If cursor cannot be shown
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for WaveformViewer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
