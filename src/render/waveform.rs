//! Mirrored waveform drawing.
//!
//! The upper half of the area shows the envelope as a sparkline growing up
//! from the centre line. The lower half draws the inverted values with the
//! colours swapped, which makes the same envelope hang down from the centre.

use crate::analysis::waveform::{WaveformSample, RESOLUTION, STRIDE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Sparkline, Widget},
};

/// Column value of a full-scale sample.
pub const FULL_SCALE: u64 = 100;

/// Colours used by [`WaveformView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveformStyle {
    pub foreground: Color,
    pub background: Color,
}

impl Default for WaveformStyle {
    fn default() -> Self {
        Self {
            foreground: Color::Rgb(0xe2, 0x46, 0xab),
            background: Color::Rgb(0x19, 0x14, 0x14),
        }
    }
}

fn scale(sample: &WaveformSample) -> u64 {
    ((sample.upper * 2.0 * FULL_SCALE as f64).round() as u64).min(FULL_SCALE)
}

/// Resamples a waveform onto `width` display columns with values in 0..=100.
///
/// Each column spans an equal share of the timeline and takes the loudest
/// sample inside its span. Columns narrower than the sample stride may land
/// between two samples; those repeat the sample whose stride window covers
/// the column start. Anything else without a sample stays at 0.
pub fn columns(samples: &[WaveformSample], width: usize) -> Vec<u64> {
    (0..width)
        .map(|column| {
            let lo = column * RESOLUTION / width;
            let hi = ((column + 1) * RESOLUTION / width).max(lo + 1);

            let inside = samples
                .iter()
                .filter(|s| s.index >= lo && s.index < hi)
                .map(scale)
                .max();

            inside.unwrap_or_else(|| {
                if hi - lo >= STRIDE {
                    return 0;
                }
                samples
                    .iter()
                    .find(|s| s.index <= lo && lo < s.index + STRIDE)
                    .map(scale)
                    .unwrap_or(0)
            })
        })
        .collect()
}

/// Widget drawing a mirrored waveform.
pub struct WaveformView<'a> {
    samples: &'a [WaveformSample],
    style: WaveformStyle,
}

impl<'a> WaveformView<'a> {
    pub fn new(samples: &'a [WaveformSample]) -> Self {
        Self {
            samples,
            style: WaveformStyle::default(),
        }
    }

    pub fn style(mut self, style: WaveformStyle) -> Self {
        self.style = style;
        self
    }
}

impl Widget for WaveformView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let data = columns(self.samples, area.width as usize);

        let top_height = area.height.div_ceil(2);
        let top_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: top_height,
        };
        let bottom_area = Rect {
            x: area.x,
            y: area.y + top_height,
            width: area.width,
            height: area.height - top_height,
        };

        Sparkline::default()
            .data(&data)
            .max(FULL_SCALE)
            .style(
                Style::default()
                    .bg(self.style.background)
                    .fg(self.style.foreground),
            )
            .render(top_area, buf);

        if bottom_area.height == 0 {
            return;
        }

        let inverted: Vec<u64> = data.iter().map(|&v| FULL_SCALE - v).collect();

        Sparkline::default()
            .data(&inverted)
            .max(FULL_SCALE)
            .style(
                Style::default()
                    .bg(self.style.foreground)
                    .fg(self.style.background),
            )
            .render(bottom_area, buf);
    }
}

/// Tab-separated `index upper lower` lines, one per sample.
pub fn plain_table(samples: &[WaveformSample]) -> String {
    samples
        .iter()
        .map(|s| format!("{}\t{:.4}\t{:.4}\n", s.index, s.upper, s.lower))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::waveform::{bucket_waveform, Segment};

    fn full_track() -> Vec<WaveformSample> {
        let segment = Segment {
            start: 0.0,
            duration: 10.0,
            loudness_max: 0.0,
        };
        bucket_waveform(&[segment], 10.0).unwrap()
    }

    #[test]
    fn test_columns_narrower_than_grid() {
        let data = columns(&full_track(), 40);
        assert_eq!(data.len(), 40);
        assert!(data.iter().all(|&v| v == FULL_SCALE));
    }

    #[test]
    fn test_columns_wider_than_grid_hold_values() {
        let data = columns(&full_track(), 500);
        assert_eq!(data.len(), 500);
        assert!(data.iter().all(|&v| v == FULL_SCALE));
    }

    #[test]
    fn test_columns_take_loudest_sample() {
        let samples = vec![
            WaveformSample {
                index: 0,
                upper: 0.1,
                lower: -0.1,
            },
            WaveformSample {
                index: 8,
                upper: 0.4,
                lower: -0.4,
            },
        ];
        let data = columns(&samples, 1);
        assert_eq!(data, vec![80]);
    }

    #[test]
    fn test_columns_over_gaps_are_zero() {
        let segments = [Segment {
            start: 2.0,
            duration: 1.0,
            loudness_max: 0.0,
        }];
        let samples = bucket_waveform(&segments, 10.0).unwrap();
        let data = columns(&samples, 10);

        assert_eq!(data, vec![0, 0, 100, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_columns_empty_inputs() {
        assert!(columns(&full_track(), 0).is_empty());
        assert_eq!(columns(&[], 5), vec![0; 5]);
    }

    #[test]
    fn test_widget_draws_full_top_half() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        WaveformView::new(&full_track()).render(area, &mut buf);

        for x in 0..20u16 {
            for y in 0..5u16 {
                assert_eq!(buf[(x, y)].symbol(), "█", "cell ({x}, {y})");
            }
        }
        assert_eq!(buf[(0u16, 9u16)].bg, WaveformStyle::default().foreground);
    }

    #[test]
    fn test_widget_tolerates_tiny_areas() {
        let samples = full_track();
        for (w, h) in [(0, 0), (1, 1), (3, 0), (0, 3)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            WaveformView::new(&samples).render(area, &mut buf);
        }
    }

    #[test]
    fn test_plain_table_format() {
        let table = plain_table(&full_track()[..2]);
        assert_eq!(table, "0\t0.5000\t-0.5000\n8\t0.5000\t-0.5000\n");
    }
}
