//! Diagnostic views of a filtering result.
//!
//! Each view is a table of numeric columns that a plotting tool can draw:
//!
//! - `plot_signal`: sample number, original and filtered amplitude
//! - `plot_amplitude_response`: frequency in Hz and gain in dB
//! - `plot_impulse_response`: tap number and tap value

mod csv;
mod json;
mod text;

use std::fs;
use std::path::{Path, PathBuf};

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

use crate::config::OutputConfig;
use crate::error::{FilterError, Result};
use crate::processing::FilterResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DiagnosticView {
    Signal,
    AmplitudeResponse,
    ImpulseResponse,
}

impl DiagnosticView {
    pub const ALL: [DiagnosticView; 3] = [
        DiagnosticView::Signal,
        DiagnosticView::AmplitudeResponse,
        DiagnosticView::ImpulseResponse,
    ];

    /// Base file name for the view
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticView::Signal => "plot_signal",
            DiagnosticView::AmplitudeResponse => "plot_amplitude_response",
            DiagnosticView::ImpulseResponse => "plot_impulse_response",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// A titled table of numeric columns
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticSeries {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<f64>>,
}

pub trait Formatter {
    fn format(&self, series: &DiagnosticSeries) -> String;
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Original vs. filtered samples of one channel
///
/// # Errors
/// Returns `FilterError::InvalidParameter` if `channel` does not exist.
pub fn signal_overlay(result: &FilterResult, channel: usize) -> Result<DiagnosticSeries> {
    let channels = result.original.channels();
    let (Some(original), Some(filtered)) = (
        result.original.channel(channel),
        result.filtered.channel(channel),
    ) else {
        return Err(FilterError::invalid(
            "overlay_channel",
            channel as f64,
            format!("a channel index below {}", channels),
        ));
    };

    Ok(DiagnosticSeries {
        title: "Original vs. Filtered Audio Signal".to_string(),
        columns: vec!["sample", "original", "filtered"],
        rows: original
            .iter()
            .zip(&filtered)
            .enumerate()
            .map(|(i, (&o, &f))| vec![i as f64, o, f])
            .collect(),
    })
}

/// Gain in dB against frequency in Hz
pub fn amplitude_response(result: &FilterResult, num_points: usize) -> DiagnosticSeries {
    DiagnosticSeries {
        title: "Amplitude Response of the FIR Filter".to_string(),
        columns: vec!["frequency_hz", "gain_db"],
        rows: result
            .amplitude_response(num_points)
            .iter()
            .map(|p| vec![p.frequency_hz, p.gain_db])
            .collect(),
    }
}

/// Tap values indexed by tap number
pub fn impulse_response(result: &FilterResult) -> DiagnosticSeries {
    DiagnosticSeries {
        title: "Impulse Response of the FIR Filter".to_string(),
        columns: vec!["tap", "amplitude"],
        rows: result
            .taps
            .iter()
            .enumerate()
            .map(|(i, &t)| vec![i as f64, t])
            .collect(),
    }
}

pub fn build_series(
    view: DiagnosticView,
    result: &FilterResult,
    config: &OutputConfig,
) -> Result<DiagnosticSeries> {
    match view {
        DiagnosticView::Signal => signal_overlay(result, config.overlay_channel),
        DiagnosticView::AmplitudeResponse => {
            Ok(amplitude_response(result, config.response_points))
        }
        DiagnosticView::ImpulseResponse => Ok(impulse_response(result)),
    }
}

/// Write the requested views into `dir`, returning the files created
pub fn write_diagnostics(
    dir: &Path,
    result: &FilterResult,
    views: &[DiagnosticView],
    config: &OutputConfig,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let formatter = create_formatter(format);

    let mut written = Vec::with_capacity(views.len());
    for &view in views {
        let series = build_series(view, result, config)?;
        let path = dir.join(format!("{}.{}", view.name(), format.extension()));
        fs::write(&path, formatter.format(&series))?;
        log::info!("Wrote {} ({} rows)", path.display(), series.rows.len());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioBuffer;
    use crate::config::FilterSpec;
    use crate::processing::process_audio;

    fn result() -> FilterResult {
        let samples: Vec<i16> = (0..200).map(|i| (i % 20) as i16 * 100).collect();
        let buffer = AudioBuffer::new(samples, 2, 8000).unwrap();
        process_audio(&FilterSpec::new(1000.0, 400.0, 60.0), &buffer).unwrap()
    }

    #[test]
    fn test_signal_overlay_rows() {
        let result = result();
        let series = signal_overlay(&result, 1).unwrap();
        assert_eq!(series.rows.len(), 100);
        assert_eq!(series.rows[3][0], 3.0);
        assert_eq!(series.rows[3][1], result.original.channel(1).unwrap()[3]);
        assert!(signal_overlay(&result, 2).is_err());
    }

    #[test]
    fn test_impulse_response_rows() {
        let result = result();
        let series = impulse_response(&result);
        assert_eq!(series.rows.len(), result.taps.len());
        assert_eq!(series.rows[10], vec![10.0, result.taps[10]]);
    }

    #[test]
    fn test_amplitude_response_rows() {
        let series = amplitude_response(&result(), 100);
        assert_eq!(series.rows.len(), 100);
        assert_eq!(series.rows[0][0], 0.0);
        assert!(series.rows[0][1].abs() < 1e-6);
        assert!(series.rows.iter().all(|r| r[0] < 4000.0));
    }

    #[test]
    fn test_write_diagnostics_creates_files() {
        let dir = std::env::temp_dir().join(format!("wavfir-diag-{}", std::process::id()));
        let written = write_diagnostics(
            &dir,
            &result(),
            &DiagnosticView::ALL,
            &OutputConfig {
                response_points: 64,
                ..OutputConfig::default()
            },
            OutputFormat::Csv,
        )
        .unwrap();

        assert_eq!(written.len(), 3);
        assert!(written[1].ends_with("plot_amplitude_response.csv"));
        let text = fs::read_to_string(&written[1]).unwrap();
        assert_eq!(text.lines().count(), 65);
        fs::remove_dir_all(&dir).ok();
    }
}
