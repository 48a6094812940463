//! Configuration for the wavfir low-pass filter.
//!
//! ## File format
//!
//! Settings can be loaded from TOML. Every key is optional and falls back to
//! the defaults below:
//!
//! ```toml
//! [filter]
//! cutoff_hz = 1000.0
//! width_hz = 50.0
//! ripple_db = 60.0
//!
//! [output]
//! clip_mode = "saturate"
//! response_points = 8000
//! overlay_channel = 0
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    DEFAULT_CUTOFF_HZ, DEFAULT_RESPONSE_POINTS, DEFAULT_RIPPLE_DB, DEFAULT_WIDTH_HZ,
    MAX_RIPPLE_DB, MAX_TAPS,
};
use crate::error::{FilterError, Result};
use crate::signal_processing::kaiser::kaiser_order_raw;

/// Low-pass filter design parameters
///
/// # Example
/// ```
/// use wavfir::config::FilterSpec;
///
/// let spec = FilterSpec::default();
/// assert_eq!(spec.cutoff_hz, 1000.0);
/// assert!(spec.validate(44100).is_ok());
/// assert!(spec.validate(1800).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Cutoff frequency in Hz (0 < cutoff < sample_rate / 2)
    pub cutoff_hz: f64,
    /// Transition width in Hz between passband and stopband
    pub width_hz: f64,
    /// Stopband attenuation in dB; larger values give longer filters
    pub ripple_db: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            width_hz: DEFAULT_WIDTH_HZ,
            ripple_db: DEFAULT_RIPPLE_DB,
        }
    }
}

impl FilterSpec {
    pub fn new(cutoff_hz: f64, width_hz: f64, ripple_db: f64) -> Self {
        Self {
            cutoff_hz,
            width_hz,
            ripple_db,
        }
    }

    /// Check the parameters against a sample rate
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` naming the first offending
    /// parameter and its valid range.
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        if sample_rate == 0 {
            return Err(FilterError::invalid("sample_rate", 0.0, "a rate > 0 Hz"));
        }
        let nyquist = sample_rate as f64 / 2.0;

        if !self.cutoff_hz.is_finite() || self.cutoff_hz <= 0.0 || self.cutoff_hz >= nyquist {
            return Err(FilterError::invalid(
                "cutoff_hz",
                self.cutoff_hz,
                format!("0 < cutoff_hz < {} (Nyquist)", nyquist),
            ));
        }
        if !self.width_hz.is_finite() || self.width_hz <= 0.0 {
            return Err(FilterError::invalid(
                "width_hz",
                self.width_hz,
                "a finite width > 0 Hz",
            ));
        }
        if !self.ripple_db.is_finite()
            || self.ripple_db <= 0.0
            || self.ripple_db > MAX_RIPPLE_DB
        {
            return Err(FilterError::invalid(
                "ripple_db",
                self.ripple_db,
                format!("0 < ripple_db <= {} dB", MAX_RIPPLE_DB),
            ));
        }
        let raw_taps = kaiser_order_raw(self.ripple_db, self.normalized_width(sample_rate));
        if raw_taps > MAX_TAPS as f64 {
            return Err(FilterError::invalid(
                "width_hz",
                self.width_hz,
                format!(
                    "a width that yields at most {} taps at {} dB and {} Hz",
                    MAX_TAPS, self.ripple_db, sample_rate
                ),
            ));
        }
        Ok(())
    }

    /// Cutoff normalized to Nyquist (1.0 = sample_rate / 2)
    pub fn normalized_cutoff(&self, sample_rate: u32) -> f64 {
        self.cutoff_hz / (sample_rate as f64 / 2.0)
    }

    /// Transition width normalized to Nyquist
    pub fn normalized_width(&self, sample_rate: u32) -> f64 {
        self.width_hz / (sample_rate as f64 / 2.0)
    }
}

/// How filtered samples outside the 16-bit range are converted back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClipMode {
    /// Round to nearest and clamp to [-32768, 32767]
    #[default]
    Saturate,
    /// Truncate toward zero and wrap modulo 2^16
    Wrap,
}

/// Diagnostics and quantization settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Conversion of filtered samples back to 16-bit PCM
    pub clip_mode: ClipMode,
    /// Number of frequency points in the amplitude response
    pub response_points: usize,
    /// Channel shown in the signal overlay
    pub overlay_channel: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clip_mode: ClipMode::Saturate,
            response_points: DEFAULT_RESPONSE_POINTS,
            overlay_channel: 0,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WavfirConfig {
    /// Filter design parameters
    pub filter: FilterSpec,
    /// Output configuration
    pub output: OutputConfig,
}

impl WavfirConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| FilterError::Config(e.to_string()))?;
        if config.output.response_points == 0 {
            return Err(FilterError::Config(
                "output.response_points must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }
}
