use std::f64::consts::PI;

use crate::config::FilterSpec;
use crate::error::{FilterError, Result};
use crate::signal_processing::filtfilt::filtfilt;
use crate::signal_processing::kaiser::{KaiserEstimate, kaiser_window};
use crate::signal_processing::response::{ResponsePoint, amplitude_response};

/// Kaiser-windowed FIR lowpass filter with linear phase response
///
/// The length and window shape come from the Kaiser formulas for the
/// requested ripple and transition width; the taps are a windowed sinc scaled
/// to unity gain at DC. Applied with [`FirLowpass::filtfilt`] the filter has
/// zero phase.
#[derive(Debug, Clone)]
pub struct FirLowpass {
    taps: Vec<f64>,
    estimate: KaiserEstimate,
    spec: FilterSpec,
    sample_rate: u32,
}

impl FirLowpass {
    /// Design a lowpass filter for the given sample rate
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` if the cutoff is not strictly
    /// between 0 and Nyquist, the width or ripple are not positive, or the
    /// design would exceed the tap or ripple limits in [`crate::constants`].
    pub fn new(spec: &FilterSpec, sample_rate: u32) -> Result<Self> {
        spec.validate(sample_rate)?;

        let estimate = KaiserEstimate::new(spec.ripple_db, spec.normalized_width(sample_rate))?;
        let taps = windowed_sinc(
            estimate.num_taps,
            spec.normalized_cutoff(sample_rate),
            estimate.beta,
        );
        let sum: f64 = taps.iter().sum();
        if !taps.iter().all(|t| t.is_finite()) || sum == 0.0 {
            return Err(FilterError::invalid(
                "ripple_db",
                spec.ripple_db,
                "a ripple whose Kaiser window is finite",
            ));
        }

        log::debug!(
            "Designed lowpass: cutoff={} Hz, width={} Hz, ripple={} dB, fs={} Hz -> {} taps, beta={:.4}",
            spec.cutoff_hz,
            spec.width_hz,
            spec.ripple_db,
            sample_rate,
            estimate.num_taps,
            estimate.beta
        );

        Ok(Self {
            taps,
            estimate,
            spec: *spec,
            sample_rate,
        })
    }

    /// Filter a single-channel sequence with zero phase, preserving its length
    pub fn filtfilt(&self, input: &[f64]) -> Vec<f64> {
        filtfilt(&self.taps, input)
    }

    /// Amplitude response from DC up to Nyquist
    pub fn amplitude_response(&self, num_points: usize) -> Vec<ResponsePoint> {
        amplitude_response(&self.taps, self.sample_rate as f64, num_points)
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Get access to the tap coefficients
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn beta(&self) -> f64 {
        self.estimate.beta
    }

    pub fn estimate(&self) -> KaiserEstimate {
        self.estimate
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Windowed-sinc lowpass taps
///
/// `cutoff` is normalized to Nyquist. The ideal impulse response
/// `cutoff * sinc(cutoff * m)`, with `m` centred on the middle tap, is
/// multiplied by a Kaiser window and scaled so the taps sum to 1.
pub fn windowed_sinc(num_taps: usize, cutoff: f64, beta: f64) -> Vec<f64> {
    let alpha = 0.5 * (num_taps as f64 - 1.0);
    let window = kaiser_window(num_taps, beta);

    let mut taps: Vec<f64> = window
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let m = i as f64 - alpha;
            cutoff * sinc(cutoff * m) * w
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    if sum != 0.0 {
        for tap in taps.iter_mut() {
            *tap /= sum;
        }
    }
    taps
}

/// Normalized sinc: `sin(pi x) / (pi x)`
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}
