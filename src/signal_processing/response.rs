use std::f64::consts::PI;

use num_complex::Complex64;

use crate::constants::MIN_MAGNITUDE;

/// One point of a frequency response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePoint {
    pub frequency_hz: f64,
    pub magnitude: f64,
    pub gain_db: f64,
}

/// Evaluate the complex frequency response of an FIR filter at `omega`
/// radians per sample: `H(w) = sum(taps[k] * e^(-j*w*k))`.
pub fn evaluate(taps: &[f64], omega: f64) -> Complex64 {
    let z = Complex64::from_polar(1.0, -omega);
    // Horner's rule in z^-1, highest power first
    taps.iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &b| acc * z + b)
}

/// Amplitude response at `num_points` evenly spaced frequencies from DC
/// (inclusive) up to Nyquist (exclusive).
pub fn amplitude_response(taps: &[f64], sample_rate: f64, num_points: usize) -> Vec<ResponsePoint> {
    let nyquist = sample_rate / 2.0;
    (0..num_points)
        .map(|i| {
            let fraction = i as f64 / num_points as f64;
            let magnitude = evaluate(taps, PI * fraction).norm();
            ResponsePoint {
                frequency_hz: fraction * nyquist,
                magnitude,
                gain_db: 20.0 * magnitude.max(MIN_MAGNITUDE).log10(),
            }
        })
        .collect()
}

/// Gain in dB at a single frequency in Hz
pub fn gain_db_at(taps: &[f64], sample_rate: f64, frequency_hz: f64) -> f64 {
    let omega = 2.0 * PI * frequency_hz / sample_rate;
    20.0 * evaluate(taps, omega).norm().max(MIN_MAGNITUDE).log10()
}
