//! Numeric constants for filter design and diagnostics
//!
//! Defaults for the filter parameters and the thresholds used to keep
//! reported values finite.

/// Default low-pass cutoff frequency in Hz.
pub const DEFAULT_CUTOFF_HZ: f64 = 1000.0;

/// Default passband-to-stopband transition width in Hz.
pub const DEFAULT_WIDTH_HZ: f64 = 50.0;

/// Default stopband ripple (attenuation) in dB.
pub const DEFAULT_RIPPLE_DB: f64 = 60.0;

/// Number of frequency points evaluated for the amplitude response.
pub const DEFAULT_RESPONSE_POINTS: usize = 8000;

/// Floor applied to |H(f)| before converting to dB, so exact zeros in the
/// response report -240 dB instead of negative infinity.
pub const MIN_MAGNITUDE: f64 = 1e-12;

/// Zero-phase filtering pads each end by this many filter lengths.
pub const PAD_LENGTH_FACTOR: usize = 3;

/// Convergence threshold for the I0 power series.
pub const BESSEL_EPSILON: f64 = 1e-21;

/// Longest filter the designer will build. Narrower transitions are rejected
/// instead of attempting the allocation.
pub const MAX_TAPS: usize = 1_048_575;

/// Largest stopband attenuation accepted. Beyond it the Kaiser beta pushes
/// I0(beta) past the f64 range.
pub const MAX_RIPPLE_DB: f64 = 6000.0;
