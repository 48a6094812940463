use std::f64::consts::PI;

use crate::constants::{BESSEL_EPSILON, MAX_RIPPLE_DB, MAX_TAPS};
use crate::error::{FilterError, Result};

/// Filter length and window shape that satisfy a ripple/transition-width target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KaiserEstimate {
    /// Number of taps (always odd, at least 1)
    pub num_taps: usize,
    /// Kaiser window shape parameter
    pub beta: f64,
}

impl KaiserEstimate {
    /// Estimate the Kaiser window parameters for a low-pass design.
    ///
    /// # Arguments
    /// * `ripple_db` - Stopband attenuation in dB (positive)
    /// * `width` - Transition width normalized to Nyquist (0 < width)
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` when either argument is
    /// non-positive or not finite, when `ripple_db` exceeds
    /// [`MAX_RIPPLE_DB`], or when the design would need more than
    /// [`MAX_TAPS`] taps.
    pub fn new(ripple_db: f64, width: f64) -> Result<Self> {
        if !ripple_db.is_finite() || ripple_db <= 0.0 || ripple_db > MAX_RIPPLE_DB {
            return Err(FilterError::invalid(
                "ripple_db",
                ripple_db,
                format!("0 < ripple_db <= {} dB", MAX_RIPPLE_DB),
            ));
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(FilterError::invalid(
                "width",
                width,
                "a finite normalized width > 0",
            ));
        }
        if kaiser_order_raw(ripple_db, width) > MAX_TAPS as f64 {
            return Err(FilterError::invalid(
                "width",
                width,
                format!("a normalized width that yields at most {} taps", MAX_TAPS),
            ));
        }

        Ok(Self {
            num_taps: kaiser_order(ripple_db, width),
            beta: kaiser_beta(ripple_db),
        })
    }
}

/// Kaiser window beta for a stopband attenuation in dB
pub fn kaiser_beta(ripple_db: f64) -> f64 {
    if ripple_db > 50.0 {
        0.1102 * (ripple_db - 8.7)
    } else if ripple_db >= 21.0 {
        0.5842 * (ripple_db - 21.0).powf(0.4) + 0.07886 * (ripple_db - 21.0)
    } else {
        0.0
    }
}

/// Kaiser filter length for a ripple in dB and a Nyquist-normalized
/// transition width, rounded up to the next odd count.
pub fn kaiser_order(ripple_db: f64, width: f64) -> usize {
    let n = kaiser_order_raw(ripple_db, width);
    let n = if n.is_finite() && n > 1.0 {
        n as usize
    } else {
        1
    };
    if n.is_multiple_of(2) { n + 1 } else { n }
}

/// Kaiser filter length before the odd/minimum adjustment, as a float so
/// oversized designs can be detected without overflowing `usize`
pub fn kaiser_order_raw(ripple_db: f64, width: f64) -> f64 {
    ((ripple_db - 8.0) / (2.285 * PI * width)).ceil()
}

/// Symmetric Kaiser window of `len` points
pub fn kaiser_window(len: usize, beta: f64) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = bessel_i0(beta);
            let last = (len - 1) as f64;
            (0..len)
                .map(|i| {
                    let x = 2.0 * i as f64 / last - 1.0;
                    bessel_i0(beta * (1.0 - x * x).max(0.0).sqrt()) / denom
                })
                .collect()
        }
    }
}

/// Modified Bessel function of the first kind, order 0
pub fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..500 {
        let ratio = half / k as f64;
        term *= ratio * ratio;
        sum += term;
        if term < BESSEL_EPSILON * sum {
            break;
        }
    }
    sum
}
