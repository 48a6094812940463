use crate::constants::PAD_LENGTH_FACTOR;
use crate::signal_processing::FirFilterCore;

/// Zero-phase FIR filtering
///
/// Runs the filter forward, then backward over the reversed output, which
/// cancels the linear-phase delay and squares the magnitude response. The
/// signal is extended at both ends by odd reflection (`2*x[0] - x[n]`) and
/// each pass starts from the steady state for its first sample, keeping
/// boundary transients small. The output has the same length as `input`.
///
/// The pad length is `3 * taps.len()`, reduced to `input.len() - 1` for
/// short inputs.
pub fn filtfilt(taps: &[f64], input: &[f64]) -> Vec<f64> {
    if input.is_empty() || taps.is_empty() {
        return input.to_vec();
    }

    let padlen = (PAD_LENGTH_FACTOR * taps.len()).min(input.len() - 1);
    let mut ext = odd_extend(input, padlen);

    let mut core = FirFilterCore::new(taps.to_vec());
    core.prime(ext[0]);
    core.process_buffer(&mut ext);

    ext.reverse();
    core.prime(ext[0]);
    core.process_buffer(&mut ext);
    ext.reverse();

    ext.drain(..padlen);
    ext.truncate(input.len());
    ext
}

/// Extend `x` by `padlen` odd-reflected samples at each end
pub fn odd_extend(x: &[f64], padlen: usize) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }
    let padlen = padlen.min(n - 1);
    let first = x[0];
    let last = x[n - 1];

    let mut ext = Vec::with_capacity(n + 2 * padlen);
    ext.extend((1..=padlen).rev().map(|i| 2.0 * first - x[i]));
    ext.extend_from_slice(x);
    ext.extend((1..=padlen).map(|i| 2.0 * last - x[n - 1 - i]));
    ext
}
