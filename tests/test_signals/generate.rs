use std::f64::consts::PI;

/// Constant-valued 16-bit signal
#[allow(dead_code)]
pub fn dc_signal(value: i16, len: usize) -> Vec<i16> {
    vec![value; len]
}

/// Sine wave as 16-bit PCM
#[allow(dead_code)]
pub fn sine_pcm(freq_hz: f64, amplitude: f64, sample_rate: u32, len: usize) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (amplitude * (2.0 * PI * freq_hz * t).sin()).round() as i16
        })
        .collect()
}

/// Sum of a low and a high tone as 16-bit PCM
#[allow(dead_code)]
pub fn two_tone_pcm(
    low_hz: f64,
    high_hz: f64,
    amplitude: f64,
    sample_rate: u32,
    len: usize,
) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            let v = (2.0 * PI * low_hz * t).sin() + (2.0 * PI * high_hz * t).sin();
            (amplitude * v).round() as i16
        })
        .collect()
}

/// Root-mean-square of a slice
#[allow(dead_code)]
pub fn rms(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
}
