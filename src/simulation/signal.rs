use std::f64::consts::PI;

/// One sine component of a synthetic test signal
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct Tone {
    pub frequency_hz: f64,
    pub amplitude: f64,
    #[serde(default)]
    pub phase_radians: f64,
}

impl Tone {
    pub fn new(frequency_hz: f64, amplitude: f64) -> Self {
        Self {
            frequency_hz,
            amplitude,
            phase_radians: 0.0,
        }
    }
}

/// Sum of sine tones, `duration_secs` long at `sample_rate`
pub fn generate_tones(tones: &[Tone], duration_secs: f64, sample_rate: u32) -> Vec<f64> {
    let num_samples = (duration_secs * sample_rate as f64) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            tones
                .iter()
                .map(|tone| {
                    tone.amplitude * (2.0 * PI * tone.frequency_hz * t + tone.phase_radians).sin()
                })
                .sum()
        })
        .collect()
}

/// Scale a signal in [-1, 1] by `full_scale` and convert to 16-bit PCM,
/// saturating at the integer limits.
pub fn to_pcm(signal: &[f64], full_scale: f64) -> Vec<i16> {
    signal
        .iter()
        .map(|&x| {
            (x * full_scale)
                .round()
                .clamp(i16::MIN as f64, i16::MAX as f64) as i16
        })
        .collect()
}
