use crate::audio::{AudioBuffer, FilteredBuffer};
use crate::config::{ClipMode, FilterSpec};
use crate::error::{FilterError, Result};
use crate::signal_processing::{FirLowpass, KaiserEstimate, ResponsePoint};

/// Everything produced by one filtering request
///
/// The caller owns the result; the diagnostic views read from it directly.
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub spec: FilterSpec,
    pub estimate: KaiserEstimate,
    pub taps: Vec<f64>,
    pub original: AudioBuffer,
    pub filtered: FilteredBuffer,
}

impl FilterResult {
    pub fn sample_rate(&self) -> u32 {
        self.original.sample_rate()
    }

    /// Filtered audio converted back to 16-bit PCM
    pub fn filtered_pcm(&self, mode: ClipMode) -> AudioBuffer {
        self.filtered.quantize(mode)
    }

    /// Amplitude response of the taps from DC up to Nyquist
    pub fn amplitude_response(&self, num_points: usize) -> Vec<ResponsePoint> {
        crate::signal_processing::amplitude_response(
            &self.taps,
            self.sample_rate() as f64,
            num_points,
        )
    }
}

/// Lowpass filter bound to one sample rate
///
/// Holds no mutable state; one processor can filter any number of buffers
/// recorded at its rate.
pub struct LowpassProcessor {
    filter: FirLowpass,
}

impl LowpassProcessor {
    pub fn new(spec: &FilterSpec, sample_rate: u32) -> Result<Self> {
        let filter = FirLowpass::new(spec, sample_rate)?;
        log::info!(
            "Lowpass {} Hz (width {} Hz, {} dB) at {} Hz: {} taps, beta {:.4}",
            spec.cutoff_hz,
            spec.width_hz,
            spec.ripple_db,
            sample_rate,
            filter.num_taps(),
            filter.beta()
        );
        Ok(Self { filter })
    }

    pub fn filter(&self) -> &FirLowpass {
        &self.filter
    }

    /// Filter every channel of `buffer` with zero phase
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` if the buffer's sample rate
    /// differs from the rate the filter was designed for.
    pub fn process(&self, buffer: &AudioBuffer) -> Result<FilterResult> {
        let designed_rate = self.filter.sample_rate();
        if buffer.sample_rate() != designed_rate {
            return Err(FilterError::invalid(
                "sample_rate",
                buffer.sample_rate() as f64,
                format!("{} Hz (rate the filter was designed for)", designed_rate),
            ));
        }

        if buffer.is_empty() {
            log::warn!("Empty input buffer, nothing to filter");
        }

        let channels: Vec<Vec<f64>> = buffer
            .deinterleave()
            .into_iter()
            .enumerate()
            .map(|(index, samples)| {
                log::debug!("Filtering channel {} ({} frames)", index, samples.len());
                self.filter.filtfilt(&samples)
            })
            .collect();

        let filtered = FilteredBuffer::from_channels(channels, designed_rate);
        let clipped = filtered.out_of_range_count();
        if clipped > 0 {
            log::warn!("{} filtered samples exceed the 16-bit range", clipped);
        }

        Ok(FilterResult {
            spec: *self.filter.spec(),
            estimate: self.filter.estimate(),
            taps: self.filter.taps().to_vec(),
            original: buffer.clone(),
            filtered,
        })
    }
}

/// Design a filter for `buffer`'s sample rate and apply it
pub fn process_audio(spec: &FilterSpec, buffer: &AudioBuffer) -> Result<FilterResult> {
    LowpassProcessor::new(spec, buffer.sample_rate())?.process(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> FilterSpec {
        FilterSpec::new(1000.0, 400.0, 60.0)
    }

    #[test]
    fn test_process_preserves_layout() {
        let samples: Vec<i16> = (0..600).map(|i| ((i * 37) % 200) as i16 - 100).collect();
        let buffer = AudioBuffer::new(samples, 2, 8000).unwrap();
        let result = process_audio(&spec(), &buffer).unwrap();

        assert_eq!(result.filtered.len(), buffer.len());
        assert_eq!(result.filtered.channels(), 2);
        assert_eq!(result.sample_rate(), 8000);
        assert_eq!(result.taps.len(), result.estimate.num_taps);
    }

    #[test]
    fn test_process_empty_buffer() {
        let buffer = AudioBuffer::mono(Vec::new(), 8000).unwrap();
        let result = process_audio(&spec(), &buffer).unwrap();
        assert!(result.filtered.is_empty());
        assert!(result.filtered_pcm(ClipMode::Saturate).is_empty());
        assert_eq!(result.taps.len(), 145);
    }

    #[test]
    fn test_process_rejects_other_sample_rate() {
        let processor = LowpassProcessor::new(&spec(), 8000).unwrap();
        let buffer = AudioBuffer::mono(vec![0; 16], 16000).unwrap();
        assert!(matches!(
            processor.process(&buffer),
            Err(FilterError::InvalidParameter {
                name: "sample_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_cutoff_fails_before_filtering() {
        let buffer = AudioBuffer::mono(vec![0; 16], 8000).unwrap();
        let err = process_audio(&FilterSpec::new(5000.0, 50.0, 60.0), &buffer).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidParameter {
                name: "cutoff_hz",
                ..
            }
        ));
    }

    #[test]
    fn test_channels_filtered_independently() {
        // Left carries DC, right is silent; no leakage between them
        let mut samples = Vec::new();
        for _ in 0..500 {
            samples.push(1000);
            samples.push(0);
        }
        let buffer = AudioBuffer::new(samples, 2, 8000).unwrap();
        let result = process_audio(&spec(), &buffer).unwrap();

        let right = result.filtered.channel(1).unwrap();
        assert!(right.iter().all(|&v| v.abs() < 1e-9));
        let left = result.filtered.channel(0).unwrap();
        assert!(left.iter().all(|&v| (v - 1000.0).abs() < 1e-6));
    }
}
