use crate::config::ClipMode;
use crate::error::{FilterError, Result};

/// Interleaved 16-bit PCM audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap interleaved samples [c0, c1, ..., c0, c1, ...]
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` if `channels` or `sample_rate`
    /// is zero, or the sample count is not a whole number of frames.
    pub fn new(samples: Vec<i16>, channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(FilterError::invalid("channels", 0.0, "at least 1 channel"));
        }
        if sample_rate == 0 {
            return Err(FilterError::invalid("sample_rate", 0.0, "a rate > 0 Hz"));
        }
        if !samples.len().is_multiple_of(channels as usize) {
            return Err(FilterError::invalid(
                "samples",
                samples.len() as f64,
                format!("a multiple of {} channels", channels),
            ));
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Single-channel buffer
    pub fn mono(samples: Vec<i16>, sample_rate: u32) -> Result<Self> {
        Self::new(samples, 1, sample_rate)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Total number of interleaved samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Extract one channel as floating point, or `None` if out of range
    pub fn channel(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.channels as usize {
            return None;
        }
        Some(
            self.samples
                .iter()
                .skip(index)
                .step_by(self.channels as usize)
                .map(|&s| s as f64)
                .collect(),
        )
    }

    /// Split into one floating-point sequence per channel
    pub fn deinterleave(&self) -> Vec<Vec<f64>> {
        (0..self.channels as usize)
            .filter_map(|c| self.channel(c))
            .collect()
    }
}

/// Floating-point filter output with the same layout as its source buffer
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredBuffer {
    samples: Vec<f64>,
    channels: u16,
    sample_rate: u32,
}

impl FilteredBuffer {
    /// Interleave per-channel sequences of equal length
    ///
    /// # Panics
    /// Panics if `channels` is empty or the sequences differ in length.
    pub fn from_channels(channels: Vec<Vec<f64>>, sample_rate: u32) -> Self {
        assert!(!channels.is_empty(), "at least one channel required");
        let frames = channels[0].len();
        assert!(
            channels.iter().all(|c| c.len() == frames),
            "channel lengths differ"
        );

        let mut samples = Vec::with_capacity(frames * channels.len());
        for frame in 0..frames {
            samples.extend(channels.iter().map(|c| c[frame]));
        }

        Self {
            samples,
            channels: channels.len() as u16,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Extract one channel, or `None` if out of range
    pub fn channel(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.channels as usize {
            return None;
        }
        Some(
            self.samples
                .iter()
                .skip(index)
                .step_by(self.channels as usize)
                .copied()
                .collect(),
        )
    }

    /// Convert back to 16-bit PCM
    pub fn quantize(&self, mode: ClipMode) -> AudioBuffer {
        AudioBuffer {
            samples: self
                .samples
                .iter()
                .map(|&x| quantize_sample(x, mode))
                .collect(),
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }

    /// Number of samples that fall outside the 16-bit range
    pub fn out_of_range_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|&&x| x.round() > i16::MAX as f64 || x.round() < i16::MIN as f64)
            .count()
    }
}

/// Convert one filtered sample to 16-bit PCM
///
/// NaN maps to 0 in both modes.
pub fn quantize_sample(x: f64, mode: ClipMode) -> i16 {
    if x.is_nan() {
        return 0;
    }
    match mode {
        ClipMode::Saturate => x.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16,
        ClipMode::Wrap => {
            let wrapped = x.trunc().rem_euclid(65536.0);
            if wrapped.is_finite() {
                wrapped as u16 as i16
            } else {
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_buffer_rejects_partial_frames() {
        assert!(AudioBuffer::new(vec![1, 2, 3], 2, 8000).is_err());
        assert!(AudioBuffer::new(vec![1, 2], 0, 8000).is_err());
        assert!(AudioBuffer::new(vec![1, 2], 1, 0).is_err());
        assert!(AudioBuffer::new(vec![], 2, 8000).is_ok());
    }

    #[test]
    fn test_channel_extraction() {
        let buffer = AudioBuffer::new(vec![1, -1, 2, -2, 3, -3], 2, 8000).unwrap();
        assert_eq!(buffer.frames(), 3);
        assert_eq!(buffer.channel(0).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(buffer.channel(1).unwrap(), vec![-1.0, -2.0, -3.0]);
        assert!(buffer.channel(2).is_none());
        assert_eq!(buffer.deinterleave().len(), 2);
    }

    #[test]
    fn test_filtered_buffer_interleaves() {
        let filtered = FilteredBuffer::from_channels(vec![vec![1.0, 2.0], vec![10.0, 20.0]], 8000);
        assert_eq!(filtered.samples(), &[1.0, 10.0, 2.0, 20.0]);
        assert_eq!(filtered.frames(), 2);
        assert_eq!(filtered.channel(1).unwrap(), vec![10.0, 20.0]);
    }

    #[test]
    fn test_quantize_saturate() {
        assert_eq!(quantize_sample(1.4, ClipMode::Saturate), 1);
        assert_eq!(quantize_sample(1.6, ClipMode::Saturate), 2);
        assert_eq!(quantize_sample(-1.6, ClipMode::Saturate), -2);
        assert_eq!(quantize_sample(40000.0, ClipMode::Saturate), i16::MAX);
        assert_eq!(quantize_sample(-40000.0, ClipMode::Saturate), i16::MIN);
        assert_eq!(quantize_sample(f64::INFINITY, ClipMode::Saturate), i16::MAX);
        assert_eq!(quantize_sample(f64::NAN, ClipMode::Saturate), 0);
    }

    #[test]
    fn test_quantize_wrap() {
        assert_eq!(quantize_sample(1.9, ClipMode::Wrap), 1);
        assert_eq!(quantize_sample(-1.9, ClipMode::Wrap), -1);
        assert_eq!(quantize_sample(32768.0, ClipMode::Wrap), i16::MIN);
        assert_eq!(quantize_sample(32769.5, ClipMode::Wrap), -32767);
        assert_eq!(quantize_sample(-32769.0, ClipMode::Wrap), 32767);
        assert_eq!(quantize_sample(f64::INFINITY, ClipMode::Wrap), 0);
    }

    #[test]
    fn test_quantize_buffer_and_range_count() {
        let filtered = FilteredBuffer::from_channels(vec![vec![0.4, 33000.0, -33000.0]], 8000);
        assert_eq!(filtered.out_of_range_count(), 2);
        let pcm = filtered.quantize(ClipMode::Saturate);
        assert_eq!(pcm.samples(), &[0, i16::MAX, i16::MIN]);
        assert_eq!(pcm.sample_rate(), 8000);
    }
}
